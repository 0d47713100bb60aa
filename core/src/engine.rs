//! The interactive engine: command surface, phase machine, session loop.

use tracing::debug;

use crate::battle;
use crate::error::{GameError, GameResult};
use crate::events::{CombatEvent, MatchResult, SessionOutcome, UnitId};
use crate::rng::CombatRng;
use crate::spawn::generate_encounter;
use crate::state::{
    GameState, SessionPhase, TargetedAction, ABILITY_MANA_COST, POTION_HEAL_AMOUNT,
};
use crate::types::Unit;
use crate::view::GameView;

/// The rules engine for one session: a player fighting waves of enemies
/// across repeated matches until defeat or retirement.
///
/// A front end drives the engine through [`select_action`],
/// [`select_target`] and [`confirm_continue`], reads [`phase`] to know what
/// input is expected next, and drains [`CombatEvent`]s for rendering.
/// Rejected commands consume no game turn.
///
/// [`select_action`]: GameEngine::select_action
/// [`select_target`]: GameEngine::select_target
/// [`confirm_continue`]: GameEngine::confirm_continue
/// [`phase`]: GameEngine::phase
pub struct GameEngine<R: CombatRng> {
    state: GameState,
    rng: R,
    events: Vec<CombatEvent>,
}

impl<R: CombatRng> GameEngine<R> {
    /// Start a session: fresh level-1 player, match 1 encounter, first
    /// round already opened.
    pub fn new(player_name: impl Into<String>, mut rng: R) -> Self {
        let player = Unit::player(player_name);
        let encounter = generate_encounter(1, &mut rng);
        let mut engine = Self {
            state: GameState::new(player, encounter),
            rng,
            events: Vec::new(),
        };
        engine.events.push(CombatEvent::MatchStart {
            match_index: 1,
            enemy_count: engine.state.encounter.units.len(),
        });
        engine.begin_round();
        engine
    }

    // ------------------------------------------------------------------
    // Command surface
    // ------------------------------------------------------------------

    /// Choose the player's action for this turn:
    /// 1 attack, 2 special ability, 3 forge weapon, 4 potion.
    ///
    /// Attack and special move the engine to target selection; the special
    /// additionally requires the mana cost up front. Forge and potion
    /// resolve immediately and end the player sub-turn.
    pub fn select_action(&mut self, choice: u8) -> GameResult<()> {
        if self.state.phase != SessionPhase::AwaitingAction {
            return Err(GameError::WrongPhase);
        }
        debug!(choice, "player action selected");

        match choice {
            1 => {
                self.state.phase = SessionPhase::AwaitingTarget {
                    action: TargetedAction::Attack,
                };
                Ok(())
            }
            2 => {
                let have = self.state.player.current_mana();
                if have < ABILITY_MANA_COST {
                    return Err(GameError::NotEnoughMana {
                        have,
                        need: ABILITY_MANA_COST,
                    });
                }
                self.state.phase = SessionPhase::AwaitingTarget {
                    action: TargetedAction::Special,
                };
                Ok(())
            }
            3 => {
                let bonus = self.state.player.forge_weapon();
                self.events.push(CombatEvent::WeaponForged {
                    bonus,
                    total_damage: self.state.player.damage(),
                });
                battle::regen_mana(&mut self.state.player, UnitId::Player, &mut self.events);
                self.end_player_turn();
                Ok(())
            }
            4 => {
                let healed = self.state.player.heal(POTION_HEAL_AMOUNT);
                self.events.push(CombatEvent::Healed {
                    target: UnitId::Player,
                    target_name: self.state.player.name.clone(),
                    amount: healed,
                    current_health: self.state.player.current_health(),
                });
                battle::regen_mana(&mut self.state.player, UnitId::Player, &mut self.events);
                self.end_player_turn();
                Ok(())
            }
            other => Err(GameError::InvalidChoice { choice: other }),
        }
    }

    /// Resolve the pending attack or special against the `index`-th living
    /// enemy (0-based, roster order). An out-of-range index rejects the
    /// attempt and returns the engine to action selection.
    pub fn select_target(&mut self, index: usize) -> GameResult<()> {
        let action = match self.state.phase {
            SessionPhase::AwaitingTarget { action } => action,
            _ => return Err(GameError::WrongPhase),
        };

        let living = self.state.encounter.living_slots();
        let slot = match living.get(index) {
            Some(&slot) => slot,
            None => {
                self.state.phase = SessionPhase::AwaitingAction;
                return Err(GameError::InvalidTarget {
                    index,
                    living: living.len(),
                });
            }
        };
        debug!(index, slot, ?action, "target selected");

        let GameState {
            player, encounter, ..
        } = &mut self.state;
        let target = &mut encounter.units[slot];
        let target_id = UnitId::Enemy(slot);

        match action {
            TargetedAction::Attack => {
                battle::basic_attack(player, UnitId::Player, target, target_id, &mut self.events);
                battle::regen_mana(player, UnitId::Player, &mut self.events);
            }
            TargetedAction::Special => {
                // Mana was already checked at selection time; the spend
                // itself is still all-or-nothing.
                if !player.consume_mana(ABILITY_MANA_COST) {
                    let have = player.current_mana();
                    self.state.phase = SessionPhase::AwaitingAction;
                    return Err(GameError::NotEnoughMana {
                        have,
                        need: ABILITY_MANA_COST,
                    });
                }
                self.events.push(CombatEvent::ManaSpent {
                    source: UnitId::Player,
                    source_name: player.name.clone(),
                    amount: ABILITY_MANA_COST,
                    remaining_mana: player.current_mana(),
                });
                battle::use_special(player, UnitId::Player, target, target_id, &mut self.events);
                // No regeneration after the special: casting the smite is
                // the whole turn.
            }
        }

        self.state.phase = SessionPhase::AwaitingAction;
        self.end_player_turn();
        Ok(())
    }

    /// After a won match: `true` starts the next match, `false` retires.
    pub fn confirm_continue(&mut self, continue_playing: bool) -> GameResult<()> {
        if self.state.phase != SessionPhase::AwaitingContinue {
            return Err(GameError::WrongPhase);
        }

        if !continue_playing {
            self.events.push(CombatEvent::SessionEnded {
                outcome: SessionOutcome::Retired,
            });
            self.state.phase = SessionPhase::GameOver {
                outcome: SessionOutcome::Retired,
            };
            return Ok(());
        }

        self.state.match_index += 1;
        self.state.round = 0;
        self.state.encounter = generate_encounter(self.state.match_index, &mut self.rng);
        debug!(
            match_index = self.state.match_index,
            enemies = self.state.encounter.units.len(),
            "next match generated"
        );
        self.events.push(CombatEvent::MatchStart {
            match_index: self.state.match_index,
            enemy_count: self.state.encounter.units.len(),
        });
        self.begin_round();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Query surface
    // ------------------------------------------------------------------

    pub fn phase(&self) -> SessionPhase {
        self.state.phase
    }

    pub fn match_index(&self) -> u32 {
        self.state.match_index
    }

    pub fn player(&self) -> &Unit {
        &self.state.player
    }

    /// Living enemies with their roster slots, in roster order. The
    /// position in this list is the index [`select_target`] expects.
    ///
    /// [`select_target`]: GameEngine::select_target
    pub fn living_enemies(&self) -> Vec<(usize, &Unit)> {
        self.state
            .encounter
            .units
            .iter()
            .enumerate()
            .filter(|(_, u)| u.is_alive())
            .collect()
    }

    /// Render-ready projection of the whole session.
    pub fn view(&self) -> GameView {
        GameView::from_state(&self.state)
    }

    pub fn is_over(&self) -> bool {
        matches!(self.state.phase, SessionPhase::GameOver { .. })
    }

    /// Take all events emitted since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<CombatEvent> {
        self.events.drain(..).collect()
    }

    // ------------------------------------------------------------------
    // Internal phase transitions
    // ------------------------------------------------------------------

    /// Open a round: victory check, then status ticks, then hand control
    /// to the player (or end the match if the bleed was fatal).
    fn begin_round(&mut self) {
        if !self.state.encounter.any_alive() {
            self.win_match();
            return;
        }

        self.state.round += 1;
        let GameState {
            player, encounter, ..
        } = &mut self.state;
        battle::status_phase(player, &mut encounter.units, &mut self.events);

        if !self.state.player.is_alive() {
            self.lose_match();
            return;
        }
        self.state.phase = SessionPhase::AwaitingAction;
    }

    /// A completed player action: cleanup, victory check, enemy phase,
    /// then the next round.
    fn end_player_turn(&mut self) {
        self.state.encounter.remove_defeated();
        if !self.state.encounter.any_alive() {
            self.win_match();
            return;
        }

        let GameState {
            player, encounter, ..
        } = &mut self.state;
        battle::enemy_phase(player, &mut encounter.units, &mut self.rng, &mut self.events);

        if !self.state.player.is_alive() {
            self.lose_match();
            return;
        }
        self.begin_round();
    }

    fn win_match(&mut self) {
        debug!(match_index = self.state.match_index, "match won");
        self.events.push(CombatEvent::MatchEnd {
            match_index: self.state.match_index,
            result: MatchResult::Won,
        });

        let player = &mut self.state.player;
        player.gain_level();
        self.events.push(CombatEvent::LevelGained {
            level: player.level(),
            max_health: player.max_health(),
            max_mana: player.max_mana(),
            base_damage: player.base_damage(),
        });
        player.reset_battle_stats();

        self.state.phase = SessionPhase::AwaitingContinue;
    }

    fn lose_match(&mut self) {
        debug!(match_index = self.state.match_index, "match lost");
        self.events.push(CombatEvent::MatchEnd {
            match_index: self.state.match_index,
            result: MatchResult::Lost,
        });
        self.events.push(CombatEvent::SessionEnded {
            outcome: SessionOutcome::Defeated,
        });
        self.state.phase = SessionPhase::GameOver {
            outcome: SessionOutcome::Defeated,
        };
    }
}
