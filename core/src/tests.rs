//! Scenario tests for the combat engine.
//!
//! Deterministic throughout: seeded [`XorShiftRng`] where the sequence does
//! not matter, scripted [`SequenceRng`] where it does.

use std::collections::VecDeque;

use crate::battle;
use crate::error::GameError;
use crate::events::{CombatEvent, MatchResult, SessionOutcome, UnitId};
use crate::rng::{CombatRng, XorShiftRng};
use crate::spawn::generate_encounter;
use crate::state::*;
use crate::types::{Unit, UnitKind};
use crate::GameEngine;

/// Scripted RNG: hands out a fixed sequence of raw values.
///
/// Once exhausted it returns 1, which reads as "no special" for the 1-in-3
/// enemy AI roll.
pub(crate) struct SequenceRng {
    values: VecDeque<u32>,
}

impl SequenceRng {
    pub(crate) fn new(values: &[u32]) -> Self {
        Self {
            values: values.iter().copied().collect(),
        }
    }
}

impl CombatRng for SequenceRng {
    fn next_u32(&mut self) -> u32 {
        self.values.pop_front().unwrap_or(1)
    }
}

fn drain(engine: &mut GameEngine<SequenceRng>) -> Vec<CombatEvent> {
    engine.drain_events()
}

fn enemy_damage_events(events: &[CombatEvent], slot: usize) -> Vec<(i32, i32)> {
    events
        .iter()
        .filter_map(|e| match e {
            CombatEvent::DamageTaken {
                target: UnitId::Enemy(s),
                amount,
                remaining_health,
                ..
            } if *s == slot => Some((*amount, *remaining_health)),
            _ => None,
        })
        .collect()
}

// ==========================================
// 1. UNIT INVARIANTS
// ==========================================

#[test]
fn health_stays_clamped() {
    let mut unit = Unit::new(UnitKind::Goblin, "G");
    unit.take_damage(9999);
    assert_eq!(unit.current_health(), 0);
    assert!(!unit.is_alive());

    // Dead units take no damage and no healing.
    unit.take_damage(10);
    assert_eq!(unit.current_health(), 0);
    assert_eq!(unit.heal(50), 0);
    assert_eq!(unit.current_health(), 0);

    let mut unit = Unit::new(UnitKind::Goblin, "G");
    assert_eq!(unit.heal(50), 0, "heal at full health restores nothing");
    unit.take_damage(10);
    assert_eq!(unit.heal(50), 10, "heal caps at max health");
    assert_eq!(unit.current_health(), unit.max_health());
}

#[test]
fn alive_is_exactly_positive_health() {
    let mut unit = Unit::new(UnitKind::Goblin, "G");
    unit.take_damage(59);
    assert!(unit.is_alive());
    assert!(unit.take_damage(1), "the killing hit reports the defeat");
    assert!(!unit.is_alive());
    assert!(!unit.take_damage(1), "a corpse cannot be defeated again");
}

#[test]
fn consume_mana_is_all_or_nothing() {
    let mut unit = Unit::new(UnitKind::Goblin, "G");
    assert_eq!(unit.current_mana(), 10);
    assert!(!unit.consume_mana(11));
    assert_eq!(unit.current_mana(), 10, "failed spend must not mutate");
    assert!(unit.consume_mana(10));
    assert_eq!(unit.current_mana(), 0);
    assert!(!unit.consume_mana(1));
}

#[test]
fn mana_regeneration_caps_at_max() {
    let mut unit = Unit::new(UnitKind::Goblin, "G");
    unit.consume_mana(7);
    assert_eq!(unit.regenerate_mana(5), 5);
    assert_eq!(unit.regenerate_mana(5), 2);
    assert_eq!(unit.current_mana(), unit.max_mana());
    unit.take_damage(9999);
    assert_eq!(unit.regenerate_mana(5), 0, "no regeneration while dead");
}

#[test]
fn bleed_overwrites_instead_of_stacking() {
    let mut unit = Unit::player("Hero");
    unit.apply_bleed(3);
    unit.apply_bleed(2);
    assert_eq!(unit.bleed_turns(), 2);

    let tick = unit.tick_bleed().unwrap();
    assert_eq!(tick.damage, BLEED_DAMAGE_PER_TURN);
    assert_eq!(tick.turns_left, 1);
    unit.tick_bleed().unwrap();
    assert!(unit.tick_bleed().is_none(), "expired bleed stops ticking");
    assert!(!unit.is_bleeding());
}

#[test]
fn three_bleed_ticks_cost_exactly_thirty_health() {
    // Scenario: 150 HP player, 3-turn bleed, no healing.
    let mut unit = Unit::player("Hero");
    unit.apply_bleed(3);
    for _ in 0..3 {
        unit.tick_bleed().unwrap();
    }
    assert_eq!(unit.current_health(), 120);
    assert!(unit.tick_bleed().is_none());
    assert_eq!(unit.current_health(), 120, "no further ticks after expiry");
}

#[test]
fn goblin_dies_on_the_fourth_basic_hit() {
    // 60 HP against 15-damage swings: 45, 30, 15, 0.
    let mut goblin = Unit::new(UnitKind::Goblin, "G");
    let player = Unit::player("Hero");
    for expected in [45, 30, 15] {
        goblin.take_damage(player.damage());
        assert_eq!(goblin.current_health(), expected);
        assert!(goblin.is_alive());
    }
    assert!(goblin.take_damage(player.damage()));
    assert!(!goblin.is_alive());
}

// ==========================================
// 2. FORGE AND LEVELING
// ==========================================

#[test]
fn forge_stacks_within_a_match_and_resets_after() {
    let mut player = Unit::player("Hero");
    assert_eq!(player.forge_weapon(), 3); // 25% of 15
    assert_eq!(player.damage(), 18);
    assert_eq!(player.forge_weapon(), 4); // 25% of 18, truncated
    assert_eq!(player.damage(), 22);

    player.reset_battle_stats();
    assert_eq!(player.damage(), 15);

    // Reset, forge, reset again lands back on the permanent value.
    player.forge_weapon();
    player.reset_battle_stats();
    assert_eq!(player.damage(), player.base_damage());
}

#[test]
fn level_up_grows_stats_and_restores_fully() {
    let mut player = Unit::player("Hero");
    player.take_damage(100);
    player.consume_mana(15);
    player.forge_weapon();

    player.gain_level();
    assert_eq!(player.level(), 2);
    assert_eq!(player.max_health(), 170);
    assert_eq!(player.max_mana(), 25);
    assert_eq!(player.base_damage(), 18);
    assert_eq!(player.current_health(), 170);
    assert_eq!(player.current_mana(), 25);
    assert_eq!(player.damage(), 18, "forge bonus does not survive a level");

    player.gain_level();
    assert_eq!(player.max_health(), 190);
    assert_eq!(player.max_mana(), 30);
    assert_eq!(player.base_damage(), 21);
}

#[test]
fn reset_battle_stats_clears_bleed_but_keeps_wounds() {
    let mut player = Unit::player("Hero");
    player.take_damage(40);
    player.apply_bleed(3);
    player.reset_battle_stats();
    assert!(!player.is_bleeding());
    assert_eq!(player.current_health(), 110);
}

// ==========================================
// 3. SPAWNING
// ==========================================

#[test]
fn match_one_is_always_a_single_goblin() {
    for seed in 0..500u64 {
        let mut rng = XorShiftRng::seed_from_u64(seed);
        let encounter = generate_encounter(1, &mut rng);
        assert_eq!(encounter.units.len(), 1);
        assert_eq!(encounter.units[0].kind, UnitKind::Goblin);
        assert_eq!(encounter.units[0].name, "Goblin Scavenger");
    }
}

#[test]
fn enemy_special_roll_is_one_in_three_on_average() {
    let mut rng = XorShiftRng::seed_from_u64(42);
    let trials = 30_000;
    let hits = (0..trials)
        .filter(|_| rng.one_in(ENEMY_SPECIAL_CHANCE))
        .count();
    // Expected 10_000; five sigma is roughly 400.
    assert!(
        (9_600..=10_400).contains(&hits),
        "special rate drifted: {hits}/{trials}"
    );
}

// ==========================================
// 4. COMBAT PRIMITIVES
// ==========================================

#[test]
fn ghoul_sweep_bleeds_the_target() {
    let mut ghoul = Unit::new(UnitKind::Ghoul, "Ghoul");
    let mut player = Unit::player("Hero");
    let mut events = Vec::new();

    battle::use_special(
        &mut ghoul,
        UnitId::Enemy(0),
        &mut player,
        UnitId::Player,
        &mut events,
    );

    assert_eq!(player.current_health(), 135);
    assert_eq!(player.bleed_turns(), 3);
    assert!(events.iter().any(|e| matches!(
        e,
        CombatEvent::BleedApplied {
            target: UnitId::Player,
            turns: 3,
            ..
        }
    )));
}

#[test]
fn orc_berserk_recoils_onto_itself() {
    let mut orc = Unit::new(UnitKind::Orc, "Orc");
    let mut player = Unit::player("Hero");
    let mut events = Vec::new();

    battle::use_special(
        &mut orc,
        UnitId::Enemy(0),
        &mut player,
        UnitId::Player,
        &mut events,
    );

    assert_eq!(player.current_health(), 150 - 36);
    assert_eq!(orc.current_health(), 95);
}

#[test]
fn paladin_smite_heals_only_missing_health() {
    let mut player = Unit::player("Hero");
    player.take_damage(4);
    let mut goblin = Unit::new(UnitKind::Goblin, "G");
    let mut events = Vec::new();

    battle::use_special(
        &mut player,
        UnitId::Player,
        &mut goblin,
        UnitId::Enemy(0),
        &mut events,
    );

    assert_eq!(goblin.current_health(), 30);
    assert_eq!(player.current_health(), 150, "heal capped at max");
    assert!(events.iter().any(|e| matches!(
        e,
        CombatEvent::Healed {
            target: UnitId::Player,
            amount: 4,
            ..
        }
    )));
}

#[test]
fn status_phase_ticks_player_before_enemies() {
    let mut player = Unit::player("Hero");
    player.apply_bleed(1);
    let mut enemies = vec![Unit::new(UnitKind::Orc, "Orc")];
    enemies[0].apply_bleed(2);
    let mut events = Vec::new();

    battle::status_phase(&mut player, &mut enemies, &mut events);

    let ticked: Vec<UnitId> = events
        .iter()
        .filter_map(|e| match e {
            CombatEvent::BleedTicked { target, .. } => Some(*target),
            _ => None,
        })
        .collect();
    assert_eq!(ticked, vec![UnitId::Player, UnitId::Enemy(0)]);
    assert_eq!(player.current_health(), 140);
    assert_eq!(enemies[0].current_health(), 90);
}

// ==========================================
// 5. FULL-MATCH FLOWS
// ==========================================

#[test]
fn match_one_won_with_four_attacks() {
    // Enemy AI rolls 1 ("no special") for the three enemy phases.
    let mut engine = GameEngine::new("Hero", SequenceRng::new(&[1, 1, 1]));

    for _ in 0..4 {
        engine.select_action(1).unwrap();
        engine.select_target(0).unwrap();
    }

    let events = drain(&mut engine);
    assert_eq!(
        enemy_damage_events(&events, 0),
        vec![(15, 45), (15, 30), (15, 15), (15, 0)]
    );
    assert!(events.iter().any(|e| matches!(
        e,
        CombatEvent::UnitDefeated {
            target: UnitId::Enemy(0),
            ..
        }
    )));
    assert!(events.iter().any(|e| matches!(
        e,
        CombatEvent::MatchEnd {
            result: MatchResult::Won,
            ..
        }
    )));
    assert!(events.iter().any(|e| matches!(
        e,
        CombatEvent::LevelGained {
            level: 2,
            max_health: 170,
            max_mana: 25,
            base_damage: 18,
        }
    )));

    // Three goblin swings landed before the last cleanup.
    assert_eq!(engine.player().current_health(), 170, "restored on level");
    assert_eq!(engine.phase(), SessionPhase::AwaitingContinue);

    engine.confirm_continue(false).unwrap();
    assert!(engine.is_over());
    let events = drain(&mut engine);
    assert!(events.iter().any(|e| matches!(
        e,
        CombatEvent::SessionEnded {
            outcome: SessionOutcome::Retired,
        }
    )));
}

#[test]
fn match_lost_when_the_player_never_fights_back() {
    // All enemy rolls are basic attacks: 10 damage, 15 times.
    let mut engine = GameEngine::new("Hero", SequenceRng::new(&[]));

    let mut turns = 0;
    while !engine.is_over() {
        engine.select_action(3).unwrap();
        turns += 1;
        assert!(turns <= 15, "the goblin needed 15 swings at most");
    }

    assert_eq!(turns, 15);
    assert!(!engine.player().is_alive());
    let events = drain(&mut engine);
    assert!(events.iter().any(|e| matches!(
        e,
        CombatEvent::MatchEnd {
            result: MatchResult::Lost,
            ..
        }
    )));
    assert!(events.iter().any(|e| matches!(
        e,
        CombatEvent::SessionEnded {
            outcome: SessionOutcome::Defeated,
        }
    )));
    assert_eq!(
        engine.phase(),
        SessionPhase::GameOver {
            outcome: SessionOutcome::Defeated
        }
    );
    assert_eq!(engine.select_action(1), Err(GameError::WrongPhase));
}

#[test]
fn special_with_insufficient_mana_consumes_no_turn() {
    // Win match 1 with four attacks (rolls 1,1,1), then continue into a
    // scripted single-dragon match (count roll 0, percentile roll 0 => 1).
    let mut engine = GameEngine::new("Hero", SequenceRng::new(&[1, 1, 1, 0, 0, 1, 1]));
    for _ in 0..4 {
        engine.select_action(1).unwrap();
        engine.select_target(0).unwrap();
    }
    engine.confirm_continue(true).unwrap();
    assert_eq!(engine.living_enemies().len(), 1);
    assert_eq!(engine.living_enemies()[0].1.kind, UnitKind::Dragon);

    // Two smites drop the player from 25 to 5 mana.
    for _ in 0..2 {
        engine.select_action(2).unwrap();
        engine.select_target(0).unwrap();
    }
    assert_eq!(engine.player().current_mana(), 5);
    drain(&mut engine);
    let dragon_hp = engine.living_enemies()[0].1.current_health();
    let round = engine.view().round;

    let err = engine.select_action(2).unwrap_err();
    assert_eq!(
        err,
        GameError::NotEnoughMana {
            have: 5,
            need: ABILITY_MANA_COST
        }
    );
    assert_eq!(engine.phase(), SessionPhase::AwaitingAction);
    assert_eq!(engine.player().current_mana(), 5, "mana untouched");
    assert_eq!(
        engine.living_enemies()[0].1.current_health(),
        dragon_hp,
        "target untouched"
    );
    assert_eq!(engine.view().round, round, "no turn consumed");
    assert!(drain(&mut engine).is_empty(), "no events for a failed action");
}

#[test]
fn enemy_falls_back_to_basic_attack_without_mana() {
    // Both enemy rolls ask for the special (0); the goblin can only afford
    // the first one.
    let mut engine = GameEngine::new("Hero", SequenceRng::new(&[0, 0]));

    engine.select_action(1).unwrap();
    engine.select_target(0).unwrap();
    let events = drain(&mut engine);
    assert!(events.iter().any(|e| matches!(
        e,
        CombatEvent::ManaSpent {
            source: UnitId::Enemy(0),
            amount: ABILITY_MANA_COST,
            remaining_mana: 0,
            ..
        }
    )));
    assert!(events.iter().any(|e| matches!(
        e,
        CombatEvent::AbilityUsed { ability, .. } if ability == "Sneak Attack"
    )));
    assert_eq!(engine.player().current_health(), 130, "20 special damage");

    engine.select_action(1).unwrap();
    engine.select_target(0).unwrap();
    let events = drain(&mut engine);
    assert!(
        events.iter().any(|e| matches!(
            e,
            CombatEvent::Attack {
                attacker: UnitId::Enemy(0),
                ..
            }
        )),
        "broke goblin swings instead"
    );
    assert!(events.iter().any(|e| matches!(
        e,
        CombatEvent::ManaRegenerated {
            source: UnitId::Enemy(0),
            amount: 5,
            current_mana: 5,
            ..
        }
    )));
    assert_eq!(engine.player().current_health(), 120);
}

#[test]
fn invalid_commands_are_recoverable() {
    let mut engine = GameEngine::new("Hero", SequenceRng::new(&[]));

    assert_eq!(
        engine.select_action(9),
        Err(GameError::InvalidChoice { choice: 9 })
    );
    assert_eq!(engine.select_target(0), Err(GameError::WrongPhase));
    assert_eq!(engine.confirm_continue(true), Err(GameError::WrongPhase));

    engine.select_action(1).unwrap();
    assert_eq!(
        engine.select_target(5),
        Err(GameError::InvalidTarget {
            index: 5,
            living: 1
        })
    );
    assert_eq!(
        engine.phase(),
        SessionPhase::AwaitingAction,
        "a failed target attempt returns to the action menu"
    );
    assert!(drain(&mut engine)
        .iter()
        .all(|e| matches!(e, CombatEvent::MatchStart { .. })));

    // The same turn is still available.
    engine.select_action(1).unwrap();
    engine.select_target(0).unwrap();
    assert_eq!(engine.living_enemies()[0].1.current_health(), 45);
}

#[test]
fn potion_heals_and_regenerates_mana() {
    // One scripted special so the goblin opens with Sneak Attack (20).
    let mut engine = GameEngine::new("Hero", SequenceRng::new(&[0]));
    engine.select_action(1).unwrap();
    engine.select_target(0).unwrap();
    assert_eq!(engine.player().current_health(), 130);
    drain(&mut engine);

    engine.select_action(4).unwrap();
    let events = drain(&mut engine);
    assert!(events.iter().any(|e| matches!(
        e,
        CombatEvent::Healed {
            target: UnitId::Player,
            amount: 20,
            current_health: 150,
            ..
        }
    )));
    // Player mana never dipped, so the regen event is suppressed.
    assert!(!events
        .iter()
        .any(|e| matches!(e, CombatEvent::ManaRegenerated { source: UnitId::Player, .. })));
}

// ==========================================
// 6. WIRE SHAPE
// ==========================================

#[test]
fn events_serialize_tagged_camel_case() {
    let event = CombatEvent::DamageTaken {
        target: UnitId::Enemy(0),
        target_name: "Goblin Scavenger".to_string(),
        amount: 15,
        remaining_health: 45,
    };
    let value = serde_json::to_value(&event).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "type": "damageTaken",
            "payload": {
                "target": { "enemy": 0 },
                "targetName": "Goblin Scavenger",
                "amount": 15,
                "remainingHealth": 45,
            }
        })
    );

    let roundtrip: CombatEvent = serde_json::from_value(value).unwrap();
    assert_eq!(roundtrip, event);
}
