use serde::{Deserialize, Serialize};

use crate::events::SessionOutcome;
use crate::spawn::Encounter;
use crate::types::Unit;

/// Damage a bleeding unit takes at the start of each round.
pub const BLEED_DAMAGE_PER_TURN: i32 = 10;
/// Mana cost of every special ability, player and enemy alike.
pub const ABILITY_MANA_COST: i32 = 10;
/// Mana restored after a basic attack, forge or potion.
pub const MANA_REGEN_PER_TURN: i32 = 5;
/// Health restored by the player's potion action.
pub const POTION_HEAL_AMOUNT: i32 = 25;
/// Forge bonus as a percentage of the player's current damage.
pub const FORGE_DAMAGE_PERCENT: i32 = 25;
/// Max health gained per level.
pub const LEVEL_UP_HP_BONUS: i32 = 20;
/// Permanent damage gained per level.
pub const LEVEL_UP_DMG_BONUS: i32 = 3;
/// Max mana gained per level.
pub const LEVEL_UP_MANA_BONUS: i32 = 5;
/// Enemies attempt their special ability once every N turns on average.
pub const ENEMY_SPECIAL_CHANCE: u32 = 3;
/// Largest roster a single match can spawn.
pub const MAX_ENEMIES_PER_MATCH: u32 = 3;
/// Percentile spawn bands, checked strongest-first.
pub const DRAGON_SPAWN_CHANCE: u32 = 5;
pub const GHOUL_SPAWN_CHANCE: u32 = 25;
pub const ORC_SPAWN_CHANCE: u32 = 55;

/// Player actions that need a target before they can resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TargetedAction {
    Attack,
    Special,
}

/// What the engine is waiting on from the front end.
///
/// The automatic phases (status ticks, cleanup, the enemy phase) run inside
/// the command handlers; only states that need input are representable here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SessionPhase {
    /// Start-of-round upkeep has run; waiting for an action choice.
    AwaitingAction,
    /// An attack or special was chosen; waiting for a target slot.
    #[serde(rename_all = "camelCase")]
    AwaitingTarget { action: TargetedAction },
    /// The match was won; waiting for the continue decision.
    AwaitingContinue,
    /// The session is over, by defeat or retirement.
    #[serde(rename_all = "camelCase")]
    GameOver { outcome: SessionOutcome },
}

/// The complete session state: one player, one encounter, one match counter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// The player unit, persistent across matches.
    pub player: Unit,
    /// Enemy roster for the current match, regenerated every match.
    pub encounter: Encounter,
    /// Current match number (1-indexed).
    pub match_index: u32,
    /// Current round within the match (1-indexed).
    pub round: u32,
    /// Current phase of the session.
    pub phase: SessionPhase,
}

impl GameState {
    pub fn new(player: Unit, encounter: Encounter) -> Self {
        Self {
            player,
            encounter,
            match_index: 1,
            round: 0,
            phase: SessionPhase::AwaitingAction,
        }
    }
}
