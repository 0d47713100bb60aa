//! Observable events emitted during a session.
//!
//! Every state change the front end might want to render is reported as a
//! [`CombatEvent`]. Events accumulate inside the engine and are drained by
//! the presentation layer; the core never formats or prints anything.

use serde::{Deserialize, Serialize};

/// Addresses a unit within the current match. Enemy slots index the roster
/// as it was when the event fired; cleanup does not rewrite past events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UnitId {
    Player,
    Enemy(usize),
}

/// How a match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchResult {
    Won,
    Lost,
}

/// How the session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionOutcome {
    /// The player declined to continue after a won match.
    Retired,
    /// The player unit was defeated.
    Defeated,
}

/// Events generated during play, in the order they happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum CombatEvent {
    #[serde(rename_all = "camelCase")]
    MatchStart { match_index: u32, enemy_count: usize },
    #[serde(rename_all = "camelCase")]
    Attack {
        attacker: UnitId,
        attacker_name: String,
        target: UnitId,
        target_name: String,
    },
    #[serde(rename_all = "camelCase")]
    AbilityUsed {
        source: UnitId,
        source_name: String,
        ability: String,
        target: UnitId,
        target_name: String,
    },
    #[serde(rename_all = "camelCase")]
    DamageTaken {
        target: UnitId,
        target_name: String,
        amount: i32,
        remaining_health: i32,
    },
    #[serde(rename_all = "camelCase")]
    Healed {
        target: UnitId,
        target_name: String,
        amount: i32,
        current_health: i32,
    },
    #[serde(rename_all = "camelCase")]
    ManaSpent {
        source: UnitId,
        source_name: String,
        amount: i32,
        remaining_mana: i32,
    },
    #[serde(rename_all = "camelCase")]
    ManaRegenerated {
        source: UnitId,
        source_name: String,
        amount: i32,
        current_mana: i32,
    },
    #[serde(rename_all = "camelCase")]
    BleedApplied {
        target: UnitId,
        target_name: String,
        turns: i32,
    },
    #[serde(rename_all = "camelCase")]
    BleedTicked {
        target: UnitId,
        target_name: String,
        damage: i32,
        turns_left: i32,
        remaining_health: i32,
    },
    #[serde(rename_all = "camelCase")]
    UnitDefeated { target: UnitId, target_name: String },
    #[serde(rename_all = "camelCase")]
    WeaponForged { bonus: i32, total_damage: i32 },
    #[serde(rename_all = "camelCase")]
    LevelGained {
        level: i32,
        max_health: i32,
        max_mana: i32,
        base_damage: i32,
    },
    #[serde(rename_all = "camelCase")]
    MatchEnd {
        match_index: u32,
        result: MatchResult,
    },
    #[serde(rename_all = "camelCase")]
    SessionEnded { outcome: SessionOutcome },
}
