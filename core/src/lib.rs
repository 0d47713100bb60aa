//! Gauntlet core: a turn-based wave-combat rules engine.
//!
//! The engine owns the player unit, the current enemy roster and the match
//! loop. It exposes a small command surface (`select_action`,
//! `select_target`, `confirm_continue`) and reports everything that happens
//! as [`CombatEvent`]s, so any front end can render a match without touching
//! combat logic.

mod abilities;
mod battle;
mod engine;
mod error;
mod events;
mod rng;
mod spawn;
mod state;
mod types;
mod view;

#[cfg(test)]
mod tests;

pub use abilities::{Ability, AbilityEffect};
pub use engine::GameEngine;
pub use error::{GameError, GameResult};
pub use events::{CombatEvent, MatchResult, SessionOutcome, UnitId};
pub use rng::{CombatRng, XorShiftRng};
pub use spawn::{generate_encounter, Encounter};
pub use state::*;
pub use types::{BleedTick, Unit, UnitKind, UnitStats};
pub use view::{GameView, UnitView};
