//! View types for front-end rendering.
//!
//! Projections of engine state with everything a status display needs and
//! nothing it could use to cheat.

use serde::{Deserialize, Serialize};

use crate::state::{GameState, SessionPhase};
use crate::types::Unit;

/// Render-ready snapshot of one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitView {
    pub name: String,
    pub level: i32,
    pub current_health: i32,
    pub max_health: i32,
    pub current_mana: i32,
    pub max_mana: i32,
    pub damage: i32,
    pub alive: bool,
    pub bleeding: bool,
}

impl From<&Unit> for UnitView {
    fn from(unit: &Unit) -> Self {
        Self {
            name: unit.name.clone(),
            level: unit.level(),
            current_health: unit.current_health(),
            max_health: unit.max_health(),
            current_mana: unit.current_mana(),
            max_mana: unit.max_mana(),
            damage: unit.damage(),
            alive: unit.is_alive(),
            bleeding: unit.is_bleeding(),
        }
    }
}

/// The complete session view.
///
/// `enemies` lists living enemies only, in roster order; an enemy's
/// position here is the target index the engine expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameView {
    pub player: UnitView,
    pub enemies: Vec<UnitView>,
    pub match_index: u32,
    pub round: u32,
    pub phase: SessionPhase,
}

impl GameView {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            player: UnitView::from(&state.player),
            enemies: state
                .encounter
                .units
                .iter()
                .filter(|u| u.is_alive())
                .map(UnitView::from)
                .collect(),
            match_index: state.match_index,
            round: state.round,
            phase: state.phase,
        }
    }
}
