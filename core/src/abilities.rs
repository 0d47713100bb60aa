//! Special-ability formulas, one per unit variant.
//!
//! Abilities are plain data: every formula is a pure function of the
//! attacker's current damage, applied by the combat resolver in
//! [`crate::battle`]. No virtual dispatch, no per-unit state.

use serde::{Deserialize, Serialize};

use crate::types::UnitKind;

/// What a special ability does when it lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AbilityEffect {
    /// Multiplied damage to the target.
    #[serde(rename_all = "camelCase")]
    Damage { multiplier: i32 },
    /// Base damage plus a flat bonus.
    #[serde(rename_all = "camelCase")]
    BonusDamage { bonus: i32 },
    /// Multiplied damage to the target, then recoil damage to the attacker.
    #[serde(rename_all = "camelCase")]
    RecoilDamage { multiplier: i32, recoil: i32 },
    /// Base damage, then a bleed on the target.
    #[serde(rename_all = "camelCase")]
    BleedDamage { turns: i32 },
    /// Multiplied damage to the target, then a self-heal.
    #[serde(rename_all = "camelCase")]
    DamageAndSelfHeal { multiplier: i32, heal: i32 },
}

/// A named special ability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ability {
    pub name: &'static str,
    pub effect: AbilityEffect,
}

impl UnitKind {
    /// The one special ability of this variant.
    pub fn ability(&self) -> Ability {
        match self {
            UnitKind::Paladin => Ability {
                name: "Holy Smite",
                effect: AbilityEffect::DamageAndSelfHeal {
                    multiplier: 2,
                    heal: 10,
                },
            },
            UnitKind::Goblin => Ability {
                name: "Sneak Attack",
                effect: AbilityEffect::BonusDamage { bonus: 10 },
            },
            UnitKind::Orc => Ability {
                name: "Berserk",
                effect: AbilityEffect::RecoilDamage {
                    multiplier: 3,
                    recoil: 5,
                },
            },
            UnitKind::Ghoul => Ability {
                name: "Feral Sweep",
                effect: AbilityEffect::BleedDamage { turns: 3 },
            },
            UnitKind::Dragon => Ability {
                name: "Dragon's Wrath",
                effect: AbilityEffect::Damage { multiplier: 3 },
            },
        }
    }
}
