use serde::{Deserialize, Serialize};

use crate::state::{
    BLEED_DAMAGE_PER_TURN, FORGE_DAMAGE_PERCENT, LEVEL_UP_DMG_BONUS, LEVEL_UP_HP_BONUS,
    LEVEL_UP_MANA_BONUS,
};

/// Base combat statistics for a unit variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitStats {
    pub max_health: i32,
    pub max_mana: i32,
    pub damage: i32,
}

/// The five unit variants: one player archetype and four enemy archetypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UnitKind {
    Paladin,
    Goblin,
    Orc,
    Ghoul,
    Dragon,
}

impl UnitKind {
    /// Stats every fresh unit of this kind starts with.
    pub fn base_stats(&self) -> UnitStats {
        match self {
            UnitKind::Paladin => UnitStats {
                max_health: 150,
                max_mana: 20,
                damage: 15,
            },
            UnitKind::Goblin => UnitStats {
                max_health: 60,
                max_mana: 10,
                damage: 10,
            },
            UnitKind::Orc => UnitStats {
                max_health: 100,
                max_mana: 12,
                damage: 12,
            },
            UnitKind::Ghoul => UnitStats {
                max_health: 140,
                max_mana: 15,
                damage: 15,
            },
            UnitKind::Dragon => UnitStats {
                max_health: 200,
                max_mana: 20,
                damage: 20,
            },
        }
    }

    pub fn is_player(&self) -> bool {
        matches!(self, UnitKind::Paladin)
    }

    /// Epithet used when naming spawned enemies ("Orc the Sharp 2").
    pub fn enemy_title(&self) -> &'static str {
        match self {
            UnitKind::Paladin => "Paladin",
            UnitKind::Goblin => "Goblin the Sly",
            UnitKind::Orc => "Orc the Sharp",
            UnitKind::Ghoul => "Ghoul the Undead",
            UnitKind::Dragon => "Dragon the Might",
        }
    }
}

/// Outcome of a bleed tick, for event reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BleedTick {
    pub damage: i32,
    pub turns_left: i32,
    pub remaining_health: i32,
    pub defeated: bool,
}

/// A combatant: the player or one enemy roster slot.
///
/// Health and mana are clamped to `[0, max]` by every mutator; a unit is
/// alive exactly while its current health is above zero. Dead units ignore
/// damage, healing and regeneration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub name: String,
    pub kind: UnitKind,
    level: i32,
    max_health: i32,
    current_health: i32,
    max_mana: i32,
    current_mana: i32,
    /// Damage for the current match, forge bonuses included.
    damage: i32,
    /// Permanent damage, carried across matches.
    base_damage: i32,
    bleed_turns: i32,
}

impl Unit {
    pub fn new(kind: UnitKind, name: impl Into<String>) -> Self {
        let stats = kind.base_stats();
        Self {
            name: name.into(),
            kind,
            level: 1,
            max_health: stats.max_health,
            current_health: stats.max_health,
            max_mana: stats.max_mana,
            current_mana: stats.max_mana,
            damage: stats.damage,
            base_damage: stats.damage,
            bleed_turns: 0,
        }
    }

    /// The player-controlled paladin.
    pub fn player(name: impl Into<String>) -> Self {
        Self::new(UnitKind::Paladin, name)
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    pub fn current_health(&self) -> i32 {
        self.current_health
    }

    pub fn max_mana(&self) -> i32 {
        self.max_mana
    }

    pub fn current_mana(&self) -> i32 {
        self.current_mana
    }

    /// Damage dealt by a basic attack this match.
    pub fn damage(&self) -> i32 {
        self.damage
    }

    /// Permanent damage, before any forge bonus.
    pub fn base_damage(&self) -> i32 {
        self.base_damage
    }

    pub fn bleed_turns(&self) -> i32 {
        self.bleed_turns
    }

    pub fn is_alive(&self) -> bool {
        self.current_health > 0
    }

    pub fn is_bleeding(&self) -> bool {
        self.bleed_turns > 0
    }

    /// Subtract health, floored at zero. Returns true when this hit was the
    /// one that defeated the unit. Dead units take no further damage.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.current_health = (self.current_health - amount).max(0);
        !self.is_alive()
    }

    /// Add health, capped at max. Returns the amount actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        if !self.is_alive() {
            return 0;
        }
        let before = self.current_health;
        self.current_health = (self.current_health + amount).min(self.max_health);
        self.current_health - before
    }

    /// All-or-nothing mana spend: deducts and returns true only when the
    /// full amount is available.
    pub fn consume_mana(&mut self, amount: i32) -> bool {
        if self.current_mana >= amount {
            self.current_mana -= amount;
            true
        } else {
            false
        }
    }

    /// Add mana, capped at max. Returns the amount actually gained.
    pub fn regenerate_mana(&mut self, amount: i32) -> i32 {
        if !self.is_alive() {
            return 0;
        }
        let before = self.current_mana;
        self.current_mana = (self.current_mana + amount).min(self.max_mana);
        self.current_mana - before
    }

    /// Start (or restart) a bleed. Re-applying overwrites the remaining
    /// duration; bleeds never stack.
    pub fn apply_bleed(&mut self, turns: i32) {
        self.bleed_turns = turns;
    }

    /// Consume one bleed turn and take the fixed bleed damage. Returns
    /// `None` when the unit is not bleeding or not alive.
    pub fn tick_bleed(&mut self) -> Option<BleedTick> {
        if self.bleed_turns == 0 || !self.is_alive() {
            return None;
        }
        self.bleed_turns -= 1;
        let defeated = self.take_damage(BLEED_DAMAGE_PER_TURN);
        Some(BleedTick {
            damage: BLEED_DAMAGE_PER_TURN,
            turns_left: self.bleed_turns,
            remaining_health: self.current_health,
            defeated,
        })
    }

    pub fn clear_status_effects(&mut self) {
        self.bleed_turns = 0;
    }

    /// Sharpen the blade: +25% of current damage for the rest of the match.
    /// Stacks multiplicatively with earlier forges. Returns the bonus.
    pub fn forge_weapon(&mut self) -> i32 {
        let bonus = self.damage * FORGE_DAMAGE_PERCENT / 100;
        self.damage += bonus;
        bonus
    }

    /// Level up between matches: permanent stat growth plus a full restore.
    /// Any forge bonus is discarded along with the old match damage.
    pub fn gain_level(&mut self) {
        self.level += 1;
        self.max_health += LEVEL_UP_HP_BONUS;
        self.max_mana += LEVEL_UP_MANA_BONUS;
        self.base_damage += LEVEL_UP_DMG_BONUS;
        self.current_health = self.max_health;
        self.current_mana = self.max_mana;
        self.damage = self.base_damage;
    }

    /// Return the unit to baseline after a match: forge bonuses and status
    /// effects are gone, health and mana are kept as-is.
    pub fn reset_battle_stats(&mut self) {
        self.damage = self.base_damage;
        self.clear_status_effects();
    }
}
