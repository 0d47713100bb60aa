//! Encounter generation: the weighted spawn table.

use serde::{Deserialize, Serialize};

use crate::rng::CombatRng;
use crate::state::{
    DRAGON_SPAWN_CHANCE, GHOUL_SPAWN_CHANCE, MAX_ENEMIES_PER_MATCH, ORC_SPAWN_CHANCE,
};
use crate::types::{Unit, UnitKind};

/// The enemy roster for one match. Generated fresh each match and discarded
/// when the match ends; defeated enemies are removed during cleanup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Encounter {
    pub units: Vec<Unit>,
}

impl Encounter {
    /// Roster slots that still hold a living enemy, in roster order.
    pub fn living_slots(&self) -> Vec<usize> {
        self.units
            .iter()
            .enumerate()
            .filter(|(_, u)| u.is_alive())
            .map(|(slot, _)| slot)
            .collect()
    }

    pub fn any_alive(&self) -> bool {
        self.units.iter().any(Unit::is_alive)
    }

    /// Drop defeated enemies from the roster.
    pub fn remove_defeated(&mut self) {
        self.units.retain(Unit::is_alive);
    }
}

/// Map a percentile roll onto an enemy kind.
///
/// The bands are cumulative and checked strongest-first in a fixed order.
pub fn classify_spawn_roll(roll: u32) -> UnitKind {
    if roll <= DRAGON_SPAWN_CHANCE {
        UnitKind::Dragon
    } else if roll <= GHOUL_SPAWN_CHANCE {
        UnitKind::Ghoul
    } else if roll <= ORC_SPAWN_CHANCE {
        UnitKind::Orc
    } else {
        UnitKind::Goblin
    }
}

/// Build the enemy roster for a match.
///
/// Match 1 is always a single weak goblin regardless of RNG state. Later
/// matches draw 1-3 enemies, each rolled independently on the spawn table,
/// with a per-slot index in the name to tell duplicates apart.
pub fn generate_encounter<R: CombatRng>(match_index: u32, rng: &mut R) -> Encounter {
    if match_index <= 1 {
        return Encounter {
            units: vec![Unit::new(UnitKind::Goblin, "Goblin Scavenger")],
        };
    }

    let count = rng.gen_range(MAX_ENEMIES_PER_MATCH) + 1;
    let mut units = Vec::with_capacity(count as usize);
    for slot in 0..count {
        let kind = classify_spawn_roll(rng.percent_roll());
        units.push(Unit::new(
            kind,
            format!("{} {}", kind.enemy_title(), slot + 1),
        ));
    }
    Encounter { units }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_bands_classify_in_fixed_order() {
        assert_eq!(classify_spawn_roll(1), UnitKind::Dragon);
        assert_eq!(classify_spawn_roll(5), UnitKind::Dragon);
        assert_eq!(classify_spawn_roll(6), UnitKind::Ghoul);
        assert_eq!(classify_spawn_roll(25), UnitKind::Ghoul);
        assert_eq!(classify_spawn_roll(26), UnitKind::Orc);
        assert_eq!(classify_spawn_roll(55), UnitKind::Orc);
        assert_eq!(classify_spawn_roll(56), UnitKind::Goblin);
        assert_eq!(classify_spawn_roll(100), UnitKind::Goblin);
    }

    #[test]
    fn later_matches_spawn_one_to_three_enemies() {
        for seed in 0..200u64 {
            let mut rng = crate::rng::XorShiftRng::seed_from_u64(seed);
            let encounter = generate_encounter(2, &mut rng);
            assert!((1..=3).contains(&encounter.units.len()));
        }
    }

    #[test]
    fn duplicate_spawns_get_distinct_names() {
        // Count of 3, all rolls land in the goblin band (roll 99 => value 98).
        let mut rng = crate::tests::SequenceRng::new(&[2, 98, 98, 98]);
        let encounter = generate_encounter(2, &mut rng);
        let names: Vec<&str> = encounter.units.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Goblin the Sly 1", "Goblin the Sly 2", "Goblin the Sly 3"]
        );
    }
}
