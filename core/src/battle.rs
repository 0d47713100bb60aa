//! Combat resolution primitives shared by the player and enemy phases.
//!
//! These functions mutate units directly and append to the event log; the
//! phase machine in [`crate::engine`] decides when each one runs.

use crate::abilities::AbilityEffect;
use crate::events::{CombatEvent, UnitId};
use crate::rng::CombatRng;
use crate::state::{ABILITY_MANA_COST, ENEMY_SPECIAL_CHANCE, MANA_REGEN_PER_TURN};
use crate::types::Unit;

/// Apply raw damage to a living target, reporting the hit and any defeat.
/// Damage against an already-dead unit is dropped silently.
pub(crate) fn deal_damage(
    target: &mut Unit,
    target_id: UnitId,
    amount: i32,
    events: &mut Vec<CombatEvent>,
) {
    if !target.is_alive() {
        return;
    }
    let defeated = target.take_damage(amount);
    events.push(CombatEvent::DamageTaken {
        target: target_id,
        target_name: target.name.clone(),
        amount,
        remaining_health: target.current_health(),
    });
    if defeated {
        events.push(CombatEvent::UnitDefeated {
            target: target_id,
            target_name: target.name.clone(),
        });
    }
}

/// A plain weapon swing for the attacker's current damage.
pub(crate) fn basic_attack(
    attacker: &Unit,
    attacker_id: UnitId,
    target: &mut Unit,
    target_id: UnitId,
    events: &mut Vec<CombatEvent>,
) {
    events.push(CombatEvent::Attack {
        attacker: attacker_id,
        attacker_name: attacker.name.clone(),
        target: target_id,
        target_name: target.name.clone(),
    });
    deal_damage(target, target_id, attacker.damage(), events);
}

/// Resolve the attacker's special ability against the target. Mana must
/// already have been paid by the caller.
pub(crate) fn use_special(
    attacker: &mut Unit,
    attacker_id: UnitId,
    target: &mut Unit,
    target_id: UnitId,
    events: &mut Vec<CombatEvent>,
) {
    let ability = attacker.kind.ability();
    events.push(CombatEvent::AbilityUsed {
        source: attacker_id,
        source_name: attacker.name.clone(),
        ability: ability.name.to_string(),
        target: target_id,
        target_name: target.name.clone(),
    });

    match ability.effect {
        AbilityEffect::Damage { multiplier } => {
            deal_damage(target, target_id, attacker.damage() * multiplier, events);
        }
        AbilityEffect::BonusDamage { bonus } => {
            deal_damage(target, target_id, attacker.damage() + bonus, events);
        }
        AbilityEffect::RecoilDamage { multiplier, recoil } => {
            deal_damage(target, target_id, attacker.damage() * multiplier, events);
            deal_damage(attacker, attacker_id, recoil, events);
        }
        AbilityEffect::BleedDamage { turns } => {
            deal_damage(target, target_id, attacker.damage(), events);
            if target.is_alive() {
                target.apply_bleed(turns);
                events.push(CombatEvent::BleedApplied {
                    target: target_id,
                    target_name: target.name.clone(),
                    turns,
                });
            }
        }
        AbilityEffect::DamageAndSelfHeal { multiplier, heal } => {
            deal_damage(target, target_id, attacker.damage() * multiplier, events);
            let healed = attacker.heal(heal);
            if healed > 0 {
                events.push(CombatEvent::Healed {
                    target: attacker_id,
                    target_name: attacker.name.clone(),
                    amount: healed,
                    current_health: attacker.current_health(),
                });
            }
        }
    }
}

/// End-of-action mana regeneration. Informational: the event is only
/// emitted when some mana was actually gained.
pub(crate) fn regen_mana(unit: &mut Unit, id: UnitId, events: &mut Vec<CombatEvent>) {
    let gained = unit.regenerate_mana(MANA_REGEN_PER_TURN);
    if gained > 0 {
        events.push(CombatEvent::ManaRegenerated {
            source: id,
            source_name: unit.name.clone(),
            amount: gained,
            current_mana: unit.current_mana(),
        });
    }
}

/// Tick one unit's bleed, if any.
pub(crate) fn tick_bleed(unit: &mut Unit, id: UnitId, events: &mut Vec<CombatEvent>) {
    if let Some(tick) = unit.tick_bleed() {
        events.push(CombatEvent::BleedTicked {
            target: id,
            target_name: unit.name.clone(),
            damage: tick.damage,
            turns_left: tick.turns_left,
            remaining_health: tick.remaining_health,
        });
        if tick.defeated {
            events.push(CombatEvent::UnitDefeated {
                target: id,
                target_name: unit.name.clone(),
            });
        }
    }
}

/// Start-of-round status ticks: the player's bleed first, then each living
/// enemy's. Stops early if the player bleeds out.
pub(crate) fn status_phase(player: &mut Unit, enemies: &mut [Unit], events: &mut Vec<CombatEvent>) {
    tick_bleed(player, UnitId::Player, events);
    if !player.is_alive() {
        return;
    }
    for (slot, enemy) in enemies.iter_mut().enumerate() {
        tick_bleed(enemy, UnitId::Enemy(slot), events);
    }
}

/// The enemy phase: each living enemy, in roster order, rolls a 1-in-3
/// chance to attempt its special ability. The special also needs the fixed
/// mana cost; a failed roll or an empty mana pool means a basic attack
/// followed by mana regeneration. Aborts as soon as the player dies.
pub(crate) fn enemy_phase<R: CombatRng>(
    player: &mut Unit,
    enemies: &mut [Unit],
    rng: &mut R,
    events: &mut Vec<CombatEvent>,
) {
    for slot in 0..enemies.len() {
        if !player.is_alive() {
            return;
        }
        if !enemies[slot].is_alive() {
            continue;
        }

        let enemy_id = UnitId::Enemy(slot);
        let wants_special = rng.one_in(ENEMY_SPECIAL_CHANCE);
        let enemy = &mut enemies[slot];

        if wants_special && enemy.consume_mana(ABILITY_MANA_COST) {
            events.push(CombatEvent::ManaSpent {
                source: enemy_id,
                source_name: enemy.name.clone(),
                amount: ABILITY_MANA_COST,
                remaining_mana: enemy.current_mana(),
            });
            use_special(enemy, enemy_id, player, UnitId::Player, events);
        } else {
            basic_attack(enemy, enemy_id, player, UnitId::Player, events);
            regen_mana(enemy, enemy_id, events);
        }
    }
}
