//! All terminal rendering: status displays, menus, colored event lines.

use crossterm::style::Stylize;
use gauntlet_core::{
    CombatEvent, GameError, GameView, MatchResult, SessionOutcome, UnitView, ABILITY_MANA_COST,
    POTION_HEAL_AMOUNT,
};

const BAR_LENGTH: i32 = 20;
const HIGH_HEALTH_PERCENT: i32 = 70;
const MID_HEALTH_PERCENT: i32 = 36;

pub fn banner() {
    println!("==============================================");
    println!("              GAUNTLET COMBAT SIM             ");
    println!("==============================================");
}

fn health_bar(current: i32, max: i32) -> String {
    let filled = ((current * BAR_LENGTH + max / 2) / max.max(1)).clamp(0, BAR_LENGTH);
    format!(
        "[{}{}]",
        "#".repeat(filled as usize),
        "-".repeat((BAR_LENGTH - filled) as usize)
    )
}

fn health_line(unit: &UnitView, index: Option<usize>) {
    let percent = unit.current_health * 100 / unit.max_health.max(1);
    let prefix = match index {
        Some(i) => format!("[{i}] "),
        None => String::new(),
    };
    let entry = format!(
        "{prefix}{}: {} ({}/{})",
        unit.name,
        health_bar(unit.current_health, unit.max_health),
        unit.current_health,
        unit.max_health
    );
    let colored = if percent >= HIGH_HEALTH_PERCENT {
        entry.green()
    } else if percent >= MID_HEALTH_PERCENT {
        entry.yellow()
    } else {
        entry.red()
    };
    let mana = format!("[MP: {}/{}]", unit.current_mana, unit.max_mana);
    println!("{colored} {}", mana.cyan());
}

pub fn match_status(view: &GameView) {
    println!("\n----- MATCH STATUS ----------------------------");
    print!("(Level {}) ", view.player.level);
    health_line(&view.player, None);
    println!("----- ENEMIES ---------------------------------");
    for (i, enemy) in view.enemies.iter().enumerate() {
        health_line(enemy, Some(i + 1));
    }
    println!("-----------------------------------------------");
}

pub fn action_menu(view: &GameView) {
    println!("\n----- YOUR TURN -----");
    println!("Choose action:");
    println!("1: Standard Attack [Deals {} dmg]", view.player.damage);
    println!(
        "2: Holy Smite (Special) [Cost: {} MP | Deals {} dmg]",
        ABILITY_MANA_COST,
        view.player.damage * 2
    );
    println!("3: Forge Weapon [Adds 25% extra dmg]");
    println!("4: Drink Potion [Heals {POTION_HEAL_AMOUNT} HP]");
}

pub fn target_menu(view: &GameView) {
    println!("\nSelect your target:");
    println!("---------------------------------");
    for (i, enemy) in view.enemies.iter().enumerate() {
        health_line(enemy, Some(i + 1));
    }
    println!("---------------------------------");
}

pub fn continue_menu() {
    println!("\n==============================================");
    println!("              PREPARE FOR BATTLE              ");
    println!("==============================================");
    println!("1: Find a new match!");
    println!("2: Exit Game");
}

pub fn error(err: &GameError) {
    println!("{}", format!("\n{err}").red());
}

pub fn epilogue(outcome: SessionOutcome) {
    println!("\n==============================================");
    match outcome {
        SessionOutcome::Retired => {
            println!("{}", "        YOU HAVE RETIRED FROM COMBAT          ".green())
        }
        SessionOutcome::Defeated => {
            println!("{}", "             DEFEAT! GAME OVER.               ".red())
        }
    }
    println!("==============================================");
}

pub fn event(event: &CombatEvent) {
    match event {
        CombatEvent::MatchStart {
            match_index,
            enemy_count,
        } => {
            println!("\n====== MATCH {match_index} START ======");
            if *enemy_count == 1 {
                println!("An enemy approaches!");
            } else {
                println!("A group of {enemy_count} enemies approaches!");
            }
        }
        CombatEvent::Attack {
            attacker_name,
            target_name,
            ..
        } => println!("\n{attacker_name} attacks {target_name}!"),
        CombatEvent::AbilityUsed {
            source_name,
            ability,
            target_name,
            ..
        } => println!(
            "{}",
            format!("{source_name} uses {ability} on {target_name}!").cyan()
        ),
        CombatEvent::DamageTaken {
            target_name,
            amount,
            remaining_health,
            ..
        } => println!("{target_name} takes {amount} damage! Remaining Health: {remaining_health}"),
        CombatEvent::Healed {
            target_name,
            amount,
            ..
        } => println!("{}", format!("{target_name} heals for {amount} HP.").green()),
        CombatEvent::ManaSpent {
            source_name,
            amount,
            ..
        } => println!("{}", format!("! [{source_name} uses {amount} Mana]").cyan()),
        CombatEvent::ManaRegenerated {
            source_name,
            amount,
            current_mana,
            ..
        } => println!(
            "{}",
            format!("   + {source_name} regenerates {amount} Mana. (Total: {current_mana})").blue()
        ),
        CombatEvent::BleedApplied {
            target_name, turns, ..
        } => println!(
            "{}",
            format!("{target_name} is bleeding! Takes damage for the next {turns} turns.")
                .dark_red()
        ),
        CombatEvent::BleedTicked {
            target_name,
            damage,
            ..
        } => println!(
            "{}",
            format!("[BLEED] {target_name} loses blood! (-{damage} HP)").dark_red()
        ),
        CombatEvent::UnitDefeated { target_name, .. } => println!(
            "{}",
            format!("\n*** {target_name} has been defeated! ***").red()
        ),
        CombatEvent::WeaponForged {
            bonus,
            total_damage,
        } => println!(
            "{}",
            format!("You sharpen your blade! Damage +{bonus} for this match (now {total_damage}).")
                .cyan()
        ),
        CombatEvent::LevelGained {
            level,
            max_health,
            max_mana,
            base_damage,
        } => {
            println!("{}", format!("\n*** LEVEL UP! Reached Level {level}! ***").green());
            println!(
                "{}",
                format!("Max HP {max_health}, Max Mana {max_mana}, Base Dmg {base_damage}.")
                    .green()
            );
        }
        CombatEvent::MatchEnd { result, .. } => {
            if *result == MatchResult::Won {
                println!("\n==============================================");
                println!("                MATCH COMPLETE                ");
                println!("==============================================");
            }
        }
        // The game-over epilogue renders from the terminal phase instead.
        CombatEvent::SessionEnded { .. } => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_bar_fills_proportionally() {
        assert_eq!(health_bar(150, 150), format!("[{}]", "#".repeat(20)));
        assert_eq!(health_bar(0, 150), format!("[{}]", "-".repeat(20)));
        assert_eq!(health_bar(75, 150), format!("[{}{}]", "#".repeat(10), "-".repeat(10)));
    }
}
