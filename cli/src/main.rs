//! Line-based terminal front end.
//!
//! All game logic lives in `gauntlet-core`; this binary only renders
//! drained events, shows menus and forwards raw input to the engine.

mod display;

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use clap::Parser;
use gauntlet_core::{CombatRng, GameEngine, SessionPhase, XorShiftRng};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "gauntlet", about = "Turn-based wave-combat simulator")]
struct Args {
    /// Player name; prompted for when omitted.
    #[arg(long)]
    name: Option<String>,

    /// Seed for a reproducible session.
    #[arg(long)]
    seed: Option<u64>,

    /// Pause between rendered events, in milliseconds.
    #[arg(long, default_value_t = 0)]
    delay_ms: u64,

    /// Echo every engine event as JSON on stderr.
    #[arg(long)]
    dump_events: bool,
}

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    display::banner();

    let name = match args.name.clone() {
        Some(name) => name,
        None => prompt_name()?,
    };

    match args.seed {
        Some(seed) => run(GameEngine::new(name, XorShiftRng::seed_from_u64(seed)), &args),
        None => run(GameEngine::new(name, StdRng::from_entropy()), &args),
    }
}

fn run<R: CombatRng>(mut engine: GameEngine<R>, args: &Args) -> io::Result<()> {
    loop {
        render(&mut engine, args);

        match engine.phase() {
            SessionPhase::AwaitingAction => {
                let view = engine.view();
                display::match_status(&view);
                display::action_menu(&view);
                let Some(line) = read_line()? else {
                    return Ok(());
                };
                let choice = line.trim().parse::<u8>().unwrap_or(0);
                if let Err(err) = engine.select_action(choice) {
                    display::error(&err);
                }
            }
            SessionPhase::AwaitingTarget { .. } => {
                display::target_menu(&engine.view());
                let Some(line) = read_line()? else {
                    return Ok(());
                };
                // The menu is 1-based; anything unparsable maps out of range.
                let index = line.trim().parse::<usize>().unwrap_or(0);
                if let Err(err) = engine.select_target(index.wrapping_sub(1)) {
                    display::error(&err);
                }
            }
            SessionPhase::AwaitingContinue => {
                display::continue_menu();
                let Some(line) = read_line()? else {
                    return Ok(());
                };
                let _ = engine.confirm_continue(line.trim() == "1");
            }
            SessionPhase::GameOver { outcome } => {
                display::epilogue(outcome);
                return Ok(());
            }
        }
    }
}

fn render<R: CombatRng>(engine: &mut GameEngine<R>, args: &Args) {
    for event in engine.drain_events() {
        if args.dump_events {
            if let Ok(json) = serde_json::to_string(&event) {
                eprintln!("{json}");
            }
        }
        display::event(&event);
        if args.delay_ms > 0 {
            thread::sleep(Duration::from_millis(args.delay_ms));
        }
    }
}

fn prompt_name() -> io::Result<String> {
    print!("\nInput your username\n>> ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let name = line.trim();
    Ok(if name.is_empty() {
        "Hero".to_string()
    } else {
        name.to_string()
    })
}

/// Read one input line; `None` means stdin was closed.
fn read_line() -> io::Result<Option<String>> {
    print!(">> ");
    io::stdout().flush()?;
    let mut line = String::new();
    let bytes = io::stdin().lock().read_line(&mut line)?;
    if bytes == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}
