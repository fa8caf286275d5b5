//! Frogger Sim entry point
//!
//! Headless runner: drives the reducer from a tick clock merged with either
//! a key-press script or the seeded autopilot, and reports the outcome.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use frogger_sim::session::{Autopilot, TickClock};
use frogger_sim::sim::GameEvent;
use frogger_sim::{EventSource, Session, Tuning};

#[derive(Parser)]
#[command(name = "frogger-sim")]
#[command(about = "Run the Frogger game-state engine headless")]
struct Args {
    /// Number of ticks to simulate
    #[arg(long, default_value_t = 3000)]
    ticks: u64,

    /// Autopilot seed
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Ticks between autopilot jumps
    #[arg(long, default_value_t = 12)]
    jump_interval: u64,

    /// JSON list of scheduled key presses (disables the autopilot)
    #[arg(long)]
    script: Option<PathBuf>,

    /// JSON tuning overrides
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Print the final state and run summary as JSON
    #[arg(long)]
    snapshot: bool,

    /// Print a HUD line every N ticks (0 disables)
    #[arg(long, default_value_t = 0)]
    hud_every: u64,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    log::info!("Frogger Sim starting...");

    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("failed to load tuning from {}", path.display()))?,
        None => Tuning::default(),
    };

    let mut source: Box<dyn EventSource> = match &args.script {
        Some(path) => Box::new(
            TickClock::load(args.ticks, path)
                .with_context(|| format!("failed to load script from {}", path.display()))?,
        ),
        None => {
            log::info!("Autopilot with seed: {}", args.seed);
            Box::new(Autopilot::new(args.seed, args.ticks, args.jump_interval))
        }
    };

    let mut session = Session::new(tuning).context("invalid tuning")?;
    let hud_every = args.hud_every;
    let summary = session.run(source.as_mut(), |event, state| {
        if let GameEvent::Tick { elapsed } = event {
            if hud_every > 0 && elapsed % hud_every == 0 {
                println!(
                    "tick {:>6}  lives {}  score {:>4}  high {:>4}  speed {:.1}{}",
                    elapsed,
                    state.lives,
                    state.current_score,
                    state.high_score,
                    state.difficulty,
                    if state.game_over { "  GAME OVER" } else { "" }
                );
            }
        }
    });

    if args.snapshot {
        let json = serde_json::to_string_pretty(&serde_json::json!({
            "state": session.state(),
            "summary": summary,
        }))
        .context("failed to serialize snapshot")?;
        println!("{json}");
        return Ok(());
    }

    println!(
        "{} ticks, {} events: score {}, high score {}, lives {}, difficulty {:.1}{}",
        summary.ticks,
        summary.events,
        summary.final_score,
        summary.high_score,
        summary.lives,
        summary.difficulty,
        if summary.game_over { " (game over)" } else { "" }
    );
    Ok(())
}
