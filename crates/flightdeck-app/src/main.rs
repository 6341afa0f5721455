//! Headless FLIGHTDECK runner.
//!
//! Loads a scenario, runs it for a fixed amount of simulated time and prints
//! a summary of pilot activity.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use flightdeck_app::game_loop::{spawn_game_loop, LoopOptions, RunSummary};
use flightdeck_core::enums::ScenarioId;
use flightdeck_core::error::Result;
use flightdeck_sim::{SimConfig, SimulationEngine};

/// Run autonomous ship pilots in a built-in scenario
#[derive(Parser, Debug)]
#[command(name = "flightdeck")]
#[command(about = "Run autonomous ship pilots in a headless simulation")]
struct Args {
    /// Scenario: skirmish, trade-route or ambush
    #[arg(long, default_value_t = ScenarioId::Skirmish)]
    scenario: ScenarioId,

    /// Simulated seconds to run
    #[arg(long, default_value_t = 60.0)]
    seconds: f64,

    /// TOML config file (seed, frame_rate and a [pilot] table)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed, overrides the config file
    #[arg(long)]
    seed: Option<u64>,

    /// Pace frames to wall-clock time
    #[arg(long)]
    realtime: bool,

    /// Wall-clock speed multiplier when pacing
    #[arg(long, default_value_t = 1.0)]
    time_scale: f64,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flightdeck=info".into()),
        )
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(summary) => {
            print_summary(&args, &summary);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<RunSummary> {
    let mut config = match &args.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    tracing::info!(scenario = %args.scenario, seed = config.seed, "starting");
    let engine = SimulationEngine::with_scenario(config, args.scenario);
    let options = LoopOptions {
        duration_secs: args.seconds,
        realtime: args.realtime,
        time_scale: args.time_scale,
    };

    let (_cmd_tx, handle) = spawn_game_loop(engine, options)?;
    handle.join().map_err(|_| {
        flightdeck_core::error::FlightdeckError::Io(std::io::Error::other("game loop panicked"))
    })
}

fn print_summary(args: &Args, summary: &RunSummary) {
    if args.json {
        match serde_json::to_string_pretty(summary) {
            Ok(json) => println!("{json}"),
            Err(e) => tracing::error!("failed to encode summary: {e}"),
        }
        return;
    }

    println!(
        "{}: {} frames, {:.1}s simulated, {} shots fired",
        args.scenario, summary.frames, summary.elapsed_secs, summary.shots_fired
    );
    for (name, count) in &summary.events {
        println!("  {name:<20} {count}");
    }
}
