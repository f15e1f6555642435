//! Command-line runner.
//!
//! Generates a random roster, runs the battle for a fixed wall-clock
//! duration, and prints the survivors.
//!
//! ```bash
//! skirmish --entities 50 --duration-secs 30
//! RUST_LOG=skirmish_engine=debug skirmish --seed 7 --symmetric
//! ```

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use skirmish::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "skirmish")]
#[command(about = "Run a multi-threaded grid battle and report the survivors")]
#[command(version)]
struct Cli {
    /// Number of entities to spawn
    #[arg(short, long, default_value_t = 50)]
    entities: usize,

    /// Map width in cells
    #[arg(long, default_value_t = 100)]
    width: i32,

    /// Map height in cells
    #[arg(long, default_value_t = 100)]
    height: i32,

    /// Seed for the roster, movement, and dice streams
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// How long to run before shutting down
    #[arg(short, long, default_value_t = 30)]
    duration_secs: u64,

    /// Milliseconds between movement/detection ticks
    #[arg(long, default_value_t = 100)]
    tick_ms: u64,

    /// Milliseconds between status reports
    #[arg(long, default_value_t = 1000)]
    report_ms: u64,

    /// Also let the later entity of each pair attack the earlier one
    #[arg(long)]
    symmetric: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn world_config(&self) -> Result<WorldConfig, ConfigError> {
        let mut config = WorldConfig {
            width: self.width,
            height: self.height,
            seed: self.seed,
            tick_interval: Duration::from_millis(self.tick_ms),
            report_interval: Duration::from_millis(self.report_ms),
            run_duration: Duration::from_secs(self.duration_secs),
            detection: if self.symmetric {
                DetectionPolicy::SymmetricThreat
            } else {
                DetectionPolicy::LowerIndexAttacks
            },
            ..WorldConfig::default()
        };
        config.roster = seeded_roster(self.entities, config.bounds()?, &config.species, self.seed);
        Ok(config)
    }
}

fn run(cli: &Cli) -> Result<RunReport, Box<dyn std::error::Error>> {
    let config = cli.world_config()?;
    info!(
        entities = config.roster.len(),
        map = %config.bounds()?,
        seed = config.seed,
        "spawning"
    );
    let mut sim = Simulation::new(config, Arc::new(TracingSink))?;
    Ok(sim.start()?)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(report) => {
            let m = &report.shutdown.metrics;
            info!(
                alive = report.alive,
                dead = report.dead,
                ticks = m.ticks,
                battles = m.tasks_resolved,
                stale = m.stale_tasks,
                shutdown_ms = report.shutdown.total_ms,
                "battle over"
            );
            if report.shutdown.workers_panicked > 0 {
                error!(
                    panicked = report.shutdown.workers_panicked,
                    "worker threads panicked"
                );
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "simulation failed");
            ExitCode::FAILURE
        }
    }
}
