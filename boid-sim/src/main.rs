use anyhow::{Context, Result};
use boid_sim::config::settings_of;
use boid_sim::{SimConfig, Simulation};
use clap::Parser;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless boid flock simulation", long_about = None)]
struct Args {
    /// Scenario file (JSON). Built-in defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of ticks to run (overrides the scenario)
    #[arg(short, long)]
    steps: Option<u64>,

    /// Seconds per tick (overrides the scenario)
    #[arg(long)]
    delta_time: Option<f32>,

    /// Seed for spawn positions and headings (overrides the scenario)
    #[arg(long)]
    seed: Option<u64>,

    /// Write a frame every N ticks instead of only at the end
    #[arg(long)]
    snapshot_every: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.debug {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    log::info!("Boid simulation starting...");

    let mut config = match &args.config {
        Some(path) => SimConfig::from_path(path)?,
        None => SimConfig::default(),
    };
    if let Some(steps) = args.steps {
        config.steps = steps;
    }
    if let Some(delta_time) = args.delta_time {
        config.delta_time = delta_time;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(every) = args.snapshot_every {
        config.snapshot_every = Some(every);
    }

    let mut simulation =
        Simulation::new(&config).context("Failed to initialize simulation")?;
    log::debug!(
        "Effective settings: {:?}",
        settings_of(simulation.flock().params())
    );
    log::info!(
        "Running {} ticks of {}s with {} agents",
        config.steps,
        config.delta_time,
        simulation.flock().len()
    );

    let started = Instant::now();
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    simulation
        .run(config.steps, config.snapshot_every, &mut out)
        .context("Simulation error")?;
    out.flush().context("Failed to flush output")?;

    let status = simulation.status();
    log::info!(
        "Finished {} ticks in {:.2?}, {} of {} agents alive",
        status.tick,
        started.elapsed(),
        status.boid_count,
        status.max_population
    );

    Ok(())
}
