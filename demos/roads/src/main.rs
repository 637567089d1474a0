//! roads: smallest example for the gpss simulation kernel.
//!
//! Cars arrive from two entry ramps every 50–90 ticks and share a single
//! stretch of road that takes 20–80 ticks to drive.  Cars that find the road
//! occupied wait in line.
//!
//! ```text
//! cargo run -p roads -- [config.json] [output_dir]
//! ```
//!
//! `config.json` holds a `SimConfig`, e.g.
//! `{"start_time": 0, "end_time": 200, "seed": 42}`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use gpss_core::{SimConfig, Tick, UniformSteps};
use gpss_model::ModelBuilder;
use gpss_output::{CsvWriter, ReportObserver};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:       u64 = 42;
const END_TIME:   u64 = 200;
const OUTPUT_DIR: &str = "output/roads";

// ── Transact kinds ────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
enum Vehicle {
    Car,
}

fn load_config(path: Option<&Path>) -> Result<SimConfig> {
    let Some(path) = path else {
        return Ok(SimConfig::new(Tick::ZERO, Tick(END_TIME), SEED));
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: SimConfig = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut args = std::env::args_os().skip(1);
    let config_path = args.next().map(PathBuf::from);
    let output_dir = args.next().map_or_else(|| PathBuf::from(OUTPUT_DIR), PathBuf::from);

    let config = load_config(config_path.as_deref())?;
    println!("=== roads: gpss kernel ===");
    println!(
        "Start: {}  |  End: {}  |  Seed: {}",
        config.start_time, config.end_time, config.seed
    );
    println!();

    // 1. Model: one road with a waiting line, two car generators.
    let mut b = ModelBuilder::new(config);
    let road = b.add_service(UniformSteps::new(2, 8, 10)?, true);
    b.add_generator(Vehicle::Car, UniformSteps::new(5, 9, 10)?);
    b.add_generator(Vehicle::Car, UniformSteps::new(5, 9, 10)?);
    b.route(Vehicle::Car, road);
    let mut model = b.build()?;

    // 2. Output.
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("creating {}", output_dir.display()))?;
    let mut obs = ReportObserver::new(CsvWriter::new(&output_dir)?);

    // 3. Run.
    let t0 = Instant::now();
    let done = model.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.take_error() {
        eprintln!("output error: {e}");
    }
    info!(dir = %output_dir.display(), "report written");

    // 4. Summary.
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  stopped at {} ({:?}) after {} ticks", done.clock(), done.reason, done.ticks);
    println!("  cars through: {}", done.history().len());
    if let Some(stats) = done.queue_statistics(road) {
        println!("  longest line: {}", stats.max_length());
        if let Some(wait) = stats.mean_wait() {
            println!("  mean wait:    {wait:.1}");
        }
    }
    println!();

    for service in done.services {
        print!("{service}");
    }
    println!();
    print!("{}", done.storage);

    Ok(())
}
