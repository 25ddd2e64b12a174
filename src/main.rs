use anyhow::{Context, Result};
use clap::Parser;
use tracing::warn;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use grid_pathfinder::config::Config;
use grid_pathfinder::simulation::Simulation;

fn main() -> Result<()> {
    init_tracing();
    let config = Config::parse();

    println!("Starting grid search...");
    println!("Grid size: {}x{}", config.grid_size, config.grid_size);
    println!(
        "Explicit obstacles: {}, Random obstacles: {}",
        config.obstacles.len(),
        config.num_obstacles
    );
    if config.no_visualization {
        println!("Visualization disabled - running in fast mode");
    } else {
        println!("Visualization enabled with {}ms delay", config.delay_ms);
        println!("Press Ctrl+C to stop the search");
    }
    println!();

    let simulation = Simulation::new(config).context("invalid grid configuration")?;

    let token = simulation.cancel_token();
    if let Err(err) = ctrlc::set_handler(move || token.cancel()) {
        warn!(error = %err, "could not install Ctrl+C handler");
    }

    let report = simulation.run().context("search failed")?;

    println!("\n=== FINAL RESULTS ===");
    println!("{}", report);
    Ok(())
}

// Logs go to stderr and default to `warn` so they do not tear the rendered
// board; raise with RUST_LOG.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
