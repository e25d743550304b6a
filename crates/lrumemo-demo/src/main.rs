//! lrumemo demo - replays the slow-square memoization scenario

use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::Parser;
use lrumemo::BoundedCache;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Cache capacity (number of memoized results)
    #[arg(short, long, default_value_t = 3)]
    capacity: usize,

    /// Simulated cost of one producer call, in milliseconds
    #[arg(short, long, default_value_t = 1000)]
    delay_ms: u64,

    /// Values to square, in call order
    #[arg(default_values_t = [3, 3, 3, 2, 2, 2, 1, 1, 1, 5, 5, 5, 3])]
    inputs: Vec<u64>,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    info!("Starting lrumemo demo v{}", env!("CARGO_PKG_VERSION"));
    info!("Cache capacity: {}", args.capacity);
    info!("Producer delay: {}ms", args.delay_ms);

    let delay = Duration::from_millis(args.delay_ms);
    let mut cache = BoundedCache::new(args.capacity, |x: &u64| {
        // Only visible on a miss
        info!("shhh...");
        thread::sleep(delay);
        x.checked_mul(*x)
            .ok_or_else(|| anyhow!("{} squared does not fit in u64", x))
    })?;

    for &x in &args.inputs {
        match cache.get(x) {
            Ok(square) => println!("{}", square),
            Err(e) => warn!("Producer failed for {}: {}", x, e),
        }
    }

    info!("Cache entries: {}/{}", cache.len(), cache.capacity());
    println!("\n📊 {}", cache.stats());

    Ok(())
}
