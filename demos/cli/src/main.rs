use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use recency::LruCache;

/// Simple cache workload driver
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay a key trace through the cache
    Replay {
        #[clap(flatten)]
        settings: CacheSettings,

        /// Input trace, one key per line
        #[clap(short, long)]
        input: PathBuf,
    },

    /// Drive the cache with a synthetic uniform workload
    Synth {
        #[clap(flatten)]
        settings: CacheSettings,

        /// Number of operations to run
        #[clap(long, default_value_t = 1_000_000)]
        ops: u64,

        /// Number of distinct keys in the workload
        #[clap(long, default_value_t = 10_000)]
        keys: u64,

        /// Seed for the workload generator
        #[clap(long, default_value_t = 0)]
        seed: u64,
    },
}

#[derive(Parser)]
struct CacheSettings {
    /// Number of entries held before eviction begins
    #[clap(short, long)]
    capacity: usize,
}

#[derive(Default)]
struct Tally {
    hits: u64,
    misses: u64,
}

impl Tally {
    fn total(&self) -> u64 {
        self.hits + self.misses
    }
}

////////////////////////////////////////////////////////////////////////////////

fn replay(input: &Path, settings: &CacheSettings) -> Result<Tally> {
    let file = std::fs::File::open(input)
        .with_context(|| format!("failed to open {input:?}"))?;

    let mut cache = LruCache::new(settings.capacity)?;
    let mut tally = Tally::default();
    for (i, line) in std::io::BufReader::new(file).lines().enumerate() {
        let line = line?;
        let key = line.trim();
        if key.is_empty() {
            continue;
        }
        let key = key.to_owned();
        if cache.get(&key).is_some() {
            tally.hits += 1;
        } else {
            tally.misses += 1;
            cache.insert(key, i as u64);
        }
    }
    Ok(tally)
}

fn synth(
    settings: &CacheSettings,
    ops: u64,
    keys: u64,
    seed: u64,
) -> Result<Tally> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut cache = LruCache::new(settings.capacity)?;
    let mut tally = Tally::default();
    for i in 0..ops {
        let key = rng.gen_range(0..keys);
        if cache.get(&key).is_some() {
            tally.hits += 1;
        } else {
            tally.misses += 1;
            cache.insert(key, i);
        }
    }
    Ok(tally)
}

fn report(tally: &Tally, elapsed: Duration) {
    let total = tally.total().max(1);
    info!(
        "Processed {} ops in {:?} ({:.0} ops/s)",
        tally.total(),
        elapsed,
        tally.total() as f64 / elapsed.as_secs_f64()
    );
    info!(
        "{} hits, {} misses ({:.2}% hit rate)",
        tally.hits,
        tally.misses,
        100.0 * tally.hits as f64 / total as f64
    );
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .init();

    let args = Args::parse();
    match args.cmd {
        Command::Replay { settings, input } => {
            let start = Instant::now();
            let tally = replay(&input, &settings)?;
            report(&tally, start.elapsed());
        }
        Command::Synth {
            settings,
            ops,
            keys,
            seed,
        } => {
            info!("Running {ops} ops over {keys} keys (seed {seed})");
            let start = Instant::now();
            let tally = synth(&settings, ops, keys, seed)?;
            report(&tally, start.elapsed());
        }
    }

    Ok(())
}
