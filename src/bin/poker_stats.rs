use std::cmp::Ordering;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use poker_stats::core::{PokerError, PokerHand};
use poker_stats::stats::{ITERATIONS, Operation, PokerStats};
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "poker-stats")]
#[command(about = "Classify, compare and count poker hands")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Deal random decks and print how often each hand came up
    ///
    /// With `--operation append` every repeated run is added to the ones
    /// before it, otherwise each run replaces the last.
    Stats {
        /// Number of shuffled decks to deal
        #[arg(short, long, default_value_t = ITERATIONS)]
        iterations: u32,
        /// Cards in each hand, 5 to 7
        #[arg(short, long, default_value_t = 7)]
        cards: usize,
        /// Run this many times and print the average time
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        repeat: u32,
        /// "replace" (or "update") or "append"
        #[arg(short, long, default_value_t = Operation::Replace)]
        operation: Operation,
        /// Seed the random number generator
        #[arg(long)]
        seed: Option<u64>,
        /// Spread the work over all cores
        #[arg(long)]
        parallel: bool,
    },
    /// Print the classification of a hand, e.g. "AsKsQsJsTs"
    Classify {
        hand: String,
    },
    /// Tell which of two hands is better
    Compare {
        hand: String,
        other: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Stats {
            iterations,
            cards,
            repeat,
            operation,
            seed,
            parallel,
        } => stats(iterations, cards, repeat, operation, seed, parallel),
        Commands::Classify { hand } => classify(&hand),
        Commands::Compare { hand, other } => compare(&hand, &other),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn stats(
    iterations: u32,
    cards: usize,
    repeat: u32,
    operation: Operation,
    seed: Option<u64>,
    parallel: bool,
) -> Result<(), PokerError> {
    let seed = seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut stats = PokerStats::new();

    let mut elapsed = Duration::ZERO;
    for _ in 0..repeat {
        let start = Instant::now();
        if parallel {
            let run_seed = rng.random();
            generate_parallel(&mut stats, iterations, cards, operation, run_seed)?;
        } else {
            stats.generate(iterations, cards, operation, &mut rng)?;
        }
        elapsed += start.elapsed();
    }

    print!("{}", stats.report());
    if repeat > 1 {
        println!();
        println!("average time over {repeat} runs: {:?}", elapsed / repeat);
    }
    Ok(())
}

#[cfg(feature = "parallel")]
fn generate_parallel(
    stats: &mut PokerStats,
    iterations: u32,
    cards: usize,
    operation: Operation,
    seed: u64,
) -> Result<(), PokerError> {
    stats.generate_parallel(iterations, cards, operation, seed)
}

#[cfg(not(feature = "parallel"))]
fn generate_parallel(
    stats: &mut PokerStats,
    iterations: u32,
    cards: usize,
    operation: Operation,
    seed: u64,
) -> Result<(), PokerError> {
    tracing::event!(
        tracing::Level::WARN,
        "Built without the parallel feature, running on one thread"
    );
    stats.generate(
        iterations,
        cards,
        operation,
        &mut StdRng::seed_from_u64(seed),
    )
}

fn classify(hand: &str) -> Result<(), PokerError> {
    let mut hand = PokerHand::new_from_str(hand)?;
    println!("{hand}");
    print!("{}", hand.classify()?);
    Ok(())
}

fn compare(hand: &str, other: &str) -> Result<(), PokerError> {
    let mut hand = PokerHand::new_from_str(hand)?;
    let mut other = PokerHand::new_from_str(other)?;

    for h in [&mut hand, &mut other] {
        println!("{h}");
        print!("{}", h.classify()?);
        println!();
    }

    match hand.compare(&mut other)? {
        Ordering::Greater => println!("{hand} wins"),
        Ordering::Less => println!("{other} wins"),
        Ordering::Equal => println!("{hand} and {other} are equal"),
    }
    Ok(())
}
