//! halolife CLI
//!
//! Runs a row-partitioned Game of Life on N ranks and writes the final board.

use anyhow::Context;
use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use halolife_core::seed::DEFAULT_SEED;
use halolife_core::SeedStrategy;
use halolife_sim::{run_job, SimConfig};
use std::path::PathBuf;
use tracing::{error, info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// How the initial board is generated.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum SeedMode {
    /// Each rank seeds its own generator with seed + rank
    PerRank,
    /// Each global row seeds its own generator with seed + row
    PerRow,
    /// Start from an all-dead board
    Empty,
}

/// Distributed Game of Life with row partitioning and halo exchange
#[derive(Parser, Debug)]
#[command(name = "halolife", version)]
#[command(about = "Run a row-partitioned Game of Life and write the final board", long_about = None)]
struct Args {
    /// Board width and height
    board_size: usize,

    /// Maximum number of generations
    max_generations: u64,

    /// Directory for the final board (created if missing)
    output_directory: PathBuf,

    /// Number of ranks
    #[arg(short = 'n', long, env = "HALOLIFE_PROCS", default_value = "1")]
    procs: usize,

    /// Base seed for the initial board
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// How the initial board is generated
    #[arg(long, value_enum, default_value = "per-rank")]
    seed_strategy: SeedMode,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Print the run report as JSON
    #[arg(long)]
    json: bool,

    /// Check the result against a sequential run
    #[arg(long)]
    verify: bool,
}

impl Args {
    fn config(&self) -> SimConfig {
        let strategy = match self.seed_strategy {
            SeedMode::PerRank => SeedStrategy::PerRank { base: self.seed },
            SeedMode::PerRow => SeedStrategy::PerRow { base: self.seed },
            SeedMode::Empty => SeedStrategy::Empty,
        };

        SimConfig::new(self.board_size, self.max_generations)
            .with_procs(self.procs)
            .with_seed_strategy(strategy)
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = args.config();
    config.validate().context("invalid arguments")?;

    let report = run_job(&config, &args.output_directory, args.verify)
        .await
        .context("simulation failed")?;

    if args.json {
        println!("{}", report.to_json()?);
    } else {
        println!(
            "Simulation completed in {} generations and took {} ms.",
            report.summary.generations, report.elapsed_ms
        );
        info!("Final board: {}", report.output_file.display());
    }

    Ok(())
}

/// Exit status for a failed parse: 0 for `--help`/`--version`, 1 for any
/// usage error (clap would use 2).
fn parse_exit_code(err: &clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}

#[tokio::main]
async fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            std::process::exit(parse_exit_code(&e));
        }
    };

    // Initialize logging
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {e}");
    }

    if let Err(e) = run(args).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
