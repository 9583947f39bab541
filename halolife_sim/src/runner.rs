//! Job runner - one full run from configuration to written board.

use crate::config::SimConfig;
use crate::exporter::{BoardExporter, ExportError, JobReport};
use crate::oracle::SequentialLife;
use crate::world::{InitialBoard, LifeWorld, WorldError};

use halolife_core::{Grid, Partition};
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

/// Failures of a whole job.
#[derive(Debug, Error)]
pub enum JobError {
    #[error(transparent)]
    World(#[from] WorldError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("distributed board differs from the sequential reference in {differing} cells after {generations} generations")]
    VerificationFailed { generations: u64, differing: usize },
}

/// Runs `config` from its seeded initial board and writes the result into
/// `output_dir`.
pub async fn run_job(config: &SimConfig, output_dir: &Path, verify: bool) -> Result<JobReport, JobError> {
    run_job_from(config, InitialBoard::Seeded(config.seed_strategy), output_dir, verify).await
}

/// Runs `config` from `initial` and writes the result into `output_dir`.
///
/// With `verify` set, the same initial board is also stepped sequentially
/// for the same number of generations and the two boards must match.
pub async fn run_job_from(
    config: &SimConfig,
    initial: InitialBoard,
    output_dir: &Path,
    verify: bool,
) -> Result<JobReport, JobError> {
    let world = LifeWorld::new(config.clone())?;

    let reference = if verify {
        Some(initial.materialize(config.board_size, config.procs).map_err(WorldError::from)?)
    } else {
        None
    };

    let outcome = world.run(initial).await?;
    let generations = outcome.summary.generations;
    let elapsed_ms = outcome.elapsed.as_millis() as u64;

    info!(
        "Simulation completed in {} generations and took {} ms",
        generations, elapsed_ms
    );

    let verified = match reference {
        Some(start) => {
            let differing = check_against_reference(start, &outcome.grid, generations);
            if differing > 0 {
                warn!("Verification failed: {} cells differ", differing);
                return Err(JobError::VerificationFailed {
                    generations,
                    differing,
                });
            }
            info!("Verified against sequential reference");
            Some(true)
        }
        None => None,
    };

    let exporter = BoardExporter::new(output_dir);
    let output_file = exporter.write(&outcome.grid, config.procs, generations)?;

    let partitions = Partition::all(config.board_size, config.procs)
        .map_err(WorldError::from)?;

    Ok(JobReport {
        board_size: config.board_size,
        procs: config.procs,
        summary: outcome.summary,
        elapsed_ms,
        population: outcome.grid.population(),
        seed_strategy: config.seed_strategy,
        partitions,
        output_file,
        verified,
    })
}

/// Steps `start` sequentially `generations` times and counts the cells that
/// differ from `distributed`.
fn check_against_reference(start: Grid, distributed: &Grid, generations: u64) -> usize {
    let mut oracle = SequentialLife::new(start);
    oracle.advance_by(generations);

    oracle
        .grid()
        .cells()
        .iter()
        .zip(distributed.cells())
        .filter(|(a, b)| a != b)
        .count()
}
