//! LifeWorld - spawns one task per rank and collects the root's result.

use crate::config::{ConfigError, SimConfig};

use halolife_core::{
    EngineError, Grid, Partition, PartitionError, RankEngine, RunSummary, SeedStrategy, SliceBuffer,
};
use halolife_env::{CommError, LocalCommunicator, LocalWorld, ProcessContext, Rank, SystemContext};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info};

/// Failures that end a whole run.
#[derive(Debug, Error)]
pub enum WorldError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("{rank} failed: {source}")]
    Rank {
        rank: Rank,
        #[source]
        source: EngineError,
    },

    #[error("{0} panicked")]
    Panicked(Rank),

    #[error("root finished without a board")]
    MissingBoard,

    #[error("could not build initial board: {0}")]
    InitialBoard(#[from] EngineError),

    #[error("partition error: {0}")]
    Partition(#[from] PartitionError),
}

/// Where the first generation comes from.
#[derive(Debug, Clone)]
pub enum InitialBoard {
    /// Each rank generates its own rows
    Seeded(SeedStrategy),

    /// Each rank copies its rows out of a shared full board
    Explicit(Arc<Grid>),
}

impl InitialBoard {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            InitialBoard::Seeded(strategy) => strategy.name(),
            InitialBoard::Explicit(_) => "explicit",
        }
    }

    /// The full first generation as the ranks will see it.
    ///
    /// Rebuilds a seeded board by running every rank's seeding locally, so
    /// it depends on `procs` exactly as the distributed run does.
    pub fn materialize(&self, board_size: usize, procs: usize) -> Result<Grid, EngineError> {
        match self {
            InitialBoard::Explicit(grid) => Ok(grid.as_ref().clone()),
            InitialBoard::Seeded(strategy) => {
                let mut cells = Vec::with_capacity(board_size * board_size);
                for part in Partition::all(board_size, procs)? {
                    let mut slice = SliceBuffer::new(&part);
                    strategy.fill(&part, &mut slice);
                    cells.extend_from_slice(slice.interior());
                }
                Ok(Grid::from_cells(board_size, cells)?)
            }
        }
    }
}

/// What the root hands back after a run.
#[derive(Debug, Clone)]
pub struct WorldOutcome {
    /// Final assembled board
    pub grid: Grid,

    /// Generation count and stop reason
    pub summary: RunSummary,

    /// Wall-clock time of the root's generation loop
    pub elapsed: Duration,
}

/// Per-rank result before the root's is picked out.
struct RankResult {
    grid: Option<Grid>,
    summary: RunSummary,
    elapsed: Duration,
}

/// The container for one distributed run.
pub struct LifeWorld {
    config: SimConfig,
}

impl LifeWorld {
    /// Validates `config` and creates the world.
    pub fn new(config: SimConfig) -> Result<Self, WorldError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Runs every rank to completion and returns the root's outcome.
    ///
    /// If any rank fails the whole run fails. The first rank to fail for a
    /// reason other than a vanished peer is reported, since the others
    /// usually just noticed it leaving.
    pub async fn run(&self, initial: InitialBoard) -> Result<WorldOutcome, WorldError> {
        let SimConfig {
            board_size,
            max_generations,
            procs,
            ..
        } = self.config;

        info!(
            "Launching {} ranks on a {}x{} board (max {} generations, {} start)",
            procs,
            board_size,
            board_size,
            max_generations,
            initial.name()
        );

        let handles: Vec<_> = LocalWorld::new(procs)
            .into_iter()
            .map(|comm| {
                let initial = initial.clone();
                tokio::spawn(run_rank(comm, board_size, max_generations, initial))
            })
            .collect();

        let mut results = Vec::with_capacity(procs);
        for (rank, handle) in handles.into_iter().enumerate() {
            let rank = Rank(rank);
            match handle.await {
                Ok(result) => results.push((rank, result)),
                Err(join_error) => {
                    error!("{} task aborted: {}", rank, join_error);
                    return Err(WorldError::Panicked(rank));
                }
            }
        }

        let mut failures: Vec<(Rank, EngineError)> = Vec::new();
        let mut root = None;
        for (rank, result) in results {
            match result {
                Ok(done) if rank.is_root() => root = Some(done),
                Ok(_) => {}
                Err(e) => {
                    error!("{} failed: {}", rank, e);
                    failures.push((rank, e));
                }
            }
        }

        if !failures.is_empty() {
            let index = failures
                .iter()
                .position(|(_, e)| !matches!(e, EngineError::Comm(CommError::PeerDisconnected(_))))
                .unwrap_or(0);
            let (rank, source) = failures.swap_remove(index);
            return Err(WorldError::Rank { rank, source });
        }

        let RankResult {
            grid,
            summary,
            elapsed,
        } = root.ok_or(WorldError::MissingBoard)?;
        let grid = grid.ok_or(WorldError::MissingBoard)?;

        Ok(WorldOutcome {
            grid,
            summary,
            elapsed,
        })
    }
}

async fn run_rank(
    comm: LocalCommunicator,
    board_size: usize,
    max_generations: u64,
    initial: InitialBoard,
) -> Result<RankResult, EngineError> {
    let clock = SystemContext::new();
    let mut engine = RankEngine::new(comm, board_size)?;

    match &initial {
        InitialBoard::Seeded(strategy) => engine.seed(strategy),
        InitialBoard::Explicit(grid) => engine.load(grid)?,
    }

    let started = clock.now();
    let summary = engine.run(max_generations).await?;
    let elapsed = clock.since(started);

    let grid = engine.gather().await?;
    debug!(
        "{} done after {} generations in {:?}",
        engine.context().rank(),
        engine.generation(),
        elapsed
    );

    Ok(RankResult {
        grid,
        summary,
        elapsed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_world_runs_blinker() {
        let start = Grid::from_pattern(
            "
            .....
            .....
            .***.
            .....
            .....
            ",
        )
        .unwrap();
        let world = LifeWorld::new(SimConfig::new(5, 3).with_procs(2)).unwrap();

        let outcome = world.run(InitialBoard::Explicit(Arc::new(start.clone()))).await.unwrap();

        assert_eq!(outcome.summary.generations, 3);
        assert!(!outcome.summary.converged);
        // odd number of steps leaves the blinker vertical
        assert!(outcome.grid.is_alive(1, 2));
        assert!(outcome.grid.is_alive(3, 2));
        assert!(!outcome.grid.is_alive(2, 1));
    }

    #[tokio::test]
    async fn test_world_rejects_bad_config() {
        assert!(matches!(
            LifeWorld::new(SimConfig::new(2, 1).with_procs(3)),
            Err(WorldError::Config(ConfigError::TooManyProcesses { .. }))
        ));
    }

    #[tokio::test]
    async fn test_explicit_board_of_wrong_size_fails_the_run() {
        let world = LifeWorld::new(SimConfig::new(6, 3).with_procs(3)).unwrap();
        let result = world.run(InitialBoard::Explicit(Arc::new(Grid::new(4)))).await;

        match result {
            Err(WorldError::Rank { source, .. }) => {
                assert!(matches!(source, EngineError::Grid(_)), "got {source}");
            }
            other => panic!("expected rank failure, got {other:?}"),
        }
    }

    #[test]
    fn test_initial_board_names() {
        assert_eq!(InitialBoard::Seeded(SeedStrategy::default()).name(), "per_rank");
        assert_eq!(InitialBoard::Seeded(SeedStrategy::PerRow { base: 1 }).name(), "per_row");
        assert_eq!(InitialBoard::Seeded(SeedStrategy::Empty).name(), "empty");
        assert_eq!(InitialBoard::Explicit(Arc::new(Grid::new(2))).name(), "explicit");
    }

    #[test]
    fn test_materialize_seeded_matches_per_rank_fill() {
        let initial = InitialBoard::Seeded(SeedStrategy::default());
        let one = initial.materialize(12, 1).unwrap();
        let three = initial.materialize(12, 3).unwrap();

        assert_eq!(one.size(), 12);
        assert_eq!(one.rows(0, 4), three.rows(0, 4));
        assert_ne!(one, three);
    }
}
