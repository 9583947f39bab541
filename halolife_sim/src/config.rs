//! Run configuration.

use halolife_core::seed::DEFAULT_SEED;
use halolife_core::SeedStrategy;
use thiserror::Error;

/// Rejected configurations. Checked before any rank is spawned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("board size must be at least 1")]
    EmptyBoard,

    #[error("process count must be at least 1")]
    NoProcesses,

    #[error("board size {board_size} is smaller than process count {procs}")]
    TooManyProcesses { board_size: usize, procs: usize },
}

/// Configuration for one simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Board width and height (N)
    pub board_size: usize,

    /// Generation cap
    pub max_generations: u64,

    /// Number of ranks (P)
    pub procs: usize,

    /// Initial board contents
    pub seed_strategy: SeedStrategy,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            board_size: 100,
            max_generations: 100,
            procs: 1,
            seed_strategy: SeedStrategy::PerRank { base: DEFAULT_SEED },
        }
    }
}

impl SimConfig {
    /// Creates a single-rank configuration with the default seeding.
    pub fn new(board_size: usize, max_generations: u64) -> Self {
        Self {
            board_size,
            max_generations,
            ..Default::default()
        }
    }

    /// Sets the number of ranks.
    pub fn with_procs(mut self, procs: usize) -> Self {
        self.procs = procs;
        self
    }

    /// Sets the initial board strategy.
    pub fn with_seed_strategy(mut self, strategy: SeedStrategy) -> Self {
        self.seed_strategy = strategy;
        self
    }

    /// Checks that the run can start.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size == 0 {
            return Err(ConfigError::EmptyBoard);
        }
        if self.procs == 0 {
            return Err(ConfigError::NoProcesses);
        }
        if self.board_size < self.procs {
            return Err(ConfigError::TooManyProcesses {
                board_size: self.board_size,
                procs: self.procs,
            });
        }
        Ok(())
    }
}
