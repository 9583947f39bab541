//! Error types for the halolife engine.

use crate::grid::Cell;
use halolife_env::{CommError, Rank};
use thiserror::Error;

/// Invalid inputs to the row partitioner.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PartitionError {
    #[error("process count must be at least 1")]
    NoProcesses,

    #[error("{rank} is outside a world of {procs} processes")]
    RankOutOfRange { rank: Rank, procs: usize },
}

/// Invalid board construction or access.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("board size must be at least 1")]
    Empty,

    #[error("row {row} has {actual} cells, expected {expected}")]
    RaggedRow { row: usize, expected: usize, actual: usize },

    #[error("expected {expected} cells, got {actual}")]
    CellCount { expected: usize, actual: usize },

    #[error("cell {index} has value {value}, expected 0 or 1")]
    BadCell { index: usize, value: Cell },

    #[error("unexpected character {0:?} in board pattern")]
    BadCharacter(char),

    #[error("board is {actual}×{actual}, engine expects {expected}×{expected}")]
    SizeMismatch { expected: usize, actual: usize },
}

/// Anything that stops a rank's run. All of these are fatal to the job.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("communication failed: {0}")]
    Comm(#[from] CommError),

    #[error("partition error: {0}")]
    Partition(#[from] PartitionError),

    #[error("grid error: {0}")]
    Grid(#[from] GridError),

    #[error("board size {board_size} is smaller than process count {procs}")]
    Oversubscribed { board_size: usize, procs: usize },
}
