//! Row-wise domain partitioning.
//!
//! Rows are dealt out as `base = n / p` per rank, with the `n % p` leftover
//! rows going one each to the lowest ranks. Both the engine (to size its
//! buffers) and the gatherer (to size its receive tables) go through
//! `Partition::for_rank`, so the two always agree.

use crate::error::PartitionError;
use halolife_env::Rank;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// One rank's share of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    /// Owning rank
    pub rank: Rank,

    /// Board width (and height), N
    pub board_size: usize,

    /// Interior rows owned by this rank
    pub row_count: usize,

    /// Global index of this rank's first interior row
    pub row_offset: usize,
}

impl Partition {
    /// Computes the partition for `rank` in a world of `procs` ranks.
    pub fn for_rank(board_size: usize, procs: usize, rank: Rank) -> Result<Self, PartitionError> {
        if procs == 0 {
            return Err(PartitionError::NoProcesses);
        }
        if rank.index() >= procs {
            return Err(PartitionError::RankOutOfRange { rank, procs });
        }

        let base = board_size / procs;
        let extra = board_size % procs;
        let r = rank.index();

        Ok(Self {
            rank,
            board_size,
            row_count: base + usize::from(r < extra),
            row_offset: base * r + r.min(extra),
        })
    }

    /// Every rank's partition, in rank order.
    pub fn all(board_size: usize, procs: usize) -> Result<Vec<Self>, PartitionError> {
        (0..procs)
            .map(|r| Self::for_rank(board_size, procs, Rank(r)))
            .collect()
    }

    /// Interior rows plus the two ghost rows.
    pub fn total_local_rows(&self) -> usize {
        self.row_count + 2
    }

    /// Cells in the local buffer, ghost rows included.
    pub fn buffer_len(&self) -> usize {
        self.total_local_rows() * self.board_size
    }

    /// Cells in the interior rows only.
    pub fn interior_len(&self) -> usize {
        self.row_count * self.board_size
    }

    /// Global row indices owned by this rank.
    pub fn global_rows(&self) -> Range<usize> {
        self.row_offset..self.row_offset + self.row_count
    }
}
