//! Explicit per-rank execution context.

use crate::error::{EngineError, GridError};
use crate::partition::Partition;
use halolife_env::{Communicator, Rank};

/// Everything a rank knows about its place in the world.
///
/// Passed by reference to every component instead of any of them looking
/// up global state.
pub struct ExecutionContext<C: Communicator> {
    comm: C,
    partition: Partition,
}

impl<C: Communicator> ExecutionContext<C> {
    /// Binds `comm` to its row band of a `board_size`×`board_size` board.
    ///
    /// # Errors
    /// * `GridError::Empty` - `board_size` is zero
    /// * `EngineError::Oversubscribed` - fewer rows than ranks
    pub fn new(comm: C, board_size: usize) -> Result<Self, EngineError> {
        if board_size == 0 {
            return Err(GridError::Empty.into());
        }
        let procs = comm.size();
        if board_size < procs {
            return Err(EngineError::Oversubscribed { board_size, procs });
        }

        let partition = Partition::for_rank(board_size, procs, comm.rank())?;
        Ok(Self { comm, partition })
    }

    /// Communication handle.
    pub fn comm(&self) -> &C {
        &self.comm
    }

    /// This rank's share of the board.
    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    /// This rank.
    pub fn rank(&self) -> Rank {
        self.comm.rank()
    }

    /// Number of ranks.
    pub fn size(&self) -> usize {
        self.comm.size()
    }

    /// Board width and height.
    pub fn board_size(&self) -> usize {
        self.partition.board_size
    }

    /// Rank owning the rows directly above ours.
    pub fn above(&self) -> Option<Rank> {
        self.rank().above()
    }

    /// Rank owning the rows directly below ours.
    pub fn below(&self) -> Option<Rank> {
        self.rank().below(self.size())
    }

    /// Returns true on the coordinating rank.
    pub fn is_root(&self) -> bool {
        self.comm.is_root()
    }
}
