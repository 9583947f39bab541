//! Local and global stability detection.
//!
//! A rank can only see its own band, so "nothing changed here" proves
//! nothing about the board; the AND-reduction is what makes the answer
//! global.

use crate::context::ExecutionContext;
use crate::slice::SlicePair;
use halolife_env::{CommError, Communicator};

/// True if `current` and `next` are identical, ghost rows included.
///
/// Ghost rows only lag the interior by a round, so including them can delay
/// detection but never reports stability early.
pub fn locally_stable(buffers: &SlicePair) -> bool {
    buffers.current().cells() == buffers.next().cells()
}

/// ANDs every rank's local verdict. All ranks get the same answer.
pub async fn globally_stable<C: Communicator>(
    ctx: &ExecutionContext<C>,
    local: bool,
) -> Result<bool, CommError> {
    ctx.comm().all_reduce_and(local).await
}
