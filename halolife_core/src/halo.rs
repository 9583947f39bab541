//! Ghost row (halo) exchange between row-adjacent ranks.

use crate::context::ExecutionContext;
use crate::slice::{Edge, SliceBuffer};
use halolife_env::{CommError, Communicator};

/// Refreshes both ghost rows of `slice` from the neighboring ranks.
///
/// Each neighbor pair swaps boundary rows in one combined send/receive, so
/// the order in which neighbors reach this call does not matter. Ranks on
/// the top or bottom edge of the board have no partner on that side and
/// leave the ghost row as it is (all dead).
pub async fn exchange_ghost_rows<C: Communicator>(
    ctx: &ExecutionContext<C>,
    slice: &mut SliceBuffer,
) -> Result<(), CommError> {
    if let Some(below) = ctx.below() {
        let (boundary, ghost) = slice.halo_mut(Edge::Bottom);
        ctx.comm().send_recv(below, boundary, ghost).await?;
    }

    if let Some(above) = ctx.above() {
        let (boundary, ghost) = slice.halo_mut(Edge::Top);
        ctx.comm().send_recv(above, boundary, ghost).await?;
    }

    Ok(())
}
