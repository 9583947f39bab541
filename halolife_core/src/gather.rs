//! Assembly of the distributed board at the root.

use crate::context::ExecutionContext;
use crate::error::{EngineError, PartitionError};
use crate::grid::{Grid, DEAD};
use crate::partition::Partition;
use crate::slice::SliceBuffer;
use halolife_env::{Communicator, GatherTarget, Rank};
use tracing::debug;

/// Receive counts and offsets for gathering interior rows, by rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatherLayout {
    counts: Vec<usize>,
    displacements: Vec<usize>,
}

impl GatherLayout {
    /// Derives the tables from the same partition every rank used.
    pub fn for_world(board_size: usize, procs: usize) -> Result<Self, PartitionError> {
        let parts = Partition::all(board_size, procs)?;

        let counts = parts.iter().map(Partition::interior_len).collect();
        let displacements = parts.iter().map(|p| p.row_offset * board_size).collect();

        Ok(Self {
            counts,
            displacements,
        })
    }

    /// Cells expected from each rank.
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Offset of each rank's rows in the assembled board.
    pub fn displacements(&self) -> &[usize] {
        &self.displacements
    }

    /// Receive target over `buffer` using these tables.
    pub fn target<'a>(&'a self, buffer: &'a mut [u8]) -> GatherTarget<'a> {
        GatherTarget {
            buffer,
            counts: &self.counts,
            displacements: &self.displacements,
        }
    }
}

/// Collects every rank's interior rows into one board at the root.
///
/// Returns `Some(grid)` on the root and `None` everywhere else. Ghost rows
/// are never sent.
pub async fn gather_grid<C: Communicator>(
    ctx: &ExecutionContext<C>,
    slice: &SliceBuffer,
) -> Result<Option<Grid>, EngineError> {
    let comm = ctx.comm();

    if !ctx.is_root() {
        comm.gather_varying(Rank::ROOT, slice.interior(), None).await?;
        return Ok(None);
    }

    let n = ctx.board_size();
    let layout = GatherLayout::for_world(n, ctx.size())?;
    let mut cells = vec![DEAD; n * n];

    comm.gather_varying(Rank::ROOT, slice.interior(), Some(layout.target(&mut cells)))
        .await?;

    debug!("Gathered {} rows from {} ranks", n, ctx.size());
    Ok(Some(Grid::from_cells(n, cells)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Cell, ALIVE};
    use crate::testing::on_every_rank;

    fn row_code(row: usize, col: usize) -> Cell {
        ((row >> col) & 1) as Cell
    }

    #[test]
    fn test_layout_tables() {
        let layout = GatherLayout::for_world(5, 3).unwrap();
        assert_eq!(layout.counts(), &[10, 10, 5]);
        assert_eq!(layout.displacements(), &[0, 10, 20]);
    }

    #[tokio::test]
    async fn test_gather_preserves_global_row_order() {
        const N: usize = 7;

        let grids = on_every_rank(3, |comm| async move {
            let ctx = ExecutionContext::new(comm, N).unwrap();
            let part = *ctx.partition();
            let mut slice = SliceBuffer::new(&part);

            // spell each row's global index in binary; ghosts are all alive,
            // a pattern no interior row has
            for (local, global) in part.global_rows().enumerate() {
                for (col, cell) in slice.row_mut(local + 1).iter_mut().enumerate() {
                    *cell = row_code(global, col);
                }
            }
            slice.row_mut(0).fill(ALIVE);
            let last = slice.total_rows() - 1;
            slice.row_mut(last).fill(ALIVE);

            let grid = gather_grid(&ctx, &slice).await.unwrap();
            grid.map(|g| g.cells().to_vec())
        })
        .await;

        assert!(grids[1].is_none());
        assert!(grids[2].is_none());

        let cells = grids[0].clone().unwrap();
        for row in 0..N {
            for col in 0..N {
                assert_eq!(cells[row * N + col], row_code(row, col), "row {row} out of place");
            }
        }
    }
}
