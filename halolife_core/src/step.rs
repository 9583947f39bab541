//! B3/S23 transition over a rank's interior rows.

use crate::grid::{Cell, ALIVE, DEAD};
use crate::slice::SliceBuffer;

/// Next state of one cell given its live neighbor count.
///
/// A live cell survives with 2 or 3 neighbors; a dead cell is born with
/// exactly 3.
#[inline]
pub fn next_state(cell: Cell, neighbors: u8) -> Cell {
    match (cell == ALIVE, neighbors) {
        (true, 2 | 3) | (false, 3) => ALIVE,
        _ => DEAD,
    }
}

/// Live cells in the Moore neighborhood of column `col` of `here`.
///
/// Columns outside the row are dead; there is no horizontal wraparound.
#[inline]
pub fn count_alive_neighbors(above: &[Cell], here: &[Cell], below: &[Cell], col: usize) -> u8 {
    let lo = col.saturating_sub(1);
    let hi = (col + 1).min(here.len() - 1);

    let mut count = 0;
    for c in lo..=hi {
        count += above[c] + below[c];
        if c != col {
            count += here[c];
        }
    }
    count
}

/// Writes the next generation of every interior cell of `current` into `next`.
///
/// Ghost rows of `current` supply the vertical neighbors of the first and
/// last interior rows and must already hold the neighbors' boundary rows.
/// Ghost rows of `next` are not written.
pub fn compute_next(current: &SliceBuffer, next: &mut SliceBuffer) {
    debug_assert_eq!(current.width(), next.width());
    debug_assert_eq!(current.total_rows(), next.total_rows());

    for row in 1..=current.interior_rows() {
        let above = current.row(row - 1);
        let here = current.row(row);
        let below = current.row(row + 1);
        let out = next.row_mut(row);

        for (col, cell) in out.iter_mut().enumerate() {
            *cell = next_state(here[col], count_alive_neighbors(above, here, below, col));
        }
    }
}
