//! Local slice buffers: interior rows padded by one ghost row on each side.
//!
//! ```text
//! row 0             top ghost     (copy of the rank above's last interior row)
//! row 1             first interior
//! ...
//! row rows-2        last interior
//! row rows-1        bottom ghost  (copy of the rank below's first interior row)
//! ```

use crate::grid::{Cell, DEAD};
use crate::partition::Partition;

/// Which side of the slice a ghost row sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
}

/// One rank's row band, ghost rows included, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceBuffer {
    width: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl SliceBuffer {
    /// All-dead buffer sized for `partition`.
    pub fn new(partition: &Partition) -> Self {
        Self::with_interior_rows(partition.row_count, partition.board_size)
    }

    /// All-dead buffer with `interior_rows` + 2 rows of `width` cells.
    pub fn with_interior_rows(interior_rows: usize, width: usize) -> Self {
        let rows = interior_rows + 2;
        Self {
            width,
            rows,
            cells: vec![DEAD; rows * width],
        }
    }

    /// Cells per row.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Rows including both ghost rows.
    pub fn total_rows(&self) -> usize {
        self.rows
    }

    /// Interior rows only.
    pub fn interior_rows(&self) -> usize {
        self.rows - 2
    }

    /// The whole buffer, ghost rows included.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cell at local (row, col).
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.width + col]
    }

    /// Sets the cell at local (row, col).
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[row * self.width + col] = cell;
    }

    /// Local row `row`.
    pub fn row(&self, row: usize) -> &[Cell] {
        &self.cells[row * self.width..(row + 1) * self.width]
    }

    /// Mutable local row `row`.
    pub fn row_mut(&mut self, row: usize) -> &mut [Cell] {
        &mut self.cells[row * self.width..(row + 1) * self.width]
    }

    /// Interior rows as one contiguous slice.
    pub fn interior(&self) -> &[Cell] {
        &self.cells[self.width..(self.rows - 1) * self.width]
    }

    /// Overwrites the interior rows; `cells` must be exactly interior-sized.
    pub fn load_interior(&mut self, cells: &[Cell]) {
        let end = (self.rows - 1) * self.width;
        self.cells[self.width..end].copy_from_slice(cells);
    }

    /// The ghost row on `edge`.
    pub fn ghost(&self, edge: Edge) -> &[Cell] {
        match edge {
            Edge::Top => self.row(0),
            Edge::Bottom => self.row(self.rows - 1),
        }
    }

    /// Borrows the boundary row to send and the ghost row to fill on `edge`
    /// at the same time.
    pub fn halo_mut(&mut self, edge: Edge) -> (&[Cell], &mut [Cell]) {
        let width = self.width;
        match edge {
            Edge::Top => {
                let (ghost, rest) = self.cells.split_at_mut(width);
                (&rest[..width], ghost)
            }
            Edge::Bottom => {
                let (head, ghost) = self.cells.split_at_mut((self.rows - 1) * width);
                (&head[(self.rows - 2) * width..], ghost)
            }
        }
    }
}

/// The two buffers a rank steps between.
///
/// Each round reads `current` and writes `next`; `swap` then exchanges the
/// roles. No cells are copied.
#[derive(Debug, Clone)]
pub struct SlicePair {
    current: SliceBuffer,
    next: SliceBuffer,
}

impl SlicePair {
    /// Two all-dead buffers sized for `partition`.
    pub fn new(partition: &Partition) -> Self {
        Self {
            current: SliceBuffer::new(partition),
            next: SliceBuffer::new(partition),
        }
    }

    /// The generation being read.
    pub fn current(&self) -> &SliceBuffer {
        &self.current
    }

    /// Mutable access to the generation being read (seeding, halo exchange).
    pub fn current_mut(&mut self) -> &mut SliceBuffer {
        &mut self.current
    }

    /// The generation being written.
    pub fn next(&self) -> &SliceBuffer {
        &self.next
    }

    /// Borrows `current` for reading and `next` for writing.
    pub fn read_write(&mut self) -> (&SliceBuffer, &mut SliceBuffer) {
        (&self.current, &mut self.next)
    }

    /// Makes `next` the current generation.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::ALIVE;
    use halolife_env::Rank;

    fn numbered(interior_rows: usize, width: usize) -> SliceBuffer {
        let mut buf = SliceBuffer::with_interior_rows(interior_rows, width);
        for r in 0..buf.total_rows() {
            buf.row_mut(r).fill(r as Cell);
        }
        buf
    }

    #[test]
    fn test_sized_from_partition() {
        let part = Partition::for_rank(10, 3, Rank(0)).unwrap();
        let buf = SliceBuffer::new(&part);
        assert_eq!(buf.total_rows(), 6);
        assert_eq!(buf.interior_rows(), 4);
        assert_eq!(buf.cells().len(), part.buffer_len());
        assert_eq!(buf.interior().len(), part.interior_len());
    }

    #[test]
    fn test_halo_rows() {
        let mut buf = numbered(3, 4);
        assert_eq!(buf.ghost(Edge::Top), &[0; 4]);
        assert_eq!(buf.ghost(Edge::Bottom), &[4; 4]);

        let (send, recv) = buf.halo_mut(Edge::Bottom);
        assert_eq!(send, &[3; 4]);
        recv.fill(9);
        assert_eq!(buf.ghost(Edge::Bottom), &[9; 4]);

        let (send, recv) = buf.halo_mut(Edge::Top);
        assert_eq!(send, &[1; 4]);
        recv.fill(8);
        assert_eq!(buf.ghost(Edge::Top), &[8; 4]);
    }

    #[test]
    fn test_load_interior_leaves_ghosts() {
        let mut buf = SliceBuffer::with_interior_rows(2, 2);
        buf.load_interior(&[ALIVE; 4]);
        assert_eq!(buf.interior(), &[ALIVE; 4]);
        assert_eq!(buf.ghost(Edge::Top), &[DEAD; 2]);
        assert_eq!(buf.ghost(Edge::Bottom), &[DEAD; 2]);
    }

    #[test]
    fn test_swap_exchanges_roles() {
        let part = Partition::for_rank(3, 1, Rank(0)).unwrap();
        let mut pair = SlicePair::new(&part);
        {
            let (_, next) = pair.read_write();
            next.set(1, 1, ALIVE);
        }
        assert_eq!(pair.current().get(1, 1), DEAD);

        pair.swap();
        assert_eq!(pair.current().get(1, 1), ALIVE);
        assert_eq!(pair.next().get(1, 1), DEAD);
    }
}
