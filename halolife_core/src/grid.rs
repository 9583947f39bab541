//! The assembled N×N board.

use crate::error::GridError;
use std::io::{self, Write};

/// A cell state. Kept as a byte so rows can go on the wire unchanged.
pub type Cell = u8;

/// Live cell.
pub const ALIVE: Cell = 1;

/// Dead cell.
pub const DEAD: Cell = 0;

/// A full square board stored row-major.
///
/// Only ever materialized at the root after a gather, or by callers that
/// build an initial board to scatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// All-dead board of `size`×`size`.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![DEAD; size * size],
        }
    }

    /// Wraps an existing row-major cell vector.
    ///
    /// Every byte must be `DEAD` or `ALIVE`; the neighbor count adds raw
    /// cell values.
    pub fn from_cells(size: usize, cells: Vec<Cell>) -> Result<Self, GridError> {
        if size == 0 {
            return Err(GridError::Empty);
        }
        if cells.len() != size * size {
            return Err(GridError::CellCount {
                expected: size * size,
                actual: cells.len(),
            });
        }
        if let Some((index, &value)) = cells
            .iter()
            .enumerate()
            .find(|(_, c)| **c != DEAD && **c != ALIVE)
        {
            return Err(GridError::BadCell { index, value });
        }
        Ok(Self { size, cells })
    }

    /// Builds a board from explicit rows; must be square.
    pub fn from_rows(rows: &[Vec<Cell>]) -> Result<Self, GridError> {
        let size = rows.len();
        if size == 0 {
            return Err(GridError::Empty);
        }

        let mut cells = Vec::with_capacity(size * size);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != size {
                return Err(GridError::RaggedRow {
                    row,
                    expected: size,
                    actual: values.len(),
                });
            }
            cells.extend(values.iter().map(|&v| if v != DEAD { ALIVE } else { DEAD }));
        }

        Ok(Self { size, cells })
    }

    /// Parses a text pattern: `*` or `O` alive, `.` dead, one row per line.
    ///
    /// Blank lines and spaces between cells are ignored, so the output of
    /// `render` parses back.
    pub fn from_pattern(pattern: &str) -> Result<Self, GridError> {
        let rows = pattern
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                line.chars()
                    .filter(|c| !c.is_whitespace())
                    .map(|c| match c {
                        '*' | 'O' => Ok(ALIVE),
                        '.' => Ok(DEAD),
                        other => Err(GridError::BadCharacter(other)),
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_rows(&rows)
    }

    /// Board width and height.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Cell at (row, col). Panics when out of range, like slice indexing.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.size + col]
    }

    /// Returns true if the cell at (row, col) is alive.
    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.get(row, col) == ALIVE
    }

    /// Sets the cell at (row, col).
    pub fn set(&mut self, row: usize, col: usize, alive: bool) {
        self.cells[row * self.size + col] = if alive { ALIVE } else { DEAD };
    }

    /// One full row.
    pub fn row(&self, row: usize) -> &[Cell] {
        &self.cells[row * self.size..(row + 1) * self.size]
    }

    /// Rows `start..end` as one contiguous slice.
    pub fn rows(&self, start: usize, end: usize) -> &[Cell] {
        &self.cells[start * self.size..end * self.size]
    }

    /// The whole board, row-major.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&c| c == ALIVE).count()
    }

    /// Writes the text rendering: one line per row, `*`/`.` separated by
    /// single spaces.
    ///
    /// Lines carry no trailing space after the last cell.
    pub fn write_text<W: Write>(&self, mut out: W) -> io::Result<()> {
        let mut line = Vec::with_capacity(self.size * 2);
        for r in 0..self.size {
            line.clear();
            for (c, &cell) in self.row(r).iter().enumerate() {
                if c > 0 {
                    line.push(b' ');
                }
                line.push(if cell == ALIVE { b'*' } else { b'.' });
            }
            line.push(b'\n');
            out.write_all(&line)?;
        }
        out.flush()
    }

    /// The `write_text` rendering as a string.
    pub fn render(&self) -> String {
        let mut buf = Vec::with_capacity(self.cells.len() * 2);
        // writing into a Vec cannot fail
        let _ = self.write_text(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}
