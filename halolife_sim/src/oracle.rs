//! Sequential reference implementation.
//!
//! The Oracle keeps the whole board in one place and steps it the obvious
//! way. Distributed runs are checked against it: whatever the partitioning,
//! the final board must match.

use halolife_core::{Grid, RunSummary};

/// Whole-board Game of Life with dead cells beyond every edge.
#[derive(Debug, Clone)]
pub struct SequentialLife {
    grid: Grid,
    generation: u64,
}

impl SequentialLife {
    /// Starts from `grid` at generation 0.
    pub fn new(grid: Grid) -> Self {
        Self { grid, generation: 0 }
    }

    /// The current board.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Generations stepped so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Advances one generation. Returns true if any cell changed.
    pub fn step(&mut self) -> bool {
        let n = self.grid.size();
        let mut next = Grid::new(n);

        for row in 0..n {
            for col in 0..n {
                let mut neighbors = 0;
                for dr in -1i64..=1 {
                    for dc in -1i64..=1 {
                        if dr == 0 && dc == 0 {
                            continue;
                        }
                        let r = row as i64 + dr;
                        let c = col as i64 + dc;
                        if r >= 0 && r < n as i64 && c >= 0 && c < n as i64 && self.grid.is_alive(r as usize, c as usize) {
                            neighbors += 1;
                        }
                    }
                }

                let alive = self.grid.is_alive(row, col);
                next.set(row, col, neighbors == 3 || (alive && neighbors == 2));
            }
        }

        let changed = next != self.grid;
        self.grid = next;
        self.generation += 1;
        changed
    }

    /// Steps exactly `generations` times regardless of stability.
    pub fn advance_by(&mut self, generations: u64) {
        for _ in 0..generations {
            self.step();
        }
    }

    /// Steps until `max_generations` or until a step changes nothing.
    pub fn run(&mut self, max_generations: u64) -> RunSummary {
        let mut converged = false;
        while self.generation < max_generations && !converged {
            converged = !self.step();
        }
        RunSummary {
            generations: self.generation,
            converged,
        }
    }
}
