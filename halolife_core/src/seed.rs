//! Initial board contents.

use crate::grid::{ALIVE, DEAD};
use crate::partition::Partition;
use crate::slice::SliceBuffer;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Base seed used when none is given.
pub const DEFAULT_SEED: u64 = 12345;

/// How each rank fills its interior rows before the first generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SeedStrategy {
    /// One generator per rank seeded with `base + rank`.
    ///
    /// The board depends on the process count: the same size run with a
    /// different number of ranks starts from a different board.
    PerRank { base: u64 },

    /// One generator per global row seeded with `base + row`; the board is
    /// the same for any process count.
    PerRow { base: u64 },

    /// Everything dead.
    Empty,
}

impl Default for SeedStrategy {
    fn default() -> Self {
        Self::PerRank { base: DEFAULT_SEED }
    }
}

impl SeedStrategy {
    /// Short name for logs and reports.
    pub fn name(&self) -> &'static str {
        match self {
            SeedStrategy::PerRank { .. } => "per_rank",
            SeedStrategy::PerRow { .. } => "per_row",
            SeedStrategy::Empty => "empty",
        }
    }

    /// Fills the interior rows of `slice`; ghost rows are left alone.
    pub fn fill(&self, partition: &Partition, slice: &mut SliceBuffer) {
        match *self {
            SeedStrategy::PerRank { base } => {
                let seed = base.wrapping_add(partition.rank.index() as u64);
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                for local in 1..=slice.interior_rows() {
                    fill_row(&mut rng, slice.row_mut(local));
                }
            }
            SeedStrategy::PerRow { base } => {
                for (local, global) in partition.global_rows().enumerate() {
                    let mut rng = ChaCha8Rng::seed_from_u64(base.wrapping_add(global as u64));
                    fill_row(&mut rng, slice.row_mut(local + 1));
                }
            }
            SeedStrategy::Empty => {
                for local in 1..=slice.interior_rows() {
                    slice.row_mut(local).fill(DEAD);
                }
            }
        }
    }
}

fn fill_row(rng: &mut ChaCha8Rng, row: &mut [u8]) {
    for cell in row {
        *cell = if rng.gen::<bool>() { ALIVE } else { DEAD };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slice::Edge;
    use halolife_env::Rank;

    fn seeded(strategy: SeedStrategy, n: usize, procs: usize) -> Vec<u8> {
        Partition::all(n, procs)
            .unwrap()
            .iter()
            .flat_map(|part| {
                let mut slice = SliceBuffer::new(part);
                strategy.fill(part, &mut slice);
                assert!(slice.ghost(Edge::Top).iter().all(|&c| c == DEAD));
                assert!(slice.ghost(Edge::Bottom).iter().all(|&c| c == DEAD));
                slice.interior().to_vec()
            })
            .collect()
    }

    #[test]
    fn test_per_row_is_independent_of_process_count() {
        let strategy = SeedStrategy::PerRow { base: 99 };
        let single = seeded(strategy, 24, 1);
        assert_eq!(single, seeded(strategy, 24, 3));
        assert_eq!(single, seeded(strategy, 24, 5));
    }

    #[test]
    fn test_per_rank_depends_on_process_count() {
        let strategy = SeedStrategy::PerRank { base: DEFAULT_SEED };
        assert_eq!(seeded(strategy, 32, 4), seeded(strategy, 32, 4));
        assert_ne!(seeded(strategy, 32, 1), seeded(strategy, 32, 4));
    }

    #[test]
    fn test_per_rank_first_rank_matches_single_process_prefix() {
        // rank 0 uses the same seed regardless of P, so its rows match the
        // first rows of a single-process fill
        let strategy = SeedStrategy::default();
        let single = seeded(strategy, 16, 1);
        let part = Partition::for_rank(16, 4, Rank(0)).unwrap();
        let mut slice = SliceBuffer::new(&part);
        strategy.fill(&part, &mut slice);
        assert_eq!(slice.interior(), &single[..part.interior_len()]);
    }

    #[test]
    fn test_empty_and_density() {
        assert!(seeded(SeedStrategy::Empty, 8, 2).iter().all(|&c| c == DEAD));

        let cells = seeded(SeedStrategy::default(), 64, 1);
        let alive = cells.iter().filter(|&&c| c == ALIVE).count();
        // fair coin over 4096 cells
        assert!(alive > 1700 && alive < 2400, "alive = {alive}");
    }
}
