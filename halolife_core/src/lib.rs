//! halolife Core - Row-Partitioned Distributed Game of Life
//!
//! An N×N board is split into contiguous row bands, one per rank. Every
//! generation each rank:
//! 1. **Halo exchange**: refreshes its two ghost rows from its row neighbors
//! 2. **Step**: applies B3/S23 to its interior rows into the `next` buffer
//! 3. **Convergence**: ANDs "nothing changed here" across every rank
//! 4. **Swap**: `next` becomes `current`
//!
//! After the loop the root gathers all interior rows into one `Grid`.

pub mod context;
pub mod convergence;
pub mod engine;
pub mod error;
pub mod gather;
pub mod grid;
pub mod halo;
pub mod partition;
pub mod seed;
pub mod slice;
pub mod step;

// Re-export key types for convenience
pub use context::ExecutionContext;
pub use engine::{RankEngine, RoundOutcome, RunSummary};
pub use error::{EngineError, GridError, PartitionError};
pub use grid::{Cell, Grid, ALIVE, DEAD};
pub use partition::Partition;
pub use seed::SeedStrategy;
pub use slice::{SliceBuffer, SlicePair};
