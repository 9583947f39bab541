//! halolife Environment Abstraction Layer
//!
//! This crate provides the communication seam between the halolife engine
//! and whatever actually moves bytes between ranks.
//!
//! # Core Concept: Blocking Collectives
//!
//! Every cross-rank operation the engine performs is one of three:
//! - **Halo exchange**: a combined send-and-receive with one neighbor
//! - **Reduction**: a logical AND across every rank
//! - **Gather**: variable-sized contributions collected at the root
//!
//! Each of them suspends the calling rank until its partners have
//! reciprocated. That suspension is the only synchronization the engine
//! relies on; there is no explicit barrier.
//!
//! # Example
//!
//! ```ignore
//! use halolife_env::{Communicator, LocalWorld, Rank};
//!
//! let ranks = LocalWorld::new(2);
//! // each communicator is moved into its own task
//! let mut ghost = vec![0u8; 8];
//! comm.send_recv(Rank(1), &boundary_row, &mut ghost).await?;
//! let stable = comm.all_reduce_and(local_stable).await?;
//! ```

mod communicator;
mod context;
mod error;
mod local_impl;
mod types;

pub use communicator::{Communicator, GatherTarget};
pub use context::{ProcessContext, SystemContext};
pub use error::CommError;
pub use local_impl::{LocalCommunicator, LocalWorld};
pub use types::{Envelope, Rank, Tag};
