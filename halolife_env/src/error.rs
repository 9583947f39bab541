//! Error types for the halolife communication layer.

use crate::types::{Rank, Tag};
use thiserror::Error;

/// Errors that can occur while talking to other ranks.
///
/// None of these are recoverable: a lockstep computation with a missing or
/// misbehaving peer has no meaningful way forward.
#[derive(Debug, Error)]
pub enum CommError {
    /// The peer's end of the channel is gone (task exited or panicked)
    #[error("Peer disconnected: {0}")]
    PeerDisconnected(Rank),

    /// Addressed a rank that does not exist, or ourselves
    #[error("Invalid rank {rank} in a world of size {size}")]
    InvalidRank { rank: Rank, size: usize },

    /// A message arrived for a different collective than the one in progress
    #[error("Protocol error: expected {expected} message from {from}, got {actual}")]
    Protocol { from: Rank, expected: Tag, actual: Tag },

    /// Payload did not have the agreed size
    #[error("Length mismatch from {from}: expected {expected} bytes, got {actual}")]
    LengthMismatch { from: Rank, expected: usize, actual: usize },

    /// Gather tables missing or inconsistent with the world size
    #[error("Invalid gather layout: {0}")]
    InvalidLayout(String),
}

impl CommError {
    /// Creates a layout error.
    pub fn layout(msg: impl Into<String>) -> Self {
        Self::InvalidLayout(msg.into())
    }

    /// Creates an invalid-rank error.
    pub fn invalid_rank(rank: Rank, size: usize) -> Self {
        Self::InvalidRank { rank, size }
    }
}
