//! Common types for the halolife communication layer.

use serde::{Deserialize, Serialize};

/// Identifier of one cooperating process, 0-indexed.
///
/// Ranks are dense: a world of size P has exactly ranks `0..P`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Rank(pub usize);

impl Rank {
    /// The coordinating process.
    pub const ROOT: Rank = Rank(0);

    /// Returns the rank as a plain index.
    pub fn index(self) -> usize {
        self.0
    }

    /// Returns true for the coordinating process.
    pub fn is_root(self) -> bool {
        self == Self::ROOT
    }

    /// The rank directly above this one, if any.
    pub fn above(self) -> Option<Rank> {
        self.0.checked_sub(1).map(Rank)
    }

    /// The rank directly below this one in a world of `size` ranks, if any.
    pub fn below(self, size: usize) -> Option<Rank> {
        let next = self.0 + 1;
        (next < size).then_some(Rank(next))
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rank-{}", self.0)
    }
}

/// Which collective a message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tag {
    /// Boundary row for a neighbor's ghost row
    Halo,

    /// Partial or final value of an AND-reduction
    Reduce,

    /// A rank's interior rows on their way to the root
    Gather,
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Tag::Halo => "halo",
            Tag::Reduce => "reduce",
            Tag::Gather => "gather",
        };
        f.write_str(name)
    }
}

/// One message between two ranks.
///
/// The payload is opaque bytes; the engine sends cell rows and single
/// boolean bytes through it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    /// The sending rank
    pub source: Rank,

    /// Collective this message belongs to
    pub tag: Tag,

    /// The raw bytes
    pub payload: Vec<u8>,
}

impl Envelope {
    /// Creates a new envelope.
    pub fn new(source: Rank, tag: Tag, payload: Vec<u8>) -> Self {
        Self { source, tag, payload }
    }

    /// Returns the payload size in bytes.
    pub fn size(&self) -> usize {
        self.payload.len()
    }
}
