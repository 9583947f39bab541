//! Communicator abstraction for halolife ranks.

use crate::error::CommError;
use crate::types::Rank;
use async_trait::async_trait;

/// Receive-side layout for a variable-count gather at the root.
///
/// `counts[r]` bytes from rank `r` land at `buffer[displacements[r]..]`.
#[derive(Debug)]
pub struct GatherTarget<'a> {
    /// Destination for every rank's contribution
    pub buffer: &'a mut [u8],

    /// Expected contribution size per rank
    pub counts: &'a [usize],

    /// Offset of each rank's contribution within `buffer`
    pub displacements: &'a [usize],
}

impl GatherTarget<'_> {
    /// Checks the tables against the world size and the buffer length.
    pub fn validate(&self, size: usize) -> Result<(), CommError> {
        if self.counts.len() != size || self.displacements.len() != size {
            return Err(CommError::layout(format!(
                "expected {} entries, got {} counts and {} displacements",
                size,
                self.counts.len(),
                self.displacements.len()
            )));
        }

        for (rank, (&count, &offset)) in self.counts.iter().zip(self.displacements).enumerate() {
            if offset + count > self.buffer.len() {
                return Err(CommError::layout(format!(
                    "{} would write {}..{} past buffer of {} bytes",
                    Rank(rank),
                    offset,
                    offset + count,
                    self.buffer.len()
                )));
            }
        }

        Ok(())
    }
}

/// Message-passing interface between ranks.
///
/// # Implementations
///
/// - **In-process**: `LocalCommunicator` - one tokio channel per ordered rank pair
///
/// # Blocking
///
/// Every method suspends the caller until the partners it depends on have
/// reciprocated. There is no timeout: a stalled peer stalls the caller, and
/// a vanished peer is reported as `CommError::PeerDisconnected`.
///
/// ```text
/// rank r                                   rank r+1
///   |-- send_recv(r+1, last interior) -------->|
///   |<-------- send_recv(r, first interior) ---|
///   |  (bottom ghost filled)    (top ghost filled)
/// ```
#[async_trait]
pub trait Communicator: Send + Sync + 'static {
    /// This process's rank.
    fn rank(&self) -> Rank;

    /// Number of ranks in the world.
    fn size(&self) -> usize;

    /// Sends `outgoing` to `peer` and receives the peer's row into `incoming`
    /// as one combined operation.
    ///
    /// Both neighbors may call this in any order without deadlocking.
    ///
    /// # Errors
    /// * `CommError::InvalidRank` - `peer` is out of range or is this rank
    /// * `CommError::LengthMismatch` - the peer sent a different number of bytes
    /// * `CommError::PeerDisconnected` - the peer is gone
    async fn send_recv(
        &self,
        peer: Rank,
        outgoing: &[u8],
        incoming: &mut [u8],
    ) -> Result<(), CommError>;

    /// Logical AND of `local` across every rank. All ranks get the same answer.
    async fn all_reduce_and(&self, local: bool) -> Result<bool, CommError>;

    /// Collects every rank's `outgoing` bytes at `root`.
    ///
    /// The root must pass `Some(target)`; every other rank only acts as a
    /// sender and its `target` is ignored.
    async fn gather_varying(
        &self,
        root: Rank,
        outgoing: &[u8],
        target: Option<GatherTarget<'_>>,
    ) -> Result<(), CommError>;

    /// Returns true if this rank is the coordinating process.
    fn is_root(&self) -> bool {
        self.rank().is_root()
    }
}
