//! In-process implementation of `Communicator` using tokio channels.

use crate::communicator::{Communicator, GatherTarget};
use crate::error::CommError;
use crate::types::{Envelope, Rank, Tag};
use async_trait::async_trait;
use tokio::sync::{mpsc, Mutex};

/// A set of connected ranks living in one OS process.
///
/// Every ordered pair of ranks gets its own unbounded FIFO channel, so
/// messages between two ranks never overtake each other and a send never
/// waits for the receiver. Waiting happens only on the receive side, which
/// is what gives the collectives their blocking semantics.
pub struct LocalWorld {
    communicators: Vec<LocalCommunicator>,
}

impl LocalWorld {
    /// Creates `size` fully connected communicators, indexed by rank.
    pub fn new(size: usize) -> Self {
        let mut outboxes: Vec<Vec<Option<mpsc::UnboundedSender<Envelope>>>> =
            (0..size).map(|_| (0..size).map(|_| None).collect()).collect();
        let mut inboxes: Vec<Vec<Option<Mutex<mpsc::UnboundedReceiver<Envelope>>>>> =
            (0..size).map(|_| (0..size).map(|_| None).collect()).collect();

        for source in 0..size {
            for dest in 0..size {
                if source == dest {
                    continue;
                }
                let (tx, rx) = mpsc::unbounded_channel();
                outboxes[source][dest] = Some(tx);
                inboxes[dest][source] = Some(Mutex::new(rx));
            }
        }

        let communicators = outboxes
            .into_iter()
            .zip(inboxes)
            .enumerate()
            .map(|(rank, (outboxes, inboxes))| LocalCommunicator {
                rank: Rank(rank),
                size,
                outboxes,
                inboxes,
            })
            .collect();

        Self { communicators }
    }

    /// Hands out the communicators, rank 0 first.
    pub fn into_communicators(self) -> Vec<LocalCommunicator> {
        self.communicators
    }
}

impl IntoIterator for LocalWorld {
    type Item = LocalCommunicator;
    type IntoIter = std::vec::IntoIter<LocalCommunicator>;

    fn into_iter(self) -> Self::IntoIter {
        self.communicators.into_iter()
    }
}

/// One rank's endpoint in a `LocalWorld`.
pub struct LocalCommunicator {
    /// This rank
    rank: Rank,

    /// World size
    size: usize,

    /// Senders indexed by destination rank (`None` at our own index)
    outboxes: Vec<Option<mpsc::UnboundedSender<Envelope>>>,

    /// Receivers indexed by source rank (`None` at our own index)
    inboxes: Vec<Option<Mutex<mpsc::UnboundedReceiver<Envelope>>>>,
}

impl LocalCommunicator {
    fn check_peer(&self, peer: Rank) -> Result<(), CommError> {
        if peer.index() >= self.size || peer == self.rank {
            return Err(CommError::invalid_rank(peer, self.size));
        }
        Ok(())
    }

    fn post(&self, to: Rank, tag: Tag, payload: Vec<u8>) -> Result<(), CommError> {
        let tx = self
            .outboxes
            .get(to.index())
            .and_then(Option::as_ref)
            .ok_or_else(|| CommError::invalid_rank(to, self.size))?;

        tx.send(Envelope::new(self.rank, tag, payload))
            .map_err(|_| CommError::PeerDisconnected(to))
    }

    async fn take(&self, from: Rank, expected: Tag) -> Result<Envelope, CommError> {
        let inbox = self
            .inboxes
            .get(from.index())
            .and_then(Option::as_ref)
            .ok_or_else(|| CommError::invalid_rank(from, self.size))?;

        let envelope = {
            let mut rx = inbox.lock().await;
            rx.recv().await.ok_or(CommError::PeerDisconnected(from))?
        };

        if envelope.tag != expected {
            return Err(CommError::Protocol {
                from,
                expected,
                actual: envelope.tag,
            });
        }

        Ok(envelope)
    }

    async fn take_flag(&self, from: Rank) -> Result<bool, CommError> {
        let envelope = self.take(from, Tag::Reduce).await?;
        match envelope.payload.as_slice() {
            [flag] => Ok(*flag != 0),
            other => Err(CommError::LengthMismatch {
                from,
                expected: 1,
                actual: other.len(),
            }),
        }
    }
}

#[async_trait]
impl Communicator for LocalCommunicator {
    fn rank(&self) -> Rank {
        self.rank
    }

    fn size(&self) -> usize {
        self.size
    }

    async fn send_recv(
        &self,
        peer: Rank,
        outgoing: &[u8],
        incoming: &mut [u8],
    ) -> Result<(), CommError> {
        self.check_peer(peer)?;

        self.post(peer, Tag::Halo, outgoing.to_vec())?;
        let envelope = self.take(peer, Tag::Halo).await?;

        if envelope.size() != incoming.len() {
            return Err(CommError::LengthMismatch {
                from: peer,
                expected: incoming.len(),
                actual: envelope.size(),
            });
        }
        incoming.copy_from_slice(&envelope.payload);
        Ok(())
    }

    async fn all_reduce_and(&self, local: bool) -> Result<bool, CommError> {
        if self.size == 1 {
            return Ok(local);
        }

        // Reduce at the root, then fan the result back out.
        if self.rank.is_root() {
            let mut all = local;
            for peer in 1..self.size {
                all &= self.take_flag(Rank(peer)).await?;
            }
            for peer in 1..self.size {
                self.post(Rank(peer), Tag::Reduce, vec![all as u8])?;
            }
            Ok(all)
        } else {
            self.post(Rank::ROOT, Tag::Reduce, vec![local as u8])?;
            self.take_flag(Rank::ROOT).await
        }
    }

    async fn gather_varying(
        &self,
        root: Rank,
        outgoing: &[u8],
        target: Option<GatherTarget<'_>>,
    ) -> Result<(), CommError> {
        if root.index() >= self.size {
            return Err(CommError::invalid_rank(root, self.size));
        }

        if self.rank != root {
            return self.post(root, Tag::Gather, outgoing.to_vec());
        }

        let target = target
            .ok_or_else(|| CommError::layout("root called gather without a receive target"))?;
        target.validate(self.size)?;
        let GatherTarget {
            buffer,
            counts,
            displacements,
        } = target;

        for source in 0..self.size {
            let (count, offset) = (counts[source], displacements[source]);
            let payload = if source == root.index() {
                outgoing.to_vec()
            } else {
                self.take(Rank(source), Tag::Gather).await?.payload
            };

            if payload.len() != count {
                return Err(CommError::LengthMismatch {
                    from: Rank(source),
                    expected: count,
                    actual: payload.len(),
                });
            }
            buffer[offset..offset + count].copy_from_slice(&payload);
        }

        Ok(())
    }
}
