//! In-process snapshot bus backed by a tokio broadcast channel.

use std::future::Future;

use tokio::sync::broadcast;

use smartpanel_domain::error::PanelError;
use smartpanel_domain::snapshot::PanelSnapshot;

use crate::ports::SnapshotPublisher;

/// Fan-out of panel snapshots to any number of presentation adapters.
///
/// Publishing succeeds even when there are no active subscribers
/// (the snapshot is simply dropped). Slow subscribers lag and skip
/// snapshots rather than slowing the simulation down.
pub struct SnapshotBus {
    sender: broadcast::Sender<PanelSnapshot>,
}

impl SnapshotBus {
    /// Create a new bus with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to snapshots on this bus.
    ///
    /// Returns a receiver that will get all snapshots published *after*
    /// the subscription is created.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<PanelSnapshot> {
        self.sender.subscribe()
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl SnapshotPublisher for SnapshotBus {
    fn publish(
        &self,
        snapshot: PanelSnapshot,
    ) -> impl Future<Output = Result<(), PanelError>> + Send {
        // send only fails without receivers, which is fine
        let _ = self.sender.send(snapshot);
        async { Ok(()) }
    }
}
