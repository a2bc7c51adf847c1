//! Snapshot publisher port: where rendered panel state is pushed.

use std::future::Future;

use smartpanel_domain::error::PanelError;
use smartpanel_domain::snapshot::PanelSnapshot;

/// Pushes panel snapshots to the presentation layer.
pub trait SnapshotPublisher: Send + Sync {
    /// Publish a snapshot to all current listeners.
    fn publish(
        &self,
        snapshot: PanelSnapshot,
    ) -> impl Future<Output = Result<(), PanelError>> + Send;
}

impl<T: SnapshotPublisher> SnapshotPublisher for std::sync::Arc<T> {
    fn publish(
        &self,
        snapshot: PanelSnapshot,
    ) -> impl Future<Output = Result<(), PanelError>> + Send {
        (**self).publish(snapshot)
    }
}
