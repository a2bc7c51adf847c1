//! Shared application state for axum handlers.

use std::sync::Arc;

use tokio::sync::watch;

use smartpanel_app::panel_actor::PanelHandle;
use smartpanel_app::snapshot_bus::SnapshotBus;

/// Application state shared across all axum handlers.
///
/// Every field is cheap to clone: the handle is a channel sender, the bus
/// sits behind an `Arc` and the shutdown flag is a watch receiver.
#[derive(Clone)]
pub struct AppState {
    /// Access to the panel actor.
    pub panel: PanelHandle,
    /// Snapshot fan-out, for streaming subscribers.
    pub snapshots: Arc<SnapshotBus>,
    /// Flips to `true` when the server is shutting down. Long-lived
    /// responses end when it does.
    pub shutdown: watch::Receiver<bool>,
}

impl AppState {
    /// State without a shutdown signal: streams only end when the client
    /// disconnects.
    #[must_use]
    pub fn new(panel: PanelHandle, snapshots: Arc<SnapshotBus>) -> Self {
        let (_, shutdown) = watch::channel(false);
        Self {
            panel,
            snapshots,
            shutdown,
        }
    }

    #[must_use]
    pub fn with_shutdown(mut self, shutdown: watch::Receiver<bool>) -> Self {
        self.shutdown = shutdown;
        self
    }
}
