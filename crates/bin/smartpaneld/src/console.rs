//! Console panel: renders published snapshots into the log.

use smartpanel_domain::snapshot::PanelSnapshot;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;

/// Remembers what was last shown so the status is only logged on change.
#[derive(Debug, Default)]
struct ConsoleView {
    status: Option<String>,
}

impl ConsoleView {
    /// Record `snapshot` and return its status if it differs from the
    /// previous one.
    fn status_change<'a>(&mut self, snapshot: &'a PanelSnapshot) -> Option<&'a str> {
        if snapshot.status == self.status {
            return None;
        }
        self.status.clone_from(&snapshot.status);
        snapshot.status.as_deref()
    }
}

/// Spawn a task logging every snapshot received on `rx` until the bus
/// goes away.
pub fn spawn(mut rx: broadcast::Receiver<PanelSnapshot>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut view = ConsoleView::default();
        loop {
            match rx.recv().await {
                Ok(snapshot) => {
                    for line in &snapshot.devices {
                        tracing::debug!(target: "smartpaneld::console", "{line}");
                    }
                    if let Some(status) = view.status_change(&snapshot) {
                        tracing::info!(target: "smartpaneld::console", automation = %snapshot.automation_label, "{status}");
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "console fell behind, some snapshots were dropped");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}
