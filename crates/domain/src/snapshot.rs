//! Snapshot: the read-only view pushed to the presentation layer.

use serde::{Deserialize, Serialize};

/// Everything the panel renders after a tick.
///
/// Contains only derived text and flags, so two snapshots of the same state
/// compare (and serialize) identically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelSnapshot {
    /// One label per device, in registry order.
    pub devices: Vec<String>,
    /// One listing entry per device, in registry order.
    pub listing: Vec<String>,
    pub automation_enabled: bool,
    /// Caption of the automation button.
    pub automation_label: String,
    /// Last decision of the motion rule that changed the lights.
    pub status: Option<String>,
}

impl PanelSnapshot {
    /// Caption for the automation button.
    #[must_use]
    pub fn automation_label_for(enabled: bool) -> String {
        format!("Random automation: {}", if enabled { "ON" } else { "OFF" })
    }
}
