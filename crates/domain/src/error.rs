//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`PanelError`]
//! via `#[from]`. Nothing here is fatal: the panel keeps running and the
//! offending command is simply ignored.

use crate::device::DeviceType;
use crate::id::DeviceId;

/// Top-level error for panel operations.
#[derive(Debug, thiserror::Error)]
pub enum PanelError {
    /// A device or registry invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A command referenced a device id that is not registered.
    #[error("device not found")]
    NotFound(#[from] UnknownDeviceError),

    /// A command does not apply to the targeted device variant.
    #[error("unsupported command")]
    Unsupported(#[from] UnsupportedCommandError),

    /// The panel actor is no longer running.
    #[error("panel is closed")]
    Closed,
}

/// Invariant violations detected while building a registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("device id must not be empty")]
    EmptyId,

    #[error("device id {0} is already registered")]
    DuplicateId(DeviceId),
}

/// A command referenced an id the registry does not know.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no device with id {id}")]
pub struct UnknownDeviceError {
    pub id: DeviceId,
}

/// A command was sent to a device that cannot honor it, such as a
/// brightness change aimed at a camera.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{command} is not supported by {device_type} {id}")]
pub struct UnsupportedCommandError {
    pub id: DeviceId,
    pub device_type: DeviceType,
    pub command: &'static str,
}
