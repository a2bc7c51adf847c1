//! Command: user input coming from the panel controls.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::DeviceId;

/// A manual override issued by the user.
///
/// Values are not validated here: out-of-range numbers are clamped when
/// applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Flip the on/off flag of a device.
    TogglePower { device_id: DeviceId },
    /// Move a light's brightness slider.
    SetBrightness { device_id: DeviceId, value: i64 },
    /// Move a thermostat's temperature slider.
    SetTemperature { device_id: DeviceId, value: i64 },
    /// Press a camera's "Detect Motion" button.
    TriggerMotion { device_id: DeviceId },
    /// Turn automation on or off.
    SetAutomationEnabled { enabled: bool },
    /// Flip automation, like the panel's single automation button.
    ToggleAutomation,
}

impl Command {
    /// The device this command targets, if any.
    #[must_use]
    pub fn device_id(&self) -> Option<&DeviceId> {
        match self {
            Self::TogglePower { device_id }
            | Self::SetBrightness { device_id, .. }
            | Self::SetTemperature { device_id, .. }
            | Self::TriggerMotion { device_id } => Some(device_id),
            Self::SetAutomationEnabled { .. } | Self::ToggleAutomation => None,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TogglePower { device_id } => write!(f, "toggle_power({device_id})"),
            Self::SetBrightness { device_id, value } => {
                write!(f, "set_brightness({device_id}, {value})")
            }
            Self::SetTemperature { device_id, value } => {
                write!(f, "set_temperature({device_id}, {value})")
            }
            Self::TriggerMotion { device_id } => write!(f, "trigger_motion({device_id})"),
            Self::SetAutomationEnabled { enabled } => {
                write!(f, "set_automation_enabled({enabled})")
            }
            Self::ToggleAutomation => f.write_str("toggle_automation"),
        }
    }
}
