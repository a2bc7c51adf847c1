//! Panel: the registry plus automation state, driven by ticks and commands.
//!
//! This is the whole simulation as a synchronous state machine. The
//! application layer decides *when* ticks happen and serializes access; the
//! panel decides *what* a tick or a command does.

use rand::Rng;

use crate::command::Command;
use crate::error::PanelError;
use crate::randomizer::randomize;
use crate::registry::DeviceRegistry;
use crate::rule::{MotionLightsRule, RuleOutcome};
use crate::snapshot::PanelSnapshot;
use crate::time::Timestamp;

/// Devices, the motion rule and the automation switch.
#[derive(Debug, Clone)]
pub struct Panel {
    registry: DeviceRegistry,
    rule: MotionLightsRule,
    automation_enabled: bool,
    status: Option<String>,
}

impl Panel {
    /// Create a panel with automation enabled.
    #[must_use]
    pub fn new(registry: DeviceRegistry, rule: MotionLightsRule) -> Self {
        Self {
            registry,
            rule,
            automation_enabled: true,
            status: None,
        }
    }

    #[must_use]
    pub fn with_automation(mut self, enabled: bool) -> Self {
        self.automation_enabled = enabled;
        self
    }

    #[must_use]
    pub fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }

    /// Direct access to the devices, for sensors and tests that bypass
    /// commands.
    pub fn registry_mut(&mut self) -> &mut DeviceRegistry {
        &mut self.registry
    }

    #[must_use]
    pub fn rule(&self) -> &MotionLightsRule {
        &self.rule
    }

    #[must_use]
    pub fn automation_enabled(&self) -> bool {
        self.automation_enabled
    }

    /// Apply a user command.
    ///
    /// A failed command leaves the panel untouched.
    ///
    /// # Errors
    ///
    /// - [`PanelError::NotFound`] when the targeted device does not exist
    /// - [`PanelError::Unsupported`] when the device variant cannot honor
    ///   the command
    pub fn apply<R: Rng + ?Sized>(
        &mut self,
        command: &Command,
        rng: &mut R,
    ) -> Result<(), PanelError> {
        match command {
            Command::TogglePower { device_id } => {
                self.registry.require_mut(device_id)?.toggle_powered();
            }
            Command::SetBrightness { device_id, value } => {
                self.registry.require_mut(device_id)?.set_brightness(*value)?;
            }
            Command::SetTemperature { device_id, value } => {
                self.registry
                    .require_mut(device_id)?
                    .set_temperature(*value)?;
            }
            Command::TriggerMotion { device_id } => {
                self.registry.require_mut(device_id)?.detect_motion(rng)?;
            }
            Command::SetAutomationEnabled { enabled } => self.automation_enabled = *enabled,
            Command::ToggleAutomation => self.automation_enabled = !self.automation_enabled,
        }
        Ok(())
    }

    /// Run one simulation step at time `now`.
    ///
    /// With automation on, the motion rule runs first (so it sees the
    /// motion state from before this step's re-roll), then the randomizer.
    /// With automation off nothing changes and `None` is returned.
    pub fn tick<R: Rng + ?Sized>(&mut self, now: Timestamp, rng: &mut R) -> Option<RuleOutcome> {
        if !self.automation_enabled {
            return None;
        }
        let outcome = self.rule.evaluate(&mut self.registry, now);
        if let Some(status) = self.rule.describe(outcome, &self.registry) {
            self.status = Some(status);
        }
        randomize(&mut self.registry, rng);
        Some(outcome)
    }

    /// Render the current state.
    #[must_use]
    pub fn snapshot(&self) -> PanelSnapshot {
        PanelSnapshot {
            devices: self.registry.display_lines(),
            listing: self.registry.listing_lines(),
            automation_enabled: self.automation_enabled,
            automation_label: PanelSnapshot::automation_label_for(self.automation_enabled),
            status: self.status.clone(),
        }
    }
}
