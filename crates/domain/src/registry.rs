//! Device registry: the ordered set of devices the panel shows.
//!
//! Insertion order is display order. Ids are unique; lookups are linear,
//! which is fine for a desk toy with a handful of devices.

use crate::device::{Device, DeviceType};
use crate::error::{PanelError, UnknownDeviceError, ValidationError};
use crate::id::DeviceId;

/// Ordered collection of devices with unique ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceRegistry {
    devices: Vec<Device>,
}

impl DeviceRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from devices in display order.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Validation`] on a blank or duplicate id.
    pub fn from_devices(devices: impl IntoIterator<Item = Device>) -> Result<Self, PanelError> {
        let mut registry = Self::new();
        for device in devices {
            registry.insert(device)?;
        }
        Ok(registry)
    }

    /// Append a device at the end of the display order.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Validation`] when:
    /// - the id is blank ([`ValidationError::EmptyId`])
    /// - the id is already registered ([`ValidationError::DuplicateId`])
    pub fn insert(&mut self, device: Device) -> Result<(), PanelError> {
        if device.id().is_blank() {
            return Err(ValidationError::EmptyId.into());
        }
        if self.get(device.id()).is_some() {
            return Err(ValidationError::DuplicateId(device.id().clone()).into());
        }
        self.devices.push(device);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: &DeviceId) -> Option<&Device> {
        self.devices.iter().find(|d| d.id() == id)
    }

    pub fn get_mut(&mut self, id: &DeviceId) -> Option<&mut Device> {
        self.devices.iter_mut().find(|d| d.id() == id)
    }

    /// Mutable lookup that reports unknown ids as an error.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::NotFound`] when no device has `id`.
    pub fn require_mut(&mut self, id: &DeviceId) -> Result<&mut Device, PanelError> {
        self.get_mut(id)
            .ok_or_else(|| UnknownDeviceError { id: id.clone() }.into())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Device> {
        self.devices.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Device> {
        self.devices.iter_mut()
    }

    /// Devices of the given type, in display order.
    pub fn of_type(&self, device_type: DeviceType) -> impl Iterator<Item = &Device> {
        self.devices
            .iter()
            .filter(move |d| d.device_type() == device_type)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Whether any camera currently reports motion. `false` without cameras.
    #[must_use]
    pub fn any_motion(&self) -> bool {
        self.devices.iter().any(Device::reports_motion)
    }

    /// Force every light on or off.
    pub fn set_lights_powered(&mut self, powered: bool) {
        self.devices
            .iter_mut()
            .filter(|d| d.device_type() == DeviceType::Light)
            .for_each(|d| d.set_powered(powered));
    }

    /// Display line of every device, in display order.
    #[must_use]
    pub fn display_lines(&self) -> Vec<String> {
        self.devices.iter().map(Device::display_line).collect()
    }

    /// Listing entry of every device, in display order.
    #[must_use]
    pub fn listing_lines(&self) -> Vec<String> {
        self.devices.iter().map(Device::listing_line).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DeviceRegistry {
        DeviceRegistry::from_devices([
            Device::light("L1"),
            Device::thermostat("T1"),
            Device::camera("C1"),
            Device::light("L2"),
        ])
        .unwrap()
    }

    #[test]
    fn should_preserve_insertion_order() {
        let registry = sample();
        let ids: Vec<&str> = registry.iter().map(|d| d.id().as_str()).collect();
        assert_eq!(ids, ["L1", "T1", "C1", "L2"]);
    }

    #[test]
    fn should_reject_duplicate_id() {
        let mut registry = sample();
        let result = registry.insert(Device::camera("L1"));
        assert!(matches!(
            result,
            Err(PanelError::Validation(ValidationError::DuplicateId(_)))
        ));
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn should_reject_blank_id() {
        let mut registry = DeviceRegistry::new();
        let result = registry.insert(Device::light(" "));
        assert!(matches!(
            result,
            Err(PanelError::Validation(ValidationError::EmptyId))
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn should_report_unknown_id_on_require_mut() {
        let mut registry = sample();
        let result = registry.require_mut(&DeviceId::new("nope"));
        assert!(matches!(result, Err(PanelError::NotFound(_))));
    }

    #[test]
    fn should_detect_motion_from_any_camera() {
        let mut registry = DeviceRegistry::from_devices([
            Device::camera("C1"),
            Device::camera("C2"),
            Device::light("L1"),
        ])
        .unwrap();
        assert!(!registry.any_motion());

        registry
            .require_mut(&DeviceId::new("C2"))
            .unwrap()
            .set_motion_detected(true)
            .unwrap();
        assert!(registry.any_motion());
    }

    #[test]
    fn should_report_no_motion_without_cameras() {
        let registry = DeviceRegistry::from_devices([Device::light("L1")]).unwrap();
        assert!(!registry.any_motion());
    }

    #[test]
    fn should_power_only_lights() {
        let mut registry = sample();
        registry.set_lights_powered(true);

        let powered: Vec<&str> = registry
            .iter()
            .filter(|d| d.is_powered())
            .map(|d| d.id().as_str())
            .collect();
        assert_eq!(powered, ["L1", "L2"]);
    }

    #[test]
    fn should_filter_by_type() {
        let registry = sample();
        assert_eq!(registry.of_type(DeviceType::Light).count(), 2);
        assert_eq!(registry.of_type(DeviceType::Camera).count(), 1);
    }

    #[test]
    fn should_render_lines_in_order() {
        let registry = sample();
        assert_eq!(
            registry.display_lines(),
            ["L1 - OFF", "T1 - OFF", "C1 - OFF", "L2 - OFF"]
        );
        assert_eq!(
            registry.listing_lines()[1],
            "T1: Thermostat Status: Off"
        );
    }
}
