//! Device: a virtual light, thermostat, or security camera.
//!
//! Every device has an immutable id, an on/off flag, and exactly one
//! variant-specific attribute held in [`DeviceKind`]. Manual setters clamp
//! to the ranges of the panel controls.

use std::fmt;
use std::ops::RangeInclusive;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{PanelError, UnsupportedCommandError};
use crate::id::DeviceId;

/// Accepted brightness range, in percent.
pub const BRIGHTNESS_RANGE: RangeInclusive<u8> = 0..=100;

/// Accepted manual temperature range, in degrees Celsius.
pub const TEMPERATURE_RANGE: RangeInclusive<i8> = 10..=30;

/// Temperature a freshly created thermostat reports.
pub const DEFAULT_TEMPERATURE: i8 = 20;

/// The device variants, without their attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceType {
    Light,
    Thermostat,
    Camera,
}

impl DeviceType {
    /// Name shown in the registry listing.
    #[must_use]
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Light => "SmartLight",
            Self::Thermostat => "Thermostat",
            Self::Camera => "SecurityCamera",
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

/// The variant-specific attribute of a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DeviceKind {
    Light { brightness: u8 },
    Thermostat { temperature: i8 },
    Camera { motion_detected: bool },
}

impl DeviceKind {
    /// Default attribute for a freshly created device of the given type.
    #[must_use]
    pub fn initial(device_type: DeviceType) -> Self {
        match device_type {
            DeviceType::Light => Self::Light { brightness: 0 },
            DeviceType::Thermostat => Self::Thermostat {
                temperature: DEFAULT_TEMPERATURE,
            },
            DeviceType::Camera => Self::Camera {
                motion_detected: false,
            },
        }
    }

    #[must_use]
    pub fn device_type(&self) -> DeviceType {
        match self {
            Self::Light { .. } => DeviceType::Light,
            Self::Thermostat { .. } => DeviceType::Thermostat,
            Self::Camera { .. } => DeviceType::Camera,
        }
    }
}

/// A simulated device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Device {
    id: DeviceId,
    powered: bool,
    kind: DeviceKind,
}

impl Device {
    /// Create a powered-off device of the given type with its initial
    /// attribute.
    #[must_use]
    pub fn new(id: impl Into<DeviceId>, device_type: DeviceType) -> Self {
        Self {
            id: id.into(),
            powered: false,
            kind: DeviceKind::initial(device_type),
        }
    }

    #[must_use]
    pub fn light(id: impl Into<DeviceId>) -> Self {
        Self::new(id, DeviceType::Light)
    }

    #[must_use]
    pub fn thermostat(id: impl Into<DeviceId>) -> Self {
        Self::new(id, DeviceType::Thermostat)
    }

    #[must_use]
    pub fn camera(id: impl Into<DeviceId>) -> Self {
        Self::new(id, DeviceType::Camera)
    }

    #[must_use]
    pub fn id(&self) -> &DeviceId {
        &self.id
    }

    #[must_use]
    pub fn is_powered(&self) -> bool {
        self.powered
    }

    #[must_use]
    pub fn kind(&self) -> &DeviceKind {
        &self.kind
    }

    pub(crate) fn kind_mut(&mut self) -> &mut DeviceKind {
        &mut self.kind
    }

    #[must_use]
    pub fn device_type(&self) -> DeviceType {
        self.kind.device_type()
    }

    /// `true` only for a camera currently reporting motion.
    #[must_use]
    pub fn reports_motion(&self) -> bool {
        matches!(
            self.kind,
            DeviceKind::Camera {
                motion_detected: true
            }
        )
    }

    /// Flip the on/off flag. The attribute is left as is.
    pub fn toggle_powered(&mut self) {
        self.powered = !self.powered;
    }

    pub fn set_powered(&mut self, powered: bool) {
        self.powered = powered;
    }

    /// Set the brightness of a light, clamped to [`BRIGHTNESS_RANGE`].
    ///
    /// Returns the value actually stored.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Unsupported`] when the device is not a light.
    pub fn set_brightness(&mut self, value: i64) -> Result<u8, PanelError> {
        if let DeviceKind::Light { brightness } = &mut self.kind {
            *brightness = clamp_to(value, &BRIGHTNESS_RANGE);
            return Ok(*brightness);
        }
        Err(self.unsupported("set_brightness"))
    }

    /// Set the target temperature of a thermostat, clamped to
    /// [`TEMPERATURE_RANGE`].
    ///
    /// Returns the value actually stored.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Unsupported`] when the device is not a
    /// thermostat.
    pub fn set_temperature(&mut self, value: i64) -> Result<i8, PanelError> {
        if let DeviceKind::Thermostat { temperature } = &mut self.kind {
            *temperature = clamp_to(value, &TEMPERATURE_RANGE);
            return Ok(*temperature);
        }
        Err(self.unsupported("set_temperature"))
    }

    /// Re-roll the motion sensor of a camera: a fair coin flip.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Unsupported`] when the device is not a camera.
    pub fn detect_motion<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<bool, PanelError> {
        if let DeviceKind::Camera { motion_detected } = &mut self.kind {
            *motion_detected = rng.gen_bool(0.5);
            return Ok(*motion_detected);
        }
        Err(self.unsupported("detect_motion"))
    }

    /// Force the motion flag of a camera.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Unsupported`] when the device is not a camera.
    pub fn set_motion_detected(&mut self, detected: bool) -> Result<(), PanelError> {
        if let DeviceKind::Camera { motion_detected } = &mut self.kind {
            *motion_detected = detected;
            return Ok(());
        }
        Err(self.unsupported("detect_motion"))
    }

    /// Text shown on the device's own panel label.
    ///
    /// `"{id} - {attribute}: {value}{unit}"` when powered, `"{id} - OFF"`
    /// otherwise.
    #[must_use]
    pub fn display_line(&self) -> String {
        if !self.powered {
            return format!("{} - OFF", self.id);
        }
        match self.kind {
            DeviceKind::Light { brightness } => format!("{} - Brightness: {brightness}%", self.id),
            DeviceKind::Thermostat { temperature } => {
                format!("{} - Temperature: {temperature}C", self.id)
            }
            DeviceKind::Camera { motion_detected } => format!(
                "{} - Motion: {}",
                self.id,
                if motion_detected { "YES" } else { "NO" }
            ),
        }
    }

    /// Entry shown in the registry listing.
    #[must_use]
    pub fn listing_line(&self) -> String {
        format!(
            "{}: {} Status: {}",
            self.id,
            self.device_type(),
            if self.powered { "On" } else { "Off" }
        )
    }

    fn unsupported(&self, command: &'static str) -> PanelError {
        UnsupportedCommandError {
            id: self.id.clone(),
            device_type: self.device_type(),
            command,
        }
        .into()
    }
}

fn clamp_to<T>(value: i64, range: &RangeInclusive<T>) -> T
where
    T: Copy + Into<i64> + TryFrom<i64>,
{
    let (min, max) = (*range.start(), *range.end());
    T::try_from(value.clamp(min.into(), max.into())).unwrap_or(max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn should_start_powered_off_with_initial_attributes() {
        assert_eq!(
            Device::light("L1").kind(),
            &DeviceKind::Light { brightness: 0 }
        );
        assert_eq!(
            Device::thermostat("T1").kind(),
            &DeviceKind::Thermostat { temperature: 20 }
        );
        assert_eq!(
            Device::camera("C1").kind(),
            &DeviceKind::Camera {
                motion_detected: false
            }
        );
        assert!(!Device::light("L1").is_powered());
    }

    #[test]
    fn should_restore_power_when_toggled_twice() {
        for mut device in [
            Device::light("L1"),
            Device::thermostat("T1"),
            Device::camera("C1"),
        ] {
            let before = device.is_powered();
            device.toggle_powered();
            assert_ne!(device.is_powered(), before);
            device.toggle_powered();
            assert_eq!(device.is_powered(), before);
        }
    }

    #[test]
    fn should_keep_attribute_when_toggled() {
        let mut light = Device::light("L1");
        light.set_brightness(42).unwrap();
        light.toggle_powered();
        assert_eq!(light.kind(), &DeviceKind::Light { brightness: 42 });
    }

    #[test]
    fn should_clamp_brightness_to_range() {
        let mut light = Device::light("L1");
        assert_eq!(light.set_brightness(150).unwrap(), 100);
        assert_eq!(light.set_brightness(-3).unwrap(), 0);
        assert_eq!(light.set_brightness(55).unwrap(), 55);
    }

    #[test]
    fn should_clamp_temperature_to_range() {
        let mut thermostat = Device::thermostat("T1");
        assert_eq!(thermostat.set_temperature(99).unwrap(), 30);
        assert_eq!(thermostat.set_temperature(i64::MIN).unwrap(), 10);
        assert_eq!(thermostat.set_temperature(22).unwrap(), 22);
    }

    #[test]
    fn should_reject_brightness_on_camera() {
        let mut camera = Device::camera("C1");
        let result = camera.set_brightness(10);
        assert!(matches!(result, Err(PanelError::Unsupported(_))));
        assert_eq!(
            camera.kind(),
            &DeviceKind::Camera {
                motion_detected: false
            }
        );
    }

    #[test]
    fn should_reject_motion_on_light() {
        let mut light = Device::light("L1");
        let mut rng = StdRng::seed_from_u64(7);
        assert!(matches!(
            light.detect_motion(&mut rng),
            Err(PanelError::Unsupported(_))
        ));
    }

    #[test]
    fn should_not_draw_from_rng_when_motion_rejected() {
        let mut thermostat = Device::thermostat("T1");
        let mut rng = StdRng::seed_from_u64(7);
        let mut untouched = StdRng::seed_from_u64(7);

        for _ in 0..8 {
            assert!(thermostat.detect_motion(&mut rng).is_err());
        }

        assert_eq!(rng.r#gen::<u64>(), untouched.r#gen::<u64>());
    }

    #[test]
    fn should_flip_motion_both_ways_over_many_rolls() {
        let mut camera = Device::camera("C1");
        let mut rng = StdRng::seed_from_u64(42);
        let rolls: Vec<bool> = (0..64)
            .map(|_| camera.detect_motion(&mut rng).unwrap())
            .collect();
        assert!(rolls.iter().any(|r| *r));
        assert!(rolls.iter().any(|r| !*r));
        assert_eq!(camera.reports_motion(), *rolls.last().unwrap());
    }

    #[test]
    fn should_render_off_line_when_unpowered() {
        let light = Device::light("Living Room Light");
        assert_eq!(light.display_line(), "Living Room Light - OFF");
    }

    #[test]
    fn should_render_attribute_lines_when_powered() {
        let mut light = Device::light("L1");
        light.set_powered(true);
        light.set_brightness(40).unwrap();
        assert_eq!(light.display_line(), "L1 - Brightness: 40%");

        let mut thermostat = Device::thermostat("T1");
        thermostat.set_powered(true);
        assert_eq!(thermostat.display_line(), "T1 - Temperature: 20C");

        let mut camera = Device::camera("C1");
        camera.set_powered(true);
        assert_eq!(camera.display_line(), "C1 - Motion: NO");
        camera.set_motion_detected(true).unwrap();
        assert_eq!(camera.display_line(), "C1 - Motion: YES");
    }

    #[test]
    fn should_render_listing_line() {
        let mut camera = Device::camera("Front Door Camera");
        assert_eq!(
            camera.listing_line(),
            "Front Door Camera: SecurityCamera Status: Off"
        );
        camera.toggle_powered();
        assert_eq!(
            camera.listing_line(),
            "Front Door Camera: SecurityCamera Status: On"
        );
    }

    #[test]
    fn should_deserialize_device_type_from_snake_case() {
        let ty: DeviceType = serde_json::from_str("\"thermostat\"").unwrap();
        assert_eq!(ty, DeviceType::Thermostat);
    }
}
