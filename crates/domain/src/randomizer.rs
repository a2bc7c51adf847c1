//! Randomizer: perturbs the attribute of every powered device.
//!
//! Automatic temperatures stay within a "comfortable" band that is narrower
//! than what the manual control accepts.

use std::ops::RangeInclusive;

use rand::Rng;

use crate::device::{BRIGHTNESS_RANGE, Device, DeviceKind};
use crate::registry::DeviceRegistry;

/// Range automatic temperature changes are drawn from, in degrees Celsius.
pub const AUTO_TEMPERATURE_RANGE: RangeInclusive<i8> = 18..=25;

/// Re-roll the attribute of every powered device. Devices that are off
/// keep their last value.
pub fn randomize<R: Rng + ?Sized>(registry: &mut DeviceRegistry, rng: &mut R) {
    for device in registry.iter_mut().filter(|d| d.is_powered()) {
        randomize_device(device, rng);
    }
}

fn randomize_device<R: Rng + ?Sized>(device: &mut Device, rng: &mut R) {
    match device.kind_mut() {
        DeviceKind::Light { brightness } => *brightness = rng.gen_range(BRIGHTNESS_RANGE),
        DeviceKind::Thermostat { temperature } => {
            *temperature = rng.gen_range(AUTO_TEMPERATURE_RANGE);
        }
        DeviceKind::Camera { motion_detected } => *motion_detected = rng.gen_bool(0.5),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn powered(mut device: Device) -> Device {
        device.set_powered(true);
        device
    }

    #[test]
    fn should_keep_powered_values_within_bounds() {
        let mut registry = DeviceRegistry::from_devices([
            powered(Device::light("L1")),
            powered(Device::thermostat("T1")),
        ])
        .unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..500 {
            randomize(&mut registry, &mut rng);
            for device in registry.iter() {
                match *device.kind() {
                    DeviceKind::Light { brightness } => assert!(brightness <= 100),
                    DeviceKind::Thermostat { temperature } => {
                        assert!((18..=25).contains(&temperature), "got {temperature}");
                    }
                    DeviceKind::Camera { .. } => unreachable!(),
                }
            }
        }
    }

    #[test]
    fn should_leave_unpowered_devices_untouched() {
        let mut light = Device::light("L1");
        light.set_brightness(73).unwrap();
        let mut thermostat = Device::thermostat("T1");
        thermostat.set_temperature(11).unwrap();
        let mut camera = Device::camera("C1");
        camera.set_motion_detected(true).unwrap();

        let mut registry = DeviceRegistry::from_devices([light, thermostat, camera]).unwrap();
        let before = registry.clone();
        let mut rng = StdRng::seed_from_u64(99);

        for _ in 0..50 {
            randomize(&mut registry, &mut rng);
        }

        assert_eq!(registry, before);
    }

    #[test]
    fn should_reroll_powered_camera_motion() {
        let mut registry = DeviceRegistry::from_devices([powered(Device::camera("C1"))]).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let mut seen = [false, false];

        for _ in 0..64 {
            randomize(&mut registry, &mut rng);
            seen[usize::from(registry.any_motion())] = true;
        }

        assert_eq!(seen, [true, true]);
    }

    #[test]
    fn should_be_deterministic_for_a_given_seed() {
        let build = || {
            DeviceRegistry::from_devices([
                powered(Device::light("L1")),
                powered(Device::thermostat("T1")),
                powered(Device::camera("C1")),
            ])
            .unwrap()
        };
        let mut a = build();
        let mut b = build();
        let mut rng_a = StdRng::seed_from_u64(2024);
        let mut rng_b = StdRng::seed_from_u64(2024);

        for _ in 0..10 {
            randomize(&mut a, &mut rng_a);
            randomize(&mut b, &mut rng_b);
        }

        assert_eq!(a, b);
    }
}
