//! The motion rule: the panel's single automation policy.
//!
//! Any camera reporting motion turns every light on. Once no camera reports
//! motion an idle timer starts; when it has run for the idle timeout the
//! lights are turned off and the timer clears.

use std::time::Duration;

use crate::device::DeviceType;
use crate::registry::DeviceRegistry;
use crate::time::{Timestamp, has_elapsed};

/// How long the lights stay on after the last motion.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(5);

/// What a single evaluation decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleOutcome {
    /// Motion seen: lights forced on, timer cleared.
    LightsOn,
    /// No motion and no timer yet: timer started.
    IdleStarted,
    /// No motion, timer running but not expired.
    Idle,
    /// Timer expired: lights forced off, timer cleared.
    LightsOff,
}

/// Motion → lights policy with its debounce timer.
#[derive(Debug, Clone)]
pub struct MotionLightsRule {
    idle_timeout: Duration,
    idle_since: Option<Timestamp>,
}

impl Default for MotionLightsRule {
    fn default() -> Self {
        Self::new(DEFAULT_IDLE_TIMEOUT)
    }
}

impl MotionLightsRule {
    #[must_use]
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            idle_timeout,
            idle_since: None,
        }
    }

    #[must_use]
    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    /// When the current idle period started, if one is running.
    #[must_use]
    pub fn idle_since(&self) -> Option<Timestamp> {
        self.idle_since
    }

    /// Apply the rule to `registry` at time `now`.
    ///
    /// The evaluation that starts the timer never turns lights off, even
    /// with a zero timeout; expiry is checked from the next one on.
    pub fn evaluate(&mut self, registry: &mut DeviceRegistry, now: Timestamp) -> RuleOutcome {
        if registry.any_motion() {
            registry.set_lights_powered(true);
            self.idle_since = None;
            return RuleOutcome::LightsOn;
        }

        match self.idle_since {
            None => {
                self.idle_since = Some(now);
                RuleOutcome::IdleStarted
            }
            Some(since) if has_elapsed(since, now, self.idle_timeout) => {
                registry.set_lights_powered(false);
                self.idle_since = None;
                RuleOutcome::LightsOff
            }
            Some(_) => RuleOutcome::Idle,
        }
    }

    /// Status line for a decision that changed the lights.
    ///
    /// Names the last light in display order, matching the single status
    /// label the panel has. Returns `None` when the lights were not touched
    /// or there are no lights.
    #[must_use]
    pub fn describe(&self, outcome: RuleOutcome, registry: &DeviceRegistry) -> Option<String> {
        let light = registry.of_type(DeviceType::Light).last()?;
        match outcome {
            RuleOutcome::LightsOn => Some(format!("{} is ON (Motion Detected)", light.id())),
            RuleOutcome::LightsOff => Some(format!(
                "{} is OFF (No Motion for {} seconds)",
                light.id(),
                self.idle_timeout.as_secs()
            )),
            RuleOutcome::IdleStarted | RuleOutcome::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::Device;
    use crate::id::DeviceId;
    use crate::time::now;
    use chrono::TimeDelta;

    fn registry_with_motion(motion: bool) -> DeviceRegistry {
        let mut registry = DeviceRegistry::from_devices([
            Device::light("L1"),
            Device::camera("C1"),
            Device::camera("C2"),
            Device::light("L2"),
        ])
        .unwrap();
        registry
            .require_mut(&DeviceId::new("C2"))
            .unwrap()
            .set_motion_detected(motion)
            .unwrap();
        registry
    }

    fn all_lights(registry: &DeviceRegistry, powered: bool) -> bool {
        registry
            .of_type(DeviceType::Light)
            .all(|d| d.is_powered() == powered)
    }

    #[test]
    fn should_turn_lights_on_when_any_camera_reports_motion() {
        let mut registry = registry_with_motion(true);
        let mut rule = MotionLightsRule::default();

        let outcome = rule.evaluate(&mut registry, now());

        assert_eq!(outcome, RuleOutcome::LightsOn);
        assert!(all_lights(&registry, true));
        assert!(rule.idle_since().is_none());
    }

    #[test]
    fn should_clear_running_timer_when_motion_returns() {
        let mut registry = registry_with_motion(false);
        let mut rule = MotionLightsRule::default();
        let t0 = now();
        rule.evaluate(&mut registry, t0);
        assert_eq!(rule.idle_since(), Some(t0));

        registry
            .require_mut(&DeviceId::new("C1"))
            .unwrap()
            .set_motion_detected(true)
            .unwrap();
        rule.evaluate(&mut registry, t0 + TimeDelta::seconds(1));

        assert!(rule.idle_since().is_none());
    }

    #[test]
    fn should_start_timer_without_touching_lights() {
        let mut registry = registry_with_motion(false);
        registry.set_lights_powered(true);
        let mut rule = MotionLightsRule::default();
        let t0 = now();

        let outcome = rule.evaluate(&mut registry, t0);

        assert_eq!(outcome, RuleOutcome::IdleStarted);
        assert_eq!(rule.idle_since(), Some(t0));
        assert!(all_lights(&registry, true));
    }

    #[test]
    fn should_keep_lights_while_timer_runs() {
        let mut registry = registry_with_motion(false);
        registry.set_lights_powered(true);
        let mut rule = MotionLightsRule::default();
        let t0 = now();
        rule.evaluate(&mut registry, t0);

        let outcome = rule.evaluate(&mut registry, t0 + TimeDelta::seconds(4));

        assert_eq!(outcome, RuleOutcome::Idle);
        assert_eq!(rule.idle_since(), Some(t0));
        assert!(all_lights(&registry, true));
    }

    #[test]
    fn should_turn_lights_off_after_idle_timeout() {
        let mut registry = registry_with_motion(false);
        registry.set_lights_powered(true);
        let mut rule = MotionLightsRule::default();
        let t0 = now();
        rule.evaluate(&mut registry, t0);

        let outcome = rule.evaluate(&mut registry, t0 + TimeDelta::seconds(5));

        assert_eq!(outcome, RuleOutcome::LightsOff);
        assert!(all_lights(&registry, false));
        assert!(rule.idle_since().is_none());
    }

    #[test]
    fn should_turn_lights_off_without_cameras_and_never_back_on() {
        let mut registry = DeviceRegistry::from_devices([Device::light("L1")]).unwrap();
        registry.set_lights_powered(true);
        let mut rule = MotionLightsRule::default();
        let t0 = now();

        rule.evaluate(&mut registry, t0);
        rule.evaluate(&mut registry, t0 + TimeDelta::seconds(6));
        assert!(all_lights(&registry, false));

        for step in 7..20 {
            let outcome = rule.evaluate(&mut registry, t0 + TimeDelta::seconds(step));
            assert_ne!(outcome, RuleOutcome::LightsOn);
            assert!(all_lights(&registry, false));
        }
    }

    #[test]
    fn should_honor_custom_idle_timeout() {
        let mut registry = registry_with_motion(false);
        registry.set_lights_powered(true);
        let mut rule = MotionLightsRule::new(Duration::from_secs(10));
        let t0 = now();
        rule.evaluate(&mut registry, t0);

        assert_eq!(
            rule.evaluate(&mut registry, t0 + TimeDelta::seconds(6)),
            RuleOutcome::Idle
        );
        assert_eq!(
            rule.evaluate(&mut registry, t0 + TimeDelta::seconds(10)),
            RuleOutcome::LightsOff
        );
    }

    #[test]
    fn should_describe_light_changes_with_last_light() {
        let registry = registry_with_motion(true);
        let rule = MotionLightsRule::default();

        assert_eq!(
            rule.describe(RuleOutcome::LightsOn, &registry).as_deref(),
            Some("L2 is ON (Motion Detected)")
        );
        assert_eq!(
            rule.describe(RuleOutcome::LightsOff, &registry).as_deref(),
            Some("L2 is OFF (No Motion for 5 seconds)")
        );
        assert!(rule.describe(RuleOutcome::Idle, &registry).is_none());
    }

    #[test]
    fn should_not_describe_anything_without_lights() {
        let registry = DeviceRegistry::from_devices([Device::camera("C1")]).unwrap();
        let rule = MotionLightsRule::default();
        assert!(rule.describe(RuleOutcome::LightsOn, &registry).is_none());
    }
}
