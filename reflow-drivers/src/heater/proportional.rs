//! Proportional heater policy

use super::{celsius_x10, Fixed32};
use reflow_core::traits::HeatPolicy;

/// Proportional policy configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProportionalConfig {
    /// Duty per tenth of a degree below target
    pub gain: Fixed32,
    /// Duty added whenever the oven is below target
    pub bias: u8,
}

impl ProportionalConfig {
    /// Create from a ×100 gain
    pub const fn from_scaled_100(gain_x100: i32, bias: u8) -> Self {
        Self {
            gain: Fixed32::from_scaled_100(gain_x100),
            bias,
        }
    }
}

impl Default for ProportionalConfig {
    fn default() -> Self {
        // Full power 12.75 °C below target
        Self::from_scaled_100(200, 0)
    }
}

/// Stateless proportional heater duty policy
///
/// Duty is non-decreasing in `setpoint - measured` and 0 at or above the
/// setpoint.
#[derive(Debug, Clone, Copy)]
pub struct ProportionalPolicy {
    config: ProportionalConfig,
}

impl ProportionalPolicy {
    /// Create a new proportional policy
    pub fn new(config: ProportionalConfig) -> Self {
        Self { config }
    }
}

impl HeatPolicy for ProportionalPolicy {
    fn heat_duty(&mut self, setpoint_c: f32, measured_c: f32) -> u8 {
        let error_x10 = celsius_x10(setpoint_c).saturating_sub(celsius_x10(measured_c));
        if error_x10 <= 0 {
            return 0;
        }
        self.config
            .gain
            .mul(Fixed32::from_int(error_x10))
            .saturating_add(Fixed32::from_int(i16::from(self.config.bias)))
            .to_duty()
    }

    fn reset(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duty_scales_with_error() {
        let mut policy = ProportionalPolicy::new(ProportionalConfig::default());
        assert_eq!(policy.heat_duty(100.0, 100.0), 0);
        assert_eq!(policy.heat_duty(100.0, 105.0), 0);
        assert_eq!(policy.heat_duty(100.0, 95.0), 100);
        assert_eq!(policy.heat_duty(100.0, 50.0), 255);
    }

    #[test]
    fn test_bias() {
        let mut policy = ProportionalPolicy::new(ProportionalConfig::from_scaled_100(100, 20));
        assert_eq!(policy.heat_duty(100.0, 99.0), 30);
        assert_eq!(policy.heat_duty(100.0, 100.0), 0);
    }

    #[test]
    fn test_monotonic() {
        let mut policy = ProportionalPolicy::new(ProportionalConfig::default());
        let mut last = 0;
        for measured in (0..=260).rev() {
            let duty = policy.heat_duty(200.0, measured as f32);
            assert!(duty >= last);
            last = duty;
        }
    }
}
