//! Bang-bang heater policy
//!
//! Simple on/off control with hysteresis.

use super::celsius_x10;
use reflow_core::traits::HeatPolicy;

/// Bang-bang policy configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BangBangConfig {
    /// Hysteresis (°C × 10)
    pub hysteresis_x10: i16,
    /// Duty applied while the heater is on
    pub on_duty: u8,
}

impl Default for BangBangConfig {
    fn default() -> Self {
        Self {
            hysteresis_x10: 20, // 2.0°C
            on_duty: u8::MAX,
        }
    }
}

/// Bang-bang heater duty policy
///
/// Turns the heater on when the temperature drops below
/// (target - hysteresis) and off when it rises above (target + hysteresis).
/// Inside the band the previous state is kept.
#[derive(Debug)]
pub struct BangBangPolicy {
    config: BangBangConfig,
    heater_on: bool,
}

impl BangBangPolicy {
    /// Create a new bang-bang policy, heater off
    pub fn new(config: BangBangConfig) -> Self {
        Self {
            config,
            heater_on: false,
        }
    }

    /// Whether the last update left the heater on
    pub fn is_on(&self) -> bool {
        self.heater_on
    }
}

impl HeatPolicy for BangBangPolicy {
    fn heat_duty(&mut self, setpoint_c: f32, measured_c: f32) -> u8 {
        let target_x10 = celsius_x10(setpoint_c);
        let temp_x10 = celsius_x10(measured_c);

        if temp_x10 < target_x10.saturating_sub(self.config.hysteresis_x10) {
            self.heater_on = true;
        } else if temp_x10 > target_x10.saturating_add(self.config.hysteresis_x10) {
            self.heater_on = false;
        }

        if self.heater_on {
            self.config.on_duty
        } else {
            0
        }
    }

    fn reset(&mut self) {
        self.heater_on = false;
    }
}
