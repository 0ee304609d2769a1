//! Heater and fan on PWM channels
//!
//! Duties from the control tick are 0-255 and are scaled onto each
//! channel's own resolution.

use embedded_hal::pwm::SetDutyCycle;
use reflow_core::process::TickOutput;

/// Channel that rejected a duty update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActuatorError {
    /// Heater channel
    Heater,
    /// Fan channel
    Fan,
}

/// Heater and fan driven by two PWM channels
pub struct PwmActuator<H, F> {
    heater: H,
    fan: F,
    heat: u8,
    fan_duty: u8,
}

impl<H: SetDutyCycle, F: SetDutyCycle> PwmActuator<H, F> {
    /// Take both channels and switch them off
    pub fn new(heater: H, fan: F) -> Result<Self, ActuatorError> {
        let mut actuator = Self {
            heater,
            fan,
            heat: 0,
            fan_duty: 0,
        };
        actuator.set(0, 0)?;
        Ok(actuator)
    }

    /// Apply one tick's commands
    pub fn apply(&mut self, output: &TickOutput) -> Result<(), ActuatorError> {
        self.set(output.heat, output.fan)
    }

    /// Set both duties
    ///
    /// The heater is always written, and written first, so a fan failure
    /// never leaves a stale heater duty behind.
    pub fn set(&mut self, heat: u8, fan: u8) -> Result<(), ActuatorError> {
        let heater = self
            .heater
            .set_duty_cycle_fraction(u16::from(heat), u16::from(u8::MAX))
            .map_err(|_| ActuatorError::Heater);
        if heater.is_ok() {
            self.heat = heat;
        }

        let fan_result = self
            .fan
            .set_duty_cycle_fraction(u16::from(fan), u16::from(u8::MAX))
            .map_err(|_| ActuatorError::Fan);
        if fan_result.is_ok() {
            self.fan_duty = fan;
        }

        if heater.is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("Heater PWM update failed");
        }
        heater.and(fan_result)
    }

    /// Switch both outputs off
    pub fn all_off(&mut self) -> Result<(), ActuatorError> {
        self.set(0, 0)
    }

    /// Last heater duty applied
    pub fn heat(&self) -> u8 {
        self.heat
    }

    /// Last fan duty applied
    pub fn fan(&self) -> u8 {
        self.fan_duty
    }

    /// Release both channels
    pub fn release(self) -> (H, F) {
        (self.heater, self.fan)
    }
}
