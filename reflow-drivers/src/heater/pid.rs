//! PID heater policy
//!
//! Proportional-integral-derivative control producing a heater duty cycle.
//! The output is meant for a PWM or burst-fired SSR channel, so no
//! time-proportioning happens here. Fixed-point math keeps the loop free
//! of float multiplies on FPU-less parts.

use super::{celsius_x10, Fixed32};
use reflow_core::traits::HeatPolicy;

/// PID coefficients
///
/// Gains act on an error in tenths of a degree and produce a duty cycle
/// in 0-255, so a Kp of 1.00 gives full power 25.5 °C below target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PidCoefficients {
    /// Proportional gain (Kp)
    pub kp: Fixed32,
    /// Integral gain (Ki)
    pub ki: Fixed32,
    /// Derivative gain (Kd)
    pub kd: Fixed32,
}

impl PidCoefficients {
    /// Create coefficients from scaled integers (value × 100)
    ///
    /// # Example
    /// ```
    /// use reflow_drivers::heater::PidCoefficients;
    /// // Kp=1.5, Ki=0.1, Kd=0.5
    /// let coeffs = PidCoefficients::from_scaled_100(150, 10, 50);
    /// assert!(coeffs.is_configured());
    /// ```
    pub const fn from_scaled_100(kp_x100: i32, ki_x100: i32, kd_x100: i32) -> Self {
        Self {
            kp: Fixed32::from_scaled_100(kp_x100),
            ki: Fixed32::from_scaled_100(ki_x100),
            kd: Fixed32::from_scaled_100(kd_x100),
        }
    }

    /// Check if any coefficient is non-zero
    pub fn is_configured(&self) -> bool {
        !self.kp.is_zero() || !self.ki.is_zero() || !self.kd.is_zero()
    }
}

/// PID policy configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PidConfig {
    /// PID coefficients
    pub coefficients: PidCoefficients,
    /// Integral windup limit, in duty units
    pub integral_limit: u8,
    /// Deadband around setpoint (°C × 10)
    ///
    /// Errors smaller than this are treated as zero to reduce hunting.
    pub deadband_x10: i16,
    /// Setpoint step that clears the integral (°C × 10)
    ///
    /// Profiles ramp a fraction of a degree per tick; only operator jumps
    /// exceed this.
    pub setpoint_jump_x10: i16,
}

impl Default for PidConfig {
    fn default() -> Self {
        Self {
            coefficients: PidCoefficients::from_scaled_100(400, 5, 200),
            integral_limit: 128,
            deadband_x10: 2,
            setpoint_jump_x10: 100,
        }
    }
}

/// Accumulated controller state
#[derive(Debug, Clone, Copy, Default)]
struct PidState {
    integral: Fixed32,
    prev_error_x10: i16,
    setpoint_x10: Option<i16>,
}

/// PID heater duty policy
#[derive(Debug)]
pub struct PidPolicy {
    config: PidConfig,
    state: PidState,
    duty: u8,
}

impl PidPolicy {
    /// Create a new PID policy
    pub fn new(config: PidConfig) -> Self {
        Self {
            config,
            state: PidState::default(),
            duty: 0,
        }
    }

    /// Update PID coefficients
    ///
    /// Resets internal state to prevent integral windup issues.
    pub fn set_coefficients(&mut self, coefficients: PidCoefficients) {
        self.config.coefficients = coefficients;
        self.state = PidState::default();
    }

    /// Current PID coefficients
    pub fn coefficients(&self) -> &PidCoefficients {
        &self.config.coefficients
    }

    /// Duty returned by the last update
    pub fn duty(&self) -> u8 {
        self.duty
    }

    /// Accumulated integral term
    pub fn integral(&self) -> Fixed32 {
        self.state.integral
    }

    fn calculate_output(&mut self, setpoint_x10: i16, measured_x10: i16) -> u8 {
        if let Some(previous) = self.state.setpoint_x10 {
            if previous.saturating_sub(setpoint_x10).abs() > self.config.setpoint_jump_x10 {
                self.state.integral = Fixed32::ZERO;
            }
        }
        self.state.setpoint_x10 = Some(setpoint_x10);

        let error_x10 = setpoint_x10.saturating_sub(measured_x10);
        let error_x10 = if error_x10.abs() <= self.config.deadband_x10 {
            0
        } else {
            error_x10
        };

        let error = Fixed32::from_int(error_x10);
        let coeffs = &self.config.coefficients;

        let p_term = coeffs.kp.mul(error);

        let limit = Fixed32::from_int(i16::from(self.config.integral_limit));
        self.state.integral = self
            .state
            .integral
            .saturating_add(coeffs.ki.mul(error))
            .clamp(-limit, limit);

        // Derivative on error; the integral reset above absorbs setpoint kicks
        let d_error = error_x10.saturating_sub(self.state.prev_error_x10);
        let d_term = coeffs.kd.mul(Fixed32::from_int(d_error));
        self.state.prev_error_x10 = error_x10;

        p_term
            .saturating_add(self.state.integral)
            .saturating_add(d_term)
            .to_duty()
    }
}

impl HeatPolicy for PidPolicy {
    fn heat_duty(&mut self, setpoint_c: f32, measured_c: f32) -> u8 {
        self.duty = self.calculate_output(celsius_x10(setpoint_c), celsius_x10(measured_c));
        self.duty
    }

    fn reset(&mut self) {
        self.state = PidState::default();
        self.duty = 0;
    }
}
