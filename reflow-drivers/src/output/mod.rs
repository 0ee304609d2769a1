//! Actuator outputs

pub mod pwm;

pub use pwm::{ActuatorError, PwmActuator};
