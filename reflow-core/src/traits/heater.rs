//! Heater duty policy trait

/// Converts target and measured temperature into a heater duty
///
/// Gains and tuning belong to the implementation. The controller clamps
/// whatever is returned and forces it to zero while the run is done or
/// the sensor is faulted.
pub trait HeatPolicy {
    /// Heater duty (0-255) for one control tick
    ///
    /// Called once per tick while a bake or reflow run is active.
    fn heat_duty(&mut self, setpoint_c: f32, measured_c: f32) -> u8;

    /// Forget accumulated state (integral, hysteresis) before a new run
    fn reset(&mut self);
}
