//! Sensor plausibility monitor

use crate::config::ControllerConfig;

/// Non-fatal faults reported in the process status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaultKind {
    /// Reading is NaN or outside the physically plausible range
    SensorImplausible,
    /// Reading exceeds the over-temperature limit
    OverTemperature,
}

/// Safety condition status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SafetyStatus {
    /// Reading is usable
    Ok,
    /// Heating must stop for this tick
    Fault(FaultKind),
}

impl SafetyStatus {
    /// The fault, if any
    pub fn fault(self) -> Option<FaultKind> {
        match self {
            SafetyStatus::Ok => None,
            SafetyStatus::Fault(kind) => Some(kind),
        }
    }
}

/// Tracks the measured temperature across ticks
///
/// A fault never latches: the first plausible reading clears it. The
/// consecutive fault count lets the operator interface tell a glitch from
/// a disconnected sensor.
#[derive(Debug, Clone)]
pub struct SafetyMonitor {
    /// Plausible range (°C)
    min_c: f32,
    max_c: f32,
    /// Over-temperature limit (°C)
    over_temp_c: f32,
    /// Consecutive faulty readings
    fault_ticks: u16,
    /// Result of the last check
    status: SafetyStatus,
}

impl SafetyMonitor {
    /// Create a monitor using the limits from `config`
    pub fn new(config: &ControllerConfig) -> Self {
        Self {
            min_c: f32::from(config.sensor_min_c),
            max_c: f32::from(config.sensor_max_c),
            over_temp_c: f32::from(config.over_temp_c),
            fault_ticks: 0,
            status: SafetyStatus::Ok,
        }
    }

    /// Record a reading and classify it
    pub fn update(&mut self, measured_c: f32) -> SafetyStatus {
        let status = if measured_c.is_nan() || measured_c < self.min_c || measured_c > self.max_c
        {
            SafetyStatus::Fault(FaultKind::SensorImplausible)
        } else if measured_c > self.over_temp_c {
            SafetyStatus::Fault(FaultKind::OverTemperature)
        } else {
            SafetyStatus::Ok
        };

        match status {
            SafetyStatus::Ok => self.fault_ticks = 0,
            SafetyStatus::Fault(_kind) => {
                if self.fault_ticks == 0 {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("Sensor fault {}: reading {}", _kind, measured_c);
                }
                self.fault_ticks = self.fault_ticks.saturating_add(1);
            }
        }

        self.status = status;
        status
    }

    /// Result of the last check
    pub fn status(&self) -> SafetyStatus {
        self.status
    }

    /// Number of consecutive faulty readings
    pub fn fault_ticks(&self) -> u16 {
        self.fault_ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monitor() -> SafetyMonitor {
        SafetyMonitor::new(&ControllerConfig::default())
    }

    #[test]
    fn test_normal_operation() {
        let mut monitor = monitor();
        assert_eq!(monitor.update(25.0), SafetyStatus::Ok);
        assert_eq!(monitor.update(250.0), SafetyStatus::Ok);
        assert_eq!(monitor.fault_ticks(), 0);
    }

    #[test]
    fn test_implausible_readings() {
        let mut monitor = monitor();
        for reading in [f32::NAN, -100.0, 351.0, f32::INFINITY] {
            assert_eq!(
                monitor.update(reading),
                SafetyStatus::Fault(FaultKind::SensorImplausible)
            );
        }
        assert_eq!(monitor.fault_ticks(), 4);
    }

    #[test]
    fn test_over_temperature() {
        let mut monitor = monitor();
        assert_eq!(
            monitor.update(310.0),
            SafetyStatus::Fault(FaultKind::OverTemperature)
        );
        assert_eq!(monitor.status().fault(), Some(FaultKind::OverTemperature));
    }

    #[test]
    fn test_recovery_clears_fault() {
        let mut monitor = monitor();
        monitor.update(f32::NAN);
        monitor.update(f32::NAN);
        assert_eq!(monitor.fault_ticks(), 2);

        assert_eq!(monitor.update(100.0), SafetyStatus::Ok);
        assert_eq!(monitor.fault_ticks(), 0);
        assert_eq!(monitor.status(), SafetyStatus::Ok);
    }
}
