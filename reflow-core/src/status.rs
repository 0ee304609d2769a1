//! Process status reporting
//!
//! One [`ProcessStatus`] is produced per control tick. Its `Display` form
//! is the comma separated line host tooling plots:
//!
//! ```text
//! elapsed, setpoint, actual, heat, fan, MODE
//! ```

use core::fmt;

use crate::process::Mode;
use crate::safety::FaultKind;

/// Snapshot of the process after a tick
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProcessStatus {
    /// Process time since the run started (s)
    pub elapsed_s: u32,
    /// Active setpoint, 0 when idle (°C)
    pub setpoint: u16,
    /// Measured temperature (°C)
    pub actual: f32,
    /// Heater duty (0-255)
    pub heat: u8,
    /// Fan duty (0-255)
    pub fan: u8,
    /// Operating mode
    pub mode: Mode,
    /// Run finished and heater idled
    pub done: bool,
    /// Still ramping towards the target
    pub preheating: bool,
    /// Remaining run time (s)
    pub time_left_s: u32,
    /// Non-fatal fault seen this tick
    pub fault: Option<FaultKind>,
}

impl ProcessStatus {
    /// Header matching the `Display` line
    pub const HEADER: &'static str = "Time, Set, Actual, Heat, Fan, Mode";

    /// Status before the first tick
    pub const fn idle() -> Self {
        Self {
            elapsed_s: 0,
            setpoint: 0,
            actual: 0.0,
            heat: 0,
            fan: 0,
            mode: Mode::Initial,
            done: false,
            preheating: false,
            time_left_s: 0,
            fault: None,
        }
    }
}

impl fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {:.1}, {}, {}, {}",
            self.elapsed_s,
            self.setpoint,
            self.actual,
            self.heat,
            self.fan,
            self.mode.name()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;
    use heapless::String;

    #[test]
    fn test_status_line() {
        let status = ProcessStatus {
            elapsed_s: 42,
            setpoint: 150,
            actual: 148.3,
            heat: 200,
            fan: 0,
            mode: Mode::Reflow,
            done: false,
            preheating: false,
            time_left_s: 100,
            fault: None,
        };

        let mut line: String<64> = String::new();
        write!(line, "{}", status).unwrap();
        assert_eq!(line.as_str(), "42, 150, 148.3, 200, 0, REFLOW");
    }

    #[test]
    fn test_idle_line() {
        let mut line: String<64> = String::new();
        write!(line, "{}", ProcessStatus::idle()).unwrap();
        assert_eq!(line.as_str(), "0, 0, 0.0, 0, 0, INITIAL");
    }
}
