//! Oven operating modes
//!
//! Heater and fan behavior for a tick is a function of the current mode
//! and the run's progress.

/// Operating modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Power-on state, left on the first mode change
    #[default]
    Initial,
    /// Idle, heater and fan off
    Standby,
    /// Hold a manual setpoint, optionally for a timed duration
    Bake,
    /// Follow the selected profile
    Reflow,
    /// Idle with the fan forced on
    StandbyWithFan,
}

impl Mode {
    /// Check if this mode runs the heater
    pub fn heater_allowed(&self) -> bool {
        matches!(self, Mode::Bake | Mode::Reflow)
    }

    /// Check if this mode forces the fan on while idle
    pub fn fan_forced(&self) -> bool {
        matches!(self, Mode::StandbyWithFan)
    }

    /// Upper-case name used in status lines
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Initial => "INITIAL",
            Mode::Standby => "STANDBY",
            Mode::Bake => "BAKE",
            Mode::Reflow => "REFLOW",
            Mode::StandbyWithFan => "STANDBYFAN",
        }
    }

    /// Resolve a requested mode change
    ///
    /// Any mode may be entered from any other except `Initial`, which only
    /// exists at power-on.
    pub fn transition(self, requested: Mode) -> Self {
        match requested {
            Mode::Initial => self,
            other => other,
        }
    }
}
