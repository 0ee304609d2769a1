//! Process controller and control tick
//!
//! Owns the operating mode, the manual bake setpoint, the bake timer and
//! the run's elapsed time. Each call to [`ProcessController::run`] turns
//! the elapsed time, the measured temperature and the mode into heater
//! and fan duties plus a status snapshot.

use super::mode::Mode;
use crate::config::ControllerConfig;
use crate::error::ValueRejected;
use crate::profile::{ProfileStore, SETPOINT_MAX, SETPOINT_MIN};
use crate::safety::{FaultKind, SafetyMonitor, SafetyStatus};
use crate::status::ProcessStatus;
use crate::traits::{HeatPolicy, ProfileStorage};

/// Longest bake timer: 36 hours
pub const BAKE_TIMER_MAX_S: u32 = 36 * 60 * 60;

/// Actuator commands and status for one tick
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickOutput {
    /// Heater duty (0-255)
    pub heat: u8,
    /// Fan duty (0-255)
    pub fan: u8,
    /// Process status after the tick
    pub status: ProcessStatus,
}

impl TickOutput {
    /// Both actuators off
    pub fn off(status: ProcessStatus) -> Self {
        Self {
            heat: 0,
            fan: 0,
            status,
        }
    }
}

/// Clamp a manual setpoint into the accepted range
pub fn clamp_setpoint(degrees: u16) -> u16 {
    degrees.clamp(SETPOINT_MIN, SETPOINT_MAX)
}

/// Oven process controller
///
/// The tick is not reentrant. Operator calls (`set_mode`, `set_setpoint`,
/// `set_bake_timer`) must happen between ticks; see
/// [`SharedOven`](super::SharedOven) for a locked wrapper.
#[derive(Debug)]
pub struct ProcessController<P> {
    mode: Mode,
    config: ControllerConfig,
    policy: P,
    safety: SafetyMonitor,
    /// Manual setpoint for bake (°C)
    bake_setpoint: u16,
    /// Setpoint used by the last tick, 0 when idle (°C)
    setpoint: u16,
    /// Bake duration, 0 for untimed (s)
    bake_timer_s: u32,
    /// Tick time the current run started (ms)
    start_ms: Option<u32>,
    /// Process time since the run started (ms)
    elapsed_ms: u32,
    /// Length of the selected profile, captured per tick (s)
    profile_duration_s: u32,
    /// Last measured temperature (°C)
    actual: f32,
    /// Override supplied with the last tick
    manual_override: Option<u16>,
    heat: u8,
    fan: u8,
    done: bool,
    preheating: bool,
    /// Set once the run first reaches the preheat threshold
    preheat_done: bool,
}

impl<P: HeatPolicy> ProcessController<P> {
    /// Create a controller in `Initial` mode
    pub fn new(policy: P, config: ControllerConfig) -> Self {
        Self {
            mode: Mode::Initial,
            safety: SafetyMonitor::new(&config),
            config,
            policy,
            bake_setpoint: SETPOINT_MIN,
            setpoint: 0,
            bake_timer_s: 0,
            start_ms: None,
            elapsed_ms: 0,
            profile_duration_s: 0,
            actual: 0.0,
            manual_override: None,
            heat: 0,
            fan: 0,
            done: false,
            preheating: false,
            preheat_done: false,
        }
    }

    /// Switch operating mode
    ///
    /// Entering `Bake` or `Reflow` starts a fresh run: elapsed time, done
    /// and preheating (including the preheat latch) are cleared and the
    /// heat policy is reset. The run's
    /// clock starts at the next tick. Entering either standby mode drops
    /// the setpoint to 0. Requests for `Initial` are ignored.
    ///
    /// Returns the mode now in effect.
    pub fn set_mode(&mut self, mode: Mode) -> Mode {
        let next = self.mode.transition(mode);

        if mode == next {
            if next.heater_allowed() {
                self.start_ms = None;
                self.elapsed_ms = 0;
                self.profile_duration_s = 0;
                self.done = false;
                self.preheating = false;
                self.preheat_done = false;
                self.policy.reset();
            } else {
                self.setpoint = 0;
                self.preheating = false;
            }
        }

        self.mode = next;
        next
    }

    /// Current operating mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Set the manual bake setpoint, clamped to 30-260 °C
    pub fn set_setpoint(&mut self, degrees: u16) {
        self.bake_setpoint = clamp_setpoint(degrees);
    }

    /// Manual bake setpoint
    pub fn setpoint(&self) -> u16 {
        self.bake_setpoint
    }

    /// Setpoint the last tick controlled to, 0 when idle
    pub fn active_setpoint(&self) -> u16 {
        self.setpoint
    }

    /// Set the bake duration in seconds, 0 for an untimed bake
    ///
    /// Values outside `0..=36h` are rejected and the previous timer kept.
    pub fn set_bake_timer(&mut self, seconds: i32) -> Result<(), ValueRejected> {
        match u32::try_from(seconds) {
            Ok(seconds) if seconds <= BAKE_TIMER_MAX_S => {
                self.bake_timer_s = seconds;
                Ok(())
            }
            _ => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Rejected bake timer {}s", seconds);
                Err(ValueRejected)
            }
        }
    }

    /// Bake duration (s)
    pub fn bake_timer(&self) -> u32 {
        self.bake_timer_s
    }

    /// Process time since the run started (s)
    pub fn elapsed_s(&self) -> u32 {
        self.elapsed_ms / 1000
    }

    /// Remaining run time, floored at 0 (s)
    ///
    /// Bake counts down the bake timer, reflow the selected profile's
    /// duration. Untimed bakes and idle modes report 0.
    pub fn time_left(&self) -> u32 {
        match self.mode {
            Mode::Bake => self.bake_timer_s.saturating_sub(self.elapsed_s()),
            Mode::Reflow => self.profile_duration_s.saturating_sub(self.elapsed_s()),
            _ => 0,
        }
    }

    /// Temperature supplied to the last tick
    pub fn actual_temp(&self) -> f32 {
        self.actual
    }

    /// Still ramping towards the target of an active run
    pub fn is_preheating(&self) -> bool {
        self.preheating
    }

    /// Run exhausted and heater idled
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Override supplied with the last tick
    pub fn manual_override(&self) -> Option<u16> {
        self.manual_override
    }

    /// Current tuning
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Replace the tuning; takes effect on the next tick
    pub fn set_config(&mut self, config: ControllerConfig) {
        self.safety = SafetyMonitor::new(&config);
        self.config = config;
    }

    /// Sensor plausibility state
    pub fn safety(&self) -> &SafetyMonitor {
        &self.safety
    }

    /// Access the heat policy
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Mutable access to the heat policy (retuning between runs)
    pub fn policy_mut(&mut self) -> &mut P {
        &mut self.policy
    }

    /// Snapshot of the process as of the last tick
    pub fn status(&self) -> ProcessStatus {
        ProcessStatus {
            elapsed_s: self.elapsed_s(),
            setpoint: self.setpoint,
            actual: self.actual,
            heat: self.heat,
            fan: self.fan,
            mode: self.mode,
            done: self.done,
            preheating: self.preheating,
            time_left_s: self.time_left(),
            fault: self.safety.status().fault(),
        }
    }

    /// Run one control tick
    ///
    /// `now_ms` is a free-running millisecond counter; only differences are
    /// used, so it may wrap. `manual_setpoint` overrides the stored bake
    /// setpoint for this tick. Never fails: an implausible reading stops
    /// the heater and is reported in the status.
    pub fn run<S: ProfileStorage>(
        &mut self,
        store: &ProfileStore<S>,
        now_ms: u32,
        measured_c: f32,
        manual_setpoint: Option<u16>,
    ) -> TickOutput {
        let safety = self.safety.update(measured_c);
        self.actual = measured_c;
        self.manual_override = manual_setpoint;

        let (heat, fan) = if self.mode.heater_allowed() {
            self.run_active(store, now_ms, measured_c, manual_setpoint, safety)
        } else {
            self.setpoint = 0;
            if self.mode.fan_forced() {
                (0, self.config.standby_fan_duty.min(self.config.max_fan_duty))
            } else {
                (0, 0)
            }
        };

        self.heat = heat;
        self.fan = fan;

        TickOutput {
            heat,
            fan,
            status: self.status(),
        }
    }

    fn run_active<S: ProfileStorage>(
        &mut self,
        store: &ProfileStore<S>,
        now_ms: u32,
        measured_c: f32,
        manual_setpoint: Option<u16>,
        safety: SafetyStatus,
    ) -> (u8, u8) {
        let start = match self.start_ms {
            Some(start) => start,
            None => {
                if self.mode == Mode::Reflow {
                    #[cfg(feature = "defmt")]
                    defmt::info!(
                        "Starting reflow with profile: {=str}",
                        store.name(crate::profile::ProfileId::Selected)
                    );
                }
                self.start_ms = Some(now_ms);
                now_ms
            }
        };
        self.elapsed_ms = now_ms.wrapping_sub(start);

        if self.mode == Mode::Reflow {
            self.profile_duration_s = store.duration_s();
        }

        let target = if self.done {
            None
        } else {
            self.target(store, manual_setpoint)
        };

        let Some(target) = target else {
            return self.finish(measured_c);
        };

        // Round to whole degrees for reporting
        self.setpoint = (target + 0.5) as u16;

        // One-way: a later sag below the threshold is not a new preheat
        if !self.preheat_done && safety != SafetyStatus::Fault(FaultKind::SensorImplausible) {
            let threshold = target * f32::from(self.config.preheat_threshold_pct) / 100.0;
            self.preheating = measured_c < threshold;
            self.preheat_done = !self.preheating;
        }

        match safety {
            SafetyStatus::Fault(FaultKind::SensorImplausible) => (0, 0),
            SafetyStatus::Fault(FaultKind::OverTemperature) => {
                (0, self.cooling_fan(target, measured_c))
            }
            SafetyStatus::Ok => {
                let heat = self
                    .policy
                    .heat_duty(target, measured_c)
                    .min(self.config.max_heat_duty);
                (heat, self.cooling_fan(target, measured_c))
            }
        }
    }

    /// Target for the current tick, or `None` once the run is exhausted
    fn target<S: ProfileStorage>(
        &self,
        store: &ProfileStore<S>,
        manual_setpoint: Option<u16>,
    ) -> Option<f32> {
        match self.mode {
            Mode::Bake => {
                if self.bake_timer_s > 0 && self.elapsed_s() >= self.bake_timer_s {
                    #[cfg(feature = "defmt")]
                    defmt::info!("Bake done");
                    return None;
                }
                let setpoint = manual_setpoint
                    .map(clamp_setpoint)
                    .unwrap_or(self.bake_setpoint);
                Some(f32::from(setpoint))
            }
            Mode::Reflow => {
                let setpoint = store.setpoint_at_time(self.elapsed_ms as f32 / 1000.0);
                if setpoint > 0.0 {
                    Some(setpoint)
                } else {
                    #[cfg(feature = "defmt")]
                    defmt::info!("Reflow done");
                    None
                }
            }
            _ => None,
        }
    }

    /// Idle the heater at the end of a run
    ///
    /// After a reflow the fan keeps cooling until the oven drops below the
    /// cool-down temperature.
    fn finish(&mut self, measured_c: f32) -> (u8, u8) {
        self.done = true;
        self.preheating = false;
        self.setpoint = 0;

        let cooling = self.mode == Mode::Reflow
            && self.safety.status() != SafetyStatus::Fault(FaultKind::SensorImplausible)
            && measured_c > f32::from(self.config.cooldown_fan_until_c);

        if cooling {
            (0, self.config.max_fan_duty)
        } else {
            (0, 0)
        }
    }

    /// Fan duty for overshoot beyond the cooling band
    fn cooling_fan(&self, target: f32, measured_c: f32) -> u8 {
        let overshoot = measured_c - target - f32::from(self.config.cooling_band_c);
        if overshoot > 0.0 {
            let duty = overshoot * f32::from(self.config.fan_gain);
            duty.min(f32::from(self.config.max_fan_duty)) as u8
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{BuiltinProfile, ProfileStore, MAX_SAMPLES};
    use crate::traits::StorageError;

    struct NoStorage;

    impl ProfileStorage for NoStorage {
        fn selected_index(&self) -> u8 {
            0
        }

        fn store_selected_index(&mut self, _index: u8) -> Result<(), StorageError> {
            Ok(())
        }

        fn profile_count(&self) -> usize {
            0
        }

        fn profile_name(&self, _slot: usize) -> &str {
            ""
        }

        fn set_profile_name(&mut self, _slot: usize, _name: &str) -> Result<(), StorageError> {
            Err(StorageError::NoSuchSlot)
        }

        fn sample(&self, _slot: usize, _index: usize) -> u16 {
            0
        }

        fn set_sample(&mut self, _slot: usize, _index: usize, _value: u16) -> Result<(), StorageError> {
            Err(StorageError::NoSuchSlot)
        }

        fn store_profile(&mut self, _slot: usize) -> Result<(), StorageError> {
            Err(StorageError::NoSuchSlot)
        }
    }

    /// Duty proportional to error, 10 per degree
    #[derive(Default)]
    struct Proportional {
        resets: u8,
    }

    impl HeatPolicy for Proportional {
        fn heat_duty(&mut self, setpoint_c: f32, measured_c: f32) -> u8 {
            ((setpoint_c - measured_c) * 10.0).clamp(0.0, 255.0) as u8
        }

        fn reset(&mut self) {
            self.resets += 1;
        }
    }

    const fn ramp() -> [u16; MAX_SAMPLES] {
        let mut samples = [0; MAX_SAMPLES];
        samples[0] = 100;
        samples[1] = 100;
        samples[2] = 200;
        samples
    }

    static SHORT: [BuiltinProfile; 1] = [BuiltinProfile {
        name: "SHORT",
        samples: ramp(),
    }];

    fn store() -> ProfileStore<NoStorage> {
        let mut store = ProfileStore::with_builtins(NoStorage, &SHORT);
        store.initialize();
        store
    }

    fn controller() -> ProcessController<Proportional> {
        ProcessController::new(Proportional::default(), ControllerConfig::default())
    }

    #[test]
    fn test_initial_state() {
        let store = store();
        let mut ctl = controller();
        assert_eq!(ctl.mode(), Mode::Initial);

        let out = ctl.run(&store, 0, 25.0, None);
        assert_eq!((out.heat, out.fan), (0, 0));
        assert_eq!(out.status.setpoint, 0);
        assert!(!ctl.is_done());
    }

    #[test]
    fn test_standby_modes() {
        let store = store();
        let mut ctl = controller();

        ctl.set_mode(Mode::Standby);
        let out = ctl.run(&store, 0, 25.0, None);
        assert_eq!((out.heat, out.fan), (0, 0));

        ctl.set_mode(Mode::StandbyWithFan);
        let out = ctl.run(&store, 1000, 25.0, None);
        assert_eq!((out.heat, out.fan), (0, 255));
        assert_eq!(ctl.active_setpoint(), 0);
    }

    #[test]
    fn test_set_mode_ignores_initial() {
        let mut ctl = controller();
        ctl.set_mode(Mode::Bake);
        assert_eq!(ctl.set_mode(Mode::Initial), Mode::Bake);
    }

    #[test]
    fn test_setpoint_clamped() {
        let mut ctl = controller();
        ctl.set_setpoint(500);
        assert_eq!(ctl.setpoint(), SETPOINT_MAX);
        ctl.set_setpoint(0);
        assert_eq!(ctl.setpoint(), SETPOINT_MIN);
        ctl.set_setpoint(120);
        assert_eq!(ctl.setpoint(), 120);
    }

    #[test]
    fn test_bake_timer_bounds() {
        let mut ctl = controller();
        assert_eq!(ctl.set_bake_timer(BAKE_TIMER_MAX_S as i32), Ok(()));
        assert_eq!(ctl.bake_timer(), BAKE_TIMER_MAX_S);

        assert_eq!(
            ctl.set_bake_timer(BAKE_TIMER_MAX_S as i32 + 1),
            Err(ValueRejected)
        );
        assert_eq!(ctl.set_bake_timer(-1), Err(ValueRejected));
        assert_eq!(ctl.bake_timer(), BAKE_TIMER_MAX_S);
    }

    #[test]
    fn test_bake_heats_towards_setpoint() {
        let store = store();
        let mut ctl = controller();
        ctl.set_setpoint(100);
        ctl.set_mode(Mode::Bake);

        let out = ctl.run(&store, 5000, 80.0, None);
        assert_eq!(out.heat, 200);
        assert_eq!(out.status.setpoint, 100);
        assert!(ctl.is_preheating());

        let out = ctl.run(&store, 6000, 99.0, None);
        assert_eq!(out.heat, 10);
        assert!(!ctl.is_preheating());

        let out = ctl.run(&store, 7000, 101.0, None);
        assert_eq!(out.heat, 0);
    }

    #[test]
    fn test_preheat_does_not_return_after_sag() {
        let store = store();
        let mut ctl = controller();
        ctl.set_setpoint(200);
        ctl.set_mode(Mode::Bake);

        ctl.run(&store, 0, 100.0, None);
        assert!(ctl.is_preheating());
        ctl.run(&store, 1000, 199.0, None);
        assert!(!ctl.is_preheating());

        // Door opened: well below the threshold again
        let out = ctl.run(&store, 2000, 180.0, None);
        assert!(!ctl.is_preheating());
        assert!(!out.status.preheating);
        assert_eq!(out.heat, 200);

        // A new run preheats again
        ctl.set_mode(Mode::Bake);
        ctl.run(&store, 3000, 180.0, None);
        assert!(ctl.is_preheating());
    }

    #[test]
    fn test_preheat_ignores_implausible_reading() {
        let store = store();
        let mut ctl = controller();
        ctl.set_setpoint(200);
        ctl.set_mode(Mode::Bake);

        ctl.run(&store, 0, f32::NAN, None);
        assert!(!ctl.is_preheating());
        ctl.run(&store, 1000, 25.0, None);
        assert!(ctl.is_preheating());
    }

    #[test]
    fn test_bake_manual_override() {
        let store = store();
        let mut ctl = controller();
        ctl.set_setpoint(100);
        ctl.set_mode(Mode::Bake);

        let out = ctl.run(&store, 0, 100.0, Some(150));
        assert_eq!(out.status.setpoint, 150);
        assert_eq!(ctl.manual_override(), Some(150));

        // Overrides are clamped like the stored setpoint
        let out = ctl.run(&store, 1000, 100.0, Some(900));
        assert_eq!(out.status.setpoint, SETPOINT_MAX);

        // Stored setpoint untouched
        assert_eq!(ctl.setpoint(), 100);
    }

    #[test]
    fn test_bake_timer_expiry() {
        let store = store();
        let mut ctl = controller();
        ctl.set_setpoint(150);
        ctl.set_bake_timer(10).unwrap();
        ctl.set_mode(Mode::Bake);

        let out = ctl.run(&store, 1000, 30.0, None);
        assert!(out.heat > 0);
        assert_eq!(ctl.time_left(), 10);

        let out = ctl.run(&store, 6000, 30.0, None);
        assert_eq!(ctl.time_left(), 5);
        assert!(!out.status.done);

        let out = ctl.run(&store, 12_000, 30.0, None);
        assert!(ctl.is_done());
        assert_eq!(out.heat, 0);
        assert_eq!(ctl.time_left(), 0);
        assert_eq!(ctl.active_setpoint(), 0);
    }

    #[test]
    fn test_untimed_bake_never_done() {
        let store = store();
        let mut ctl = controller();
        ctl.set_mode(Mode::Bake);
        ctl.run(&store, 0, 25.0, None);
        ctl.run(&store, 3_600_000, 25.0, None);
        assert!(!ctl.is_done());
        assert_eq!(ctl.time_left(), 0);
    }

    #[test]
    fn test_reflow_follows_profile() {
        let store = store();
        let mut ctl = controller();
        ctl.set_mode(Mode::Reflow);

        let out = ctl.run(&store, 50_000, 90.0, None);
        assert_eq!(out.status.setpoint, 100);
        assert_eq!(out.heat, 100);
        assert_eq!(ctl.time_left(), 30);

        // Halfway between 100 and 200
        let out = ctl.run(&store, 65_000, 150.0, None);
        assert_eq!(out.status.setpoint, 150);
        assert_eq!(out.status.elapsed_s, 15);

        // Last sample held
        let out = ctl.run(&store, 75_000, 195.0, None);
        assert_eq!(out.status.setpoint, 200);
        assert!(!ctl.is_done());

        let out = ctl.run(&store, 80_000, 195.0, None);
        assert!(ctl.is_done());
        assert_eq!(out.heat, 0);
        assert_eq!(ctl.time_left(), 0);
    }

    #[test]
    fn test_reflow_cooldown_fan() {
        let store = store();
        let mut ctl = controller();
        ctl.set_mode(Mode::Reflow);
        ctl.run(&store, 0, 25.0, None);

        let out = ctl.run(&store, 30_000, 190.0, None);
        assert!(ctl.is_done());
        assert_eq!((out.heat, out.fan), (0, 255));

        let out = ctl.run(&store, 90_000, 45.0, None);
        assert_eq!((out.heat, out.fan), (0, 0));
        assert!(ctl.is_done());
    }

    #[test]
    fn test_done_never_heats() {
        let store = store();
        let mut ctl = controller();
        ctl.set_mode(Mode::Reflow);
        ctl.run(&store, 0, 25.0, None);
        ctl.run(&store, 30_000, 25.0, None);
        assert!(ctl.is_done());

        for t in 0..10 {
            let out = ctl.run(&store, 31_000 + t * 1000, 20.0, Some(250));
            assert_eq!(out.heat, 0);
        }
    }

    #[test]
    fn test_restart_clears_run() {
        let store = store();
        let mut ctl = controller();
        ctl.set_mode(Mode::Reflow);
        ctl.run(&store, 0, 25.0, None);
        ctl.run(&store, 30_000, 25.0, None);
        assert!(ctl.is_done());

        ctl.set_mode(Mode::Reflow);
        assert!(!ctl.is_done());
        assert_eq!(ctl.elapsed_s(), 0);
        assert_eq!(ctl.policy().resets, 2);

        let out = ctl.run(&store, 40_000, 25.0, None);
        assert_eq!(out.status.setpoint, 100);
        assert!(out.heat > 0);
    }

    #[test]
    fn test_wrapping_clock() {
        let store = store();
        let mut ctl = controller();
        ctl.set_mode(Mode::Reflow);
        ctl.run(&store, u32::MAX - 4999, 25.0, None);
        let out = ctl.run(&store, 5000, 25.0, None);
        assert_eq!(out.status.elapsed_s, 10);
    }

    #[test]
    fn test_implausible_sensor_stops_heating() {
        let store = store();
        let mut ctl = controller();
        ctl.set_setpoint(200);
        ctl.set_mode(Mode::Bake);

        let out = ctl.run(&store, 0, f32::NAN, None);
        assert_eq!((out.heat, out.fan), (0, 0));
        assert_eq!(out.status.fault, Some(FaultKind::SensorImplausible));
        assert!(!ctl.is_done());

        let out = ctl.run(&store, 1000, 1000.0, None);
        assert_eq!(out.heat, 0);
        // The faulty reading is still reported
        assert_eq!(ctl.actual_temp(), 1000.0);
        assert_eq!(out.status.actual, 1000.0);

        // Recovers on the next sane reading
        let out = ctl.run(&store, 2000, 100.0, None);
        assert!(out.heat > 0);
        assert_eq!(out.status.fault, None);
    }

    #[test]
    fn test_over_temperature_cools() {
        let store = store();
        let mut ctl = controller();
        ctl.set_setpoint(200);
        ctl.set_mode(Mode::Bake);

        let out = ctl.run(&store, 0, 320.0, None);
        assert_eq!(out.heat, 0);
        assert_eq!(out.fan, 255);
        assert_eq!(out.status.fault, Some(FaultKind::OverTemperature));
    }

    #[test]
    fn test_cooling_fan_monotonic() {
        let store = store();
        let mut ctl = controller();
        ctl.set_setpoint(100);
        ctl.set_mode(Mode::Bake);

        let mut last = 0;
        for measured in [100.0, 105.0, 106.0, 110.0, 120.0, 150.0] {
            let out = ctl.run(&store, 0, measured, None);
            assert!(out.fan >= last);
            assert_eq!(out.heat, 0);
            last = out.fan;
        }
        assert_eq!(last, 255);
    }

    #[test]
    fn test_heat_duty_clamped() {
        let store = store();
        let config = ControllerConfig {
            max_heat_duty: 128,
            ..Default::default()
        };
        let mut ctl = ProcessController::new(Proportional::default(), config);
        ctl.set_setpoint(250);
        ctl.set_mode(Mode::Bake);

        let out = ctl.run(&store, 0, 25.0, None);
        assert_eq!(out.heat, 128);
    }
}
