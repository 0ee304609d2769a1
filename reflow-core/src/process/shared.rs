//! Oven context shared between the tick and the operator interface
//!
//! The control tick and profile editing run in different contexts. Both
//! go through one blocking mutex, so an edit never lands in the middle
//! of a tick.

use core::cell::{Cell, RefCell};

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;

use super::controller::{ProcessController, TickOutput};
use crate::profile::ProfileStore;
use crate::status::ProcessStatus;
use crate::traits::{HeatPolicy, ProfileStorage};

/// Profile store and process controller as one unit
#[derive(Debug)]
pub struct Oven<S, P> {
    /// Profile catalog and selection
    pub store: ProfileStore<S>,
    /// Mode, timer and control tick
    pub controller: ProcessController<P>,
}

impl<S: ProfileStorage, P: HeatPolicy> Oven<S, P> {
    /// Assemble an oven and initialize its profile store
    pub fn new(mut store: ProfileStore<S>, controller: ProcessController<P>) -> Self {
        store.initialize();
        Self { store, controller }
    }

    /// Run one control tick against the selected profile
    pub fn tick(&mut self, now_ms: u32, measured_c: f32, manual_setpoint: Option<u16>) -> TickOutput {
        self.controller
            .run(&self.store, now_ms, measured_c, manual_setpoint)
    }
}

/// [`Oven`] behind a blocking mutex
///
/// Pick the raw mutex for the contexts involved: `CriticalSectionRawMutex`
/// when the tick runs from an interrupt, `NoopRawMutex` when everything is
/// on one executor.
pub struct SharedOven<M: RawMutex, S, P> {
    inner: Mutex<M, Shared<S, P>>,
}

struct Shared<S, P> {
    oven: RefCell<Oven<S, P>>,
    /// Status of the last completed tick
    last: Cell<ProcessStatus>,
}

impl<M: RawMutex, S: ProfileStorage, P: HeatPolicy> SharedOven<M, S, P> {
    /// Wrap an assembled oven
    pub const fn new(oven: Oven<S, P>) -> Self {
        Self {
            inner: Mutex::new(Shared {
                oven: RefCell::new(oven),
                last: Cell::new(ProcessStatus::idle()),
            }),
        }
    }

    /// Run one control tick
    ///
    /// A tick entered from inside [`SharedOven::with`] cannot borrow the
    /// oven; it commands both actuators off instead of panicking. Its status
    /// repeats the last completed tick (mode, elapsed time, fault) with both
    /// duties at 0, so status consumers see a stalled sample rather than a
    /// reset.
    pub fn tick(&self, now_ms: u32, measured_c: f32, manual_setpoint: Option<u16>) -> TickOutput {
        self.inner.lock(|shared| match shared.oven.try_borrow_mut() {
            Ok(mut oven) => {
                let out = oven.tick(now_ms, measured_c, manual_setpoint);
                shared.last.set(out.status);
                out
            }
            Err(_) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Re-entrant control tick, outputs forced off");
                let mut status = shared.last.get();
                status.heat = 0;
                status.fan = 0;
                TickOutput::off(status)
            }
        })
    }

    /// Run an operator action between ticks
    ///
    /// Returns `None` if the oven is already borrowed by an enclosing call.
    pub fn with<R>(&self, f: impl FnOnce(&mut Oven<S, P>) -> R) -> Option<R> {
        self.inner
            .lock(|shared| shared.oven.try_borrow_mut().ok().map(|mut oven| f(&mut oven)))
    }
}
