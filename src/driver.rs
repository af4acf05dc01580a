//! Host-facing animation driver
//!
//! Owns one [`Simulation`] together with its clock and output settings. The
//! host calls [`Driver::tick`] from whatever loop it has (timer, animation
//! frame, test harness) for as long as [`Driver::wants_tick`] is true.

use crate::error::PintographError;
use crate::platform::Clock;
use crate::renderer::Frame;
use crate::settings::Settings;
use crate::sim::{HostInputs, LinkageConfig, PathBuffer, SimPhase, Simulation, SimulationState, TickInput, tick};

/// One independently animated pintograph
#[derive(Debug)]
pub struct Driver<C: Clock> {
    sim: Simulation,
    clock: C,
    settings: Settings,
    wants_tick: bool,
}

impl<C: Clock> Driver<C> {
    pub fn new(inputs: HostInputs, clock: C) -> Self {
        Self {
            sim: Simulation::new(inputs),
            clock,
            settings: Settings::default(),
            wants_tick: false,
        }
    }

    pub fn from_config(config: &LinkageConfig, clock: C) -> Self {
        Self::new(HostInputs::from(config), clock)
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Replace the host lists; they are validated at the next start
    pub fn set_inputs(&mut self, inputs: HostInputs) {
        self.sim.inputs = inputs;
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Process one tick at the clock's current reading
    ///
    /// `Ok(None)` means there is nothing to draw (idle or just reset). An
    /// `Err` withholds geometry for this tick only; the run carries on.
    pub fn tick(&mut self, input: &TickInput) -> Result<Option<Frame>, PintographError> {
        let now = self.clock.now();
        let out = tick(&mut self.sim, input, now);
        self.wants_tick = out.reschedule;

        if let Some(err) = out.error {
            return Err(err);
        }

        let path = (out.phase != SimPhase::Idle).then_some(&self.sim.path);
        Ok(out
            .chain
            .map(|chain| Frame::build(&chain, path, &self.settings)))
    }

    /// Whether the last tick asked to be followed by another
    pub fn wants_tick(&self) -> bool {
        self.wants_tick
    }

    pub fn phase(&self) -> SimPhase {
        self.sim.state.phase
    }

    pub fn elapsed(&self) -> f64 {
        self.sim.state.elapsed
    }

    pub fn state(&self) -> &SimulationState {
        &self.sim.state
    }

    pub fn path(&self) -> &PathBuffer {
        &self.sim.path
    }

    /// Configuration of the current run, if one has started
    pub fn config(&self) -> Option<&LinkageConfig> {
        self.sim.config.as_ref()
    }
}
