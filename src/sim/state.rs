//! Simulation state and the pen path buffer
//!
//! Everything one animated linkage carries between ticks lives here. Each
//! [`Simulation`] is private to its owner; there is no shared state between
//! instances.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::config::{HostInputs, LinkageConfig};
use crate::consts::DEFAULT_RUNTIME;

/// Lifecycle phase of the animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SimPhase {
    /// Not started, or reset
    #[default]
    Idle,
    /// Advancing with the clock
    Running,
    /// Halted (start withdrawn or runtime exceeded), trace retained
    Stopped,
}

/// Append-only record of pen positions over a run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathBuffer {
    points: Vec<DVec2>,
}

impl PathBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, point: DVec2) {
        self.points.push(point);
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last(&self) -> Option<DVec2> {
        self.points.last().copied()
    }

    /// Total drawn length of the trace
    pub fn length(&self) -> f64 {
        self.points.windows(2).map(|w| w[0].distance(w[1])).sum()
    }
}

/// Clock-related run state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub phase: SimPhase,
    /// Seconds of simulated motion so far
    pub elapsed: f64,
    /// Run stops once `elapsed` would exceed this
    pub runtime_limit: f64,
    /// Clock reading corresponding to `elapsed == 0`
    pub baseline: f64,
    /// Ticks processed since the last reset
    pub ticks: u64,
    /// The runtime limit ended this run; only a reset starts another
    pub exhausted: bool,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self {
            phase: SimPhase::Idle,
            elapsed: 0.0,
            runtime_limit: DEFAULT_RUNTIME,
            baseline: 0.0,
            ticks: 0,
            exhausted: false,
        }
    }
}

impl SimulationState {
    pub fn is_running(&self) -> bool {
        self.phase == SimPhase::Running
    }
}

/// One animated linkage: host inputs, the configuration captured at start,
/// run state and pen trace
#[derive(Debug, Clone, Default)]
pub struct Simulation {
    /// Latest host lists; validated when a run starts
    pub inputs: HostInputs,
    /// Configuration in force for the current run
    pub config: Option<LinkageConfig>,
    pub state: SimulationState,
    pub path: PathBuffer,
    /// Last configuration error logged, so a persistent one is logged once
    pub reported_error: Option<String>,
}

impl Simulation {
    pub fn new(inputs: HostInputs) -> Self {
        Self {
            inputs,
            ..Self::default()
        }
    }

    /// Back to Idle with a zeroed clock and an empty trace
    pub fn reset(&mut self) {
        let runtime_limit = self.state.runtime_limit;
        self.state = SimulationState {
            runtime_limit,
            ..SimulationState::default()
        };
        self.path.clear();
        self.config = None;
        self.reported_error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_buffer_append_and_clear() {
        let mut path = PathBuffer::new();
        assert!(path.is_empty());

        path.push(DVec2::new(0.0, 0.0));
        path.push(DVec2::new(3.0, 4.0));
        path.push(DVec2::new(3.0, 0.0));
        assert_eq!(path.len(), 3);
        assert_eq!(path.last(), Some(DVec2::new(3.0, 0.0)));
        assert!((path.length() - 9.0).abs() < 1e-12);

        path.clear();
        assert!(path.is_empty());
        assert_eq!(path.length(), 0.0);
    }

    #[test]
    fn test_reset_keeps_inputs_and_limit() {
        let mut sim = Simulation::new(HostInputs::from(&LinkageConfig::default()));
        sim.state.phase = SimPhase::Stopped;
        sim.state.elapsed = 4.0;
        sim.state.runtime_limit = 12.0;
        sim.state.ticks = 9;
        sim.state.exhausted = true;
        sim.path.push(DVec2::ONE);

        sim.reset();

        assert_eq!(sim.state.phase, SimPhase::Idle);
        assert_eq!(sim.state.elapsed, 0.0);
        assert_eq!(sim.state.ticks, 0);
        assert!(!sim.state.exhausted);
        assert_eq!(sim.state.runtime_limit, 12.0);
        assert!(sim.path.is_empty());
        assert!(sim.config.is_none());
        assert_eq!(sim.inputs.radii.len(), 2);
    }
}
