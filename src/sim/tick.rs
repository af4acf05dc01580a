//! Time-stepped animation tick
//!
//! The host calls [`tick`] repeatedly; each call does one unit of work and
//! reports whether it wants another. Nothing here owns a timer or a thread.
//!
//! ```text
//!            start                 start withdrawn / elapsed > runtime
//!   Idle ─────────────▶ Running ──────────────────────────────▶ Stopped
//!    ▲                     │  ▲     start (limit not reached)      │
//!    │       reset         │  └────────────────────────────────────┘
//!    └─────────────────────┴───────────────────────────────────────┘
//! ```

use super::chain::{LinkageChain, evaluate};
use super::state::{SimPhase, Simulation};
use crate::consts::DEFAULT_RUNTIME;
use crate::error::{ConfigError, PintographError};

/// Host signals for a single tick
#[derive(Debug, Clone)]
pub struct TickInput {
    /// Run while asserted
    pub start: bool,
    /// Zero the clock and clear the trace; overrides everything else
    pub reset: bool,
    /// Runtime limit in seconds
    pub runtime: f64,
}

impl Default for TickInput {
    fn default() -> Self {
        Self {
            start: false,
            reset: false,
            runtime: DEFAULT_RUNTIME,
        }
    }
}

impl TickInput {
    pub fn running(runtime: f64) -> Self {
        Self {
            start: true,
            reset: false,
            runtime,
        }
    }

    pub fn reset() -> Self {
        Self {
            reset: true,
            ..Self::default()
        }
    }
}

/// What one tick produced
#[derive(Debug)]
pub struct TickOutput {
    /// Phase after the tick
    pub phase: SimPhase,
    /// Chain to draw, if one could be assembled
    pub chain: Option<LinkageChain>,
    /// Why nothing could be drawn, when that is the case
    pub error: Option<PintographError>,
    /// The host should schedule another tick
    pub reschedule: bool,
}

impl TickOutput {
    fn quiet(phase: SimPhase) -> Self {
        Self {
            phase,
            chain: None,
            error: None,
            reschedule: false,
        }
    }

    fn failed(phase: SimPhase, error: PintographError) -> Self {
        Self {
            phase,
            chain: None,
            error: Some(error),
            reschedule: phase == SimPhase::Running,
        }
    }
}

/// Advance the simulation to clock reading `now` (seconds, monotonic)
pub fn tick(sim: &mut Simulation, input: &TickInput, now: f64) -> TickOutput {
    if input.reset {
        if sim.state.phase != SimPhase::Idle || !sim.path.is_empty() {
            log::info!("Reset after {} ticks, {} trace points dropped", sim.state.ticks, sim.path.len());
        }
        sim.reset();
        return TickOutput::quiet(SimPhase::Idle);
    }

    if !input.runtime.is_finite() || input.runtime < 0.0 {
        let err = ConfigError::InvalidValue {
            field: "runtime",
            message: format!("must be a non-negative number of seconds, got {}", input.runtime),
        };
        return rejected(sim, err);
    }

    // Inputs are validated before anything is written
    let starting = if sim.state.phase == SimPhase::Idle && input.start {
        match sim.inputs.to_pen_config() {
            Ok(config) => Some(config),
            Err(err) => return rejected(sim, err),
        }
    } else {
        None
    };

    sim.reported_error = None;
    sim.state.runtime_limit = input.runtime;
    sim.state.ticks += 1;

    match sim.state.phase {
        SimPhase::Idle => {
            let Some(config) = starting else {
                return TickOutput::quiet(SimPhase::Idle);
            };
            sim.config = Some(config);
            sim.state.baseline = now;
            sim.state.elapsed = 0.0;
            sim.state.phase = SimPhase::Running;
            log::info!("Simulation started (runtime {:.2}s)", input.runtime);
        }
        SimPhase::Stopped => {
            if input.start && !sim.state.exhausted {
                // Resume where the trace left off
                sim.state.baseline = now - sim.state.elapsed;
                sim.state.phase = SimPhase::Running;
                log::info!("Simulation resumed at {:.3}s", sim.state.elapsed);
            } else {
                return held(sim);
            }
        }
        SimPhase::Running => {
            if !input.start {
                sim.state.phase = SimPhase::Stopped;
                log::info!("Simulation stopped at {:.3}s", sim.state.elapsed);
                return held(sim);
            }
        }
    }

    advance(sim, now)
}

/// Abort the tick on a configuration error, logging it only when it changes
fn rejected(sim: &mut Simulation, err: ConfigError) -> TickOutput {
    let message = err.to_string();
    if sim.reported_error.as_deref() != Some(message.as_str()) {
        log::warn!("Cannot run: {message}");
        sim.reported_error = Some(message);
    }
    TickOutput::failed(sim.state.phase, err.into())
}

/// Running step: move the clock, solve, record the pen
fn advance(sim: &mut Simulation, now: f64) -> TickOutput {
    let elapsed = now - sim.state.baseline;
    if elapsed > sim.state.runtime_limit {
        sim.state.phase = SimPhase::Stopped;
        sim.state.exhausted = true;
        log::info!(
            "Runtime limit {:.2}s reached with {} trace points",
            sim.state.runtime_limit,
            sim.path.len()
        );
        return held(sim);
    }
    sim.state.elapsed = elapsed;

    let Some(config) = sim.config.as_ref() else {
        // Running always has a configuration; fall back to Idle if not
        sim.state.phase = SimPhase::Idle;
        return TickOutput::quiet(SimPhase::Idle);
    };

    match evaluate(config, elapsed) {
        Ok(chain) => {
            sim.path.push(chain.pen());
            log::debug!("tick {} t={:.4} pen={:?}", sim.state.ticks, elapsed, chain.pen());
            TickOutput {
                phase: SimPhase::Running,
                chain: Some(chain),
                error: None,
                reschedule: true,
            }
        }
        Err(err) => {
            log::warn!("t={elapsed:.4}: {err}");
            TickOutput::failed(SimPhase::Running, err.into())
        }
    }
}

/// Stopped output: the chain at the held time, trace untouched
fn held(sim: &Simulation) -> TickOutput {
    let phase = sim.state.phase;
    let Some(config) = sim.config.as_ref() else {
        return TickOutput::quiet(phase);
    };
    match evaluate(config, sim.state.elapsed) {
        Ok(chain) => TickOutput {
            phase,
            chain: Some(chain),
            error: None,
            reschedule: false,
        },
        Err(err) => TickOutput::failed(phase, err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::config::{DiskParams, Direction, HostInputs, LinkageConfig, RodLengths};

    fn sim() -> Simulation {
        Simulation::new(HostInputs::from(&LinkageConfig::default()))
    }

    fn run(sim: &mut Simulation, times: &[f64], runtime: f64) -> Vec<TickOutput> {
        let input = TickInput::running(runtime);
        times.iter().map(|&now| tick(sim, &input, now)).collect()
    }

    #[test]
    fn test_idle_without_start() {
        let mut sim = sim();
        let out = tick(&mut sim, &TickInput::default(), 5.0);
        assert_eq!(out.phase, SimPhase::Idle);
        assert!(out.chain.is_none());
        assert!(!out.reschedule);
        assert!(sim.path.is_empty());
    }

    #[test]
    fn test_start_evaluates_at_zero() {
        let mut sim = sim();
        let out = tick(&mut sim, &TickInput::running(10.0), 100.0);

        assert_eq!(out.phase, SimPhase::Running);
        assert!(out.reschedule);
        assert_eq!(sim.state.baseline, 100.0);
        assert_eq!(sim.state.elapsed, 0.0);

        let expected = evaluate(&LinkageConfig::default(), 0.0).unwrap();
        assert_eq!(out.chain.unwrap(), expected);
        assert_eq!(sim.path.points(), &[expected.pen()]);
    }

    #[test]
    fn test_running_appends_each_tick() {
        let mut sim = sim();
        let outs = run(&mut sim, &[1.0, 1.5, 2.0, 2.25], 10.0);

        assert!(outs.iter().all(|o| o.phase == SimPhase::Running && o.reschedule));
        assert_eq!(sim.path.len(), 4);
        assert_eq!(sim.state.elapsed, 1.25);

        let config = LinkageConfig::default();
        for (point, t) in sim.path.points().iter().zip([0.0, 0.5, 1.0, 1.25]) {
            assert_eq!(*point, evaluate(&config, t).unwrap().pen());
        }
    }

    #[test]
    fn test_runtime_limit_stops_and_holds() {
        let mut sim = sim();
        run(&mut sim, &[0.0, 1.0, 2.0], 2.5);
        assert_eq!(sim.path.len(), 3);

        let out = tick(&mut sim, &TickInput::running(2.5), 3.0);
        assert_eq!(out.phase, SimPhase::Stopped);
        assert!(!out.reschedule);
        assert_eq!(sim.state.elapsed, 2.0);
        let held_chain = out.chain.unwrap();
        assert_eq!(held_chain.t, 2.0);

        // Further ticks never grow the trace and keep showing the same frame
        for now in [4.0, 5.0, 60.0] {
            let out = tick(&mut sim, &TickInput::running(2.5), now);
            assert_eq!(out.phase, SimPhase::Stopped);
            assert_eq!(out.chain.as_ref(), Some(&held_chain));
        }
        assert_eq!(sim.path.len(), 3);
    }

    #[test]
    fn test_withdrawn_start_stops_then_resumes() {
        let mut sim = sim();
        run(&mut sim, &[10.0, 11.0], 100.0);

        let out = tick(&mut sim, &TickInput::default(), 12.0);
        assert_eq!(out.phase, SimPhase::Stopped);
        assert_eq!(sim.path.len(), 2);
        assert_eq!(sim.state.elapsed, 1.0);

        // Time spent stopped does not count
        let out = tick(&mut sim, &TickInput::running(100.0), 50.0);
        assert_eq!(out.phase, SimPhase::Running);
        assert_eq!(sim.state.elapsed, 1.0);
        tick(&mut sim, &TickInput::running(100.0), 50.5);
        assert_eq!(sim.state.elapsed, 1.5);
        assert_eq!(sim.path.len(), 4);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut sim = sim();
        run(&mut sim, &[0.0, 0.1, 0.2, 0.3], 10.0);
        assert!(!sim.path.is_empty());

        let out = tick(&mut sim, &TickInput { reset: true, start: true, runtime: 10.0 }, 0.4);
        assert_eq!(out.phase, SimPhase::Idle);
        assert!(out.chain.is_none());
        assert_eq!(sim.state.elapsed, 0.0);
        assert!(sim.path.is_empty());

        // Next start begins a fresh trace with a new baseline
        tick(&mut sim, &TickInput::running(10.0), 7.0);
        assert_eq!(sim.state.baseline, 7.0);
        assert_eq!(sim.path.len(), 1);
        assert_eq!(
            sim.path.points()[0],
            evaluate(&LinkageConfig::default(), 0.0).unwrap().pen()
        );
    }

    #[test]
    fn test_bad_inputs_stay_idle() {
        let mut inputs = HostInputs::from(&LinkageConfig::default());
        inputs.rod_lengths.pop();
        let mut sim = Simulation::new(inputs);

        let out = tick(&mut sim, &TickInput::running(10.0), 0.0);
        assert_eq!(out.phase, SimPhase::Idle);
        assert!(matches!(
            out.error,
            Some(PintographError::Config(ConfigError::WrongCardinality { .. }))
        ));
        assert!(sim.config.is_none());
        assert!(sim.path.is_empty());
    }

    #[test]
    fn test_bad_inputs_leave_state_untouched() {
        let mut inputs = HostInputs::from(&LinkageConfig::default());
        inputs.rod_lengths.pop();
        let mut sim = Simulation::new(inputs);
        let before = sim.state.clone();

        let out = tick(&mut sim, &TickInput::running(5.0), 0.0);
        assert!(out.error.is_some());
        assert_eq!(sim.state, before);
        assert_eq!(sim.state.runtime_limit, DEFAULT_RUNTIME);
        assert_eq!(sim.state.ticks, 0);
    }

    #[test]
    fn test_persistent_config_error_recorded_once() {
        let mut inputs = HostInputs::from(&LinkageConfig::default());
        inputs.radii = vec![3.0];
        let mut sim = Simulation::new(inputs);

        for now in [0.0, 1.0, 2.0] {
            let out = tick(&mut sim, &TickInput::running(10.0), now);
            // Still returned on every tick
            assert!(matches!(out.error, Some(PintographError::Config(_))));
        }
        let reported = sim.reported_error.clone().unwrap();
        assert!(reported.contains("radii"));

        // Fixing the inputs starts the run and forgets the error
        sim.inputs = HostInputs::from(&LinkageConfig::default());
        let out = tick(&mut sim, &TickInput::running(10.0), 3.0);
        assert_eq!(out.phase, SimPhase::Running);
        assert!(sim.reported_error.is_none());
    }

    #[test]
    fn test_invalid_runtime_mutates_nothing() {
        let mut sim = sim();
        run(&mut sim, &[0.0, 1.0], 10.0);
        let before = sim.state.clone();

        let out = tick(&mut sim, &TickInput::running(f64::NAN), 2.0);
        assert!(matches!(out.error, Some(PintographError::Config(_))));
        assert_eq!(sim.state, before);
        assert_eq!(sim.path.len(), 2);
    }

    #[test]
    fn test_infeasible_tick_keeps_running() {
        // Counter-rotating rims: |AB| swings between 10 and ~11.66, rods reach 11
        let rods = RodLengths::from_slice(&[5.5, 5.5, 5.5, 5.5, 20.0, 20.0, 0.0]).unwrap();
        let mut disk_b = DiskParams::new(3.0, 1.0);
        disk_b.direction = Direction::Cw;
        let config = LinkageConfig::new(10.0, [DiskParams::new(3.0, 1.0), disk_b], rods).unwrap();
        let mut sim = Simulation::new(HostInputs::from(&config));
        let input = TickInput::running(100.0);

        // t = 0: A = (3, 0), B = (13, 0)
        let out = tick(&mut sim, &input, 0.0);
        assert!(out.chain.is_some());
        assert_eq!(sim.path.len(), 1);

        // t = pi/2: A = (0, 3), B = (10, -3), too far apart for H
        let out = tick(&mut sim, &input, std::f64::consts::FRAC_PI_2);
        assert_eq!(out.phase, SimPhase::Running);
        assert!(out.reschedule);
        assert!(out.chain.is_none());
        assert!(matches!(out.error, Some(PintographError::Solve(_))));
        assert_eq!(sim.path.len(), 1);

        // t = pi: A = (-3, 0), B = (7, 0), solvable again
        let out = tick(&mut sim, &input, std::f64::consts::PI);
        assert!(out.chain.is_some());
        assert!(out.error.is_none());
        assert_eq!(sim.path.len(), 2);
    }
}
