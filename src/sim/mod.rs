//! Deterministic linkage simulation
//!
//! Everything that decides where the linkage is lives here. This module is
//! pure and host-agnostic:
//! - Chain evaluation depends only on configuration and phase
//! - Time enters `tick` as an explicit clock reading
//! - No rendering or platform dependencies

pub mod chain;
pub mod config;
pub mod geometry;
pub mod pantograph;
pub mod state;
pub mod tick;

pub use chain::{
    E_BRANCH, H_BRANCH, JointId, Joints, LinkageChain, Segment, Trace, evaluate, solve_static, trace,
};
pub use config::{Direction, Disk, DiskParams, HostInputs, LinkageConfig, RodLengths};
pub use geometry::{Branch, extend, intersect};
pub use pantograph::{PantographParams, pantograph_pattern, pantograph_point};
pub use state::{PathBuffer, SimPhase, Simulation, SimulationState};
pub use tick::{TickInput, TickOutput, tick};
