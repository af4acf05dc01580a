//! Pintograph - drawing-machine linkage simulator
//!
//! Core modules:
//! - `sim`: Deterministic linkage kinematics and the time-stepped driver state
//! - `renderer`: Drawable curve output (circles, rods, trace polyline)
//! - `platform`: Clock abstraction (native `Instant`, browser `performance.now()`)
//! - `driver`: Host-facing handle that owns one running linkage
//! - `settings`: Output and tessellation preferences

pub mod driver;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use driver::Driver;
pub use error::{ConfigError, GeometryError, PintographError};
pub use settings::{QualityPreset, Settings};

use glam::DVec2;

/// Simulation constants
pub mod consts {
    /// Default host tick interval (60 Hz)
    pub const SIM_DT: f64 = 1.0 / 60.0;

    /// Default animation runtime limit, seconds
    pub const DEFAULT_RUNTIME: f64 = 60.0;

    /// Number of disks driving a pintograph
    pub const DISK_COUNT: usize = 2;
    /// Rods in the static chain (no pen extension)
    pub const STATIC_ROD_COUNT: usize = 6;
    /// Rods in the animated chain (with pen extension E -> P)
    pub const PEN_ROD_COUNT: usize = 7;

    /// Geometric tolerance for tangency and coincident anchors
    pub const EPS: f64 = 1e-9;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f64, theta: f64) -> DVec2 {
    DVec2::new(r * theta.cos(), r * theta.sin())
}
