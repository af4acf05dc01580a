//! Platform abstraction layer
//!
//! Handles native/browser differences for:
//! - Time (monotonic clock readings in seconds)

pub mod time;

pub use time::{Clock, ManualClock};

#[cfg(not(target_arch = "wasm32"))]
pub use time::SystemClock;

#[cfg(target_arch = "wasm32")]
pub use time::PerformanceClock;
