//! Frame output
//!
//! Turns an evaluated chain and the pen trace into curves the host draws.

pub mod frame;
pub mod shapes;

pub use frame::Frame;
pub use shapes::{Curve, Stroke};
