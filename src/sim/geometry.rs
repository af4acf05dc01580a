//! Rod constraint primitives
//!
//! A joint held by two rods lies on the intersection of two circles: one
//! around each anchor, with the rod length as radius. A joint carried on the
//! far end of a rigid bar lies on the line through the bar's two known points.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::EPS;
use crate::error::GeometryError;

/// Which of the two circle-circle solutions to take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Branch {
    /// Base point plus the perpendicular offset (index 0)
    #[default]
    Plus,
    /// Base point minus the perpendicular offset (index 1)
    Minus,
}

impl Branch {
    /// Branch from its numeric index (0 = Plus, anything else = Minus)
    pub fn from_index(index: u8) -> Self {
        if index == 0 { Branch::Plus } else { Branch::Minus }
    }

    fn sign(self) -> f64 {
        match self {
            Branch::Plus => 1.0,
            Branch::Minus => -1.0,
        }
    }
}

/// Find the point at distance `l1` from `p1` and `l2` from `p2`
///
/// Law of cosines: with `d = |p2 - p1|`, the foot of the solution on the
/// anchor line sits `a = (l1² - l2² + d²) / 2d` from `p1`, and the solution is
/// `h = sqrt(l1² - a²)` off that line. The offset direction is the anchor
/// line rotated clockwise, so `Branch::Plus` lies to the right of `p1 -> p2`.
pub fn intersect(p1: DVec2, l1: f64, p2: DVec2, l2: f64, branch: Branch) -> Result<DVec2, GeometryError> {
    let delta = p2 - p1;
    let d = delta.length();

    if d < EPS {
        return Err(GeometryError::Degenerate);
    }

    // Slack so exact tangency survives round-off in `d`
    let tol = EPS * (l1 + l2 + d).max(1.0);
    if d > l1 + l2 + tol || d < (l1 - l2).abs() - tol {
        return Err(GeometryError::Infeasible { distance: d, l1, l2 });
    }

    let a = (l1 * l1 - l2 * l2 + d * d) / (2.0 * d);
    let h = (l1 * l1 - a * a).max(0.0).sqrt();

    let base = p1 + delta * (a / d);
    let offset = DVec2::new(delta.y, -delta.x) * (h / d);

    Ok(base + offset * branch.sign())
}

/// Extend the bar `from -> base` past `base` by `ratio` times its length
///
/// Returns `base + ratio * (base - from)`. Never fails.
#[inline]
pub fn extend(base: DVec2, from: DVec2, ratio: f64) -> DVec2 {
    base + (base - from) * ratio
}

/// Point on the rim of a disk at angle `theta`
#[inline]
pub fn rim_point(center: DVec2, radius: f64, theta: f64) -> DVec2 {
    center + crate::polar_to_cartesian(radius, theta)
}
