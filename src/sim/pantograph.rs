//! Two-rotor pantograph
//!
//! The simplest drawing machine: the pen sits at the tip of one rotor arm
//! mounted on the tip of another, so its position is the vector sum of the
//! two arm tips. No rod constraints, so it never fails.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::polar_to_cartesian;

/// Arm radii and angular speeds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PantographParams {
    pub r1: f64,
    pub s1: f64,
    pub r2: f64,
    pub s2: f64,
}

impl Default for PantographParams {
    fn default() -> Self {
        Self {
            r1: 5.0,
            s1: 1.0,
            r2: 3.0,
            s2: 2.0,
        }
    }
}

/// Pen position at phase `t`
pub fn pantograph_point(p: &PantographParams, t: f64) -> DVec2 {
    polar_to_cartesian(p.r1, p.s1 * t) + polar_to_cartesian(p.r2, p.s2 * t)
}

/// One full turn sampled at `steps + 1` phases from 0 to 2π
///
/// With `steps == 0` the pattern is the single point at phase 0.
pub fn pantograph_pattern(p: &PantographParams, steps: usize) -> Vec<DVec2> {
    if steps == 0 {
        return vec![pantograph_point(p, 0.0)];
    }
    (0..=steps)
        .map(|i| {
            let t = i as f64 / steps as f64 * std::f64::consts::TAU;
            pantograph_point(p, t)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_point_at_zero_is_sum_of_radii() {
        let p = PantographParams::default();
        assert_eq!(pantograph_point(&p, 0.0), DVec2::new(8.0, 0.0));
    }

    #[test]
    fn test_point_half_turn() {
        // Arm 1 at pi, arm 2 at 2pi
        let pos = pantograph_point(&PantographParams::default(), PI);
        assert!((pos - DVec2::new(-2.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn test_pattern_is_closed() {
        let p = PantographParams::default();
        let pattern = pantograph_pattern(&p, 360);
        assert_eq!(pattern.len(), 361);
        // Integer speeds close the curve after one turn
        let first = pattern[0];
        let last = pattern[pattern.len() - 1];
        assert!((first - last).length() < 1e-9);
    }

    #[test]
    fn test_pattern_zero_steps() {
        let p = PantographParams::default();
        assert_eq!(pantograph_pattern(&p, 0), vec![DVec2::new(8.0, 0.0)]);
    }
}
