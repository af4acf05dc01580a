//! Linkage chain evaluation
//!
//! Solves every joint of the pintograph for one instant:
//!
//! ```text
//!          E ── P
//!         / \
//!        C   D
//!         \ /
//!          H
//!         / \
//!        A   B      A, B on the disk rims
//! ```
//!
//! H hangs from A and B, C and D extend A-H and B-H through H, E hangs from
//! C and D, and the optional pen arm extends C-E through E. Evaluation is
//! pure: no state survives between calls.

use std::fmt;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::config::{Disk, LinkageConfig};
use super::geometry::{Branch, extend, intersect};
use crate::consts::DISK_COUNT;
use crate::error::SolveError;

/// Branch taken when solving H from A and B
pub const H_BRANCH: Branch = Branch::Plus;
/// Branch taken when solving E from C and D
pub const E_BRANCH: Branch = Branch::Minus;

/// Number of rod segments drawn per chain
pub const SEGMENT_COUNT: usize = 6;

/// Named joint of the chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JointId {
    A,
    B,
    H,
    C,
    D,
    E,
    P,
}

impl fmt::Display for JointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JointId::A => "A",
            JointId::B => "B",
            JointId::H => "H",
            JointId::C => "C",
            JointId::D => "D",
            JointId::E => "E",
            JointId::P => "P",
        };
        f.write_str(name)
    }
}

/// Joint positions for one instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Joints {
    pub a: DVec2,
    pub b: DVec2,
    pub h: DVec2,
    pub c: DVec2,
    pub d: DVec2,
    pub e: DVec2,
    /// Pen point (equal to `e` without a pen arm)
    pub p: DVec2,
}

impl Joints {
    pub fn get(&self, id: JointId) -> DVec2 {
        match id {
            JointId::A => self.a,
            JointId::B => self.b,
            JointId::H => self.h,
            JointId::C => self.c,
            JointId::D => self.d,
            JointId::E => self.e,
            JointId::P => self.p,
        }
    }
}

/// A rod drawn between two joints
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from: JointId,
    pub to: JointId,
    pub start: DVec2,
    pub end: DVec2,
}

impl Segment {
    fn between(joints: &Joints, from: JointId, to: JointId) -> Self {
        Self {
            from,
            to,
            start: joints.get(from),
            end: joints.get(to),
        }
    }

    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }
}

/// Fully evaluated linkage at one phase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkageChain {
    /// Phase the chain was evaluated at
    pub t: f64,
    pub disks: [Disk; DISK_COUNT],
    pub joints: Joints,
    /// Rods A-C, B-D, H-C, H-D, C-P (or C-E), D-E
    pub segments: [Segment; SEGMENT_COUNT],
}

impl LinkageChain {
    /// Traced point
    pub fn pen(&self) -> DVec2 {
        self.joints.p
    }

    /// The two rod-rod intersections, H then E
    pub fn intersections(&self) -> [DVec2; 2] {
        [self.joints.h, self.joints.e]
    }
}

/// Evaluate the chain at phase `t`
///
/// Carries the pen arm if the configuration has one; otherwise E is the pen.
pub fn evaluate(config: &LinkageConfig, t: f64) -> Result<LinkageChain, SolveError> {
    solve(config, t, config.rods.pen_ratio())
}

/// Evaluate the six-rod chain at phase `t`, ignoring any pen arm
pub fn solve_static(config: &LinkageConfig, t: f64) -> Result<LinkageChain, SolveError> {
    solve(config, t, None)
}

fn solve(config: &LinkageConfig, t: f64, pen_ratio: Option<f64>) -> Result<LinkageChain, SolveError> {
    let rods = &config.rods;
    let disks = config.placed_disks();

    let a = disks[0].rim_point(t);
    let b = disks[1].rim_point(t);

    let h = intersect(a, rods.a_h, b, rods.b_h, H_BRANCH).map_err(|source| SolveError {
        joint: JointId::H,
        source,
    })?;

    let c = extend(h, a, rods.c_ratio());
    let d = extend(h, b, rods.d_ratio());

    let e = intersect(c, rods.c_e, d, rods.d_e, E_BRANCH).map_err(|source| SolveError {
        joint: JointId::E,
        source,
    })?;

    let (p, tip) = match pen_ratio {
        Some(ratio) => (extend(e, c, ratio), JointId::P),
        None => (e, JointId::E),
    };

    let joints = Joints { a, b, h, c, d, e, p };
    let segments = [
        Segment::between(&joints, JointId::A, JointId::C),
        Segment::between(&joints, JointId::B, JointId::D),
        Segment::between(&joints, JointId::H, JointId::C),
        Segment::between(&joints, JointId::H, JointId::D),
        Segment::between(&joints, JointId::C, tip),
        Segment::between(&joints, JointId::D, JointId::E),
    ];

    Ok(LinkageChain {
        t,
        disks,
        joints,
        segments,
    })
}

/// Pen points sampled over a phase interval
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    pub points: Vec<DVec2>,
    /// Samples where the chain could not be assembled
    pub infeasible: usize,
}

/// Sample the pen over `steps + 1` evenly spaced phases in `[t0, t1]`
///
/// Infeasible instants are skipped and counted.
pub fn trace(config: &LinkageConfig, t0: f64, t1: f64, steps: usize) -> Trace {
    let mut out = Trace {
        points: Vec::with_capacity(steps + 1),
        infeasible: 0,
    };

    for i in 0..=steps {
        let t = if steps == 0 {
            t0
        } else {
            t0 + (t1 - t0) * (i as f64 / steps as f64)
        };
        match evaluate(config, t) {
            Ok(chain) => out.points.push(chain.pen()),
            Err(err) => {
                log::debug!("trace sample t={t:.4} skipped: {err}");
                out.infeasible += 1;
            }
        }
    }

    out
}
