//! Drawable primitives for 2D linkage output

use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Colors for linkage elements (RGBA)
pub mod colors {
    pub const DISK: [f32; 4] = [0.3, 0.3, 0.4, 1.0];
    pub const ROD: [f32; 4] = [0.85, 0.85, 0.9, 1.0];
    pub const TRACE: [f32; 4] = [0.2, 0.8, 0.4, 1.0];
    pub const JOINT: [f32; 4] = [1.0, 0.4, 0.2, 1.0];
}

/// A curve the host can draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Curve {
    Circle { center: DVec2, radius: f64 },
    Line { start: DVec2, end: DVec2 },
    Polyline { points: Vec<DVec2> },
}

impl Curve {
    /// Vertices of the curve as a line strip
    ///
    /// Circles come back closed (first vertex repeated at the end).
    pub fn tessellate(&self, circle_segments: u32) -> Vec<DVec2> {
        match self {
            Curve::Circle { center, radius } => circle(*center, *radius, circle_segments),
            Curve::Line { start, end } => vec![*start, *end],
            Curve::Polyline { points } => points.clone(),
        }
    }

    pub fn length(&self) -> f64 {
        match self {
            Curve::Circle { radius, .. } => TAU * radius,
            Curve::Line { start, end } => start.distance(*end),
            Curve::Polyline { points } => points.windows(2).map(|w| w[0].distance(w[1])).sum(),
        }
    }
}

/// A colored line strip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub points: Vec<DVec2>,
    pub color: [f32; 4],
}

/// Closed polygon approximating a circle
pub fn circle(center: DVec2, radius: f64, segments: u32) -> Vec<DVec2> {
    let segments = segments.max(3);
    (0..=segments)
        .map(|i| {
            // Last vertex reuses angle 0 so the loop closes exactly
            let theta = (i % segments) as f64 / segments as f64 * TAU;
            center + crate::polar_to_cartesian(radius, theta)
        })
        .collect()
}

/// Trace strokes fading from transparent (oldest) to opaque (newest)
///
/// The trace is split into `bands` strokes of equal point count; adjacent
/// bands share an endpoint so the strip stays continuous.
pub fn faded_trace(points: &[DVec2], bands: usize) -> Vec<Stroke> {
    if points.len() < 2 {
        return Vec::new();
    }
    let bands = bands.clamp(1, points.len() - 1);
    let per_band = (points.len() - 1).div_ceil(bands);

    let mut strokes = Vec::with_capacity(bands);
    let mut start = 0;
    while start < points.len() - 1 {
        let end = (start + per_band).min(points.len() - 1);
        let age = end as f32 / (points.len() - 1) as f32;
        let [r, g, b, _] = colors::TRACE;
        strokes.push(Stroke {
            points: points[start..=end].to_vec(),
            color: [r, g, b, 0.15 + 0.85 * age],
        });
        start = end;
    }
    strokes
}
