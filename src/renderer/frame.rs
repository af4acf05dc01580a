//! Per-tick drawable output

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::shapes::{Curve, Stroke, circle, colors, faded_trace};
use crate::error::ConfigError;
use crate::settings::Settings;
use crate::sim::{LinkageChain, PathBuffer};

/// Everything the host draws for one tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Phase the chain was solved at
    pub t: f64,
    /// Disk circles followed by rod lines
    pub curves: Vec<Curve>,
    /// H then E
    pub intersections: [DVec2; 2],
    pub pen: DVec2,
    /// Pen trace so far (animated runs only)
    pub trace: Option<Curve>,
}

impl Frame {
    /// Build a frame from a chain and, for animated runs, the pen trace
    pub fn build(chain: &LinkageChain, path: Option<&PathBuffer>, settings: &Settings) -> Self {
        let mut curves = Vec::with_capacity(chain.disks.len() + chain.segments.len());

        if settings.show_disks {
            curves.extend(chain.disks.iter().map(|disk| Curve::Circle {
                center: disk.center,
                radius: disk.radius,
            }));
        }
        if settings.show_rods {
            curves.extend(chain.segments.iter().map(|seg| Curve::Line {
                start: seg.start,
                end: seg.end,
            }));
        }

        let trace = path
            .filter(|_| settings.show_trace)
            .map(|path| Curve::Polyline {
                points: path.points().to_vec(),
            });

        Self {
            t: chain.t,
            curves,
            intersections: chain.intersections(),
            pen: chain.pen(),
            trace,
        }
    }

    /// Flatten the frame into colored line strips
    pub fn strokes(&self, settings: &Settings) -> Vec<Stroke> {
        let segments = settings.circle_segments();
        let mut strokes: Vec<Stroke> = self
            .curves
            .iter()
            .map(|curve| Stroke {
                points: curve.tessellate(segments),
                color: match curve {
                    Curve::Circle { .. } => colors::DISK,
                    _ => colors::ROD,
                },
            })
            .collect();

        if let Some(Curve::Polyline { points }) = &self.trace {
            strokes.extend(faded_trace(points, settings.trace_bands()));
        }

        // Joint markers as small closed loops
        for joint in self.intersections.iter().chain(std::iter::once(&self.pen)) {
            strokes.push(Stroke {
                points: circle(*joint, 0.15, 8),
                color: colors::JOINT,
            });
        }

        strokes
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }
}
