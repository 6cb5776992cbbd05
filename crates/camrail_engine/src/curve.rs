// SPDX-License-Identifier: MIT OR Apache-2.0
//! Open Catmull-Rom curve through keyframe positions.
//!
//! The curve is parameterized by a global `t` in `[0, 1]`; control point `i`
//! of `n` sits exactly at `t = i / (n - 1)`. Knot spacing is chosen by
//! [`CurveKind`]: centripetal spacing avoids cusps and self-intersections
//! when keyframes are unevenly spaced, which is the normal case for
//! hand-placed camera poses.

use crate::error::PathError;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Default tension for [`CurveKind::Uniform`]
pub const DEFAULT_TENSION: f32 = 0.2;

/// Knot intervals shorter than this are treated as coincident points
const MIN_KNOT_INTERVAL: f32 = 1e-4;

/// Knot parameterization of the curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CurveKind {
    /// Knot interval is the square root of the chord length
    #[default]
    Centripetal,
    /// Knot interval is the chord length
    Chordal,
    /// Evenly spaced knots with tension-scaled tangents
    Uniform,
}

/// Curve construction settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveSettings {
    /// Knot parameterization
    pub kind: CurveKind,
    /// Tangent scale, only used by [`CurveKind::Uniform`]
    pub tension: f32,
}

impl Default for CurveSettings {
    fn default() -> Self {
        Self {
            kind: CurveKind::Centripetal,
            tension: DEFAULT_TENSION,
        }
    }
}

/// Open interpolating spline through a list of points
#[derive(Debug, Clone, PartialEq)]
pub struct CatmullRomCurve {
    points: Vec<Vec3>,
    settings: CurveSettings,
}

impl CatmullRomCurve {
    /// Create a curve through `points`
    pub fn new(points: Vec<Vec3>, settings: CurveSettings) -> Result<Self, PathError> {
        if points.len() < 2 {
            return Err(PathError::Degenerate {
                keyframes: points.len(),
            });
        }
        Ok(Self { points, settings })
    }

    /// Create a centripetal curve through `points`
    pub fn centripetal(points: Vec<Vec3>) -> Result<Self, PathError> {
        Self::new(points, CurveSettings::default())
    }

    /// Control points the curve passes through
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Construction settings
    pub fn settings(&self) -> CurveSettings {
        self.settings
    }

    /// Number of spans between control points
    pub fn span_count(&self) -> usize {
        self.points.len() - 1
    }

    /// Evaluate the curve at global `t`, clamped to `[0, 1]`
    pub fn point(&self, t: f32) -> Vec3 {
        let last = self.points.len() - 1;
        if t.is_nan() || t <= 0.0 {
            return self.points[0];
        }
        if t >= 1.0 {
            return self.points[last];
        }

        let p = last as f32 * t;
        let mut span = p.floor() as usize;
        let mut weight = p - span as f32;
        if span >= last {
            span = last - 1;
            weight = 1.0;
        }
        if weight == 0.0 {
            return self.points[span];
        }

        let p1 = self.points[span];
        let p2 = self.points[span + 1];
        let p0 = if span > 0 {
            self.points[span - 1]
        } else {
            2.0 * p1 - p2
        };
        let p3 = if span + 2 <= last {
            self.points[span + 2]
        } else {
            2.0 * p2 - p1
        };

        let (t1, t2) = match self.settings.kind {
            CurveKind::Uniform => {
                let tension = self.settings.tension;
                (tension * (p2 - p0), tension * (p3 - p1))
            }
            CurveKind::Centripetal => nonuniform_tangents(p0, p1, p2, p3, 0.25),
            CurveKind::Chordal => nonuniform_tangents(p0, p1, p2, p3, 0.5),
        };

        hermite(p1, p2, t1, t2, weight)
    }

    /// Sample `divisions + 1` evenly spaced points, both ends included
    pub fn sample_points(&self, divisions: usize) -> Vec<Vec3> {
        if divisions == 0 {
            return vec![self.points[0]];
        }
        (0..=divisions)
            .map(|i| self.point(i as f32 / divisions as f32))
            .collect()
    }
}

/// Tangents of the middle span for non-uniform knot spacing
///
/// `exponent` is applied to squared distances: 0.25 gives centripetal
/// spacing, 0.5 gives chordal spacing.
fn nonuniform_tangents(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, exponent: f32) -> (Vec3, Vec3) {
    let mut dt0 = p0.distance_squared(p1).powf(exponent);
    let mut dt1 = p1.distance_squared(p2).powf(exponent);
    let mut dt2 = p2.distance_squared(p3).powf(exponent);

    if dt1 < MIN_KNOT_INTERVAL {
        dt1 = 1.0;
    }
    if dt0 < MIN_KNOT_INTERVAL {
        dt0 = dt1;
    }
    if dt2 < MIN_KNOT_INTERVAL {
        dt2 = dt1;
    }

    let t1 = (p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1) + (p2 - p1) / dt1;
    let t2 = (p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2) + (p3 - p2) / dt2;

    // Rescale tangents from knot space to the unit span.
    (t1 * dt1, t2 * dt1)
}

/// Cubic Hermite segment from `a` to `b` with tangents `ta`, `tb`
fn hermite(a: Vec3, b: Vec3, ta: Vec3, tb: Vec3, t: f32) -> Vec3 {
    let c0 = a;
    let c1 = ta;
    let c2 = -3.0 * a + 3.0 * b - 2.0 * ta - tb;
    let c3 = 2.0 * a - 2.0 * b + ta + tb;
    c0 + t * (c1 + t * (c2 + t * c3))
}
