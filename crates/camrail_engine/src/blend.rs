// SPDX-License-Identifier: MIT OR Apache-2.0
//! Orientation blending along a segment.
//!
//! Rotation is not driven by the segment clock. The blend weight is the
//! camera's relative distance between the segment's two keyframe positions,
//! so rotation follows where the camera is on the curve rather than how far
//! through the transition it is in time. Easing therefore shapes position
//! and rotation differently; authored paths depend on that.

use glam::{Quat, Vec3};

/// Relative distance of `point` between `start` and `end`
///
/// Returns `0.0` when the point coincides with both ends.
pub fn spatial_weight(point: Vec3, start: Vec3, end: Vec3) -> f32 {
    let d1 = point.distance(start);
    let d2 = point.distance(end);
    let total = d1 + d2;
    if total <= 0.0 || !total.is_finite() {
        return 0.0;
    }
    d1 / total
}

/// Spherical interpolation that returns the end points unchanged
///
/// `weight <= 0` yields `from` and `weight >= 1` yields `to` bit for bit.
pub fn slerp(from: Quat, to: Quat, weight: f32) -> Quat {
    if weight.is_nan() || weight <= 0.0 {
        return from;
    }
    if weight >= 1.0 {
        return to;
    }
    from.slerp(to, weight)
}

/// Camera orientation at `point` within a segment
pub fn blend_orientation(point: Vec3, positions: (Vec3, Vec3), orientations: (Quat, Quat)) -> Quat {
    let weight = spatial_weight(point, positions.0, positions.1);
    slerp(orientations.0, orientations.1, weight)
}
