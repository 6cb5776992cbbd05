// SPDX-License-Identifier: MIT OR Apache-2.0
//! Keyframe and transition definitions for camera motions.

use crate::easing::Easing;
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// A camera pose the path passes through
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Camera position
    #[serde(alias = "pos")]
    pub position: Vec3,
    /// Camera orientation (normalized before use)
    #[serde(alias = "rot")]
    pub orientation: Quat,
}

impl Keyframe {
    /// Create a new keyframe
    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Create a keyframe from raw `[x, y, z]` and `[x, y, z, w]` arrays
    pub fn from_arrays(position: [f32; 3], orientation: [f32; 4]) -> Self {
        Self::new(Vec3::from_array(position), Quat::from_array(orientation))
    }

    /// Copy of this keyframe with a unit orientation
    ///
    /// Zero-length or non-finite orientations fall back to identity.
    pub fn normalized(&self) -> Self {
        Self {
            position: self.position,
            orientation: normalize_orientation(self.orientation),
        }
    }
}

/// Normalize a quaternion, falling back to identity when that is impossible
pub fn normalize_orientation(orientation: Quat) -> Quat {
    let length_squared = orientation.length_squared();
    if !length_squared.is_finite() || length_squared <= f32::EPSILON {
        return Quat::IDENTITY;
    }
    if (length_squared - 1.0).abs() <= f32::EPSILON {
        return orientation;
    }
    orientation.normalize()
}

/// Timed move from one keyframe to the next
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    /// Duration in seconds
    #[serde(alias = "dur")]
    pub duration: f32,
    /// Easing applied to progress, linear when absent
    #[serde(default)]
    pub easing: Option<Easing>,
}

impl Transition {
    /// Create a linear transition
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            easing: None,
        }
    }

    /// Set the easing curve
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = Some(easing);
        self
    }

    /// Effective easing curve
    pub fn easing(&self) -> Easing {
        self.easing.unwrap_or_default()
    }

    /// Whether the duration can drive a segment clock
    pub fn is_valid(&self) -> bool {
        self.duration.is_finite() && self.duration > 0.0
    }
}

/// One entry of an authored motion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MotionStep {
    /// Pose to pass through
    Keyframe(Keyframe),
    /// Timing to the next pose
    Transition(Transition),
}

impl MotionStep {
    /// Get as keyframe if possible
    pub fn as_keyframe(&self) -> Option<&Keyframe> {
        match self {
            MotionStep::Keyframe(k) => Some(k),
            MotionStep::Transition(_) => None,
        }
    }

    /// Get as transition if possible
    pub fn as_transition(&self) -> Option<&Transition> {
        match self {
            MotionStep::Transition(t) => Some(t),
            MotionStep::Keyframe(_) => None,
        }
    }
}

impl From<Keyframe> for MotionStep {
    fn from(keyframe: Keyframe) -> Self {
        MotionStep::Keyframe(keyframe)
    }
}

impl From<Transition> for MotionStep {
    fn from(transition: Transition) -> Self {
        MotionStep::Transition(transition)
    }
}
