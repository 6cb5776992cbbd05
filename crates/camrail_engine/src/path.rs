// SPDX-License-Identifier: MIT OR Apache-2.0
//! Turns an authored motion into a playable path.
//!
//! Building is lenient: consumption stops at the first gap in the
//! keyframe/transition alternation and the valid prefix is kept. Only a
//! prefix with fewer than two keyframes is an error.

use crate::blend;
use crate::curve::{CatmullRomCurve, CurveSettings};
use crate::error::PathError;
use crate::keyframe::{Keyframe, MotionStep, Transition};
use crate::motion::Motion;
use glam::{Quat, Vec3};

/// Camera position and orientation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Position
    pub position: Vec3,
    /// Orientation
    pub orientation: Quat,
}

impl Pose {
    /// Create a new pose
    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Quat::IDENTITY)
    }
}

impl From<Keyframe> for Pose {
    fn from(keyframe: Keyframe) -> Self {
        Self::new(keyframe.position, keyframe.orientation)
    }
}

impl From<Pose> for Keyframe {
    fn from(pose: Pose) -> Self {
        Keyframe::new(pose.position, pose.orientation)
    }
}

/// Curve plus index-aligned keyframe data for one motion
#[derive(Debug, Clone)]
pub struct MotionPath {
    curve: CatmullRomCurve,
    positions: Vec<Vec3>,
    orientations: Vec<Quat>,
    transitions: Vec<Transition>,
}

impl MotionPath {
    /// Build a path from a motion, truncating at the first malformed step
    pub fn build(motion: &Motion, settings: CurveSettings) -> Result<Self, PathError> {
        let (keyframes, transitions) = valid_prefix(motion.steps());

        let positions: Vec<Vec3> = keyframes.iter().map(|k| k.position).collect();
        let orientations: Vec<Quat> = keyframes.iter().map(|k| k.orientation).collect();
        let curve = CatmullRomCurve::new(positions.clone(), settings)?;

        Ok(Self {
            curve,
            positions,
            orientations,
            transitions,
        })
    }

    /// The spatial curve
    pub fn curve(&self) -> &CatmullRomCurve {
        &self.curve
    }

    /// Keyframe positions, in order
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Normalized keyframe orientations, in order
    pub fn orientations(&self) -> &[Quat] {
        &self.orientations
    }

    /// Transitions between consecutive keyframes
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Get keyframe count
    pub fn keyframe_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of segments (one per transition)
    pub fn segment_count(&self) -> usize {
        self.transitions.len()
    }

    /// Stored pose of keyframe `index`
    pub fn keyframe(&self, index: usize) -> Option<Pose> {
        Some(Pose::new(
            *self.positions.get(index)?,
            *self.orientations.get(index)?,
        ))
    }

    /// Total playback time in seconds
    pub fn duration(&self) -> f32 {
        self.transitions.iter().map(|t| t.duration).sum()
    }

    /// Segment whose global-t range contains `t`
    pub fn segment_at(&self, t: f32) -> usize {
        let segments = self.segment_count();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        ((t * segments as f32).floor() as usize).min(segments - 1)
    }

    /// Pose at global `t`, blending orientation within `segment`
    pub fn pose_in_segment(&self, t: f32, segment: usize) -> Pose {
        let segment = segment.min(self.segment_count() - 1);
        let position = self.curve.point(t);
        let orientation = blend::blend_orientation(
            position,
            (self.positions[segment], self.positions[segment + 1]),
            (self.orientations[segment], self.orientations[segment + 1]),
        );
        Pose::new(position, orientation)
    }

    /// Pose at global `t`, with the segment derived from `t`
    pub fn pose_at(&self, t: f32) -> Pose {
        self.pose_in_segment(t, self.segment_at(t))
    }
}

/// Longest well-formed prefix of `steps`
///
/// Returns normalized keyframes and exactly one fewer transitions.
fn valid_prefix(steps: &[MotionStep]) -> (Vec<Keyframe>, Vec<Transition>) {
    let mut keyframes = Vec::new();
    let mut transitions = Vec::new();
    let mut pending: Option<Transition> = None;
    let mut iter = steps.iter().enumerate();

    while let Some((index, step)) = iter.next() {
        let MotionStep::Keyframe(keyframe) = step else {
            tracing::warn!("Motion step {} should be a keyframe, truncating", index);
            break;
        };
        if let Some(transition) = pending.take() {
            transitions.push(transition);
        }
        keyframes.push(keyframe.normalized());

        match iter.next() {
            Some((_, MotionStep::Transition(transition))) if transition.is_valid() => {
                pending = Some(*transition);
            }
            Some((index, MotionStep::Transition(transition))) => {
                tracing::warn!(
                    "Motion step {} has invalid duration {}, truncating",
                    index,
                    transition.duration
                );
                break;
            }
            Some((index, MotionStep::Keyframe(_))) => {
                tracing::warn!("Motion step {} should be a transition, truncating", index);
                break;
            }
            None => break,
        }
    }

    if pending.is_some() {
        tracing::debug!("Dropping trailing transition with no target keyframe");
    }

    (keyframes, transitions)
}
