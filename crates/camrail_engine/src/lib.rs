// SPDX-License-Identifier: MIT OR Apache-2.0
//! Keyframed camera path playback.
//!
//! This crate moves a camera along an authored path:
//! - Motions of keyframe poses and timed, eased transitions
//! - Centripetal Catmull-Rom curves through keyframe positions
//! - A chain of independently clocked segments per motion
//! - Orientation blended by distance along each segment
//! - Playback control: restart, pause, jump, external scrubbing
//!
//! ## Architecture
//!
//! Motions are turned into [`MotionPath`]s once, when a
//! [`PlaybackController`] is built. Playback then only touches the active
//! motion's [`SegmentChain`], which the host advances once per frame.

pub mod blend;
pub mod camera;
pub mod config;
pub mod controller;
pub mod curve;
pub mod easing;
pub mod error;
pub mod keyframe;
pub mod motion;
pub mod path;
pub mod recorder;
pub mod segment;

pub use camera::{ActiveCamera, CameraRig};
pub use config::PlaybackConfig;
pub use controller::{PlaybackController, PlaybackState, ProgressCallback};
pub use curve::{CatmullRomCurve, CurveKind, CurveSettings};
pub use easing::Easing;
pub use error::{ConfigError, PathError};
pub use keyframe::{Keyframe, MotionStep, Transition};
pub use motion::{Motion, MotionSet};
pub use path::{MotionPath, Pose};
pub use recorder::{PathSampleRecorder, SampleBuffer};
pub use segment::{PauseChange, Segment, SegmentChain, SegmentState, SegmentTick};

pub use glam::{Quat, Vec3};
