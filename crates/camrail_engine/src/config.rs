// SPDX-License-Identifier: MIT OR Apache-2.0
//! Playback configuration.

use crate::curve::CurveSettings;
use crate::error::ConfigError;
use crate::recorder::{DEFAULT_DOT_CAPACITY, DEFAULT_MARKER_CAPACITY};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default number of curve divisions recorded per motion
pub const DEFAULT_SAMPLES_PER_MOTION: usize = 200;

/// Settings fixed when a controller is constructed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Curve construction
    pub curve: CurveSettings,
    /// Curve divisions recorded per motion for debug drawing
    pub samples_per_motion: usize,
    /// Capacity of the curve sample buffer
    pub dot_capacity: usize,
    /// Capacity of the keyframe marker buffer
    pub marker_capacity: usize,
    /// Continue into the next motion when the active one finishes
    pub chain_motions: bool,
    /// Time scale applied to frame deltas
    pub speed: f32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            curve: CurveSettings::default(),
            samples_per_motion: DEFAULT_SAMPLES_PER_MOTION,
            dot_capacity: DEFAULT_DOT_CAPACITY,
            marker_capacity: DEFAULT_MARKER_CAPACITY,
            chain_motions: false,
            speed: 1.0,
        }
    }
}

impl PlaybackConfig {
    /// Parse from RON
    pub fn from_ron(source: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(source)?)
    }

    /// Load from a RON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        Self::from_ron(&source)
    }

    /// Speed with non-finite or negative values replaced
    pub(crate) fn effective_speed(&self) -> f32 {
        if self.speed.is_finite() && self.speed >= 0.0 {
            self.speed
        } else {
            1.0
        }
    }
}
