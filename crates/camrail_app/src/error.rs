// SPDX-License-Identifier: MIT OR Apache-2.0
//! Errors reported by the session runner.

use camrail_engine::ConfigError;

/// Failure while preparing a playback session
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A motion or settings document could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The settings document was written by a newer format
    #[error("settings version {found} is newer than supported version {supported}")]
    UnsupportedVersion {
        /// Version found in the document
        found: u32,
        /// Highest version this build understands
        supported: u32,
    },

    /// The motion named on the command line is not in the motion set
    #[error("unknown motion '{name}' (available: {available})")]
    UnknownMotion {
        /// Requested name
        name: String,
        /// Comma separated names in the motion set
        available: String,
    },

    /// The named motion exists but has fewer than two usable keyframes
    #[error("motion '{name}' cannot be played")]
    UnplayableMotion {
        /// Requested name
        name: String,
    },
}
