// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types for path building and configuration.

use std::path::PathBuf;

/// Error while turning a motion into a playable path
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// Not enough keyframes survived truncation to span a curve
    #[error("motion has {keyframes} usable keyframe(s), at least 2 are required")]
    Degenerate {
        /// Number of keyframes that were usable
        keyframes: usize,
    },
}

/// Error while loading or saving configuration documents
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read or written
    #[error("failed to access {path:?}: {source}")]
    Io {
        /// File that was being accessed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid RON for the expected type
    #[error("failed to parse RON: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// The value could not be written as RON
    #[error("failed to serialize RON: {0}")]
    Serialize(#[from] ron::Error),
}

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
