// SPDX-License-Identifier: MIT OR Apache-2.0
//! Authoring and playback cameras.

use crate::keyframe::Keyframe;
use crate::path::Pose;

/// Which camera the renderer should draw from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveCamera {
    /// Free camera used while placing keyframes
    #[default]
    Authoring,
    /// Camera driven along the path
    Playback,
}

impl ActiveCamera {
    /// Get the display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Authoring => "Authoring",
            Self::Playback => "Playback",
        }
    }

    /// The other camera
    pub fn toggled(self) -> Self {
        match self {
            Self::Authoring => Self::Playback,
            Self::Playback => Self::Authoring,
        }
    }
}

/// The two camera poses and which one is rendered
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CameraRig {
    /// Free authoring camera
    pub authoring: Pose,
    /// Camera the playback engine writes to
    pub playback: Pose,
    active: ActiveCamera,
}

impl CameraRig {
    /// Create a rig with the given authoring pose
    pub fn new(authoring: Pose) -> Self {
        Self {
            authoring,
            ..Self::default()
        }
    }

    /// Camera currently rendered
    pub fn active(&self) -> ActiveCamera {
        self.active
    }

    /// Switch the rendered camera
    pub fn switch_active(&mut self) -> ActiveCamera {
        self.active = self.active.toggled();
        self.active
    }

    /// Pose of the rendered camera
    pub fn render_pose(&self) -> Pose {
        match self.active {
            ActiveCamera::Authoring => self.authoring,
            ActiveCamera::Playback => self.playback,
        }
    }

    /// Move the authoring camera onto the playback camera
    pub fn align_authoring(&mut self) {
        self.authoring = self.playback;
    }

    /// The rendered camera's pose as a keyframe
    pub fn capture_keyframe(&self) -> Keyframe {
        self.render_pose().into()
    }
}
