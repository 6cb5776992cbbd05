// SPDX-License-Identifier: MIT OR Apache-2.0
//! Playback controller: the public control surface of the engine.
//!
//! The controller owns every prebuilt motion path, the segment chain of the
//! active motion, and the camera rig. It is driven by [`PlaybackController::update`]
//! once per rendered frame and never runs anything on its own.

use crate::camera::{ActiveCamera, CameraRig};
use crate::config::PlaybackConfig;
use crate::keyframe::Keyframe;
use crate::motion::MotionSet;
use crate::path::{MotionPath, Pose};
use crate::recorder::PathSampleRecorder;
use crate::segment::{PauseChange, SegmentChain};
use std::time::Duration;

/// Observer of playback progress: `(global_t, in_animation)`
pub type ProgressCallback = Box<dyn FnMut(f32, bool)>;

/// Snapshot of what the controller is doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaybackState {
    /// Motion the controller plays, scrubs and restarts
    pub active_motion: usize,
    /// Live segment of the active chain
    pub active_segment: Option<usize>,
    /// A chain is playing (possibly paused)
    pub running: bool,
    /// The live segment is paused
    pub paused: bool,
}

/// A motion from the set together with its built path
struct MotionSlot {
    name: String,
    /// `None` when the motion is too short to play
    path: Option<MotionPath>,
}

/// Drives the playback camera along prebuilt motion paths
pub struct PlaybackController {
    motions: Vec<MotionSlot>,
    chain: Option<SegmentChain>,
    state: PlaybackState,
    rig: CameraRig,
    recorder: PathSampleRecorder,
    config: PlaybackConfig,
    on_progress: Option<ProgressCallback>,
}

impl PlaybackController {
    /// Build paths for every motion in `motions`
    ///
    /// Motions that cannot be played are kept as disabled slots so that
    /// indices stay aligned with the motion set.
    /// The first playable motion starts out active.
    pub fn new(motions: &MotionSet, config: PlaybackConfig) -> Self {
        let mut recorder = PathSampleRecorder::new(config.dot_capacity, config.marker_capacity);

        let motions = motions
            .iter()
            .map(|(name, motion)| {
                let path = match MotionPath::build(motion, config.curve) {
                    Ok(path) => {
                        recorder.record_markers(path.positions());
                        recorder.record_dots(&path.curve().sample_points(config.samples_per_motion));
                        tracing::debug!(
                            "Built motion '{}': {} keyframes, {:.2}s",
                            name,
                            path.keyframe_count(),
                            path.duration()
                        );
                        Some(path)
                    }
                    Err(e) => {
                        tracing::warn!("Motion '{}' disabled: {}", name, e);
                        None
                    }
                };
                MotionSlot {
                    name: name.to_string(),
                    path,
                }
            })
            .collect::<Vec<_>>();

        let active_motion = motions
            .iter()
            .position(|slot| slot.path.is_some())
            .unwrap_or(0);

        Self {
            motions,
            chain: None,
            state: PlaybackState {
                active_motion,
                ..PlaybackState::default()
            },
            rig: CameraRig::default(),
            recorder,
            config,
            on_progress: None,
        }
    }

    /// Register the progress observer, replacing any previous one
    pub fn on_progress(&mut self, callback: impl FnMut(f32, bool) + 'static) {
        self.on_progress = Some(Box::new(callback));
    }

    /// Remove the progress observer
    pub fn clear_on_progress(&mut self) {
        self.on_progress = None;
    }

    /// Discard any chain and play the active motion from its first segment
    pub fn restart(&mut self) {
        let index = self.state.active_motion;
        let Some(path) = self.path(index) else {
            tracing::debug!("Restart ignored, motion {} is not playable", index);
            return;
        };

        let mut chain = SegmentChain::from_transitions(path.transitions());
        chain.start();
        tracing::info!("Motion '{}' started", self.motions[index].name);

        self.chain = Some(chain);
        self.state = PlaybackState {
            active_motion: index,
            active_segment: Some(0),
            running: true,
            paused: false,
        };
    }

    /// Pause the live segment, or resume it when already paused
    pub fn toggle_pause(&mut self) {
        let Some(chain) = self.chain.as_mut() else {
            return;
        };
        match chain.toggle_pause() {
            Some(PauseChange::Paused(segment)) => {
                tracing::info!("Paused in segment {}", segment);
                self.state.paused = true;
            }
            Some(PauseChange::Resumed(segment)) => {
                tracing::info!("Resumed in segment {}", segment);
                self.state.paused = false;
            }
            None => {}
        }
    }

    /// Pause (`true`) or resume (`false`) the live segment
    pub fn set_paused(&mut self, paused: bool) {
        let Some(chain) = self.chain.as_mut() else {
            return;
        };
        if chain.set_paused(paused) {
            self.state.paused = paused;
        }
    }

    /// Pause the live segment
    pub fn pause(&mut self) {
        self.set_paused(true);
    }

    /// Resume the paused segment
    pub fn resume(&mut self) {
        self.set_paused(false);
    }

    /// Snap the playback camera to a keyframe
    ///
    /// `global_index` is 1-based and counts keyframes across all playable
    /// motions; the last keyframe of one motion shares its index with the
    /// first keyframe of the next, and the later motion wins. Any running
    /// chain is discarded and playback is not restarted. Returns `false`
    /// and changes nothing when the index is out of range.
    pub fn jump_to_keyframe(&mut self, global_index: usize) -> bool {
        let Some((motion, keyframe)) = self.resolve_jump(global_index) else {
            tracing::debug!("Jump to keyframe {} is out of range", global_index);
            return false;
        };
        let Some(pose) = self.path(motion).and_then(|path| path.keyframe(keyframe)) else {
            return false;
        };

        self.chain = None;
        self.state = PlaybackState {
            active_motion: motion,
            ..PlaybackState::default()
        };
        self.rig.playback = pose;
        tracing::info!(
            "Jumped to keyframe {} of motion '{}'",
            keyframe,
            self.motions[motion].name
        );
        true
    }

    /// Place the camera at global `t` of the active motion, outside the clock
    ///
    /// The blending segment is derived from `t`, so the result does not
    /// depend on playback state. Running chains are left untouched.
    pub fn set_progress_external(&mut self, t: f32) {
        if !t.is_finite() {
            return;
        }
        let t = t.clamp(0.0, 1.0);
        let Some(path) = self.path(self.state.active_motion) else {
            return;
        };
        self.rig.playback = path.pose_at(t);
        self.notify(t, false);
    }

    /// Advance playback by one frame
    pub fn update(&mut self, delta: Duration) {
        if !self.state.running || self.state.paused {
            return;
        }
        let Some(chain) = self.chain.as_mut() else {
            return;
        };
        let delta = delta.as_secs_f32() * self.config.effective_speed();
        let Some(tick) = chain.advance(delta) else {
            return;
        };
        let live = chain.live_segment();
        let finished = chain.is_finished();

        let Some(path) = self.motions[self.state.active_motion].path.as_ref() else {
            return;
        };
        self.rig.playback = path.pose_in_segment(tick.global_t, tick.segment);
        self.state.active_segment = live;

        self.notify(tick.global_t, true);

        if finished {
            self.finish_motion();
        }
    }

    /// Make another motion active, discarding any chain
    pub fn select_motion(&mut self, index: usize) -> bool {
        if self.path(index).is_none() {
            tracing::debug!("Motion {} is not playable", index);
            return false;
        }
        self.chain = None;
        self.state = PlaybackState {
            active_motion: index,
            ..PlaybackState::default()
        };
        true
    }

    /// Toggle which camera is rendered
    pub fn switch_active_camera(&mut self) -> ActiveCamera {
        let active = self.rig.switch_active();
        tracing::info!("Rendering from {} camera", active.name());
        active
    }

    /// Move the authoring camera onto the playback camera
    pub fn align_authoring_camera(&mut self) {
        self.rig.align_authoring();
    }

    /// The rendered camera's pose as a keyframe, also logged as RON
    pub fn capture_keyframe(&self) -> Keyframe {
        let keyframe = self.rig.capture_keyframe();
        match ron::to_string(&keyframe) {
            Ok(text) => tracing::info!("Captured keyframe: {}", text),
            Err(e) => tracing::warn!("Failed to format captured keyframe: {}", e),
        }
        keyframe
    }

    /// Current playback state
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Whether a chain is running and not paused
    pub fn is_playing(&self) -> bool {
        self.state.running && !self.state.paused
    }

    /// Camera rig
    pub fn camera(&self) -> &CameraRig {
        &self.rig
    }

    /// Mutable camera rig, for moving the authoring camera
    pub fn camera_mut(&mut self) -> &mut CameraRig {
        &mut self.rig
    }

    /// Pose of the playback camera
    pub fn playback_pose(&self) -> Pose {
        self.rig.playback
    }

    /// Pose of the rendered camera
    pub fn render_pose(&self) -> Pose {
        self.rig.render_pose()
    }

    /// Segment chain of the active motion, if one was started
    pub fn chain(&self) -> Option<&SegmentChain> {
        self.chain.as_ref()
    }

    /// Debug sample points
    pub fn recorder(&self) -> &PathSampleRecorder {
        &self.recorder
    }

    /// Configuration the controller was built with
    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// Get motion count, playable or not
    pub fn motion_count(&self) -> usize {
        self.motions.len()
    }

    /// Name of motion `index`
    pub fn motion_name(&self, index: usize) -> Option<&str> {
        self.motions.get(index).map(|slot| slot.name.as_str())
    }

    /// Built path of motion `index`, `None` when missing or not playable
    pub fn path(&self, index: usize) -> Option<&MotionPath> {
        self.motions.get(index)?.path.as_ref()
    }

    /// Number of valid indices for [`PlaybackController::jump_to_keyframe`]
    pub fn jump_point_count(&self) -> usize {
        let spans: usize = self
            .motions
            .iter()
            .filter_map(|slot| slot.path.as_ref())
            .map(MotionPath::segment_count)
            .sum();
        if spans == 0 {
            0
        } else {
            spans + 1
        }
    }

    /// Map a 1-based global keyframe index to `(motion, keyframe)`
    fn resolve_jump(&self, global_index: usize) -> Option<(usize, usize)> {
        let target = global_index.checked_sub(1)?;
        let mut offset = 0;
        let mut found = None;

        for (motion, slot) in self.motions.iter().enumerate() {
            let Some(path) = slot.path.as_ref() else {
                continue;
            };
            let spans = path.segment_count();
            if target >= offset && target <= offset + spans {
                found = Some((motion, target - offset));
            }
            offset += spans;
        }

        found
    }

    fn finish_motion(&mut self) {
        let finished = self.state.active_motion;
        tracing::info!("Motion '{}' finished", self.motions[finished].name);
        self.state.running = false;
        self.state.paused = false;
        self.state.active_segment = None;

        if !self.config.chain_motions {
            return;
        }
        let next = (finished + 1..self.motions.len()).find(|&i| self.motions[i].path.is_some());
        if let Some(next) = next {
            self.state.active_motion = next;
            self.restart();
        }
    }

    fn notify(&mut self, t: f32, in_animation: bool) {
        if let Some(callback) = self.on_progress.as_mut() {
            callback(t, in_animation);
        }
    }
}
