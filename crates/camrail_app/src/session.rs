// SPDX-License-Identifier: MIT OR Apache-2.0
//! Fixed-rate playback session.
//!
//! Drives a [`PlaybackController`] the way a render loop would: one update
//! per frame with a constant delta, with scripted actions applied at the
//! start of the frame they fall in.

use crate::error::AppError;
use crate::settings::{ScriptedAction, SessionAction, SessionSettings};
use camrail_engine::{ActiveCamera, Keyframe, MotionSet, PlaybackController, Pose, SegmentChain};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Progress notifications seen so far
#[derive(Debug, Default)]
struct ProgressLog {
    count: usize,
    last: Option<(f32, bool)>,
}

/// Summary of a finished session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionReport {
    /// Frames stepped
    pub frames: u64,
    /// Progress notifications received
    pub notifications: usize,
    /// Last notified progress and whether it came from animation
    pub last_progress: Option<(f32, bool)>,
    /// Playback camera pose at the end
    pub final_pose: Pose,
    /// Camera rendered at the end
    pub active_camera: ActiveCamera,
    /// Whether the last motion played to its end
    pub finished: bool,
    /// Curve samples recorded
    pub dots: usize,
    /// Keyframe markers recorded
    pub markers: usize,
    /// Keyframes captured by the script
    pub captured: Vec<Keyframe>,
}

/// Controller plus the schedule that drives it
pub struct PlaybackSession {
    controller: PlaybackController,
    script: Vec<ScriptedAction>,
    next_action: usize,
    frame_interval: Duration,
    frame_limit: u64,
    progress: Rc<RefCell<ProgressLog>>,
    captured: Vec<Keyframe>,
}

impl PlaybackSession {
    /// Build the controller for `motions` and start the first motion
    pub fn new(motions: &MotionSet, settings: &SessionSettings) -> Self {
        let mut controller = PlaybackController::new(motions, settings.playback.clone());

        let progress = Rc::new(RefCell::new(ProgressLog::default()));
        let sink = Rc::clone(&progress);
        controller.on_progress(move |t, in_animation| {
            tracing::trace!("Progress {:.4} (animated: {})", t, in_animation);
            let mut log = sink.borrow_mut();
            log.count += 1;
            log.last = Some((t, in_animation));
        });
        controller.restart();

        Self {
            controller,
            script: settings.sorted_script(),
            next_action: 0,
            frame_interval: settings.frame_interval(),
            frame_limit: settings.frame_limit(),
            progress,
            captured: Vec::new(),
        }
    }

    /// Make the named motion active and play it from the start
    pub fn play_motion(&mut self, name: &str) -> Result<(), AppError> {
        let names: Vec<&str> = (0..self.controller.motion_count())
            .filter_map(|i| self.controller.motion_name(i))
            .collect();
        let Some(index) = names.iter().position(|candidate| *candidate == name) else {
            return Err(AppError::UnknownMotion {
                name: name.to_string(),
                available: names.join(", "),
            });
        };

        if !self.controller.select_motion(index) {
            return Err(AppError::UnplayableMotion {
                name: name.to_string(),
            });
        }
        self.controller.restart();
        Ok(())
    }

    /// The driven controller
    pub fn controller(&self) -> &PlaybackController {
        &self.controller
    }

    /// Step frames until the frame limit, or until playback has stopped
    /// and no scripted action is left
    pub fn run(mut self) -> SessionReport {
        let step = self.frame_interval.as_secs_f32();
        tracing::info!(
            "Running session: {} frame(s) at {:.1} ms, {} scripted action(s)",
            self.frame_limit,
            step * 1000.0,
            self.script.len()
        );

        let mut frames = 0;
        while frames < self.frame_limit {
            let now = frames as f32 * step;
            self.apply_due(now);
            self.controller.update(self.frame_interval);
            frames += 1;

            if !self.controller.state().running && self.next_action >= self.script.len() {
                tracing::debug!("Playback idle after {} frame(s)", frames);
                break;
            }
        }

        self.report(frames)
    }

    fn apply_due(&mut self, now: f32) {
        while let Some(entry) = self.script.get(self.next_action).copied() {
            if entry.at > now {
                break;
            }
            self.next_action += 1;
            tracing::debug!("t={:.3}s: {:?}", now, entry.action);
            self.apply(entry.action);
        }
    }

    fn apply(&mut self, action: SessionAction) {
        match action {
            SessionAction::Restart => self.controller.restart(),
            SessionAction::TogglePause => self.controller.toggle_pause(),
            SessionAction::Pause(paused) => self.controller.set_paused(paused),
            SessionAction::JumpToKeyframe(index) => {
                if !self.controller.jump_to_keyframe(index) {
                    tracing::warn!(
                        "Keyframe {} out of range (1..={})",
                        index,
                        self.controller.jump_point_count()
                    );
                }
            }
            SessionAction::SetProgress(t) => self.controller.set_progress_external(t),
            SessionAction::SelectMotion(index) => {
                if self.controller.select_motion(index) {
                    self.controller.restart();
                } else {
                    tracing::warn!("Motion {} cannot be selected", index);
                }
            }
            SessionAction::SwitchCamera => {
                self.controller.switch_active_camera();
            }
            SessionAction::AlignCamera => self.controller.align_authoring_camera(),
            SessionAction::CaptureKeyframe => {
                let keyframe = self.controller.capture_keyframe();
                self.captured.push(keyframe);
            }
        }
    }

    fn report(self, frames: u64) -> SessionReport {
        let log = self.progress.borrow();
        let finished = self.controller.chain().is_some_and(SegmentChain::is_finished);
        SessionReport {
            frames,
            notifications: log.count,
            last_progress: log.last,
            final_pose: self.controller.playback_pose(),
            active_camera: self.controller.camera().active(),
            finished,
            dots: self.controller.recorder().dots().len(),
            markers: self.controller.recorder().markers().len(),
            captured: self.captured.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camrail_engine::{Motion, Quat, Transition, Vec3};

    fn at(at: f32, action: SessionAction) -> ScriptedAction {
        ScriptedAction { at, action }
    }

    fn start() -> Keyframe {
        Keyframe::new(Vec3::ZERO, Quat::IDENTITY)
    }

    fn end() -> Keyframe {
        Keyframe::new(Vec3::new(1.0, 0.5, -2.0), Quat::from_rotation_y(1.2))
    }

    fn motions() -> MotionSet {
        MotionSet::new()
            .with("dolly", Motion::starting_at(start()).then(Transition::new(1.0), end()))
            .with(
                "crane",
                Motion::starting_at(end()).then(Transition::new(2.0), start()),
            )
    }

    fn settings(script: Vec<ScriptedAction>) -> SessionSettings {
        SessionSettings {
            fps: 4,
            max_seconds: 5.0,
            script,
            ..SessionSettings::default()
        }
    }

    #[test]
    fn test_plays_motion_to_end() {
        let report = PlaybackSession::new(&motions(), &settings(Vec::new())).run();
        assert_eq!(report.frames, 4);
        assert_eq!(report.notifications, 4);
        assert_eq!(report.last_progress, Some((1.0, true)));
        assert!(report.finished);
        assert_eq!(report.final_pose.position, end().position);
        assert_eq!(report.markers, 4);
        assert_eq!(report.dots, 402);
    }

    #[test]
    fn test_skips_unplayable_leading_motion() {
        let motions = MotionSet::new()
            .with("still", Motion::starting_at(end()))
            .with("dolly", Motion::starting_at(start()).then(Transition::new(1.0), end()));
        let report = PlaybackSession::new(&motions, &settings(Vec::new())).run();
        assert_eq!(report.frames, 4);
        assert_eq!(report.notifications, 4);
        assert!(report.finished);
        assert_eq!(report.final_pose.position, end().position);
    }

    #[test]
    fn test_pause_delays_completion() {
        let script = vec![
            at(0.0, SessionAction::TogglePause),
            at(1.0, SessionAction::TogglePause),
        ];
        let report = PlaybackSession::new(&motions(), &settings(script)).run();
        assert_eq!(report.frames, 8);
        assert_eq!(report.notifications, 4);
        assert!(report.finished);
    }

    #[test]
    fn test_jump_stops_session() {
        let script = vec![at(0.0, SessionAction::JumpToKeyframe(2))];
        let report = PlaybackSession::new(&motions(), &settings(script)).run();
        assert_eq!(report.frames, 1);
        assert_eq!(report.notifications, 0);
        assert!(!report.finished);
        assert_eq!(report.final_pose.position, end().position);
    }

    #[test]
    fn test_capture_follows_active_camera() {
        let script = vec![
            at(0.5, SessionAction::SwitchCamera),
            at(0.5, SessionAction::CaptureKeyframe),
            at(0.5, SessionAction::Pause(true)),
        ];
        let report = PlaybackSession::new(&motions(), &settings(script)).run();
        assert_eq!(report.active_camera, ActiveCamera::Playback);
        assert_eq!(report.captured.len(), 1);
        assert_eq!(report.captured[0].position, report.final_pose.position);
        // Paused playback keeps the session alive until the frame limit.
        assert_eq!(report.frames, 20);
    }

    #[test]
    fn test_select_motion_by_name() {
        let mut session = PlaybackSession::new(&motions(), &settings(Vec::new()));
        session.play_motion("crane").unwrap();
        assert_eq!(session.controller().state().active_motion, 1);

        let report = session.run();
        assert_eq!(report.frames, 8);
        assert_eq!(report.final_pose.position, start().position);
    }

    #[test]
    fn test_unknown_motion() {
        let mut session = PlaybackSession::new(&motions(), &settings(Vec::new()));
        match session.play_motion("zoom") {
            Err(AppError::UnknownMotion { available, .. }) => assert_eq!(available, "dolly, crane"),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
