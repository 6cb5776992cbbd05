// SPDX-License-Identifier: MIT OR Apache-2.0
//! Session settings and the scripted control actions.
//!
//! A session document names the motion file, the playback configuration,
//! the frame rate of the simulated render loop and a script of control
//! actions standing in for keyboard input.

use crate::error::AppError;
use camrail_engine::{ConfigError, PlaybackConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Current session settings format version
pub const SETTINGS_FORMAT_VERSION: u32 = 1;

/// Default frame rate of the session loop
pub const DEFAULT_FPS: u32 = 60;

/// Default session length in seconds
pub const DEFAULT_MAX_SECONDS: f32 = 10.0;

/// Default motion file, relative to the working directory
pub const DEFAULT_MOTIONS_PATH: &str = "assets/motions/showcase.ron";

/// Control input applied to the controller during a session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SessionAction {
    /// Play the active motion from its start
    Restart,
    /// Pause or resume the live segment
    TogglePause,
    /// Pause (`true`) or resume (`false`) the live segment
    Pause(bool),
    /// Jump to a 1-based keyframe across all motions
    JumpToKeyframe(usize),
    /// Scrub the active motion to a global progress value
    SetProgress(f32),
    /// Make a motion active by index and play it
    SelectMotion(usize),
    /// Toggle between the authoring and playback camera
    SwitchCamera,
    /// Move the authoring camera onto the playback camera
    AlignCamera,
    /// Capture the rendered pose as a keyframe
    CaptureKeyframe,
}

/// An action and the session time at which it fires
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScriptedAction {
    /// Session time in seconds
    pub at: f32,
    /// Action to apply
    pub action: SessionAction,
}

/// Settings for one headless playback session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Document format version
    pub version: u32,
    /// Frames per second of the session loop
    pub fps: u32,
    /// Upper bound on session length in seconds
    pub max_seconds: f32,
    /// Motion set to load
    pub motions: PathBuf,
    /// Controller configuration
    pub playback: PlaybackConfig,
    /// Timed control actions
    pub script: Vec<ScriptedAction>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            version: SETTINGS_FORMAT_VERSION,
            fps: DEFAULT_FPS,
            max_seconds: DEFAULT_MAX_SECONDS,
            motions: PathBuf::from(DEFAULT_MOTIONS_PATH),
            playback: PlaybackConfig::default(),
            script: Vec::new(),
        }
    }
}

impl SessionSettings {
    /// Parse settings from RON, rejecting newer format versions
    pub fn from_ron(source: &str) -> Result<Self, AppError> {
        let settings: SessionSettings = ron::from_str(source).map_err(ConfigError::from)?;
        if settings.version > SETTINGS_FORMAT_VERSION {
            return Err(AppError::UnsupportedVersion {
                found: settings.version,
                supported: SETTINGS_FORMAT_VERSION,
            });
        }
        Ok(settings)
    }

    /// Serialize as pretty RON
    pub fn to_ron(&self) -> Result<String, AppError> {
        let config = ron::ser::PrettyConfig::default().struct_names(true);
        Ok(ron::ser::to_string_pretty(self, config).map_err(ConfigError::from)?)
    }

    /// Load settings from a file
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_ron(&source)?;
        tracing::debug!(
            "Loaded session settings from {:?} ({} scripted action(s))",
            path,
            settings.script.len()
        );
        Ok(settings)
    }

    /// Save settings to a file
    pub fn save(&self, path: &Path) -> Result<(), AppError> {
        let source = self.to_ron()?;
        std::fs::write(path, source).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(())
    }

    /// Fixed frame delta
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.fps.max(1)))
    }

    /// Number of frames that fit in the session length
    pub fn frame_limit(&self) -> u64 {
        if !self.max_seconds.is_finite() || self.max_seconds <= 0.0 {
            return 0;
        }
        (f64::from(self.max_seconds) * f64::from(self.fps.max(1))).ceil() as u64
    }

    /// Script ordered by firing time, keeping authored order for ties
    pub fn sorted_script(&self) -> Vec<ScriptedAction> {
        let mut script: Vec<_> = self
            .script
            .iter()
            .copied()
            .filter(|entry| {
                let valid = entry.at.is_finite();
                if !valid {
                    tracing::warn!("Dropping scripted {:?} with invalid time", entry.action);
                }
                valid
            })
            .collect();
        script.sort_by(|a, b| a.at.total_cmp(&b.at));
        script
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(at: f32, action: SessionAction) -> ScriptedAction {
        ScriptedAction { at, action }
    }

    #[test]
    fn test_default_settings() {
        let settings = SessionSettings::default();
        assert_eq!(settings.version, SETTINGS_FORMAT_VERSION);
        assert_eq!(settings.fps, 60);
        assert_eq!(settings.motions, PathBuf::from(DEFAULT_MOTIONS_PATH));
        assert!(settings.script.is_empty());
        assert!(!settings.playback.chain_motions);
    }

    #[test]
    fn test_parse_script() {
        let settings = SessionSettings::from_ron(
            r#"(
                fps: 30,
                playback: (chain_motions: true),
                script: [
                    (at: 2.0, action: JumpToKeyframe(3)),
                    (at: 0.5, action: Pause(true)),
                    (at: 0.5, action: SetProgress(0.25)),
                    (at: 1.0, action: SwitchCamera),
                ],
            )"#,
        )
        .unwrap();

        assert_eq!(settings.fps, 30);
        assert!(settings.playback.chain_motions);
        assert_eq!(settings.max_seconds, DEFAULT_MAX_SECONDS);

        let script = settings.sorted_script();
        let actions: Vec<_> = script.iter().map(|entry| entry.action).collect();
        assert_eq!(
            actions,
            vec![
                SessionAction::Pause(true),
                SessionAction::SetProgress(0.25),
                SessionAction::SwitchCamera,
                SessionAction::JumpToKeyframe(3),
            ]
        );
    }

    #[test]
    fn test_newer_version_rejected() {
        let result = SessionSettings::from_ron("(version: 99)");
        assert!(matches!(
            result,
            Err(AppError::UnsupportedVersion { found: 99, .. })
        ));
    }

    #[test]
    fn test_frame_math() {
        let settings = SessionSettings {
            fps: 4,
            max_seconds: 2.1,
            ..SessionSettings::default()
        };
        assert_eq!(settings.frame_interval(), Duration::from_millis(250));
        assert_eq!(settings.frame_limit(), 9);

        let stalled = SessionSettings {
            fps: 0,
            max_seconds: f32::NAN,
            ..SessionSettings::default()
        };
        assert_eq!(stalled.frame_interval(), Duration::from_secs(1));
        assert_eq!(stalled.frame_limit(), 0);
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("camrail_settings_{}.ron", std::process::id()));
        let mut settings = SessionSettings::default();
        settings.script.push(at(1.5, SessionAction::TogglePause));
        settings.save(&path).unwrap();

        let loaded = SessionSettings::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_file() {
        let result = SessionSettings::load(Path::new("does/not/exist.ron"));
        assert!(matches!(result, Err(AppError::Config(ConfigError::Io { .. }))));
    }
}
