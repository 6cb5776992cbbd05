// SPDX-License-Identifier: MIT OR Apache-2.0
//! Authored motions and the motion set they are loaded from.

use crate::error::ConfigError;
use crate::keyframe::{Keyframe, MotionStep, Transition};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// An authored camera motion: keyframe, transition, keyframe, ...
///
/// The steps are stored as written so that malformed authoring data can be
/// truncated by the path builder instead of being rejected on load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    /// Alternating keyframes and transitions
    pub steps: Vec<MotionStep>,
}

impl Motion {
    /// Start a motion at a keyframe
    pub fn starting_at(keyframe: Keyframe) -> Self {
        Self {
            steps: vec![MotionStep::Keyframe(keyframe)],
        }
    }

    /// Create a motion from raw steps
    pub fn from_steps(steps: Vec<MotionStep>) -> Self {
        Self { steps }
    }

    /// Append a transition and the keyframe it leads to
    pub fn then(mut self, transition: Transition, keyframe: Keyframe) -> Self {
        self.steps.push(MotionStep::Transition(transition));
        self.steps.push(MotionStep::Keyframe(keyframe));
        self
    }

    /// Get all steps
    pub fn steps(&self) -> &[MotionStep] {
        &self.steps
    }

    /// Number of keyframe steps, well-formed or not
    pub fn keyframe_count(&self) -> usize {
        self.steps.iter().filter(|s| s.as_keyframe().is_some()).count()
    }
}

/// Ordered, named collection of motions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MotionSet {
    /// Motions in playback order
    motions: IndexMap<String, Motion>,
}

impl MotionSet {
    /// Create an empty motion set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a motion, replacing any motion with the same name in place
    pub fn add(&mut self, name: impl Into<String>, motion: Motion) -> usize {
        self.motions.insert_full(name.into(), motion).0
    }

    /// Builder form of [`MotionSet::add`]
    pub fn with(mut self, name: impl Into<String>, motion: Motion) -> Self {
        self.add(name, motion);
        self
    }

    /// Get a motion by index
    pub fn get(&self, index: usize) -> Option<(&str, &Motion)> {
        self.motions
            .get_index(index)
            .map(|(name, motion)| (name.as_str(), motion))
    }

    /// Get a motion by name
    pub fn by_name(&self, name: &str) -> Option<&Motion> {
        self.motions.get(name)
    }

    /// Get the index of a named motion
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.motions.get_index_of(name)
    }

    /// Iterate over `(name, motion)` pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Motion)> {
        self.motions.iter().map(|(name, motion)| (name.as_str(), motion))
    }

    /// Get motion count
    pub fn len(&self) -> usize {
        self.motions.len()
    }

    /// Whether the set has no motions
    pub fn is_empty(&self) -> bool {
        self.motions.is_empty()
    }

    /// Parse a motion set from RON
    pub fn from_ron(source: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(source)?)
    }

    /// Serialize the motion set as pretty RON
    pub fn to_ron(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    /// Load a motion set from a RON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let set = Self::from_ron(&source)?;
        tracing::debug!("Loaded {} motion(s) from {:?}", set.len(), path);
        Ok(set)
    }

    /// Save the motion set to a RON file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let source = self.to_ron()?;
        std::fs::write(path, source).map_err(|e| ConfigError::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;

    const SAMPLE: &str = r#"#![enable(implicit_some, unwrap_variant_newtypes)]
(
    motions: {
        "orbit": (
            steps: [
                Keyframe(pos: (-0.16, 0.81, 0.14), rot: (-0.58, -0.35, -0.31, 0.67)),
                Transition(dur: 1.0, easing: SinusoidalIn),
                Keyframe(pos: (-0.36, 0.76, -0.01), rot: (-0.52, -0.47, -0.43, 0.57)),
                Transition(dur: 2.0),
                Keyframe(pos: (0.02, 0.08, -0.61), rot: (0.0, 1.0, 0.04, 0.01)),
            ],
        ),
        "single": (
            steps: [
                Keyframe(pos: (0.0, 0.0, 1.0), rot: (0.0, 0.0, 0.0, 1.0)),
            ],
        ),
    },
)
"#;

    #[test]
    fn test_parse_authoring_format() {
        let set = MotionSet::from_ron(SAMPLE).unwrap();
        assert_eq!(set.len(), 2);

        let (name, orbit) = set.get(0).unwrap();
        assert_eq!(name, "orbit");
        assert_eq!(orbit.steps().len(), 5);
        assert_eq!(orbit.keyframe_count(), 3);

        let first = orbit.steps()[1].as_transition().unwrap();
        assert_eq!(first.duration, 1.0);
        assert_eq!(first.easing(), Easing::SinusoidalIn);
        let second = orbit.steps()[3].as_transition().unwrap();
        assert_eq!(second.easing, None);

        assert_eq!(set.index_of("single"), Some(1));
    }

    #[test]
    fn test_serialization() {
        let set = MotionSet::from_ron(SAMPLE).unwrap();
        let ron_str = set.to_ron().unwrap();
        let loaded = MotionSet::from_ron(&ron_str).unwrap();
        assert_eq!(loaded, set);
    }

    #[test]
    fn test_builder_keeps_order_and_replaces_by_name() {
        let k = Keyframe::from_arrays([0.0; 3], [0.0, 0.0, 0.0, 1.0]);
        let mut set = MotionSet::new()
            .with("b", Motion::starting_at(k))
            .with("a", Motion::starting_at(k).then(Transition::new(1.0), k));

        assert_eq!(set.get(0).map(|(n, _)| n), Some("b"));
        let index = set.add("b", Motion::default());
        assert_eq!(index, 0);
        assert_eq!(set.len(), 2);
        assert!(set.by_name("b").unwrap().steps().is_empty());
    }

    #[test]
    fn test_invalid_ron_is_reported() {
        let err = MotionSet::from_ron("(motions: {").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_reported() {
        let err = MotionSet::load(Path::new("does/not/exist.ron")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
