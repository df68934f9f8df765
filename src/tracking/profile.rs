//! Exercise profiles
//!
//! One immutable threshold set per supported exercise. The registry is
//! built once at startup (built-in table, optionally patched from a JSON
//! file) and validated before anything is served.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pose::AngleExtractor;
use super::counter::Stage;
use super::smoother::DEFAULT_SMOOTHING_WINDOW;

/// Default dwell time at an extreme before a stage switch (seconds)
pub const DEFAULT_HOLD_TIME: f64 = 0.05;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Unknown exercise: {0}")]
    UnknownExercise(String),

    #[error("Invalid profile for {exercise}: {reason}")]
    InvalidProfile { exercise: Exercise, reason: String },

    #[error("Failed to read profile file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed profile overrides: {0}")]
    Parse(#[from] serde_json::Error),
}

// ============================================================================
// EXERCISE IDENTIFIER
// ============================================================================

/// Supported exercises (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Exercise {
    #[serde(rename = "bicep_curl")]
    BicepCurl,
    #[serde(rename = "squat")]
    Squat,
    #[serde(rename = "pushup")]
    PushUp,
    #[serde(rename = "lateral_raise")]
    LateralRaise,
    #[serde(rename = "shoulder_press")]
    ShoulderPress,
}

impl Exercise {
    pub const ALL: [Exercise; 5] = [
        Exercise::BicepCurl,
        Exercise::Squat,
        Exercise::PushUp,
        Exercise::LateralRaise,
        Exercise::ShoulderPress,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Exercise::BicepCurl => "bicep_curl",
            Exercise::Squat => "squat",
            Exercise::PushUp => "pushup",
            Exercise::LateralRaise => "lateral_raise",
            Exercise::ShoulderPress => "shoulder_press",
        }
    }

    pub fn extractor(self) -> AngleExtractor {
        match self {
            Exercise::BicepCurl => AngleExtractor::BicepCurl,
            Exercise::Squat => AngleExtractor::Squat,
            Exercise::PushUp => AngleExtractor::PushUp,
            Exercise::LateralRaise => AngleExtractor::LateralRaise,
            Exercise::ShoulderPress => AngleExtractor::ShoulderPress,
        }
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Exercise {
    type Err = ProfileError;

    /// Case-insensitive, surrounding whitespace ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Exercise::ALL
            .into_iter()
            .find(|e| e.as_str() == wanted)
            .ok_or_else(|| ProfileError::UnknownExercise(s.trim().to_string()))
    }
}

// ============================================================================
// PROFILE
// ============================================================================

/// Counter configuration for one exercise
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExerciseProfile {
    pub exercise: Exercise,
    pub extractor: AngleExtractor,
    /// At or below: limb is at the "up" extreme (degrees)
    pub low_threshold: f32,
    /// At or above: limb is at the "down" extreme (degrees)
    pub high_threshold: f32,
    /// Minimum max-min span of a counted cycle (degrees)
    pub min_range_of_motion: f32,
    /// Minimum seconds from the previous stage switch to the counting one;
    /// shorter cycles are rejected as too fast
    pub min_rep_time: f64,
    /// Seconds the angle must stay past a threshold before switching stage
    pub hold_time: f64,
    /// Stage whose entry completes a rep
    pub count_on: Stage,
    pub smoothing_window: usize,
}

impl ExerciseProfile {
    /// Built-in thresholds
    pub fn builtin(exercise: Exercise) -> Self {
        let (low, high, rom, rep_time, count_on) = match exercise {
            Exercise::BicepCurl => (40.0, 160.0, 60.0, 0.6, Stage::Up),
            Exercise::Squat => (90.0, 160.0, 50.0, 0.8, Stage::Up),
            Exercise::PushUp => (90.0, 160.0, 50.0, 0.7, Stage::Up),
            Exercise::LateralRaise => (30.0, 80.0, 40.0, 0.6, Stage::Down),
            Exercise::ShoulderPress => (60.0, 150.0, 60.0, 0.7, Stage::Down),
        };

        Self {
            exercise,
            extractor: exercise.extractor(),
            low_threshold: low,
            high_threshold: high,
            min_range_of_motion: rom,
            min_rep_time: rep_time,
            hold_time: DEFAULT_HOLD_TIME,
            count_on,
            smoothing_window: DEFAULT_SMOOTHING_WINDOW,
        }
    }

    pub fn name(&self) -> &'static str {
        self.exercise.as_str()
    }

    /// Reject misconfigured thresholds
    pub fn validate(&self) -> Result<(), ProfileError> {
        let invalid = |reason: String| ProfileError::InvalidProfile {
            exercise: self.exercise,
            reason,
        };

        let angles = [
            ("low_threshold", self.low_threshold),
            ("high_threshold", self.high_threshold),
            ("min_range_of_motion", self.min_range_of_motion),
        ];
        for (field, value) in angles {
            if !value.is_finite() || !(0.0..=180.0).contains(&value) {
                return Err(invalid(format!("{} must be within [0, 180], got {}", field, value)));
            }
        }

        let times = [("min_rep_time", self.min_rep_time), ("hold_time", self.hold_time)];
        for (field, value) in times {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(format!("{} must be a non-negative number, got {}", field, value)));
            }
        }

        if self.low_threshold >= self.high_threshold {
            return Err(invalid(format!(
                "low_threshold ({}) must be below high_threshold ({})",
                self.low_threshold, self.high_threshold
            )));
        }

        if self.smoothing_window == 0 {
            return Err(invalid("smoothing_window must be at least 1".to_string()));
        }

        Ok(())
    }
}

/// Partial profile from the override file; absent fields keep the built-in value
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileOverride {
    pub low_threshold: Option<f32>,
    pub high_threshold: Option<f32>,
    pub min_range_of_motion: Option<f32>,
    pub min_rep_time: Option<f64>,
    pub hold_time: Option<f64>,
    pub count_on: Option<Stage>,
    pub smoothing_window: Option<usize>,
}

impl ProfileOverride {
    pub fn apply(&self, profile: &mut ExerciseProfile) {
        if let Some(v) = self.low_threshold { profile.low_threshold = v; }
        if let Some(v) = self.high_threshold { profile.high_threshold = v; }
        if let Some(v) = self.min_range_of_motion { profile.min_range_of_motion = v; }
        if let Some(v) = self.min_rep_time { profile.min_rep_time = v; }
        if let Some(v) = self.hold_time { profile.hold_time = v; }
        if let Some(v) = self.count_on { profile.count_on = v; }
        if let Some(v) = self.smoothing_window { profile.smoothing_window = v; }
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

/// Immutable exercise -> profile table
#[derive(Debug, Clone)]
pub struct ProfileRegistry {
    profiles: BTreeMap<Exercise, ExerciseProfile>,
}

impl ProfileRegistry {
    /// Built-in table for every exercise
    pub fn builtin() -> Self {
        Self {
            profiles: Exercise::ALL
                .into_iter()
                .map(|e| (e, ExerciseProfile::builtin(e)))
                .collect(),
        }
    }

    /// Built-in table, patched from `path` when given, then validated
    pub fn load(path: Option<&Path>) -> Result<Self, ProfileError> {
        let registry = match path {
            Some(path) => {
                let json = fs::read_to_string(path).map_err(|source| ProfileError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                tracing::info!("Applying exercise profile overrides from {}", path.display());
                Self::with_overrides(&json)?
            }
            None => Self::builtin(),
        };

        registry.validate()?;
        Ok(registry)
    }

    /// Built-in table patched from a JSON object keyed by exercise name
    pub fn with_overrides(json: &str) -> Result<Self, ProfileError> {
        let overrides: HashMap<String, ProfileOverride> = serde_json::from_str(json)?;
        let mut registry = Self::builtin();

        for (name, patch) in overrides {
            let exercise: Exercise = name.parse()?;
            if let Some(profile) = registry.profiles.get_mut(&exercise) {
                patch.apply(profile);
                tracing::debug!("Profile override applied: {}", exercise);
            }
        }

        Ok(registry)
    }

    pub fn validate(&self) -> Result<(), ProfileError> {
        self.profiles.values().try_for_each(ExerciseProfile::validate)
    }

    /// Look up by name (case-insensitive)
    pub fn get(&self, name: &str) -> Result<ExerciseProfile, ProfileError> {
        let exercise: Exercise = name.parse()?;
        Ok(self.profile(exercise))
    }

    /// Every exercise has a profile, so lookup by identifier cannot fail
    pub fn profile(&self, exercise: Exercise) -> ExerciseProfile {
        self.profiles
            .get(&exercise)
            .copied()
            .unwrap_or_else(|| ExerciseProfile::builtin(exercise))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExerciseProfile> {
        self.profiles.values()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
