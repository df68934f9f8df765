//! Session controller
//!
//! Owns the selected profile and its RepCounter. Exercise changes and
//! session restarts replace the counter wholesale; stopping only pauses
//! counting so the last count/stage stay readable.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::pose::{LandmarkSet, UnavailableInput};
use super::counter::{CounterUpdate, RepCounter, RepEvent, Stage};
use super::profile::{Exercise, ExerciseProfile, ProfileError, ProfileRegistry};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("frame at {received}s arrived after frame at {previous}s")]
    OutOfOrder { previous: f64, received: f64 },

    #[error("frame timestamp must be a finite number of seconds, got {0}")]
    InvalidTimestamp(f64),
}

/// What happened to one frame
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    /// No usable angle; counter untouched
    Skipped(UnavailableInput),
    /// Session stopped; angle measured but not counted
    Idle { raw_angle: f32 },
    /// Fed to the counter
    Tracked { raw_angle: f32, update: CounterUpdate },
}

/// Read-only view for presentation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub session_id: Option<Uuid>,
    pub exercise_name: Exercise,
    pub count: u32,
    pub stage: Option<Stage>,
    pub last_smoothed_angle: Option<f32>,
    pub active: bool,
}

/// Returned by `stop_session`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub session_id: Option<Uuid>,
    pub exercise: Exercise,
    pub count: u32,
    pub started_at: Option<DateTime<Utc>>,
    pub stopped_at: DateTime<Utc>,
    /// Seconds between the first and last tracked frame
    pub duration_secs: Option<f64>,
}

pub struct SessionController {
    registry: Arc<ProfileRegistry>,
    profile: ExerciseProfile,
    counter: RepCounter,
    min_visibility: f32,

    active: bool,
    session_id: Option<Uuid>,
    started_at: Option<DateTime<Utc>>,

    last_frame_at: Option<f64>,
    first_tracked_at: Option<f64>,
    last_tracked_at: Option<f64>,
    last_angle: Option<f32>,
}

impl SessionController {
    /// Idle controller bound to `exercise`
    pub fn new(registry: Arc<ProfileRegistry>, exercise: Exercise, min_visibility: f32) -> Self {
        let profile = registry.profile(exercise);
        Self {
            registry,
            counter: RepCounter::new(profile),
            profile,
            min_visibility,
            active: false,
            session_id: None,
            started_at: None,
            last_frame_at: None,
            first_tracked_at: None,
            last_tracked_at: None,
            last_angle: None,
        }
    }

    /// Switch exercise; the counter and its smoothing history start over
    ///
    /// An unknown name leaves the controller untouched.
    pub fn select_exercise(&mut self, name: &str) -> Result<ExerciseProfile, ProfileError> {
        let profile = self.registry.get(name)?;

        self.profile = profile;
        self.replace_counter();

        tracing::info!("Exercise set to {}", profile.exercise);
        Ok(profile)
    }

    /// Begin counting with a fresh counter
    pub fn start_session(&mut self) -> SessionSnapshot {
        self.replace_counter();
        self.active = true;
        self.session_id = Some(Uuid::new_v4());
        self.started_at = Some(Utc::now());

        tracing::info!(
            "Workout started: {} (session {})",
            self.profile.exercise,
            self.session_id.unwrap_or_default()
        );
        self.snapshot()
    }

    /// Pause counting; count, stage and angle stay visible
    pub fn stop_session(&mut self) -> SessionSummary {
        self.active = false;

        let duration_secs = match (self.first_tracked_at, self.last_tracked_at) {
            (Some(first), Some(last)) => Some(last - first),
            _ => None,
        };

        tracing::info!(
            "Workout stopped: {} reps of {}",
            self.counter.count(),
            self.profile.exercise
        );

        SessionSummary {
            session_id: self.session_id,
            exercise: self.profile.exercise,
            count: self.counter.count(),
            started_at: self.started_at,
            stopped_at: Utc::now(),
            duration_secs,
        }
    }

    /// Process one frame observed at `now` seconds
    ///
    /// `None` means the estimator found no pose. Frames must arrive in
    /// non-decreasing time order.
    pub fn process_frame(&mut self, landmarks: Option<&LandmarkSet>, now: f64) -> Result<FrameOutcome, SessionError> {
        if !now.is_finite() {
            return Err(SessionError::InvalidTimestamp(now));
        }
        if let Some(previous) = self.last_frame_at {
            if now < previous {
                tracing::warn!("Dropping out-of-order frame: {}s after {}s", now, previous);
                return Err(SessionError::OutOfOrder { previous, received: now });
            }
        }
        self.last_frame_at = Some(now);

        let raw_angle = match landmarks {
            Some(set) => self.profile.extractor.extract(set, self.min_visibility),
            None => Err(UnavailableInput::NoPose),
        };
        let raw_angle = match raw_angle {
            Ok(angle) => angle,
            Err(reason) => {
                tracing::trace!("Frame skipped: {}", reason);
                return Ok(FrameOutcome::Skipped(reason));
            }
        };

        if !self.active {
            return Ok(FrameOutcome::Idle { raw_angle });
        }

        let update = self.counter.update(raw_angle, now);
        self.last_angle = Some(update.angle);
        self.first_tracked_at.get_or_insert(now);
        self.last_tracked_at = Some(now);

        match update.event {
            RepEvent::Counted => {
                tracing::info!("Rep counted: {} #{}", self.profile.exercise, update.count)
            }
            RepEvent::Rejected(reason) => {
                tracing::debug!("Rep rejected ({:?}) at {:.1} deg", reason, update.angle)
            }
            _ => {}
        }

        Ok(FrameOutcome::Tracked { raw_angle, update })
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.session_id,
            exercise_name: self.profile.exercise,
            count: self.counter.count(),
            stage: self.counter.stage(),
            last_smoothed_angle: self.last_angle,
            active: self.active,
        }
    }

    pub fn profile(&self) -> &ExerciseProfile {
        &self.profile
    }

    pub fn counter(&self) -> &RepCounter {
        &self.counter
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    fn replace_counter(&mut self) {
        self.counter = RepCounter::new(self.profile);
        self.last_frame_at = None;
        self.first_tracked_at = None;
        self.last_tracked_at = None;
        self.last_angle = None;
    }
}
