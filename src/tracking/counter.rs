//! Rep Counter - hysteresis state machine
//!
//! Stage follows the smoothed angle between two thresholds:
//! - `Down`: angle at or above `high_threshold` (limb extended)
//! - `Up`:   angle at or below `low_threshold` (limb flexed)
//!
//! A stage switch needs the angle to dwell past the opposite threshold for
//! `hold_time`. Entering `count_on` completes a rep, which is only counted
//! when the cycle took at least `min_rep_time` and spanned at least
//! `min_range_of_motion`. Time is always supplied by the caller.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::profile::ExerciseProfile;
use super::smoother::AngleSmoother;

// ============================================================================
// TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Up,
    Down,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Up => "up",
            Stage::Down => "down",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a completed half-cycle into `count_on` was not counted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// Less than `min_rep_time` since the previous cycle boundary
    TooFast,
    /// Cycle spanned less than `min_range_of_motion`
    ShallowRange,
}

/// What a single update did
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum RepEvent {
    /// No stage change
    None,
    /// First classification out of the uninitialized state
    Classified(Stage),
    /// Switched into a stage that does not complete a rep
    Switched(Stage),
    /// Switched into `count_on` and the rep was counted
    Counted,
    /// Switched into `count_on` but the rep was discarded
    Rejected(RejectReason),
}

/// Result of `RepCounter::update`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CounterUpdate {
    pub stage: Option<Stage>,
    pub count: u32,
    /// Smoothed angle (degrees)
    pub angle: f32,
    pub event: RepEvent,
}

// ============================================================================
// COUNTER
// ============================================================================

#[derive(Debug, Clone)]
pub struct RepCounter {
    profile: ExerciseProfile,
    smoother: AngleSmoother,

    stage: Option<Stage>,
    count: u32,

    // Range of motion within the current cycle
    cycle_min: f32,
    cycle_max: f32,

    last_switch_time: Option<f64>,
    rep_start_time: Option<f64>,
    /// When the angle first crossed the threshold it is dwelling past
    extreme_reached_time: Option<f64>,
}

impl RepCounter {
    pub fn new(profile: ExerciseProfile) -> Self {
        Self {
            smoother: AngleSmoother::new(profile.smoothing_window),
            profile,
            stage: None,
            count: 0,
            cycle_min: f32::INFINITY,
            cycle_max: f32::NEG_INFINITY,
            last_switch_time: None,
            rep_start_time: None,
            extreme_reached_time: None,
        }
    }

    /// Feed one raw angle sample taken at `now` (seconds)
    ///
    /// Samples must arrive in non-decreasing `now` order.
    pub fn update(&mut self, raw_angle: f32, now: f64) -> CounterUpdate {
        let angle = self.smoother.update(raw_angle);

        self.cycle_min = self.cycle_min.min(angle);
        self.cycle_max = self.cycle_max.max(angle);

        let Some(stage) = self.stage else {
            self.stage = self.classify(angle);
            self.rep_start_time = Some(now);
            let event = self.stage.map_or(RepEvent::None, RepEvent::Classified);
            return self.result(angle, event);
        };

        let (next, at_extreme) = match stage {
            Stage::Down => (Stage::Up, angle <= self.profile.low_threshold),
            Stage::Up => (Stage::Down, angle >= self.profile.high_threshold),
        };

        if !at_extreme {
            // Left the extreme before the dwell completed
            self.extreme_reached_time = None;
            return self.result(angle, RepEvent::None);
        }

        let reached_at = *self.extreme_reached_time.get_or_insert(now);
        if now - reached_at < self.profile.hold_time {
            return self.result(angle, RepEvent::None);
        }

        self.stage = Some(next);
        self.last_switch_time = Some(now);
        self.extreme_reached_time = None;

        let event = self.close_cycle(next, now);
        self.result(angle, event)
    }

    /// Validate the half-cycle that just ended and start a new one
    ///
    /// A rejected cycle is discarded; its range does not carry over.
    fn close_cycle(&mut self, entered: Stage, now: f64) -> RepEvent {
        let started = self.rep_start_time.unwrap_or(now);

        let event = if entered != self.profile.count_on {
            RepEvent::Switched(entered)
        } else if now - started < self.profile.min_rep_time {
            RepEvent::Rejected(RejectReason::TooFast)
        } else if self.cycle_max - self.cycle_min < self.profile.min_range_of_motion {
            RepEvent::Rejected(RejectReason::ShallowRange)
        } else {
            self.count += 1;
            RepEvent::Counted
        };

        self.rep_start_time = Some(now);
        self.reset_cycle();
        event
    }

    fn classify(&self, angle: f32) -> Option<Stage> {
        if angle >= self.profile.high_threshold {
            Some(Stage::Down)
        } else if angle <= self.profile.low_threshold {
            Some(Stage::Up)
        } else {
            None
        }
    }

    fn reset_cycle(&mut self) {
        self.cycle_min = f32::INFINITY;
        self.cycle_max = f32::NEG_INFINITY;
        self.extreme_reached_time = None;
    }

    fn result(&self, angle: f32, event: RepEvent) -> CounterUpdate {
        CounterUpdate {
            stage: self.stage,
            count: self.count,
            angle,
            event,
        }
    }

    pub fn stage(&self) -> Option<Stage> {
        self.stage
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn profile(&self) -> &ExerciseProfile {
        &self.profile
    }

    pub fn last_switch_time(&self) -> Option<f64> {
        self.last_switch_time
    }

    /// Span of smoothed angles since the last cycle boundary
    pub fn range_of_motion(&self) -> Option<f32> {
        (self.cycle_min <= self.cycle_max).then(|| self.cycle_max - self.cycle_min)
    }
}
