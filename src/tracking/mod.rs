//! Tracking Module - angle smoothing and rep counting
//!
//! ## Structure
//! - `smoother`: median window over raw angles
//! - `counter`: hysteresis state machine (stage + count)
//! - `profile`: per-exercise thresholds and registry
//! - `session`: controller that owns one counter at a time
//!
//! ## Usage
//! ```ignore
//! use repcount::tracking::{ProfileRegistry, RepCounter};
//!
//! let profile = ProfileRegistry::builtin().get("squat")?;
//! let mut counter = RepCounter::new(profile);
//! let update = counter.update(raw_angle, timestamp_secs);
//! println!("{} reps, stage {:?}", update.count, update.stage);
//! ```

pub mod smoother;
pub mod counter;
pub mod profile;
pub mod session;

#[cfg(test)]
mod tests;

pub use smoother::{AngleSmoother, DEFAULT_SMOOTHING_WINDOW};
pub use counter::{CounterUpdate, RejectReason, RepCounter, RepEvent, Stage};
pub use profile::{Exercise, ExerciseProfile, ProfileError, ProfileOverride, ProfileRegistry};
pub use session::{FrameOutcome, SessionController, SessionError, SessionSnapshot, SessionSummary};
