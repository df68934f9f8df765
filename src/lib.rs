//! Repcount - exercise repetition counting from pose landmarks
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         REPCOUNT                             │
//! ├──────────────────────────────────────────────────────────────┤
//! │  landmarks ──► AngleExtractor ──► AngleSmoother ──► counter  │
//! │   (pose)         (pose)            (tracking)     (tracking) │
//! │                                                      │       │
//! │               SessionController ◄────────────────────┘       │
//! │                      ▲                                       │
//! │               HTTP API (Axum)                                │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod pose;
pub mod tracking;
pub mod models;
pub mod handlers;

use std::sync::Arc;
use std::time::Instant;

use axum::{
    Router,
    routing::{get, post, put},
};
use parking_lot::Mutex;
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};

use tracking::{ProfileRegistry, SessionController};

pub use error::{AppError, AppResult};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: config::Config,
    pub registry: Arc<ProfileRegistry>,
    pub session: Arc<Mutex<SessionController>>,
    /// Clock origin for frames submitted without a timestamp
    pub started: Instant,
}

impl AppState {
    pub fn new(config: config::Config, registry: ProfileRegistry) -> Self {
        let registry = Arc::new(registry);
        let session = SessionController::new(
            registry.clone(),
            config.default_exercise,
            config.visibility_threshold,
        );

        Self {
            config,
            registry,
            session: Arc::new(Mutex::new(session)),
            started: Instant::now(),
        }
    }

    /// Seconds since the server started
    pub fn elapsed_secs(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    let exercise_routes = Router::new()
        .route("/api/v1/exercises", get(handlers::exercises::list))
        .route("/api/v1/exercises/:name", get(handlers::exercises::get));

    let session_routes = Router::new()
        .route("/api/v1/session", get(handlers::session::get))
        .route("/api/v1/session/exercise", put(handlers::session::select_exercise))
        .route("/api/v1/session/start", post(handlers::session::start))
        .route("/api/v1/session/stop", post(handlers::session::stop))
        .route("/api/v1/session/frames", post(handlers::frames::submit));

    Router::new()
        .route("/health", get(handlers::health::check))
        .merge(exercise_routes)
        .merge(session_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
