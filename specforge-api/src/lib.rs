//! specforge-api library interface
//!
//! Exposes the application state, router construction and all service
//! modules for integration testing.

pub mod api;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::services::gemini::TextGenerator;

/// Application state shared across handlers
///
/// Constructed once in `main` (or a test harness); there is no global
/// client state anywhere in the process.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Text-generation client
    pub ai: Arc<dyn TextGenerator>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(db: SqlitePool, ai: Arc<dyn TextGenerator>) -> Self {
        Self {
            db,
            ai,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin([
            HeaderValue::from_static("http://localhost:3000"),
            HeaderValue::from_static("http://localhost:4200"),
            HeaderValue::from_static("http://127.0.0.1:3000"),
            HeaderValue::from_static("http://127.0.0.1:4200"),
        ])
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .merge(api::requirement_routes())
        .merge(api::wiegers_routes())
        .merge(api::glossary_routes())
        .merge(api::health_routes())
        .layer(cors)
        .with_state(state)
}
