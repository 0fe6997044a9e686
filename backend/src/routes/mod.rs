//! Route definitions for the Orchard Watering Scheduler

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Schedule generation and downloads
        .nest("/schedules", schedule_routes())
}

/// Schedule routes
fn schedule_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::generate_schedule))
        .route("/csv", post(handlers::schedule_csv))
        .route("/workbook", post(handlers::schedule_workbook))
}
