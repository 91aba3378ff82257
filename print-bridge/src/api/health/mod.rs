//! Health check routes
//!
//! | Path | Method | Meaning |
//! |------|--------|---------|
//! | /api/health | GET | liveness plus printer flag |
//! | /health | GET | alias |
//!
//! ```json
//! {
//!   "status": "ok",
//!   "message": "Print bridge is running",
//!   "timestamp": "2026-01-01T12:00:00.000Z",
//!   "printer_connected": false,
//!   "version": "0.1.0"
//! }
//! ```

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;
use crate::utils::time::now_rfc3339;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/health", get(health))
        .route("/health", get(health))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    message: &'static str,
    timestamp: String,
    printer_connected: bool,
    version: &'static str,
}

/// GET /api/health
pub async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: "Print bridge is running",
        timestamp: now_rfc3339(),
        printer_connected: state.dispatcher.is_connected(),
        version: env!("CARGO_PKG_VERSION"),
    })
}
