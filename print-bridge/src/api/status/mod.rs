//! Printer status routes
//!
//! | Path | Method | Meaning |
//! |------|--------|---------|
//! | /api/printer-status | GET | current printer connection state |
//! | /status | GET | alias |
//!
//! The state is refreshed by every print attempt, not by this call.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;
use crate::printing::ConnectionStatus;
use crate::utils::time::now_rfc3339;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/printer-status", get(printer_status))
        .route("/status", get(printer_status))
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    connected: bool,
    status: ConnectionStatus,
    message: String,
    timestamp: String,
    device: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_error: Option<String>,
    updated_at: String,
}

/// GET /api/printer-status
pub async fn printer_status(State(state): State<ServerState>) -> Json<StatusResponse> {
    let printer = state.dispatcher.state();

    Json(StatusResponse {
        connected: printer.connected(),
        status: printer.status,
        message: printer.message(),
        timestamp: now_rfc3339(),
        device: printer.device,
        last_error: printer.last_error,
        updated_at: printer.updated_at.to_rfc3339(),
    })
}
