//! Print API
//!
//! | Path | Method | Body |
//! |------|--------|------|
//! | /api/test-print, /print/test | POST | none |
//! | /api/print-kitchen, /print/kitchen | POST | `{order, orderNumber, timestamp}` |
//! | /api/print-customer, /print/customer | POST | `{order, payment, orderNumber, timestamp}` |
//!
//! `orderData` / `paymentData` are accepted in place of `order` / `payment`.

mod handler;

pub use handler::{PrintRequest, PrintResponse};

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/test-print", post(handler::test_print))
        .route("/print/test", post(handler::test_print))
        .route("/api/print-kitchen", post(handler::print_kitchen))
        .route("/print/kitchen", post(handler::print_kitchen))
        .route("/api/print-customer", post(handler::print_customer))
        .route("/print/customer", post(handler::print_customer))
}
