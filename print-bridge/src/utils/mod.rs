//! Utilities
//!
//! - [`AppError`] / [`AppResult`] - application errors and JSON error body
//! - [`logger`] - tracing setup
//! - [`time`] - timestamps and receipt time

pub mod error;
pub mod logger;
pub mod time;

pub use error::{AppError, AppResult, ErrorResponse};
