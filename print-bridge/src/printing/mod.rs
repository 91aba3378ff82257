//! Receipt printing
//!
//! - [`types`] - order, line item and payment payloads
//! - [`receipt`] - receipt kinds, formatter input and validation
//! - [`formatter`] - plain-text layout for test, kitchen and customer receipts
//! - [`dispatcher`] - device delivery with console fallback
//! - [`sample`] - built-in demo order

pub mod dispatcher;
pub mod formatter;
pub mod receipt;
pub mod sample;
pub mod types;

pub use dispatcher::{Branding, ConnectionStatus, DispatchOutcome, PrintDispatcher, PrinterState};
pub use formatter::{KitchenLayout, ReceiptFormatter};
pub use receipt::{Receipt, ReceiptInput, ReceiptKind, ValidationError};
pub use types::*;
