//! # receipt-printer
//!
//! ESC/POS receipt printer library - low-level printing capabilities only.
//!
//! ## Scope
//!
//! This crate handles HOW to print:
//! - Plain-text column layout (fixed paper width)
//! - ESC/POS command building
//! - Windows-1252 encoding for Western code pages (`£`, `€`, accents)
//! - Network printing (TCP port 9100)
//! - Local device printing (e.g. `/dev/usb/lp0`)
//!
//! Business logic (WHAT to print) stays in application code:
//! - Kitchen / customer receipt rendering → print-bridge
//!
//! ## Example
//!
//! ```ignore
//! use receipt_printer::{EscPosBuilder, NetworkPrinter, Printer};
//!
//! let mut builder = EscPosBuilder::new(48);
//! builder.center();
//! builder.double_size();
//! builder.line("KITCHEN");
//! builder.reset_size();
//! builder.left();
//! builder.line("2x Naan");
//! builder.cut_feed(3);
//!
//! let printer = NetworkPrinter::from_addr("192.168.1.100:9100")?;
//! printer.print(&builder.build()).await?;
//! ```

mod encoding;
mod error;
mod escpos;
mod layout;
mod printer;

// Re-exports
pub use encoding::{convert_to_cp1252, pad_text, text_width, truncate_text};
pub use error::{PrintError, PrintResult};
pub use escpos::EscPosBuilder;
pub use layout::TextLayout;
pub use printer::{DevicePrinter, NetworkPrinter, Printer};
