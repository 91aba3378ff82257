//! Print Bridge - local receipt printing service for a restaurant POS
//!
//! # Overview
//!
//! Accepts order data over HTTP, lays it out as a fixed-width receipt and
//! sends it to a thermal printer. Without a printer (or when it fails) the
//! receipt is written to the log instead and the request still succeeds.
//!
//! # Module structure
//!
//! ```text
//! print-bridge/src/
//! ├── core/          # config, state, HTTP server
//! ├── api/           # routes and handlers
//! ├── printing/      # payload types, formatter, dispatcher
//! └── utils/         # errors, logging, time
//! ```

pub mod api;
pub mod core;
pub mod printing;
pub mod utils;

pub use crate::core::{Config, Server, ServerState};
pub use printing::{KitchenLayout, PrintDispatcher, ReceiptFormatter};
pub use utils::logger::init_logger;
pub use utils::{AppError, AppResult};

/// Load `.env` and initialize logging from it
pub fn setup_environment() -> anyhow::Result<Config> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    init_logger(&config.log_level, config.log_json, config.log_dir.as_deref())?;

    Ok(config)
}

pub fn print_banner() {
    println!(
        r#"
    ____       _       __     ____       _     __
   / __ \_____(_)___  / /_   / __ )_____(_)___/ /___ ____
  / /_/ / ___/ / __ \/ __/  / __  / ___/ / __  / __ `/ _ \
 / ____/ /  / / / / / /_   / /_/ / /  / / /_/ / /_/ /  __/
/_/   /_/  /_/_/ /_/\__/  /_____/_/  /_/\__,_/\__, /\___/
                                             /____/
    "#
    );
}
