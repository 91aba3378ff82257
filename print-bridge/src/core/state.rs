use std::sync::Arc;

use receipt_printer::Printer;

use crate::core::Config;
use crate::printing::{ConnectionStatus, PrintDispatcher, ReceiptFormatter};

/// Server state shared by all handlers
///
/// Cheap to clone: everything behind `Arc`.
///
/// | Field | Type | Meaning |
/// |-------|------|---------|
/// | config | Arc<Config> | configuration (immutable) |
/// | formatter | Arc<ReceiptFormatter> | receipt layout |
/// | dispatcher | Arc<PrintDispatcher> | printer handle and connection state |
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub formatter: Arc<ReceiptFormatter>,
    pub dispatcher: Arc<PrintDispatcher>,
}

impl ServerState {
    /// Build state around an explicit device (or none for simulation)
    pub fn new(config: Config, device: Option<Arc<dyn Printer>>) -> Self {
        let formatter = config.formatter();
        let dispatcher = PrintDispatcher::new(device, config.branding(), config.paper_width);

        Self {
            config: Arc::new(config),
            formatter: Arc::new(formatter),
            dispatcher: Arc::new(dispatcher),
        }
    }

    /// Build state from config and run the startup printer check
    pub async fn initialize(config: &Config) -> anyhow::Result<Self> {
        let device = config.build_printer()?;
        let state = Self::new(config.clone(), device);

        let status = state.dispatcher.check_connection().await;
        if config.is_production() && status == ConnectionStatus::Simulation {
            tracing::warn!("No printer configured in production, receipts will only be logged");
        }
        tracing::info!(
            status = ?status,
            device = %state.dispatcher.state().device,
            layout = %state.formatter.layout(),
            width = state.formatter.width(),
            demo_mode = config.demo_mode,
            "Server state initialized"
        );

        Ok(state)
    }
}
