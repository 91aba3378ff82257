//! Print dispatcher
//!
//! Sends a finished document to the printer, or logs it when there is no
//! printer or the printer fails. Callers always get an accepted job back;
//! device trouble only shows up in logs and in [`PrinterState`].

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use receipt_printer::{EscPosBuilder, Printer};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

use super::receipt::ReceiptKind;

/// Restaurant branding printed above every document on the device
#[derive(Debug, Clone, Default)]
pub struct Branding {
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
}

/// Printer connectivity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    /// Device configured, startup check not run yet
    Uninitialized,
    Connected,
    Disconnected,
    /// No device configured, every job goes to the log
    Simulation,
}

/// Snapshot of the printer connection
#[derive(Debug, Clone, Serialize)]
pub struct PrinterState {
    pub status: ConnectionStatus,
    pub device: String,
    pub last_error: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl PrinterState {
    pub fn connected(&self) -> bool {
        self.status == ConnectionStatus::Connected
    }

    pub fn message(&self) -> String {
        match self.status {
            ConnectionStatus::Uninitialized => format!("Printer {} not checked yet", self.device),
            ConnectionStatus::Connected => format!("Printer connected: {}", self.device),
            ConnectionStatus::Disconnected => match &self.last_error {
                Some(e) => format!("Printer disconnected ({}): {}", self.device, e),
                None => format!("Printer disconnected: {}", self.device),
            },
            ConnectionStatus::Simulation => {
                "No printer configured, printing to console".to_string()
            }
        }
    }
}

/// Where a job ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Printed,
    Simulated { reason: String },
}

/// Print dispatcher
///
/// Owns the device handle. Jobs are serialized so two requests never
/// interleave on the paper.
pub struct PrintDispatcher {
    device: Option<Arc<dyn Printer>>,
    branding: Branding,
    width: usize,
    state: RwLock<PrinterState>,
    job_lock: Mutex<()>,
}

impl PrintDispatcher {
    pub fn new(device: Option<Arc<dyn Printer>>, branding: Branding, width: usize) -> Self {
        let (status, label) = match &device {
            Some(d) => (ConnectionStatus::Uninitialized, d.label()),
            None => (ConnectionStatus::Simulation, "console".to_string()),
        };

        Self {
            device,
            branding,
            width,
            state: RwLock::new(PrinterState {
                status,
                device: label,
                last_error: None,
                updated_at: Utc::now(),
            }),
            job_lock: Mutex::new(()),
        }
    }

    pub fn state(&self) -> PrinterState {
        self.state.read().clone()
    }

    pub fn is_connected(&self) -> bool {
        self.state.read().connected()
    }

    /// Startup check: look at the device once and record the result
    pub async fn check_connection(&self) -> ConnectionStatus {
        let Some(device) = &self.device else {
            info!("No printer configured, running in simulation mode");
            return ConnectionStatus::Simulation;
        };

        if device.is_online().await {
            info!(device = %device.label(), "Printer connected");
            self.mark(ConnectionStatus::Connected, None);
            ConnectionStatus::Connected
        } else {
            warn!(device = %device.label(), "Printer not reachable, falling back to console");
            self.mark(
                ConnectionStatus::Disconnected,
                Some("not reachable at startup".to_string()),
            );
            ConnectionStatus::Disconnected
        }
    }

    /// Device command stream: branding header, document, feed and cut
    pub fn encode_job(&self, document: &str) -> Vec<u8> {
        let mut b = EscPosBuilder::new(self.width);

        b.center();
        b.bold();
        b.double_size();
        b.line(&self.branding.name);
        b.reset_size();
        if let Some(address) = &self.branding.address {
            b.line(address);
        }
        if let Some(phone) = &self.branding.phone {
            b.line(&format!("Tel: {}", phone));
        }
        b.bold_off();
        b.left();
        b.sep_double();

        b.block(document);

        b.feed(3);
        b.cut_feed(0);
        b.build()
    }

    /// Print the document, falling back to the log on any device failure
    ///
    /// The connection state is updated on every attempt.
    #[instrument(skip(self, document), fields(kind = %kind, len = document.len()))]
    pub async fn dispatch(&self, kind: ReceiptKind, document: &str) -> DispatchOutcome {
        let Some(device) = &self.device else {
            return self.simulate(kind, document, "no printer configured");
        };

        let data = self.encode_job(document);

        // Held until the state is recorded, so transitions follow job order
        let _job = self.job_lock.lock().await;
        match device.print(&data).await {
            Ok(()) => {
                info!(device = %device.label(), bytes = data.len(), "Receipt printed");
                self.mark(ConnectionStatus::Connected, None);
                DispatchOutcome::Printed
            }
            Err(e) => {
                warn!(device = %device.label(), error = %e, "Print failed, falling back to console");
                self.mark(ConnectionStatus::Disconnected, Some(e.to_string()));
                self.simulate(kind, document, &e.to_string())
            }
        }
    }

    fn simulate(&self, kind: ReceiptKind, document: &str, reason: &str) -> DispatchOutcome {
        info!(
            target: "print_simulation",
            kind = %kind,
            reason,
            "Simulated {} receipt:\n{}",
            kind,
            document
        );
        DispatchOutcome::Simulated {
            reason: reason.to_string(),
        }
    }

    fn mark(&self, status: ConnectionStatus, error: Option<String>) {
        let mut state = self.state.write();
        if state.status != status {
            info!(from = ?state.status, to = ?status, "Printer state changed");
        }
        state.status = status;
        state.last_error = error;
        state.updated_at = Utc::now();
    }
}
