use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use chrono_tz::Tz;
use receipt_printer::{DevicePrinter, NetworkPrinter, Printer};

use crate::printing::{Branding, KitchenLayout, ReceiptFormatter};

/// Default raw-print port of network receipt printers
pub const DEFAULT_PRINTER_PORT: u16 = 9100;

/// Server configuration
///
/// # Environment variables
///
/// Every field can be overridden from the environment (a `.env` file is
/// loaded first by the binary):
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | HTTP_HOST | 0.0.0.0 | bind address |
/// | HTTP_PORT | 3001 | bind port |
/// | PRINTER_ADDR | - | network printer `host[:port]` |
/// | PRINTER_DEVICE | - | device file, used when no address is set |
/// | PRINTER_TIMEOUT_MS | 5000 | connect/write timeout |
/// | PAPER_WIDTH | 48 | characters per line |
/// | KITCHEN_LAYOUT | grouped | `grouped` or `flat` |
/// | CURRENCY_SYMBOL | £ | currency prefix |
/// | RESTAURANT_NAME | RESTAURANT | branding header |
/// | RESTAURANT_ADDRESS | - | branding line |
/// | RESTAURANT_PHONE | - | branding line |
/// | TIMEZONE | Europe/London | receipt timezone |
/// | DEMO_MODE | false | sample order when none is sent |
/// | LOG_LEVEL | info | log filter |
/// | LOG_JSON | false | JSON log lines |
/// | LOG_DIR | - | daily rotating log files |
/// | ENVIRONMENT | development | environment name |
///
/// # Example
///
/// ```ignore
/// PRINTER_ADDR=192.168.1.50 PAPER_WIDTH=32 cargo run -p print-bridge
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub http_host: String,
    pub http_port: u16,

    // === Printer ===
    /// Network printer `host[:port]`
    pub printer_addr: Option<String>,
    /// Device file such as `/dev/usb/lp0`
    pub printer_device: Option<PathBuf>,
    pub printer_timeout_ms: u64,

    // === Receipt layout ===
    pub paper_width: usize,
    pub kitchen_layout: KitchenLayout,
    pub currency_symbol: String,
    pub restaurant_name: String,
    pub restaurant_address: Option<String>,
    pub restaurant_phone: Option<String>,
    pub timezone: Tz,
    /// Substitute the built-in sample order when a request carries none
    pub demo_mode: bool,

    // === Logging ===
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,

    /// development | staging | production
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_host: "0.0.0.0".into(),
            http_port: 3001,
            printer_addr: None,
            printer_device: None,
            printer_timeout_ms: 5000,
            paper_width: 48,
            kitchen_layout: KitchenLayout::Grouped,
            currency_symbol: "£".into(),
            restaurant_name: "RESTAURANT".into(),
            restaurant_address: None,
            restaurant_phone: None,
            timezone: chrono_tz::Europe::London,
            demo_mode: false,
            log_level: "info".into(),
            log_json: false,
            log_dir: None,
            environment: "development".into(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset or unparsable values keep their default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let env = EnvLookup(&lookup);
        let defaults = Self::default();

        Self {
            http_host: env.get("HTTP_HOST").unwrap_or(defaults.http_host),
            http_port: env.parse("HTTP_PORT").unwrap_or(defaults.http_port),
            printer_addr: env.get("PRINTER_ADDR"),
            printer_device: env.get("PRINTER_DEVICE").map(PathBuf::from),
            printer_timeout_ms: env
                .parse("PRINTER_TIMEOUT_MS")
                .unwrap_or(defaults.printer_timeout_ms),
            paper_width: env
                .parse("PAPER_WIDTH")
                .filter(|w: &usize| *w >= 16)
                .unwrap_or(defaults.paper_width),
            kitchen_layout: env
                .parse("KITCHEN_LAYOUT")
                .unwrap_or(defaults.kitchen_layout),
            currency_symbol: env.get("CURRENCY_SYMBOL").unwrap_or(defaults.currency_symbol),
            restaurant_name: env.get("RESTAURANT_NAME").unwrap_or(defaults.restaurant_name),
            restaurant_address: env.get("RESTAURANT_ADDRESS"),
            restaurant_phone: env.get("RESTAURANT_PHONE"),
            timezone: env.parse("TIMEZONE").unwrap_or(defaults.timezone),
            demo_mode: env.flag("DEMO_MODE").unwrap_or(defaults.demo_mode),
            log_level: env.get("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_json: env.flag("LOG_JSON").unwrap_or(defaults.log_json),
            log_dir: env.get("LOG_DIR"),
            environment: env.get("ENVIRONMENT").unwrap_or(defaults.environment),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn printer_timeout(&self) -> Duration {
        Duration::from_millis(self.printer_timeout_ms)
    }

    /// HTTP bind address
    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.http_host, self.http_port);
        addr.parse()
            .map_err(|e| anyhow::anyhow!("Invalid bind address {}: {}", addr, e))
    }

    /// Printer device from config
    ///
    /// A network address wins over a device file. `None` means simulation
    /// mode.
    pub fn build_printer(&self) -> anyhow::Result<Option<Arc<dyn Printer>>> {
        if let Some(addr) = &self.printer_addr {
            let (host, port) = split_host_port(addr)?;
            let printer = NetworkPrinter::new(host, port)?.with_timeout(self.printer_timeout());
            return Ok(Some(Arc::new(printer)));
        }

        if let Some(path) = &self.printer_device {
            let printer = DevicePrinter::new(path).with_timeout(self.printer_timeout());
            return Ok(Some(Arc::new(printer)));
        }

        Ok(None)
    }

    pub fn formatter(&self) -> ReceiptFormatter {
        ReceiptFormatter::new(
            self.paper_width,
            self.kitchen_layout,
            self.currency_symbol.clone(),
        )
    }

    pub fn branding(&self) -> Branding {
        Branding {
            name: self.restaurant_name.clone(),
            address: self.restaurant_address.clone(),
            phone: self.restaurant_phone.clone(),
        }
    }
}

/// Trimmed, non-empty variable lookup
struct EnvLookup<'a, F: Fn(&str) -> Option<String>>(&'a F);

impl<F: Fn(&str) -> Option<String>> EnvLookup<'_, F> {
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse<T: FromStr>(&self, key: &str) -> Option<T> {
        self.get(key).and_then(|v| v.parse().ok())
    }

    fn flag(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|v| parse_flag(&v))
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// `host`, `host:port` or `[v6]:port`
fn split_host_port(addr: &str) -> anyhow::Result<(&str, u16)> {
    if let Some(rest) = addr.strip_prefix('[') {
        let (host, tail) = rest
            .split_once(']')
            .ok_or_else(|| anyhow::anyhow!("Invalid printer address: {}", addr))?;
        let port = match tail.strip_prefix(':') {
            Some(p) => p.parse()?,
            None => DEFAULT_PRINTER_PORT,
        };
        return Ok((host, port));
    }

    match addr.rsplit_once(':') {
        Some((host, port)) if !host.contains(':') => Ok((host, port.parse()?)),
        _ => Ok((addr, DEFAULT_PRINTER_PORT)),
    }
}
