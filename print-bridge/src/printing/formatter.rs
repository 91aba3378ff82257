//! Receipt formatter
//!
//! Renders test, kitchen and customer receipts into plain text. The same
//! text goes to the printer and, in simulation mode, to the log.
//!
//! Money fields come precomputed from the POS; the formatter prints them as
//! given and never re-adds line items.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::DateTime;
use chrono_tz::Tz;
use receipt_printer::TextLayout;
use rust_decimal::{Decimal, RoundingStrategy};

use super::receipt::{Receipt, ReceiptInput, ReceiptKind, ValidationError};
use super::types::{KitchenSection, LineItem, Order, Payment, RefNumber};

/// Kitchen ticket layout strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KitchenLayout {
    /// Items in request order
    Flat,
    /// Items under fixed section headers (Starters, Mains, ...)
    #[default]
    Grouped,
}

impl FromStr for KitchenLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "flat" | "simple" => Ok(KitchenLayout::Flat),
            "grouped" | "sections" => Ok(KitchenLayout::Grouped),
            other => Err(format!("unknown kitchen layout: {}", other)),
        }
    }
}

impl std::fmt::Display for KitchenLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KitchenLayout::Flat => f.write_str("flat"),
            KitchenLayout::Grouped => f.write_str("grouped"),
        }
    }
}

/// Receipt formatter
///
/// Common widths:
/// - 58mm paper: 32 characters
/// - 80mm paper: 48 characters
#[derive(Debug, Clone)]
pub struct ReceiptFormatter {
    width: usize,
    layout: KitchenLayout,
    currency: String,
}

impl ReceiptFormatter {
    pub fn new(width: usize, layout: KitchenLayout, currency: impl Into<String>) -> Self {
        Self {
            width,
            layout,
            currency: currency.into(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn layout(&self) -> KitchenLayout {
        self.layout
    }

    /// Validate the input for `kind` and render it
    ///
    /// Nothing is rendered when validation fails.
    pub fn render(
        &self,
        kind: ReceiptKind,
        input: &ReceiptInput,
        at: &DateTime<Tz>,
    ) -> Result<Receipt, ValidationError> {
        let (order_number, document) = match kind {
            ReceiptKind::Test => (None, self.test_receipt(at)),
            ReceiptKind::Kitchen => {
                let (order, number) = input.kitchen_parts()?;
                (Some(number.clone()), self.kitchen_receipt(order, number, at))
            }
            ReceiptKind::Customer => {
                let (order, payment, number) = input.customer_parts()?;
                (
                    Some(number.clone()),
                    self.customer_receipt(order, payment, number, at),
                )
            }
        };

        Ok(Receipt {
            kind,
            order_number,
            document,
        })
    }

    // ========== Test ==========

    /// Static sample content plus the timestamp
    pub fn test_receipt(&self, at: &DateTime<Tz>) -> String {
        let mut b = TextLayout::new(self.width);
        self.render_header(&mut b, "TEST PRINT", None, at);

        b.line("Printer connection: OK");
        b.line(&format!("Paper width: {} columns", self.width));
        b.line(&format!("Kitchen layout: {}", self.layout));
        b.sep_single();

        b.line_lr("1x Sample Item", &self.money(Decimal::new(100, 2)));
        b.line_lr("LEFT", "RIGHT");
        b.center("CENTER");
        b.sep_single();

        b.line("ABCDEFGHIJKLMNOPQRSTUVWXYZ");
        b.line(&format!("0123456789 {}", self.currency));
        b.sep_double();
        b.center("End of test print");

        b.finalize()
    }

    // ========== Kitchen ==========

    /// Kitchen ticket: quantities and preparation notes, no prices
    pub fn kitchen_receipt(&self, order: &Order, number: &RefNumber, at: &DateTime<Tz>) -> String {
        let mut b = TextLayout::new(self.width);
        self.render_header(&mut b, "KITCHEN ORDER", Some(number), at);

        if order.items.is_empty() {
            b.line("(no items)");
            b.sep_single();
        } else {
            match self.layout {
                KitchenLayout::Flat => {
                    for item in &order.items {
                        self.render_kitchen_item(&mut b, item);
                    }
                    b.sep_single();
                }
                KitchenLayout::Grouped => {
                    for (section, items) in group_by_section(&order.items) {
                        b.line(&format!("[{}]", section.title().to_uppercase()));
                        for item in items {
                            self.render_kitchen_item(&mut b, item);
                        }
                        b.sep_single();
                    }
                }
            }
        }

        if let Some(notes) = non_empty(order.special_instructions.as_deref()) {
            b.wrapped(&format!("NOTES: {}", notes), 7);
            b.sep_single();
        }

        let table = order
            .table_number
            .as_ref()
            .filter(|t| !t.is_blank())
            .map(|t| t.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        b.line(&format!("Table: {}", table));
        b.line(&format!(
            "Order Type: {}",
            order.order_type.clone().unwrap_or_default()
        ));
        b.sep_double();

        b.finalize()
    }

    fn render_kitchen_item(&self, b: &mut TextLayout, item: &LineItem) {
        b.wrapped(&format!("{}x {}", item.quantity, item.name.trim()), 3);

        for modifier in item.modifiers() {
            b.wrapped(&format!("   + {}", modifier.name.trim()), 5);
        }
        if let Some(spice) = non_empty(item.spice_level.as_deref()) {
            b.line(&format!("   Spice: {}", spice));
        }
        if let Some(note) = non_empty(item.instructions.as_deref()) {
            b.wrapped(&format!("   Note: {}", note), 9);
        }
        if !item.allergens().is_empty() {
            b.wrapped(
                &format!("   !! ALLERGENS: {}", item.allergens().join(", ")),
                6,
            );
        }
    }

    // ========== Customer ==========

    /// Itemized bill with totals and payment confirmation
    pub fn customer_receipt(
        &self,
        order: &Order,
        payment: &Payment,
        number: &RefNumber,
        at: &DateTime<Tz>,
    ) -> String {
        let mut b = TextLayout::new(self.width);
        self.render_header(&mut b, "CUSTOMER RECEIPT", Some(number), at);

        let customer = non_empty(order.customer_name.as_deref());
        let table = order.table_number.as_ref().filter(|t| !t.is_blank());
        if let Some(name) = customer {
            b.line(&format!("Customer: {}", name));
        }
        if let Some(table) = table {
            b.line(&format!("Table: {}", table));
        }
        if customer.is_some() || table.is_some() {
            b.sep_single();
        }

        for item in &order.items {
            b.line_lr(
                &format!("{}x {}", item.quantity, item.name.trim()),
                &self.money(item.extended_price()),
            );
            for modifier in item.modifiers() {
                b.line_lr(
                    &format!("   + {}", modifier.name.trim()),
                    &self.money(modifier.price),
                );
            }
        }
        b.sep_single();

        b.line_lr("Subtotal", &self.money(order.subtotal));
        if let Some(discount) = order.discount.filter(|d| *d > Decimal::ZERO) {
            b.line_lr("Discount", &format!("-{}", self.money(discount)));
        }
        if let Some(fee) = order.delivery_fee.filter(|f| *f > Decimal::ZERO) {
            b.line_lr("Delivery Fee", &self.money(fee));
        }
        b.line_lr("VAT", &self.money(order.vat));
        b.line_lr("TOTAL", &self.money(order.total));
        b.sep_single();

        if let Some(method) = &payment.method {
            b.line(&format!("Payment: {}", method));
        }
        if let Some(status) = non_empty(payment.status.as_deref()) {
            b.line(&format!("Status: {}", status));
        }
        if let Some(suffix) = payment.card_suffix() {
            b.line(&format!("Card: **** {}", suffix));
        }
        b.line(&format!(
            "Order Type: {}",
            order.order_type.clone().unwrap_or_default()
        ));
        if let Some(address) = non_empty(order.delivery_address.as_deref()) {
            b.wrapped(&format!("Delivery Address: {}", address), 2);
        }

        if let Some(paid) = payment.total
            && paid != order.total
        {
            tracing::warn!(
                order_number = %number,
                order_total = %order.total,
                payment_total = %paid,
                "Payment total differs from order total, printing order total"
            );
        }

        b.sep_double();
        b.center("Thank you for dining with us!");
        b.sep_double();

        b.finalize()
    }

    // ========== Shared ==========

    fn render_header(
        &self,
        b: &mut TextLayout,
        title: &str,
        number: Option<&RefNumber>,
        at: &DateTime<Tz>,
    ) {
        b.sep_double();
        b.center(title);
        b.sep_double();
        if let Some(number) = number {
            b.line(&format!("Order #: {}", number));
        }
        b.line(&format!("Time: {}", format_timestamp(at)));
        b.sep_single();
    }

    /// Currency amount with exactly two decimals, half away from zero
    pub fn money(&self, value: Decimal) -> String {
        let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        if rounded < Decimal::ZERO {
            format!("-{}{:.2}", self.currency, rounded.abs())
        } else {
            format!("{}{:.2}", self.currency, rounded)
        }
    }
}

impl Default for ReceiptFormatter {
    fn default() -> Self {
        Self::new(48, KitchenLayout::default(), "£")
    }
}

/// Group items by kitchen section, in section print order
///
/// Only non-empty sections are returned; item order within a section
/// follows the request.
fn group_by_section(items: &[LineItem]) -> Vec<(KitchenSection, Vec<&LineItem>)> {
    let mut groups: BTreeMap<KitchenSection, Vec<&LineItem>> = BTreeMap::new();
    for item in items {
        groups.entry(item.section()).or_default().push(item);
    }
    groups.into_iter().collect()
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

fn format_timestamp(at: &DateTime<Tz>) -> String {
    at.format("%d/%m/%Y %H:%M:%S").to_string()
}
