//! Receipt data model
//!
//! Mirrors the JSON sent by the POS frontend. Field names are accepted in
//! camelCase (frontend) and snake_case (older clients).

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order / table identifier, sent either as a JSON string or a number
///
/// Echoed back in the same form it was received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RefNumber {
    Number(i64),
    Text(String),
}

impl RefNumber {
    /// Empty or whitespace-only text counts as missing
    pub fn is_blank(&self) -> bool {
        matches!(self, RefNumber::Text(s) if s.trim().is_empty())
    }
}

impl fmt::Display for RefNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefNumber::Number(n) => write!(f, "{}", n),
            RefNumber::Text(s) => f.write_str(s.trim()),
        }
    }
}

impl From<&str> for RefNumber {
    fn from(s: &str) -> Self {
        RefNumber::Text(s.to_string())
    }
}

/// Normalize free text for enum matching: lowercase, `_`/space → `-`
fn normalize(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == '_' || c == ' ' { '-' } else { c })
        .collect()
}

/// How the order reaches the customer
///
/// Unknown values are kept verbatim so they still print.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderType {
    #[default]
    DineIn,
    Delivery,
    Takeaway,
    Collection,
    Other(String),
}

impl From<String> for OrderType {
    fn from(s: String) -> Self {
        match normalize(&s).as_str() {
            "" | "dine-in" | "dinein" | "eat-in" => OrderType::DineIn,
            "delivery" => OrderType::Delivery,
            "takeaway" | "take-away" | "takeout" | "take-out" => OrderType::Takeaway,
            "collection" | "pickup" | "pick-up" => OrderType::Collection,
            _ => OrderType::Other(s.trim().to_string()),
        }
    }
}

impl From<OrderType> for String {
    fn from(t: OrderType) -> Self {
        match t {
            OrderType::DineIn => "dine-in".to_string(),
            OrderType::Delivery => "delivery".to_string(),
            OrderType::Takeaway => "takeaway".to_string(),
            OrderType::Collection => "collection".to_string(),
            OrderType::Other(s) => s,
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderType::DineIn => f.write_str("DINE-IN"),
            OrderType::Delivery => f.write_str("DELIVERY"),
            OrderType::Takeaway => f.write_str("TAKEAWAY"),
            OrderType::Collection => f.write_str("COLLECTION"),
            OrderType::Other(s) => f.write_str(&s.to_uppercase()),
        }
    }
}

/// Payment method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentMethod {
    Card,
    Cash,
    Other(String),
}

impl From<String> for PaymentMethod {
    fn from(s: String) -> Self {
        match normalize(&s).as_str() {
            "card" | "credit-card" | "debit-card" | "contactless" => PaymentMethod::Card,
            "cash" => PaymentMethod::Cash,
            _ => PaymentMethod::Other(s.trim().to_string()),
        }
    }
}

impl From<PaymentMethod> for String {
    fn from(m: PaymentMethod) -> Self {
        match m {
            PaymentMethod::Card => "card".to_string(),
            PaymentMethod::Cash => "cash".to_string(),
            PaymentMethod::Other(s) => s,
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Card => f.write_str("CARD"),
            PaymentMethod::Cash => f.write_str("CASH"),
            PaymentMethod::Other(s) => f.write_str(&s.to_uppercase()),
        }
    }
}

/// Kitchen ticket section, in print order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KitchenSection {
    Starters,
    Mains,
    RiceAndBread,
    Drinks,
    Others,
}

impl KitchenSection {
    /// Map a menu category to its section; anything unrecognized is Others
    pub fn from_category(category: Option<&str>) -> Self {
        let Some(category) = category else {
            return KitchenSection::Others;
        };

        match normalize(category).as_str() {
            "starter" | "starters" | "appetiser" | "appetisers" | "appetizer" | "appetizers" => {
                KitchenSection::Starters
            }
            "main" | "mains" | "main-course" | "main-courses" => KitchenSection::Mains,
            "rice-&-bread" | "rice-and-bread" | "rice" | "bread" | "breads" => {
                KitchenSection::RiceAndBread
            }
            "drink" | "drinks" | "beverage" | "beverages" => KitchenSection::Drinks,
            _ => KitchenSection::Others,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            KitchenSection::Starters => "Starters",
            KitchenSection::Mains => "Mains",
            KitchenSection::RiceAndBread => "Rice & Bread",
            KitchenSection::Drinks => "Drinks",
            KitchenSection::Others => "Others",
        }
    }
}

/// Add-on attached to a line item (extra rice, no onions, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Modifier {
    pub name: String,
    /// Price delta, may be zero
    #[serde(default, alias = "priceDelta", alias = "price_delta")]
    pub price: Decimal,
}

/// One ordered dish
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub name: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    /// Unit price
    #[serde(default, alias = "unitPrice", alias = "unit_price")]
    pub price: Decimal,
    #[serde(default, alias = "spice_level", alias = "spice")]
    pub spice_level: Option<String>,
    #[serde(
        default,
        alias = "specialInstructions",
        alias = "special_instructions",
        alias = "notes"
    )]
    pub instructions: Option<String>,
    #[serde(default)]
    pub allergens: Option<Vec<String>>,
    #[serde(default)]
    pub modifiers: Option<Vec<Modifier>>,
    #[serde(default)]
    pub category: Option<String>,
}

fn default_quantity() -> u32 {
    1
}

impl LineItem {
    pub fn section(&self) -> KitchenSection {
        KitchenSection::from_category(self.category.as_deref())
    }

    /// Unit price × quantity, `None` when it does not fit a `Decimal`
    pub fn checked_extended_price(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }

    /// Unit price × quantity, saturating
    pub fn extended_price(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.quantity))
    }

    pub fn allergens(&self) -> &[String] {
        self.allergens.as_deref().unwrap_or_default()
    }

    pub fn modifiers(&self) -> &[Modifier] {
        self.modifiers.as_deref().unwrap_or_default()
    }
}

/// Order payload
///
/// Money fields are precomputed by the POS and printed as given.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default, alias = "order_number")]
    pub order_number: Option<RefNumber>,
    #[serde(default, alias = "order_type", alias = "type")]
    pub order_type: Option<OrderType>,
    #[serde(default, alias = "table_number", alias = "table")]
    pub table_number: Option<RefNumber>,
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default, alias = "special_instructions", alias = "notes")]
    pub special_instructions: Option<String>,
    #[serde(default)]
    pub subtotal: Decimal,
    #[serde(
        default,
        alias = "vatAmount",
        alias = "vat_amount",
        alias = "tax",
        alias = "taxAmount"
    )]
    pub vat: Decimal,
    #[serde(default)]
    pub discount: Option<Decimal>,
    #[serde(default, alias = "delivery_fee")]
    pub delivery_fee: Option<Decimal>,
    #[serde(default)]
    pub total: Decimal,
    #[serde(default, alias = "delivery_address", alias = "address")]
    pub delivery_address: Option<String>,
    #[serde(default, alias = "customer_name")]
    pub customer_name: Option<String>,
}

/// Payment confirmation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(default, alias = "payment_method", alias = "paymentMethod")]
    pub method: Option<PaymentMethod>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(
        default,
        alias = "card_last_four",
        alias = "cardLast4",
        alias = "last4",
        alias = "maskedCard"
    )]
    pub card_last_four: Option<String>,
    /// Mirrored from the order; only cross-checked, never printed
    #[serde(default)]
    pub total: Option<Decimal>,
}

impl Payment {
    /// Last four digits of the card, if any were supplied
    pub fn card_suffix(&self) -> Option<String> {
        let digits: Vec<char> = self
            .card_last_four
            .as_deref()?
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();

        if digits.is_empty() {
            return None;
        }
        Some(digits[digits.len().saturating_sub(4)..].iter().collect())
    }
}
