//! Built-in sample order, used by demo mode and tests

use rust_decimal::Decimal;

use super::types::{LineItem, Modifier, Order, OrderType, Payment, PaymentMethod, RefNumber};

pub const SAMPLE_ORDER_NUMBER: &str = "DEMO-001";

/// Money from pence, avoids float literals
fn pence(p: i64) -> Decimal {
    Decimal::new(p, 2)
}

fn item(name: &str, quantity: u32, price: i64, category: &str) -> LineItem {
    LineItem {
        name: name.to_string(),
        quantity,
        price: pence(price),
        spice_level: None,
        instructions: None,
        allergens: None,
        modifiers: None,
        category: Some(category.to_string()),
    }
}

pub fn order() -> Order {
    let mut bhaji = item("Onion Bhaji", 1, 450, "Starters");
    bhaji.allergens = Some(vec!["gluten".to_string(), "mustard".to_string()]);

    let mut curry = item("Chicken Tikka Masala", 2, 1095, "Mains");
    curry.spice_level = Some("Medium".to_string());
    curry.instructions = Some("Extra sauce".to_string());
    curry.modifiers = Some(vec![Modifier {
        name: "Extra Chicken".to_string(),
        price: pence(250),
    }]);

    Order {
        order_number: Some(RefNumber::from(SAMPLE_ORDER_NUMBER)),
        order_type: Some(OrderType::DineIn),
        table_number: Some(RefNumber::Number(12)),
        items: vec![
            bhaji,
            curry,
            item("Garlic Naan", 2, 295, "Rice & Bread"),
            item("Mango Lassi", 1, 350, "Drinks"),
        ],
        special_instructions: Some("Birthday table, bring dessert menu".to_string()),
        subtotal: pence(3830),
        vat: pence(638),
        discount: None,
        delivery_fee: None,
        total: pence(3830),
        delivery_address: None,
        customer_name: None,
    }
}

pub fn payment() -> Payment {
    Payment {
        method: Some(PaymentMethod::Card),
        status: Some("completed".to_string()),
        card_last_four: Some("4242".to_string()),
        total: Some(pence(3830)),
    }
}
