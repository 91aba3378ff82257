//! Receipt kinds, formatter input and validation

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use super::types::{Order, Payment, RefNumber};

/// Which document is being printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceiptKind {
    Test,
    Kitchen,
    Customer,
}

impl fmt::Display for ReceiptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReceiptKind::Test => f.write_str("test"),
            ReceiptKind::Kitchen => f.write_str("kitchen"),
            ReceiptKind::Customer => f.write_str("customer"),
        }
    }
}

/// Request data rejected before anything is rendered
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    Missing(&'static str),

    #[error("Invalid {field}: {reason}")]
    Invalid { field: String, reason: String },
}

impl ValidationError {
    fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Everything a print request may carry
///
/// The order number is taken from the request first, then from the order.
#[derive(Debug, Clone, Default)]
pub struct ReceiptInput {
    pub order: Option<Order>,
    pub payment: Option<Payment>,
    pub order_number: Option<RefNumber>,
}

impl ReceiptInput {
    /// Blank values count as missing at both levels
    pub fn resolved_order_number(&self) -> Option<&RefNumber> {
        let present = |n: &&RefNumber| !n.is_blank();
        self.order_number.as_ref().filter(present).or_else(|| {
            self.order
                .as_ref()
                .and_then(|o| o.order_number.as_ref())
                .filter(present)
        })
    }

    /// Order and order number, both required
    pub fn kitchen_parts(&self) -> Result<(&Order, &RefNumber), ValidationError> {
        let order = self
            .order
            .as_ref()
            .ok_or(ValidationError::Missing("order"))?;
        let number = self
            .resolved_order_number()
            .ok_or(ValidationError::Missing("orderNumber"))?;
        validate_order(order)?;
        Ok((order, number))
    }

    /// Order, payment and order number, all required
    pub fn customer_parts(&self) -> Result<(&Order, &Payment, &RefNumber), ValidationError> {
        let (order, number) = self.kitchen_parts()?;
        let payment = self
            .payment
            .as_ref()
            .ok_or(ValidationError::Missing("payment"))?;
        Ok((order, payment, number))
    }
}

fn validate_order(order: &Order) -> Result<(), ValidationError> {
    for (i, item) in order.items.iter().enumerate() {
        if item.name.trim().is_empty() {
            return Err(ValidationError::invalid(
                format!("items[{}].name", i),
                "must not be empty",
            ));
        }
        if item.quantity == 0 {
            return Err(ValidationError::invalid(
                format!("items[{}].quantity", i),
                "must be at least 1",
            ));
        }
        if item.price < Decimal::ZERO {
            return Err(ValidationError::invalid(
                format!("items[{}].price", i),
                "must not be negative",
            ));
        }
        let quantity = Decimal::from(item.quantity);
        if item.checked_extended_price().is_none() {
            return Err(ValidationError::invalid(
                format!("items[{}].price", i),
                "too large for its quantity",
            ));
        }
        for (j, modifier) in item.modifiers().iter().enumerate() {
            if modifier.price.checked_mul(quantity).is_none() {
                return Err(ValidationError::invalid(
                    format!("items[{}].modifiers[{}].price", i, j),
                    "too large for its quantity",
                ));
            }
        }
    }

    let money = [
        ("subtotal", Some(order.subtotal)),
        ("vat", Some(order.vat)),
        ("discount", order.discount),
        ("deliveryFee", order.delivery_fee),
        ("total", Some(order.total)),
    ];
    for (field, value) in money {
        if value.is_some_and(|v| v < Decimal::ZERO) {
            return Err(ValidationError::invalid(field, "must not be negative"));
        }
    }

    Ok(())
}

/// A rendered document ready for dispatch
#[derive(Debug, Clone)]
pub struct Receipt {
    pub kind: ReceiptKind,
    pub order_number: Option<RefNumber>,
    pub document: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printing::sample;

    #[test]
    fn test_order_number_from_request_wins() {
        let mut order = sample::order();
        order.order_number = Some(RefNumber::from("7"));
        let input = ReceiptInput {
            order: Some(order),
            payment: None,
            order_number: Some(RefNumber::from("42")),
        };

        assert_eq!(input.resolved_order_number(), Some(&RefNumber::from("42")));
    }

    #[test]
    fn test_order_number_falls_back_to_order() {
        let mut order = sample::order();
        order.order_number = Some(RefNumber::Number(7));
        let input = ReceiptInput {
            order: Some(order),
            ..Default::default()
        };

        let (_, number) = input.kitchen_parts().unwrap();
        assert_eq!(number, &RefNumber::Number(7));
    }

    #[test]
    fn test_missing_fields() {
        let empty = ReceiptInput::default();
        assert_eq!(
            empty.kitchen_parts().unwrap_err(),
            ValidationError::Missing("order")
        );

        let mut order = sample::order();
        order.order_number = None;
        let no_number = ReceiptInput {
            order: Some(order),
            order_number: Some(RefNumber::from(" ")),
            ..Default::default()
        };
        assert_eq!(
            no_number.kitchen_parts().unwrap_err(),
            ValidationError::Missing("orderNumber")
        );

        let no_payment = ReceiptInput {
            order: Some(sample::order()),
            order_number: Some(RefNumber::from("1")),
            payment: None,
        };
        assert_eq!(
            no_payment.customer_parts().unwrap_err(),
            ValidationError::Missing("payment")
        );
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let mut order = sample::order();
        order.items[0].quantity = 0;
        let input = ReceiptInput {
            order: Some(order),
            order_number: Some(RefNumber::from("1")),
            ..Default::default()
        };

        assert!(matches!(
            input.kitchen_parts(),
            Err(ValidationError::Invalid { field, .. }) if field == "items[0].quantity"
        ));
    }

    fn numbered(order: Order) -> ReceiptInput {
        ReceiptInput {
            order: Some(order),
            order_number: Some(RefNumber::from("1")),
            ..Default::default()
        }
    }

    fn invalid_field(input: &ReceiptInput) -> String {
        match input.kitchen_parts() {
            Err(ValidationError::Invalid { field, .. }) => field,
            other => panic!("expected invalid field, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_request_number_falls_back_to_order() {
        let mut order = sample::order();
        order.order_number = Some(RefNumber::from("7"));

        for blank in ["", "   "] {
            let input = ReceiptInput {
                order: Some(order.clone()),
                order_number: Some(RefNumber::from(blank)),
                ..Default::default()
            };
            let (_, number) = input.kitchen_parts().unwrap();
            assert_eq!(number, &RefNumber::from("7"));
        }
    }

    #[test]
    fn test_blank_item_name_rejected() {
        for name in ["", "  \t"] {
            let mut order = sample::order();
            order.items[0].name = name.to_string();
            assert_eq!(invalid_field(&numbered(order)), "items[0].name");
        }
    }

    #[test]
    fn test_negative_item_price_rejected() {
        let mut order = sample::order();
        order.items[1].price = Decimal::new(-1, 2);
        assert_eq!(invalid_field(&numbered(order)), "items[1].price");
    }

    #[test]
    fn test_modifier_overflow_rejected() {
        let mut order = sample::order();
        // Chicken Tikka Masala, quantity 2, one modifier
        order.items[1].modifiers.as_mut().unwrap()[0].price = Decimal::MAX;
        assert_eq!(
            invalid_field(&numbered(order)),
            "items[1].modifiers[0].price"
        );
    }

    #[test]
    fn test_negative_totals_rejected() {
        let cases: [(&str, fn(&mut Order)); 5] = [
            ("subtotal", |o| o.subtotal = Decimal::NEGATIVE_ONE),
            ("vat", |o| o.vat = Decimal::NEGATIVE_ONE),
            ("discount", |o| o.discount = Some(Decimal::NEGATIVE_ONE)),
            ("deliveryFee", |o| o.delivery_fee = Some(Decimal::NEGATIVE_ONE)),
            ("total", |o| o.total = Decimal::NEGATIVE_ONE),
        ];

        for (field, corrupt) in cases {
            let mut order = sample::order();
            corrupt(&mut order);
            assert_eq!(invalid_field(&numbered(order)), field);
        }
    }

    #[test]
    fn test_absent_optional_money_accepted() {
        let mut order = sample::order();
        order.discount = None;
        order.delivery_fee = None;
        assert!(numbered(order).kitchen_parts().is_ok());
    }

    #[test]
    fn test_price_overflow_rejected() {
        let mut order = sample::order();
        order.items[0].price = Decimal::MAX;
        order.items[0].quantity = 2;

        let input = numbered(order);
        assert!(matches!(
            input.kitchen_parts(),
            Err(ValidationError::Invalid { ref field, ref reason })
                if field == "items[0].price" && reason.contains("too large")
        ));
    }

    #[test]
    fn test_max_price_single_quantity_accepted() {
        let mut order = sample::order();
        order.items[0].price = Decimal::MAX;
        order.items[0].quantity = 1;
        assert!(numbered(order).kitchen_parts().is_ok());
    }
}
