//! Print API Handlers

use axum::{Json, body::Bytes, extract::State};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, info};

use crate::core::ServerState;
use crate::printing::{DispatchOutcome, Order, Payment, ReceiptInput, ReceiptKind, RefNumber, sample};
use crate::utils::time::{now_rfc3339, receipt_time};
use crate::utils::{AppError, AppResult};

/// Kitchen or customer print request
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintRequest {
    #[serde(default, alias = "orderData", alias = "order_data")]
    pub order: Option<Order>,
    #[serde(default, alias = "paymentData", alias = "payment_data")]
    pub payment: Option<Payment>,
    #[serde(default, alias = "order_number")]
    pub order_number: Option<RefNumber>,
    /// RFC 3339 receipt time, defaults to now
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_number: Option<String>,
    pub timestamp: String,
}

/// JSON body; an empty body is an empty request
fn parse_body<T: DeserializeOwned + Default>(body: &Bytes) -> AppResult<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    Ok(serde_json::from_slice(body)?)
}

/// POST /api/test-print - printer self test
pub async fn test_print(State(state): State<ServerState>) -> AppResult<Json<PrintResponse>> {
    let at = receipt_time(None, state.config.timezone)?;
    let document = state.formatter.test_receipt(&at);
    let outcome = state.dispatcher.dispatch(ReceiptKind::Test, &document).await;
    debug!(?outcome, "Test print finished");

    Ok(Json(PrintResponse {
        success: true,
        message: "Test print accepted for printing".to_string(),
        order_number: None,
        timestamp: now_rfc3339(),
    }))
}

/// POST /api/print-kitchen - kitchen ticket
pub async fn print_kitchen(
    State(state): State<ServerState>,
    body: Bytes,
) -> AppResult<Json<PrintResponse>> {
    let req: PrintRequest = parse_body(&body)?;
    print_order(&state, ReceiptKind::Kitchen, req).await
}

/// POST /api/print-customer - customer receipt
pub async fn print_customer(
    State(state): State<ServerState>,
    body: Bytes,
) -> AppResult<Json<PrintResponse>> {
    let req: PrintRequest = parse_body(&body)?;
    print_order(&state, ReceiptKind::Customer, req).await
}

async fn print_order(
    state: &ServerState,
    kind: ReceiptKind,
    req: PrintRequest,
) -> AppResult<Json<PrintResponse>> {
    let at = receipt_time(req.timestamp.as_deref(), state.config.timezone)?;

    let mut input = ReceiptInput {
        order: req.order,
        payment: req.payment,
        order_number: req.order_number,
    };

    if state.config.demo_mode && input.order.is_none() {
        info!(kind = %kind, "Demo mode: no order supplied, using sample order");
        input.order = Some(sample::order());
        input.payment.get_or_insert_with(sample::payment);
    }

    let receipt = state.formatter.render(kind, &input, &at)?;
    let order_number = receipt
        .order_number
        .as_ref()
        .map(|n| n.to_string())
        .ok_or_else(|| AppError::internal("Rendered receipt has no order number"))?;

    let outcome = state.dispatcher.dispatch(kind, &receipt.document).await;
    match &outcome {
        DispatchOutcome::Printed => {
            info!(kind = %kind, order_number = %order_number, "Receipt printed")
        }
        DispatchOutcome::Simulated { reason } => {
            info!(kind = %kind, order_number = %order_number, reason = %reason, "Receipt simulated")
        }
    }

    let title = match kind {
        ReceiptKind::Kitchen => "Kitchen receipt",
        ReceiptKind::Customer => "Customer receipt",
        ReceiptKind::Test => "Test print",
    };

    Ok(Json(PrintResponse {
        success: true,
        message: format!("{} accepted for printing", title),
        order_number: Some(order_number),
        timestamp: now_rfc3339(),
    }))
}
