use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use print_bridge::{Config, ServerState, api::build_app};
use receipt_printer::{NetworkPrinter, PrintError, PrintResult, Printer};
use serde_json::{Value, json};
use tokio::io::AsyncReadExt;
use tokio::net::TcpListener;
use tower::ServiceExt;

/// In-memory printer; fails while `failing` is set
#[derive(Default)]
struct MockPrinter {
    failing: AtomicBool,
    jobs: parking_lot::Mutex<Vec<Vec<u8>>>,
}

impl MockPrinter {
    fn printed_text(&self) -> String {
        self.jobs
            .lock()
            .iter()
            .map(|job| String::from_utf8_lossy(job).into_owned())
            .collect()
    }
}

#[async_trait::async_trait]
impl Printer for MockPrinter {
    async fn print(&self, data: &[u8]) -> PrintResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(PrintError::Connection("paper jam".to_string()));
        }
        self.jobs.lock().push(data.to_vec());
        Ok(())
    }

    async fn is_online(&self) -> bool {
        !self.failing.load(Ordering::SeqCst)
    }

    fn label(&self) -> String {
        "mock".to_string()
    }
}

fn app(state: ServerState) -> Router {
    build_app().with_state(state)
}

fn simulated() -> Router {
    app(ServerState::new(Config::default(), None))
}

async fn with_mock(config: Config) -> (Router, Arc<MockPrinter>) {
    let printer = Arc::new(MockPrinter::default());
    let device: Arc<dyn Printer> = printer.clone();
    let state = ServerState::new(config, Some(device));
    state.dispatcher.check_connection().await;
    (app(state), printer)
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let body = match body {
        Some(v) => Body::from(v.to_string()),
        None => Body::empty(),
    };
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

fn naan_order() -> Value {
    json!({
        "order": {
            "items": [{"quantity": 2, "name": "Naan", "category": "Rice & Bread"}]
        },
        "orderNumber": "42"
    })
}

#[tokio::test]
async fn test_health_without_printer() {
    let app = simulated();

    for path in ["/api/health", "/health"] {
        let (status, body) = call(&app, "GET", path, None).await;
        assert_eq!(status, StatusCode::OK, "{}", path);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["printer_connected"], false);
        assert!(body["timestamp"].is_string());
        assert!(body["version"].is_string());
    }
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = simulated().oneshot(request).await.unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_status_in_simulation() {
    let app = simulated();

    for path in ["/api/printer-status", "/status"] {
        let (status, body) = call(&app, "GET", path, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["connected"], false);
        assert_eq!(body["status"], "simulation");
        assert_eq!(body["device"], "console");
    }
}

#[tokio::test]
async fn test_test_print_both_paths() {
    let (app, printer) = with_mock(Config::default()).await;

    for path in ["/api/test-print", "/print/test"] {
        let (status, body) = call(&app, "POST", path, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert!(body.get("orderNumber").is_none());
    }

    assert_eq!(printer.jobs.lock().len(), 2);
    assert!(printer.printed_text().contains("TEST PRINT"));
}

#[tokio::test]
async fn test_kitchen_missing_order() {
    let app = simulated();

    let (status, body) = call(&app, "POST", "/api/print-kitchen", Some(json!({"orderNumber": "1"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "validation_error");
    assert!(body["message"].as_str().unwrap().contains("order"));

    let (status, _) = call(&app, "POST", "/print/kitchen", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_kitchen_missing_order_number() {
    let app = simulated();
    let body = json!({"order": {"items": [{"name": "Naan", "quantity": 1}]}});

    let (status, body) = call(&app, "POST", "/print/kitchen", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("orderNumber"));
}

#[tokio::test]
async fn test_kitchen_grouped_naan() {
    let (app, printer) = with_mock(Config::default()).await;

    let (status, body) = call(&app, "POST", "/api/print-kitchen", Some(naan_order())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["orderNumber"], "42");

    let text = printer.printed_text();
    let header = text.find("[RICE & BREAD]").unwrap();
    let item = text.find("2x Naan").unwrap();
    assert!(header < item);
    assert!(text.contains("Order Type: DINE-IN"));
    assert!(text.contains("Table: N/A"));
}

#[tokio::test]
async fn test_kitchen_flat_naan() {
    let config = Config {
        kitchen_layout: print_bridge::KitchenLayout::Flat,
        ..Config::default()
    };
    let (app, printer) = with_mock(config).await;

    let (status, body) = call(&app, "POST", "/print/kitchen", Some(naan_order())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["orderNumber"], "42");

    let text = printer.printed_text();
    assert!(text.contains("2x Naan"));
    assert!(!text.contains("[RICE & BREAD]"));
}

#[tokio::test]
async fn test_kitchen_order_number_inside_order() {
    let app = simulated();
    let body = json!({"orderData": {"orderNumber": 77, "items": [{"name": "Dal", "quantity": 1}]}});

    let (status, body) = call(&app, "POST", "/print/kitchen", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["orderNumber"], "77");
}

#[tokio::test]
async fn test_kitchen_rejects_zero_quantity() {
    let app = simulated();
    let body = json!({
        "order": {"items": [{"name": "Naan", "quantity": 0}]},
        "orderNumber": "1"
    });

    let (status, body) = call(&app, "POST", "/print/kitchen", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_negative_money_is_rejected() {
    let app = simulated();

    let cases = [
        ("/print/kitchen", "items[0].price", json!([{"name": "Naan", "quantity": 1, "price": "-0.01"}]), 0),
        ("/print/customer", "total", json!([{"name": "Naan", "quantity": 1, "price": 2.95}]), -1),
    ];

    for (path, field, items, total) in cases {
        let body = json!({
            "order": {"items": items, "total": total},
            "payment": {"method": "cash"},
            "orderNumber": "1"
        });

        let (status, body) = call(&app, "POST", path, Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", path);
        assert_eq!(body["error"], "validation_error");
        assert!(body["message"].as_str().unwrap().contains(field));
    }
}

#[tokio::test]
async fn test_customer_rejects_overflowing_line() {
    let (app, printer) = with_mock(Config::default()).await;
    let body = json!({
        "order": {
            "items": [{"name": "Naan", "quantity": 2, "price": "79228162514264337593543950335"}]
        },
        "payment": {"method": "cash"},
        "orderNumber": "1"
    });

    let (status, body) = call(&app, "POST", "/print/customer", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "validation_error");
    assert!(printer.jobs.lock().is_empty());
}

#[tokio::test]
async fn test_blank_order_number_uses_order_value() {
    let app = simulated();
    let body = json!({
        "order": {"orderNumber": "7", "items": [{"name": "Naan", "quantity": 1, "price": 2.95}]},
        "payment": {"method": "cash"},
        "orderNumber": ""
    });

    let (status, body) = call(&app, "POST", "/print/customer", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["orderNumber"], "7");
}

#[tokio::test]
async fn test_customer_missing_payment() {
    let app = simulated();

    let (status, body) = call(&app, "POST", "/api/print-customer", Some(naan_order())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("payment"));
}

#[tokio::test]
async fn test_customer_receipt_prints_supplied_total() {
    let (app, printer) = with_mock(Config::default()).await;
    let body = json!({
        "orderData": {
            "orderNumber": "A-9",
            "orderType": "delivery",
            "items": [{"name": "Naan", "quantity": 2, "price": 2.95}],
            "subtotal": 5.90,
            "vatAmount": "0.98",
            "deliveryFee": 2.5,
            "total": 12.34,
            "deliveryAddress": "1 High Street"
        },
        "paymentData": {"method": "card", "status": "paid", "cardLastFour": "4242"},
        "timestamp": "2026-03-01T19:30:00Z"
    });

    let (status, body) = call(&app, "POST", "/print/customer", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["orderNumber"], "A-9");

    let text = printer.printed_text();
    let total_line = text.lines().find(|l| l.starts_with("TOTAL")).unwrap();
    assert!(total_line.ends_with("12.34"));
    assert!(text.contains("**** 4242"));
    assert!(text.contains("Order Type: DELIVERY"));
    assert!(text.contains("01/03/2026 19:30:00"));
}

#[tokio::test]
async fn test_invalid_json_is_rejected() {
    let app = simulated();
    let request = Request::builder()
        .method("POST")
        .uri("/print/kitchen")
        .header("content-type", "application/json")
        .body(Body::from("{\"order\": "))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_timestamp_is_rejected() {
    let app = simulated();
    let mut body = naan_order();
    body["timestamp"] = json!("teatime");

    let (status, _) = call(&app, "POST", "/print/kitchen", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_demo_mode_substitutes_sample() {
    let config = Config {
        demo_mode: true,
        ..Config::default()
    };
    let (app, printer) = with_mock(config).await;

    let (status, body) = call(&app, "POST", "/print/customer", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["orderNumber"], "DEMO-001");
    assert!(printer.printed_text().contains("Chicken Tikka Masala"));

    // A supplied but invalid request is still validated
    let (status, _) = call(&app, "POST", "/print/kitchen", Some(json!({"order": {"items": []}}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_without_demo_mode_no_substitution() {
    let (status, _) = call(&simulated(), "POST", "/print/customer", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_print_without_printer_succeeds() {
    let app = simulated();

    let (status, body) = call(&app, "POST", "/print/kitchen", Some(naan_order())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (_, health) = call(&app, "GET", "/health", None).await;
    assert_eq!(health["printer_connected"], false);
}

#[tokio::test]
async fn test_device_failure_flips_status() {
    let (app, printer) = with_mock(Config::default()).await;

    let (_, status) = call(&app, "GET", "/status", None).await;
    assert_eq!(status["connected"], true);

    printer.failing.store(true, Ordering::SeqCst);
    let (code, body) = call(&app, "POST", "/print/kitchen", Some(naan_order())).await;
    assert_eq!(code, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (_, status) = call(&app, "GET", "/status", None).await;
    assert_eq!(status["connected"], false);
    assert_eq!(status["status"], "disconnected");
    assert!(status["last_error"].as_str().unwrap().contains("paper jam"));

    printer.failing.store(false, Ordering::SeqCst);
    call(&app, "POST", "/print/kitchen", Some(naan_order())).await;

    let (_, status) = call(&app, "GET", "/api/printer-status", None).await;
    assert_eq!(status["connected"], true);
    assert!(status.get("last_error").is_none());
}

#[tokio::test]
async fn test_network_printer_receives_job() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let received = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        socket.read_to_end(&mut buf).await.unwrap();
        buf
    });

    let device: Arc<dyn Printer> = Arc::new(NetworkPrinter::from_addr(&addr.to_string()).unwrap());
    let config = Config {
        restaurant_name: "Spice Garden".to_string(),
        ..Config::default()
    };
    let app = app(ServerState::new(config, Some(device)));

    let (status, _) = call(&app, "POST", "/print/kitchen", Some(naan_order())).await;
    assert_eq!(status, StatusCode::OK);

    let bytes = received.await.unwrap();
    let text = String::from_utf8_lossy(&bytes);
    assert!(bytes.starts_with(&[0x1B, 0x40]));
    assert!(text.contains("Spice Garden"));
    assert!(text.contains("2x Naan"));
}
