//! Cart service talking to a live pricing service over HTTP.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use api::config::Config;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use metrics_exporter_prometheus::PrometheusHandle;
use pricing::PricingService;
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            metrics_exporter_prometheus::PrometheusBuilder::new()
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

/// Serves the pricing service on an ephemeral port and returns its base URL.
async fn spawn_pricing() -> String {
    let app = api::create_pricing_app(Arc::new(PricingService::seeded()), get_metrics_handle());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn cart_app(pricing_url: String, timeout: Duration) -> Router {
    let config = Config {
        pricing_url,
        downstream_timeout: timeout,
        ..Config::default()
    };
    api::create_cart_app(api::create_default_cart_state(&config), get_metrics_handle())
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn add_items_and_apply_coupons_against_pricing_service() {
    let app = cart_app(spawn_pricing().await, Duration::from_secs(2));

    let (status, cart) = post(&app, "/api/cart/items", json!({"sku": "SKU-001", "qty": 2})).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(cart["total"].as_f64(), Some(200.0));

    let (status, cart) = post(&app, "/api/cart/apply-coupon", json!({"code": "SAVE10"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["coupon"]["code"], "SAVE10");
    assert_eq!(cart["coupon"]["discount"].as_f64(), Some(20.0));
    assert_eq!(cart["final"].as_f64(), Some(180.0));

    let (status, body) = post(&app, "/api/cart/apply-coupon", json!({"code": "SAVE20"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"ok": false, "reason": "invalid_coupon"}));

    let (status, body) = post(&app, "/api/cart/items", json!({"sku": "SKU-999", "qty": 1})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"ok": false, "reason": "no_price"}));

    let (status, cart) = post(&app, "/api/cart/items", json!({"sku": "SKU-003", "qty": 1})).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(cart["total"].as_f64(), Some(275.0));
    assert!(cart.get("final").is_none());

    let (_, cart) = post(&app, "/api/cart/apply-coupon", json!({"code": "SAVE10"})).await;
    assert_eq!(cart["final"].as_f64(), Some(247.5));
}

#[tokio::test]
async fn unreachable_pricing_service_is_no_price() {
    let app = cart_app("http://127.0.0.1:9".to_string(), Duration::from_secs(1));

    let (status, body) = post(&app, "/api/cart/items", json!({"sku": "SKU-001", "qty": 1})).await;

    assert!(
        status == StatusCode::BAD_REQUEST || status == StatusCode::GATEWAY_TIMEOUT,
        "unexpected status {status}"
    );
    assert_eq!(body["ok"], false);
}

#[tokio::test]
async fn slow_pricing_service_is_upstream_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/pricing/price"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"ok": true, "price": 100}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let app = cart_app(server.uri(), Duration::from_millis(100));
    let (status, body) = post(&app, "/api/cart/items", json!({"sku": "SKU-001", "qty": 1})).await;

    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(body, json!({"ok": false, "reason": "upstream_timeout"}));
}
