//! API error types with HTTP response mapping.
//!
//! Every failure is rendered as `{"ok": false, "reason": "<code>"}`. Raw
//! error details are logged, never returned.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cart::CartError;
use catalog::CatalogError;
use inventory::InventoryError;
use serde::Serialize;
use wallet::WalletError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Cart aggregation failure.
    Cart(CartError),
    /// Wallet update failure.
    Wallet(WalletError),
    /// Stock movement failure.
    Inventory(InventoryError),
    /// Catalog read failure.
    Catalog(CatalogError),
    /// The pricing service has no price for the SKU.
    NoPrice,
    /// The request body or query string could not be read.
    BadRequest(String),
}

/// Body of every failed response.
#[derive(Debug, Serialize)]
pub struct Failure {
    pub ok: bool,
    pub reason: &'static str,
}

impl Failure {
    pub fn new(reason: &'static str) -> Self {
        Self { ok: false, reason }
    }
}

/// Renders a `{ok:false, reason}` body with the given status.
pub fn failure(status: StatusCode, reason: &'static str) -> Response {
    (status, Json(Failure::new(reason))).into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, reason) = match self {
            ApiError::Cart(err) => cart_error_to_response(err),
            ApiError::Wallet(err) => wallet_error_to_response(err),
            ApiError::Inventory(err) => inventory_error_to_response(err),
            ApiError::Catalog(err) => {
                tracing::error!(error = %err, "catalog read failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
            ApiError::NoPrice => (StatusCode::NOT_FOUND, "no_price"),
            ApiError::BadRequest(msg) => {
                tracing::debug!(error = %msg, "rejected malformed request");
                (StatusCode::BAD_REQUEST, "invalid_request")
            }
        };

        metrics::counter!("http_failures_total", "reason" => reason).increment(1);
        failure(status, reason)
    }
}

fn cart_error_to_response(err: CartError) -> (StatusCode, &'static str) {
    match &err {
        CartError::InvalidQuantity { .. } | CartError::TotalOutOfRange { .. } => {
            (StatusCode::BAD_REQUEST, "invalid_qty")
        }
        CartError::InvalidSku => (StatusCode::BAD_REQUEST, "invalid_sku"),
        CartError::NoPrice { .. } => (StatusCode::BAD_REQUEST, "no_price"),
        CartError::EmptyCart { .. } => (StatusCode::NOT_FOUND, "empty"),
        CartError::UpstreamTimeout { .. } => {
            tracing::warn!(error = %err, "downstream call timed out");
            (StatusCode::GATEWAY_TIMEOUT, "upstream_timeout")
        }
        CartError::Upstream { .. } => {
            tracing::error!(error = %err, "downstream call failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
        }
    }
}

fn wallet_error_to_response(err: WalletError) -> (StatusCode, &'static str) {
    match err {
        WalletError::MissingCode => (StatusCode::BAD_REQUEST, "missing_code"),
        WalletError::AlreadyExists { .. } => (StatusCode::OK, "already_exists"),
    }
}

fn inventory_error_to_response(err: InventoryError) -> (StatusCode, &'static str) {
    match &err {
        InventoryError::InvalidQuantity { .. } => (StatusCode::BAD_REQUEST, "invalid_qty"),
        InventoryError::NoStock { .. } => (StatusCode::CONFLICT, "no_stock"),
        InventoryError::NoReserved { .. } => (StatusCode::CONFLICT, "no_reserved"),
        InventoryError::Database(_) | InventoryError::Migration(_) => {
            tracing::error!(error = %err, "inventory storage failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
        }
    }
}

impl From<CartError> for ApiError {
    fn from(err: CartError) -> Self {
        ApiError::Cart(err)
    }
}

impl From<WalletError> for ApiError {
    fn from(err: WalletError) -> Self {
        ApiError::Wallet(err)
    }
}

impl From<InventoryError> for ApiError {
    fn from(err: InventoryError) -> Self {
        ApiError::Inventory(err)
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        ApiError::Catalog(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use common::{Owner, Sku};

    use super::*;

    async fn render(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_cart_errors() {
        let cases = [
            (
                CartError::InvalidQuantity { quantity: 0 },
                StatusCode::BAD_REQUEST,
                "invalid_qty",
            ),
            (
                CartError::TotalOutOfRange {
                    sku: Sku::new("BIG"),
                },
                StatusCode::BAD_REQUEST,
                "invalid_qty",
            ),
            (CartError::InvalidSku, StatusCode::BAD_REQUEST, "invalid_sku"),
            (
                CartError::NoPrice {
                    sku: Sku::new("SKU-404"),
                    reason: "not found".to_string(),
                },
                StatusCode::BAD_REQUEST,
                "no_price",
            ),
            (
                CartError::EmptyCart {
                    owner: Owner::guest(),
                },
                StatusCode::NOT_FOUND,
                "empty",
            ),
            (
                CartError::UpstreamTimeout {
                    call: "price lookup",
                },
                StatusCode::GATEWAY_TIMEOUT,
                "upstream_timeout",
            ),
            (
                CartError::Upstream {
                    call: "coupon validation",
                    source: cart::UpstreamError::Transport("connection refused".to_string()),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
            ),
        ];

        for (err, status, reason) in cases {
            let (got_status, body) = render(ApiError::from(err)).await;
            assert_eq!(got_status, status);
            assert_eq!(body, serde_json::json!({"ok": false, "reason": reason}));
        }
    }

    #[tokio::test]
    async fn test_internal_details_are_not_leaked() {
        let (_, body) = render(ApiError::Cart(CartError::Upstream {
            call: "coupon validation",
            source: cart::UpstreamError::InvalidResponse("secret detail".to_string()),
        }))
        .await;
        assert!(!body.to_string().contains("secret detail"));
    }

    #[tokio::test]
    async fn test_inventory_errors() {
        let (status, body) = render(ApiError::from(InventoryError::NoStock {
            store_id: "S001".to_string(),
            sku: Sku::new("SKU-001"),
        }))
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["reason"], "no_stock");

        let (status, body) = render(ApiError::from(InventoryError::NoReserved {
            store_id: "S001".to_string(),
            sku: Sku::new("SKU-001"),
        }))
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["reason"], "no_reserved");
    }

    #[tokio::test]
    async fn test_wallet_errors() {
        let (status, body) = render(ApiError::from(WalletError::MissingCode)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["reason"], "missing_code");

        let (status, body) = render(ApiError::from(WalletError::AlreadyExists {
            code: "SAVE10".to_string(),
        }))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], false);
        assert_eq!(body["reason"], "already_exists");
    }
}
