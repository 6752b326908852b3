//! Stock endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use common::Sku;
use inventory::{InventoryService, StockFilter, StockRow, StockStore};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Shared inventory service, generic over its storage.
pub type InventoryState<S> = Arc<InventoryService<S>>;

#[derive(Debug, Deserialize)]
pub struct MovementRequest {
    #[serde(default)]
    pub store_id: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub qty: i64,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub ok: bool,
    pub message: &'static str,
}

impl MessageResponse {
    fn ok(message: &'static str) -> Json<Self> {
        Json(Self { ok: true, message })
    }
}

/// POST /api/inventory/seed: load the sample stock rows.
pub async fn seed<S: StockStore + 'static>(
    State(service): State<InventoryState<S>>,
) -> Result<Json<MessageResponse>, ApiError> {
    service.seed().await?;
    Ok(MessageResponse::ok("Inventory data loaded."))
}

/// GET /api/inventory/stock?store=&sku=: stock rows, optionally filtered.
pub async fn stock<S: StockStore + 'static>(
    State(service): State<InventoryState<S>>,
    query: Result<Query<StockFilter>, QueryRejection>,
) -> Result<Json<Vec<StockRow>>, ApiError> {
    let Query(filter) = query?;
    Ok(Json(service.stock(&filter).await?))
}

/// POST /api/inventory/reservations: move units from available to reserved.
#[tracing::instrument(skip_all)]
pub async fn reserve<S: StockStore + 'static>(
    State(service): State<InventoryState<S>>,
    payload: Result<Json<MovementRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let Json(req) = payload?;
    service
        .reserve(&req.store_id, &Sku::new(req.sku), req.qty)
        .await?;
    Ok((StatusCode::CREATED, MessageResponse::ok("Reservation created")))
}

/// POST /api/inventory/confirm: release reserved units after a sale.
#[tracing::instrument(skip_all)]
pub async fn confirm<S: StockStore + 'static>(
    State(service): State<InventoryState<S>>,
    payload: Result<Json<MovementRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(req) = payload?;
    service
        .confirm(&req.store_id, &Sku::new(req.sku), req.qty)
        .await?;
    Ok(MessageResponse::ok("Reservation confirmed"))
}
