//! Catalog endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use catalog::{Catalog, Product, mock_products};

use crate::error::ApiError;

/// GET /api/catalog: products from the active source.
pub async fn list(State(catalog): State<Arc<Catalog>>) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(catalog.products().await?))
}

/// GET /catalog and GET /productos: always the built-in sample list.
pub async fn samples() -> Json<Vec<Product>> {
    Json(mock_products())
}
