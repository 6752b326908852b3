//! Pricing and coupon validation endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use common::{Money, Sku};
use pricing::{CouponDecision, PricingService};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct PriceQuery {
    pub sku: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PriceResponse {
    pub ok: bool,
    pub sku: Sku,
    pub price: Money,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRequest {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub items_total: Money,
}

#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<Money>,
    #[serde(rename = "final", skip_serializing_if = "Option::is_none")]
    pub final_total: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
}

impl From<CouponDecision> for ValidateResponse {
    fn from(decision: CouponDecision) -> Self {
        match decision {
            CouponDecision::Valid {
                discount,
                final_total,
            } => Self {
                valid: true,
                discount: Some(discount),
                final_total: Some(final_total),
                reason: None,
            },
            CouponDecision::Invalid => Self {
                valid: false,
                discount: None,
                final_total: None,
                reason: Some("invalid"),
            },
        }
    }
}

/// GET /api/pricing/price?sku=: unit price of a SKU.
pub async fn price(
    State(service): State<Arc<PricingService>>,
    query: Result<Query<PriceQuery>, QueryRejection>,
) -> Result<Json<PriceResponse>, ApiError> {
    let Query(query) = query?;
    let sku = Sku::new(query.sku.unwrap_or_default());
    let price = service.price(&sku).ok_or(ApiError::NoPrice)?;

    Ok(Json(PriceResponse {
        ok: true,
        sku,
        price,
    }))
}

/// POST /api/pricing/coupons/validate: decide whether a coupon applies to a
/// subtotal.
#[tracing::instrument(skip_all)]
pub async fn validate_coupon(
    State(service): State<Arc<PricingService>>,
    payload: Result<Json<ValidateRequest>, JsonRejection>,
) -> Result<Json<ValidateResponse>, ApiError> {
    let Json(req) = payload?;
    let decision = service.validate_coupon(&req.code, req.items_total);
    Ok(Json(ValidateResponse::from(decision)))
}
