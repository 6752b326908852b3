//! Coupon wallet endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use common::Owner;
use serde::{Deserialize, Serialize};
use wallet::{WalletCoupon, WalletService};

use super::CurrentUser;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct AddCouponRequest {
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct WalletResponse {
    pub user: Owner,
    pub coupons: Vec<WalletCoupon>,
}

#[derive(Debug, Serialize)]
pub struct CouponAddedResponse {
    pub ok: bool,
    pub coupons: Vec<WalletCoupon>,
}

/// GET /api/wallet: the caller's coupons.
pub async fn get(
    State(service): State<Arc<WalletService>>,
    CurrentUser(user): CurrentUser,
) -> Json<WalletResponse> {
    let coupons = service.coupons(&user).await;
    Json(WalletResponse { user, coupons })
}

/// POST /api/wallet/add: put a coupon code in the caller's wallet.
#[tracing::instrument(skip_all, fields(user = %user))]
pub async fn add(
    State(service): State<Arc<WalletService>>,
    CurrentUser(user): CurrentUser,
    payload: Result<Json<AddCouponRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CouponAddedResponse>), ApiError> {
    let Json(req) = payload?;
    let code = req.code.unwrap_or_default();
    let coupons = service.add(&user, &code).await?;
    Ok((
        StatusCode::CREATED,
        Json(CouponAddedResponse { ok: true, coupons }),
    ))
}
