//! Cart endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cart::{
    Cart, CartError, CartService, CouponOutcome, CouponValidator, InMemoryCartStore,
    PricingLookup,
};
use common::{Money, Sku};
use serde::{Deserialize, Serialize};

use super::CurrentUser;
use crate::error::{ApiError, failure};

/// Shared cart service, generic over its pricing collaborators.
pub type CartState<P, C> = Arc<CartService<InMemoryCartStore, P, C>>;

// -- Request types --

#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub qty: i64,
}

#[derive(Debug, Deserialize)]
pub struct ApplyCouponRequest {
    #[serde(default)]
    pub code: String,
}

// -- Response types --

#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub items: Vec<LineItemResponse>,
    pub total: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon: Option<CouponResponse>,
    #[serde(rename = "final", skip_serializing_if = "Option::is_none")]
    pub final_total: Option<Money>,
}

#[derive(Debug, Serialize)]
pub struct LineItemResponse {
    pub sku: Sku,
    pub qty: u32,
    pub price: Money,
}

#[derive(Debug, Serialize)]
pub struct CouponResponse {
    pub code: String,
    pub discount: Money,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart
                .items()
                .iter()
                .map(|item| LineItemResponse {
                    sku: item.sku.clone(),
                    qty: item.qty,
                    price: item.price,
                })
                .collect(),
            total: cart.total(),
            coupon: cart.coupon().map(|c| CouponResponse {
                code: c.code.clone(),
                discount: c.discount,
            }),
            final_total: cart.final_total(),
        }
    }
}

// -- Handlers --

/// POST /api/cart/items: price a SKU and add it to the caller's cart.
#[tracing::instrument(skip_all, fields(user = %user.0))]
pub async fn add_item<P, C>(
    State(service): State<CartState<P, C>>,
    user: CurrentUser,
    payload: Result<Json<AddItemRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CartResponse>), ApiError>
where
    P: PricingLookup + 'static,
    C: CouponValidator + 'static,
{
    let Json(req) = payload?;
    let cart = service.add_item(&user.0, Sku::new(req.sku), req.qty).await?;
    Ok((StatusCode::CREATED, Json(CartResponse::from(&cart))))
}

/// POST /api/cart/apply-coupon: validate a coupon against the caller's cart.
///
/// A coupon the validator turns down answers 200 with
/// `{ok:false, reason:"invalid_coupon"}` and leaves the cart unchanged.
#[tracing::instrument(skip_all, fields(user = %user.0))]
pub async fn apply_coupon<P, C>(
    State(service): State<CartState<P, C>>,
    user: CurrentUser,
    payload: Result<Json<ApplyCouponRequest>, JsonRejection>,
) -> Result<Response, ApiError>
where
    P: PricingLookup + 'static,
    C: CouponValidator + 'static,
{
    let Json(req) = payload?;
    match service.apply_coupon(&user.0, &req.code).await? {
        CouponOutcome::Applied(cart) => Ok(Json(CartResponse::from(&cart)).into_response()),
        CouponOutcome::Rejected { .. } => Ok(failure(StatusCode::OK, "invalid_coupon")),
    }
}

/// GET /api/cart: the caller's cart.
pub async fn get<P, C>(
    State(service): State<CartState<P, C>>,
    user: CurrentUser,
) -> Result<Json<CartResponse>, ApiError>
where
    P: PricingLookup + 'static,
    C: CouponValidator + 'static,
{
    let cart = service
        .get_cart(&user.0)
        .await
        .ok_or_else(|| CartError::EmptyCart {
            owner: user.0.clone(),
        })?;
    Ok(Json(CartResponse::from(&cart)))
}
