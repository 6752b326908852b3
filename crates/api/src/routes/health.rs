//! Health check endpoints, one per service.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use cart::{CouponValidator, PricingLookup};
use catalog::Catalog;
use chrono::{DateTime, Utc};
use inventory::{InventoryService, StockStore};
use pricing::PricingService;
use serde::Serialize;
use wallet::WalletService;

use super::cart::CartState;

#[derive(Debug, Serialize)]
pub struct CartHealth {
    pub ok: bool,
    pub service: &'static str,
    pub carts: usize,
    pub time: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingHealth {
    pub ok: bool,
    pub service: &'static str,
    pub prices_count: usize,
    pub coupons_count: usize,
    pub time: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct WalletHealth {
    pub ok: bool,
    pub service: &'static str,
    pub users: usize,
    pub time: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct InventoryHealth {
    pub ok: bool,
    pub service: &'static str,
    pub store: &'static str,
    pub time: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct CatalogHealth {
    pub ok: bool,
    pub service: &'static str,
    pub db: &'static str,
    pub time: DateTime<Utc>,
}

/// GET /health on the cart service.
pub async fn check_cart<P, C>(State(service): State<CartState<P, C>>) -> Json<CartHealth>
where
    P: PricingLookup + 'static,
    C: CouponValidator + 'static,
{
    Json(CartHealth {
        ok: true,
        service: "cart-service",
        carts: service.store().cart_count().await,
        time: Utc::now(),
    })
}

/// GET /health on the pricing service.
pub async fn check_pricing(State(service): State<Arc<PricingService>>) -> Json<PricingHealth> {
    Json(PricingHealth {
        ok: true,
        service: "pricing-coupons-service",
        prices_count: service.prices_count(),
        coupons_count: service.coupons_count(),
        time: Utc::now(),
    })
}

/// GET /health on the wallet service.
pub async fn check_wallet(State(service): State<Arc<WalletService>>) -> Json<WalletHealth> {
    Json(WalletHealth {
        ok: true,
        service: "wallet-service",
        users: service.user_count().await,
        time: Utc::now(),
    })
}

/// GET /health on the inventory service.
pub async fn check_inventory<S: StockStore + 'static>(
    State(service): State<Arc<InventoryService<S>>>,
) -> Json<InventoryHealth> {
    Json(InventoryHealth {
        ok: true,
        service: "inventory-service",
        store: service.backend(),
        time: Utc::now(),
    })
}

/// GET /health on the catalog service. Connection details are never echoed.
pub async fn check_catalog(State(catalog): State<Arc<Catalog>>) -> Json<CatalogHealth> {
    Json(CatalogHealth {
        ok: true,
        service: "catalog-service",
        db: catalog.status(),
        time: Utc::now(),
    })
}
