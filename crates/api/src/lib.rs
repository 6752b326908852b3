//! HTTP server for the storefront services.
//!
//! One binary hosts any one of the cart, pricing, wallet, inventory and
//! catalog services, chosen by configuration. Every service gets structured
//! request logging (tracing), CORS for any origin, `/health` and Prometheus
//! `/metrics`.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use cart::{CartService, CouponValidator, HttpPricingClient, InMemoryCartStore, PricingLookup};
use catalog::Catalog;
use inventory::{InventoryError, InventoryService, PostgresStockStore, StockStore};
use metrics_exporter_prometheus::PrometheusHandle;
use pricing::PricingService;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use wallet::WalletService;

use config::{Config, ConfigError, ServiceKind};
use routes::cart::CartState;
use routes::inventory::InventoryState;

/// Errors that stop the server from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("inventory store unavailable: {0}")]
    Inventory(#[from] InventoryError),
}

/// Adds `/metrics`, CORS and request tracing to a service router.
fn with_common_layers(router: Router, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::render))
        .with_state(metrics_handle);

    router
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the cart service router.
pub fn create_cart_app<P, C>(service: CartState<P, C>, metrics_handle: PrometheusHandle) -> Router
where
    P: PricingLookup + 'static,
    C: CouponValidator + 'static,
{
    let router = Router::new()
        .route("/health", get(routes::health::check_cart::<P, C>))
        .route("/api/cart", get(routes::cart::get::<P, C>))
        .route("/api/cart/items", post(routes::cart::add_item::<P, C>))
        .route(
            "/api/cart/apply-coupon",
            post(routes::cart::apply_coupon::<P, C>),
        )
        .with_state(service);

    with_common_layers(router, metrics_handle)
}

/// Creates the pricing & coupons service router.
pub fn create_pricing_app(service: Arc<PricingService>, metrics_handle: PrometheusHandle) -> Router {
    let router = Router::new()
        .route("/health", get(routes::health::check_pricing))
        .route("/api/pricing/price", get(routes::pricing::price))
        .route(
            "/api/pricing/coupons/validate",
            post(routes::pricing::validate_coupon),
        )
        .with_state(service);

    with_common_layers(router, metrics_handle)
}

/// Creates the wallet service router.
pub fn create_wallet_app(service: Arc<WalletService>, metrics_handle: PrometheusHandle) -> Router {
    let router = Router::new()
        .route("/health", get(routes::health::check_wallet))
        .route("/api/wallet", get(routes::wallet::get))
        .route("/api/wallet/add", post(routes::wallet::add))
        .with_state(service);

    with_common_layers(router, metrics_handle)
}

/// Creates the inventory service router.
pub fn create_inventory_app<S: StockStore + 'static>(
    service: InventoryState<S>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let router = Router::new()
        .route("/health", get(routes::health::check_inventory::<S>))
        .route("/api/inventory/seed", post(routes::inventory::seed::<S>))
        .route("/api/inventory/stock", get(routes::inventory::stock::<S>))
        .route(
            "/api/inventory/reservations",
            post(routes::inventory::reserve::<S>),
        )
        .route("/api/inventory/confirm", post(routes::inventory::confirm::<S>))
        .with_state(service);

    with_common_layers(router, metrics_handle)
}

/// Creates the catalog service router.
pub fn create_catalog_app(catalog: Arc<Catalog>, metrics_handle: PrometheusHandle) -> Router {
    let router = Router::new()
        .route("/health", get(routes::health::check_catalog))
        .route("/api/catalog", get(routes::catalog::list))
        .route("/catalog", get(routes::catalog::samples))
        .route("/productos", get(routes::catalog::samples))
        .with_state(catalog);

    with_common_layers(router, metrics_handle)
}

/// Creates the cart service with HTTP pricing collaborators from `config`.
pub fn create_default_cart_state(
    config: &Config,
) -> CartState<HttpPricingClient, HttpPricingClient> {
    let client = HttpPricingClient::new(config.pricing_url.clone(), config.downstream_timeout);
    Arc::new(CartService::new(
        InMemoryCartStore::new(),
        client.clone(),
        client,
    ))
}

/// Builds the router for the service `config` selects, connecting to any
/// backing store it needs.
pub async fn build_app(
    config: &Config,
    metrics_handle: PrometheusHandle,
) -> Result<Router, StartupError> {
    let app = match config.service {
        ServiceKind::Cart => {
            tracing::info!(pricing_url = %config.pricing_url, "cart service using pricing service");
            create_cart_app(create_default_cart_state(config), metrics_handle)
        }
        ServiceKind::Pricing => {
            create_pricing_app(Arc::new(PricingService::seeded()), metrics_handle)
        }
        ServiceKind::Wallet => create_wallet_app(Arc::new(WalletService::seeded()), metrics_handle),
        ServiceKind::Inventory => {
            let url = config
                .database_url
                .as_deref()
                .ok_or(ConfigError::Missing("DATABASE_URL", ServiceKind::Inventory))?;
            let store = PostgresStockStore::connect(url).await?;
            create_inventory_app(Arc::new(InventoryService::new(store)), metrics_handle)
        }
        ServiceKind::Catalog => {
            let catalog = Catalog::connect(config.database_url.as_deref()).await;
            create_catalog_app(Arc::new(catalog), metrics_handle)
        }
    };

    Ok(app)
}
