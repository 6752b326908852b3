//! Cart service: the add-item and apply-coupon protocol.

use common::{Owner, Sku};

use crate::cart::{AppliedCoupon, Cart, Quantity};
use crate::error::{CartError, UpstreamError};
use crate::locks::OwnerLocks;
use crate::services::{CouponValidator, CouponVerdict, PricingLookup};
use crate::store::CartStore;

const PRICE_LOOKUP: &str = "price lookup";
const COUPON_VALIDATION: &str = "coupon validation";

/// Result of asking for a coupon to be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CouponOutcome {
    /// The coupon was accepted; the updated cart.
    Applied(Cart),
    /// The validator turned the coupon down; the cart is unchanged.
    Rejected { reason: String },
}

/// Orchestrates cart updates against the pricing collaborators.
///
/// Each operation holds the owner's lock from load to write-back, so two
/// requests for the same owner never interleave.
pub struct CartService<S, P, C>
where
    S: CartStore,
    P: PricingLookup,
    C: CouponValidator,
{
    store: S,
    pricing: P,
    coupons: C,
    locks: OwnerLocks,
}

impl<S, P, C> CartService<S, P, C>
where
    S: CartStore,
    P: PricingLookup,
    C: CouponValidator,
{
    /// Creates a new cart service.
    pub fn new(store: S, pricing: P, coupons: C) -> Self {
        Self {
            store,
            pricing,
            coupons,
            locks: OwnerLocks::new(),
        }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Number of owners with an operation in flight.
    pub fn active_locks(&self) -> usize {
        self.locks.len()
    }

    /// Returns the owner's cart, if any item was ever added.
    pub async fn get_cart(&self, owner: &Owner) -> Option<Cart> {
        self.store.get(owner).await
    }

    /// Prices `sku` and adds `qty` units of it to the owner's cart.
    ///
    /// Input is validated before any upstream call. On failure the stored
    /// cart is left untouched; on success any previously applied coupon is
    /// gone.
    #[tracing::instrument(skip(self, owner, sku), fields(owner = %owner, sku = %sku))]
    pub async fn add_item(&self, owner: &Owner, sku: Sku, qty: i64) -> Result<Cart, CartError> {
        if sku.is_blank() {
            return Err(CartError::InvalidSku);
        }
        let qty = Quantity::new(qty)?;

        let price = match self.pricing.price(&sku).await {
            Ok(price) if price.is_positive() => price,
            Ok(price) => {
                return Err(CartError::NoPrice {
                    sku,
                    reason: format!("non-positive price {price}"),
                });
            }
            Err(UpstreamError::Timeout(_)) => {
                return Err(CartError::UpstreamTimeout { call: PRICE_LOOKUP });
            }
            Err(e) => {
                tracing::warn!(error = %e, "price lookup failed");
                return Err(CartError::NoPrice {
                    sku,
                    reason: e.to_string(),
                });
            }
        };

        let _guard = self.locks.lock(owner).await;
        let mut cart = self.store.get_or_create(owner).await;
        cart.add_item(sku, qty, price)?;
        self.store.put(owner, cart.clone()).await;

        metrics::counter!("cart_items_added_total").increment(1);
        tracing::info!(total = %cart.total(), items = cart.items().len(), "item added");

        Ok(cart)
    }

    /// Validates `code` against the owner's current subtotal and, if the
    /// validator accepts it, records the discount on the cart.
    ///
    /// A rejected coupon is a normal outcome, not an error.
    #[tracing::instrument(skip(self, owner), fields(owner = %owner))]
    pub async fn apply_coupon(
        &self,
        owner: &Owner,
        code: &str,
    ) -> Result<CouponOutcome, CartError> {
        let _guard = self.locks.lock(owner).await;

        let mut cart = self
            .store
            .get(owner)
            .await
            .ok_or_else(|| CartError::EmptyCart {
                owner: owner.clone(),
            })?;

        let verdict = self
            .coupons
            .validate(code, cart.total())
            .await
            .map_err(|e| match e {
                UpstreamError::Timeout(_) => CartError::UpstreamTimeout {
                    call: COUPON_VALIDATION,
                },
                source => CartError::Upstream {
                    call: COUPON_VALIDATION,
                    source,
                },
            })?;

        match verdict {
            CouponVerdict::Invalid { reason } => {
                metrics::counter!("cart_coupons_applied_total", "outcome" => "rejected")
                    .increment(1);
                tracing::info!(reason = %reason, "coupon rejected");
                Ok(CouponOutcome::Rejected { reason })
            }
            CouponVerdict::Valid {
                discount,
                final_total,
            } => {
                cart.apply_coupon(
                    AppliedCoupon {
                        code: code.to_string(),
                        discount,
                    },
                    final_total,
                );
                self.store.put(owner, cart.clone()).await;

                metrics::counter!("cart_coupons_applied_total", "outcome" => "applied")
                    .increment(1);
                tracing::info!(discount = %discount, final_total = %final_total, "coupon applied");
                Ok(CouponOutcome::Applied(cart))
            }
        }
    }
}
