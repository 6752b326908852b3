//! Read-only pricing service backed by in-memory books.

use std::collections::HashMap;

use common::{Money, Sku};

use crate::coupon::{Coupon, CouponDecision};

/// Price book and coupon book served by the pricing service.
///
/// Both books are fixed once the service is built, so the service can be
/// shared across handlers without locking.
#[derive(Debug, Clone, Default)]
pub struct PricingService {
    prices: HashMap<Sku, Money>,
    coupons: HashMap<String, Coupon>,
}

impl PricingService {
    /// Creates a service with empty books.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a service seeded with the storefront's demo prices and coupons.
    pub fn seeded() -> Self {
        Self::new()
            .with_price("SKU-001", Money::from_units(100))
            .with_price("SKU-002", Money::from_units(50))
            .with_price("SKU-003", Money::from_units(75))
            .with_coupon("SAVE10", Coupon::percent(10))
            .with_coupon("SAVE20", Coupon::percent(20).inactive())
    }

    /// Adds or replaces a price.
    pub fn with_price(mut self, sku: impl Into<Sku>, price: Money) -> Self {
        self.prices.insert(sku.into(), price);
        self
    }

    /// Adds or replaces a coupon.
    pub fn with_coupon(mut self, code: impl Into<String>, coupon: Coupon) -> Self {
        self.coupons.insert(code.into(), coupon);
        self
    }

    /// Looks up the unit price of a SKU.
    ///
    /// A price of zero or less counts as "no price".
    #[tracing::instrument(skip(self))]
    pub fn price(&self, sku: &Sku) -> Option<Money> {
        let price = self.prices.get(sku).copied().filter(Money::is_positive);
        let outcome = if price.is_some() { "found" } else { "missing" };
        metrics::counter!("pricing_lookups_total", "outcome" => outcome).increment(1);
        price
    }

    /// Validates `code` against `items_total`.
    ///
    /// Unknown and inactive codes are both reported as invalid.
    #[tracing::instrument(skip(self))]
    pub fn validate_coupon(&self, code: &str, items_total: Money) -> CouponDecision {
        let decision = self
            .coupons
            .get(code)
            .map_or(CouponDecision::Invalid, |coupon| coupon.evaluate(items_total));

        let outcome = if decision.is_valid() { "valid" } else { "invalid" };
        metrics::counter!("coupon_validations_total", "outcome" => outcome).increment(1);
        tracing::debug!(outcome, "coupon validated");
        decision
    }

    pub fn prices_count(&self) -> usize {
        self.prices.len()
    }

    pub fn coupons_count(&self) -> usize {
        self.coupons.len()
    }
}
