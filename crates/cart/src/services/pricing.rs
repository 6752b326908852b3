//! Price lookup trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use common::{Money, Sku};

use super::SimulatedFailure;
use crate::error::UpstreamError;

/// Resolves a SKU to its current unit price.
#[async_trait]
pub trait PricingLookup: Send + Sync {
    /// Returns the unit price, or [`UpstreamError::NotFound`] for unknown SKUs.
    async fn price(&self, sku: &Sku) -> Result<Money, UpstreamError>;
}

#[derive(Debug, Default)]
struct InMemoryPricingState {
    prices: HashMap<Sku, Money>,
    failure: Option<SimulatedFailure>,
    lookups: usize,
}

/// In-memory price lookup for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPricing {
    state: Arc<RwLock<InMemoryPricingState>>,
}

impl InMemoryPricing {
    /// Creates a lookup that knows no prices.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a price (builder style).
    pub fn with_price(self, sku: impl Into<Sku>, price: Money) -> Self {
        self.set_price(sku, price);
        self
    }

    /// Adds or changes a price.
    pub fn set_price(&self, sku: impl Into<Sku>, price: Money) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .prices
            .insert(sku.into(), price);
    }

    /// Makes every following lookup fail, or succeed again with `None`.
    pub fn set_failure(&self, failure: Option<SimulatedFailure>) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .failure = failure;
    }

    /// Number of lookups performed so far.
    pub fn lookup_count(&self) -> usize {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .lookups
    }
}

#[async_trait]
impl PricingLookup for InMemoryPricing {
    async fn price(&self, sku: &Sku) -> Result<Money, UpstreamError> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.lookups += 1;

        if let Some(failure) = state.failure {
            return Err(failure.into_error());
        }

        state.prices.get(sku).copied().ok_or(UpstreamError::NotFound)
    }
}
