//! Coupon validation trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use common::{Decimal, Money};

use super::SimulatedFailure;
use crate::error::UpstreamError;

/// The validator's answer for a coupon code and subtotal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CouponVerdict {
    /// The coupon applies; both amounts are authoritative.
    Valid { discount: Money, final_total: Money },
    /// The coupon does not apply.
    Invalid { reason: String },
}

/// Validates a coupon code against a cart subtotal.
#[async_trait]
pub trait CouponValidator: Send + Sync {
    async fn validate(
        &self,
        code: &str,
        items_total: Money,
    ) -> Result<CouponVerdict, UpstreamError>;
}

#[derive(Debug, Default)]
struct InMemoryCouponState {
    percent_coupons: HashMap<String, Decimal>,
    fixed_verdicts: HashMap<String, CouponVerdict>,
    failure: Option<SimulatedFailure>,
    last_items_total: Option<Money>,
}

/// In-memory coupon validator for testing.
///
/// Knows percentage coupons, and can also be told to answer a code with a
/// canned verdict regardless of the subtotal.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCouponValidator {
    state: Arc<RwLock<InMemoryCouponState>>,
}

impl InMemoryCouponValidator {
    /// Creates a validator that rejects every code.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts `code` as a `percent`% discount.
    pub fn with_percent_coupon(self, code: impl Into<String>, percent: i64) -> Self {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .percent_coupons
            .insert(code.into(), Decimal::from(percent));
        self
    }

    /// Answers `code` with `verdict` from now on.
    pub fn set_verdict(&self, code: impl Into<String>, verdict: CouponVerdict) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .fixed_verdicts
            .insert(code.into(), verdict);
    }

    /// Makes every following validation fail, or succeed again with `None`.
    pub fn set_failure(&self, failure: Option<SimulatedFailure>) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .failure = failure;
    }

    /// The subtotal passed to the most recent validation.
    pub fn last_items_total(&self) -> Option<Money> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .last_items_total
    }
}

#[async_trait]
impl CouponValidator for InMemoryCouponValidator {
    async fn validate(
        &self,
        code: &str,
        items_total: Money,
    ) -> Result<CouponVerdict, UpstreamError> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.last_items_total = Some(items_total);

        if let Some(failure) = state.failure {
            return Err(failure.into_error());
        }

        if let Some(verdict) = state.fixed_verdicts.get(code) {
            return Ok(verdict.clone());
        }

        let verdict = match state.percent_coupons.get(code) {
            Some(percent) => {
                let discount = items_total.percent(*percent);
                CouponVerdict::Valid {
                    discount,
                    final_total: items_total.saturating_sub(discount),
                }
            }
            None => CouponVerdict::Invalid {
                reason: "invalid".to_string(),
            },
        };
        Ok(verdict)
    }
}
