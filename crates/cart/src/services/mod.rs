//! Upstream collaborator traits with HTTP and in-memory implementations.

pub mod coupons;
pub mod http;
pub mod pricing;

use std::time::Duration;

pub use coupons::{CouponValidator, CouponVerdict, InMemoryCouponValidator};
pub use http::HttpPricingClient;
pub use pricing::{InMemoryPricing, PricingLookup};

use crate::error::UpstreamError;

/// A failure an in-memory collaborator can be told to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulatedFailure {
    Timeout,
    Transport,
}

impl SimulatedFailure {
    fn into_error(self) -> UpstreamError {
        match self {
            SimulatedFailure::Timeout => UpstreamError::Timeout(Duration::ZERO),
            SimulatedFailure::Transport => {
                UpstreamError::Transport("connection refused".to_string())
            }
        }
    }
}
