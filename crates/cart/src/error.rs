//! Cart error types.

use std::time::Duration;

use common::{Owner, Sku};
use thiserror::Error;

/// Failure of a call to an upstream collaborator (pricing or coupons).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UpstreamError {
    /// The upstream answered, but has nothing for the request.
    #[error("not found")]
    NotFound,

    /// No answer arrived within the configured bound.
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// The request could not be sent or the connection failed.
    #[error("transport error: {0}")]
    Transport(String),

    /// The upstream answered with something we could not interpret.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Errors that can occur during cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// Quantity is zero, negative, or too large.
    #[error("Invalid quantity: {quantity} (must be greater than 0)")]
    InvalidQuantity { quantity: i64 },

    /// The line or cart total would exceed the representable amount.
    #[error("Cart total out of range after adding {sku}")]
    TotalOutOfRange { sku: Sku },

    /// SKU is missing or blank.
    #[error("SKU is required")]
    InvalidSku,

    /// The pricing service has no usable price for the SKU.
    #[error("No price for {sku}: {reason}")]
    NoPrice { sku: Sku, reason: String },

    /// A coupon was applied before anything was added to the cart.
    #[error("Cart for {owner} is empty")]
    EmptyCart { owner: Owner },

    /// An upstream call exceeded its time bound.
    #[error("Upstream {call} timed out")]
    UpstreamTimeout { call: &'static str },

    /// An upstream call failed in a way the client cannot act on.
    #[error("Upstream {call} failed: {source}")]
    Upstream {
        call: &'static str,
        #[source]
        source: UpstreamError,
    },
}

/// Convenience type alias for cart results.
pub type Result<T> = std::result::Result<T, CartError>;
