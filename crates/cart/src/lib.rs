//! Cart aggregation for the storefront.
//!
//! This crate owns the per-user shopping carts and the protocol that keeps
//! them consistent:
//! - adding an item prices it through the pricing service, merges it into
//!   the cart and recomputes the subtotal
//! - applying a coupon asks the pricing service to validate it against the
//!   current subtotal and records the discount
//! - any change to the items drops a previously applied coupon
//!
//! Requests for the same owner are serialized by a per-owner lock, so
//! concurrent adds never lose updates.

pub mod cart;
pub mod error;
pub mod locks;
pub mod service;
pub mod services;
pub mod store;

pub use cart::{AppliedCoupon, Cart, CartPricing, LineItem, Quantity};
pub use error::{CartError, Result, UpstreamError};
pub use locks::{OwnerGuard, OwnerLocks};
pub use service::{CartService, CouponOutcome};
pub use services::{
    CouponValidator, CouponVerdict, HttpPricingClient, InMemoryCouponValidator, InMemoryPricing,
    PricingLookup, SimulatedFailure,
};
pub use store::{CartStore, InMemoryCartStore};
