//! Pricing and coupon rules.
//!
//! Resolves a SKU to its unit price and decides whether a coupon code
//! applies to a subtotal, and for how much.

pub mod coupon;
pub mod service;

pub use coupon::{Coupon, CouponDecision, CouponKind};
pub use service::PricingService;
