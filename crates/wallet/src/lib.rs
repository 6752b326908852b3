//! Coupon wallet: the coupon codes each user holds.

pub mod error;
pub mod service;

pub use error::WalletError;
pub use service::{CouponStatus, WalletCoupon, WalletService};
