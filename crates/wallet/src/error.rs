//! Wallet error types.

use thiserror::Error;

/// Errors that can occur when changing a wallet.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WalletError {
    /// No coupon code was supplied.
    #[error("Coupon code is required")]
    MissingCode,

    /// The user already holds this coupon.
    #[error("Coupon {code} is already in the wallet")]
    AlreadyExists { code: String },
}
