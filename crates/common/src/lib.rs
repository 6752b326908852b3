//! Value objects shared by every storefront service.

mod money;
mod types;

pub use money::Money;
pub use types::{GUEST, Owner, Sku};

/// Re-exported so downstream crates build amounts without a direct dependency.
pub use rust_decimal::Decimal;
