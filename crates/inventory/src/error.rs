use common::Sku;
use thiserror::Error;

/// Errors that can occur when reading or moving stock.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// Quantities must be strictly positive.
    #[error("Invalid quantity {quantity}: must be greater than zero")]
    InvalidQuantity { quantity: i64 },

    /// The row does not exist or has fewer units available than requested.
    #[error("Not enough stock of {sku} in store {store_id}")]
    NoStock { store_id: String, sku: Sku },

    /// The row does not exist or has fewer units reserved than requested.
    #[error("Not enough reserved units of {sku} in store {store_id}")]
    NoReserved { store_id: String, sku: Sku },

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Result type for inventory operations.
pub type Result<T> = std::result::Result<T, InventoryError>;
