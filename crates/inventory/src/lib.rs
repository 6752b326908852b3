//! Per-store inventory.
//!
//! Stock is tracked per `(store_id, sku)` row as an `available` and a
//! `reserved` count. A reservation moves units from available to reserved;
//! a confirmation releases reserved units once the sale goes through. Both
//! are applied atomically per row by every [`StockStore`] implementation.

pub mod error;
pub mod memory;
pub mod postgres;
pub mod service;
pub mod stock;
pub mod store;

pub use error::{InventoryError, Result};
pub use memory::InMemoryStockStore;
pub use postgres::PostgresStockStore;
pub use service::InventoryService;
pub use stock::{NewStock, StockFilter, StockRow, default_seed};
pub use store::StockStore;
