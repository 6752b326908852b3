//! Product catalog.
//!
//! Products are read from the `productos` table when a database is
//! configured and reachable; otherwise a fixed list of sample products is
//! served so the storefront keeps working.

pub mod catalog;
pub mod error;
pub mod product;

pub use catalog::{Catalog, PostgresCatalog};
pub use error::{CatalogError, Result};
pub use product::{Product, mock_products};
