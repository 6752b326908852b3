use async_trait::async_trait;
use common::Sku;

use crate::{NewStock, Result, StockFilter, StockRow};

/// Storage for stock rows.
///
/// `reserve` and `confirm` must check and update a row as one atomic step,
/// so concurrent movements against the same row never lose an update.
#[async_trait]
pub trait StockStore: Send + Sync {
    /// Inserts rows, skipping any `(store_id, sku)` that already exists.
    /// Returns the number of rows inserted.
    async fn seed(&self, rows: &[NewStock]) -> Result<u64>;

    /// Lists rows matching `filter`, ordered by id.
    async fn list(&self, filter: &StockFilter) -> Result<Vec<StockRow>>;

    /// Moves `qty` units from available to reserved.
    ///
    /// Fails with `NoStock` when the row is missing or has fewer than `qty`
    /// units available. `qty` is assumed positive.
    async fn reserve(&self, store_id: &str, sku: &Sku, qty: i64) -> Result<StockRow>;

    /// Releases `qty` reserved units.
    ///
    /// Fails with `NoReserved` when the row is missing or has fewer than
    /// `qty` units reserved. `qty` is assumed positive.
    async fn confirm(&self, store_id: &str, sku: &Sku, qty: i64) -> Result<StockRow>;

    /// Short name of the backing storage, reported by health checks.
    fn backend(&self) -> &'static str;
}
