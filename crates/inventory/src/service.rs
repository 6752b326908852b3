use common::Sku;
use tracing::{info, instrument};

use crate::{InventoryError, Result, StockFilter, StockRow, StockStore, default_seed};

/// Stock operations with input validation and metrics on top of a store.
#[derive(Clone)]
pub struct InventoryService<S: StockStore> {
    store: S,
}

impl<S: StockStore> InventoryService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loads the sample rows, leaving existing rows untouched.
    #[instrument(skip(self))]
    pub async fn seed(&self) -> Result<u64> {
        let inserted = self.store.seed(&default_seed()).await?;
        info!(inserted, "inventory seeded");
        Ok(inserted)
    }

    pub async fn stock(&self, filter: &StockFilter) -> Result<Vec<StockRow>> {
        self.store.list(filter).await
    }

    /// Reserves `qty` units of `sku` in `store_id`.
    #[instrument(skip(self, sku), fields(sku = %sku))]
    pub async fn reserve(&self, store_id: &str, sku: &Sku, qty: i64) -> Result<StockRow> {
        check_quantity(qty)?;

        let result = self.store.reserve(store_id, sku, qty).await;
        let outcome = match &result {
            Ok(_) => "reserved",
            Err(InventoryError::NoStock { .. }) => "no_stock",
            Err(_) => "error",
        };
        metrics::counter!("inventory_reservations_total", "outcome" => outcome).increment(1);

        let row = result?;
        info!(available = row.available, reserved = row.reserved, "stock reserved");
        Ok(row)
    }

    /// Confirms `qty` previously reserved units of `sku` in `store_id`.
    #[instrument(skip(self, sku), fields(sku = %sku))]
    pub async fn confirm(&self, store_id: &str, sku: &Sku, qty: i64) -> Result<StockRow> {
        check_quantity(qty)?;

        let result = self.store.confirm(store_id, sku, qty).await;
        let outcome = match &result {
            Ok(_) => "confirmed",
            Err(InventoryError::NoReserved { .. }) => "no_reserved",
            Err(_) => "error",
        };
        metrics::counter!("inventory_confirmations_total", "outcome" => outcome).increment(1);

        let row = result?;
        info!(reserved = row.reserved, "reservation confirmed");
        Ok(row)
    }

    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }
}

fn check_quantity(qty: i64) -> Result<()> {
    if qty <= 0 {
        return Err(InventoryError::InvalidQuantity { quantity: qty });
    }
    Ok(())
}
