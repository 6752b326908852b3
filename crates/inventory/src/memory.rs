use std::sync::Arc;

use async_trait::async_trait;
use common::Sku;
use tokio::sync::RwLock;

use crate::{InventoryError, NewStock, Result, StockFilter, StockRow, StockStore};

#[derive(Debug, Default)]
struct Rows {
    rows: Vec<StockRow>,
    next_id: i64,
}

impl Rows {
    fn find_mut(&mut self, store_id: &str, sku: &Sku) -> Option<&mut StockRow> {
        self.rows
            .iter_mut()
            .find(|r| r.store_id == store_id && &r.sku == sku)
    }
}

/// In-memory stock store for testing and local runs.
///
/// Rows live in insertion order, which is also id order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStockStore {
    inner: Arc<RwLock<Rows>>,
}

impl InMemoryStockStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of rows stored.
    pub async fn row_count(&self) -> usize {
        self.inner.read().await.rows.len()
    }
}

#[async_trait]
impl StockStore for InMemoryStockStore {
    async fn seed(&self, rows: &[NewStock]) -> Result<u64> {
        let mut inner = self.inner.write().await;
        let mut inserted = 0;

        for new in rows {
            if inner.find_mut(&new.store_id, &new.sku).is_some() {
                continue;
            }
            inner.next_id += 1;
            let id = inner.next_id;
            inner.rows.push(StockRow {
                id,
                store_id: new.store_id.clone(),
                sku: new.sku.clone(),
                available: new.available,
                reserved: 0,
            });
            inserted += 1;
        }

        Ok(inserted)
    }

    async fn list(&self, filter: &StockFilter) -> Result<Vec<StockRow>> {
        let inner = self.inner.read().await;
        Ok(inner
            .rows
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect())
    }

    async fn reserve(&self, store_id: &str, sku: &Sku, qty: i64) -> Result<StockRow> {
        let mut inner = self.inner.write().await;
        match inner.find_mut(store_id, sku) {
            Some(row) if row.available >= qty => {
                row.available -= qty;
                row.reserved += qty;
                Ok(row.clone())
            }
            _ => Err(InventoryError::NoStock {
                store_id: store_id.to_string(),
                sku: sku.clone(),
            }),
        }
    }

    async fn confirm(&self, store_id: &str, sku: &Sku, qty: i64) -> Result<StockRow> {
        let mut inner = self.inner.write().await;
        match inner.find_mut(store_id, sku) {
            Some(row) if row.reserved >= qty => {
                row.reserved -= qty;
                Ok(row.clone())
            }
            _ => Err(InventoryError::NoReserved {
                store_id: store_id.to_string(),
                sku: sku.clone(),
            }),
        }
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::default_seed;

    fn sku(s: &str) -> Sku {
        Sku::new(s)
    }

    #[tokio::test]
    async fn test_seed_ignores_duplicates() {
        let store = InMemoryStockStore::new();

        assert_eq!(store.seed(&default_seed()).await.unwrap(), 2);
        assert_eq!(store.seed(&default_seed()).await.unwrap(), 0);
        assert_eq!(store.row_count().await, 2);
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_id() {
        let store = InMemoryStockStore::new();
        store.seed(&default_seed()).await.unwrap();
        store
            .seed(&[NewStock::new("S002", "SKU-001", 3)])
            .await
            .unwrap();

        let rows = store.list(&StockFilter::new()).await.unwrap();
        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let rows = store
            .list(&StockFilter::new().sku("SKU-001"))
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[tokio::test]
    async fn test_reserve_then_confirm() {
        let store = InMemoryStockStore::new();
        store.seed(&default_seed()).await.unwrap();

        let row = store.reserve("S001", &sku("SKU-001"), 3).await.unwrap();
        assert_eq!((row.available, row.reserved), (7, 3));

        let row = store.confirm("S001", &sku("SKU-001"), 2).await.unwrap();
        assert_eq!((row.available, row.reserved), (7, 1));
    }

    #[tokio::test]
    async fn test_reserve_more_than_available() {
        let store = InMemoryStockStore::new();
        store.seed(&default_seed()).await.unwrap();

        let result = store.reserve("S001", &sku("SKU-002"), 6).await;
        assert!(matches!(result, Err(InventoryError::NoStock { .. })));

        let rows = store.list(&StockFilter::new().sku("SKU-002")).await.unwrap();
        assert_eq!((rows[0].available, rows[0].reserved), (5, 0));
    }

    #[tokio::test]
    async fn test_missing_rows() {
        let store = InMemoryStockStore::new();

        assert!(matches!(
            store.reserve("S404", &sku("SKU-001"), 1).await,
            Err(InventoryError::NoStock { .. })
        ));
        assert!(matches!(
            store.confirm("S404", &sku("SKU-001"), 1).await,
            Err(InventoryError::NoReserved { .. })
        ));
    }

    #[tokio::test]
    async fn test_confirm_more_than_reserved() {
        let store = InMemoryStockStore::new();
        store.seed(&default_seed()).await.unwrap();
        store.reserve("S001", &sku("SKU-001"), 1).await.unwrap();

        let result = store.confirm("S001", &sku("SKU-001"), 2).await;
        assert!(matches!(result, Err(InventoryError::NoReserved { .. })));
    }
}
