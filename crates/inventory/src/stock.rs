use common::Sku;
use serde::{Deserialize, Serialize};

/// One stock row: how many units of a SKU a store has.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRow {
    pub id: i64,
    pub store_id: String,
    pub sku: Sku,
    pub available: i64,
    pub reserved: i64,
}

/// A row to insert when seeding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStock {
    pub store_id: String,
    pub sku: Sku,
    pub available: i64,
}

impl NewStock {
    pub fn new(store_id: impl Into<String>, sku: impl Into<Sku>, available: i64) -> Self {
        Self {
            store_id: store_id.into(),
            sku: sku.into(),
            available,
        }
    }
}

/// The sample stock loaded by the seed endpoint.
pub fn default_seed() -> Vec<NewStock> {
    vec![
        NewStock::new("S001", "SKU-001", 10),
        NewStock::new("S001", "SKU-002", 5),
    ]
}

/// Optional filters for listing stock. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StockFilter {
    #[serde(default)]
    pub store: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
}

impl StockFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(mut self, store: impl Into<String>) -> Self {
        self.store = Some(store.into());
        self
    }

    pub fn sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    /// Blank values are treated as unset.
    pub(crate) fn store_value(&self) -> Option<&str> {
        self.store.as_deref().filter(|s| !s.is_empty())
    }

    pub(crate) fn sku_value(&self) -> Option<&str> {
        self.sku.as_deref().filter(|s| !s.is_empty())
    }

    pub fn matches(&self, row: &StockRow) -> bool {
        self.store_value().is_none_or(|s| row.store_id == s)
            && self.sku_value().is_none_or(|s| row.sku.as_str() == s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(store: &str, sku: &str) -> StockRow {
        StockRow {
            id: 1,
            store_id: store.to_string(),
            sku: Sku::new(sku),
            available: 1,
            reserved: 0,
        }
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        assert!(StockFilter::new().matches(&row("S001", "SKU-001")));
    }

    #[test]
    fn test_filter_by_store_and_sku() {
        let filter = StockFilter::new().store("S001").sku("SKU-002");
        assert!(filter.matches(&row("S001", "SKU-002")));
        assert!(!filter.matches(&row("S001", "SKU-001")));
        assert!(!filter.matches(&row("S002", "SKU-002")));
    }

    #[test]
    fn test_blank_filter_values_are_ignored() {
        let filter = StockFilter::new().store("").sku("");
        assert!(filter.matches(&row("S009", "SKU-009")));
    }

    #[test]
    fn test_row_serialization() {
        let json = serde_json::to_value(row("S001", "SKU-001")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 1,
                "store_id": "S001",
                "sku": "SKU-001",
                "available": 1,
                "reserved": 0
            })
        );
    }
}
