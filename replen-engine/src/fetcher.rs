//! External inventory data seam.
//!
//! The engine never talks to a marketplace or database directly; it
//! consumes an already-materialized item list from whatever implements
//! [`InventoryFetcher`]. Missing SKUs are simply absent from the
//! result, not an error.

use async_trait::async_trait;

use crate::types::InventoryItem;

#[async_trait]
pub trait InventoryFetcher: Send + Sync {
    /// Fetch items for the given SKUs. An empty list means the whole
    /// known catalog. May return fewer items than requested.
    async fn fetch_inventory_items(&self, skus: &[String]) -> Result<Vec<InventoryItem>, String>;
}

/// In-memory fetcher over a fixed item list; the building block for
/// tests and for CSV-backed runs.
pub struct StaticFetcher {
    items: Vec<InventoryItem>,
}

impl StaticFetcher {
    pub fn new(items: Vec<InventoryItem>) -> Self {
        Self { items }
    }
}

#[async_trait]
impl InventoryFetcher for StaticFetcher {
    async fn fetch_inventory_items(&self, skus: &[String]) -> Result<Vec<InventoryItem>, String> {
        if skus.is_empty() {
            return Ok(self.items.clone());
        }
        Ok(self
            .items
            .iter()
            .filter(|i| skus.iter().any(|s| s == &i.sku))
            .cloned()
            .collect())
    }
}
