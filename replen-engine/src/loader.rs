//! CSV inventory data loader.
//!
//! Parses inventory CSV exports into `InventoryItem`s.
//! Expected CSV columns:
//!   sku, asin, quantity, reserved_quantity, inbound_quantity,
//!   price, cost, inventory_age_days, daily_sales_history
//!
//! `daily_sales_history` is a `|`-separated list of daily unit sales,
//! most-recent-first (e.g. `5|3|0|7`). Blank optional fields degrade
//! to `None`/empty rather than failing the row.

use std::io::Read;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer};

use crate::fetcher::{InventoryFetcher, StaticFetcher};
use crate::types::InventoryItem;

/// One CSV row. Kept separate from `InventoryItem` so the wire schema
/// can evolve without touching the engine's input type.
#[derive(Debug, Clone, Deserialize)]
pub struct InventoryCsvRow {
    pub sku: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub asin: Option<String>,
    pub quantity: u32,
    #[serde(default)]
    pub reserved_quantity: u32,
    #[serde(default)]
    pub inbound_quantity: u32,
    #[serde(default, deserialize_with = "deserialize_optional_f64")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_f64")]
    pub cost: Option<f64>,
    #[serde(default)]
    pub inventory_age_days: u32,
    #[serde(default, deserialize_with = "deserialize_sales_history")]
    pub daily_sales_history: Vec<f64>,
}

impl InventoryCsvRow {
    pub fn into_item(self) -> InventoryItem {
        InventoryItem {
            sku: self.sku,
            asin: self.asin,
            quantity: self.quantity,
            reserved_quantity: self.reserved_quantity,
            inbound_quantity: self.inbound_quantity,
            daily_sales_history: self.daily_sales_history,
            price: self.price,
            cost: self.cost,
            inventory_age_days: self.inventory_age_days,
        }
    }
}

/// Load inventory items from a CSV reader.
pub fn load_inventory<R: Read>(reader: R) -> Result<Vec<InventoryItem>, String> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut items = Vec::new();
    for (line_num, result) in csv_reader.deserialize().enumerate() {
        let row: InventoryCsvRow =
            result.map_err(|e| format!("CSV parse error at line {}: {}", line_num + 2, e))?;
        items.push(row.into_item());
    }

    Ok(items)
}

/// Load inventory items from a CSV file path.
pub fn load_inventory_file(path: &str) -> Result<Vec<InventoryItem>, String> {
    let file = std::fs::File::open(path).map_err(|e| format!("Failed to open '{}': {}", path, e))?;
    load_inventory(file)
}

/// Fetcher backed by a CSV file loaded once at construction.
pub struct CsvFetcher {
    inner: StaticFetcher,
}

impl CsvFetcher {
    pub fn from_path(path: &str) -> Result<Self, String> {
        Ok(Self {
            inner: StaticFetcher::new(load_inventory_file(path)?),
        })
    }

    pub fn from_items(items: Vec<InventoryItem>) -> Self {
        Self {
            inner: StaticFetcher::new(items),
        }
    }
}

#[async_trait]
impl InventoryFetcher for CsvFetcher {
    async fn fetch_inventory_items(&self, skus: &[String]) -> Result<Vec<InventoryItem>, String> {
        self.inner.fetch_inventory_items(skus).await
    }
}

/// Blank string -> None.
fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    if s.trim().is_empty() {
        Ok(None)
    } else {
        Ok(Some(s.trim().to_string()))
    }
}

/// Blank string -> None; anything else must parse as a number.
fn deserialize_optional_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<f64>()
        .map(Some)
        .map_err(|_| serde::de::Error::custom(format!("expected a number, got '{}'", trimmed)))
}

/// `5|3|0|7` -> `[5.0, 3.0, 0.0, 7.0]`, most-recent-first. Blank
/// segments are skipped so trailing separators from spreadsheet
/// exports don't fail the row.
fn deserialize_sales_history<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    let mut history = Vec::new();
    for segment in s.split('|') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        let value: f64 = segment.parse().map_err(|_| {
            serde::de::Error::custom(format!("invalid sales history entry '{}'", segment))
        })?;
        if value < 0.0 {
            return Err(serde::de::Error::custom(format!(
                "negative sales history entry '{}'",
                segment
            )));
        }
        history.push(value);
    }
    Ok(history)
}
