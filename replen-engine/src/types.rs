use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// A single inventory item as supplied by the external data fetcher.
///
/// The engine treats this as read-only input; every derived record is a
/// fresh value computed from it. Missing money fields (`price`, `cost`)
/// are legal and degrade to zero/omitted outputs rather than errors.
#[derive(Clone, Debug, Serialize)]
pub struct InventoryItem {
    /// Unique stock keeping unit.
    pub sku: String,
    /// Optional marketplace identifier.
    pub asin: Option<String>,
    /// On-hand units.
    pub quantity: u32,
    /// Units committed to open orders.
    pub reserved_quantity: u32,
    /// Units already on the way from a supplier.
    pub inbound_quantity: u32,
    /// Daily unit sales, most-recent-first. May be empty.
    pub daily_sales_history: Vec<f64>,
    pub price: Option<f64>,
    pub cost: Option<f64>,
    /// Days since the oldest on-hand units were received.
    pub inventory_age_days: u32,
}

impl InventoryItem {
    /// A bare item with no stock and no history; test and builder seed.
    pub fn new(sku: impl Into<String>) -> Self {
        Self {
            sku: sku.into(),
            asin: None,
            quantity: 0,
            reserved_quantity: 0,
            inbound_quantity: 0,
            daily_sales_history: Vec::new(),
            price: None,
            cost: None,
            inventory_age_days: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Velocity types
// ---------------------------------------------------------------------------

/// Direction of recent sales relative to the period before it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SalesTrend {
    Increasing,
    Stable,
    Decreasing,
}

impl fmt::Display for SalesTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SalesTrend::Increasing => write!(f, "\u{2191} Increasing"),
            SalesTrend::Stable => write!(f, "\u{2192} Stable"),
            SalesTrend::Decreasing => write!(f, "\u{2193} Decreasing"),
        }
    }
}

/// Rolling sales statistics and the forward forecast for one SKU.
///
/// Recomputed from scratch on every planning run; never persisted as
/// mutable state.
#[derive(Clone, Debug, Serialize)]
pub struct SalesVelocityMetrics {
    pub sku: String,
    pub units_sold_7_days: f64,
    pub units_sold_30_days: f64,
    pub units_sold_60_days: f64,
    pub units_sold_90_days: f64,
    pub average_daily_sales: f64,
    pub average_weekly_sales: f64,
    pub sales_trend: SalesTrend,
    /// Recent-vs-full-period demand ratio, clamped to [0.5, 2.0].
    pub seasonality_factor: f64,
    /// Last-30-vs-prior-30 demand ratio, clamped to [0.7, 1.5].
    pub growth_factor: f64,
    /// Forecasted daily sales after growth and seasonality adjustment.
    pub forecast_daily_sales: f64,
    pub forecast_30_days: u32,
    pub forecast_60_days: u32,
    pub forecast_90_days: u32,
}

// ---------------------------------------------------------------------------
// Recommendation types
// ---------------------------------------------------------------------------

/// Stockout risk bucket, ordered by severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    /// Sort rank: most severe first.
    pub fn severity(self) -> u8 {
        match self {
            RiskLevel::High => 0,
            RiskLevel::Medium => 1,
            RiskLevel::Low => 2,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::High => write!(f, "HIGH"),
            RiskLevel::Medium => write!(f, "MEDIUM"),
            RiskLevel::Low => write!(f, "LOW"),
        }
    }
}

/// A reorder recommendation for one SKU.
///
/// `reorder_quantity` is final except for the budget optimizer, which
/// may lower it (and regenerate `reason`) in its single sequential pass.
#[derive(Clone, Debug, Serialize)]
pub struct InventoryRecommendation {
    pub sku: String,
    /// On-hand units at computation time.
    pub current_level: u32,
    /// Target on-hand level covering demand through lead time plus safety stock.
    pub recommended_level: u32,
    pub reorder_quantity: u32,
    /// Forecast confidence in [0.3, 1.0].
    pub confidence: f64,
    pub days_of_coverage_current: f64,
    pub days_of_coverage_recommended: f64,
    pub risk_level: RiskLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_stockout_date: Option<DateTime<Utc>>,
    /// Units of demand over the coverage target that current stock cannot serve.
    pub estimated_lost_sales: f64,
    pub reason: String,
}

// ---------------------------------------------------------------------------
// Health types
// ---------------------------------------------------------------------------

/// Inventory health bucket. Chosen by first matching rule, so an item
/// that is both overaged and slow-moving reports only the earlier rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum HealthStatus {
    Healthy,
    Excess,
    Low,
    OutOfStock,
    Overaged,
    SlowMoving,
    /// Held in a warehouse but not sellable (no active listing).
    /// Never produced by the classifier itself; callers fed by
    /// marketplace stranded-stock reports may construct it.
    Stranded,
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthStatus::Healthy => write!(f, "Healthy"),
            HealthStatus::Excess => write!(f, "Excess"),
            HealthStatus::Low => write!(f, "Low"),
            HealthStatus::OutOfStock => write!(f, "Out of Stock"),
            HealthStatus::Overaged => write!(f, "Overaged"),
            HealthStatus::SlowMoving => write!(f, "Slow Moving"),
            HealthStatus::Stranded => write!(f, "Stranded"),
        }
    }
}

/// Health assessment for one SKU.
#[derive(Clone, Debug, Serialize)]
pub struct InventoryHealthAssessment {
    pub sku: String,
    pub health_status: HealthStatus,
    pub inventory_age_days: u32,
    pub at_risk_of_long_term_storage_fee: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excess_inventory_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excess_inventory_cost: Option<f64>,
    /// Carrying-cost estimate; 0.0 when unit cost is unknown.
    pub monthly_storage_cost: f64,
    /// Fraction of on-hand stock sold in the last 30 days.
    pub sell_through_rate: f64,
    pub recommended_actions: Vec<String>,
}
