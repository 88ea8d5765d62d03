//! Inventory health classification.
//!
//! Status is decided by the first matching rule in a fixed order, so
//! ties resolve by precedence rather than by independent checks. The
//! recommended actions per status are a static lookup table: an
//! auditable policy, not generated text.

use std::collections::HashMap;

use crate::types::{HealthStatus, InventoryHealthAssessment, InventoryItem, SalesVelocityMetrics};

/// Below this many days of coverage an in-stock item is "low".
pub const LOW_COVERAGE_DAYS: f64 = 15.0;
/// Above this many days of coverage an item is "excess".
pub const EXCESS_COVERAGE_DAYS: f64 = 120.0;
/// Inventory older than a year is overaged.
pub const OVERAGED_DAYS: u32 = 365;
/// Age past which long-term storage fees start to threaten.
pub const STORAGE_FEE_RISK_DAYS: u32 = 270;
/// Stock beyond 90 days of demand counts as excess units.
pub const EXCESS_TARGET_DAYS: f64 = 90.0;
/// Monthly carrying cost as a fraction of inventory value (2%/month).
pub const CARRYING_COST_MONTHLY: f64 = 0.02;

/// Assess a batch of items against their velocity metrics.
///
/// Metrics are matched by SKU; an item with no matching metrics is
/// assessed as if it had an empty sales history (a degradation, not an
/// error).
pub fn assess_health(
    items: &[InventoryItem],
    metrics: &[SalesVelocityMetrics],
) -> Vec<InventoryHealthAssessment> {
    let by_sku: HashMap<&str, &SalesVelocityMetrics> =
        metrics.iter().map(|m| (m.sku.as_str(), m)).collect();

    items
        .iter()
        .map(|item| {
            let (average_daily_sales, units_sold_30_days) = by_sku
                .get(item.sku.as_str())
                .map(|m| (m.average_daily_sales, m.units_sold_30_days))
                .unwrap_or((0.0, 0.0));
            assess_item(item, average_daily_sales, units_sold_30_days)
        })
        .collect()
}

/// Assess one item. Pure; no shared state.
pub fn assess_item(
    item: &InventoryItem,
    average_daily_sales: f64,
    units_sold_30_days: f64,
) -> InventoryHealthAssessment {
    let quantity = item.quantity as f64;
    let health_status = classify_status(item, average_daily_sales);

    let sell_through_rate = if item.quantity > 0 {
        units_sold_30_days / quantity
    } else {
        0.0
    };

    // Units above 90 days of forward demand.
    let target_units = (average_daily_sales * EXCESS_TARGET_DAYS).ceil();
    let excess_units = (quantity - target_units).max(0.0);

    let (excess_inventory_percent, excess_inventory_cost) = if excess_units > 0.0 {
        let percent = excess_units / quantity * 100.0;
        let cost = item.cost.map(|c| excess_units * c);
        (Some(percent), cost)
    } else {
        (None, None)
    };

    let monthly_storage_cost = item
        .cost
        .map(|c| quantity * c * CARRYING_COST_MONTHLY)
        .unwrap_or(0.0);

    InventoryHealthAssessment {
        sku: item.sku.clone(),
        health_status,
        inventory_age_days: item.inventory_age_days,
        at_risk_of_long_term_storage_fee: item.inventory_age_days > STORAGE_FEE_RISK_DAYS,
        excess_inventory_percent,
        excess_inventory_cost,
        monthly_storage_cost,
        sell_through_rate,
        recommended_actions: recommended_actions(health_status),
    }
}

/// First matching rule wins.
fn classify_status(item: &InventoryItem, average_daily_sales: f64) -> HealthStatus {
    let quantity = item.quantity as f64;

    if item.quantity == 0 {
        HealthStatus::OutOfStock
    } else if average_daily_sales == 0.0 {
        HealthStatus::SlowMoving
    } else if item.inventory_age_days > OVERAGED_DAYS {
        HealthStatus::Overaged
    } else if average_daily_sales * LOW_COVERAGE_DAYS > quantity {
        HealthStatus::Low
    } else if average_daily_sales * EXCESS_COVERAGE_DAYS < quantity {
        HealthStatus::Excess
    } else {
        HealthStatus::Healthy
    }
}

/// Static action table, 1-2 canned strings per status.
pub fn recommended_actions(status: HealthStatus) -> Vec<String> {
    let actions: &[&str] = match status {
        HealthStatus::Healthy => &["Maintain current replenishment cadence"],
        HealthStatus::Excess => &[
            "Pause reordering until stock burns down",
            "Consider a markdown or promotion to accelerate sell-through",
        ],
        HealthStatus::Low => &[
            "Expedite the next reorder",
            "Review lead time with the supplier",
        ],
        HealthStatus::OutOfStock => &[
            "Reorder immediately",
            "Check for an inbound shipment already in transit",
        ],
        HealthStatus::Overaged => &[
            "Liquidate or remove aged units before long-term storage fees accrue",
        ],
        HealthStatus::SlowMoving => &[
            "Evaluate listing quality and pricing",
            "Consider discontinuing the SKU",
        ],
        HealthStatus::Stranded => &[
            "Restore the listing or create a removal order",
        ],
    };
    actions.iter().map(|s| s.to_string()).collect()
}
