//! Per-SKU reorder recommendations.
//!
//! Each item is evaluated independently from its velocity metrics,
//! current stock position (on-hand, reserved, inbound) and the run's
//! planning parameters. The per-item pass is pure and order-independent,
//! so the batch maps in parallel across SKUs; only the budget optimizer
//! downstream is sequential.

use chrono::{DateTime, Duration, Utc};
use rayon::prelude::*;

use crate::confidence::confidence_score;
use crate::params::PlanningParameters;
use crate::types::{InventoryItem, InventoryRecommendation, RiskLevel};
use crate::velocity::{self, DEFAULT_DAY_RANGE};

/// Coverage sentinel for stock with no measurable sales: a one-year
/// horizon, treated as effectively infinite.
pub const ONE_YEAR_COVERAGE_DAYS: f64 = 365.0;

/// Current stock above `recommended_level * 1.5` reads as excess.
pub const EXCESS_LEVEL_RATIO: f64 = 1.5;

/// Produce one recommendation per item. Output order follows input order.
pub fn recommend(
    items: &[InventoryItem],
    params: &PlanningParameters,
) -> Vec<InventoryRecommendation> {
    let now = Utc::now();
    items
        .par_iter()
        .map(|item| recommend_item(item, params, now))
        .collect()
}

/// Evaluate a single item at a fixed `now` (injectable for tests).
pub fn recommend_item(
    item: &InventoryItem,
    params: &PlanningParameters,
    now: DateTime<Utc>,
) -> InventoryRecommendation {
    let metrics = velocity::analyze(item, DEFAULT_DAY_RANGE);

    // The caller-supplied factors take precedence over the per-item
    // computed ones: a planner applying a blanket promotion adjustment
    // overrides whatever the history suggests.
    let adjusted_daily_sales =
        metrics.average_daily_sales * params.sales_growth_factor * params.seasonality_factor;

    let quantity = item.quantity;
    let days_of_coverage_current = coverage_days(quantity, adjusted_daily_sales);

    let planning_horizon_days =
        params.target_days_of_coverage + params.lead_time_days + params.safety_stock_days;
    let recommended_level = (adjusted_daily_sales * planning_horizon_days as f64).ceil() as u32;

    let available_inventory = quantity
        .saturating_sub(item.reserved_quantity)
        .saturating_sub(item.inbound_quantity);

    let mut reorder_quantity = recommended_level.saturating_sub(available_inventory);
    if reorder_quantity > 0 {
        reorder_quantity = reorder_quantity.max(params.minimum_reorder_quantity);
    }
    reorder_quantity = reorder_quantity.min(params.maximum_reorder_quantity);

    let days_of_coverage_recommended = if adjusted_daily_sales > 0.0 {
        recommended_level as f64 / adjusted_daily_sales
    } else {
        ONE_YEAR_COVERAGE_DAYS
    };

    let risk_level = classify_risk(days_of_coverage_current, params);

    // Coverage can exceed chrono's representable day range for huge
    // stock against near-zero demand; the date degrades to None rather
    // than failing the item.
    let estimated_stockout_date = if adjusted_daily_sales > 0.0 && quantity > 0 {
        Duration::try_days(days_of_coverage_current.round() as i64).map(|d| now + d)
    } else {
        None
    };

    let estimated_lost_sales = if adjusted_daily_sales > 0.0 {
        (adjusted_daily_sales * params.target_days_of_coverage as f64 - quantity as f64).max(0.0)
    } else {
        0.0
    };

    let reason = recommendation_reason(
        reorder_quantity,
        risk_level,
        quantity,
        recommended_level,
        days_of_coverage_current,
    );

    InventoryRecommendation {
        sku: item.sku.clone(),
        current_level: quantity,
        recommended_level,
        reorder_quantity,
        confidence: confidence_score(&item.daily_sales_history),
        days_of_coverage_current,
        days_of_coverage_recommended,
        risk_level,
        estimated_stockout_date,
        estimated_lost_sales,
        reason,
    }
}

/// Days the given stock lasts at the adjusted sales rate.
///
/// With no measurable sales, stock on hand is a one-year horizon and an
/// empty shelf is zero.
fn coverage_days(quantity: u32, adjusted_daily_sales: f64) -> f64 {
    if adjusted_daily_sales > 0.0 {
        quantity as f64 / adjusted_daily_sales
    } else if quantity > 0 {
        ONE_YEAR_COVERAGE_DAYS
    } else {
        0.0
    }
}

/// Ordered thresholds on current days of coverage.
fn classify_risk(days_of_coverage: f64, params: &PlanningParameters) -> RiskLevel {
    if days_of_coverage <= params.lead_time_days as f64 {
        RiskLevel::High
    } else if days_of_coverage <= (params.lead_time_days + params.safety_stock_days) as f64 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Fixed-precedence human-readable reason.
fn recommendation_reason(
    reorder_quantity: u32,
    risk_level: RiskLevel,
    quantity: u32,
    recommended_level: u32,
    days_of_coverage: f64,
) -> String {
    if reorder_quantity > 0 {
        match risk_level {
            RiskLevel::High => format!(
                "Reorder {} units now: imminent stockout, {:.0} days of coverage left",
                reorder_quantity, days_of_coverage
            ),
            RiskLevel::Medium => format!(
                "Reorder {} units: below safety stock at {:.0} days of coverage",
                reorder_quantity, days_of_coverage
            ),
            RiskLevel::Low => format!(
                "Reorder {} units to maintain optimal stock level",
                reorder_quantity
            ),
        }
    } else if quantity as f64 > recommended_level as f64 * EXCESS_LEVEL_RATIO {
        format!(
            "Excess inventory: {} on hand against a recommended level of {}",
            quantity, recommended_level
        )
    } else {
        "Inventory within optimal range".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confidence::MIN_CONFIDENCE;

    fn steady_seller() -> InventoryItem {
        // 90 days of constant sales at 10/day, 100 on hand.
        InventoryItem {
            quantity: 100,
            daily_sales_history: vec![10.0; 90],
            cost: Some(4.0),
            price: Some(9.99),
            ..InventoryItem::new("SKU-STEADY")
        }
    }

    #[test]
    fn steady_seller_gets_expected_reorder_numbers() {
        let params = PlanningParameters::default();
        let rec = recommend_item(&steady_seller(), &params, Utc::now());

        // ceil(10 * (60 + 30 + 14)) = 1040
        assert_eq!(rec.recommended_level, 1040);
        assert_eq!(rec.reorder_quantity, 940);
        // 100 / 10 = 10 days of coverage, inside the 30-day lead time.
        assert!((rec.days_of_coverage_current - 10.0).abs() < 0.01);
        assert_eq!(rec.risk_level, RiskLevel::High);
        assert!(rec.estimated_stockout_date.is_some());
        // 10 * 60 - 100 = 500 units of unservable demand.
        assert!((rec.estimated_lost_sales - 500.0).abs() < 0.01);
        assert!(rec.reason.contains("stockout"));
    }

    #[test]
    fn empty_item_has_zero_coverage_and_floor_confidence() {
        let params = PlanningParameters::default();
        let rec = recommend_item(&InventoryItem::new("SKU-EMPTY"), &params, Utc::now());

        assert_eq!(rec.days_of_coverage_current, 0.0);
        assert!((rec.confidence - MIN_CONFIDENCE).abs() < f64::EPSILON);
        assert_eq!(rec.reorder_quantity, 0);
        assert!(rec.estimated_stockout_date.is_none());
        assert_eq!(rec.estimated_lost_sales, 0.0);
        assert_eq!(rec.reason, "Inventory within optimal range");
    }

    #[test]
    fn stock_without_sales_is_one_year_coverage() {
        let item = InventoryItem {
            quantity: 40,
            ..InventoryItem::new("SKU-NOSALES")
        };
        let rec = recommend_item(&item, &PlanningParameters::default(), Utc::now());
        assert!((rec.days_of_coverage_current - ONE_YEAR_COVERAGE_DAYS).abs() < f64::EPSILON);
        assert_eq!(rec.risk_level, RiskLevel::Low);
        assert!(rec.estimated_stockout_date.is_none());
    }

    #[test]
    fn reserved_and_inbound_units_reduce_available_inventory() {
        let mut item = steady_seller();
        item.reserved_quantity = 30;
        item.inbound_quantity = 50;
        let rec = recommend_item(&item, &PlanningParameters::default(), Utc::now());
        // available = 100 - 30 - 50 = 20; reorder = 1040 - 20.
        assert_eq!(rec.reorder_quantity, 1020);
    }

    #[test]
    fn reorder_respects_maximum_cap() {
        let params = PlanningParameters {
            maximum_reorder_quantity: 500,
            ..PlanningParameters::default()
        };
        let rec = recommend_item(&steady_seller(), &params, Utc::now());
        assert_eq!(rec.reorder_quantity, 500);
    }

    #[test]
    fn small_positive_reorder_floors_at_minimum() {
        let item = InventoryItem {
            quantity: 1038,
            daily_sales_history: vec![10.0; 90],
            ..InventoryItem::new("SKU-NEARFULL")
        };
        let params = PlanningParameters {
            minimum_reorder_quantity: 25,
            ..PlanningParameters::default()
        };
        let rec = recommend_item(&item, &params, Utc::now());
        // Raw gap is 2 units; floored at the 25-unit minimum.
        assert_eq!(rec.reorder_quantity, 25);
    }

    #[test]
    fn caller_factors_scale_the_forecast() {
        let params = PlanningParameters {
            sales_growth_factor: 1.2,
            seasonality_factor: 1.5,
            ..PlanningParameters::default()
        };
        let rec = recommend_item(&steady_seller(), &params, Utc::now());
        // adjusted = 10 * 1.2 * 1.5 = 18; ceil(18 * 104) = 1872.
        assert_eq!(rec.recommended_level, 1872);
        assert!((rec.days_of_coverage_current - 100.0 / 18.0).abs() < 0.01);
    }

    #[test]
    fn risk_thresholds_are_ordered() {
        let params = PlanningParameters::default();
        // 10 days coverage: high. 300 on hand at 10/day: 30 days, still high
        // (<= lead time). 400 units: 40 days, medium. 600 units: 60, low.
        for (quantity, expected) in [
            (100u32, RiskLevel::High),
            (300, RiskLevel::High),
            (400, RiskLevel::Medium),
            (600, RiskLevel::Low),
        ] {
            let item = InventoryItem {
                quantity,
                daily_sales_history: vec![10.0; 90],
                ..InventoryItem::new("SKU-RISK")
            };
            let rec = recommend_item(&item, &params, Utc::now());
            assert_eq!(rec.risk_level, expected, "quantity {}", quantity);
        }
    }

    #[test]
    fn risk_never_less_severe_for_lower_coverage() {
        let params = PlanningParameters::default();
        let mut last_severity = 0u8;
        for quantity in (0..=800u32).step_by(50) {
            let item = InventoryItem {
                quantity,
                daily_sales_history: vec![10.0; 90],
                ..InventoryItem::new("SKU-MONO")
            };
            let rec = recommend_item(&item, &params, Utc::now());
            assert!(
                rec.risk_level.severity() >= last_severity,
                "risk got more severe as coverage grew at quantity {}",
                quantity
            );
            last_severity = rec.risk_level.severity();
        }
    }

    #[test]
    fn excess_stock_reads_as_excess_in_reason() {
        let item = InventoryItem {
            quantity: 2000,
            daily_sales_history: vec![10.0; 90],
            inbound_quantity: 0,
            ..InventoryItem::new("SKU-EXCESS")
        };
        let params = PlanningParameters::default();
        let rec = recommend_item(&item, &params, Utc::now());
        // 2000 on hand > 1040 recommended, no reorder; 2000 > 1040 * 1.5.
        assert_eq!(rec.reorder_quantity, 0);
        assert!(rec.reason.starts_with("Excess inventory"));
    }

    #[test]
    fn batch_recommend_is_order_preserving_and_complete() {
        let items = vec![
            steady_seller(),
            InventoryItem::new("SKU-EMPTY"),
            InventoryItem {
                quantity: 10,
                daily_sales_history: vec![1.0; 90],
                ..InventoryItem::new("SKU-SLOW")
            },
        ];
        let recs = recommend(&items, &PlanningParameters::default());
        assert_eq!(recs.len(), 3);
        assert_eq!(recs[0].sku, "SKU-STEADY");
        assert_eq!(recs[1].sku, "SKU-EMPTY");
        assert_eq!(recs[2].sku, "SKU-SLOW");
    }

    #[test]
    fn astronomical_coverage_degrades_stockout_date_to_none() {
        // Huge stock against near-zero demand: coverage lands far past
        // the representable date range. The item still gets a record.
        let item = InventoryItem {
            quantity: 4_000_000_000,
            daily_sales_history: vec![0.001; 90],
            ..InventoryItem::new("SKU-GLACIAL")
        };
        let recs = recommend(&[item], &PlanningParameters::default());
        assert_eq!(recs.len(), 1);
        assert!(recs[0].estimated_stockout_date.is_none());
        assert!(recs[0].days_of_coverage_current > 1e12);
    }

    #[test]
    fn missing_cost_and_price_never_panic_or_fail() {
        // A degenerate item must not poison the batch.
        let items = vec![
            InventoryItem {
                quantity: 50,
                ..InventoryItem::new("SKU-BARE")
            },
            steady_seller(),
        ];
        let recs = recommend(&items, &PlanningParameters::default());
        assert_eq!(recs.len(), 2);
        assert!(recs[0].reorder_quantity <= 10_000);
        assert!(recs[1].reorder_quantity > 0);
    }
}
