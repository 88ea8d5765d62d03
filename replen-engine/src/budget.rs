//! Budget-constrained reorder optimization.
//!
//! A greedy single pass over recommendations sorted most-urgent-first:
//! fully fund each item while resources last, partially fund the first
//! item that no longer fits, zero the rest. A 0/1-relaxed knapsack
//! approximation, chosen for explainability and O(n log n) cost;
//! reorder plans are advisory, not transactional commitments.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::types::{InventoryItem, InventoryRecommendation};

/// Unit cost assumed when an item's cost is unknown. A documented
/// sentinel, not a silent guess.
pub const DEFAULT_UNIT_COST: f64 = 10.0;

/// Re-allocate reorder quantities under a spend budget and unit cap.
///
/// Returns new recommendation records in priority order (risk severity,
/// then current days of coverage ascending). Callers needing SKU order
/// must re-sort.
pub fn optimize_for_budget(
    recommendations: Vec<InventoryRecommendation>,
    items: &[InventoryItem],
    max_budget: f64,
    max_units: u32,
) -> Vec<InventoryRecommendation> {
    let cost_by_sku: HashMap<&str, f64> = items
        .iter()
        .filter_map(|i| i.cost.filter(|c| *c > 0.0).map(|c| (i.sku.as_str(), c)))
        .collect();

    let mut ordered = recommendations;
    ordered.sort_by(compare_urgency);

    let mut remaining_budget = max_budget;
    let mut remaining_units = max_units;

    ordered
        .into_iter()
        .map(|rec| {
            let item_cost = cost_by_sku
                .get(rec.sku.as_str())
                .copied()
                .unwrap_or(DEFAULT_UNIT_COST);
            let total_cost = item_cost * rec.reorder_quantity as f64;

            if total_cost <= remaining_budget && rec.reorder_quantity <= remaining_units {
                remaining_budget -= total_cost;
                remaining_units -= rec.reorder_quantity;
                return rec;
            }

            let affordable = if remaining_budget > 0.0 && remaining_units > 0 {
                ((remaining_budget / item_cost).floor() as u32).min(remaining_units)
            } else {
                0
            };

            if affordable > 0 {
                remaining_budget -= item_cost * affordable as f64;
                remaining_units -= affordable;
                let reason = format!(
                    "Reorder reduced from {} to {} units by budget constraints",
                    rec.reorder_quantity, affordable
                );
                InventoryRecommendation {
                    reorder_quantity: affordable,
                    reason,
                    ..rec
                }
            } else {
                InventoryRecommendation {
                    reorder_quantity: 0,
                    reason: "No reorder due to budget constraints".to_string(),
                    ..rec
                }
            }
        })
        .collect()
}

/// Most urgent first: higher risk severity, then fewer days of
/// coverage. Coverage values are finite by construction, but the
/// comparison stays total anyway.
fn compare_urgency(a: &InventoryRecommendation, b: &InventoryRecommendation) -> Ordering {
    a.risk_level
        .severity()
        .cmp(&b.risk_level.severity())
        .then_with(|| {
            a.days_of_coverage_current
                .partial_cmp(&b.days_of_coverage_current)
                .unwrap_or(Ordering::Equal)
        })
}
