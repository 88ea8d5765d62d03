//! Planning service facade.
//!
//! Wires the four engine stages behind the public entry points:
//! validation first, one upstream fetch, per-item computation, and the
//! sequential budget pass last. Upstream failures are logged with the
//! failing operation's name and re-raised as a single typed error;
//! per-item anomalies never fail a batch.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, error};

use crate::budget::optimize_for_budget;
use crate::error::{PlanError, PlanResult};
use crate::fetcher::InventoryFetcher;
use crate::health::assess_health;
use crate::params::PlanningParameters;
use crate::recommendation::recommend;
use crate::types::{
    HealthStatus, InventoryHealthAssessment, InventoryItem, InventoryRecommendation,
    SalesVelocityMetrics,
};
use crate::velocity;

/// Totals over one planning run.
#[derive(Clone, Debug, Serialize)]
pub struct PlanSummary {
    pub items_analyzed: usize,
    pub items_needing_reorder: usize,
    pub total_reorder_units: u64,
    /// Spend at known unit costs; items without a cost contribute at
    /// the optimizer's sentinel rate.
    pub estimated_reorder_cost: f64,
    pub high_risk_items: usize,
    pub budget_applied: bool,
}

/// A complete prioritized reorder plan: recommendations (in priority
/// order when the budget pass ran), health assessments, and totals.
#[derive(Clone, Debug, Serialize)]
pub struct ReorderPlan {
    pub generated_at: DateTime<Utc>,
    pub recommendations: Vec<InventoryRecommendation>,
    pub health: Vec<InventoryHealthAssessment>,
    pub summary: PlanSummary,
}

/// The engine's public surface, generic over the external data seam.
pub struct PlanningService<F> {
    fetcher: F,
}

impl<F: InventoryFetcher> PlanningService<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Rolling sales statistics and forecasts for the given SKUs
    /// (empty list = whole catalog).
    pub async fn velocity_metrics(
        &self,
        skus: &[String],
        day_range: usize,
    ) -> PlanResult<Vec<SalesVelocityMetrics>> {
        const OP: &str = "velocity_metrics";
        if day_range == 0 {
            return Err(PlanError::invalid_input(OP, "day_range must be at least 1"));
        }

        let items = self.fetch(OP, skus).await?;
        debug!(op = OP, items = items.len(), day_range, "computing velocity metrics");
        Ok(items.iter().map(|i| velocity::analyze(i, day_range)).collect())
    }

    /// Reorder recommendations for the given SKUs. When the parameters
    /// enable budget constraints, the budget pass runs and the result
    /// comes back in priority order.
    pub async fn recommendations(
        &self,
        skus: &[String],
        params: Option<PlanningParameters>,
    ) -> PlanResult<Vec<InventoryRecommendation>> {
        const OP: &str = "recommendations";
        let params = params.unwrap_or_default();
        params.validate(OP)?;

        let items = self.fetch(OP, skus).await?;
        let mut recs = recommend(&items, &params);
        if params.budget_pass_enabled() {
            recs = optimize_for_budget(recs, &items, params.max_budget, params.max_units);
        }
        debug!(op = OP, items = items.len(), "computed recommendations");
        Ok(recs)
    }

    /// Health assessments for the given SKUs.
    pub async fn assess_health(
        &self,
        skus: &[String],
    ) -> PlanResult<Vec<InventoryHealthAssessment>> {
        const OP: &str = "assess_health";
        let items = self.fetch(OP, skus).await?;
        let metrics: Vec<SalesVelocityMetrics> = items
            .iter()
            .map(|i| velocity::analyze(i, velocity::DEFAULT_DAY_RANGE))
            .collect();
        Ok(assess_health(&items, &metrics))
    }

    /// The full plan over the whole catalog: recommendations, health,
    /// and run totals.
    pub async fn optimal_reorder_plan(&self, params: &PlanningParameters) -> PlanResult<ReorderPlan> {
        self.plan("optimal_reorder_plan", &[], params).await
    }

    /// The same plan restricted to an explicit SKU subset (empty list =
    /// whole catalog). Totals cover only the resolved items.
    pub async fn reorder_plan(
        &self,
        skus: &[String],
        params: &PlanningParameters,
    ) -> PlanResult<ReorderPlan> {
        self.plan("reorder_plan", skus, params).await
    }

    async fn plan(
        &self,
        op: &str,
        skus: &[String],
        params: &PlanningParameters,
    ) -> PlanResult<ReorderPlan> {
        params.validate(op)?;

        let items = self.fetch(op, skus).await?;
        let metrics: Vec<SalesVelocityMetrics> = items
            .iter()
            .map(|i| velocity::analyze(i, velocity::DEFAULT_DAY_RANGE))
            .collect();

        let mut recommendations = recommend(&items, params);
        let budget_applied = params.budget_pass_enabled();
        if budget_applied {
            recommendations =
                optimize_for_budget(recommendations, &items, params.max_budget, params.max_units);
        }

        let health = assess_health(&items, &metrics);
        let summary = summarize(&items, &recommendations, budget_applied);
        debug!(
            op,
            items = summary.items_analyzed,
            reorders = summary.items_needing_reorder,
            "plan complete"
        );

        Ok(ReorderPlan {
            generated_at: Utc::now(),
            recommendations,
            health,
            summary,
        })
    }

    /// Items with fewer than `threshold_days` days of coverage left.
    pub async fn low_inventory_report(
        &self,
        threshold_days: f64,
    ) -> PlanResult<Vec<InventoryRecommendation>> {
        const OP: &str = "low_inventory_report";
        if threshold_days <= 0.0 || !threshold_days.is_finite() {
            return Err(PlanError::invalid_input(
                OP,
                format!("threshold_days must be positive, got {}", threshold_days),
            ));
        }

        let items = self.fetch(OP, &[]).await?;
        let recs = recommend(&items, &PlanningParameters::default());
        Ok(recs
            .into_iter()
            .filter(|r| r.days_of_coverage_current < threshold_days)
            .collect())
    }

    /// Items currently classified as excess inventory.
    pub async fn excess_inventory_report(&self) -> PlanResult<Vec<InventoryHealthAssessment>> {
        const OP: &str = "excess_inventory_report";
        let items = self.fetch(OP, &[]).await?;
        let metrics: Vec<SalesVelocityMetrics> = items
            .iter()
            .map(|i| velocity::analyze(i, velocity::DEFAULT_DAY_RANGE))
            .collect();
        Ok(assess_health(&items, &metrics)
            .into_iter()
            .filter(|a| a.health_status == HealthStatus::Excess)
            .collect())
    }

    async fn fetch(&self, op: &str, skus: &[String]) -> PlanResult<Vec<InventoryItem>> {
        self.fetcher
            .fetch_inventory_items(skus)
            .await
            .map_err(|message| {
                error!(op, error = %message, "upstream inventory fetch failed");
                PlanError::upstream(op, message)
            })
    }
}

fn summarize(
    items: &[InventoryItem],
    recommendations: &[InventoryRecommendation],
    budget_applied: bool,
) -> PlanSummary {
    use crate::budget::DEFAULT_UNIT_COST;
    use crate::types::RiskLevel;

    let cost_of = |sku: &str| {
        items
            .iter()
            .find(|i| i.sku == sku)
            .and_then(|i| i.cost.filter(|c| *c > 0.0))
            .unwrap_or(DEFAULT_UNIT_COST)
    };

    let items_needing_reorder = recommendations
        .iter()
        .filter(|r| r.reorder_quantity > 0)
        .count();
    let total_reorder_units: u64 = recommendations
        .iter()
        .map(|r| r.reorder_quantity as u64)
        .sum();
    let estimated_reorder_cost: f64 = recommendations
        .iter()
        .map(|r| r.reorder_quantity as f64 * cost_of(&r.sku))
        .sum();
    let high_risk_items = recommendations
        .iter()
        .filter(|r| r.risk_level == RiskLevel::High)
        .count();

    PlanSummary {
        items_analyzed: items.len(),
        items_needing_reorder,
        total_reorder_units,
        estimated_reorder_cost,
        high_risk_items,
        budget_applied,
    }
}
