//! Planning parameters with the full default policy in one place.
//!
//! Every default-fallback lives here rather than scattered through the
//! components: a caller that constructs `PlanningParameters::default()`
//! and overrides two fields gets exactly the documented policy for the
//! other eight.

use serde::{Deserialize, Serialize};

use crate::error::{PlanError, PlanResult};

/// One set of knobs per planning run.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanningParameters {
    /// Days of forward demand the recommended level should cover.
    pub target_days_of_coverage: u32,
    /// Buffer days held beyond forecasted demand.
    pub safety_stock_days: u32,
    pub minimum_reorder_quantity: u32,
    pub maximum_reorder_quantity: u32,
    /// Days between placing a reorder and stock becoming available.
    pub lead_time_days: u32,
    /// Blanket seasonal multiplier; overrides the per-item computed factor.
    pub seasonality_factor: f64,
    /// Blanket growth multiplier; overrides the per-item computed factor.
    pub sales_growth_factor: f64,
    pub apply_budget_constraints: bool,
    /// Spend ceiling for the budget optimizer. Unbounded by default.
    pub max_budget: f64,
    /// Unit ceiling for the budget optimizer. Unbounded by default.
    pub max_units: u32,
}

impl Default for PlanningParameters {
    fn default() -> Self {
        Self {
            target_days_of_coverage: 60,
            safety_stock_days: 14,
            minimum_reorder_quantity: 1,
            maximum_reorder_quantity: 10_000,
            lead_time_days: 30,
            seasonality_factor: 1.0,
            sales_growth_factor: 1.0,
            apply_budget_constraints: false,
            max_budget: f64::INFINITY,
            max_units: u32::MAX,
        }
    }
}

impl PlanningParameters {
    /// Reject invalid parameter sets before any computation starts.
    ///
    /// Day and quantity fields are unsigned so non-negativity holds by
    /// construction; the remaining invariants are checked here.
    pub fn validate(&self, op: &str) -> PlanResult<()> {
        if self.seasonality_factor <= 0.0 || !self.seasonality_factor.is_finite() {
            return Err(PlanError::invalid_input(
                op,
                format!(
                    "seasonality_factor must be a positive number, got {}",
                    self.seasonality_factor
                ),
            ));
        }
        if self.sales_growth_factor <= 0.0 || !self.sales_growth_factor.is_finite() {
            return Err(PlanError::invalid_input(
                op,
                format!(
                    "sales_growth_factor must be a positive number, got {}",
                    self.sales_growth_factor
                ),
            ));
        }
        if self.max_budget < 0.0 || self.max_budget.is_nan() {
            return Err(PlanError::invalid_input(
                op,
                format!("max_budget must be non-negative, got {}", self.max_budget),
            ));
        }
        if self.minimum_reorder_quantity > self.maximum_reorder_quantity {
            return Err(PlanError::invalid_input(
                op,
                format!(
                    "minimum_reorder_quantity {} exceeds maximum_reorder_quantity {}",
                    self.minimum_reorder_quantity, self.maximum_reorder_quantity
                ),
            ));
        }
        Ok(())
    }

    /// Whether the budget optimizer pass should run for this parameter set.
    pub fn budget_pass_enabled(&self) -> bool {
        self.apply_budget_constraints
            && (self.max_budget.is_finite() || self.max_units < u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_policy() {
        let p = PlanningParameters::default();
        assert_eq!(p.target_days_of_coverage, 60);
        assert_eq!(p.safety_stock_days, 14);
        assert_eq!(p.minimum_reorder_quantity, 1);
        assert_eq!(p.maximum_reorder_quantity, 10_000);
        assert_eq!(p.lead_time_days, 30);
        assert!((p.seasonality_factor - 1.0).abs() < f64::EPSILON);
        assert!((p.sales_growth_factor - 1.0).abs() < f64::EPSILON);
        assert!(!p.apply_budget_constraints);
        assert!(p.max_budget.is_infinite());
        assert_eq!(p.max_units, u32::MAX);
    }

    #[test]
    fn default_params_validate() {
        assert!(PlanningParameters::default().validate("test").is_ok());
    }

    #[test]
    fn zero_growth_factor_is_rejected() {
        let p = PlanningParameters {
            sales_growth_factor: 0.0,
            ..PlanningParameters::default()
        };
        assert!(p.validate("test").is_err());
    }

    #[test]
    fn inverted_reorder_bounds_are_rejected() {
        let p = PlanningParameters {
            minimum_reorder_quantity: 500,
            maximum_reorder_quantity: 100,
            ..PlanningParameters::default()
        };
        assert!(p.validate("test").is_err());
    }

    #[test]
    fn budget_pass_requires_flag_and_a_bound() {
        let mut p = PlanningParameters {
            apply_budget_constraints: true,
            ..PlanningParameters::default()
        };
        // Flag set but both caps unbounded: nothing to optimize.
        assert!(!p.budget_pass_enabled());

        p.max_budget = 5_000.0;
        assert!(p.budget_pass_enabled());

        p.max_budget = f64::INFINITY;
        p.max_units = 200;
        assert!(p.budget_pass_enabled());

        p.apply_budget_constraints = false;
        assert!(!p.budget_pass_enabled());
    }
}
