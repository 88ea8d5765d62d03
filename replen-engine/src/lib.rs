//! Inventory planning & reorder optimization engine.
//!
//! Turns raw per-SKU sales history and current stock levels into:
//! - sales-velocity forecasts ([`velocity`])
//! - reorder recommendations with risk classification ([`recommendation`])
//! - inventory health assessments ([`health`])
//! - a budget-constrained allocation of reorder spend ([`budget`])
//!
//! The engine is stateless and side-effect-free per invocation; every
//! derived record is a pure function of its inputs. Deliberately simple,
//! explainable heuristics for periodic batch runs, not statistical
//! time-series modeling.

pub mod budget;
pub mod confidence;
pub mod error;
pub mod fetcher;
pub mod health;
pub mod history;
pub mod loader;
pub mod params;
pub mod recommendation;
pub mod service;
pub mod types;
pub mod velocity;

pub use error::{PlanError, PlanResult};
pub use fetcher::{InventoryFetcher, StaticFetcher};
pub use params::PlanningParameters;
pub use service::{PlanSummary, PlanningService, ReorderPlan};
pub use types::{
    HealthStatus, InventoryHealthAssessment, InventoryItem, InventoryRecommendation, RiskLevel,
    SalesTrend, SalesVelocityMetrics,
};
