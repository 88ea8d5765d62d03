//! Sales velocity analysis: rolling sums, trend, seasonality, growth,
//! and the forward daily-sales forecast.
//!
//! All thresholds and clamp bounds live here as documented constants.
//! The clamps keep a single anomalous week from producing runaway
//! multipliers; the minimum-history gates keep trend and seasonality
//! from over-fitting sparse data.

use crate::history::{normalize, sum_range, sum_recent};
use crate::types::{InventoryItem, SalesTrend, SalesVelocityMetrics};

/// Default analysis window in days.
pub const DEFAULT_DAY_RANGE: usize = 90;

/// Days per half of the trend comparison (recent 15 vs prior 15).
pub const TREND_WINDOW_DAYS: usize = 15;
/// Recent/previous ratio above which the trend is increasing.
pub const TREND_INCREASING_RATIO: f64 = 1.2;
/// Recent/previous ratio below which the trend is decreasing.
pub const TREND_DECREASING_RATIO: f64 = 0.8;

/// Lower clamp for the seasonality factor.
pub const SEASONALITY_MIN: f64 = 0.5;
/// Upper clamp for the seasonality factor.
pub const SEASONALITY_MAX: f64 = 2.0;
/// Minimum observed days before a seasonality factor is computed at all.
pub const SEASONALITY_MIN_HISTORY_DAYS: usize = 30;

/// Lower clamp for the growth factor.
pub const GROWTH_MIN: f64 = 0.7;
/// Upper clamp for the growth factor.
pub const GROWTH_MAX: f64 = 1.5;
/// Minimum observed days before a growth factor is computed at all.
pub const GROWTH_MIN_HISTORY_DAYS: usize = 60;

/// 30 days is roughly 4.29 calendar weeks; an approximation, not an
/// exact week count.
pub const WEEKS_PER_30_DAYS: f64 = 4.29;

/// Compute velocity metrics for one item over a `day_range`-day window.
pub fn analyze(item: &InventoryItem, day_range: usize) -> SalesVelocityMetrics {
    // Rolling sums always operate on the 90-day grid even when the
    // caller narrows the analysis window.
    let window = day_range.max(DEFAULT_DAY_RANGE);
    let normalized = normalize(&item.daily_sales_history, window);

    let units_sold_7_days = sum_recent(&normalized, 7);
    let units_sold_30_days = sum_recent(&normalized, 30);
    let units_sold_60_days = sum_recent(&normalized, 60);
    let units_sold_90_days = sum_recent(&normalized, 90);

    let average_daily_sales = units_sold_30_days / 30.0;
    let average_weekly_sales = units_sold_30_days / WEEKS_PER_30_DAYS;

    let sales_trend = classify_trend(&normalized);
    let observed_days = item.daily_sales_history.len();
    let seasonality_factor = seasonality_factor(&normalized, observed_days);
    let growth_factor = growth_factor(&normalized, observed_days);

    let forecast_daily_sales = average_daily_sales * growth_factor * seasonality_factor;

    SalesVelocityMetrics {
        sku: item.sku.clone(),
        units_sold_7_days,
        units_sold_30_days,
        units_sold_60_days,
        units_sold_90_days,
        average_daily_sales,
        average_weekly_sales,
        sales_trend,
        seasonality_factor,
        growth_factor,
        forecast_daily_sales,
        forecast_30_days: forecast_units(forecast_daily_sales, 30.0),
        forecast_60_days: forecast_units(forecast_daily_sales, 60.0),
        forecast_90_days: forecast_units(forecast_daily_sales, 90.0),
    }
}

fn forecast_units(daily: f64, days: f64) -> u32 {
    (daily * days).round().max(0.0) as u32
}

/// Compare the most recent 15 days against the 15 days before them.
fn classify_trend(normalized: &[f64]) -> SalesTrend {
    let recent = sum_recent(normalized, TREND_WINDOW_DAYS);
    let previous = sum_range(normalized, TREND_WINDOW_DAYS, 2 * TREND_WINDOW_DAYS);

    let ratio = if previous == 0.0 { 1.0 } else { recent / previous };

    if ratio > TREND_INCREASING_RATIO {
        SalesTrend::Increasing
    } else if ratio < TREND_DECREASING_RATIO {
        SalesTrend::Decreasing
    } else {
        SalesTrend::Stable
    }
}

/// Recent-15-day daily average over the full-period daily average.
///
/// Returns 1.0 when fewer than 30 days were observed (insufficient
/// signal) or when the period average is zero.
fn seasonality_factor(normalized: &[f64], observed_days: usize) -> f64 {
    if observed_days < SEASONALITY_MIN_HISTORY_DAYS {
        return 1.0;
    }

    let recent_avg = sum_recent(normalized, TREND_WINDOW_DAYS) / TREND_WINDOW_DAYS as f64;
    let period_avg = normalized.iter().sum::<f64>() / normalized.len() as f64;
    if period_avg == 0.0 {
        return 1.0;
    }

    (recent_avg / period_avg).clamp(SEASONALITY_MIN, SEASONALITY_MAX)
}

/// Most-recent-30-day sum over the prior-30-day sum.
///
/// Returns 1.0 when fewer than 60 days were observed or when the prior
/// period had no sales.
fn growth_factor(normalized: &[f64], observed_days: usize) -> f64 {
    if observed_days < GROWTH_MIN_HISTORY_DAYS {
        return 1.0;
    }

    let recent = sum_recent(normalized, 30);
    let prior = sum_range(normalized, 30, 60);
    if prior == 0.0 {
        return 1.0;
    }

    (recent / prior).clamp(GROWTH_MIN, GROWTH_MAX)
}
