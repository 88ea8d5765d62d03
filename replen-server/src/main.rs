use std::env;
use std::process;
use std::time::Instant;

use chrono::Utc;
use serde::Serialize;

use replen_engine::loader::CsvFetcher;
use replen_engine::service::{PlanningService, ReorderPlan};
use replen_engine::types::{HealthStatus, RiskLevel};
use replen_engine::PlanningParameters;

// ---------------------------------------------------------------------------
// JSON output contract
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct PlanJson {
    generated_at: String,
    sku_filter: Vec<String>,
    plan_ms: u128,
    plan: ReorderPlan,
    health_counts: Vec<HealthCountJson>,
}

#[derive(Serialize)]
struct HealthCountJson {
    status: String,
    count: usize,
}

fn health_counts(plan: &ReorderPlan) -> Vec<HealthCountJson> {
    let statuses = [
        HealthStatus::OutOfStock,
        HealthStatus::Low,
        HealthStatus::Healthy,
        HealthStatus::Excess,
        HealthStatus::Overaged,
        HealthStatus::SlowMoving,
        HealthStatus::Stranded,
    ];
    statuses
        .iter()
        .map(|s| HealthCountJson {
            status: s.to_string(),
            count: plan.health.iter().filter(|a| a.health_status == *s).count(),
        })
        .filter(|c| c.count > 0)
        .collect()
}

// ---------------------------------------------------------------------------
// Human-readable output
// ---------------------------------------------------------------------------

/// Format a number with comma thousands separators.
fn format_dollars(amount: f64) -> String {
    let whole = amount.abs() as u64;
    let sign = if amount < 0.0 { "-" } else { "" };

    if whole < 1_000 {
        return format!("{}{}", sign, whole);
    }

    let s = whole.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    format!("{}{}", sign, result.chars().rev().collect::<String>())
}

fn print_human(plan: &ReorderPlan, load_ms: u128, plan_ms: u128) {
    println!();
    println!("  \u{2554}{}\u{2557}", "\u{2550}".repeat(62));
    println!("  \u{2551}{:^62}\u{2551}", "REPLEN \u{2014} Prioritized Reorder Plan");
    println!("  \u{255a}{}\u{255d}", "\u{2550}".repeat(62));
    println!();

    let s = &plan.summary;
    println!(
        "  {} items analyzed  \u{00b7}  {} need reordering  \u{00b7}  {} high risk",
        s.items_analyzed, s.items_needing_reorder, s.high_risk_items
    );
    println!(
        "  {} total units  \u{00b7}  ${} estimated spend{}",
        s.total_reorder_units,
        format_dollars(s.estimated_reorder_cost),
        if s.budget_applied {
            "  \u{00b7}  budget constraints applied"
        } else {
            ""
        }
    );
    println!();

    let actionable: Vec<_> = plan
        .recommendations
        .iter()
        .filter(|r| r.reorder_quantity > 0)
        .collect();

    if actionable.is_empty() {
        println!("  Nothing to reorder. All clear!");
    } else {
        println!("  {:\u{2500}<64}", "");
        for (i, rec) in actionable.iter().enumerate() {
            let urgency_icon = match rec.risk_level {
                RiskLevel::High => "!!",
                RiskLevel::Medium => "! ",
                RiskLevel::Low => "  ",
            };
            println!(
                "  {} {}. {:12} order {:>6}  {:>5.0}d coverage  risk {}",
                urgency_icon,
                i + 1,
                rec.sku,
                rec.reorder_quantity,
                rec.days_of_coverage_current,
                rec.risk_level,
            );
            println!(
                "       {}  (confidence {:.0}%)",
                rec.reason,
                rec.confidence * 100.0
            );
            println!();
        }
        println!("  {:\u{2500}<64}", "");
    }

    println!();
    for count in health_counts(plan) {
        println!("  {:12} {}", count.status, count.count);
    }
    println!();
    println!(
        "  \u{23f1}  CSV loaded in {}ms \u{00b7} Plan computed in {}ms \u{00b7} Total {}ms",
        load_ms,
        plan_ms,
        load_ms + plan_ms
    );
    println!();
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn usage() -> ! {
    eprintln!("Usage: replen-server <inventory.csv> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --skus        Comma-separated SKUs to plan (default: all)");
    eprintln!("  --budget      Maximum reorder spend in dollars");
    eprintln!("  --max-units   Maximum total units to reorder");
    eprintln!("  --coverage    Target days of coverage (default: 60)");
    eprintln!("  --lead-time   Supplier lead time in days (default: 30)");
    eprintln!("  --json        Output as JSON instead of formatted text");
    eprintln!();
    eprintln!("Example:");
    eprintln!("  replen-server fixtures/inventory.csv");
    eprintln!("  replen-server fixtures/inventory.csv --budget 25000 --json");
    process::exit(1);
}

fn parse_flag_value<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> T {
    args.get(i + 1)
        .and_then(|v| v.parse().ok())
        .unwrap_or_else(|| {
            eprintln!("Error: {} requires a valid value", flag);
            process::exit(1);
        })
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        usage();
    }

    let csv_path = &args[1];

    let mut sku_filter: Vec<String> = Vec::new();
    let mut params = PlanningParameters::default();
    let mut json_output = false;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--skus" => {
                sku_filter = args
                    .get(i + 1)
                    .unwrap_or_else(|| {
                        eprintln!("Error: --skus requires a comma-separated list");
                        process::exit(1);
                    })
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
                i += 2;
            }
            "--budget" => {
                params.max_budget = parse_flag_value(&args, i, "--budget");
                params.apply_budget_constraints = true;
                i += 2;
            }
            "--max-units" => {
                params.max_units = parse_flag_value(&args, i, "--max-units");
                params.apply_budget_constraints = true;
                i += 2;
            }
            "--coverage" => {
                params.target_days_of_coverage = parse_flag_value(&args, i, "--coverage");
                i += 2;
            }
            "--lead-time" => {
                params.lead_time_days = parse_flag_value(&args, i, "--lead-time");
                i += 2;
            }
            "--json" => {
                json_output = true;
                i += 1;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                usage();
            }
        }
    }

    let load_start = Instant::now();
    let fetcher = match CsvFetcher::from_path(csv_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error loading CSV: {}", e);
            process::exit(1);
        }
    };
    let load_ms = load_start.elapsed().as_millis();

    let service = PlanningService::new(fetcher);

    let plan_start = Instant::now();
    // An empty SKU filter plans the whole catalog.
    let plan = service.reorder_plan(&sku_filter, &params).await;
    let plan_ms = plan_start.elapsed().as_millis();

    let plan = match plan {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if json_output {
        let out = PlanJson {
            generated_at: Utc::now().to_rfc3339(),
            sku_filter,
            plan_ms,
            health_counts: health_counts(&plan),
            plan,
        };
        println!("{}", serde_json::to_string_pretty(&out).unwrap());
    } else {
        print_human(&plan, load_ms, plan_ms);
    }
}
