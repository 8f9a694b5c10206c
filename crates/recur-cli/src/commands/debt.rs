//! Debt payoff command implementation

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use recur_core::debt::{plan_payoff, Debt, PayoffPlan, PayoffStrategy};

use super::{money, truncate, OutputFormat};

pub fn cmd_debt(
    file: &Path,
    strategy: Option<&str>,
    extra: f64,
    format: OutputFormat,
) -> Result<()> {
    let plans = build_plans(file, strategy, extra)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&plans)?),
        OutputFormat::Table => {
            for plan in &plans {
                print!("{}", render_plan(plan));
            }
        }
    }

    Ok(())
}

/// Read debts from a JSON file and plan one strategy, or both when none is given
pub fn build_plans(file: &Path, strategy: Option<&str>, extra: f64) -> Result<Vec<PayoffPlan>> {
    let content = fs::read_to_string(file)
        .with_context(|| format!("Failed to open file: {}", file.display()))?;
    let debts: Vec<Debt> = serde_json::from_str(&content)
        .with_context(|| format!("Invalid debt file: {}", file.display()))?;

    let strategies: Vec<PayoffStrategy> = match strategy {
        Some(s) => vec![s.parse().map_err(|e: String| anyhow::anyhow!(e))?],
        None => PayoffStrategy::all().to_vec(),
    };

    strategies
        .into_iter()
        .map(|s| plan_payoff(&debts, s, extra).map_err(anyhow::Error::from))
        .collect()
}

pub fn render_plan(plan: &PayoffPlan) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(&format!("💳 {} plan\n", plan.strategy));
    out.push_str("   ─────────────────────────────────────────────\n");

    for (i, debt) in plan.order.iter().enumerate() {
        let minimum_only = match debt.minimum_only_months {
            Some(months) => format!("{} months on minimums", months),
            None => "never on minimums".to_string(),
        };
        out.push_str(&format!(
            "   {}. {:20} │ paid in {:>3} months │ interest {:>10} │ {}\n",
            i + 1,
            truncate(&debt.name, 20),
            debt.months,
            money(debt.interest_paid),
            minimum_only
        ));
    }

    out.push_str(&format!(
        "   Debt free in {} months, {} total interest\n",
        plan.total_months,
        money(plan.total_interest)
    ));
    out
}
