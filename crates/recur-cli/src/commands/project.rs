//! Savings projection command implementations

use anyhow::{bail, Result};
use chrono::{NaiveDate, Utc};
use recur_core::projection::{goal_date, months_to_goal, project_retirement, MAX_PROJECTION_MONTHS};
use recur_core::RetirementInput;

use super::money;

pub fn cmd_project_goal(target: f64, current: f64, monthly: f64, rate_percent: f64) -> Result<()> {
    let today = Utc::now().date_naive();
    println!("{}", render_goal(target, current, monthly, rate_percent, today)?);
    Ok(())
}

/// Describe when a goal is reached, as of `today`
pub fn render_goal(
    target: f64,
    current: f64,
    monthly: f64,
    rate_percent: f64,
    today: NaiveDate,
) -> Result<String> {
    for (name, value) in [
        ("target", target),
        ("current", current),
        ("monthly", monthly),
        ("rate", rate_percent),
    ] {
        if !value.is_finite() || value < 0.0 {
            bail!("--{} must be a non-negative number", name);
        }
    }

    let Some(months) = months_to_goal(target, current, monthly, rate_percent / 100.0) else {
        return Ok(format!(
            "🎯 {} is not reachable within {} years at {}/month",
            money(target),
            MAX_PROJECTION_MONTHS / 12,
            money(monthly)
        ));
    };

    if months == 0 {
        return Ok(format!("🎯 Goal of {} already reached", money(target)));
    }

    let when = goal_date(today, months)
        .map(|d| d.format("%B %Y").to_string())
        .unwrap_or_else(|| "?".to_string());
    Ok(format!(
        "🎯 {} reached in {} months ({} years, {} months) - around {}",
        money(target),
        months,
        months / 12,
        months % 12,
        when
    ))
}

pub fn cmd_project_retirement(input: &RetirementInput) -> Result<()> {
    let projection = project_retirement(input)?;

    println!();
    println!("🏖️  Retirement Projection");
    println!("   ─────────────────────────────────────");
    println!(
        "   Years to retirement:    {}",
        projection.years_to_retirement
    );
    println!(
        "   Projected savings:      {}",
        money(projection.projected_savings)
    );
    println!(
        "   Needed for {}/yr:   {}",
        money(input.desired_annual_income),
        money(projection.required_savings)
    );

    if projection.on_track {
        println!("   ✅ On track");
    } else {
        println!("   ⚠️  Shortfall:          {}", money(projection.shortfall));
        println!(
            "   Contribute {}/month to close the gap",
            money(projection.required_monthly_contribution)
        );
    }

    Ok(())
}
