//! Savings goal and retirement projections
//!
//! All projections compound monthly with contributions at the end of each
//! month.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Longest horizon `months_to_goal` will search (100 years)
pub const MAX_PROJECTION_MONTHS: u32 = 1200;

/// Safe withdrawal rate used to size a retirement nest egg
pub const DEFAULT_WITHDRAWAL_RATE: f64 = 0.04;

/// Balance after `months` of monthly compounding and contributions
///
/// `FV = P(1+r)^n + C((1+r)^n - 1)/r` with `r = annual_rate / 12`.
pub fn future_value(present: f64, monthly_contribution: f64, annual_rate: f64, months: u32) -> f64 {
    let r = annual_rate / 12.0;
    let n = months as f64;

    if r.abs() < f64::EPSILON {
        return present + monthly_contribution * n;
    }

    let growth = (1.0 + r).powf(n);
    present * growth + monthly_contribution * (growth - 1.0) / r
}

/// Months until a balance reaches `target`
///
/// Returns `Some(0)` if it already has, `None` if it will not within
/// [`MAX_PROJECTION_MONTHS`].
pub fn months_to_goal(
    target: f64,
    current: f64,
    monthly_contribution: f64,
    annual_rate: f64,
) -> Option<u32> {
    if current >= target {
        return Some(0);
    }

    let r = annual_rate / 12.0;
    let mut balance = current;
    for month in 1..=MAX_PROJECTION_MONTHS {
        balance = balance * (1.0 + r) + monthly_contribution;
        if balance >= target {
            return Some(month);
        }
    }
    None
}

/// Calendar date a goal is reached, `months` after `from`
pub fn goal_date(from: NaiveDate, months: u32) -> Option<NaiveDate> {
    from.checked_add_months(Months::new(months))
}

/// Inputs for a retirement projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementInput {
    pub current_age: u32,
    pub retirement_age: u32,
    pub current_savings: f64,
    pub monthly_contribution: f64,
    /// Expected yearly return, e.g. 0.07 for 7%
    pub annual_return_rate: f64,
    /// Income wanted each year of retirement
    pub desired_annual_income: f64,
    /// Share of the nest egg withdrawn per year
    pub withdrawal_rate: f64,
}

impl RetirementInput {
    fn validate(&self) -> Result<()> {
        if self.retirement_age <= self.current_age {
            return Err(Error::InvalidData(format!(
                "retirement age ({}) must be greater than current age ({})",
                self.retirement_age, self.current_age
            )));
        }

        let amounts = [
            ("current savings", self.current_savings),
            ("monthly contribution", self.monthly_contribution),
            ("desired annual income", self.desired_annual_income),
        ];
        for (name, value) in amounts {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidData(format!(
                    "{} must be a non-negative number (got {})",
                    name, value
                )));
            }
        }

        if !self.annual_return_rate.is_finite() || self.annual_return_rate <= -1.0 {
            return Err(Error::InvalidData(format!(
                "annual return rate must be greater than -100% (got {})",
                self.annual_return_rate
            )));
        }
        if !self.withdrawal_rate.is_finite() || self.withdrawal_rate <= 0.0 {
            return Err(Error::InvalidData(format!(
                "withdrawal rate must be positive (got {})",
                self.withdrawal_rate
            )));
        }
        Ok(())
    }
}

/// Outcome of a retirement projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementProjection {
    pub years_to_retirement: u32,
    /// Balance at retirement on the current plan
    pub projected_savings: f64,
    /// Nest egg that supports the desired income
    pub required_savings: f64,
    /// How far the plan falls short (0 when on track)
    pub shortfall: f64,
    pub on_track: bool,
    /// Contribution that would reach `required_savings` exactly
    pub required_monthly_contribution: f64,
}

/// Project savings at retirement and the contribution needed to hit the target
pub fn project_retirement(input: &RetirementInput) -> Result<RetirementProjection> {
    input.validate()?;

    let years = input.retirement_age - input.current_age;
    let months = years * 12;

    let projected_savings = future_value(
        input.current_savings,
        input.monthly_contribution,
        input.annual_return_rate,
        months,
    );
    let required_savings = input.desired_annual_income / input.withdrawal_rate;

    // Solve the future value formula for the contribution
    let r = input.annual_return_rate / 12.0;
    let n = months as f64;
    let required_monthly_contribution = if r.abs() < f64::EPSILON {
        (required_savings - input.current_savings) / n
    } else {
        let growth = (1.0 + r).powf(n);
        (required_savings - input.current_savings * growth) * r / (growth - 1.0)
    };

    Ok(RetirementProjection {
        years_to_retirement: years,
        projected_savings,
        required_savings,
        shortfall: (required_savings - projected_savings).max(0.0),
        on_track: projected_savings >= required_savings,
        required_monthly_contribution: required_monthly_contribution.max(0.0),
    })
}
