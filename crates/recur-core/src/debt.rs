//! Debt payoff estimation
//!
//! Estimates months-to-payoff from amortization math and simulates snowball
//! (smallest balance first) and avalanche (highest rate first) plans where
//! every freed minimum payment rolls onto the next debt.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::error::{Error, Result};

/// Longest plan `plan_payoff` will simulate (50 years)
pub const MAX_PAYOFF_MONTHS: u32 = 600;

/// Balances below half a cent count as paid
const PAID_EPSILON: f64 = 0.005;

/// A debt to pay off
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Debt {
    pub name: String,
    pub balance: f64,
    /// Yearly interest rate, e.g. 0.199 for 19.9% APR
    pub annual_rate: f64,
    pub minimum_payment: f64,
}

impl Debt {
    pub fn new(name: impl Into<String>, balance: f64, annual_rate: f64, minimum_payment: f64) -> Self {
        Self {
            name: name.into(),
            balance,
            annual_rate,
            minimum_payment,
        }
    }

    fn validate(&self) -> Result<()> {
        let fields = [
            ("balance", self.balance),
            ("annual rate", self.annual_rate),
            ("minimum payment", self.minimum_payment),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidData(format!(
                    "{}: {} must be a non-negative number (got {})",
                    self.name, field, value
                )));
            }
        }
        Ok(())
    }
}

/// Order in which extra payments are applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayoffStrategy {
    /// Smallest balance first
    Snowball,
    /// Highest interest rate first
    Avalanche,
}

impl PayoffStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Snowball => "snowball",
            Self::Avalanche => "avalanche",
        }
    }

    pub fn all() -> &'static [PayoffStrategy] {
        &[Self::Snowball, Self::Avalanche]
    }

    /// Sort debts into payoff order (ties by name)
    pub fn order<'a>(&self, debts: &'a [Debt]) -> Vec<&'a Debt> {
        let mut ordered: Vec<&Debt> = debts.iter().collect();
        ordered.sort_by(|a, b| {
            let primary = match self {
                Self::Snowball => a.balance.partial_cmp(&b.balance),
                Self::Avalanche => b.annual_rate.partial_cmp(&a.annual_rate),
            };
            primary
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.name.cmp(&b.name))
        });
        ordered
    }
}

impl fmt::Display for PayoffStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PayoffStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "snowball" => Ok(Self::Snowball),
            "avalanche" => Ok(Self::Avalanche),
            _ => Err(format!("Unknown payoff strategy: {}", s)),
        }
    }
}

/// Months to pay off a single balance with a fixed payment
///
/// `n = -ln(1 - rB/P) / ln(1 + r)` with `r` the monthly rate. Returns `None`
/// when the payment never covers the interest or an input is not finite.
pub fn months_to_payoff(balance: f64, annual_rate: f64, monthly_payment: f64) -> Option<u32> {
    if !(balance.is_finite() && annual_rate.is_finite() && monthly_payment.is_finite()) {
        return None;
    }
    if balance <= 0.0 {
        return Some(0);
    }
    if monthly_payment <= 0.0 {
        return None;
    }

    let r = annual_rate / 12.0;
    let months = if r <= 0.0 {
        balance / monthly_payment
    } else {
        if monthly_payment <= balance * r {
            return None;
        }
        -(1.0 - r * balance / monthly_payment).ln() / (1.0 + r).ln()
    };

    // Absorb float noise so exact payoffs do not round up a month
    Some((months - 1e-9).ceil().max(1.0) as u32)
}

/// Payoff result for one debt within a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtPayoff {
    pub name: String,
    /// Month (1-based) the balance reaches zero; 0 if it started at zero
    pub months: u32,
    pub interest_paid: f64,
    /// Months to clear this debt alone on its minimum payment; `None` if the
    /// minimum never covers the interest
    pub minimum_only_months: Option<u32>,
}

/// A full payoff plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoffPlan {
    pub strategy: PayoffStrategy,
    /// Debts in the order the strategy attacks them
    pub order: Vec<DebtPayoff>,
    pub total_months: u32,
    pub total_interest: f64,
}

/// Simulate paying off `debts` month by month
///
/// The monthly budget is the sum of all minimums plus `extra_payment`; it
/// stays constant, so each paid-off minimum rolls onto the focus debt.
pub fn plan_payoff(debts: &[Debt], strategy: PayoffStrategy, extra_payment: f64) -> Result<PayoffPlan> {
    if !extra_payment.is_finite() || extra_payment < 0.0 {
        return Err(Error::InvalidData(format!(
            "extra payment must be a non-negative number (got {})",
            extra_payment
        )));
    }
    for debt in debts {
        debt.validate()?;
    }

    let ordered = strategy.order(debts);
    let budget: f64 = ordered.iter().map(|d| d.minimum_payment).sum::<f64>() + extra_payment;

    let mut balances: Vec<f64> = ordered.iter().map(|d| d.balance).collect();
    let mut interest = vec![0.0; ordered.len()];
    let mut paid_month: Vec<Option<u32>> = balances
        .iter()
        .map(|b| (*b <= PAID_EPSILON).then_some(0))
        .collect();

    let mut month = 0;
    while paid_month.iter().any(Option::is_none) {
        month += 1;
        if month > MAX_PAYOFF_MONTHS {
            return Err(Error::InvalidData(format!(
                "debts cannot be paid off within {} months with a budget of {:.2}/month",
                MAX_PAYOFF_MONTHS, budget
            )));
        }

        let active: Vec<usize> = (0..ordered.len())
            .filter(|&i| paid_month[i].is_none())
            .collect();

        for &i in &active {
            let accrued = balances[i] * ordered[i].annual_rate / 12.0;
            balances[i] += accrued;
            interest[i] += accrued;
        }

        let mut remaining = budget;
        for &i in &active {
            let payment = ordered[i].minimum_payment.min(balances[i]).min(remaining);
            balances[i] -= payment;
            remaining -= payment;
        }
        // Whatever is left goes to the focus debt, spilling to the next
        for &i in &active {
            if remaining <= 0.0 {
                break;
            }
            let payment = remaining.min(balances[i]);
            balances[i] -= payment;
            remaining -= payment;
        }

        for &i in &active {
            if balances[i] <= PAID_EPSILON {
                balances[i] = 0.0;
                paid_month[i] = Some(month);
                debug!("{} paid off in month {}", ordered[i].name, month);
            }
        }
    }

    let order: Vec<DebtPayoff> = ordered
        .iter()
        .zip(paid_month.iter().zip(interest.iter()))
        .map(|(debt, (months, interest_paid))| DebtPayoff {
            name: debt.name.clone(),
            months: months.unwrap_or(0),
            interest_paid: *interest_paid,
            minimum_only_months: months_to_payoff(
                debt.balance,
                debt.annual_rate,
                debt.minimum_payment,
            ),
        })
        .collect();

    Ok(PayoffPlan {
        strategy,
        total_months: order.iter().map(|d| d.months).max().unwrap_or(0),
        total_interest: order.iter().map(|d| d.interest_paid).sum(),
        order,
    })
}
