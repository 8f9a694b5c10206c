//! Data models for Recur

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Label used to group transactions that carry no description
pub const NO_DESCRIPTION: &str = "no description";

/// A transaction supplied by the caller
///
/// Negative amounts are expenses, positive amounts are credits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(default)]
    pub description: String,
    pub amount: f64,
    pub date: NaiveDate,
    #[serde(default)]
    pub category_id: Option<i64>,
}

impl Transaction {
    pub fn new(description: impl Into<String>, amount: f64, date: NaiveDate) -> Self {
        Self {
            description: description.into(),
            amount,
            date,
            category_id: None,
        }
    }

    pub fn with_category(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Description used for grouping (falls back to [`NO_DESCRIPTION`])
    pub fn group_label(&self) -> &str {
        if self.description.trim().is_empty() {
            NO_DESCRIPTION
        } else {
            &self.description
        }
    }

    /// Whether the record can take part in detection
    pub fn is_well_formed(&self) -> bool {
        self.amount.is_finite()
    }
}

/// Cadence of a recurring pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    pub fn all() -> &'static [Frequency] {
        &[Self::Daily, Self::Weekly, Self::Monthly, Self::Yearly]
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" | "annual" => Ok(Self::Yearly),
            _ => Err(format!("Unknown frequency: {}", s)),
        }
    }
}

/// A detected recurring charge
///
/// Built fresh on every detection run and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringPattern {
    pub description: String,
    /// Mean of the group's amounts (sign-inclusive)
    pub average_amount: f64,
    pub frequency: Frequency,
    pub last_occurrence: NaiveDate,
    pub next_occurrence: NaiveDate,
    /// `average_amount` normalized to a monthly rate
    pub estimated_monthly_savings: f64,
    /// Number of transactions in the group
    pub occurrences: usize,
    /// Mean gap between consecutive occurrences, in days
    pub average_interval_days: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_label_falls_back() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(Transaction::new("", -5.0, date).group_label(), NO_DESCRIPTION);
        assert_eq!(
            Transaction::new("   ", -5.0, date).group_label(),
            NO_DESCRIPTION
        );
        assert_eq!(Transaction::new("Netflix", -5.0, date).group_label(), "Netflix");
    }

    #[test]
    fn test_frequency_parse_and_display() {
        for freq in Frequency::all() {
            assert_eq!(freq.as_str().parse::<Frequency>().unwrap(), *freq);
        }
        assert_eq!("Annual".parse::<Frequency>().unwrap(), Frequency::Yearly);
        assert!("fortnightly".parse::<Frequency>().is_err());
        assert_eq!(Frequency::Weekly.to_string(), "weekly");
    }

    #[test]
    fn test_transaction_json_keys() {
        let json = r#"{"description":"Gym","amount":-100.0,"date":"2025-01-01","categoryId":7}"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.category_id, Some(7));
        assert_eq!(tx.date, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());

        let no_desc: Transaction =
            serde_json::from_str(r#"{"amount":-1.0,"date":"2025-01-01"}"#).unwrap();
        assert_eq!(no_desc.group_label(), NO_DESCRIPTION);
    }
}
