//! Recurring charge detection
//!
//! Groups transactions by description, checks that the gaps between
//! occurrences are evenly spaced, classifies the cadence, and estimates how
//! much would be saved per month if the charge were cancelled.
//!
//! Detection is a pure pass over the supplied slice: no state is kept between
//! runs, and malformed records are dropped instead of failing the whole run.

use chrono::{Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::models::{Frequency, RecurringPattern, Transaction};

/// Detection configuration
///
/// Every threshold used by the detector lives here so it can be tuned from a
/// config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Minimum transactions sharing a description before a cadence is inferred.
    /// Two-point groups always pass the spacing check; 3 is the stricter choice.
    pub min_occurrences: usize,
    /// Maximum distance (days) between any gap and the mean gap
    pub tolerance_days: f64,
    /// Mean gap at or below which a pattern is daily
    pub daily_max_days: f64,
    /// Mean gap at or below which a pattern is weekly
    pub weekly_max_days: f64,
    /// Mean gap at or below which a pattern is monthly (above is yearly)
    pub monthly_max_days: f64,
    /// Daily charges per month when normalizing savings
    pub days_per_month: f64,
    /// Weekly charges per month when normalizing savings
    pub weeks_per_month: f64,
    /// Months a yearly charge is spread across
    pub months_per_year: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            min_occurrences: 2,
            tolerance_days: 2.0,
            daily_max_days: 1.0,
            weekly_max_days: 7.0,
            monthly_max_days: 35.0,
            days_per_month: 30.0,
            weeks_per_month: 4.33,
            months_per_year: 12.0,
        }
    }
}

impl DetectionConfig {
    /// Reject configurations the detector cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.min_occurrences < 2 {
            return Err(Error::Config(format!(
                "min_occurrences must be at least 2 (got {})",
                self.min_occurrences
            )));
        }

        if !self.tolerance_days.is_finite() || self.tolerance_days < 0.0 {
            return Err(Error::Config(format!(
                "tolerance_days must be a non-negative number (got {})",
                self.tolerance_days
            )));
        }

        let thresholds = [
            ("daily_max_days", self.daily_max_days),
            ("weekly_max_days", self.weekly_max_days),
            ("monthly_max_days", self.monthly_max_days),
        ];
        for (name, value) in thresholds {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::Config(format!(
                    "{} must be a non-negative number (got {})",
                    name, value
                )));
            }
        }
        if !(self.daily_max_days < self.weekly_max_days
            && self.weekly_max_days < self.monthly_max_days)
        {
            return Err(Error::Config(format!(
                "frequency thresholds must increase: daily {} < weekly {} < monthly {}",
                self.daily_max_days, self.weekly_max_days, self.monthly_max_days
            )));
        }

        let factors = [
            ("days_per_month", self.days_per_month),
            ("weeks_per_month", self.weeks_per_month),
            ("months_per_year", self.months_per_year),
        ];
        for (name, value) in factors {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::Config(format!(
                    "{} must be a positive number (got {})",
                    name, value
                )));
            }
        }

        Ok(())
    }
}

/// Counters describing one detection run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetectionStats {
    /// Records handed to the detector
    pub transactions: usize,
    /// Records dropped before grouping (non-finite amount)
    pub malformed: usize,
    /// Distinct descriptions after filtering
    pub groups: usize,
    /// Groups below `min_occurrences`
    pub too_few: usize,
    /// Groups whose gaps were not evenly spaced
    pub irregular: usize,
    /// Groups whose next occurrence falls past the last representable date
    pub out_of_range: usize,
    /// Patterns emitted
    pub detected: usize,
}

/// Result of a detection run with its counters
#[derive(Debug, Clone, Default)]
pub struct DetectionRun {
    pub patterns: Vec<RecurringPattern>,
    pub stats: DetectionStats,
}

/// Why a description group produced no pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    Irregular,
    OutOfRange,
}

/// Detects recurring charges in a set of transactions
#[derive(Debug, Clone, Default)]
pub struct RecurrenceDetector {
    config: DetectionConfig,
}

impl RecurrenceDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DetectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Detect recurring patterns, most valuable to cancel first
    pub fn detect(&self, transactions: &[Transaction]) -> Vec<RecurringPattern> {
        self.detect_with_stats(transactions).patterns
    }

    /// Detect recurring patterns and report what happened to each group
    pub fn detect_with_stats(&self, transactions: &[Transaction]) -> DetectionRun {
        let mut stats = DetectionStats {
            transactions: transactions.len(),
            ..Default::default()
        };

        // BTreeMap keeps group iteration (and therefore tie order) stable
        let mut by_description: BTreeMap<&str, Vec<&Transaction>> = BTreeMap::new();
        for tx in transactions {
            if !tx.is_well_formed() {
                debug!(
                    "Skipping malformed transaction '{}' on {} (amount {})",
                    tx.description, tx.date, tx.amount
                );
                stats.malformed += 1;
                continue;
            }
            by_description
                .entry(tx.group_label())
                .or_default()
                .push(tx);
        }
        stats.groups = by_description.len();

        let mut patterns = Vec::new();
        for (description, group) in by_description {
            if group.len() < self.config.min_occurrences {
                stats.too_few += 1;
                continue;
            }

            match self.analyze_group(description, group) {
                Ok(pattern) => {
                    debug!(
                        "Recurring: {} @ {:.2}/{} ({} occurrences, next {})",
                        pattern.description,
                        pattern.average_amount,
                        pattern.frequency,
                        pattern.occurrences,
                        pattern.next_occurrence
                    );
                    patterns.push(pattern);
                }
                Err(Rejection::Irregular) => stats.irregular += 1,
                Err(Rejection::OutOfRange) => stats.out_of_range += 1,
            }
        }

        sort_by_savings(&mut patterns);
        stats.detected = patterns.len();

        info!(
            "Detection complete: {} transactions, {} groups, {} recurring ({} too few, {} irregular, {} out of range, {} malformed)",
            stats.transactions,
            stats.groups,
            stats.detected,
            stats.too_few,
            stats.irregular,
            stats.out_of_range,
            stats.malformed
        );

        DetectionRun { patterns, stats }
    }

    /// Build a pattern for one description group
    fn analyze_group(
        &self,
        description: &str,
        mut group: Vec<&Transaction>,
    ) -> std::result::Result<RecurringPattern, Rejection> {
        group.sort_by_key(|t| t.date);

        let gaps: Vec<f64> = group
            .windows(2)
            .map(|w| (w[1].date - w[0].date).num_days() as f64)
            .collect();
        if gaps.is_empty() {
            return Err(Rejection::Irregular);
        }

        let mean_gap = mean(&gaps);
        if let Some(outlier) = gaps
            .iter()
            .find(|gap| (*gap - mean_gap).abs() > self.config.tolerance_days)
        {
            debug!(
                "Skipping {} - gap of {} days is more than {} days from mean {:.1}",
                description, outlier, self.config.tolerance_days, mean_gap
            );
            return Err(Rejection::Irregular);
        }

        let frequency = self.classify(mean_gap);
        let amounts: Vec<f64> = group.iter().map(|t| t.amount).collect();
        let average_amount = mean(&amounts);
        let last_occurrence = group.last().ok_or(Rejection::Irregular)?.date;

        let Some(next_occurrence) = next_occurrence(last_occurrence, frequency) else {
            debug!(
                "Skipping {} - next occurrence after {} is out of range",
                description, last_occurrence
            );
            return Err(Rejection::OutOfRange);
        };

        Ok(RecurringPattern {
            description: description.to_string(),
            average_amount,
            frequency,
            last_occurrence,
            next_occurrence,
            estimated_monthly_savings: self.monthly_amount(average_amount, frequency),
            occurrences: group.len(),
            average_interval_days: mean_gap,
        })
    }

    /// Classify a mean gap (in days) into a cadence
    pub fn classify(&self, mean_gap_days: f64) -> Frequency {
        if mean_gap_days <= self.config.daily_max_days {
            Frequency::Daily
        } else if mean_gap_days <= self.config.weekly_max_days {
            Frequency::Weekly
        } else if mean_gap_days <= self.config.monthly_max_days {
            Frequency::Monthly
        } else {
            Frequency::Yearly
        }
    }

    /// Normalize a per-occurrence amount to a monthly rate
    pub fn monthly_amount(&self, amount: f64, frequency: Frequency) -> f64 {
        match frequency {
            Frequency::Daily => amount * self.config.days_per_month,
            Frequency::Weekly => amount * self.config.weeks_per_month,
            Frequency::Monthly => amount,
            Frequency::Yearly => amount / self.config.months_per_year,
        }
    }
}

/// Detect recurring patterns with the default configuration
pub fn detect(transactions: &[Transaction]) -> Vec<RecurringPattern> {
    RecurrenceDetector::new().detect(transactions)
}

/// Date one period after `last`
///
/// Months and years are calendar-aware; Jan 31 + 1 month is the last day of
/// February.
pub fn next_occurrence(last: NaiveDate, frequency: Frequency) -> Option<NaiveDate> {
    match frequency {
        Frequency::Daily => last.checked_add_signed(Duration::days(1)),
        Frequency::Weekly => last.checked_add_signed(Duration::days(7)),
        Frequency::Monthly => last.checked_add_months(Months::new(1)),
        Frequency::Yearly => last.checked_add_months(Months::new(12)),
    }
}

/// Descending by estimated monthly savings, then by description
fn sort_by_savings(patterns: &mut [RecurringPattern]) {
    patterns.sort_by(|a, b| {
        b.estimated_monthly_savings
            .partial_cmp(&a.estimated_monthly_savings)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.description.cmp(&b.description))
    });
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
