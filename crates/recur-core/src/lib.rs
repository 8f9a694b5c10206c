//! Recur Core Library
//!
//! Shared functionality for the Recur personal finance tool:
//! - Recurring charge detection with monthly savings estimates
//! - Layered detection configuration (embedded defaults, TOML overrides)
//! - CSV and JSON transaction loading for various bank formats
//! - Savings goal and retirement projections
//! - Debt payoff estimation (snowball and avalanche)

pub mod config;
pub mod debt;
pub mod detect;
pub mod error;
pub mod import;
pub mod models;
pub mod projection;

pub use config::{load_config, ConfigFile, ConfigSource, LoadedConfig};
pub use debt::{plan_payoff, Debt, DebtPayoff, PayoffPlan, PayoffStrategy};
pub use detect::{detect, DetectionConfig, DetectionRun, DetectionStats, RecurrenceDetector};
pub use error::{Error, Result};
pub use import::{CsvLayout, ImportReport, MergeResult, SkippedRow};
pub use models::{Frequency, RecurringPattern, Transaction};
pub use projection::{project_retirement, RetirementInput, RetirementProjection};
