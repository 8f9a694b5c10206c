//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `config` - Show the effective detection config
//! - `debt` - Debt payoff plans (snowball, avalanche)
//! - `detect` - Load transaction files and detect recurring charges
//! - `project` - Savings goal and retirement projections

pub mod config;
pub mod debt;
pub mod detect;
pub mod project;

// Re-export command functions for main.rs
pub use config::*;
pub use debt::*;
pub use detect::*;
pub use project::*;

use std::str::FromStr;

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            _ => Err(anyhow::anyhow!(
                "Unknown format: {} (use table or json)",
                s
            )),
        }
    }
}

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Format a signed amount as currency (-$39.90)
pub fn money(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${:.2}", amount.abs())
    } else {
        format!("${:.2}", amount)
    }
}
