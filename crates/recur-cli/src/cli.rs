//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Recur - Find recurring charges and what cancelling them would save
#[derive(Parser)]
#[command(name = "recur")]
#[command(about = "Recurring charge detector and savings calculator", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Detection config file
    ///
    /// Takes precedence over RECUR_CONFIG and the override file in the data
    /// directory (~/.local/share/recur/config/detection.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Detect recurring charges in transaction files
    Detect {
        /// CSV or JSON file to read (repeat for several statements)
        #[arg(short, long, required = true)]
        file: Vec<PathBuf>,

        /// CSV layout: generic, chase, bofa, amex, capitalone (auto-detected if not specified)
        #[arg(short, long)]
        layout: Option<String>,

        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,

        /// Override the minimum occurrences per description
        #[arg(long)]
        min_occurrences: Option<usize>,

        /// Override the allowed deviation (days) from the mean gap
        #[arg(long)]
        tolerance_days: Option<f64>,
    },

    /// Show the effective detection config
    Config {
        /// Print only where the config was loaded from
        #[arg(long)]
        path: bool,
    },

    /// Savings projections
    Project {
        #[command(subcommand)]
        kind: ProjectKind,
    },

    /// Estimate a debt payoff plan
    Debt {
        /// JSON file with an array of {name, balance, annualRate, minimumPayment}
        /// (annualRate as a fraction, e.g. 0.199)
        #[arg(short, long)]
        file: PathBuf,

        /// Strategy: snowball, avalanche (both compared if not specified)
        #[arg(short, long)]
        strategy: Option<String>,

        /// Extra amount paid each month on top of the minimums
        #[arg(long, default_value = "0")]
        extra: f64,

        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },
}

#[derive(Subcommand)]
pub enum ProjectKind {
    /// Months until a savings goal is reached
    Goal {
        /// Goal amount
        #[arg(long)]
        target: f64,

        /// Amount already saved
        #[arg(long, default_value = "0")]
        current: f64,

        /// Monthly contribution
        #[arg(long)]
        monthly: f64,

        /// Annual return in percent (7 = 7%)
        #[arg(long, default_value = "0")]
        rate: f64,
    },

    /// Savings at retirement versus what the desired income needs
    Retirement {
        #[arg(long)]
        current_age: u32,

        #[arg(long, default_value = "65")]
        retirement_age: u32,

        /// Current retirement savings
        #[arg(long, default_value = "0")]
        savings: f64,

        /// Monthly contribution
        #[arg(long)]
        monthly: f64,

        /// Annual return in percent (7 = 7%)
        #[arg(long, default_value = "7")]
        rate: f64,

        /// Desired yearly income in retirement
        #[arg(long)]
        income: f64,

        /// Yearly withdrawal rate in percent
        #[arg(long, default_value = "4")]
        withdrawal_rate: f64,
    },
}
