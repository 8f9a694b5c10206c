//! Recur CLI - Recurring charge detector
//!
//! Usage:
//!   recur detect --file CSV          Detect recurring charges
//!   recur config                     Show the effective detection config
//!   recur project goal ...           Months until a savings goal
//!   recur project retirement ...     Retirement savings projection
//!   recur debt --file debts.json     Debt payoff plan

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Logs go to stderr so `--format json` output stays parseable
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    let config = cli.config.as_deref();

    match cli.command {
        Commands::Detect {
            file,
            layout,
            format,
            min_occurrences,
            tolerance_days,
        } => commands::cmd_detect(
            config,
            &file,
            layout.as_deref(),
            format.parse()?,
            commands::DetectOverrides {
                min_occurrences,
                tolerance_days,
            },
        ),
        Commands::Config { path } => commands::cmd_config(config, path),
        Commands::Project { kind } => match kind {
            ProjectKind::Goal {
                target,
                current,
                monthly,
                rate,
            } => commands::cmd_project_goal(target, current, monthly, rate),
            ProjectKind::Retirement {
                current_age,
                retirement_age,
                savings,
                monthly,
                rate,
                income,
                withdrawal_rate,
            } => commands::cmd_project_retirement(&recur_core::RetirementInput {
                current_age,
                retirement_age,
                current_savings: savings,
                monthly_contribution: monthly,
                annual_return_rate: rate / 100.0,
                desired_annual_income: income,
                withdrawal_rate: withdrawal_rate / 100.0,
            }),
        },
        Commands::Debt {
            file,
            strategy,
            extra,
            format,
        } => commands::cmd_debt(&file, strategy.as_deref(), extra, format.parse()?),
    }
}
