//! Recurring charge detection command

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use recur_core::{
    detect::{DetectionRun, RecurrenceDetector},
    import::{load_path, merge_files, CsvLayout},
    load_config,
};
use tracing::info;

use super::{money, truncate, OutputFormat};

/// Command-line overrides applied on top of the loaded config
#[derive(Debug, Clone, Copy, Default)]
pub struct DetectOverrides {
    pub min_occurrences: Option<usize>,
    pub tolerance_days: Option<f64>,
}

pub fn cmd_detect(
    config_path: Option<&Path>,
    files: &[PathBuf],
    layout: Option<&str>,
    format: OutputFormat,
    overrides: DetectOverrides,
) -> Result<()> {
    let run = run_detection(config_path, files, layout, overrides)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&run.patterns)?);
        }
        OutputFormat::Table => {
            print!("{}", render_patterns(&run));
        }
    }

    Ok(())
}

/// Load every file, merge overlapping rows, and run the detector
pub fn run_detection(
    config_path: Option<&Path>,
    files: &[PathBuf],
    layout: Option<&str>,
    overrides: DetectOverrides,
) -> Result<DetectionRun> {
    let loaded = load_config(config_path).context("Failed to load detection config")?;
    info!("Using detection config from {}", loaded.source.describe());

    let mut config = loaded.file.detection;
    if let Some(min) = overrides.min_occurrences {
        config.min_occurrences = min;
    }
    if let Some(tolerance) = overrides.tolerance_days {
        config.tolerance_days = tolerance;
    }
    config.validate().context("Invalid detection overrides")?;

    let layout = layout.map(str::parse::<CsvLayout>).transpose()?;

    let mut per_file = Vec::with_capacity(files.len());
    for file in files {
        let report = load_path(file, layout)
            .with_context(|| format!("Failed to load {}", file.display()))?;
        info!(
            "Loaded {} transactions from {} ({} skipped)",
            report.transactions.len(),
            file.display(),
            report.skipped.len()
        );
        per_file.push(report.transactions);
    }

    let merged = merge_files(per_file);
    if merged.duplicates > 0 {
        info!(
            "Ignored {} transactions repeated across files",
            merged.duplicates
        );
    }

    Ok(RecurrenceDetector::with_config(config).detect_with_stats(&merged.transactions))
}

/// Render detected patterns as a table
pub fn render_patterns(run: &DetectionRun) -> String {
    let mut out = String::new();

    if run.patterns.is_empty() {
        out.push_str("No recurring charges detected.\n");
        if run.stats.irregular > 0 {
            out.push_str(&format!(
                "   {} descriptions repeat but not on a regular schedule\n",
                run.stats.irregular
            ));
        }
        if run.stats.out_of_range > 0 {
            out.push_str(&format!(
                "   {} descriptions recur but their next date is out of range\n",
                run.stats.out_of_range
            ));
        }
        return out;
    }

    out.push('\n');
    out.push_str("🔁 Recurring Charges\n");
    out.push_str("   ─────────────────────────────────────────────────────────────────────\n");

    for p in &run.patterns {
        out.push_str(&format!(
            "   {:24} │ {:>10}/{:<7} │ last {} │ next {} │ {:>10}/mo\n",
            truncate(&p.description, 24),
            money(p.average_amount),
            p.frequency.as_str(),
            p.last_occurrence,
            p.next_occurrence,
            money(p.estimated_monthly_savings),
        ));
    }

    let total: f64 = run
        .patterns
        .iter()
        .map(|p| p.estimated_monthly_savings)
        .sum();
    out.push_str("   ─────────────────────────────────────────────────────────────────────\n");
    out.push_str(&format!(
        "   {} recurring charges from {} transactions, {}/mo in total\n",
        run.patterns.len(),
        run.stats.transactions,
        money(total)
    ));

    out
}
