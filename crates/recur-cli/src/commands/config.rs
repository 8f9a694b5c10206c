//! Config command implementation

use std::path::Path;

use anyhow::{Context, Result};
use recur_core::{config::default_config_path, load_config};

pub fn cmd_config(config_path: Option<&Path>, path_only: bool) -> Result<()> {
    let loaded = load_config(config_path).context("Failed to load detection config")?;

    if path_only {
        println!("{}", loaded.source.describe());
        return Ok(());
    }

    println!("# Loaded from: {}", loaded.source.describe());
    if let Some(override_path) = default_config_path() {
        println!("# Override location: {}", override_path.display());
    }
    println!();
    print!("{}", loaded.file.to_toml()?);

    Ok(())
}
