//! Detection configuration loading
//!
//! ## Configuration Resolution
//!
//! Config is resolved in this order, first match wins:
//! 1. An explicit path passed by the caller (must exist)
//! 2. The `RECUR_CONFIG` environment variable
//! 3. The override file in the data dir (~/.local/share/recur/config/detection.toml)
//! 4. Embedded defaults (compiled into binary)
//!
//! Keys missing from a file keep their default values.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::detect::DetectionConfig;
use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
pub const DEFAULT_CONFIG: &str = include_str!("../../../config/detection.toml");

/// Environment variable naming a config file
pub const CONFIG_ENV: &str = "RECUR_CONFIG";

/// Where the effective configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicit path or `RECUR_CONFIG`
    File(PathBuf),
    /// Override file in the data dir
    DataDir(PathBuf),
    /// Compiled-in defaults
    Embedded,
}

impl ConfigSource {
    pub fn describe(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::DataDir(path) => format!("{} (data dir)", path.display()),
            Self::Embedded => "embedded defaults".to_string(),
        }
    }
}

/// On-disk layout of a config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub detection: DetectionConfig,
}

impl ConfigFile {
    /// Parse and validate TOML config text
    pub fn parse(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content)?;
        file.detection.validate()?;
        Ok(file)
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }
}

/// A loaded configuration and its origin
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub file: ConfigFile,
    pub source: ConfigSource,
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("recur").join("config").join("detection.toml"))
}

/// Load configuration using the resolution order described above
pub fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig> {
    let env_path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    resolve(explicit, env_path.as_deref(), default_config_path().as_deref())
}

fn resolve(
    explicit: Option<&Path>,
    env_path: Option<&Path>,
    data_dir_path: Option<&Path>,
) -> Result<LoadedConfig> {
    if let Some(path) = explicit.or(env_path) {
        if !path.exists() {
            return Err(Error::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        return Ok(LoadedConfig {
            file: read_config(path)?,
            source: ConfigSource::File(path.to_path_buf()),
        });
    }

    if let Some(path) = data_dir_path.filter(|p| p.exists()) {
        return Ok(LoadedConfig {
            file: read_config(path)?,
            source: ConfigSource::DataDir(path.to_path_buf()),
        });
    }

    debug!("Using embedded detection config");
    Ok(LoadedConfig {
        file: ConfigFile::parse(DEFAULT_CONFIG)?,
        source: ConfigSource::Embedded,
    })
}

fn read_config(path: &Path) -> Result<ConfigFile> {
    debug!("Loading detection config from {}", path.display());
    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
    ConfigFile::parse(&content)
}
