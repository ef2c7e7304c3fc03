//! Configuration file loading for arthur.
//!
//! Discovers and loads `arthur.toml` from the working directory.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use arthur_domain::extensions::StaticRegistrations;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "arthur.toml";

/// Top-level configuration from arthur.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ArthurConfig {
    /// Properties handed to extensions (`annotation.classes.includes`, ...).
    pub properties: HashMap<String, String>,

    /// Declarative registrations for the static extension.
    pub register: StaticRegistrations,
}

/// Discover the arthur.toml config file in `dir`.
pub fn discover_config(dir: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse an arthur.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<ArthurConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

pub fn parse_config(contents: &str) -> anyhow::Result<ArthurConfig> {
    let config: ArthurConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from `dir`, or return default if not found.
pub fn load_or_default(dir: &Utf8Path) -> anyhow::Result<ArthurConfig> {
    match discover_config(dir) {
        Some(path) => load_config(&path),
        None => Ok(ArthurConfig::default()),
    }
}

/// Configuration after applying CLI overrides.
#[derive(Debug, Clone, Default)]
pub struct MergedConfig {
    pub properties: HashMap<String, String>,
    pub registrations: StaticRegistrations,
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: ArthurConfig,
}

impl ConfigMerger {
    pub fn new(config: ArthurConfig) -> Self {
        Self { config }
    }

    /// CLI properties replace file properties with the same key.
    pub fn merge_generate_args(self, cli_properties: &HashMap<String, String>) -> MergedConfig {
        let mut properties = self.config.properties;
        for (k, v) in cli_properties {
            properties.insert(k.clone(), v.clone());
        }

        MergedConfig {
            properties,
            registrations: self.config.register,
        }
    }
}

/// Parse CLI properties from key=value strings.
///
/// Only the first `=` splits, so values may contain `=` themselves.
pub fn parse_cli_params(params: &[String]) -> anyhow::Result<HashMap<String, String>> {
    let mut out = HashMap::new();
    for entry in params {
        let mut parts = entry.splitn(2, '=');
        let key = parts
            .next()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| anyhow::anyhow!("invalid property '{}': missing key", entry))?;
        let value = parts
            .next()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| anyhow::anyhow!("invalid property '{}': missing value", entry))?;
        out.insert(key.to_string(), value.to_string());
    }
    Ok(out)
}
