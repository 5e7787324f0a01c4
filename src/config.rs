//! External configuration for a scenario run.
//!
//! The scenario core treats configuration as read-only input: it supplies
//! the namespaced subcommand plus the scenario's name and base directory,
//! and nothing else.
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// File looked up in the scenario directory for optional overrides.
pub const CONFIG_FILE_NAME: &str = "crucible.json";

/// Read-only configuration handed to the scenario core.
#[derive(Debug, Clone)]
pub struct Config {
    /// Namespaced subcommand identifier, e.g. `crucible.command.test`.
    pub subcommand: String,
    pub scenario_name: String,
    pub scenario_directory: PathBuf,
}

impl Config {
    /// Build configuration for a requested action, applying any overrides
    /// found in `crucible.json` under the scenario directory.
    pub fn resolve(
        action: &str,
        scenario_name: String,
        scenario_directory: PathBuf,
    ) -> Result<Self> {
        let mut config = Self {
            subcommand: format!("crucible.command.{action}"),
            scenario_name,
            scenario_directory,
        };
        if let Some(file) = load_config_file(&config.scenario_directory)? {
            if let Some(name) = file.scenario_name {
                config.scenario_name = name;
            }
        }
        Ok(config)
    }
}

/// On-disk overrides; every field optional so an empty object is valid.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    scenario_name: Option<String>,
}

fn load_config_file(directory: &Path) -> Result<Option<ConfigFile>> {
    let path = directory.join(CONFIG_FILE_NAME);
    if !path.is_file() {
        return Ok(None);
    }
    let raw =
        fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let file = serde_json::from_str(&raw)
        .with_context(|| format!("parse {}", path.display()))?;
    Ok(Some(file))
}
