use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Where the bridge listens for the scanner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListenerSettings {
    pub bind_addr: String,
    pub port: u16,
    /// Optional receive timeout. `None` blocks indefinitely, so a silent
    /// peer holds the session open until it disconnects.
    pub read_timeout_secs: Option<u64>,
}

impl Default for ListenerSettings {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0".into(),
            port: 5000,
            read_timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DatabaseSettings {
    pub path: PathBuf,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("scans.sqlite3"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub listener: ListenerSettings,
    pub database: DatabaseSettings,
}

impl Settings {
    /// Loads settings from a JSON file. A missing file falls back to the
    /// defaults above; a file that exists but does not parse is a startup
    /// error, so a typo never silently reverts the deployment to defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings from {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse settings from {}", path.display()))
    }
}
