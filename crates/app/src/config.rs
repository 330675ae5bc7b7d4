use anyhow::Context;
use grocer_import::SourceProfile;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_SOURCE: &str =
    "https://raw.githubusercontent.com/kv-hearst/cpi-grocery-calculator/main/data/clean_data.csv";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// URL or file path of the price table.
    pub location: String,
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            location: DEFAULT_SOURCE.to_string(),
            timeout_secs: 30,
        }
    }
}

impl SourceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub source: SourceConfig,
    pub profile: SourceProfile,
    pub log: LogConfig,
}

impl AppConfig {
    pub fn from_toml(toml_content: &str) -> anyhow::Result<Self> {
        toml::from_str(toml_content).context("Failed to parse config")
    }

    /// Loads `explicit` if given, else the per-user config file if one exists,
    /// else the built-in defaults.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            return Self::read(path);
        }
        match default_path() {
            Some(path) if path.exists() => Self::read(&path),
            _ => Ok(Self::default()),
        }
    }

    fn read(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("In {}", path.display()))
    }
}

/// `<config dir>/config.toml` for this user, if the platform has one.
pub fn default_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "grocer", "Grocer")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}
