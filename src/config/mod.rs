use crate::api::DEFAULT_BASE_URL;
use anyhow::{Context, Result};
use config::{Config as ConfigLoader, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub compare: CompareConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_user_agent() -> String {
    format!("cryptoverse/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub refresh_rate_ms: u64,
    /// Coins shown on the home page
    pub home_coins: u32,
    /// Coins shown on the full listing
    pub list_coins: u32,
    /// Coins offered as comparison candidates
    pub compare_coins: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            refresh_rate_ms: 100,
            home_coins: 10,
            list_coins: 100,
            compare_coins: 50,
        }
    }
}

impl UiConfig {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.refresh_rate_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub debounce_ms: u64,
    pub dropdown_limit: usize,
    /// Queries shorter than this stay idle in the navigation dropdown
    pub dropdown_min_chars: usize,
    /// Same threshold for the full search page
    pub page_min_chars: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 500,
            dropdown_limit: 8,
            dropdown_min_chars: 3,
            page_min_chars: 2,
        }
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    pub max_selection: usize,
    /// Rough number of points drawn per comparison line
    pub target_points: usize,
    pub default_selection: Vec<String>,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            max_selection: 5,
            target_points: 50,
            default_selection: vec!["bitcoin".into(), "ethereum".into()],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// The TUI owns the terminal, so logs go to this file
    pub file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: "cryptoverse.log".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        let settings = ConfigLoader::builder()
            .add_source(File::from(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("CRYPTOVERSE")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("compare.default_selection")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        settings
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    fn config_path() -> PathBuf {
        // Try local config first, then default
        let local_config = PathBuf::from("config/default.toml");
        if local_config.exists() {
            return local_config;
        }

        // Fallback to executable directory
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let exe_config = exe_dir.join("config/default.toml");
                if exe_config.exists() {
                    return exe_config;
                }
            }
        }

        local_config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("missing.toml")).unwrap();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.search.debounce_ms, 500);
        assert_eq!(config.search.dropdown_limit, 8);
        assert_eq!(config.compare.max_selection, 5);
        assert_eq!(config.compare.default_selection, vec!["bitcoin", "ethereum"]);
        assert_eq!(config.ui.home_coins, 10);
    }

    #[test]
    fn test_file_overrides() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[api]
base_url = "http://localhost:8080/api/v3"

[search]
debounce_ms = 250
dropdown_limit = 5
dropdown_min_chars = 3
page_min_chars = 2

[compare]
max_selection = 3
target_points = 40
default_selection = ["solana"]
"#
        )
        .unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8080/api/v3");
        assert!(config.api.user_agent.starts_with("cryptoverse/"));
        assert_eq!(config.search.debounce(), Duration::from_millis(250));
        assert_eq!(config.compare.default_selection, vec!["solana"]);
        // Untouched sections keep their defaults
        assert_eq!(config.ui.list_coins, 100);
        assert_eq!(config.logging.file, "cryptoverse.log");
    }
}
