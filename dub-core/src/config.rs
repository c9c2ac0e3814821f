use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Name of the per-directory state folder holding plans, logs and config.
pub const STATE_DIR: &str = ".dub";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DefaultsConfig {
    /// Default preview format: "table", "diff", "summary", "json" or "none"
    #[serde(default = "default_preview")]
    pub preview_format: String,

    /// Template used when no naming source is given
    #[serde(default = "default_template")]
    pub template: String,

    /// Whether to use color output by default (None = auto-detect)
    #[serde(default)]
    pub use_color: Option<bool>,

    /// Append every executed rename to .dub/logs/apply.log
    #[serde(default = "default_true")]
    pub write_log: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            preview_format: default_preview(),
            template: default_template(),
            use_color: None,
            write_log: true,
        }
    }
}

fn default_preview() -> String {
    "table".to_string()
}

fn default_template() -> String {
    "name_{index}".to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load config from .dub/config.toml if it exists
    pub fn load() -> Result<Self> {
        match std::env::current_dir() {
            Ok(cwd) => Self::load_in(&cwd),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Load config from `<working_dir>/.dub/config.toml`, defaults if absent
    pub fn load_in(working_dir: &Path) -> Result<Self> {
        let config_path = working_dir.join(STATE_DIR).join("config.toml");
        if config_path.exists() {
            return Self::load_from_path(&config_path);
        }

        Ok(Self::default())
    }

    /// Load config from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }
}
