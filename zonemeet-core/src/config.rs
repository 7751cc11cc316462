//! Global zonemeet configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{SchedError, SchedResult};

static DEFAULT_DATA_PATH: &str = "~/.zonemeet/data";

/// Default port the HTTP server binds to.
pub const DEFAULT_PORT: u16 = 5000;

fn default_data_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_PATH)
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

/// Global configuration at ~/.config/zonemeet/config.toml
#[derive(Serialize, Deserialize, Clone)]
pub struct ZonemeetConfig {
    /// Where the JSON collections (profiles, events, logs) live.
    #[serde(default = "default_data_path")]
    pub data_dir: PathBuf,

    /// Port for zonemeet-server.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ZonemeetConfig {
    fn default() -> Self {
        ZonemeetConfig {
            data_dir: default_data_path(),
            port: DEFAULT_PORT,
        }
    }
}

impl ZonemeetConfig {
    pub fn config_path() -> SchedResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| SchedError::Config("Could not determine config directory".into()))?
            .join("zonemeet");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config, writing a default file on first use.
    pub fn load() -> SchedResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        let config: ZonemeetConfig = config::Config::builder()
            .add_source(config::File::from(config_path).required(false))
            .build()
            .map_err(|e| SchedError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| SchedError::Config(e.to_string()))?;

        Ok(config)
    }

    /// The data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str =
            shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    /// Save the current config to ~/.config/zonemeet/config.toml
    pub fn save(&self) -> SchedResult<()> {
        let config_path = Self::config_path()?;

        let content =
            toml::to_string_pretty(self).map_err(|e| SchedError::Config(e.to_string()))?;

        std::fs::write(&config_path, content)
            .map_err(|e| SchedError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    fn create_default_config(path: &std::path::Path) -> SchedResult<()> {
        let contents = format!(
            "\
# zonemeet configuration

# Where profiles, events, and change logs are stored:
# data_dir = \"{}\"

# Port for zonemeet-server:
# port = {}
",
            DEFAULT_DATA_PATH, DEFAULT_PORT
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| SchedError::Config(format!("Could not create config directory: {e}")))?;
        }

        std::fs::write(path, contents)
            .map_err(|e| SchedError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
