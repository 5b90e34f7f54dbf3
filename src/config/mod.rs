use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::output::OutputFormat;

/// Persisted defaults for the CLI. Command-line flags override everything in
/// here; the library never reads this file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Transcript fetch settings
    pub transcript: TranscriptConfig,

    /// Transport settings applied to every request
    pub transport: TransportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptConfig {
    /// Default caption language code
    pub default_language: String,

    /// Default output format ("json", "text" or "xml")
    pub default_format: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Proxy URL for all requests
    pub proxy: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,

    /// User-Agent override
    pub user_agent: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            transcript: TranscriptConfig::default(),
            transport: TransportConfig::default(),
        }
    }
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            default_language: "en".to_string(),
            default_format: "json".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file, or create a default config file on
    /// first run.
    pub fn load() -> Result<Self> {
        let Some(path) = Self::config_path() else {
            return Ok(Self::default());
        };

        if path.exists() {
            Self::load_from(&path)
        } else {
            let config = Self::default();
            config.save_to(&path)?;
            Ok(config)
        }
    }

    fn load_from(path: &Path) -> Result<Self> {
        let content = fs_err::read_to_string(path).context("Failed to read config file")?;
        let config: Config =
            serde_yaml::from_str(&content).context("Failed to parse config file")?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path().context("Could not determine config directory")?;
        self.save_to(&path)
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs_err::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;
        fs_err::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// Get the configuration file path. A `config.yaml` in the current
    /// directory wins over the user config directory.
    fn config_path() -> Option<PathBuf> {
        let local_config = PathBuf::from("config.yaml");
        if local_config.exists() {
            return Some(local_config);
        }

        Some(dirs::config_dir()?.join("yt-transcript").join("config.yaml"))
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        self.transcript
            .default_format
            .parse::<OutputFormat>()
            .with_context(|| {
                format!(
                    "unsupported default_format '{}' in config",
                    self.transcript.default_format
                )
            })?;

        if let Some(proxy) = &self.transport.proxy {
            crate::utils::validate_proxy_url(proxy)?;
        }

        Ok(())
    }
}
