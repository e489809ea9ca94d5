//! Configuration utilities

use crate::defaults;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Filtering and scoring settings
    pub pipeline: PipelineConfig,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Pipeline settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Messages must mention at least one of these (case-insensitive)
    pub keywords: BTreeSet<String>,
    /// ISO 639-1 code of the language to keep
    pub language_code: String,
    /// Score messages on the rayon thread pool
    pub parallel: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            keywords: defaults::KEYWORDS.iter().map(|k| k.to_string()).collect(),
            language_code: defaults::LANGUAGE_CODE.to_string(),
            parallel: false,
        }
    }
}

impl PipelineConfig {
    /// Replace the keyword set
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().to_lowercase())
            .collect();
        self
    }

    /// Set the target language
    pub fn with_language(mut self, code: &str) -> Self {
        self.language_code = code.to_string();
        self
    }

    /// Enable or disable parallel scoring
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error); `RUST_LOG` takes precedence
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json_format: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

/// On-disk config encodings, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
    Yaml,
}

impl ConfigFormat {
    /// Format for `path`, from its extension
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        match ext {
            "json" => Ok(ConfigFormat::Json),
            "toml" => Ok(ConfigFormat::Toml),
            "yaml" | "yml" => Ok(ConfigFormat::Yaml),
            _ => Err(ConfigError::UnsupportedFormat(ext.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigFormat::Json => "json",
            ConfigFormat::Toml => "toml",
            ConfigFormat::Yaml => "yaml",
        }
    }
}

type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Load configuration from a `.json`, `.toml` or `.yaml` file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();
    let format = ConfigFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let parsed: Result<AppConfig, BoxedError> = match format {
        ConfigFormat::Json => serde_json::from_str(&content).map_err(Into::into),
        ConfigFormat::Toml => toml::from_str(&content).map_err(Into::into),
        ConfigFormat::Yaml => serde_yaml::from_str(&content).map_err(Into::into),
    };

    parsed.map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        format: format.as_str(),
        source,
    })
}

/// Save configuration, encoded according to the file extension
pub fn save_config<P: AsRef<Path>>(config: &AppConfig, path: P) -> Result<(), ConfigError> {
    let path = path.as_ref();
    let format = ConfigFormat::from_path(path)?;

    let encoded: Result<String, BoxedError> = match format {
        ConfigFormat::Json => serde_json::to_string_pretty(config).map_err(Into::into),
        ConfigFormat::Toml => toml::to_string_pretty(config).map_err(Into::into),
        ConfigFormat::Yaml => serde_yaml::to_string(config).map_err(Into::into),
    };
    let content = encoded.map_err(|source| ConfigError::Serialize {
        format: format.as_str(),
        source,
    })?;

    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Reading or writing the file failed
    #[error("config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File contents are not a valid config in its format
    #[error("invalid {format} config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        format: &'static str,
        #[source]
        source: BoxedError,
    },

    #[error("failed to encode config as {format}: {source}")]
    Serialize {
        format: &'static str,
        #[source]
        source: BoxedError,
    },

    /// Extension is not one of json, toml, yaml, yml
    #[error("unsupported config format: {0:?}")]
    UnsupportedFormat(String),
}
