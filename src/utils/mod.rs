//! Utility modules for common functionality

pub mod config;
pub mod logging;

pub use config::{load_config, save_config, AppConfig, ConfigError, ConfigFormat, LoggingSettings, PipelineConfig};
pub use logging::init_logging;
