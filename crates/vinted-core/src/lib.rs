mod app_config;
mod config;
mod summary;

use thiserror::Error;

pub use app_config::{AppConfig, LastLoginPolicy};
pub use config::{load_app_config, load_app_config_from_env};
pub use summary::ItemSummary;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
