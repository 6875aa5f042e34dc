use std::time::Duration;

use crate::app_config::{AppConfig, LastLoginPolicy};
use crate::ConfigError;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/117.0.0.0 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but its value is invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but its value is invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let log_level = or_default("VINTED_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("VINTED_REQUEST_TIMEOUT_SECS", "30")?;
    let connect_timeout_secs = parse_u64("VINTED_CONNECT_TIMEOUT_SECS", "10")?;
    let user_agent = or_default("VINTED_USER_AGENT", DEFAULT_USER_AGENT);
    let accept_language = or_default("VINTED_ACCEPT_LANGUAGE", "fr-FR,fr;q=0.5");
    let pauses = parse_pauses(&or_default("VINTED_PAUSE_SECS", "1,2,3"))?;
    let last_login_policy =
        parse_last_login_policy(&or_default("VINTED_LAST_LOGIN_POLICY", "lenient"))?;
    let wardrobe_page_size = parse_u32("VINTED_WARDROBE_PAGE_SIZE", "96")?;

    Ok(AppConfig {
        log_level,
        request_timeout_secs,
        connect_timeout_secs,
        user_agent,
        accept_language,
        pauses,
        last_login_policy,
        wardrobe_page_size,
    })
}

/// Parse a comma-separated list of whole seconds. Blank input yields no pauses.
fn parse_pauses(raw: &str) -> Result<Vec<Duration>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|e| ConfigError::InvalidEnvVar {
                    var: "VINTED_PAUSE_SECS".to_string(),
                    reason: format!("\"{s}\": {e}"),
                })
        })
        .collect()
}

fn parse_last_login_policy(s: &str) -> Result<LastLoginPolicy, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "lenient" => Ok(LastLoginPolicy::Lenient),
        "strict" => Ok(LastLoginPolicy::Strict),
        other => Err(ConfigError::InvalidEnvVar {
            var: "VINTED_LAST_LOGIN_POLICY".to_string(),
            reason: format!("expected \"lenient\" or \"strict\", got \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
