use thiserror::Error;

use crate::app_config::AppConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a configured value cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a configured value cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// The parsing/validation logic is decoupled from the real environment so it
/// can be tested with a plain `HashMap` lookup.
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

    let log_level = or_default("ASINSCAN_LOG_LEVEL", "info");

    let request_timeout_secs = parse_u64("ASINSCAN_REQUEST_TIMEOUT_SECS", "15")?;
    let max_retries = parse_u32("ASINSCAN_MAX_RETRIES", "5")?;
    let retry_delay_secs = parse_u64("ASINSCAN_RETRY_DELAY_SECS", "3")?;

    let delay_min = parse_u64("ASINSCAN_REQUEST_DELAY_MIN_MS", "1000")?;
    let delay_max = parse_u64("ASINSCAN_REQUEST_DELAY_MAX_MS", "3000")?;
    if delay_min >= delay_max {
        return Err(ConfigError::InvalidEnvVar {
            var: "ASINSCAN_REQUEST_DELAY_MAX_MS".to_string(),
            reason: format!("delay range is empty: {delay_min}..{delay_max}"),
        });
    }

    let webdriver_url = or_default("ASINSCAN_WEBDRIVER_URL", "http://localhost:4444");
    let portal_url = or_default("ASINSCAN_PORTAL_URL", "https://members.helium10.com");
    let discovery_result_timeout_secs = parse_u64("ASINSCAN_DISCOVERY_RESULT_TIMEOUT_SECS", "120")?;
    let discovery_wait_timeout_secs = parse_u64("ASINSCAN_DISCOVERY_WAIT_TIMEOUT_SECS", "30")?;

    let portal_email = lookup("ASINSCAN_PORTAL_EMAIL").ok();
    let portal_password = lookup("ASINSCAN_PORTAL_PASSWORD").ok();

    Ok(AppConfig {
        log_level,
        request_timeout_secs,
        max_retries,
        retry_delay_secs,
        request_delay_ms: delay_min..delay_max,
        webdriver_url,
        portal_url,
        discovery_result_timeout_secs,
        discovery_wait_timeout_secs,
        portal_email,
        portal_password,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
