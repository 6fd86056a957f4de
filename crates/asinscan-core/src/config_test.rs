use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn build_with(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    super::build_app_config(|key| map.get(key).cloned().ok_or(VarError::NotPresent))
}

#[test]
fn defaults_apply_when_env_is_empty() {
    let config = build_with(&[]).unwrap();
    assert_eq!(config.request_timeout_secs, 15);
    assert_eq!(config.max_retries, 5);
    assert_eq!(config.retry_delay_secs, 3);
    assert_eq!(config.request_delay_ms, 1000..3000);
    assert_eq!(config.webdriver_url, "http://localhost:4444");
    assert_eq!(config.portal_email, None);
}

#[test]
fn overrides_are_honored() {
    let config = build_with(&[
        ("ASINSCAN_MAX_RETRIES", "2"),
        ("ASINSCAN_RETRY_DELAY_SECS", "1"),
        ("ASINSCAN_PORTAL_EMAIL", "ops@example.com"),
    ])
    .unwrap();
    assert_eq!(config.max_retries, 2);
    assert_eq!(config.retry_delay_secs, 1);
    assert_eq!(config.portal_email.as_deref(), Some("ops@example.com"));
}

#[test]
fn invalid_numeric_value_is_rejected() {
    let err = build_with(&[("ASINSCAN_MAX_RETRIES", "often")]).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "ASINSCAN_MAX_RETRIES"));
}

#[test]
fn empty_delay_range_is_rejected() {
    let err = build_with(&[
        ("ASINSCAN_REQUEST_DELAY_MIN_MS", "3000"),
        ("ASINSCAN_REQUEST_DELAY_MAX_MS", "1000"),
    ])
    .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { .. }));
}

#[test]
fn debug_output_redacts_credentials() {
    let config = build_with(&[
        ("ASINSCAN_PORTAL_EMAIL", "ops@example.com"),
        ("ASINSCAN_PORTAL_PASSWORD", "hunter2"),
    ])
    .unwrap();
    let rendered = format!("{config:?}");
    assert!(!rendered.contains("ops@example.com"));
    assert!(!rendered.contains("hunter2"));
    assert!(rendered.contains("[redacted]"));
}
