//! Environment variable parsing for configuration.
//!
//! Responsibilities:
//! - Read and parse `ARCSIGHT_*` environment variables.
//! - Apply environment variable values to a ConfigLoader instance.
//!
//! Does NOT handle:
//! - Loading from config files (see file.rs).
//! - Building the final Config (see builder.rs).
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - Invalid values return ConfigError::InvalidValue naming the variable, never its value
//!   when the variable holds a secret.

use secrecy::SecretString;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;
use crate::types::LoginDialect;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn parse_env<T: FromStr>(var: &str, message: &str) -> Result<Option<T>, ConfigError> {
    env_var_or_none(var)
        .map(|raw| {
            raw.parse::<T>().map_err(|_| ConfigError::InvalidValue {
                var: var.to_string(),
                message: message.to_string(),
            })
        })
        .transpose()
}

/// Parse the boolean spellings the CLI accepts for the same variables.
fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "on" | "1" => Some(true),
        "false" | "f" | "no" | "n" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// Apply environment variable configuration to the loader.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if let Some(url) = env_var_or_none("ARCSIGHT_BASE_URL") {
        *loader.base_url_mut() = Some(url);
    }
    if let Some(username) = env_var_or_none("ARCSIGHT_USERNAME") {
        *loader.username_mut() = Some(username);
    }
    if let Some(password) = env_var_or_none("ARCSIGHT_PASSWORD") {
        *loader.password_mut() = Some(SecretString::new(password.into()));
    }
    if let Some(raw) = env_var_or_none("ARCSIGHT_SKIP_VERIFY") {
        let skip = parse_bool(&raw).ok_or_else(|| ConfigError::InvalidValue {
            var: "ARCSIGHT_SKIP_VERIFY".to_string(),
            message: "must be true/false, yes/no, on/off or 1/0".to_string(),
        })?;
        *loader.skip_verify_mut() = Some(skip);
    }
    if let Some(secs) = parse_env::<u64>("ARCSIGHT_TIMEOUT", "must be a number of seconds")? {
        *loader.timeout_mut() = Some(Duration::from_secs(secs));
    }
    if let Some(raw) = env_var_or_none("ARCSIGHT_LOGIN_DIALECT") {
        let dialect =
            LoginDialect::from_str(&raw).map_err(|message| ConfigError::InvalidValue {
                var: "ARCSIGHT_LOGIN_DIALECT".to_string(),
                message,
            })?;
        *loader.login_dialect_mut() = Some(dialect);
    }
    if let Some(secs) = parse_env::<u64>("ARCSIGHT_POLL_INTERVAL", "must be a number of seconds")?
    {
        *loader.poll_interval_mut() = Some(Duration::from_secs(secs));
    }
    if let Some(polls) = parse_env::<u32>("ARCSIGHT_MAX_POLLS", "must be a positive integer")? {
        *loader.max_polls_mut() = Some(polls);
    }
    if let Some(secs) = parse_env::<u64>("ARCSIGHT_MAX_WAIT", "must be a number of seconds")? {
        *loader.max_wait_mut() = Some(Duration::from_secs(secs));
    }

    if loader.config_path().is_none()
        && let Some(config_path) = env_var_or_none("ARCSIGHT_CONFIG_PATH")
    {
        loader.set_config_path(Some(PathBuf::from(config_path)));
    }

    Ok(())
}
