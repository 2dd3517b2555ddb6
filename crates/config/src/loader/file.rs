//! JSON config file support.
//!
//! Responsibilities:
//! - Define the on-disk `FileConfig` shape.
//! - Read and parse the file named by `--config-path` / `ARCSIGHT_CONFIG_PATH`.
//! - Fill loader settings that are still unset.
//!
//! Does NOT handle:
//! - Writing configuration files.
//! - Environment variables (see env.rs).
//!
//! Invariants:
//! - File values have the lowest precedence; they never replace a value already set.
//! - Parse errors report position only, never file content.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;
use crate::types::LoginDialect;

/// On-disk configuration. Every field is optional.
///
/// `password` is held as a `SecretString` so `Debug` output stays redacted.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub base_url: Option<String>,
    pub username: Option<String>,
    #[serde(
        default,
        with = "crate::types::serde_helpers::option_secret_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub password: Option<SecretString>,
    pub skip_verify: Option<bool>,
    pub timeout_seconds: Option<u64>,
    pub login_dialect: Option<String>,
    pub poll_interval_seconds: Option<u64>,
    pub max_polls: Option<u32>,
    pub max_wait_seconds: Option<u64>,
}

impl FileConfig {
    /// Read and parse a config file.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ConfigFileRead {
            path: path.to_path_buf(),
            kind: e.kind(),
        })?;

        serde_json::from_str(&content).map_err(|e| ConfigError::ConfigFileParse {
            path: path.to_path_buf(),
            message: format!("{:?} error at line {} column {}", e.classify(), e.line(), e.column()),
        })
    }
}

fn fill<T>(slot: &mut Option<T>, value: Option<T>) {
    if slot.is_none() {
        *slot = value;
    }
}

/// Apply the config file, if one is configured, to the loader.
pub fn apply_file(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    let Some(path) = loader.config_path().cloned() else {
        return Ok(());
    };

    let file = FileConfig::read(&path)?;
    tracing::debug!(path = %path.display(), "Loaded config file");

    let dialect = file
        .login_dialect
        .as_deref()
        .map(LoginDialect::from_str)
        .transpose()
        .map_err(|message| ConfigError::InvalidValue {
            var: "login_dialect".to_string(),
            message,
        })?;

    fill(loader.base_url_mut(), file.base_url);
    fill(loader.username_mut(), file.username);
    fill(loader.password_mut(), file.password);
    fill(loader.skip_verify_mut(), file.skip_verify);
    fill(
        loader.timeout_mut(),
        file.timeout_seconds.map(Duration::from_secs),
    );
    fill(loader.login_dialect_mut(), dialect);
    fill(
        loader.poll_interval_mut(),
        file.poll_interval_seconds.map(Duration::from_secs),
    );
    fill(loader.max_polls_mut(), file.max_polls);
    fill(
        loader.max_wait_mut(),
        file.max_wait_seconds.map(Duration::from_secs),
    );

    Ok(())
}
