//! Error types for configuration loading.
//!
//! Invariants:
//! - All error variants include context for debugging (variable names, paths, etc.).
//! - No variant ever carries a password or a raw `.env` line.

use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },

    #[error("Base URL is required. Set ARCSIGHT_BASE_URL or pass --base-url.")]
    MissingBaseUrl,

    #[error("Credentials are required (ARCSIGHT_USERNAME and ARCSIGHT_PASSWORD)")]
    MissingAuth,

    #[error("Failed to read config file at {path}: {kind}")]
    ConfigFileRead { path: PathBuf, kind: ErrorKind },

    #[error("Failed to parse config file at {path}: {message}")]
    ConfigFileParse { path: PathBuf, message: String },

    #[error("invalid timeout: {message}")]
    InvalidTimeout { message: String },

    #[error("invalid poll configuration: {message}")]
    InvalidPoll { message: String },

    /// Failed to parse the `.env` file due to invalid syntax.
    ///
    /// SAFETY: This error only includes the byte index of the parse failure,
    /// NOT the offending line content, to prevent leaking secrets.
    #[error(
        "Failed to parse .env file at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip .env loading"
    )]
    DotenvParse { error_index: usize },

    /// Failed to read the `.env` file due to an I/O error.
    #[error("Failed to read .env file: {kind}")]
    DotenvIo { kind: ErrorKind },

    /// Unknown dotenv error (future variants from dotenvy crate).
    #[error("Failed to load .env file. Hint: set DOTENV_DISABLED=1 to skip .env loading")]
    DotenvUnknown,
}
