//! Authentication configuration.
//!
//! Invariants:
//! - The password is held as a `SecretString` and never rendered by `Debug`.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use super::serde_helpers::secret_string;

/// Credentials used to obtain a Logger session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Logger user name.
    pub username: String,
    /// Logger password.
    #[serde(with = "secret_string")]
    pub password: SecretString,
}

impl AuthConfig {
    /// Create credentials from a username and password.
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }
}
