//! Configuration management for the ArcSight Logger client.
//!
//! This crate provides types and loaders for building Logger connection,
//! credential and polling configuration from builder overrides, environment
//! variables, `.env` files and a JSON config file.

pub mod constants;
mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, FileConfig, env_var_or_none};
pub use types::{AuthConfig, Config, ConnectionConfig, LoginDialect, PollConfig};

#[cfg(test)]
pub(crate) mod test_util {
    use std::sync::{Mutex, OnceLock};

    pub fn global_test_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }
}
