//! Configuration type definitions for the ArcSight Logger client.
//!
//! Responsibilities:
//! - Define configuration types for authentication, connections and search polling.
//! - Provide serialization helpers for sensitive types (secrets, durations).
//! - Ensure consistent defaults and type safety across the configuration system.
//!
//! Does NOT handle:
//! - Configuration loading from files or environment variables (see `loader` module).
//! - Actual network connections or authentication flows (see client crate).
//!
//! Invariants:
//! - All secret types use `secrecy::SecretString` to prevent accidental logging.
//! - All duration fields serialize as whole seconds.

mod auth;
mod connection;
mod poll;
pub(crate) mod serde_helpers;

pub use auth::AuthConfig;
pub use connection::{Config, ConnectionConfig, LoginDialect};
pub use poll::PollConfig;
