//! Login service endpoints.

use arcsight_config::LoginDialect;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde_json::json;
use tracing::debug;

use super::{LOGIN_PATH, LOGOUT_PATH, send_request};
use crate::auth::{Credentials, SessionToken, parse_login_response};
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;

/// Log in and return the session token.
///
/// # Errors
///
/// Any non-2xx answer becomes [`ClientError::AuthFailed`]; transport errors
/// are returned as-is.
pub async fn login(
    client: &Client,
    base_url: &str,
    credentials: &Credentials,
    dialect: LoginDialect,
    metrics: Option<&MetricsCollector>,
) -> Result<SessionToken> {
    debug!(username = %credentials.username, %dialect, "Logging in to ArcSight Logger");

    let url = format!("{}{}", base_url, LOGIN_PATH);
    let password = credentials.password.expose_secret();
    let builder = match dialect {
        LoginDialect::Form => client.post(&url).form(&[
            ("login", credentials.username.as_str()),
            ("password", password),
        ]),
        LoginDialect::Json => client.post(&url).json(&json!({
            "log.login": {
                "log.login": credentials.username,
                "log.password": password,
            }
        })),
    };

    let response = send_request(builder, LOGIN_PATH, metrics)
        .await
        .map_err(|e| match e {
            ClientError::ApiError {
                status, message, ..
            } => ClientError::AuthFailed(format!("login rejected (HTTP {}): {}", status, message)),
            other => other,
        })?;

    let body = response.text().await?;
    parse_login_response(&body)
}

/// Invalidate a session token.
pub async fn logout(
    client: &Client,
    base_url: &str,
    token: &SessionToken,
    dialect: LoginDialect,
    metrics: Option<&MetricsCollector>,
) -> Result<()> {
    debug!(%dialect, "Logging out of ArcSight Logger");

    let url = format!("{}{}", base_url, LOGOUT_PATH);
    let builder = match dialect {
        LoginDialect::Form => client
            .post(&url)
            .form(&[("authToken", token.expose_secret())]),
        LoginDialect::Json => client.post(&url).json(&json!({
            "log.logout": { "log.authToken": token.expose_secret() }
        })),
    };

    send_request(builder, LOGOUT_PATH, metrics).await?;
    Ok(())
}
