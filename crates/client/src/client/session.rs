//! Login and logout for [`LoggerClient`].
//!
//! # Invariants
//! - A failed login leaves the stored token untouched.
//! - Logout clears the stored token before contacting the server, so the
//!   client is unauthenticated afterwards even if the server call fails.

use tracing::info;

use crate::auth::SessionToken;
use crate::client::LoggerClient;
use crate::endpoints;
use crate::error::{ClientError, Result};

impl LoggerClient {
    /// Log in with the configured credentials and store the session token.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::AuthFailed`] if no credentials were configured or
    /// the Logger rejected them.
    pub async fn login(&mut self) -> Result<SessionToken> {
        let credentials = self.session.credentials().ok_or_else(|| {
            ClientError::AuthFailed("no credentials configured for login".to_string())
        })?;

        let token = endpoints::login(
            &self.http,
            &self.base_url,
            credentials,
            self.dialect,
            self.metrics.as_ref(),
        )
        .await?;

        info!(username = %credentials.username, "Logged in to ArcSight Logger");
        self.session.set_token(token.clone());
        Ok(token)
    }

    /// Invalidate the current session token.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotAuthenticated`] if there is no token to invalidate.
    pub async fn logout(&mut self) -> Result<()> {
        let token = self
            .session
            .take_token()
            .ok_or(ClientError::NotAuthenticated)?;

        endpoints::logout(
            &self.http,
            &self.base_url,
            &token,
            self.dialect,
            self.metrics.as_ref(),
        )
        .await?;

        info!("Logged out of ArcSight Logger");
        Ok(())
    }
}
