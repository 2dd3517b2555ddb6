//! Credentials, session tokens and login response parsing.
//!
//! Invariants:
//! - Passwords and tokens are held as `SecretString` and never rendered by `Debug`.
//! - A session token is never empty.

use secrecy::{ExposeSecret, SecretString};
use std::fmt;

use crate::error::{ClientError, Result};

/// Username and password used to obtain a session token.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }
}

/// Opaque token issued by the Logger login service.
#[derive(Clone)]
pub struct SessionToken(SecretString);

impl SessionToken {
    /// Wrap an existing token, e.g. one printed by an earlier `login`.
    ///
    /// Returns `None` for an empty or whitespace-only value.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        let trimmed = token.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(SecretString::new(trimmed.into())))
        }
    }

    /// Reveal the raw token value.
    pub fn expose_secret(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken([REDACTED])")
    }
}

/// Holds the credentials and the current session token.
#[derive(Debug, Default)]
pub struct SessionManager {
    credentials: Option<Credentials>,
    session_token: Option<SessionToken>,
}

impl SessionManager {
    pub fn new(credentials: Option<Credentials>, session_token: Option<SessionToken>) -> Self {
        Self {
            credentials,
            session_token,
        }
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn token(&self) -> Option<&SessionToken> {
        self.session_token.as_ref()
    }

    /// The raw token for request payloads, or `NotAuthenticated`.
    pub fn bearer(&self) -> Result<&str> {
        self.session_token
            .as_ref()
            .map(SessionToken::expose_secret)
            .ok_or(ClientError::NotAuthenticated)
    }

    pub fn set_token(&mut self, token: SessionToken) {
        self.session_token = Some(token);
    }

    pub fn take_token(&mut self) -> Option<SessionToken> {
        self.session_token.take()
    }
}

/// Extract the session token from a login response body.
///
/// Accepted shapes:
/// - XML with a `<ns3:return>` (any namespace prefix) element
/// - JSON `{"log.loginResponse": {"log.return": "..."}}`
/// - a bare JSON string
pub fn parse_login_response(body: &str) -> Result<SessionToken> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(ClientError::InvalidResponse(
            "Empty login response".to_string(),
        ));
    }

    let raw = if trimmed.starts_with('<') {
        xml_element_text(trimmed, "return").ok_or_else(|| {
            ClientError::InvalidResponse("Missing return element in login response".to_string())
        })?
    } else {
        let value: serde_json::Value = serde_json::from_str(trimmed).map_err(|e| {
            ClientError::InvalidResponse(format!("Failed to parse login response: {}", e))
        })?;
        match &value {
            serde_json::Value::String(s) => s.clone(),
            other => other
                .get("log.loginResponse")
                .and_then(|r| r.get("log.return"))
                .and_then(|t| t.as_str())
                .map(str::to_string)
                .ok_or_else(|| {
                    ClientError::InvalidResponse(
                        "Missing log.loginResponse.log.return in login response".to_string(),
                    )
                })?,
        }
    };

    SessionToken::new(raw)
        .ok_or_else(|| ClientError::InvalidResponse("Login returned an empty token".to_string()))
}

/// Text of the first element whose local name is `local_name`, ignoring any
/// namespace prefix.
fn xml_element_text(doc: &str, local_name: &str) -> Option<String> {
    let mut rest = doc;
    while let Some(open) = rest.find('<') {
        let after = &rest[open + 1..];
        let close = after.find('>')?;
        let tag = &after[..close];
        let name = tag.split_whitespace().next().unwrap_or_default();
        let local = name.rsplit(':').next().unwrap_or(name);

        if !name.starts_with('/') && !tag.ends_with('/') && local == local_name {
            let body = &after[close + 1..];
            let end = body.find(&format!("</{name}>"))?;
            return Some(unescape_xml(strip_cdata(&body[..end])));
        }
        rest = &after[close + 1..];
    }
    None
}

fn strip_cdata(text: &str) -> &str {
    let text = text.trim();
    text.strip_prefix("<![CDATA[")
        .and_then(|t| t.strip_suffix("]]>"))
        .unwrap_or(text)
}

fn unescape_xml(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_xml_login_response() {
        let body = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<ns3:loginResponse xmlns:ns3="http://www.arcsight.com/logger/xsd"><ns3:return>tok-xml-123</ns3:return></ns3:loginResponse>"#;
        let token = parse_login_response(body).unwrap();
        assert_eq!(token.expose_secret(), "tok-xml-123");
    }

    #[test]
    fn test_parse_xml_other_prefix_and_cdata() {
        let body = "<a:loginResponse><a:return><![CDATA[tok&amp;1]]></a:return></a:loginResponse>";
        assert_eq!(parse_login_response(body).unwrap().expose_secret(), "tok&1");
    }

    #[test]
    fn test_parse_json_login_response() {
        let body = r#"{"log.loginResponse": {"log.return": "tok-json-456"}}"#;
        assert_eq!(
            parse_login_response(body).unwrap().expose_secret(),
            "tok-json-456"
        );
    }

    #[test]
    fn test_parse_bare_json_string() {
        assert_eq!(
            parse_login_response(r#""tok-bare""#).unwrap().expose_secret(),
            "tok-bare"
        );
    }

    #[test]
    fn test_parse_rejects_missing_and_empty_tokens() {
        assert!(matches!(
            parse_login_response(""),
            Err(ClientError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse_login_response(r#"{"unexpected": true}"#),
            Err(ClientError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse_login_response("<ns3:loginResponse><ns3:return>  </ns3:return></ns3:loginResponse>"),
            Err(ClientError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse_login_response("<html><body>Login page</body></html>"),
            Err(ClientError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_session_token_debug_is_redacted() {
        let token = SessionToken::new("very-secret-token").unwrap();
        let debug = format!("{:?}", token);
        assert!(!debug.contains("very-secret-token"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn test_session_manager_bearer_requires_token() {
        let mut manager = SessionManager::default();
        assert!(matches!(manager.bearer(), Err(ClientError::NotAuthenticated)));

        manager.set_token(SessionToken::new("t").unwrap());
        assert_eq!(manager.bearer().unwrap(), "t");

        assert!(manager.take_token().is_some());
        assert!(manager.token().is_none());
    }
}
