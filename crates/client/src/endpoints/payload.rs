//! JSON body construction for the `/server/search*` endpoints.
//!
//! Invariants:
//! - Every body carries `search_session_id` and `user_session_id`.
//! - Pass-through options are copied verbatim, but never replace a field the
//!   client itself sets.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{ClientError, Result};
use crate::models::SearchId;

/// Fields owned by the client; pass-through options may not set them.
pub const RESERVED_FIELDS: [&str; 3] = ["search_session_id", "user_session_id", "query"];

/// Builder for a search API request body.
#[derive(Debug, Clone)]
pub(crate) struct SearchPayload(Map<String, Value>);

impl SearchPayload {
    pub(crate) fn new(token: &str, search_id: SearchId) -> Self {
        let mut body = Map::new();
        body.insert("search_session_id".to_string(), Value::from(search_id.get()));
        body.insert("user_session_id".to_string(), Value::from(token));
        Self(body)
    }

    pub(crate) fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    /// Merge the non-empty fields of a typed options struct.
    pub(crate) fn with_options<T: Serialize>(mut self, options: &T) -> Result<Self> {
        match serde_json::to_value(options) {
            Ok(Value::Object(fields)) => {
                self.0.extend(fields);
                Ok(self)
            }
            Ok(_) => Err(ClientError::InvalidRequest(
                "options must serialize to a JSON object".to_string(),
            )),
            Err(e) => Err(ClientError::InvalidRequest(format!(
                "options could not be serialized: {}",
                e
            ))),
        }
    }

    /// Copy pass-through options into the body unmodified.
    ///
    /// # Errors
    ///
    /// [`ClientError::InvalidRequest`] if a key is reserved or already set by a typed option.
    pub(crate) fn with_extras(mut self, extras: &Map<String, Value>) -> Result<Self> {
        for (key, value) in extras {
            if RESERVED_FIELDS.contains(&key.as_str()) {
                return Err(ClientError::InvalidRequest(format!(
                    "option '{}' is set by the client and cannot be overridden",
                    key
                )));
            }
            if self.0.contains_key(key) {
                return Err(ClientError::InvalidRequest(format!(
                    "option '{}' given both as a typed option and as a pass-through option",
                    key
                )));
            }
            self.0.insert(key.clone(), value.clone());
        }
        Ok(self)
    }

    pub(crate) fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}
