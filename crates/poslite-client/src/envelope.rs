//! # Response Envelope
//!
//! Every backend response is a JSON object with a `success` flag and the
//! payload under a resource key:
//!
//! ```text
//! { "success": true,  "products": [ ... ] }
//! { "success": true,  "sale": { ... } }
//! { "success": true }                              ← deletes
//! { "success": false, "message": "Not authenticated" }
//! ```
//!
//! The flag decides the outcome. HTTP status only matters when the body is
//! not an envelope at all.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{ClientError, ClientResult};

/// Message used when a failed envelope carries none.
const DEFAULT_FAILURE: &str = "Request failed";

/// Longest body excerpt kept in a [`ClientError::Status`].
const BODY_EXCERPT: usize = 200;

/// A decoded `success: true` response.
#[derive(Debug, Clone, Default)]
pub struct Envelope {
    fields: Map<String, Value>,
}

impl Envelope {
    /// Parses a raw response body.
    ///
    /// ## Returns
    /// * `Ok(Envelope)` - body was an object with `success: true`
    /// * `Err(Rejected)` - body was an envelope with `success` not `true`
    /// * `Err(Status)` - non-2xx status and the body is not JSON
    /// * `Err(Decode)` - 2xx status and the body is not a JSON object
    pub fn parse(status: u16, body: &[u8]) -> ClientResult<Self> {
        let value: Value = match serde_json::from_slice(body) {
            Ok(value) => value,
            Err(err) if (200..300).contains(&status) => return Err(err.into()),
            Err(_) => {
                let text = String::from_utf8_lossy(body);
                return Err(ClientError::Status {
                    status,
                    body: text.chars().take(BODY_EXCERPT).collect(),
                });
            }
        };

        let Value::Object(mut fields) = value else {
            return Err(ClientError::Decode("expected a JSON object".to_string()));
        };

        if fields.get("success").and_then(Value::as_bool) == Some(true) {
            fields.remove("success");
            return Ok(Envelope { fields });
        }

        let message = fields
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| DEFAULT_FAILURE.to_string());

        Err(ClientError::Rejected { message })
    }

    /// Removes and decodes the payload stored under `key`.
    ///
    /// A missing key and an explicit `null` are both [`ClientError::MissingPayload`].
    pub fn take<T: DeserializeOwned>(&mut self, key: &str) -> ClientResult<T> {
        match self.fields.remove(key) {
            None | Some(Value::Null) => Err(ClientError::missing(key)),
            Some(value) => Ok(serde_json::from_value(value)?),
        }
    }

    /// Optional human-readable message on a successful response.
    pub fn message(&self) -> Option<&str> {
        self.fields.get("message").and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_yields_payload() {
        let mut env = Envelope::parse(200, br#"{"success":true,"count":3}"#).unwrap();
        let count: u32 = env.take("count").unwrap();
        assert_eq!(count, 3);
    }

    #[test]
    fn test_success_flag_overrides_status() {
        let err = Envelope::parse(200, br#"{"success":false,"message":"Invalid report type"}"#)
            .unwrap_err();
        assert!(matches!(err, ClientError::Rejected { ref message } if message == "Invalid report type"));

        let err = Envelope::parse(401, br#"{"success":false,"message":"Not authenticated"}"#)
            .unwrap_err();
        assert_eq!(err.to_string(), "Not authenticated");
    }

    #[test]
    fn test_missing_success_flag_is_failure() {
        let err = Envelope::parse(200, br#"{"products":[]}"#).unwrap_err();
        assert!(matches!(err, ClientError::Rejected { ref message } if message == DEFAULT_FAILURE));
    }

    #[test]
    fn test_non_json_bodies() {
        let err = Envelope::parse(502, b"<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, ClientError::Status { status: 502, .. }));

        let err = Envelope::parse(200, b"not json").unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));

        let err = Envelope::parse(200, b"[1,2]").unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[test]
    fn test_take_missing_or_null_key() {
        let mut env = Envelope::parse(200, br#"{"success":true,"sale":null}"#).unwrap();
        assert!(matches!(env.take::<u32>("sale"), Err(ClientError::MissingPayload { .. })));
        assert!(matches!(env.take::<u32>("other"), Err(ClientError::MissingPayload { .. })));
    }
}
