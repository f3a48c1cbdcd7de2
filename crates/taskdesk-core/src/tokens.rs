//! Bearer token type.

use std::fmt;

use serde_json::Value;

/// An opaque bearer token issued by the sign-in endpoint.
///
/// The token is the only durable authentication artifact: it is persisted
/// after a successful login and attached as `Authorization: Bearer ...` to
/// authenticated requests.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Create a token, returning `None` for an empty or blank string.
    ///
    /// The value is kept exactly as issued; format validation beyond
    /// presence is the backend's business.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    /// Extract the token from a sign-in response body.
    ///
    /// Backends have been observed to return `{"token": ...}`, `{"jwt": ...}`
    /// or the bare token as the whole body; all three are accepted.
    pub fn from_signin_payload(payload: &Value) -> Option<Self> {
        let candidate = payload
            .get("token")
            .filter(|v| !v.is_null())
            .or_else(|| payload.get("jwt").filter(|v| !v.is_null()))
            .unwrap_or(payload);

        candidate.as_str().and_then(Self::new)
    }

    /// Returns the token value for use in authorization headers and storage.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the `Authorization` header value for this token.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionToken").field(&"[REDACTED]").finish()
    }
}
