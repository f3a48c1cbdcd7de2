//! REST endpoint paths and wire types.

use serde::Deserialize;

/// Account registration.
pub const SIGN_UP: &str = "/auth/signup";

/// Credential exchange for a bearer token.
pub const SIGN_IN: &str = "/auth/signin";

/// Profile of the bearer token's user.
pub const PROFILE: &str = "/api/users/profile";

/// Error body returned by the backend on failures.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorResponse {
    /// The human-readable reason, preferring `message` over `error`.
    pub fn into_message(self) -> Option<String> {
        self.message
            .filter(|m| !m.trim().is_empty())
            .or(self.error.filter(|e| !e.trim().is_empty()))
    }
}
