//! Authentication backend trait.

use async_trait::async_trait;
use serde_json::Value;

use crate::{Credentials, RegistrationInput, Result, SessionToken, UserProfile};

/// Raw body of a successful sign-in response.
///
/// The token's location inside the body is not fixed, so the body is kept
/// as-is and searched by [`SigninPayload::token`].
#[derive(Debug, Clone, PartialEq)]
pub struct SigninPayload(pub Value);

impl SigninPayload {
    /// The usable token carried by this payload, if any.
    pub fn token(&self) -> Option<SessionToken> {
        SessionToken::from_signin_payload(&self.0)
    }
}

/// The three backend endpoints the session layer depends on.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Send credentials to the sign-in endpoint.
    ///
    /// Rejected credentials are reported as [`crate::error::AuthError::Rejected`].
    async fn sign_in(&self, credentials: &Credentials) -> Result<SigninPayload>;

    /// Send registration data to the sign-up endpoint and return its payload.
    async fn sign_up(&self, input: &RegistrationInput) -> Result<Value>;

    /// Fetch the profile of the user the token belongs to.
    async fn fetch_profile(&self, token: &SessionToken) -> Result<UserProfile>;
}
