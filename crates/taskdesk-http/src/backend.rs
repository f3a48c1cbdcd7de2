//! REST-backed implementation of [`AuthBackend`].

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument};

use taskdesk_core::error::{AuthError, Error, ProtocolError, RegistrationError};
use taskdesk_core::{
    ApiUrl, AuthBackend, Credentials, RegistrationInput, Result, SessionToken, SigninPayload,
    UserProfile,
};

use crate::client::ApiClient;
use crate::endpoints::{PROFILE, SIGN_IN, SIGN_UP};

/// Authentication backend speaking to the task-management REST API.
#[derive(Debug, Clone)]
pub struct HttpAuthBackend {
    client: ApiClient,
}

impl HttpAuthBackend {
    /// Create a backend for the given API base URL.
    pub fn new(api: ApiUrl) -> Result<Self> {
        Ok(Self {
            client: ApiClient::new(api)?,
        })
    }

    /// Returns the API base URL for this backend.
    pub fn api(&self) -> &ApiUrl {
        self.client.api()
    }
}

#[async_trait]
impl AuthBackend for HttpAuthBackend {
    #[instrument(skip(self, credentials), fields(email = %credentials.email()))]
    async fn sign_in(&self, credentials: &Credentials) -> Result<SigninPayload> {
        debug!("Signing in via REST");

        match self.client.post(SIGN_IN, credentials).await {
            Ok(body) => Ok(SigninPayload(body)),
            Err(Error::Protocol(ProtocolError { status, message })) => {
                Err(AuthError::Rejected { status, message }.into())
            }
            Err(e) => Err(e),
        }
    }

    #[instrument(skip(self, input), fields(email = %input.email))]
    async fn sign_up(&self, input: &RegistrationInput) -> Result<Value> {
        debug!("Registering via REST");

        let body = match self.client.post(SIGN_UP, input).await {
            Ok(body) => body,
            Err(Error::Protocol(ProtocolError { status, message })) => {
                return Err(RegistrationError::Rejected { status, message }.into());
            }
            Err(e) => return Err(e),
        };

        // The backend's fallback path answers with `status: false` instead
        // of an error status.
        if body.get("status").and_then(Value::as_bool) == Some(false) {
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string);
            return Err(RegistrationError::Rejected {
                status: 200,
                message,
            }
            .into());
        }

        Ok(body)
    }

    #[instrument(skip(self, token))]
    async fn fetch_profile(&self, token: &SessionToken) -> Result<UserProfile> {
        debug!("Fetching profile via REST");
        self.client.get_authed(PROFILE, token).await
    }
}
