//! HTTP client for the task-management REST backend.

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, trace};

use taskdesk_core::error::{Error, ProtocolError, TransportError};
use taskdesk_core::{ApiUrl, SessionToken};

use crate::endpoints::ErrorResponse;

/// JSON-over-HTTP client bound to one backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    api: ApiUrl,
}

impl ApiClient {
    /// Create a client for the given backend.
    pub fn new(api: ApiUrl) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("taskdesk/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(transport)?;

        Ok(Self { client, api })
    }

    /// Returns the backend URL this client is configured for.
    pub fn api(&self) -> &ApiUrl {
        &self.api
    }

    /// POST a JSON body without credentials and return the response body.
    ///
    /// Success bodies that are not JSON are returned as a JSON string;
    /// an empty body is `null`.
    #[instrument(skip(self, body), fields(api = %self.api))]
    pub async fn post<B>(&self, path: &str, body: &B) -> Result<Value, Error>
    where
        B: Serialize,
    {
        let url = self.api.endpoint(path);
        debug!(%url, "POST");

        let response = self
            .client
            .post(&url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .json(body)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        trace!(status = %status, "response");

        if !status.is_success() {
            return Err(Error::Protocol(parse_error_response(response).await));
        }

        let text = response.text().await.map_err(transport)?;
        Ok(parse_body(&text))
    }

    /// GET a JSON resource with the bearer token attached.
    #[instrument(skip(self, token), fields(api = %self.api))]
    pub async fn get_authed<R>(&self, path: &str, token: &SessionToken) -> Result<R, Error>
    where
        R: DeserializeOwned,
    {
        let url = self.api.endpoint(path);
        debug!(%url, "GET (authenticated)");

        let response = self
            .client
            .get(&url)
            .bearer_auth(token.as_str())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        trace!(status = %status, "response");

        if status.is_success() {
            response.json::<R>().await.map_err(transport)
        } else {
            Err(Error::Protocol(parse_error_response(response).await))
        }
    }
}

/// Map a reqwest failure onto the transport taxonomy.
pub(crate) fn transport(err: reqwest::Error) -> Error {
    let err = if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(err)
}

fn parse_body(text: &str) -> Value {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    serde_json::from_str(trimmed).unwrap_or_else(|_| Value::String(trimmed.to_string()))
}

async fn parse_error_response(response: reqwest::Response) -> ProtocolError {
    let status = response.status().as_u16();

    match response.json::<ErrorResponse>().await {
        Ok(body) => ProtocolError::new(status, body.into_message()),
        Err(_) => ProtocolError::new(status, None),
    }
}
