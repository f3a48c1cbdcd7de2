//! Error types for the taskdesk client.
//!
//! This module provides a unified error type with explicit variants for
//! transport, authentication, registration, protocol, storage and input
//! validation failures.

use std::fmt;
use thiserror::Error;

/// The unified error type for taskdesk operations.
///
/// Session resolution never surfaces these; `login` and `register` return
/// them to the form that triggered the call.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (connection, timeout, decoding).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authentication errors (rejected credentials, missing token).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Registration rejected by the backend.
    #[error("registration error: {0}")]
    Registration(#[from] RegistrationError),

    /// Unexpected non-success responses.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Token storage errors.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Input validation errors (base URL, paths).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns the message the backend attached to this failure, if any.
    ///
    /// Forms show this text verbatim and fall back to a generic string
    /// when it is absent.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Error::Auth(AuthError::Rejected { message, .. }) => message.as_deref(),
            Error::Registration(RegistrationError::Rejected { message, .. }) => message.as_deref(),
            Error::Protocol(err) => err.message.as_deref(),
            _ => None,
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP error (including undecodable bodies).
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The backend refused the credentials.
    #[error("sign-in rejected (HTTP {status}){}", fmt_message(.message))]
    Rejected {
        status: u16,
        message: Option<String>,
    },

    /// The sign-in response carried no usable token.
    #[error("no usable token in sign-in response")]
    MissingToken,

    /// The token was accepted at sign-in but the profile could not be resolved.
    #[error("profile could not be resolved with the issued token")]
    ProfileFetchFailed,
}

/// Registration errors.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// Validation failure, duplicate email, or any other server-side refusal.
    #[error("registration rejected (HTTP {status}){}", fmt_message(.message))]
    Rejected {
        status: u16,
        message: Option<String>,
    },
}

/// Protocol-level errors from non-success responses.
#[derive(Debug)]
pub struct ProtocolError {
    /// HTTP status code.
    pub status: u16,
    /// Error message from the server.
    pub message: Option<String>,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProtocolError {}

impl ProtocolError {
    /// Create a new protocol error.
    pub fn new(status: u16, message: Option<String>) -> Self {
        Self { status, message }
    }

    /// Check if the backend rejected the bearer credential.
    pub fn is_auth_error(&self) -> bool {
        self.status == 401 || self.status == 403
    }
}

/// Token storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing medium failed.
    #[error("I/O error on {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },

    /// The stored contents could not be understood.
    #[error("corrupt token storage at {location}: {reason}")]
    Corrupt { location: String, reason: String },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid backend base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// Invalid navigation location.
    #[error("invalid location '{value}': {reason}")]
    Location { value: String, reason: String },
}

fn fmt_message(message: &Option<String>) -> String {
    match message {
        Some(m) => format!(": {}", m),
        None => String::new(),
    }
}
