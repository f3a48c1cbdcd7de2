//! Sign-in credentials and registration input.

use std::fmt;

use serde::Serialize;

/// The role new accounts request unless told otherwise.
pub const DEFAULT_REGISTRATION_ROLE: &str = "ROLE_CUSTOMER";

/// Login credentials for the sign-in endpoint.
///
/// Created per login attempt and never persisted. The password is never
/// exposed in Debug output.
///
/// # Example
///
/// ```
/// use taskdesk_core::Credentials;
///
/// let creds = Credentials::new("alice@example.com", "hunter2");
/// assert_eq!(creds.email(), "alice@example.com");
/// ```
#[derive(Clone, Serialize)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    /// Create new credentials.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Returns the email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the password.
    ///
    /// Use this only when constructing the sign-in request.
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Account registration data, submitted once to the sign-up endpoint.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationInput {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub mobile: String,
    pub role: String,
}

impl RegistrationInput {
    /// Create registration input with the default team-member role.
    pub fn new(
        full_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        mobile: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            email: email.into(),
            password: password.into(),
            mobile: mobile.into(),
            role: DEFAULT_REGISTRATION_ROLE.to_string(),
        }
    }

    /// Request a specific role.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }
}

impl fmt::Debug for RegistrationInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationInput")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("mobile", &self.mobile)
            .field("role", &self.role)
            .finish()
    }
}
