//! Navigation locations and the state carried between them.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// Path of the sign-in view.
pub const SIGN_IN_PATH: &str = "/login";
/// Path of the registration view.
pub const REGISTER_PATH: &str = "/register";
/// Where authenticated users land when nothing else was requested.
pub const DEFAULT_LANDING_PATH: &str = "/dashboard";
/// Path of the submissions view.
pub const SUBMISSIONS_PATH: &str = "/submissions";

/// An in-app location: an absolute path without query or fragment.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Location(String);

impl Location {
    /// Parse a location, dropping any query string or fragment.
    ///
    /// # Errors
    ///
    /// Returns an error unless the path starts with `/`.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let original = s.as_ref();
        let path = original
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim();

        if !path.starts_with('/') {
            return Err(InvalidInputError::Location {
                value: original.to_string(),
                reason: "must be an absolute path".to_string(),
            }
            .into());
        }

        let mut normalized = String::with_capacity(path.len());
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            normalized.push('/');
            normalized.push_str(segment);
        }
        if normalized.is_empty() {
            normalized.push('/');
        }

        Ok(Self(normalized))
    }

    pub fn root() -> Self {
        Self("/".to_string())
    }

    pub fn sign_in() -> Self {
        Self(SIGN_IN_PATH.to_string())
    }

    pub fn register() -> Self {
        Self(REGISTER_PATH.to_string())
    }

    pub fn default_landing() -> Self {
        Self(DEFAULT_LANDING_PATH.to_string())
    }

    pub fn submissions() -> Self {
        Self(SUBMISSIONS_PATH.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is one of the signed-out views.
    pub fn is_public(&self) -> bool {
        self.0 == SIGN_IN_PATH || self.0 == REGISTER_PATH
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Location {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// State attached to a navigation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavState {
    /// The location a guard turned the user away from.
    pub from: Option<Location>,
    /// Set when arriving at sign-in straight after registering.
    pub just_registered: bool,
}

impl NavState {
    /// State remembering where the user was headed.
    pub fn from(location: Location) -> Self {
        Self {
            from: Some(location),
            just_registered: false,
        }
    }

    /// Where to go once signed in: the remembered location, else the
    /// default landing view. Signed-out views are never a return target.
    pub fn return_to(&self) -> Location {
        match &self.from {
            Some(location) if !location.is_public() => location.clone(),
            _ => Location::default_landing(),
        }
    }
}
