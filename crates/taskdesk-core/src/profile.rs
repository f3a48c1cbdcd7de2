//! User profile as returned by the profile endpoint.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::Role;

/// Label used when a profile carries neither a name nor an email.
const UNNAMED_USER: &str = "Signed-in user";

/// A user identifier. Backends use either numeric or textual ids.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Number(n) => write!(f, "{}", n),
            UserId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// The authoritative identity of the signed-in user.
///
/// A profile only ever comes from the profile endpoint and is kept exactly
/// as the server sent it: any JSON object is accepted, nulls and unknown
/// fields included. The accessors read the fields the client cares about
/// and tolerate their absence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserProfile(Map<String, Value>);

impl UserProfile {
    /// Wrap a server payload.
    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// The payload as received.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// A raw field of the payload.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn id(&self) -> Option<UserId> {
        match self.0.get("id")? {
            Value::Number(n) => n.as_i64().map(UserId::Number),
            Value::String(s) => Some(UserId::Text(s.clone())),
            _ => None,
        }
    }

    pub fn email(&self) -> Option<&str> {
        self.text("email")
    }

    pub fn full_name(&self) -> Option<&str> {
        self.text("fullName")
    }

    /// The role string exactly as stored, e.g. `ROLE_ADMIN`.
    pub fn role_name(&self) -> Option<&str> {
        self.text("role")
    }

    /// The role this profile carries.
    pub fn role(&self) -> Role {
        Role::from_profile_value(self.role_name())
    }

    /// Whether this profile grants administrative access.
    pub fn is_admin(&self) -> bool {
        self.role().is_admin()
    }

    /// Check for a role by name, with or without the `ROLE_` prefix.
    pub fn has_role(&self, name: &str) -> bool {
        match self.role_name() {
            Some(role) => Role::matches(role, name),
            None => false,
        }
    }

    /// The name shown in navigation chrome: full name, else email.
    pub fn display_name(&self) -> &str {
        self.full_name()
            .or_else(|| self.email())
            .unwrap_or(UNNAMED_USER)
    }

    fn text(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
    }
}
