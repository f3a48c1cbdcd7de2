//! Role derived from a user profile.

use std::fmt;

const PREFIX: &str = "ROLE_";

/// A user role.
///
/// Backends spell roles either bare (`ADMIN`) or Spring-style
/// (`ROLE_ADMIN`), in any case. Both spellings parse to the same role.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Customer,
    User,
    Other(String),
}

impl Role {
    /// Parse the `role` field of a profile. A missing role is a plain user.
    pub fn from_profile_value(value: Option<&str>) -> Self {
        let Some(value) = value else {
            return Role::User;
        };

        match canonical(value).as_str() {
            "ADMIN" => Role::Admin,
            "CUSTOMER" => Role::Customer,
            "USER" | "" => Role::User,
            _ => Role::Other(value.to_string()),
        }
    }

    /// Whether this role grants administrative access.
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Human-readable role name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::Customer => "Team Member",
            Role::User | Role::Other(_) => "User",
        }
    }

    /// Compare a stored role with a role name, ignoring case and prefix.
    pub fn matches(stored: &str, name: &str) -> bool {
        let name = canonical(name);
        !name.is_empty() && canonical(stored) == name
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

fn canonical(value: &str) -> String {
    let upper = value.trim().to_ascii_uppercase();
    match upper.strip_prefix(PREFIX) {
        Some(rest) => rest.to_string(),
        None => upper,
    }
}
