//! taskdesk-core - Session, authorization and navigation core for the
//! taskdesk client.
//!
//! The [`SessionStore`] owns who is logged in: the bearer token lives in a
//! [`TokenStore`], the profile is only ever taken from the backend's
//! profile endpoint. Route [`Guard`]s read session snapshots to decide
//! whether a navigation renders, waits, or redirects.

pub mod credentials;
pub mod error;
pub mod form;
pub mod guard;
pub mod profile;
pub mod session;
pub mod tokens;
pub mod traits;
pub mod types;

pub use credentials::{Credentials, RegistrationInput};
pub use error::Error;
pub use guard::{Decision, Guard, Location, NavState, Navigator, Screen, View};
pub use profile::{UserId, UserProfile};
pub use session::{Resolution, ResolutionState, Session, SessionStore};
pub use tokens::SessionToken;
pub use traits::{AuthBackend, MemoryTokenStore, SigninPayload, TokenStore};
pub use types::{ApiUrl, Role};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
