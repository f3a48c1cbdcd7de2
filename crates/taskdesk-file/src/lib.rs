//! taskdesk-file - Filesystem-backed token storage.
//!
//! Persists the session token across process restarts, the way a browser
//! keeps it in local storage.

mod store;

pub use store::{FileTokenStore, TOKEN_KEY};
