//! Core client types.
//!
//! These types validate at construction time so the session layer only
//! ever handles well-formed values.

mod api_url;
mod role;

pub use api_url::{ApiUrl, DEFAULT_API_URL};
pub use role::Role;
