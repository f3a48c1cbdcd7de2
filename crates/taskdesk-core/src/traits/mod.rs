//! Core traits for the backend and token storage seams.

mod backend;
mod token_store;

pub use backend::{AuthBackend, SigninPayload};
pub use token_store::{MemoryTokenStore, TokenStore};
