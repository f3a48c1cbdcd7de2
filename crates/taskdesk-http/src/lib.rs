//! taskdesk-http - HTTP-backed authentication backend.

mod backend;
mod client;
mod endpoints;

pub use backend::HttpAuthBackend;
pub use client::ApiClient;
