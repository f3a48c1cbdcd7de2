//! Session lifecycle: token persistence, profile resolution, sign-in and
//! sign-out.

mod state;
mod store;

pub use state::{Resolution, ResolutionState, Session};
pub use store::SessionStore;
