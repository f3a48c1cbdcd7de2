//! Durable token storage trait.

use std::sync::{Mutex, PoisonError};

use crate::{Result, SessionToken};

/// A single durable slot holding the bearer token.
///
/// Absence of a token means unauthenticated; presence triggers a silent
/// resume the next time a session store initializes.
pub trait TokenStore: Send + Sync {
    /// Read the persisted token.
    fn load(&self) -> Result<Option<SessionToken>>;

    /// Persist a token, replacing any previous one.
    fn save(&self, token: &SessionToken) -> Result<()>;

    /// Delete the persisted token. Deleting an empty slot is not an error.
    fn clear(&self) -> Result<()>;
}

/// In-process token storage, lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<SessionToken>>,
}

impl MemoryTokenStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a token.
    pub fn with_token(token: SessionToken) -> Self {
        Self {
            slot: Mutex::new(Some(token)),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<SessionToken>> {
        Ok(self
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, token: &SessionToken) -> Result<()> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        Ok(())
    }
}
