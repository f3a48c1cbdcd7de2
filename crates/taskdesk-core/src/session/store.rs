//! The session store: single source of truth for who is logged in.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use crate::error::AuthError;
use crate::traits::{AuthBackend, TokenStore};
use crate::{Credentials, RegistrationInput, Result, SessionToken, UserProfile};

use super::state::{Resolution, ResolutionState, Session};

/// Owns the current token and resolved profile.
///
/// The token lives in a [`TokenStore`]; the profile lives only in memory
/// and is only ever set from the backend's profile endpoint. Stores are
/// cheap to clone (they share an internal `Arc`), and every change is
/// published to [`SessionStore::subscribe`] receivers so route guards can
/// re-evaluate.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use taskdesk_core::{AuthBackend, Credentials, MemoryTokenStore, SessionStore};
///
/// # async fn example<B: AuthBackend>(backend: B) -> taskdesk_core::Result<()> {
/// let store = SessionStore::new(backend, Arc::new(MemoryTokenStore::new()));
/// store.initialize().await;
///
/// if !store.is_authenticated() {
///     let profile = store.login(Credentials::new("a@b.com", "x")).await?;
///     println!("Signed in as {}", profile.display_name());
/// }
/// # Ok(())
/// # }
/// ```
pub struct SessionStore<B> {
    inner: Arc<StoreInner<B>>,
}

struct StoreInner<B> {
    backend: B,
    tokens: Arc<dyn TokenStore>,
    state: watch::Sender<Session>,
}

impl<B> Clone for SessionStore<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<B: AuthBackend> SessionStore<B> {
    /// Create a store in the `Pending` state.
    pub fn new(backend: B, tokens: Arc<dyn TokenStore>) -> Self {
        let (state, _) = watch::channel(Session::pending());
        Self {
            inner: Arc::new(StoreInner {
                backend,
                tokens,
                state,
            }),
        }
    }

    /// Returns the backend this store talks to.
    pub fn backend(&self) -> &B {
        &self.inner.backend
    }

    /// Returns a copy of the current session.
    pub fn snapshot(&self) -> Session {
        self.inner.state.borrow().clone()
    }

    /// Subscribe to session changes.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.inner.state.subscribe()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.state.borrow().is_authenticated()
    }

    pub fn profile(&self) -> Option<UserProfile> {
        self.inner.state.borrow().profile().cloned()
    }

    pub fn resolution_state(&self) -> ResolutionState {
        self.inner.state.borrow().resolution()
    }

    /// Resume from the persisted token, if any.
    ///
    /// Without a persisted token the store resolves immediately and no
    /// request is made.
    #[instrument(skip(self))]
    pub async fn initialize(&self) -> Resolution {
        debug!("Initializing session store");
        self.resolve_profile().await
    }

    /// Fetch the profile for the persisted token and settle the session.
    ///
    /// Never fails: any error deletes the persisted token and leaves the
    /// session resolved and signed out. Safe to call repeatedly.
    #[instrument(skip(self))]
    pub async fn resolve_profile(&self) -> Resolution {
        let token = match self.inner.tokens.load() {
            Ok(Some(token)) => token,
            Ok(None) => {
                debug!("No persisted token");
                self.settle_signed_out();
                return Resolution::SignedOut;
            }
            Err(e) => {
                warn!(error = %e, "Failed to read persisted token");
                self.discard_token();
                self.settle_signed_out();
                return Resolution::SignedOut;
            }
        };

        let result = self.inner.backend.fetch_profile(&token).await;

        // A logout or another login may have replaced the token while the
        // request was in flight; only the current token may settle state.
        if !self.is_current(&token) {
            debug!("Token changed during profile resolution; discarding result");
            return self.settle_from_current();
        }

        match result {
            Ok(profile) => {
                info!(user = ?profile.id(), role = ?profile.role_name(), "Profile resolved");
                let resolved = profile.clone();
                self.inner
                    .state
                    .send_modify(|session| session.authenticate(token, resolved));
                Resolution::Authenticated(profile)
            }
            Err(e) => {
                warn!(error = %e, "Profile resolution failed; signing out");
                self.discard_token();
                self.settle_signed_out();
                Resolution::SignedOut
            }
        }
    }

    /// Sign in and resolve the profile for the issued token.
    ///
    /// Returns only after profile resolution has settled, so a successful
    /// return means [`SessionStore::is_authenticated`] already reflects the
    /// freshly fetched profile.
    ///
    /// # Errors
    ///
    /// - transport and rejection errors from the backend
    /// - [`AuthError::MissingToken`] when the response has no usable token;
    ///   nothing is persisted in that case
    /// - [`AuthError::ProfileFetchFailed`] when the issued token cannot be
    ///   resolved to a profile
    #[instrument(skip(self, credentials), fields(email = %credentials.email()))]
    pub async fn login(&self, credentials: Credentials) -> Result<UserProfile> {
        info!("Signing in");

        let payload = self.inner.backend.sign_in(&credentials).await?;
        let token = payload.token().ok_or(AuthError::MissingToken)?;

        self.inner.tokens.save(&token)?;
        debug!("Token persisted");

        match self.resolve_profile().await {
            Resolution::Authenticated(profile) => Ok(profile),
            Resolution::SignedOut => Err(AuthError::ProfileFetchFailed.into()),
        }
    }

    /// Register a new account and return the backend's payload.
    ///
    /// Does not sign in.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegistrationInput) -> Result<Value> {
        info!("Registering account");
        let payload = self.inner.backend.sign_up(&input).await?;
        debug!("Registration accepted");
        Ok(payload)
    }

    /// Delete the persisted token and forget the profile. Never fails.
    #[instrument(skip(self))]
    pub fn logout(&self) {
        self.discard_token();
        let changed = self.inner.state.send_if_modified(Session::clear);
        if changed {
            info!("Signed out");
        }
    }

    fn is_current(&self, token: &SessionToken) -> bool {
        matches!(self.inner.tokens.load(), Ok(Some(ref current)) if current == token)
    }

    fn discard_token(&self) {
        if let Err(e) = self.inner.tokens.clear() {
            warn!(error = %e, "Failed to delete persisted token");
        }
    }

    fn settle_signed_out(&self) {
        self.inner.state.send_if_modified(Session::settle_signed_out);
    }

    fn settle_from_current(&self) -> Resolution {
        let session = self.snapshot();
        match session.profile() {
            Some(profile) if session.is_resolved() => Resolution::Authenticated(profile.clone()),
            _ => {
                if matches!(self.inner.tokens.load(), Ok(None)) {
                    self.settle_signed_out();
                }
                Resolution::SignedOut
            }
        }
    }
}

impl<B> fmt::Debug for SessionStore<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let session = self.inner.state.borrow();
        f.debug_struct("SessionStore")
            .field("resolution", &session.resolution())
            .field("authenticated", &session.is_authenticated())
            .field("tokens", &"[REDACTED]")
            .finish()
    }
}
