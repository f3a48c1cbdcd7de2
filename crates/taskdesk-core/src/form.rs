//! Sign-in and registration form state.
//!
//! A form allows one submission in flight at a time. The in-flight request
//! only holds a weak reference to the form, so a form that goes away
//! mid-request never has its state written afterwards.

use std::sync::{Arc, Mutex, PoisonError, Weak};

use tracing::debug;

use crate::guard::{Location, NavState};
use crate::traits::AuthBackend;
use crate::{Credentials, Error, RegistrationInput, Result, SessionStore};

/// Shown when sign-in fails without a server message.
pub const SIGN_IN_FALLBACK: &str = "Unable to sign you in. Please try again.";

/// Shown when registration fails without a server message.
pub const REGISTER_FALLBACK: &str =
    "We could not complete your registration. Please try again.";

/// Visible state of a form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormState {
    /// A submission is in flight; resubmission is disabled.
    pub busy: bool,
    /// Message from the last failed submission.
    pub error: Option<String>,
}

/// Result of submitting a form.
#[derive(Debug)]
pub enum Submission<T> {
    /// Another submission was already in flight; nothing was sent.
    Busy,
    /// The form was dropped before the request settled; the result was
    /// thrown away.
    Discarded,
    Succeeded(T),
    Failed { message: String, error: Error },
}

impl<T> Submission<T> {
    pub fn succeeded(self) -> Option<T> {
        match self {
            Submission::Succeeded(value) => Some(value),
            _ => None,
        }
    }
}

/// A form owned by a view.
#[derive(Debug)]
pub struct Form {
    state: Arc<Mutex<FormState>>,
    fallback: &'static str,
}

/// A claim on a form for one submission.
///
/// Holds the form weakly; finishing after the form is gone is a no-op.
/// Dropping an unfinished claim releases the form without recording an
/// outcome.
#[derive(Debug)]
pub struct Pending {
    state: Weak<Mutex<FormState>>,
    fallback: &'static str,
    finished: bool,
}

impl Form {
    pub fn sign_in() -> Self {
        Self::with_fallback(SIGN_IN_FALLBACK)
    }

    pub fn register() -> Self {
        Self::with_fallback(REGISTER_FALLBACK)
    }

    pub fn with_fallback(fallback: &'static str) -> Self {
        Self {
            state: Arc::new(Mutex::new(FormState::default())),
            fallback,
        }
    }

    /// Current state of the form.
    pub fn state(&self) -> FormState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Mark the form busy and clear the previous error.
    ///
    /// Returns `None` while another submission is in flight.
    pub fn begin(&self) -> Option<Pending> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.busy {
            return None;
        }
        state.busy = true;
        state.error = None;
        Some(Pending {
            state: Arc::downgrade(&self.state),
            fallback: self.fallback,
            finished: false,
        })
    }
}

impl Pending {
    /// Record the outcome on the form, if it still exists.
    pub fn finish<T>(mut self, result: Result<T>) -> Submission<T> {
        self.finished = true;

        let Some(state) = self.state.upgrade() else {
            debug!("Form dropped before submission settled; discarding result");
            return Submission::Discarded;
        };

        let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
        state.busy = false;

        match result {
            Ok(value) => {
                state.error = None;
                Submission::Succeeded(value)
            }
            Err(error) => {
                let message = error
                    .server_message()
                    .unwrap_or(self.fallback)
                    .to_string();
                state.error = Some(message.clone());
                Submission::Failed { message, error }
            }
        }
    }
}

impl Drop for Pending {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        if let Some(state) = self.state.upgrade() {
            debug!("Submission abandoned before it settled; releasing form");
            state.lock().unwrap_or_else(PoisonError::into_inner).busy = false;
        }
    }
}

/// Submit the sign-in form.
///
/// The form is claimed immediately; the returned future does not borrow
/// it, so the owning view may drop the form while the request is in
/// flight. On success the future yields where to navigate: the location
/// the user was turned away from, else the default landing view.
pub fn submit_sign_in<'a, B: AuthBackend>(
    form: &Form,
    store: &'a SessionStore<B>,
    credentials: Credentials,
    nav: &NavState,
) -> impl Future<Output = Submission<Location>> + use<'a, B> {
    let pending = form.begin();
    let target = nav.return_to();
    async move {
        let Some(pending) = pending else {
            return Submission::Busy;
        };
        let result = store.login(credentials).await.map(|_| target);
        pending.finish(result)
    }
}

/// Submit the registration form.
///
/// On success yields the sign-in location with `just_registered` set.
pub fn submit_registration<'a, B: AuthBackend>(
    form: &Form,
    store: &'a SessionStore<B>,
    input: RegistrationInput,
) -> impl Future<Output = Submission<(Location, NavState)>> + use<'a, B> {
    let pending = form.begin();
    async move {
        let Some(pending) = pending else {
            return Submission::Busy;
        };
        let result = store.register(input).await.map(|_| {
            (
                Location::sign_in(),
                NavState {
                    from: None,
                    just_registered: true,
                },
            )
        });
        pending.finish(result)
    }
}
