//! Route table and navigation history.

use tracing::{debug, trace};

use crate::error::{Error, InvalidInputError};
use crate::session::Session;

use super::location::{
    DEFAULT_LANDING_PATH, Location, NavState, REGISTER_PATH, SIGN_IN_PATH, SUBMISSIONS_PATH,
};
use super::route::{Decision, Guard, Page, Redirect, View};

/// Upper bound on redirects followed for a single navigation.
const MAX_REDIRECTS: usize = 8;

/// What a path maps to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Guarded(Guard, View),
    /// Unconditional redirect.
    Alias(&'static str),
}

/// Look up the route for a location.
///
/// Unknown paths alias to `/`, which itself aliases to the landing view.
pub fn route_for(location: &Location) -> Route {
    match location.as_str() {
        "/" => Route::Alias(DEFAULT_LANDING_PATH),
        SIGN_IN_PATH => Route::Guarded(Guard::Public, View::SignIn),
        REGISTER_PATH => Route::Guarded(Guard::Public, View::Register),
        DEFAULT_LANDING_PATH => Route::Guarded(Guard::Protected, View::Dashboard),
        SUBMISSIONS_PATH => Route::Guarded(Guard::Protected, View::Submissions),
        _ => Route::Alias("/"),
    }
}

/// What is on screen after a navigation settles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    /// Waiting for session resolution at this location.
    Loading { location: Location },
    Page {
        location: Location,
        state: NavState,
        page: Page,
    },
}

impl Screen {
    pub fn location(&self) -> &Location {
        match self {
            Screen::Loading { location } | Screen::Page { location, .. } => location,
        }
    }

    pub fn view(&self) -> Option<View> {
        match self {
            Screen::Loading { .. } => None,
            Screen::Page { page, .. } => Some(page.view),
        }
    }
}

/// Applies route guards to navigations and keeps the history stack.
#[derive(Debug, Default)]
pub struct Navigator {
    history: Vec<Location>,
    state: NavState,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The location currently on screen.
    pub fn current(&self) -> Option<&Location> {
        self.history.last()
    }

    /// Navigation state of the current location.
    pub fn state(&self) -> &NavState {
        &self.state
    }

    pub fn history(&self) -> &[Location] {
        &self.history
    }

    /// Navigate to `location`, following guard redirects until a screen
    /// settles.
    ///
    /// # Errors
    ///
    /// Fails if redirects do not settle within a small bound.
    pub fn open(
        &mut self,
        session: &Session,
        location: Location,
        state: NavState,
    ) -> Result<Screen, Error> {
        self.history.push(location.clone());
        self.state = state.clone();
        self.settle(session, location, state)
    }

    /// Re-evaluate the current location against a changed session.
    pub fn refresh(&mut self, session: &Session) -> Result<Option<Screen>, Error> {
        let Some(location) = self.current().cloned() else {
            return Ok(None);
        };
        let state = self.state.clone();
        self.settle(session, location, state).map(Some)
    }

    fn settle(
        &mut self,
        session: &Session,
        mut location: Location,
        mut state: NavState,
    ) -> Result<Screen, Error> {
        for _ in 0..MAX_REDIRECTS {
            let decision = match route_for(&location) {
                Route::Alias(target) => Decision::Redirect(Redirect {
                    to: Location::new(target)?,
                    state: state.clone(),
                    replace: true,
                }),
                Route::Guarded(guard, view) => guard.check(session, view, &location, &state),
            };

            match decision {
                Decision::Loading => {
                    trace!(%location, "Session pending");
                    return Ok(Screen::Loading { location });
                }
                Decision::Render(page) => {
                    debug!(%location, view = ?page.view, "Rendering");
                    return Ok(Screen::Page {
                        location,
                        state,
                        page,
                    });
                }
                Decision::Redirect(redirect) => {
                    debug!(from = %location, to = %redirect.to, "Redirecting");
                    if redirect.replace {
                        self.history.pop();
                    }
                    self.history.push(redirect.to.clone());
                    self.state = redirect.state.clone();
                    location = redirect.to;
                    state = redirect.state;
                }
            }
        }

        Err(InvalidInputError::Location {
            value: location.to_string(),
            reason: format!("more than {} redirects", MAX_REDIRECTS),
        }
        .into())
    }
}
