//! Route guards: render, wait, or redirect.

use crate::session::Session;
use crate::types::Role;
use crate::UserProfile;

use super::location::{Location, NavState};

/// The views the client can show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum View {
    SignIn,
    Register,
    Dashboard,
    Submissions,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::SignIn => "Sign in",
            View::Register => "Create account",
            View::Dashboard => "Dashboard",
            View::Submissions => "Submissions",
        }
    }

    /// The panels this view shows to the given user.
    ///
    /// Role-gated content is decided here on every evaluation, from the
    /// profile current at that moment.
    pub fn panels(&self, profile: Option<&UserProfile>) -> Vec<Panel> {
        match self {
            View::SignIn => vec![Panel::SignInForm],
            View::Register => vec![Panel::RegisterForm],
            View::Dashboard => {
                let mut panels = Vec::with_capacity(3);
                if profile.is_some_and(UserProfile::is_admin) {
                    panels.push(Panel::Admin);
                }
                panels.push(Panel::TaskForm);
                panels.push(Panel::TaskList);
                panels
            }
            View::Submissions => vec![Panel::SubmissionList],
        }
    }
}

/// A section of a rendered view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Panel {
    SignInForm,
    RegisterForm,
    Admin,
    TaskForm,
    TaskList,
    SubmissionList,
}

/// A link in the navigation chrome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub to: Location,
    pub active: bool,
}

/// Navigation chrome shown around every authenticated view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chrome {
    pub user_label: String,
    pub role: Role,
    pub links: Vec<NavLink>,
    pub logout: bool,
}

impl Chrome {
    fn new(profile: &UserProfile, current: &Location) -> Self {
        let links = [
            ("Dashboard", Location::default_landing()),
            ("Submissions", Location::submissions()),
        ]
        .into_iter()
        .map(|(label, to)| NavLink {
            label,
            active: &to == current,
            to,
        })
        .collect();

        Self {
            user_label: profile.display_name().to_string(),
            role: profile.role(),
            links,
            logout: true,
        }
    }
}

/// Frame a view is rendered in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Layout {
    Public,
    Authenticated(Chrome),
}

/// A view ready to show.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    pub view: View,
    pub layout: Layout,
    pub panels: Vec<Panel>,
}

/// A navigation a guard asks for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Redirect {
    pub to: Location,
    pub state: NavState,
    /// Replace the current history entry instead of pushing a new one.
    pub replace: bool,
}

/// What a guard decided for one navigation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Resolution is still pending: show a neutral loading indicator and
    /// do not navigate.
    Loading,
    Render(Page),
    Redirect(Redirect),
}

/// Which guard protects a route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Guard {
    /// Only for signed-in users.
    Protected,
    /// Only for signed-out users (sign-in, registration).
    Public,
}

impl Guard {
    /// Decide what to do with a navigation to `view` at `location`.
    pub fn check(
        self,
        session: &Session,
        view: View,
        location: &Location,
        state: &NavState,
    ) -> Decision {
        if !session.is_resolved() {
            return Decision::Loading;
        }

        match (self, session.profile()) {
            (Guard::Protected, Some(profile)) => Decision::Render(Page {
                view,
                layout: Layout::Authenticated(Chrome::new(profile, location)),
                panels: view.panels(Some(profile)),
            }),
            (Guard::Protected, None) => Decision::Redirect(Redirect {
                to: Location::sign_in(),
                state: NavState::from(location.clone()),
                replace: true,
            }),
            (Guard::Public, Some(_)) => Decision::Redirect(Redirect {
                to: state.return_to(),
                state: NavState::default(),
                replace: true,
            }),
            (Guard::Public, None) => Decision::Render(Page {
                view,
                layout: Layout::Public,
                panels: view.panels(None),
            }),
        }
    }
}
