//! Session snapshot types.

use crate::{SessionToken, UserProfile};

/// Whether the initial resolution of a store has finished.
///
/// The transition `Pending -> Resolved` happens once per store; later
/// resolutions never move back to `Pending`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolutionState {
    Pending,
    Resolved,
}

/// Outcome of a profile resolution.
#[derive(Clone, Debug, PartialEq)]
pub enum Resolution {
    /// The token was accepted and this profile is now current.
    Authenticated(UserProfile),
    /// No usable token; the session is signed out.
    SignedOut,
}

impl Resolution {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Resolution::Authenticated(_))
    }
}

/// A point-in-time view of who is logged in.
///
/// Invariant: `profile` is only set while `token` is set.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    token: Option<SessionToken>,
    profile: Option<UserProfile>,
    resolution: ResolutionState,
}

impl Session {
    /// The state of a store that has not resolved yet.
    pub fn pending() -> Self {
        Self {
            token: None,
            profile: None,
            resolution: ResolutionState::Pending,
        }
    }

    /// A resolved, signed-in session.
    pub fn authenticated(token: SessionToken, profile: UserProfile) -> Self {
        Self {
            token: Some(token),
            profile: Some(profile),
            resolution: ResolutionState::Resolved,
        }
    }

    /// A resolved, signed-out session.
    pub fn signed_out() -> Self {
        Self {
            token: None,
            profile: None,
            resolution: ResolutionState::Resolved,
        }
    }

    pub fn token(&self) -> Option<&SessionToken> {
        self.token.as_ref()
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn resolution(&self) -> ResolutionState {
        self.resolution
    }

    pub fn is_resolved(&self) -> bool {
        self.resolution == ResolutionState::Resolved
    }

    /// A session is authenticated exactly when it holds a profile.
    pub fn is_authenticated(&self) -> bool {
        self.profile.is_some()
    }

    pub(crate) fn authenticate(&mut self, token: SessionToken, profile: UserProfile) {
        self.token = Some(token);
        self.profile = Some(profile);
        self.resolution = ResolutionState::Resolved;
    }

    /// Clear identity without touching the resolution state.
    ///
    /// Returns whether anything changed.
    pub(crate) fn clear(&mut self) -> bool {
        let changed = self.token.is_some() || self.profile.is_some();
        self.token = None;
        self.profile = None;
        changed
    }

    /// Clear identity and mark the session resolved.
    pub(crate) fn settle_signed_out(&mut self) -> bool {
        let changed = self.clear() || self.resolution == ResolutionState::Pending;
        self.resolution = ResolutionState::Resolved;
        changed
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::pending()
    }
}
