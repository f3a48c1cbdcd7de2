//! Route guards and navigation.
//!
//! Guards read a [`Session`](crate::Session) snapshot and decide, per
//! navigation, whether to render the requested view, show a loading
//! indicator while resolution is pending, or redirect.

mod location;
mod navigator;
mod route;

pub use location::{
    DEFAULT_LANDING_PATH, Location, NavState, REGISTER_PATH, SIGN_IN_PATH, SUBMISSIONS_PATH,
};
pub use navigator::{Navigator, Route, Screen, route_for};
pub use route::{Chrome, Decision, Guard, Layout, NavLink, Page, Panel, Redirect, View};
