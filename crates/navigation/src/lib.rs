//! Navigable location state for the wizard.
//!
//! The active step is derived purely from the `step` query parameter of
//! the current [`RouteLocation`], never from persisted flow state, so
//! reloads, bookmarks, and back/forward navigation always agree with the
//! address shown to the user.

pub mod location;
pub mod navigator;
pub mod position;

pub use location::RouteLocation;
pub use navigator::{InMemoryNavigator, Navigator, ScrollBehavior};
pub use position::{STEP_PARAM, location_for_step, step_position};
