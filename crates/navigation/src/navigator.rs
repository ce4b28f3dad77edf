//! The navigator seam and an in-memory implementation.

use std::sync::{Arc, RwLock};

use crate::RouteLocation;

/// How the viewport behaves after a navigation.
///
/// The mechanics (smooth scroll, restoring a prior offset) belong to the
/// presentation layer; the engine only forwards the intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollBehavior {
    /// Scroll to the top of the page.
    Top,
    /// Keep the current scroll offset.
    Preserve,
}

impl ScrollBehavior {
    /// Returns the behavior name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScrollBehavior::Top => "top",
            ScrollBehavior::Preserve => "preserve",
        }
    }
}

impl std::fmt::Display for ScrollBehavior {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Trait for location providers.
///
/// A navigator exposes the current location and applies in-place location
/// changes without a full navigation reload. Navigation is synchronous
/// and fire-and-forget with respect to any rendering lifecycle.
pub trait Navigator: Send + Sync {
    /// Returns the current location.
    fn location(&self) -> RouteLocation;

    /// Moves to a new location with the given scroll behavior.
    fn navigate(&self, to: RouteLocation, scroll: ScrollBehavior);
}

#[derive(Debug, Default)]
struct InMemoryNavigatorState {
    current: RouteLocation,
    log: Vec<(RouteLocation, ScrollBehavior)>,
}

/// In-memory navigator for tests and headless runs.
///
/// Records every navigation so assertions can inspect the full history.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNavigator {
    state: Arc<RwLock<InMemoryNavigatorState>>,
}

impl InMemoryNavigator {
    /// Creates a navigator positioned at the given location.
    pub fn starting_at(location: RouteLocation) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryNavigatorState {
                current: location,
                log: Vec::new(),
            })),
        }
    }

    /// Creates a navigator positioned at a parsed `path?query` string.
    pub fn at(raw: &str) -> Self {
        Self::starting_at(RouteLocation::parse(raw))
    }

    /// Returns the number of navigations performed.
    pub fn navigation_count(&self) -> usize {
        self.state.read().unwrap().log.len()
    }

    /// Returns the most recent navigation, if any.
    pub fn last_navigation(&self) -> Option<(RouteLocation, ScrollBehavior)> {
        self.state.read().unwrap().log.last().cloned()
    }

    /// Returns the full navigation history.
    pub fn history(&self) -> Vec<(RouteLocation, ScrollBehavior)> {
        self.state.read().unwrap().log.clone()
    }
}

impl Navigator for InMemoryNavigator {
    fn location(&self) -> RouteLocation {
        self.state.read().unwrap().current.clone()
    }

    fn navigate(&self, to: RouteLocation, scroll: ScrollBehavior) {
        tracing::debug!(to = %to, scroll = %scroll, "navigating");
        let mut state = self.state.write().unwrap();
        state.current = to.clone();
        state.log.push((to, scroll));
    }
}
