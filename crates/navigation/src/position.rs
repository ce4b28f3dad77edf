//! Step position resolution.
//!
//! The active step is a pure function of the current location's `step`
//! query parameter. Position 0 is the distinguished start step and is
//! represented by the absence of the parameter.

use crate::RouteLocation;

/// Name of the query parameter carrying the active step.
pub const STEP_PARAM: &str = "step";

/// Resolves the active step position from a location.
///
/// An absent parameter resolves to 0. A malformed value (non-numeric or
/// negative) also resolves to 0: the wizard recovers to its start step
/// rather than rendering no step at all.
pub fn step_position(location: &RouteLocation) -> u32 {
    match location.param(STEP_PARAM) {
        None => 0,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::debug!(raw, "malformed step parameter, resolving to start step");
            0
        }),
    }
}

/// Returns the location addressing the given step.
///
/// Step 0 removes the parameter entirely (the bare start route); any
/// other step sets it. Unrelated query parameters pass through untouched.
pub fn location_for_step(location: &RouteLocation, step: u32) -> RouteLocation {
    if step == 0 {
        location.without_param(STEP_PARAM)
    } else {
        location.with_param(STEP_PARAM, step.to_string())
    }
}
