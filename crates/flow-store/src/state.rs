//! The persisted record of wizard progress.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Form field name → value, in deterministic order.
pub type FieldMap = BTreeMap<String, String>;

/// The single persisted record for one in-progress wizard session.
///
/// The serialized form carries exactly two keys, `selectedOption` and
/// `collectedFields`; `is_transitioning` is session-local UI state and is
/// never written to the persistence slot, so it always loads as `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlowState {
    /// Identifier of the service chosen on the cards step; empty means unset.
    pub selected_option: String,

    /// Collected form fields; `None` until the form step completes once.
    pub collected_fields: Option<FieldMap>,

    /// Suppresses interaction while a step transition animates.
    #[serde(skip)]
    pub is_transitioning: bool,
}

impl FlowState {
    /// Returns true if nothing has been selected or collected yet.
    pub fn is_empty(&self) -> bool {
        self.selected_option.is_empty() && self.collected_fields.is_none()
    }

    /// Returns true if a service has been chosen on the cards step.
    pub fn has_selection(&self) -> bool {
        !self.selected_option.is_empty()
    }

    /// Replaces the selected service.
    pub fn select_option(&mut self, value: impl Into<String>) {
        self.selected_option = value.into();
    }

    /// Merges a batch of form fields into the record, creating the field
    /// map on first use. Existing keys are overwritten wholesale; the
    /// record is never left partially populated by a failed merge.
    pub fn merge_fields(&mut self, partial: FieldMap) {
        self.collected_fields
            .get_or_insert_with(FieldMap::new)
            .extend(partial);
    }

    /// Returns a copy with the transitioning flag set as given.
    pub fn with_transitioning(mut self, active: bool) -> Self {
        self.is_transitioning = active;
        self
    }
}
