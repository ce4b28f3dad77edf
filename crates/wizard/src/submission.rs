//! Submission service trait and in-memory implementation.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use flow_store::FieldMap;
use serde::{Deserialize, Serialize};

use crate::steps::PackageRecord;

/// The assembled data of a completed flow, as handed to the submission
/// service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    /// The selected service, when one was chosen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,

    /// The collected form fields.
    pub form_data: FieldMap,

    /// Package lines; empty when the service skips the packages step.
    pub packages: Vec<PackageRecord>,
}

/// What the submission service reported back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionOutcome {
    /// True if the quote was accepted.
    pub success: bool,

    /// Human-readable failure message, when unsuccessful.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// True if the failure was a rejection of the submitted data, as
    /// opposed to a transient delivery problem.
    #[serde(default)]
    pub validation_errors: bool,
}

impl SubmissionOutcome {
    /// The quote was accepted.
    pub fn accepted() -> Self {
        Self {
            success: true,
            error: None,
            validation_errors: false,
        }
    }

    /// The submitted data was rejected; the user must correct it.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
            validation_errors: true,
        }
    }

    /// Delivery failed for a reason unrelated to the submitted data.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
            validation_errors: false,
        }
    }
}

/// Trait for the operation that finalizes a completed flow.
///
/// Failure is data, not an error: transport problems are reported as
/// unsuccessful outcomes so the controller can apply its degradation
/// policy. Implementations own any timeout policy; the controller
/// enforces none.
#[async_trait]
pub trait SubmissionService: Send + Sync {
    /// Submits an assembled quote request.
    async fn submit(&self, request: QuoteRequest) -> SubmissionOutcome;
}

#[derive(Debug, Default)]
struct InMemoryQuoteState {
    submitted: Vec<QuoteRequest>,
    reject_validation: bool,
    fail_transient: bool,
}

/// In-memory submission service for testing.
///
/// Records every accepted request and can be switched to reject or fail
/// the next submissions.
#[derive(Debug, Clone, Default)]
pub struct InMemoryQuoteService {
    state: Arc<RwLock<InMemoryQuoteState>>,
}

impl InMemoryQuoteService {
    /// Creates a new in-memory submission service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the service to reject submissions as invalid.
    pub fn set_reject_validation(&self, reject: bool) {
        self.state.write().unwrap().reject_validation = reject;
    }

    /// Configures the service to fail submissions transiently.
    pub fn set_fail_transient(&self, fail: bool) {
        self.state.write().unwrap().fail_transient = fail;
    }

    /// Returns the number of submissions attempted.
    pub fn submission_count(&self) -> usize {
        self.state.read().unwrap().submitted.len()
    }

    /// Returns the most recent submitted request, if any.
    pub fn last_request(&self) -> Option<QuoteRequest> {
        self.state.read().unwrap().submitted.last().cloned()
    }
}

#[async_trait]
impl SubmissionService for InMemoryQuoteService {
    async fn submit(&self, request: QuoteRequest) -> SubmissionOutcome {
        let mut state = self.state.write().unwrap();
        state.submitted.push(request);

        if state.reject_validation {
            return SubmissionOutcome::rejected("required fields are missing or invalid");
        }
        if state.fail_transient {
            return SubmissionOutcome::failed("notification service unavailable");
        }
        SubmissionOutcome::accepted()
    }
}
