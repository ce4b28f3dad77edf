//! Wizard error types.

use flow_store::StoreError;
use thiserror::Error;

/// Errors that can occur during controller operations.
///
/// Submission failures are not errors: the controller interprets them as
/// data and reports them through
/// [`StepCompletion`](crate::controller::StepCompletion).
#[derive(Debug, Error)]
pub enum WizardError {
    /// The flow store rejected a write.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type for wizard operations.
pub type Result<T> = std::result::Result<T, WizardError>;
