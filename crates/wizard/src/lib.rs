//! Flow controller for the multi-step quote wizard.
//!
//! The wizard walks a visitor through requesting a shipping quote:
//! 1. Choose a service on the cards step (position 0, the start step)
//! 2. Fill in the quote form (position 1)
//! 3. Describe the packages (position 2), unless the chosen service
//!    skips that step, in which case the form step submits directly
//!
//! A completed flow is handed to the submission service exactly once —
//! from the form step when the skip-packages rule applies, from the
//! packages step otherwise — and then exits to the summary route.

pub mod config;
pub mod controller;
pub mod error;
pub mod policy;
pub mod steps;
pub mod submission;

pub use config::WizardConfig;
pub use controller::{FlowController, StepCompletion};
pub use error::{Result, WizardError};
pub use policy::SkipPackagesPolicy;
pub use steps::{
    Dimensions, InvalidPackage, PackageRecord, STEP_PACKAGES, STEP_QUOTE_FORM, STEP_START,
    StepData, validate_packages,
};
pub use submission::{
    InMemoryQuoteService, QuoteRequest, SubmissionOutcome, SubmissionService,
};
