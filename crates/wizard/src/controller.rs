//! The wizard flow controller.

use common::SessionId;
use flow_store::{FieldMap, FlowState, FlowStore};
use navigation::{Navigator, RouteLocation, ScrollBehavior, location_for_step, step_position};
use tokio::sync::broadcast;

use crate::config::WizardConfig;
use crate::error::Result;
use crate::policy::SkipPackagesPolicy;
use crate::steps::{PackageRecord, STEP_QUOTE_FORM, STEP_START, StepData, validate_packages};
use crate::submission::{QuoteRequest, SubmissionService};

/// Result of completing a wizard step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepCompletion {
    /// The flow moved on to the next step; nothing was submitted.
    Advanced,

    /// The quote was handed to the submission service and the flow moved
    /// to the summary. `notice` carries a non-blocking failure message
    /// when the service reported a transient problem.
    Finished { notice: Option<String> },

    /// The submitted data was rejected; the flow stays on the current
    /// step and `error` is available for inline display.
    Rejected { error: String },
}

/// Drives the multi-step quote wizard.
///
/// The controller derives the active step purely from the navigator's
/// location (the `step` query parameter), keeps the collected data in a
/// [`FlowStore`], and exits the step machine through the summary route.
/// Multiple controller instances over one store observe each other's
/// writes through the store's broadcast; last write wins on the whole
/// record.
pub struct FlowController<S, N, Q> {
    store: S,
    navigator: N,
    submitter: Q,
    policy: SkipPackagesPolicy,
    config: WizardConfig,
    session: SessionId,
}

impl<S, N, Q> FlowController<S, N, Q>
where
    S: FlowStore + Clone + 'static,
    N: Navigator,
    Q: SubmissionService,
{
    /// Creates a controller with the default policy and configuration.
    pub fn new(store: S, navigator: N, submitter: Q) -> Self {
        Self {
            store,
            navigator,
            submitter,
            policy: SkipPackagesPolicy::default(),
            config: WizardConfig::default(),
            session: SessionId::new(),
        }
    }

    /// Replaces the skip-packages policy.
    pub fn with_policy(mut self, policy: SkipPackagesPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replaces the routing and timing configuration.
    pub fn with_config(mut self, config: WizardConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns this controller's session ID.
    pub fn session(&self) -> SessionId {
        self.session
    }

    /// Returns the active step position, derived from the location only.
    pub fn current_step(&self) -> u32 {
        step_position(&self.navigator.location())
    }

    /// Returns the current flow state.
    pub async fn state(&self) -> FlowState {
        self.store.load().await
    }

    /// Subscribes to flow state changes.
    pub fn subscribe(&self) -> broadcast::Receiver<FlowState> {
        self.store.subscribe()
    }

    /// Records the service chosen on the cards step. Does not navigate.
    pub async fn set_selected_option(&self, value: impl Into<String> + Send) -> Result<()> {
        let mut state = self.store.load().await;
        state.select_option(value);
        self.store.save(&state).await?;
        Ok(())
    }

    /// Merges form fields into the flow state. Does not navigate.
    pub async fn merge_fields(&self, partial: FieldMap) -> Result<()> {
        let mut state = self.store.load().await;
        state.merge_fields(partial);
        self.store.save(&state).await?;
        Ok(())
    }

    /// Navigates to a step, preserving unrelated query parameters.
    ///
    /// Broadcasts the transitioning flag immediately and clears it after
    /// the configured delay, giving exit/enter animations time to finish
    /// before interaction is re-enabled.
    pub async fn go_to_step(&self, step: u32, scroll: ScrollBehavior) -> Result<()> {
        let state = self.store.load().await;
        self.store.save(&state.with_transitioning(true)).await?;

        let target = location_for_step(&self.navigator.location(), step);
        self.navigator.navigate(target, scroll);

        self.schedule_transition_end();
        Ok(())
    }

    /// Moves from position p to p+1.
    ///
    /// The controller enforces no upper bound; the last real step calls
    /// [`complete_step`](Self::complete_step) (which exits to the
    /// summary) instead of advancing.
    pub async fn advance(&self, scroll_to_top: bool) -> Result<()> {
        let scroll = if scroll_to_top {
            ScrollBehavior::Top
        } else {
            ScrollBehavior::Preserve
        };
        self.go_to_step(self.current_step() + 1, scroll).await
    }

    /// Moves from position p to p-1.
    ///
    /// Leaving step 1 backwards abandons the flow: the state is cleared
    /// and the wizard returns to its start route. At the start step this
    /// is a no-op.
    pub async fn retreat(&self) -> Result<()> {
        match self.current_step() {
            STEP_START => Ok(()),
            STEP_QUOTE_FORM => self.reset().await,
            position => self.go_to_step(position - 1, ScrollBehavior::Top).await,
        }
    }

    /// Exits the step machine to the summary route.
    ///
    /// Clears nothing; the locale prefix of the current path, when
    /// present, carries over to the summary route.
    pub async fn go_to_summary(&self) -> Result<()> {
        let current = self.navigator.location();
        let path = self.localized(&current, &self.config.summary_path);
        self.navigator
            .navigate(RouteLocation::new(path), ScrollBehavior::Top);
        Ok(())
    }

    /// Clears the flow state and returns to the bare wizard route.
    ///
    /// Callable from any position, including the summary page.
    #[tracing::instrument(skip(self), fields(session = %self.session))]
    pub async fn reset(&self) -> Result<()> {
        self.store.clear().await?;

        let current = self.navigator.location();
        let base = self.localized(&current, &self.config.base_path);
        let target = location_for_step(&current, 0).with_path(base);
        self.navigator.navigate(target, ScrollBehavior::Top);

        metrics::counter!("wizard_flows_reset").increment(1);
        tracing::info!("wizard flow reset");
        Ok(())
    }

    /// Completes the current step with its collected data.
    ///
    /// Form data is merged into the flow state; if the selected service
    /// skips the packages step, the quote is submitted directly from
    /// here, otherwise the flow advances. Package data is validated,
    /// then submitted together with the stored fields.
    ///
    /// The submission service is invoked from exactly one of the two
    /// paths, once per completed flow. The controller performs no
    /// in-flight locking: the caller must disable the triggering control
    /// while this call is pending, or the service will be invoked twice.
    #[tracing::instrument(skip(self, data), fields(session = %self.session))]
    pub async fn complete_step(&self, data: StepData) -> Result<StepCompletion> {
        match data {
            StepData::Form(fields) => self.complete_form(fields).await,
            StepData::Packages(packages) => self.complete_packages(packages).await,
        }
    }

    async fn complete_form(&self, fields: FieldMap) -> Result<StepCompletion> {
        self.merge_fields(fields).await?;

        let state = self.store.load().await;
        if self.policy.skips_packages(&state.selected_option) {
            tracing::info!(service = %state.selected_option, "service skips the packages step");
            self.submit_and_finish(state, Vec::new()).await
        } else {
            self.advance(true).await?;
            Ok(StepCompletion::Advanced)
        }
    }

    async fn complete_packages(&self, packages: Vec<PackageRecord>) -> Result<StepCompletion> {
        if let Err(invalid) = validate_packages(&packages) {
            return Ok(StepCompletion::Rejected {
                error: invalid.to_string(),
            });
        }

        let state = self.store.load().await;
        self.submit_and_finish(state, packages).await
    }

    async fn submit_and_finish(
        &self,
        state: FlowState,
        packages: Vec<PackageRecord>,
    ) -> Result<StepCompletion> {
        let request = QuoteRequest {
            service_type: state.has_selection().then(|| state.selected_option.clone()),
            form_data: state.collected_fields.unwrap_or_default(),
            packages,
        };

        metrics::counter!("wizard_submissions_total").increment(1);
        let outcome = self.submitter.submit(request).await;

        if outcome.success {
            self.go_to_summary().await?;
            return Ok(StepCompletion::Finished { notice: None });
        }

        if outcome.validation_errors {
            metrics::counter!("wizard_submission_rejections").increment(1);
            let error = outcome
                .error
                .unwrap_or_else(|| "submission rejected".to_string());
            tracing::info!(%error, "submission rejected, staying on current step");
            return Ok(StepCompletion::Rejected { error });
        }

        // Transient failure: surface it without trapping the user in the
        // form. The collected data stays in the store for follow-up.
        metrics::counter!("wizard_submission_failures").increment(1);
        let notice = outcome
            .error
            .unwrap_or_else(|| "submission failed".to_string());
        tracing::warn!(%notice, "submission failed, continuing to summary");
        self.go_to_summary().await?;
        Ok(StepCompletion::Finished {
            notice: Some(notice),
        })
    }

    /// Prefixes a configured path with the current locale, when present.
    fn localized(&self, current: &RouteLocation, path: &str) -> String {
        match current.locale_prefix() {
            Some(locale) => format!("/{locale}{path}"),
            None => path.to_string(),
        }
    }

    fn schedule_transition_end(&self) {
        let store = self.store.clone();
        let delay = self.config.transition_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Reload instead of reusing the snapshot: fields merged while
            // the transition was in flight must not be overwritten.
            let state = store.load().await;
            if let Err(err) = store.save(&state).await {
                tracing::warn!(%err, "failed to clear transition flag");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submission::InMemoryQuoteService;
    use flow_store::InMemorySessionStore;
    use navigation::InMemoryNavigator;
    use std::time::Duration;

    type TestController =
        FlowController<InMemorySessionStore, InMemoryNavigator, InMemoryQuoteService>;

    fn setup_at(
        raw: &str,
    ) -> (
        TestController,
        InMemorySessionStore,
        InMemoryNavigator,
        InMemoryQuoteService,
    ) {
        let store = InMemorySessionStore::new();
        let navigator = InMemoryNavigator::at(raw);
        let submitter = InMemoryQuoteService::new();

        let controller = FlowController::new(store.clone(), navigator.clone(), submitter.clone())
            .with_config(WizardConfig {
                transition_delay: Duration::from_millis(5),
                ..WizardConfig::default()
            });

        (controller, store, navigator, submitter)
    }

    fn setup() -> (
        TestController,
        InMemorySessionStore,
        InMemoryNavigator,
        InMemoryQuoteService,
    ) {
        setup_at("/quote")
    }

    fn form_fields() -> FieldMap {
        FieldMap::from([
            ("name".into(), "Dana".into()),
            ("email".into(), "dana@example.com".into()),
        ])
    }

    fn packages() -> Vec<PackageRecord> {
        vec![PackageRecord::new("Machine parts", 2, 120.0).with_dimensions(80.0, 60.0, 40.0)]
    }

    #[tokio::test]
    async fn advance_increments_position() {
        let (controller, _, _, _) = setup();
        assert_eq!(controller.current_step(), 0);

        controller.advance(true).await.unwrap();
        assert_eq!(controller.current_step(), 1);

        controller.advance(true).await.unwrap();
        assert_eq!(controller.current_step(), 2);
    }

    #[tokio::test]
    async fn advance_is_unbounded() {
        let (controller, _, _, _) = setup_at("/quote?step=41");
        controller.advance(true).await.unwrap();
        assert_eq!(controller.current_step(), 42);
    }

    #[tokio::test]
    async fn advance_preserves_unrelated_query_parameters() {
        let (controller, _, navigator, _) = setup_at("/quote?foo=bar&step=2");
        controller.advance(true).await.unwrap();

        let location = navigator.location();
        assert_eq!(location.param("foo"), Some("bar"));
        assert_eq!(location.param("step"), Some("3"));
    }

    #[tokio::test]
    async fn advance_scroll_flag_selects_behavior() {
        let (controller, _, navigator, _) = setup();
        controller.advance(true).await.unwrap();
        controller.advance(false).await.unwrap();

        let history = navigator.history();
        assert_eq!(history[0].1, ScrollBehavior::Top);
        assert_eq!(history[1].1, ScrollBehavior::Preserve);
    }

    #[tokio::test]
    async fn retreat_decrements_position_above_one() {
        let (controller, store, _, _) = setup_at("/quote?step=3");
        controller.set_selected_option("Air Freight").await.unwrap();

        controller.retreat().await.unwrap();
        assert_eq!(controller.current_step(), 2);
        // Retreating above step 1 keeps the collected state.
        assert!(store.load().await.has_selection());
    }

    #[tokio::test]
    async fn retreat_from_step_one_resets_the_flow() {
        let (controller, store, navigator, _) = setup_at("/quote?step=1");
        controller.set_selected_option("Air Freight").await.unwrap();
        controller.merge_fields(form_fields()).await.unwrap();

        controller.retreat().await.unwrap();

        assert_eq!(controller.current_step(), 0);
        assert!(store.load().await.is_empty());
        assert_eq!(navigator.location().param("step"), None);
    }

    #[tokio::test]
    async fn retreat_at_start_is_a_no_op() {
        let (controller, store, navigator, _) = setup();
        controller.set_selected_option("Air Freight").await.unwrap();

        controller.retreat().await.unwrap();

        assert_eq!(controller.current_step(), 0);
        assert_eq!(navigator.navigation_count(), 0);
        assert!(store.load().await.has_selection());
    }

    #[tokio::test]
    async fn reset_clears_state_and_returns_to_base_route() {
        let (controller, store, navigator, _) = setup_at("/quote/summary");
        controller.set_selected_option("Air Freight").await.unwrap();

        controller.reset().await.unwrap();

        assert!(store.load().await.is_empty());
        let location = navigator.location();
        assert_eq!(location.path(), "/quote");
        assert_eq!(location.param("step"), None);
    }

    #[tokio::test]
    async fn reset_preserves_locale_prefix() {
        let (controller, _, navigator, _) = setup_at("/ar/quote/summary");
        controller.reset().await.unwrap();
        assert_eq!(navigator.location().path(), "/ar/quote");
    }

    #[tokio::test]
    async fn mutators_do_not_navigate() {
        let (controller, _, navigator, _) = setup_at("/quote?step=1");
        controller.set_selected_option("Air Freight").await.unwrap();
        controller.merge_fields(form_fields()).await.unwrap();

        assert_eq!(navigator.navigation_count(), 0);
        assert_eq!(controller.current_step(), 1);
    }

    #[tokio::test]
    async fn navigation_does_not_touch_flow_state() {
        let (controller, store, _, _) = setup_at("/quote?step=2");
        controller.set_selected_option("Air Freight").await.unwrap();
        let before = store.load().await;

        controller.advance(true).await.unwrap();
        controller.retreat().await.unwrap();

        assert_eq!(store.load().await, before);
        assert_eq!(controller.current_step(), 2);
    }

    #[tokio::test]
    async fn go_to_summary_uses_configured_route() {
        let (controller, _, navigator, _) = setup_at("/quote?step=2");
        controller.go_to_summary().await.unwrap();

        let location = navigator.location();
        assert_eq!(location.path(), "/quote/summary");
        assert_eq!(location.param("step"), None);
    }

    #[tokio::test]
    async fn go_to_summary_preserves_locale_prefix() {
        let (controller, _, navigator, _) = setup_at("/ar/quote?step=2");
        controller.go_to_summary().await.unwrap();
        assert_eq!(navigator.location().path(), "/ar/quote/summary");
    }

    #[tokio::test]
    async fn go_to_summary_keeps_flow_state() {
        let (controller, store, _, _) = setup_at("/quote?step=2");
        controller.set_selected_option("Air Freight").await.unwrap();

        controller.go_to_summary().await.unwrap();
        assert!(store.load().await.has_selection());
    }

    #[tokio::test]
    async fn transition_flag_broadcasts_then_clears() {
        let (controller, store, _, _) = setup();
        let mut rx = store.subscribe();

        controller.advance(true).await.unwrap();

        // The navigation broadcast carries the flag...
        let during = rx.recv().await.unwrap();
        assert!(during.is_transitioning);

        // ...and the debounce clears it shortly after.
        let after = rx.recv().await.unwrap();
        assert!(!after.is_transitioning);
    }

    #[tokio::test]
    async fn form_step_advances_for_freight_services() {
        let (controller, _, navigator, submitter) = setup_at("/quote?step=1");
        controller.set_selected_option("Air Freight").await.unwrap();

        let completion = controller
            .complete_step(StepData::Form(form_fields()))
            .await
            .unwrap();

        assert_eq!(completion, StepCompletion::Advanced);
        assert_eq!(controller.current_step(), 2);
        assert_eq!(submitter.submission_count(), 0);
        assert_eq!(navigator.location().param("step"), Some("2"));
    }

    #[tokio::test]
    async fn form_step_submits_directly_for_skipped_services() {
        let (controller, _, navigator, submitter) = setup_at("/quote?step=1");
        controller
            .set_selected_option("Warehousing Services")
            .await
            .unwrap();

        let completion = controller
            .complete_step(StepData::Form(form_fields()))
            .await
            .unwrap();

        assert_eq!(completion, StepCompletion::Finished { notice: None });
        assert_eq!(submitter.submission_count(), 1);
        assert_eq!(navigator.location().path(), "/quote/summary");

        let request = submitter.last_request().unwrap();
        assert_eq!(request.service_type.as_deref(), Some("Warehousing Services"));
        assert!(request.packages.is_empty());
        assert_eq!(request.form_data.get("name").map(String::as_str), Some("Dana"));
    }

    #[tokio::test]
    async fn packages_step_submits_exactly_once() {
        let (controller, _, navigator, submitter) = setup_at("/quote?step=1");
        controller.set_selected_option("Sea Freight").await.unwrap();

        let first = controller
            .complete_step(StepData::Form(form_fields()))
            .await
            .unwrap();
        assert_eq!(first, StepCompletion::Advanced);
        assert_eq!(submitter.submission_count(), 0);

        let second = controller
            .complete_step(StepData::Packages(packages()))
            .await
            .unwrap();
        assert_eq!(second, StepCompletion::Finished { notice: None });
        assert_eq!(submitter.submission_count(), 1);
        assert_eq!(navigator.location().path(), "/quote/summary");

        let request = submitter.last_request().unwrap();
        assert_eq!(request.packages.len(), 1);
        assert_eq!(request.form_data.get("email").map(String::as_str), Some("dana@example.com"));
    }

    #[tokio::test]
    async fn validation_rejection_blocks_the_summary() {
        let (controller, _, navigator, submitter) = setup_at("/quote?step=2");
        controller.set_selected_option("Sea Freight").await.unwrap();
        controller.merge_fields(form_fields()).await.unwrap();
        submitter.set_reject_validation(true);
        let navigations_before = navigator.navigation_count();

        let completion = controller
            .complete_step(StepData::Packages(packages()))
            .await
            .unwrap();

        match completion {
            StepCompletion::Rejected { error } => {
                assert!(error.contains("required fields"));
            }
            other => panic!("expected rejection, got {other:?}"),
        }
        assert_eq!(controller.current_step(), 2);
        assert_eq!(navigator.navigation_count(), navigations_before);
    }

    #[tokio::test]
    async fn transient_failure_still_reaches_the_summary() {
        let (controller, _, navigator, submitter) = setup_at("/quote?step=2");
        controller.set_selected_option("Sea Freight").await.unwrap();
        controller.merge_fields(form_fields()).await.unwrap();
        submitter.set_fail_transient(true);

        let completion = controller
            .complete_step(StepData::Packages(packages()))
            .await
            .unwrap();

        assert_eq!(
            completion,
            StepCompletion::Finished {
                notice: Some("notification service unavailable".to_string())
            }
        );
        assert_eq!(navigator.location().path(), "/quote/summary");
    }

    #[tokio::test]
    async fn invalid_packages_are_rejected_before_submission() {
        let (controller, _, _, submitter) = setup_at("/quote?step=2");
        controller.set_selected_option("Sea Freight").await.unwrap();

        let completion = controller
            .complete_step(StepData::Packages(vec![]))
            .await
            .unwrap();

        assert!(matches!(completion, StepCompletion::Rejected { .. }));
        assert_eq!(submitter.submission_count(), 0);
    }

    #[tokio::test]
    async fn unselected_service_submits_without_service_type() {
        let (controller, _, _, submitter) = setup_at("/quote?step=2");

        controller
            .complete_step(StepData::Packages(packages()))
            .await
            .unwrap();

        assert_eq!(submitter.last_request().unwrap().service_type, None);
    }

    #[tokio::test]
    async fn custom_policy_changes_the_branch() {
        let store = InMemorySessionStore::new();
        let navigator = InMemoryNavigator::at("/quote?step=1");
        let submitter = InMemoryQuoteService::new();
        let controller = FlowController::new(store, navigator.clone(), submitter.clone())
            .with_policy(SkipPackagesPolicy::new(["freight"]));

        controller.set_selected_option("Air Freight").await.unwrap();
        let completion = controller
            .complete_step(StepData::Form(form_fields()))
            .await
            .unwrap();

        assert_eq!(completion, StepCompletion::Finished { notice: None });
        assert_eq!(submitter.submission_count(), 1);
    }
}
