//! Scripted walkthrough of the quote wizard engine.
//!
//! Wires the in-memory store, navigator, and submission service together
//! and drives one complete flow, logging every transition. Set
//! `WIZARD_SERVICE` to a skipping service (e.g. "Warehousing Services")
//! to see the skip-packages branch.

mod config;

use flow_store::{FieldMap, InMemorySessionStore};
use navigation::{InMemoryNavigator, Navigator};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use wizard::{
    FlowController, InMemoryQuoteService, PackageRecord, StepCompletion, StepData,
};

use crate::config::DemoConfig;

#[tokio::main]
async fn main() {
    // 1. Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 2. Load configuration and wire the engine
    let config = DemoConfig::from_env();
    let store = InMemorySessionStore::new();
    let navigator = InMemoryNavigator::at(&config.start_route());
    let submitter = InMemoryQuoteService::new();
    let controller = FlowController::new(store, navigator.clone(), submitter.clone());

    tracing::info!(session = %controller.session(), route = %navigator.location(), "wizard ready");

    // 3. Cards step: choose a service and advance
    controller
        .set_selected_option(&config.service)
        .await
        .expect("failed to record the selected service");
    controller.advance(true).await.expect("failed to advance");
    tracing::info!(service = %config.service, step = controller.current_step(), "service selected");

    // 4. Form step
    let fields = FieldMap::from([
        ("name".into(), "Dana Reeve".into()),
        ("email".into(), "dana@example.com".into()),
        ("origin".into(), "Dubai".into()),
        ("destination".into(), "Rotterdam".into()),
    ]);
    let completion = controller
        .complete_step(StepData::Form(fields))
        .await
        .expect("failed to complete the form step");

    // 5. Packages step, unless the service skipped it
    let completion = match completion {
        StepCompletion::Advanced => {
            tracing::info!(step = controller.current_step(), "describing packages");
            let packages = vec![
                PackageRecord::new("Machine parts", 2, 120.0).with_dimensions(80.0, 60.0, 40.0),
                PackageRecord::new("Spare blades", 1, 35.5),
            ];
            controller
                .complete_step(StepData::Packages(packages))
                .await
                .expect("failed to complete the packages step")
        }
        other => other,
    };

    // 6. Report the outcome
    match completion {
        StepCompletion::Finished { notice: None } => {
            tracing::info!(route = %navigator.location(), "flow finished");
        }
        StepCompletion::Finished { notice: Some(notice) } => {
            tracing::warn!(%notice, route = %navigator.location(), "flow finished with a notice");
        }
        StepCompletion::Rejected { error } => {
            tracing::error!(%error, "submission rejected");
            return;
        }
        StepCompletion::Advanced => unreachable!("packages step never advances"),
    }

    let request = submitter
        .last_request()
        .expect("a finished flow submits exactly once");
    let pretty = serde_json::to_string_pretty(&request).expect("request serializes");
    println!("submitted quote request:\n{pretty}");
}
