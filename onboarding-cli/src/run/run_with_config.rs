//! Run a graph with a given config; does not read .env, returns the collected data.

use std::sync::Arc;

use onboarding::{
    Collaborators, FlowError, MockPrefetchService, OnboardingData, OnboardingService, ScreenGraph,
    StartOutcome,
};
use tokio::sync::oneshot;

use super::answers::Answers;
use super::custom::ScriptedCustomHandler;
use super::presenter::ScriptedPresenter;
use super::sink::PrintingEventSink;
use super::Error;
use crate::config::CliConfig;

/// Walks `graph` with simulated collaborators until the flow finishes.
///
/// Validation issues are logged as warnings only. A missing launch screen is an
/// error; so is a flow stopped by the step limit.
pub async fn run_with_config(
    config: &CliConfig,
    graph: ScreenGraph,
    answers: Answers,
) -> Result<OnboardingData, Error> {
    for issue in graph.validate() {
        tracing::warn!(%issue, "graph issue");
    }

    let graph = Arc::new(graph);
    let answers = Arc::new(answers);
    let collaborators = Collaborators::default()
        .with_prefetch(Arc::new(MockPrefetchService::with_latency(config.asset_latency)))
        .with_events(Arc::new(PrintingEventSink))
        .with_custom_screen_handler(Arc::new(ScriptedCustomHandler::new(answers.clone())));
    let flow = OnboardingService::spawn(collaborators);
    let presenter = Arc::new(ScriptedPresenter::new(
        graph.clone(),
        answers,
        flow.clone(),
        config.max_steps,
    ));

    let (tx, done) = oneshot::channel();
    let outcome = flow
        .start(graph.clone(), config.to_run_configuration(), presenter, move |result| {
            let _ = tx.send(result);
        })
        .await?;
    match outcome {
        StartOutcome::Started => {}
        StartOutcome::MissingLaunchScreen => {
            let _ = flow.shutdown();
            return Err(format!("launch screen {} is not in the graph", graph.launch_screen_id).into());
        }
        StartOutcome::AlreadyRunning => {
            let _ = flow.shutdown();
            return Err("a flow is already running".into());
        }
    }

    let data = done.await.map_err(|_| FlowError::ControllerClosed)??;
    let _ = flow.shutdown();
    Ok(data)
}
