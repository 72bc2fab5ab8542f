//! Run entry points: run a graph file with env config, or with overrides.
//!
//! Simulated collaborators live in submodules: scripted [`Answers`], a
//! presenter that answers each screen, a custom screen handler and a
//! printing event sink.

pub use crate::config::Error;

mod answers;
mod custom;
mod presenter;
mod run_with_config;
mod sink;

use std::path::Path;

use onboarding::{OnboardingData, ScreenGraph};

use crate::config::{CliConfig, RunOptions};

pub use answers::{Answer, Answers};
pub use custom::ScriptedCustomHandler;
pub use presenter::ScriptedPresenter;
pub use run_with_config::run_with_config;
pub use sink::PrintingEventSink;

/// Run `graph_path` with config from env (and .env) and optional overrides.
///
/// Loads `.env`, builds `CliConfig` from env, applies `options`, loads the
/// graph and answers, then calls [`run_with_config`].
pub async fn run_with_options(
    graph_path: &Path,
    answers_path: Option<&Path>,
    options: &RunOptions,
) -> Result<OnboardingData, Error> {
    dotenv::dotenv().ok();
    let mut config = CliConfig::from_env()?;
    config.apply_options(options);

    let graph = ScreenGraph::from_path(graph_path)?;
    let answers = match answers_path {
        Some(path) => Answers::from_path(path)?,
        None => Answers::default(),
    };
    run_with_config(&config, graph, answers).await
}

/// Run `graph_path` with config from env only and no scripted answers.
pub async fn run(graph_path: &Path) -> Result<OnboardingData, Error> {
    run_with_options(graph_path, None, &RunOptions::default()).await
}
