//! onboarding-cli library: walk an onboarding graph from the command line.
//!
//! Loads a graph JSON file, drives it with simulated collaborators (fixed
//! latency prefetch, scripted answers, printing presenter and event sink)
//! and returns the collected data.
//!
//! ## Usage
//!
//! ```rust,no_run,ignore
//! let data = onboarding_cli::run(std::path::Path::new("graph.json")).await?;
//! println!("{}", serde_json::to_string_pretty(&data)?);
//! ```

mod config;
mod logging;
mod run;

pub use config::{CliConfig, Error, RunOptions};
pub use logging::init_tracing;
pub use run::{
    run, run_with_config, run_with_options, Answer, Answers, PrintingEventSink,
    ScriptedCustomHandler, ScriptedPresenter,
};

#[cfg(test)]
mod tests;
