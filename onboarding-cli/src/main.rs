//! Onboarding binary: walk a screen graph with scripted answers and print the result.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use onboarding::AssetsPrefetchMode;
use onboarding_cli::{init_tracing, run_with_options, RunOptions};

#[derive(Parser, Debug)]
#[command(name = "onboarding")]
#[command(about = "Onboarding flow engine: run a screen graph end to end")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Walk the graph, printing presentations and events, then the collected data as JSON.
    Run(RunArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Screen graph JSON file
    #[arg(long, value_name = "FILE")]
    graph: PathBuf,

    /// Scripted answers JSON file: {"<screen id>": {"value": ..., "action": "<name>"}}
    #[arg(long, value_name = "FILE")]
    answers: Option<PathBuf>,

    /// Prefetch mode: wait_for_all_done | wait_for_first_done | wait_for_screen_to_load[:ms]
    #[arg(long, value_name = "MODE")]
    prefetch: Option<AssetsPrefetchMode>,

    /// Simulated asset latency per screen, in milliseconds
    #[arg(long, value_name = "MS")]
    asset_latency_ms: Option<u64>,

    /// Custom loading view identifier
    #[arg(long, value_name = "ID")]
    loading_view: Option<String>,

    /// Debug logs (engine decisions, readiness waits) on stderr
    #[arg(short, long)]
    verbose: bool,
}

impl RunArgs {
    fn to_options(&self) -> RunOptions {
        RunOptions {
            prefetch_mode: self.prefetch,
            asset_latency_ms: self.asset_latency_ms,
            custom_loading_view: self.loading_view.clone(),
            verbose: self.verbose,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();
    dotenv::dotenv().ok();

    match cli.command {
        Command::Run(args) => {
            let options = args.to_options();
            if let Err(e) = init_tracing(options.verbose) {
                eprintln!("warning: tracing not initialised: {}", e);
            }
            let data = match run_with_options(&args.graph, args.answers.as_deref(), &options).await {
                Ok(data) => data,
                Err(e) => {
                    eprintln!("error: {}", e);
                    std::process::exit(1);
                }
            };
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
    }

    Ok(())
}
