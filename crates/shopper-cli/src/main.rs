use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser, Subcommand};
use shopper_core::AppConfig;
use shopper_deals::{DealLookupService, LookupResult};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "shopper-cli")]
#[command(about = "Look up local grocery deals")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Find the top on-sale listing for an item and print it as JSON.
    Lookup {
        /// Item to search for, e.g. "milk".
        item: String,

        /// Free-text locale passed to the provider as-is.
        #[arg(long)]
        location: Option<String>,

        /// YAML file holding `serpapi_key` (overrides `SHOPPER_TOOL_CONFIG`).
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let mut app = shopper_core::load_app_config()?;
    init_tracing(&app)?;
    tracing::debug!(?app, "configuration loaded");

    match cli.command {
        Some(Commands::Lookup {
            item,
            location,
            config,
        }) => {
            if config.is_some() {
                app.tool_config_path = config;
            }
            run_lookup(&app, &item, location.as_deref()).await
        }
        None => {
            Cli::command().print_help()?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn init_tracing(app: &AppConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(app.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

async fn run_lookup(
    app: &AppConfig,
    item: &str,
    location: Option<&str>,
) -> anyhow::Result<ExitCode> {
    let tool_config = shopper_core::resolve_tool_config(app)?;
    let location = location.unwrap_or(app.default_location.as_str());

    let result = DealLookupService::new()
        .lookup(item, location, &tool_config)
        .await;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(exit_code(&result))
}

fn exit_code(result: &LookupResult) -> ExitCode {
    if result.is_error() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
