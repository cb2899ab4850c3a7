mod profiles;
mod report;
mod search;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::search::SearchArgs;

#[derive(Debug, Parser)]
#[command(name = "placescout")]
#[command(about = "Find nearby businesses and export their contact details")]
struct Cli {
    /// Debug logging and a preview of the first result rows
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search around a location and write the results to a spreadsheet
    Search(SearchArgs),
    /// List saved searches from the profiles file
    Profiles,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = placescout_core::load_app_config()?;
    init_tracing(&config, cli.verbose)?;

    match cli.command {
        Commands::Search(args) => search::run_search(&config, &args, cli.verbose).await,
        Commands::Profiles => profiles::run_profiles(&config),
    }
}

/// `RUST_LOG` wins; otherwise the configured level, raised to `debug` by
/// `--verbose`.
fn init_tracing(config: &placescout_core::AppConfig, verbose: bool) -> anyhow::Result<()> {
    let default_level = if verbose {
        "debug".to_string()
    } else {
        config.log_level.clone()
    };
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
