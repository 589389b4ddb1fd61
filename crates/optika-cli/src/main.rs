mod browse;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::browse::BrowseArgs;

#[derive(Debug, Parser)]
#[command(name = "optika-cli")]
#[command(about = "Optika catalog command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Aggregate and print one page of a configured listing
    Browse(BrowseArgs),
    /// List the configured listing presets
    Listings,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("optika-cli: use `browse` or `listings` (see --help)");
        return Ok(());
    };

    let config = optika_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match command {
        Commands::Browse(args) => browse::run_browse(&config, &args).await,
        Commands::Listings => browse::run_listings(&config),
    }
}
