//! fishid - identify fish species in photos with a multimodal LLM.
//!
//! Runs an HTTP service that classifies uploaded JPEG/PNG images into a fixed
//! four-field record (species, description, habitat, edibility) and serves
//! free-text facts about a species. The same operations are available as
//! one-shot commands.
//!
//! # Usage
//!
//! ```bash
//! # Start the HTTP service (needs GEMINI_API_KEY in the environment or .env)
//! fishid serve --port 8000
//!
//! # Classify a local image
//! fishid classify ./catch.jpg --pretty
//!
//! # Facts about a species
//! fishid facts "Rainbow Trout"
//!
//! # View configuration
//! fishid config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;
mod server;

/// fishid - identify fish species in photos with a multimodal LLM.
#[derive(Parser, Debug)]
#[command(name = "fishid")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP classification service
    Serve(cli::serve::ServeArgs),

    /// Classify the fish in a local image file
    Classify(cli::classify::ClassifyArgs),

    /// Generate facts about a fish species
    Facts(cli::facts::FactsArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Secrets usually live in a local .env file; a missing file is fine.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Logging isn't initialized yet, so use eprintln for config warnings.
    let config = match fishid_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration for logging. Check your config file with `fishid config path`."
            );
            fishid_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("fishid v{}", fishid_core::VERSION);

    match cli.command {
        Commands::Serve(args) => cli::serve::execute(args).await,
        Commands::Classify(args) => cli::classify::execute(args).await,
        Commands::Facts(args) => cli::facts::execute(args).await,
        Commands::Config(args) => cli::config::execute(args).await,
    }
}
