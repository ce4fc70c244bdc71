//! Framesight CLI - analyze sampled video frames with vision-capable LLMs.
//!
//! Framesight takes the frames and metadata produced by a sampling run,
//! sends each frame to a configured chat-completion vendor, and emits the
//! structured per-frame results in temporal order.
//!
//! # Usage
//!
//! ```bash
//! # Analyze a sampling run
//! framesight analyze ./frames/metadata.json
//!
//! # Fetch a video from an allow-listed source
//! framesight download https://www.youtube.com/watch?v=abc123
//!
//! # View configuration
//! framesight config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// Framesight - structured video-frame analysis over vision LLMs.
#[derive(Parser, Debug)]
#[command(name = "framesight")]
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
    /// Analyze sampled frames and emit structured results
    Analyze(cli::analyze::AnalyzeArgs),

    /// Download a video from an allow-listed source
    Download(cli::download::DownloadArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging from config, with CLI verbose override.
    // Note: logging isn't initialized yet, so use eprintln for config warnings.
    let config = match framesight_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `framesight config path`."
            );
            framesight_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Framesight v{}", framesight_core::VERSION);

    // Dispatch to the appropriate command handler
    match cli.command {
        Commands::Analyze(args) => cli::analyze::execute(args, config).await,
        Commands::Download(args) => cli::download::execute(args, config).await,
        Commands::Config(args) => cli::config::execute(args).await,
    }
}
