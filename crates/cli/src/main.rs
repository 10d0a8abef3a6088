//! docsage CLI — the main entry point.
//!
//! Commands:
//! - `serve` — start the HTTP API server

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "docsage",
    about = "docsage — document question-answering assistant",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Override the configured port
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Serve { port } => {
            let mut config = docsage_config::AppConfig::load()?;
            if let Some(port) = port {
                config.server.port = port;
            }
            config.validate()?;
            docsage_server::serve(config).await?;
        }
    }

    Ok(())
}
