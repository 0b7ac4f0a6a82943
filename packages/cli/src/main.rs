use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tracker_cli::config::Config;
use tracker_config::RUST_LOG;

#[derive(Parser)]
#[command(name = "tracker")]
#[command(about = "Tracker - multi-tenant project and issue tracker")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the REST API server
    Serve {
        /// Port to listen on (overrides TRACKER_API_PORT)
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(RUST_LOG).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port } => {
            let mut config = Config::from_env()?;
            if let Some(port) = port {
                config = config.with_port(port)?;
            }
            tracker_cli::run_server(config).await
        }
    }
}
