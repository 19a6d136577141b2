//! # Acquia Connector CLI
//!
//! ```text
//! acquia-connector status [--force]
//! acquia-connector sign --params '{"rpc_version": 2}'
//! acquia-connector search-cookie --env prod --path '/solr/ABCD-1/select?q=x' [--body ...]
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use connector_runtime::{commands, ConnectorConfig, ConnectorContainer};

/// Acquia Connector: signed calls to the Acquia Network and Acquia Search
#[derive(Parser, Debug)]
#[command(name = "acquia-connector")]
#[command(about = "Shared-secret authentication for Acquia Network and Acquia Search")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "connector.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the subscription state
    Status {
        /// Check with the service even if the cached state is fresh
        #[arg(long)]
        force: bool,
    },
    /// Print a signed envelope for a JSON object
    Sign {
        /// Request body as a JSON object
        #[arg(long)]
        params: String,
    },
    /// Print the Cookie header for a search request
    SearchCookie {
        /// Search environment id from the configuration
        #[arg(long)]
        env: String,
        /// Path and query of the request
        #[arg(long)]
        path: String,
        /// POST body (GET when omitted)
        #[arg(long)]
        body: Option<String>,
    },
}

/// Load configuration from file (if present) and environment.
fn load_config(path: &Path) -> Result<ConnectorConfig> {
    let mut config = if path.exists() {
        ConnectorConfig::load(path)?
    } else {
        warn!(path = %path.display(), "Config file not found, using defaults");
        ConnectorConfig::default()
    };

    config.apply_env_overrides();
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args.config).context("Failed to load configuration")?;
    info!(server_url = %config.network.server_url, "Configuration loaded");

    let container = ConnectorContainer::new(config).context("Failed to initialize HTTP client")?;

    let output = match args.command {
        Command::Status { force } => commands::status(&container, force).await?,
        Command::Sign { params } => commands::sign(&container, &params)?,
        Command::SearchCookie { env, path, body } => {
            commands::search_cookie(&container, &env, &path, body).await?
        }
    };
    print!("{output}");

    Ok(())
}
