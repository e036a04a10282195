// ============================================================================
// tweet-relay — OAuth 1.0a signing relay for the Twitter API
// ============================================================================
// Usage:
//   tweet-relay serve [--bind ADDR] [--api-base URL]   Run the HTTP relay
//   tweet-relay sign --method DELETE --url URL         Print a signed header
//
// Credentials come from --env-file (default .env), falling back to the
// TWITTER_* process environment variables.
// ============================================================================

mod routes;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use relay_core::auth::build_auth_header;
use relay_core::executor::{DEFAULT_TIMEOUT, TWITTER_API_BASE};
use relay_core::{Credentials, TwitterExecutor};
use tracing::info;

use crate::routes::AppState;

/// Tweet relay: signs and forwards tweet create/delete calls
#[derive(Parser)]
#[command(name = "tweet-relay", version, about = "Relay tweet posts and deletes to the Twitter API")]
struct Cli {
    /// Path to the credentials file
    #[arg(long, global = true, default_value = ".env")]
    env_file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP relay (POST /tweet, DELETE /tweet/{id})
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "0.0.0.0:8080")]
        bind: String,

        /// Upstream API base URL
        #[arg(long, default_value = TWITTER_API_BASE)]
        api_base: String,

        /// Timeout for each upstream call, in seconds
        #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
        timeout_secs: u64,
    },

    /// Print an Authorization header for one request
    Sign {
        /// HTTP method, e.g. POST or DELETE
        #[arg(long)]
        method: String,

        /// Request URL without query string
        #[arg(long)]
        url: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tweet_relay=debug".parse()?)
                .add_directive("relay_core=debug".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let credentials = Credentials::load(&cli.env_file)?;

    match cli.command {
        Commands::Serve {
            bind,
            api_base,
            timeout_secs,
        } => cmd_serve(credentials, &bind, &api_base, timeout_secs).await,
        Commands::Sign { method, url } => cmd_sign(&credentials, &method, &url),
    }
}

async fn cmd_serve(
    credentials: Credentials,
    bind: &str,
    api_base: &str,
    timeout_secs: u64,
) -> Result<()> {
    let executor = TwitterExecutor::new(
        Arc::new(credentials),
        api_base,
        Duration::from_secs(timeout_secs),
    )?;
    let state = Arc::new(AppState {
        api: Arc::new(executor),
    });

    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!(
        "Server started at http://{} (upstream {})",
        listener.local_addr()?,
        api_base
    );

    axum::serve(listener, routes::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

fn cmd_sign(credentials: &Credentials, method: &str, url: &str) -> Result<()> {
    if url.contains('?') {
        anyhow::bail!("URL must not contain a query string: {}", url);
    }

    println!("{}", build_auth_header(&method.to_uppercase(), url, credentials));
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
