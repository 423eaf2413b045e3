//! Freshdesk MCP server
//!
//! This binary runs as an MCP server over stdio, giving MCP clients access
//! to a Freshdesk helpdesk.
//!
//! # Configuration
//!
//! Set the following environment variables (or use a `.env` file):
//!
//! - `FRESHDESK_HELPDESK_NAME`: helpdesk subdomain
//! - `FRESHDESK_API_KEY`: agent API key
//! - `FRESHDESK_BASE_URL` (optional): API root override
//! - `FRESHDESK_TIMEOUT_SECS` (optional): request timeout
//!
//! # Usage
//!
//! ```bash
//! FRESHDESK_HELPDESK_NAME=acme FRESHDESK_API_KEY=xxx ./freshdesk
//! ```

use anyhow::{Context, Result};
use rmcp::{transport::stdio, ServiceExt};
use tracing_subscriber::{fmt, EnvFilter};

use freshdesk::{config, freshdesk_client, server};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // stdout carries MCP JSON-RPC, logs go to stderr
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("freshdesk=info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!("Starting Freshdesk MCP server v{}", env!("CARGO_PKG_VERSION"));

    let config = config::Config::from_env().context("Failed to load configuration")?;

    tracing::debug!(
        helpdesk = %config.helpdesk_name,
        base_url = %config.base_url,
        "Configuration loaded"
    );

    let client = freshdesk_client::FreshdeskClient::new(&config)
        .context("Failed to create Freshdesk client")?;

    tracing::info!("Testing connection to Freshdesk...");
    if let Err(e) = client.test_connection().await {
        tracing::error!(error = %e, "Connection test failed");
        tracing::warn!(
            "Server will start but may not be able to reach Freshdesk. \
             Check configuration and network connectivity."
        );
    }

    let server = server::FreshdeskServer::new(client);

    tracing::info!("Server initialized, starting stdio transport");

    let service = server
        .serve(stdio())
        .await
        .inspect_err(|e| {
            tracing::error!("serving error: {:?}", e);
        })
        .context("Failed to start server")?;

    tracing::info!("Server running, waiting for requests");

    service
        .waiting()
        .await
        .context("Server error during operation")?;

    tracing::info!("Server shutting down");

    Ok(())
}
