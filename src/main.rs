//! Portfolio Projects API - Main Application Entry Point
//!
//! Lists every portfolio project stored in a DynamoDB table as JSON, with CORS
//! headers for the browser client.
//!
//! # Architecture
//!
//! - **Runtime**: AWS Lambda behind API Gateway, or a local axum server
//! - **Database**: DynamoDB, one full-table scan per request
//! - **Format**: API Gateway proxy events and responses, JSON bodies
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Initialize logging
//! 3. Create the DynamoDB client once, bound to the configured table
//! 4. Run under the Lambda runtime if `AWS_LAMBDA_RUNTIME_API` is set,
//!    otherwise serve HTTP on the configured port

mod config;
mod db;
mod error;
mod handlers;
mod lambda;
mod models;
mod server;

use models::api::CorsHeaders;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration (before logging, which depends on the runtime)
    let config = config::Config::from_env()?;

    // Reads RUST_LOG (defaults to "info"). CloudWatch timestamps every line and
    // does not render colors, so both are dropped under Lambda.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    if config.runs_on_lambda() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .without_time()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
    tracing::info!(table = %config.table_name(), "Configuration loaded");

    // Create the DynamoDB client once; every invocation reuses it
    let client = db::create_client(&config).await;
    let table = Arc::new(db::DynamoTable::new(client, config.table_name()));
    // Same CORS headers on every response
    let cors = CorsHeaders::from(&config);
    tracing::info!(table = %table.table_name(), "DynamoDB client created");

    // Under Lambda, poll the runtime API instead of binding a port
    if config.runs_on_lambda() {
        tracing::info!("Starting Lambda runtime");
        return lambda::run(table, cors).await.map_err(|err| anyhow::anyhow!(err));
    }

    // Build the local HTTP router
    let app = server::router(table, cors);

    // Bind to network address and start server
    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    // Blocks until the process is stopped
    axum::serve(listener, app).await?;

    Ok(())
}
