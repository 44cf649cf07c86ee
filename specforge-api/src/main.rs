//! specforge-api - Requirements Management Backend
//!
//! Stores software requirements, exposes CRUD endpoints, and augments
//! records with AI-generated content: descriptions, a Wiegers
//! prioritization matrix, stakeholder-specific orderings, and a glossary.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use specforge_api::services::gemini::GeminiClient;
use specforge_api::AppState;
use specforge_common::config::{CliOverrides, ServiceConfig};

#[derive(Debug, Parser)]
#[command(name = "specforge-api", about = "SpecForge requirements management backend")]
struct Args {
    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Address to bind (host:port)
    #[arg(long)]
    bind: Option<String>,

    /// SQLite database file path
    #[arg(long)]
    database: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting specforge-api (Requirements Management backend)");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    // Resolve configuration (CLI -> ENV -> TOML -> defaults)
    let config = ServiceConfig::resolve(&CliOverrides {
        config_file: args.config,
        bind_address: args.bind,
        database_path: args.database,
    })?;
    info!("Database: {}", config.database_path.display());

    // Initialize database connection pool
    let db_pool = specforge_api::db::init_database_pool(&config.database_path).await?;
    info!("Database connection established");

    // Construct the AI client; all services receive this handle
    let ai = GeminiClient::new(
        config.gemini_api_key.clone(),
        config.gemini_model.clone(),
        Duration::from_secs(config.ai_timeout_secs),
    )
    .map_err(|e| anyhow::anyhow!("Failed to create Gemini client: {}", e))?;
    info!("AI client initialized (model: {})", config.gemini_model);

    // Create application state
    let state = AppState::new(db_pool, Arc::new(ai));

    // Build router
    let app = specforge_api::build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!("Listening on http://{}", config.bind_address);
    info!("Health check: http://{}/health", config.bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
