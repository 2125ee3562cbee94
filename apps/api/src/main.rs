mod config;
mod errors;
mod llm_client;
mod proposal;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::proposal::template::PromptTemplate;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; malformed values abort startup
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Grant Writer API v{}", env!("CARGO_PKG_VERSION"));

    // Template/field schema mismatches are fatal here, never per request
    let template = match &config.prompt_template_path {
        Some(path) => PromptTemplate::load(path)
            .with_context(|| format!("Invalid prompt template at {}", path.display()))?,
        None => PromptTemplate::bundled().context("Invalid bundled prompt template")?,
    };
    info!(
        "Prompt template loaded ({} placeholders)",
        template.placeholders().len()
    );

    // Initialize LLM client
    let llm = LlmClient::new(
        config.groq_api_key.clone(),
        &config.llm_base_url,
        config.llm_timeout_secs,
    )?;
    if llm.has_api_key() {
        info!("LLM client initialized (model: {})", llm_client::MODEL);
    } else {
        warn!("GROQ_API_KEY is missing or a placeholder; proposal generation will be refused");
    }

    let port = config.port;

    // Build app state
    let state = AppState {
        config: Arc::new(config),
        template: Arc::new(template),
        generator: Arc::new(llm),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{port}").parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
