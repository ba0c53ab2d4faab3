mod config;
mod errors;
mod llm_client;
mod pipeline;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::pipeline::sink::ArtifactSink;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (exits on missing required flags)
    let config = Config::load()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting convert v{}", env!("CARGO_PKG_VERSION"));

    let llm = LlmClient::new(config.api_key.clone(), config.completion.clone())?;
    info!(
        "LLM client initialized (model: {}, max_tokens: {})",
        llm.config().model,
        llm.config().max_tokens
    );

    let sink = ArtifactSink::create(&config.output)?;

    let output = pipeline::run(
        &llm,
        &sink,
        &config.input,
        config.job_description.as_deref(),
    )
    .await?;

    info!(
        "Generated resume ({} chars) and cover letter ({} chars)",
        output.resume.chars().count(),
        output.cover_letter.chars().count()
    );

    Ok(())
}
