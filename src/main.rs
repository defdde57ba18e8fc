use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use practice_partner::adapters::completion::build_completion_client;
use practice_partner::adapters::http::{build_app, ChatAppState};
use practice_partner::adapters::session::InMemorySessionStore;
use practice_partner::application::{DialogueEngine, GeneratorSettings, ResponseGenerator};
use practice_partner::config::AppConfig;
use practice_partner::domain::dialogue::CorrectionAdvisor;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let client = build_completion_client(&config.completion)?;
    match &client {
        Some(client) => tracing::info!(backend = client.backend_name(), "completion backend enabled"),
        None => tracing::info!("completion backend disabled, using templates only"),
    }

    let generator = ResponseGenerator::new(
        client,
        GeneratorSettings {
            max_tokens: config.completion.max_tokens,
            temperature: config.completion.temperature,
            completion_timeout: config.completion.timeout(),
        },
    );
    let engine = DialogueEngine::new(
        Arc::new(InMemorySessionStore::new()),
        generator,
        CorrectionAdvisor::new(config.dialogue.correction_gate()),
    );

    let app = build_app(ChatAppState::new(Arc::new(engine)), &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        tracing::error!(%addr, error = %e, "failed to bind");
        e
    })?;
    tracing::info!(%addr, "practice partner listening");

    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
