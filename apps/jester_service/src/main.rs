use std::sync::Arc;

use dotenvy::dotenv;
use jester_llm::{GenerationClient, PluginApiBackend};
use jester_service::{app_module::AppState, app_router::build_app, config::ServiceConfig};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let config = ServiceConfig::from_env()?;

    let subscriber_builder = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_level(true)
        .with_span_events(FmtSpan::CLOSE);

    if config.is_dev() {
        tracing::subscriber::set_global_default(
            subscriber_builder.pretty().with_ansi(true).finish(),
        )?;
    } else {
        tracing::subscriber::set_global_default(
            subscriber_builder.json().with_ansi(false).finish(),
        )?;
    }

    let backend = PluginApiBackend::connect(config.plugin.clone()).await?;
    let client = GenerationClient::new(Arc::new(backend), Some(config.wait.clone()));
    let state = AppState::new(client);

    let app = build_app(state, config.request_timeout);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;

    tracing::info!("Server started, listening on {}", config.bind_address);
    axum::serve(listener, app).await?;

    Ok(())
}
