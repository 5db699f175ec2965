use std::sync::Arc;

use anyhow::Result;
use readoku_core::LedgerConfig;
use readoku_http::{AppState, create_router};
use readoku_llm::LlmClient;
use readoku_storage::StorageBackend;

use crate::{connect_postgres, get_api_key, get_base_url, get_frontend_url};

pub(crate) async fn run(port: u16, host: String, memory: bool, config: LedgerConfig) -> Result<()> {
    let storage = if memory {
        tracing::warn!("using in-memory storage, data is lost on exit");
        StorageBackend::new_memory()
    } else {
        connect_postgres().await?
    };

    let llm = LlmClient::new(get_api_key()?, get_base_url())?;
    tracing::info!(model = llm.model(), base_url = llm.base_url(), "story generator configured");

    tracing::info!(
        backend = storage.kind(),
        daily_limit = config.daily_limit.get(),
        stats_days = config.stats_days,
        tz_offset_secs = config.clock.offset_secs(),
        "ledger configured"
    );

    let state =
        Arc::new(AppState::new(Arc::new(storage), Arc::new(llm), config, get_frontend_url()));
    let router = create_router(state);
    let addr = format!("{host}:{port}");
    tracing::info!("Starting HTTP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;
    tracing::info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
