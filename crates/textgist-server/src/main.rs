//! TextGist — text analysis and knowledge extraction server.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use textgist_server::{build_router, AppState};

fn resolve_data_dir() -> PathBuf {
    std::env::var("TEXTGIST_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let data_dir = resolve_data_dir();
    info!("Data directory: {}", data_dir.display());

    let config = textgist_core::TextGistConfig::from_env(&data_dir)?;
    let port = config.port;

    let store = textgist_store::SqliteStore::open(&config.database_path)
        .map_err(|e| anyhow::anyhow!("Failed to open store: {}", e))?;

    // Backend selection happens exactly once, here
    let backend = textgist_llm::create_backend(&config.llm)
        .map_err(|e| anyhow::anyhow!("Failed to configure LLM backend: {}", e))?;

    let state = Arc::new(AppState::new(config, store, backend));
    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("TextGist server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
