mod api;
mod router;
mod state;

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use pagecite_core::{config, Config};
use pagecite_qa::QaPipeline;

use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    config::load_dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    config.log_summary();

    let pipeline = QaPipeline::from_config(&config)
        .context("failed to build QA pipeline (check provider config)")?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = Arc::new(AppState::new(config, pipeline));
    let app = router::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Listening on http://{addr} (docs at /docs)");

    axum::serve(listener, app).await?;
    Ok(())
}
