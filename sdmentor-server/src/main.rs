//! sdmentor server binary: HTTP API for system-design answer review.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use sdmentor_core::{Reviewer, config};
use sdmentor_server::{AppState, router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before anything reads credentials.
    let _ = dotenvy::dotenv();

    let fmt_layer = tracing_subscriber::fmt::layer().with_filter(
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    );
    tracing_subscriber::registry().with(fmt_layer).init();

    let config = config::load_config(None).context("failed to load configuration")?;
    let reviewer = Reviewer::from_config(&config);

    let state = AppState {
        reviewer: Arc::new(reviewer),
    };
    let app = router(state, &config.server.allowed_origin);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(addr = %addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
