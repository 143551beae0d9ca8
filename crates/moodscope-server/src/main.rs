mod config;
mod dto;
mod error;
mod handlers;
mod state;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as _, Result};
use axum::body::Body;
use axum::http::{Request, Response};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServiceConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".parse().unwrap()),
        )
        .compact()
        .init();

    let config = ServiceConfig::from_env();

    let client = reqwest::Client::new();
    moodscope_provision::ensure_artifacts(&client, &config.artifact_specs())
        .await
        .context("provisioning model artifacts")?;

    let state = Arc::new(AppState::load(&config.artifact_dir).with_context(|| {
        format!("loading artifacts from {}", config.artifact_dir.display())
    })?);
    info!(
        vocabulary = state.vectorizer.vocabulary_len(),
        trees = state.forest.len(),
        "artifacts loaded"
    );

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %req.method(),
                uri = %req.uri(),
                version = ?req.version(),
            )
        })
        .on_response(|res: &Response<Body>, latency: Duration, _span: &tracing::Span| {
            info!(
                latency = %format!("{} ms", latency.as_millis()),
                status = %res.status().as_u16(),
                "finished processing request"
            );
        });

    let app = handlers::router(state).layer(trace_layer).layer(cors);

    info!("Starting server on {}", config.addr);
    let listener = tokio::net::TcpListener::bind(config.addr.as_str()).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
