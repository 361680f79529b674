//! devfeed API Server
//!
//! Merges a developer's public GitHub events and StackOverflow timeline into
//! a single feed, most recent first.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod error;
mod feed;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{GithubActivitySource, ReqwestTransport, StackExchangeActivitySource};
use app::AggregatorService;
use config::Config;
use domain::ports::ActivitySource;

/// Application state shared across all handlers
pub struct AppState<CH: ActivitySource, QA: ActivitySource> {
    pub aggregator: Arc<AggregatorService<CH, QA>>,
}

impl<CH: ActivitySource, QA: ActivitySource> Clone for AppState<CH, QA> {
    fn clone(&self) -> Self {
        Self {
            aggregator: self.aggregator.clone(),
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the application router
pub fn router<CH, QA>(state: AppState<CH, QA>) -> anyhow::Result<Router>
where
    CH: ActivitySource + 'static,
    QA: ActivitySource + 'static,
{
    // Every /activity call fans out to rate-limited upstream APIs:
    // 2 req/sec sustained, burst of 5, keyed on the peer address
    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_second(2)
            .burst_size(5)
            .finish()
            .context("Failed to build governor config")?,
    );

    let activity_routes = Router::new()
        .route("/activity", get(handlers::get_activity::<CH, QA>))
        .layer(GovernorLayer {
            config: governor_config,
        });

    let app = Router::new()
        .route("/health", get(health))
        .merge(activity_routes)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,devfeed_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting devfeed API...");

    // Load configuration
    let config = Config::from_env();

    // Create adapters
    let transport = Arc::new(
        ReqwestTransport::new(&config.user_agent).context("Failed to build HTTP client")?,
    );
    let github = Arc::new(GithubActivitySource::new(transport.clone(), &config));
    let stackexchange = Arc::new(StackExchangeActivitySource::new(transport, &config));

    // Create application services
    let mut aggregator = AggregatorService::new(github, stackexchange);
    if let Some(timeout) = config.aggregate_timeout {
        aggregator = aggregator.with_timeout(timeout);
    }
    let aggregator = Arc::new(aggregator);

    let app = router(AppState { aggregator })?;

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
