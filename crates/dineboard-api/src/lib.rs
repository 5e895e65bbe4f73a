//! Dineboard API /v1: REST endpoints
pub mod handlers;
pub mod metrics;
pub mod middleware;

use axum::{
    routing::{get, post},
    Router,
};
use dineboard_analytics::{AnalyticsProfile, Dashboard};
use dineboard_core::Clock;
use metrics::ApiMetrics;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared state behind every handler
#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<Dashboard>,
    pub metrics: Arc<ApiMetrics>,
}

impl AppState {
    pub fn new(profile: AnalyticsProfile, clock: Arc<dyn Clock>) -> anyhow::Result<Self> {
        Ok(Self {
            dashboard: Arc::new(Dashboard::new(profile, clock)?),
            metrics: Arc::new(ApiMetrics::new()?),
        })
    }

    /// Wall clock
    pub fn system(profile: AnalyticsProfile) -> anyhow::Result<Self> {
        Ok(Self {
            dashboard: Arc::new(Dashboard::system(profile)?),
            metrics: Arc::new(ApiMetrics::new()?),
        })
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/v1/dashboard", post(handlers::dashboard))
        .route("/v1/orders/query", post(handlers::query_orders))
        .route("/v1/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .layer(axum::middleware::from_fn_with_state(state.clone(), middleware::track_requests))
        .layer(axum::middleware::from_fn(middleware::request_id))
        .layer(middleware::cors())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(addr: &str, profile: AnalyticsProfile) -> anyhow::Result<()> {
    let profile_name = profile.name.clone();
    let app = create_app(AppState::system(profile)?);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(profile = %profile_name, "Dineboard API listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
