//! API Handlers
use crate::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use dineboard_analytics::DashboardReport;
use dineboard_core::{normalize_collection, DineboardError, Order, DINEBOARD_VERSION};
use dineboard_filter::OrderQuery;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

/// Error body `{ "error": "..." }`
pub struct ApiError(StatusCode, String);

impl From<DineboardError> for ApiError {
    fn from(err: DineboardError) -> Self {
        let status = match err {
            DineboardError::IoError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        };
        ApiError(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        warn!(status = %self.0, error = %self.1, "request rejected");
        (self.0, Json(json!({ "error": self.1 }))).into_response()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardRequest {
    #[serde(default)]
    pub orders: Value,
    #[serde(default)]
    pub menu: Vec<Value>,
    pub period: String,
    #[serde(default)]
    pub reference_date: String,
}

pub async fn dashboard(
    State(state): State<AppState>,
    Json(payload): Json<DashboardRequest>,
) -> Result<Json<DashboardReport>, ApiError> {
    let timer = state.metrics.dashboard_seconds.start_timer();
    let report = state.dashboard.build_raw(
        &payload.orders,
        &payload.menu,
        &payload.period,
        &payload.reference_date,
    );
    timer.observe_duration();
    Ok(Json(report?))
}

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub orders: Value,
    #[serde(flatten)]
    pub query: OrderQuery,
}

pub async fn query_orders(
    State(state): State<AppState>,
    Json(payload): Json<QueryRequest>,
) -> Result<Json<Vec<Order>>, ApiError> {
    let orders = normalize_collection(&payload.orders)?;
    let zone = state.dashboard.profile().zone()?;
    let selected = payload.query.apply(&orders, &zone).into_iter().cloned().collect();
    Ok(Json(selected))
}

pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "version": DINEBOARD_VERSION,
            "profile": state.dashboard.profile().name,
        })),
    )
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    match state.metrics.encode() {
        Ok(body) => ([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], body).into_response(),
        Err(err) => ApiError(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response(),
    }
}
