use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use bagster::selection::{selection_router, CarrierSelectionService, CarrierSource};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_selection_routes<S>(service: Arc<CarrierSelectionService<S>>) -> axum::Router
where
    S: CarrierSource + 'static,
{
    selection_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let uptime = Utc::now().signed_duration_since(state.started_at);
    Json(json!({
        "status": "ok",
        "started_at": state.started_at.to_rfc3339(),
        "uptime_seconds": uptime.num_seconds().max(0),
    }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
