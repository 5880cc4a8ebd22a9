use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::service::{CarrierSelectionService, SelectionServiceError};
use super::source::CarrierSource;
use super::validation::{SelectionError, SelectionRequest};

/// Body accepted by the quote endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub weight_kg: f64,
}

/// Router builder exposing carrier catalog, quote, and selection endpoints.
pub fn selection_router<S>(service: Arc<CarrierSelectionService<S>>) -> Router
where
    S: CarrierSource + 'static,
{
    Router::new()
        .route("/api/v1/carriers", get(catalog_handler::<S>))
        .route("/api/v1/carriers/quote", post(quote_handler::<S>))
        .route("/api/v1/carriers/select", post(select_handler::<S>))
        .with_state(service)
}

pub(crate) async fn select_handler<S>(
    State(service): State<Arc<CarrierSelectionService<S>>>,
    axum::Json(request): axum::Json<SelectionRequest>,
) -> Response
where
    S: CarrierSource + 'static,
{
    match service.select(request) {
        Ok(response) => (StatusCode::OK, axum::Json(response)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn quote_handler<S>(
    State(service): State<Arc<CarrierSelectionService<S>>>,
    axum::Json(request): axum::Json<QuoteRequest>,
) -> Response
where
    S: CarrierSource + 'static,
{
    match service.quote(request.weight_kg) {
        Ok(quotes) => (StatusCode::OK, axum::Json(json!({ "quotes": quotes }))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn catalog_handler<S>(
    State(service): State<Arc<CarrierSelectionService<S>>>,
) -> Response
where
    S: CarrierSource + 'static,
{
    match service.catalog() {
        Ok(carriers) => (
            StatusCode::OK,
            axum::Json(json!({ "total": carriers.len(), "carriers": carriers })),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: SelectionServiceError) -> Response {
    let status = match &error {
        SelectionServiceError::Selection(SelectionError::InvalidInput(_)) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        SelectionServiceError::Selection(SelectionError::UnknownStrategy(_)) => {
            StatusCode::BAD_REQUEST
        }
        SelectionServiceError::Source(_) => StatusCode::SERVICE_UNAVAILABLE,
    };

    let kind = match &error {
        SelectionServiceError::Selection(inner) => inner.kind(),
        SelectionServiceError::Source(_) => "source_unavailable",
    };

    let payload = json!({
        "error": error.to_string(),
        "kind": kind,
    });
    (status, axum::Json(payload)).into_response()
}
