use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use super::common::*;
use crate::selection::router::{select_handler, QuoteRequest};
use crate::selection::{CarrierSelectionService, SelectionRequest};

fn post_json(uri: &str, body: serde_json::Value) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::post(uri)
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            serde_json::to_vec(&body).expect("serializable body"),
        ))
        .expect("request builds")
}

#[tokio::test]
async fn select_route_returns_ranked_carriers() {
    let router = router_with_carriers(carriers_a_b());

    let response = router
        .oneshot(post_json(
            "/api/v1/carriers/select",
            json!({
                "origin": "Lagos",
                "destination": "Accra",
                "weightKg": 5.0,
                "strategy": "best_rated"
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["selectedCarrier"]["carrierId"], json!("A"));
    assert_eq!(payload["totalEvaluated"], json!(2));
    assert_eq!(payload["scoringBreakdown"]["weightsUsed"]["rating"], json!(1.0));
    assert_eq!(
        payload["recommendations"]
            .as_array()
            .map(|entries| entries.len()),
        Some(2)
    );
}

#[tokio::test]
async fn select_route_distinguishes_empty_results_from_failures() {
    let router = router_with_carriers(carriers_a_b());

    let response = router
        .oneshot(post_json(
            "/api/v1/carriers/select",
            json!({
                "origin": "Lagos",
                "destination": "Cairo",
                "weightKg": 5.0
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert!(payload["selectedCarrier"].is_null());
    assert_eq!(payload["recommendations"], json!([]));
    assert_eq!(payload["totalEvaluated"], json!(0));
}

#[tokio::test]
async fn select_handler_rejects_unknown_strategy() {
    let service = Arc::new(build_service(carriers_a_b(), 3));

    let response = select_handler::<MemoryCarriers>(
        State(service),
        axum::Json(selection_request(Some("overnight"))),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert_eq!(payload["kind"], json!("unknown_strategy"));
}

#[tokio::test]
async fn select_handler_rejects_invalid_weight() {
    let service = Arc::new(build_service(carriers_a_b(), 3));

    let response = select_handler::<MemoryCarriers>(
        State(service),
        axum::Json(SelectionRequest {
            weight_kg: -1.0,
            ..selection_request(None)
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert_eq!(payload["kind"], json!("invalid_input"));
}

#[tokio::test]
async fn select_handler_reports_unavailable_source() {
    let service = Arc::new(CarrierSelectionService::new(
        Arc::new(UnavailableCarriers),
        3,
    ));

    let response = select_handler::<UnavailableCarriers>(
        State(service),
        axum::Json(selection_request(None)),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn quote_route_returns_quotes() {
    let router = router_with_carriers(carriers_a_b());

    let response = router
        .oneshot(post_json(
            "/api/v1/carriers/quote",
            serde_json::to_value(QuoteRequest { weight_kg: 3.0 }).expect("serializable"),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["quotes"][0]["carrierId"], json!("B"));
    assert_eq!(payload["quotes"][0]["totalCost"], json!(90.0));
}

#[tokio::test]
async fn catalog_route_lists_carriers() {
    let router = router_with_carriers(carriers_a_b());

    let response = router
        .oneshot(
            axum::http::Request::get("/api/v1/carriers")
                .body(axum::body::Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["total"], json!(2));
    assert_eq!(payload["carriers"][0]["id"], json!("A"));
}
