use std::sync::Arc;

use super::common::*;
use crate::selection::{
    CarrierSelectionService, CarrierStatus, SelectionError, SelectionRequest,
    SelectionServiceError, SourceError,
};

#[test]
fn select_returns_top_pick_and_truncated_recommendations() {
    let carriers = vec![
        carrier("A", 50.0, 4.0),
        carrier("B", 30.0, 3.0),
        carrier("C", 40.0, 4.5),
        carrier("D", 60.0, 5.0),
    ];
    let service = build_service(carriers, 2);

    let response = service
        .select(selection_request(Some("cheapest")))
        .expect("selection succeeds");

    assert_eq!(response.total_evaluated, 4);
    assert_eq!(response.recommendations.len(), 2);
    let selected = response.selected_carrier.expect("top pick present");
    assert_eq!(selected.carrier_id.0, "B");
    assert_eq!(selected, response.recommendations[0]);
    assert_eq!(response.scoring_breakdown.weights_used.price, 1.0);
    assert!(response
        .scoring_breakdown
        .explanation
        .starts_with("cheapest strategy"));
}

#[test]
fn select_reports_no_options_without_failing() {
    let service = build_service(carriers_a_b(), 3);
    let request = SelectionRequest {
        min_rating: Some(5.0),
        ..selection_request(None)
    };

    let response = service.select(request).expect("no options is not an error");

    assert!(!response.has_options());
    assert!(response.selected_carrier.is_none());
    assert!(response.recommendations.is_empty());
    assert_eq!(response.total_evaluated, 0);
    assert!(response.scoring_breakdown.explanation.contains("no approved carrier"));
}

#[test]
fn select_rejects_invalid_requests_before_touching_the_source() {
    let service = CarrierSelectionService::new(Arc::new(UnavailableCarriers), 3);

    let err = service
        .select(SelectionRequest {
            weight_kg: -1.0,
            ..selection_request(None)
        })
        .expect_err("invalid weight");
    assert!(matches!(
        err,
        SelectionServiceError::Selection(SelectionError::InvalidInput(_))
    ));

    let err = service
        .select(SelectionRequest {
            strategy: Some("destination_focused".to_string()),
            ..selection_request(None)
        })
        .expect_err("missing country");
    assert!(matches!(
        err,
        SelectionServiceError::Selection(SelectionError::InvalidInput(_))
    ));
}

#[test]
fn select_surfaces_source_failures() {
    let service = CarrierSelectionService::new(Arc::new(UnavailableCarriers), 3);

    let err = service
        .select(selection_request(None))
        .expect_err("source offline");

    assert!(matches!(
        err,
        SelectionServiceError::Source(SourceError::Unavailable(_))
    ));
}

#[test]
fn explanation_mentions_target_country() {
    let service = build_service(carriers_a_b(), 3);
    let request = SelectionRequest {
        strategy: Some("destination-focused".to_string()),
        destination_country: Some("Nigeria".to_string()),
        ..selection_request(None)
    };

    let response = service.select(request).expect("selection succeeds");

    assert_eq!(response.scoring_breakdown.weights_used.destination, 0.6);
    assert!(response.scoring_breakdown.explanation.ends_with("targeting Nigeria"));
}

#[test]
fn quote_lists_approved_carriers_cheapest_first() {
    let carriers = vec![
        carrier("A", 50.0, 4.0),
        with_status(carrier("P", 1.0, 4.0), CarrierStatus::Pending),
        carrier("B", 30.0, 3.0),
    ];
    let service = build_service(carriers, 3);

    let quotes = service.quote(2.0).expect("quotes");

    let ids: Vec<_> = quotes.iter().map(|quote| quote.carrier_id.0.as_str()).collect();
    assert_eq!(ids, vec!["B", "A"]);
    assert_eq!(quotes[0].total_cost, 60.0);
    assert!(service.quote(0.0).is_err());
}

#[test]
fn quote_rejects_weights_that_overflow_costs() {
    let service = build_service(carriers_a_b(), 3);

    let err = service.quote(1e307).expect_err("overflowing quote rejected");
    assert!(matches!(
        err,
        SelectionServiceError::Selection(SelectionError::InvalidInput(_))
    ));
}

#[test]
fn catalog_hides_non_approved_carriers() {
    let carriers = vec![
        carrier("Z", 50.0, 4.0),
        with_status(carrier("R", 1.0, 4.0), CarrierStatus::Rejected),
        carrier("B", 30.0, 3.0),
    ];
    let service = build_service(carriers, 3);

    let catalog = service.catalog().expect("catalog");

    let ids: Vec<_> = catalog.iter().map(|entry| entry.id.0.as_str()).collect();
    assert_eq!(ids, vec!["B", "Z"]);
}

#[test]
fn recommendation_limit_is_at_least_one() {
    let service = build_service(carriers_a_b(), 0);
    assert_eq!(service.recommendation_limit(), 1);
}
