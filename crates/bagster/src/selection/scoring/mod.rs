mod eligibility;
mod rules;

pub use eligibility::serves_destination;

use super::domain::{Carrier, CarrierScore, ShipmentRequest};
use super::strategy::SelectionCriteria;
use super::validation::{validate_shipment, SelectionError};
use eligibility::eligible_carriers;
use rules::{destination_score, rating_score, selection_reason, CostRange, SubScores};

/// Rank the carriers able to move `request` under `criteria`.
///
/// Inputs are validated before any carrier is looked at. Scores are relative
/// to the eligible set, and the result is ordered by descending total score,
/// then ascending cost, then carrier id. An empty vector means no carrier
/// qualified.
pub fn score(
    carriers: &[Carrier],
    request: &ShipmentRequest,
    criteria: &SelectionCriteria,
) -> Result<Vec<CarrierScore>, SelectionError> {
    validate_shipment(request)?;

    let eligible = eligible_carriers(carriers, request, criteria)?;
    let Some(cost_range) = CostRange::from_costs(eligible.iter().map(|entry| entry.total_cost))
    else {
        return Ok(Vec::new());
    };

    let weights = criteria.weights();
    let destination_country = criteria.destination_country();

    let evaluated: Vec<_> = eligible
        .iter()
        .map(|entry| {
            let sub_scores = SubScores {
                price: cost_range.price_score(entry.total_cost),
                rating: rating_score(entry.carrier.rating),
                destination: destination_score(entry.carrier, destination_country),
            };
            (entry, sub_scores)
        })
        .collect();

    let leaders = evaluated
        .iter()
        .map(|(_, sub_scores)| *sub_scores)
        .reduce(SubScores::max)
        .unwrap_or(SubScores {
            price: 0.0,
            rating: 0.0,
            destination: 0.0,
        });

    let mut scores: Vec<CarrierScore> = evaluated
        .into_iter()
        .map(|(entry, sub_scores)| CarrierScore {
            carrier_id: entry.carrier.id.clone(),
            carrier_name: entry.carrier.name.clone(),
            total_cost: entry.total_cost,
            price_score: sub_scores.price,
            rating_score: sub_scores.rating,
            destination_score: sub_scores.destination,
            total_score: sub_scores.weighted_total(&weights),
            selection_reason: selection_reason(
                &sub_scores,
                &leaders,
                &weights,
                entry.total_cost,
                destination_country,
            ),
        })
        .collect();

    rank(&mut scores);
    Ok(scores)
}

pub(crate) fn rank(scores: &mut [CarrierScore]) {
    scores.sort_by(|left, right| {
        right
            .total_score
            .total_cmp(&left.total_score)
            .then_with(|| left.total_cost.total_cmp(&right.total_cost))
            .then_with(|| left.carrier_id.cmp(&right.carrier_id))
    });
}
