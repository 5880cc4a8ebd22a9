use std::sync::Arc;

use tracing::{debug, info, warn};

use super::domain::{
    CarrierScore, ScoringBreakdown, SelectionResponse, ShipmentRequest, WeightsUsed,
};
use super::rates::{quote_cost, RateQuote};
use super::scoring;
use super::source::{CarrierSource, CarrierSummary, SourceError};
use super::strategy::SelectionCriteria;
use super::validation::{validate_weight, SelectionError, SelectionRequest};

pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 3;

/// Service composing the carrier source with the scoring engine.
pub struct CarrierSelectionService<S> {
    source: Arc<S>,
    recommendation_limit: usize,
}

impl<S> CarrierSelectionService<S>
where
    S: CarrierSource + 'static,
{
    pub fn new(source: Arc<S>, recommendation_limit: usize) -> Self {
        Self {
            source,
            recommendation_limit: recommendation_limit.max(1),
        }
    }

    pub fn recommendation_limit(&self) -> usize {
        self.recommendation_limit
    }

    /// Validate a raw request and rank the carriers able to serve it.
    pub fn select(
        &self,
        request: SelectionRequest,
    ) -> Result<SelectionResponse, SelectionServiceError> {
        let (shipment, criteria) = request.into_parts()?;
        self.select_with(&shipment, &criteria)
    }

    pub fn select_with(
        &self,
        shipment: &ShipmentRequest,
        criteria: &SelectionCriteria,
    ) -> Result<SelectionResponse, SelectionServiceError> {
        let carriers = self.source.carriers_for(shipment).map_err(|err| {
            warn!(error = %err, "carrier source failed during selection");
            err
        })?;

        let ranked = scoring::score(&carriers, shipment, criteria)?;
        debug!(
            candidates = carriers.len(),
            eligible = ranked.len(),
            strategy = %criteria.strategy().kind(),
            "carrier scoring complete"
        );

        let response = build_response(ranked, shipment, criteria, self.recommendation_limit);
        match &response.selected_carrier {
            Some(selected) => info!(
                carrier = %selected.carrier_id,
                total_score = selected.total_score,
                total_cost = selected.total_cost,
                "carrier selected"
            ),
            None => info!(destination = %shipment.destination, "no eligible carriers"),
        }

        Ok(response)
    }

    /// Quote every approved carrier for a package weight, cheapest first.
    pub fn quote(&self, weight_kg: f64) -> Result<Vec<RateQuote>, SelectionServiceError> {
        validate_weight(weight_kg)?;

        let carriers = self.source.all()?;
        let mut quotes = carriers
            .iter()
            .filter(|carrier| carrier.is_approved())
            .map(|carrier| quote_cost(carrier, weight_kg))
            .collect::<Result<Vec<_>, _>>()?;

        quotes.sort_by(|left, right| {
            left.total_cost
                .total_cmp(&right.total_cost)
                .then_with(|| left.carrier_id.cmp(&right.carrier_id))
        });
        Ok(quotes)
    }

    /// Approved carriers as exposed to shippers, ordered by id.
    pub fn catalog(&self) -> Result<Vec<CarrierSummary>, SelectionServiceError> {
        let mut carriers = self.source.all()?;
        carriers.retain(|carrier| carrier.is_approved());
        carriers.sort_by(|left, right| left.id.cmp(&right.id));
        Ok(carriers.iter().map(CarrierSummary::from).collect())
    }
}

pub(crate) fn build_response(
    ranked: Vec<CarrierScore>,
    shipment: &ShipmentRequest,
    criteria: &SelectionCriteria,
    recommendation_limit: usize,
) -> SelectionResponse {
    let weights = criteria.weights();
    let total_evaluated = ranked.len();
    let explanation = explain(total_evaluated, shipment, criteria);

    let mut recommendations = ranked;
    recommendations.truncate(recommendation_limit.max(1));
    let selected_carrier = recommendations.first().cloned();

    SelectionResponse {
        selected_carrier,
        recommendations,
        total_evaluated,
        scoring_breakdown: ScoringBreakdown {
            weights_used: WeightsUsed::from(weights),
            explanation,
        },
    }
}

fn explain(
    total_evaluated: usize,
    shipment: &ShipmentRequest,
    criteria: &SelectionCriteria,
) -> String {
    if total_evaluated == 0 {
        return format!(
            "no approved carrier serving {} met the requested filters",
            shipment.destination.trim()
        );
    }

    let weights = criteria.weights();
    let mut explanation = format!(
        "{} strategy weighted price {:.0}%, rating {:.0}%, destination {:.0}% across {} eligible carrier(s)",
        criteria.strategy().kind(),
        weights.price * 100.0,
        weights.rating * 100.0,
        weights.destination * 100.0,
        total_evaluated
    );
    if let Some(country) = criteria.destination_country() {
        explanation.push_str(&format!(" targeting {country}"));
    }
    explanation
}

/// Error raised by the selection service.
#[derive(Debug, thiserror::Error)]
pub enum SelectionServiceError {
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error(transparent)]
    Source(#[from] SourceError),
}
