use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::domain::ShipmentRequest;
use super::strategy::{HardFilters, SelectionCriteria, StrategyKind};

/// Validation failures raised before any carrier is evaluated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SelectionError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("unknown selection strategy '{0}'")]
    UnknownStrategy(String),
}

impl SelectionError {
    pub fn kind(&self) -> &'static str {
        match self {
            SelectionError::InvalidInput(_) => "invalid_input",
            SelectionError::UnknownStrategy(_) => "unknown_strategy",
        }
    }
}

/// Raw selection request as received from shippers. Convert it with
/// [`SelectionRequest::into_parts`] so unknown strategies and malformed
/// shipments are rejected at the boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionRequest {
    pub origin: String,
    pub destination: String,
    pub weight_kg: f64,
    #[serde(default)]
    pub strategy: Option<String>,
    #[serde(default)]
    pub destination_country: Option<String>,
    #[serde(default)]
    pub max_price: Option<f64>,
    #[serde(default)]
    pub min_rating: Option<f64>,
    #[serde(default)]
    pub required_services: Vec<String>,
}

impl SelectionRequest {
    pub fn into_parts(self) -> Result<(ShipmentRequest, SelectionCriteria), SelectionError> {
        let SelectionRequest {
            origin,
            destination,
            weight_kg,
            strategy,
            destination_country,
            max_price,
            min_rating,
            required_services,
        } = self;

        let kind = match strategy.as_deref().map(str::trim) {
            None | Some("") => StrategyKind::default(),
            Some(name) => name.parse()?,
        };

        let shipment = ShipmentRequest {
            origin,
            destination,
            weight_kg,
        };
        validate_shipment(&shipment)?;

        let filters = HardFilters {
            max_price,
            min_rating,
            required_services: required_services
                .into_iter()
                .map(|service| service.trim().to_string())
                .filter(|service| !service.is_empty())
                .collect::<BTreeSet<_>>(),
        };
        let criteria = SelectionCriteria::new(kind, destination_country, filters)?;

        Ok((shipment, criteria))
    }
}

pub(crate) fn validate_weight(weight_kg: f64) -> Result<(), SelectionError> {
    if weight_kg.is_finite() && weight_kg > 0.0 {
        Ok(())
    } else {
        Err(SelectionError::InvalidInput(format!(
            "weightKg must be a positive number, got {weight_kg}"
        )))
    }
}

pub fn validate_shipment(shipment: &ShipmentRequest) -> Result<(), SelectionError> {
    validate_weight(shipment.weight_kg)?;

    if shipment.destination.trim().is_empty() {
        return Err(SelectionError::InvalidInput(
            "destination must not be empty".to_string(),
        ));
    }

    Ok(())
}
