use serde::{Deserialize, Serialize};

use super::domain::{Carrier, CarrierId};
use super::validation::{validate_weight, SelectionError};

/// Cost breakdown for moving a package with a single carrier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateQuote {
    pub carrier_id: CarrierId,
    pub weight_kg: f64,
    pub weight_charge: f64,
    pub pickup_fee: f64,
    pub minimum_applied: bool,
    pub total_cost: f64,
}

/// Quote a carrier for the given weight, flooring the result at the
/// carrier's minimum charge.
pub fn quote_cost(carrier: &Carrier, weight_kg: f64) -> Result<RateQuote, SelectionError> {
    validate_weight(weight_kg)?;

    let weight_charge = carrier.base_price_per_kg * weight_kg;
    let subtotal = weight_charge + carrier.pickup_fee;
    let minimum_applied = carrier.minimum_charge > subtotal;
    let total_cost = subtotal.max(carrier.minimum_charge);
    if !total_cost.is_finite() {
        return Err(SelectionError::InvalidInput(format!(
            "weightKg {weight_kg} is too large to quote with carrier {}",
            carrier.id
        )));
    }

    Ok(RateQuote {
        carrier_id: carrier.id.clone(),
        weight_kg,
        weight_charge,
        pickup_fee: carrier.pickup_fee,
        minimum_applied,
        total_cost,
    })
}

pub fn calculate_cost(carrier: &Carrier, weight_kg: f64) -> Result<f64, SelectionError> {
    quote_cost(carrier, weight_kg).map(|quote| quote.total_cost)
}
