use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::strategy::StrategyWeights;

/// Identifier wrapper for marketplace carriers.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CarrierId(pub String);

impl fmt::Display for CarrierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Onboarding state of a carrier. Only approved carriers are ever scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarrierStatus {
    Pending,
    Approved,
    Rejected,
}

impl CarrierStatus {
    pub fn label(&self) -> &'static str {
        match self {
            CarrierStatus::Pending => "pending",
            CarrierStatus::Approved => "approved",
            CarrierStatus::Rejected => "rejected",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

/// Carrier record as supplied by the catalog. Pricing is expressed in the
/// marketplace's settlement currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Carrier {
    pub id: CarrierId,
    pub name: String,
    pub rating: f64,
    pub base_price_per_kg: f64,
    pub pickup_fee: f64,
    pub minimum_charge: f64,
    #[serde(default)]
    pub service_areas: BTreeSet<String>,
    #[serde(default)]
    pub delivery_countries: BTreeSet<String>,
    #[serde(default)]
    pub transport_modes: BTreeSet<String>,
    #[serde(default)]
    pub services: BTreeSet<String>,
    pub status: CarrierStatus,
}

impl Carrier {
    pub fn is_approved(&self) -> bool {
        self.status == CarrierStatus::Approved
    }

    pub fn delivers_to_country(&self, country: &str) -> bool {
        let wanted = country.trim();
        self.delivery_countries
            .iter()
            .any(|listed| listed.trim().eq_ignore_ascii_case(wanted))
    }

    pub fn offers_service(&self, service: &str) -> bool {
        let wanted = service.trim();
        self.services
            .iter()
            .any(|offered| offered.trim().eq_ignore_ascii_case(wanted))
    }
}

/// Shipment the shipper wants moved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentRequest {
    pub origin: String,
    pub destination: String,
    pub weight_kg: f64,
}

/// Ranked evaluation of a single eligible carrier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarrierScore {
    pub carrier_id: CarrierId,
    pub carrier_name: String,
    pub total_cost: f64,
    pub price_score: f64,
    pub rating_score: f64,
    pub destination_score: f64,
    pub total_score: f64,
    pub selection_reason: String,
}

/// Weight triple echoed back to callers so rankings can be audited.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightsUsed {
    pub price: f64,
    pub rating: f64,
    pub destination: f64,
}

impl From<StrategyWeights> for WeightsUsed {
    fn from(weights: StrategyWeights) -> Self {
        Self {
            price: weights.price,
            rating: weights.rating,
            destination: weights.destination,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringBreakdown {
    pub weights_used: WeightsUsed,
    pub explanation: String,
}

/// Response returned to shippers. An empty `recommendations` list with no
/// `selected_carrier` means no carrier qualified, which is not a failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionResponse {
    pub selected_carrier: Option<CarrierScore>,
    pub recommendations: Vec<CarrierScore>,
    pub total_evaluated: usize,
    pub scoring_breakdown: ScoringBreakdown,
}

impl SelectionResponse {
    pub fn has_options(&self) -> bool {
        self.selected_carrier.is_some()
    }
}
