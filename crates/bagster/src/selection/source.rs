use std::collections::BTreeSet;

use serde::Serialize;

use super::domain::{Carrier, CarrierId, ShipmentRequest};

/// Supplier of carrier records. The scoring engine never reads storage
/// itself; hosts inject an implementation of this trait.
pub trait CarrierSource: Send + Sync {
    /// Candidate carriers for a shipment. Implementations may pre-filter by
    /// geography; the engine still enforces every eligibility rule.
    fn carriers_for(&self, shipment: &ShipmentRequest) -> Result<Vec<Carrier>, SourceError>;

    /// Every carrier known to the source, regardless of onboarding status.
    fn all(&self) -> Result<Vec<Carrier>, SourceError>;
}

/// Error enumeration for carrier source failures.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("carrier source unavailable: {0}")]
    Unavailable(String),
}

/// Public catalog entry. Pricing internals stay out of listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarrierSummary {
    pub id: CarrierId,
    pub name: String,
    pub rating: f64,
    pub service_areas: BTreeSet<String>,
    pub delivery_countries: BTreeSet<String>,
    pub transport_modes: BTreeSet<String>,
    pub services: BTreeSet<String>,
}

impl From<&Carrier> for CarrierSummary {
    fn from(carrier: &Carrier) -> Self {
        Self {
            id: carrier.id.clone(),
            name: carrier.name.clone(),
            rating: carrier.rating,
            service_areas: carrier.service_areas.clone(),
            delivery_countries: carrier.delivery_countries.clone(),
            transport_modes: carrier.transport_modes.clone(),
            services: carrier.services.clone(),
        }
    }
}
