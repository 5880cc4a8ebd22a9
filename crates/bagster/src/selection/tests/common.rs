use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::selection::{
    selection_router, Carrier, CarrierId, CarrierSelectionService, CarrierSource, CarrierStatus,
    HardFilters, SelectionCriteria, SelectionRequest, ShipmentRequest, SourceError, StrategyKind,
};

fn set(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|value| value.to_string()).collect()
}

/// Approved carrier serving Accra and Lagos with no pickup fee or minimum, so
/// total cost is simply `price_per_kg * weight`.
pub(super) fn carrier(id: &str, price_per_kg: f64, rating: f64) -> Carrier {
    Carrier {
        id: CarrierId(id.to_string()),
        name: format!("Carrier {id}"),
        rating,
        base_price_per_kg: price_per_kg,
        pickup_fee: 0.0,
        minimum_charge: 0.0,
        service_areas: set(&["Accra", "Lagos"]),
        delivery_countries: set(&["Nigeria"]),
        transport_modes: set(&["road"]),
        services: set(&["tracking"]),
        status: CarrierStatus::Approved,
    }
}

pub(super) fn with_status(mut carrier: Carrier, status: CarrierStatus) -> Carrier {
    carrier.status = status;
    carrier
}

pub(super) fn with_pickup(mut carrier: Carrier, pickup_fee: f64) -> Carrier {
    carrier.pickup_fee = pickup_fee;
    carrier
}

pub(super) fn with_countries(mut carrier: Carrier, countries: &[&str]) -> Carrier {
    carrier.delivery_countries = set(countries);
    carrier
}

pub(super) fn with_services(mut carrier: Carrier, services: &[&str]) -> Carrier {
    carrier.services = set(services);
    carrier
}

/// Scenario carriers: A is pricier and better rated than B.
pub(super) fn carriers_a_b() -> Vec<Carrier> {
    vec![carrier("A", 50.0, 4.0), carrier("B", 30.0, 3.0)]
}

pub(super) fn shipment(weight_kg: f64) -> ShipmentRequest {
    ShipmentRequest {
        origin: "Lagos".to_string(),
        destination: "Accra".to_string(),
        weight_kg,
    }
}

pub(super) fn criteria(kind: StrategyKind) -> SelectionCriteria {
    SelectionCriteria::with_strategy(kind).expect("strategy without requirements")
}

pub(super) fn criteria_with(
    kind: StrategyKind,
    destination_country: Option<&str>,
    filters: HardFilters,
) -> SelectionCriteria {
    SelectionCriteria::new(kind, destination_country.map(str::to_string), filters)
        .expect("valid criteria")
}

pub(super) fn selection_request(strategy: Option<&str>) -> SelectionRequest {
    SelectionRequest {
        origin: "Lagos".to_string(),
        destination: "Accra".to_string(),
        weight_kg: 5.0,
        strategy: strategy.map(str::to_string),
        destination_country: None,
        max_price: None,
        min_rating: None,
        required_services: Vec::new(),
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryCarriers {
    carriers: Arc<Mutex<Vec<Carrier>>>,
}

impl MemoryCarriers {
    pub(super) fn with(carriers: Vec<Carrier>) -> Self {
        Self {
            carriers: Arc::new(Mutex::new(carriers)),
        }
    }
}

impl CarrierSource for MemoryCarriers {
    fn carriers_for(&self, _shipment: &ShipmentRequest) -> Result<Vec<Carrier>, SourceError> {
        self.all()
    }

    fn all(&self) -> Result<Vec<Carrier>, SourceError> {
        Ok(self.carriers.lock().expect("carrier mutex poisoned").clone())
    }
}

pub(super) struct UnavailableCarriers;

impl CarrierSource for UnavailableCarriers {
    fn carriers_for(&self, _shipment: &ShipmentRequest) -> Result<Vec<Carrier>, SourceError> {
        Err(SourceError::Unavailable("catalog offline".to_string()))
    }

    fn all(&self) -> Result<Vec<Carrier>, SourceError> {
        Err(SourceError::Unavailable("catalog offline".to_string()))
    }
}

pub(super) fn build_service(
    carriers: Vec<Carrier>,
    limit: usize,
) -> CarrierSelectionService<MemoryCarriers> {
    CarrierSelectionService::new(Arc::new(MemoryCarriers::with(carriers)), limit)
}

pub(super) fn router_with_carriers(carriers: Vec<Carrier>) -> axum::Router {
    selection_router(Arc::new(build_service(carriers, 3)))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
