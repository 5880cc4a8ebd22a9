use std::collections::BTreeSet;

use crate::selection::{Carrier, CarrierId, CarrierStatus};

fn set(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn carrier(
    id: &str,
    name: &str,
    rating: f64,
    pricing: (f64, f64, f64),
    service_areas: &[&str],
    delivery_countries: &[&str],
    transport_modes: &[&str],
    services: &[&str],
    status: CarrierStatus,
) -> Carrier {
    let (base_price_per_kg, pickup_fee, minimum_charge) = pricing;
    Carrier {
        id: CarrierId(id.to_string()),
        name: name.to_string(),
        rating,
        base_price_per_kg,
        pickup_fee,
        minimum_charge,
        service_areas: set(service_areas),
        delivery_countries: set(delivery_countries),
        transport_modes: set(transport_modes),
        services: set(services),
        status,
    }
}

/// Built-in marketplace catalog used when no CSV export is configured.
pub fn demo_catalog() -> Vec<Carrier> {
    vec![
        carrier(
            "cr-001",
            "Lagos Express Logistics",
            4.6,
            (450.0, 1500.0, 3000.0),
            &["Lagos", "Ibadan", "Abuja"],
            &["Nigeria", "Benin"],
            &["road"],
            &["express", "tracking", "insurance"],
            CarrierStatus::Approved,
        ),
        carrier(
            "cr-002",
            "Naija Haulage Co",
            3.9,
            (300.0, 1000.0, 2500.0),
            &["All Nigeria"],
            &["Nigeria"],
            &["road", "rail"],
            &["tracking", "bulk"],
            CarrierStatus::Approved,
        ),
        carrier(
            "cr-003",
            "Gold Coast Freight",
            4.4,
            (520.0, 1200.0, 4000.0),
            &["Accra", "Kumasi", "Lagos"],
            &["Ghana", "Togo"],
            &["road", "air"],
            &["express", "customs"],
            CarrierStatus::Approved,
        ),
        carrier(
            "cr-004",
            "Sahel Cargo Partners",
            4.1,
            (380.0, 800.0, 2000.0),
            &["Kano", "Abuja", "Accra"],
            &["Niger", "Ghana", "Nigeria"],
            &["road"],
            &["customs", "bulk"],
            CarrierStatus::Approved,
        ),
        carrier(
            "cr-005",
            "Rift Valley Movers",
            4.8,
            (610.0, 2000.0, 5000.0),
            &["Nairobi", "Mombasa", "Kampala"],
            &["Kenya", "Uganda", "Tanzania"],
            &["road", "air"],
            &["express", "tracking", "cold_chain"],
            CarrierStatus::Approved,
        ),
        carrier(
            "cr-006",
            "Cape Line Couriers",
            4.3,
            (700.0, 2500.0, 6000.0),
            &["All South Africa"],
            &["South Africa", "Namibia", "Botswana"],
            &["road", "air"],
            &["express", "insurance"],
            CarrierStatus::Approved,
        ),
        carrier(
            "cr-007",
            "Harmattan Transit",
            4.9,
            (250.0, 500.0, 1000.0),
            &["Lagos", "Accra"],
            &["Nigeria", "Ghana"],
            &["road"],
            &["express"],
            CarrierStatus::Pending,
        ),
        carrier(
            "cr-008",
            "Savanna Budget Freight",
            2.7,
            (180.0, 300.0, 800.0),
            &["Lagos", "Kano"],
            &["Nigeria"],
            &["road"],
            &["bulk"],
            CarrierStatus::Rejected,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn demo_catalog_ids_are_unique() {
        let catalog = demo_catalog();
        let ids: HashSet<_> = catalog.iter().map(|carrier| carrier.id.clone()).collect();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn demo_catalog_includes_non_approved_carriers() {
        let catalog = demo_catalog();
        assert!(catalog.iter().any(|carrier| !carrier.is_approved()));
        assert!(catalog
            .iter()
            .all(|carrier| (0.0..=5.0).contains(&carrier.rating)));
    }
}
