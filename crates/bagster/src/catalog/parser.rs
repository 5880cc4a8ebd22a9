use serde::{Deserialize, Deserializer};
use std::collections::BTreeSet;
use std::io::Read;

use crate::selection::{Carrier, CarrierId, CarrierStatus};

use super::CatalogImportError;

const LIST_SEPARATOR: char = ';';

pub(crate) fn parse_carriers<R: Read>(reader: R) -> Result<Vec<Carrier>, CatalogImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut carriers = Vec::new();

    for (index, record) in csv_reader.deserialize::<CarrierRow>().enumerate() {
        let row = record?;
        // Header occupies line 1.
        let line = index + 2;
        carriers.push(row.into_carrier(line)?);
    }

    Ok(carriers)
}

#[derive(Debug, Deserialize)]
struct CarrierRow {
    id: String,
    name: String,
    rating: f64,
    base_price_per_kg: f64,
    #[serde(default)]
    pickup_fee: f64,
    #[serde(default)]
    minimum_charge: f64,
    #[serde(default, deserialize_with = "separated_list")]
    service_areas: BTreeSet<String>,
    #[serde(default, deserialize_with = "separated_list")]
    delivery_countries: BTreeSet<String>,
    #[serde(default, deserialize_with = "separated_list")]
    transport_modes: BTreeSet<String>,
    #[serde(default, deserialize_with = "separated_list")]
    services: BTreeSet<String>,
    status: String,
}

impl CarrierRow {
    fn into_carrier(self, line: usize) -> Result<Carrier, CatalogImportError> {
        let invalid = |reason: String| CatalogImportError::InvalidRecord { line, reason };

        if self.id.is_empty() {
            return Err(invalid("carrier id is empty".to_string()));
        }

        if !(0.0..=5.0).contains(&self.rating) {
            return Err(invalid(format!(
                "rating {} for {} is outside 0-5",
                self.rating, self.id
            )));
        }

        for (field, value) in [
            ("base_price_per_kg", self.base_price_per_kg),
            ("pickup_fee", self.pickup_fee),
            ("minimum_charge", self.minimum_charge),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(format!(
                    "{field} for {} must be a non-negative amount",
                    self.id
                )));
            }
        }

        let status = CarrierStatus::parse(&self.status).ok_or_else(|| {
            invalid(format!("unknown status '{}' for {}", self.status, self.id))
        })?;

        Ok(Carrier {
            id: CarrierId(self.id),
            name: self.name,
            rating: self.rating,
            base_price_per_kg: self.base_price_per_kg,
            pickup_fee: self.pickup_fee,
            minimum_charge: self.minimum_charge,
            service_areas: self.service_areas,
            delivery_countries: self.delivery_countries,
            transport_modes: self.transport_modes,
            services: self.services,
            status,
        })
    }
}

fn separated_list<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect())
}
