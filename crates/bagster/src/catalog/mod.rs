mod parser;
mod seed;

pub use seed::demo_catalog;

use crate::selection::Carrier;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum CatalogImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidRecord { line: usize, reason: String },
}

impl std::fmt::Display for CatalogImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogImportError::Io(err) => write!(f, "failed to read carrier catalog: {}", err),
            CatalogImportError::Csv(err) => write!(f, "invalid carrier catalog CSV: {}", err),
            CatalogImportError::InvalidRecord { line, reason } => {
                write!(f, "invalid carrier record on line {}: {}", line, reason)
            }
        }
    }
}

impl std::error::Error for CatalogImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogImportError::Io(err) => Some(err),
            CatalogImportError::Csv(err) => Some(err),
            CatalogImportError::InvalidRecord { .. } => None,
        }
    }
}

impl From<std::io::Error> for CatalogImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CatalogImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Loads carrier records from a CSV export.
///
/// Expected columns: `id,name,rating,base_price_per_kg,pickup_fee,
/// minimum_charge,service_areas,delivery_countries,transport_modes,services,
/// status`, with `;` separating list entries.
pub struct CarrierCatalogImporter;

impl CarrierCatalogImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Carrier>, CatalogImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Carrier>, CatalogImportError> {
        let carriers = parser::parse_carriers(reader)?;

        let mut seen = HashSet::new();
        for (index, carrier) in carriers.iter().enumerate() {
            if !seen.insert(carrier.id.clone()) {
                return Err(CatalogImportError::InvalidRecord {
                    line: index + 2,
                    reason: format!("duplicate carrier id {}", carrier.id),
                });
            }
        }

        Ok(carriers)
    }
}
