use bagster::catalog::{demo_catalog, CarrierCatalogImporter};
use bagster::error::AppError;
use bagster::selection::{Carrier, CarrierSource, ShipmentRequest, SourceError};
use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, RwLock};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) started_at: DateTime<Utc>,
}

/// Carrier source backed by a catalog loaded at startup.
#[derive(Default, Clone)]
pub(crate) struct InMemoryCarrierCatalog {
    carriers: Arc<RwLock<Vec<Carrier>>>,
}

impl InMemoryCarrierCatalog {
    pub(crate) fn new(carriers: Vec<Carrier>) -> Self {
        Self {
            carriers: Arc::new(RwLock::new(carriers)),
        }
    }

    fn snapshot(&self) -> Result<Vec<Carrier>, SourceError> {
        self.carriers
            .read()
            .map(|guard| guard.clone())
            .map_err(|_| SourceError::Unavailable("carrier catalog lock poisoned".to_string()))
    }
}

impl CarrierSource for InMemoryCarrierCatalog {
    fn carriers_for(&self, _shipment: &ShipmentRequest) -> Result<Vec<Carrier>, SourceError> {
        let mut carriers = self.snapshot()?;
        carriers.retain(|carrier| carrier.is_approved());
        Ok(carriers)
    }

    fn all(&self) -> Result<Vec<Carrier>, SourceError> {
        self.snapshot()
    }
}

/// Load the configured CSV catalog, falling back to the built-in demo data.
pub(crate) fn load_catalog(path: Option<&Path>) -> Result<InMemoryCarrierCatalog, AppError> {
    let carriers = match path {
        Some(path) => {
            let carriers = CarrierCatalogImporter::from_path(path)?;
            info!(path = %path.display(), carriers = carriers.len(), "carrier catalog imported");
            carriers
        }
        None => demo_catalog(),
    };

    Ok(InMemoryCarrierCatalog::new(carriers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bagster::selection::CarrierStatus;

    #[test]
    fn catalog_only_offers_approved_carriers_for_shipments() {
        let catalog = load_catalog(None).expect("demo catalog loads");
        let shipment = ShipmentRequest {
            origin: "Lagos".to_string(),
            destination: "Accra".to_string(),
            weight_kg: 5.0,
        };

        let candidates = catalog.carriers_for(&shipment).expect("source available");
        assert!(!candidates.is_empty());
        assert!(candidates
            .iter()
            .all(|carrier| carrier.status == CarrierStatus::Approved));
        assert!(catalog.all().expect("source available").len() > candidates.len());
    }

    #[test]
    fn missing_catalog_file_is_reported() {
        let result = load_catalog(Some(Path::new("/nonexistent/bagster/carriers.csv")));
        assert!(matches!(result, Err(AppError::Catalog(_))));
    }
}
