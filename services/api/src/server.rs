use crate::cli::ServeArgs;
use crate::infra::{load_catalog, AppState};
use crate::routes::with_selection_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use bagster::config::AppConfig;
use bagster::error::AppError;
use bagster::selection::CarrierSelectionService;
use bagster::telemetry;
use chrono::Utc;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        started_at: Utc::now(),
    };

    let catalog = load_catalog(config.selection.catalog_path.as_deref())?;
    let selection_service = Arc::new(CarrierSelectionService::new(
        Arc::new(catalog),
        config.selection.recommendation_limit,
    ));

    let app = with_selection_routes(selection_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        recommendation_limit = config.selection.recommendation_limit,
        "carrier selection service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
