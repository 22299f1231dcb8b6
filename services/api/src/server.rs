use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryArtifactStore, InMemoryContactStore, LoggingNotifier};
use crate::routes::with_intake_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use mindthegaps::config::AppConfig;
use mindthegaps::error::AppError;
use mindthegaps::telemetry;
use mindthegaps::workflows::intake::GapScanService;
use std::sync::atomic::{AtomicBool, Ordering};
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
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let service = Arc::new(GapScanService::new(
        Arc::new(InMemoryContactStore::default()),
        Arc::new(InMemoryArtifactStore::default()),
        Arc::new(LoggingNotifier::default()),
        config.thresholds.clone(),
    ));

    let app = with_intake_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "growth gap service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
