use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemorySupervisorNotifier};
use crate::routes::with_shift_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use fatmos::config::AppConfig;
use fatmos::error::AppError;
use fatmos::telemetry;
use fatmos::workflows::shift::{InMemoryCheckInStore, ShiftAssessmentService};
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
    };

    let store = Arc::new(InMemoryCheckInStore::new(config.store.checkin_ttl()));
    let notifier = Arc::new(InMemorySupervisorNotifier::logging_only());
    let shift_service = Arc::new(ShiftAssessmentService::new(store, notifier));

    let app = with_shift_routes(shift_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        checkin_ttl_hours = config.store.checkin_ttl_hours,
        "fatigue monitoring service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
