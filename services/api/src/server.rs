use crate::cli::ServeArgs;
use crate::infra::{load_alignment, AppState};
use crate::routes::with_tiebreak_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use gridiron_tiebreak::config::AppConfig;
use gridiron_tiebreak::error::AppError;
use gridiron_tiebreak::standings::TiebreakService;
use gridiron_tiebreak::telemetry;
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

    let alignment = load_alignment(config.league.alignment_path.as_deref())?;
    let service = Arc::new(TiebreakService::new(Arc::new(alignment)));

    let app = with_tiebreak_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "tiebreak service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
