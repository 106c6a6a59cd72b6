use crate::cli::ServeArgs;
use crate::infra::{AppState, ProgramServices};
use crate::routes::with_program_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use pmajay_gia::config::AppConfig;
use pmajay_gia::error::AppError;
use pmajay_gia::telemetry;
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

    let services = ProgramServices::in_memory(&config.programs)?;

    let app = with_program_routes(&services)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        policy = config.programs.transition_policy.label(),
        "grant-in-aid service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
