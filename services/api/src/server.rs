use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryResultRepository};
use crate::routes::with_quiz_routes;
use ability_quiz::config::AppConfig;
use ability_quiz::error::AppError;
use ability_quiz::telemetry;
use ability_quiz::workflows::assessment::ResultService;
use ability_quiz::workflows::payments::PaymentGateway;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
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

    let repository = Arc::new(InMemoryResultRepository::default());
    let service = Arc::new(ResultService::new(repository));
    let gateway = Arc::new(PaymentGateway::new(
        service.clone(),
        config.payments.clone(),
    ));

    let app = with_quiz_routes(service, gateway)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "ability quiz service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
