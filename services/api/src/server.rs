use crate::cli::ServeArgs;
use crate::infra::{seed_profiles, AppState, InMemoryNotificationPublisher,
    InMemoryProfileRepository};
use crate::routes::with_risk_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;
use vitalwatch::config::AppConfig;
use vitalwatch::error::AppError;
use vitalwatch::risk::{ProfileRepository, RiskAssessmentService, RiskEngine, ServiceError};
use vitalwatch::telemetry;

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

    let repository = Arc::new(InMemoryProfileRepository::default());
    for profile in seed_profiles() {
        repository
            .insert_profile(profile)
            .map_err(ServiceError::from)?;
    }

    let notifier = Arc::new(InMemoryNotificationPublisher::default());
    let assessment_service = Arc::new(RiskAssessmentService::new(
        repository,
        notifier,
        RiskEngine::default(),
    ));

    let app = with_risk_routes(assessment_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "personalized risk service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
