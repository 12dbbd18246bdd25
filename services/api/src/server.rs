use crate::cli::ServeArgs;
use crate::infra::{demo_session, AppState, InMemoryCandidateRepository, InMemorySessionStore};
use crate::routes::with_candidate_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use hiring_engine::config::AppConfig;
use hiring_engine::error::AppError;
use hiring_engine::telemetry;
use hiring_engine::workflows::hiring::{CandidateWorkflowService, MatchEngine};
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

    let candidates = Arc::new(InMemoryCandidateRepository::default());
    let sessions = Arc::new(InMemorySessionStore::with_sessions([demo_session()]));
    let workflow_service = Arc::new(
        CandidateWorkflowService::new(
            candidates,
            sessions.clone(),
            sessions,
            MatchEngine::new(config.scoring),
        )
        .with_analytics(config.analytics),
    );

    let app = with_candidate_routes(workflow_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        policy = ?config.scoring.unconstrained_credit,
        "hiring engine ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
