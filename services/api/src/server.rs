use crate::cli::ServeArgs;
use crate::demo::{seed_pool, seed_postings};
use crate::infra::{AppState, InMemoryNotificationCenter, InMemoryRecruitingRepository};
use crate::routes::with_recruiting_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use nexascore::config::AppConfig;
use nexascore::error::AppError;
use nexascore::telemetry;
use nexascore::workflows::recruiting::{RecruitingService, SkillCatalog};
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
    let notifications = Arc::new(InMemoryNotificationCenter::default());
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        notifications: notifications.clone(),
    };

    let mut catalog = SkillCatalog::new();
    let pool = seed_pool(&mut catalog)?;
    let candidate_count = pool.len();
    let repository = Arc::new(InMemoryRecruitingRepository::with_candidates(pool));
    let recruiting_service = Arc::new(RecruitingService::new(
        repository,
        notifications,
        config.matching.clone(),
    ));

    for draft in seed_postings(&mut catalog) {
        recruiting_service.open_posting(draft)?;
    }
    info!(candidates = candidate_count, "sample recruiting data loaded");

    let app = with_recruiting_routes(recruiting_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "nexascore recruiting api ready");

    axum::serve(listener, app).await?;
    Ok(())
}
