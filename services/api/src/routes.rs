use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::extract::Path;
use axum::response::Response;
use axum::Extension;
use axum::Json;
use nexascore::workflows::recruiting::{
    recruiting_router, NotificationPublisher, RecruitingRepository, RecruitingService,
};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_recruiting_routes<R, N>(service: Arc<RecruitingService<R, N>>) -> axum::Router
where
    R: RecruitingRepository + 'static,
    N: NotificationPublisher + 'static,
{
    recruiting_router(service)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route(
            "/api/v1/notifications",
            get(list_notifications).delete(clear_notifications),
        )
        .route(
            "/api/v1/notifications/read",
            post(mark_notifications_read),
        )
        .route(
            "/api/v1/notifications/:notification_id",
            delete(remove_notification),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn list_notifications(
    Extension(state): Extension<AppState>,
) -> Json<serde_json::Value> {
    Json(json!({
        "unread": state.notifications.unread(),
        "notifications": state.notifications.list(),
    }))
}

pub(crate) async fn mark_notifications_read(
    Extension(state): Extension<AppState>,
) -> Json<serde_json::Value> {
    Json(json!({ "marked": state.notifications.mark_all_read() }))
}

pub(crate) async fn clear_notifications(
    Extension(state): Extension<AppState>,
) -> Json<serde_json::Value> {
    Json(json!({ "cleared": state.notifications.clear() }))
}

pub(crate) async fn remove_notification(
    Extension(state): Extension<AppState>,
    Path(notification_id): Path<u64>,
) -> Response {
    match state.notifications.remove(notification_id) {
        Some(notification) => (StatusCode::OK, Json(notification)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "notification_id": notification_id,
                "error": "notification not found",
            })),
        )
            .into_response(),
    }
}
