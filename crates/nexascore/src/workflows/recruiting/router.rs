use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{PostingId, ScoringParameters};
use super::repository::{NotificationPublisher, RecruitingRepository, RepositoryError};
use super::service::{RecruitingService, RecruitingServiceError};

#[derive(Debug, Default, Deserialize)]
pub(crate) struct MatchQuery {
    #[serde(default)]
    pub(crate) limit: Option<usize>,
}

/// Router builder exposing posting lookup, scoring configuration, and ranking.
pub fn recruiting_router<R, N>(service: Arc<RecruitingService<R, N>>) -> Router
where
    R: RecruitingRepository + 'static,
    N: NotificationPublisher + 'static,
{
    Router::new()
        .route(
            "/api/v1/postings/:posting_id",
            get(posting_handler::<R, N>),
        )
        .route(
            "/api/v1/postings/:posting_id/scoring",
            put(scoring_handler::<R, N>),
        )
        .route(
            "/api/v1/postings/:posting_id/matches",
            post(matches_handler::<R, N>),
        )
        .with_state(service)
}

pub(crate) async fn posting_handler<R, N>(
    State(service): State<Arc<RecruitingService<R, N>>>,
    Path(posting_id): Path<u32>,
) -> Response
where
    R: RecruitingRepository + 'static,
    N: NotificationPublisher + 'static,
{
    match service.posting(PostingId(posting_id)) {
        Ok(posting) => (StatusCode::OK, axum::Json(posting)).into_response(),
        Err(error) => error_response(posting_id, error),
    }
}

pub(crate) async fn scoring_handler<R, N>(
    State(service): State<Arc<RecruitingService<R, N>>>,
    Path(posting_id): Path<u32>,
    axum::Json(parameters): axum::Json<ScoringParameters>,
) -> Response
where
    R: RecruitingRepository + 'static,
    N: NotificationPublisher + 'static,
{
    match service.configure_scoring(PostingId(posting_id), parameters) {
        Ok(posting) => (StatusCode::OK, axum::Json(posting.scoring_or_default())).into_response(),
        Err(error) => error_response(posting_id, error),
    }
}

pub(crate) async fn matches_handler<R, N>(
    State(service): State<Arc<RecruitingService<R, N>>>,
    Path(posting_id): Path<u32>,
    Query(query): Query<MatchQuery>,
) -> Response
where
    R: RecruitingRepository + 'static,
    N: NotificationPublisher + 'static,
{
    match service.rank_candidates(PostingId(posting_id), query.limit) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => error_response(posting_id, error),
    }
}

fn error_response(posting_id: u32, error: RecruitingServiceError) -> Response {
    match error {
        RecruitingServiceError::Repository(RepositoryError::NotFound) => {
            let payload = json!({
                "posting_id": posting_id,
                "error": "posting not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        RecruitingServiceError::Scoring(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        RecruitingServiceError::Repository(RepositoryError::Conflict) => {
            let payload = json!({
                "error": "posting already exists",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        other => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
