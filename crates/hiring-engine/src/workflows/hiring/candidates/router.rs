use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::super::domain::{
    CandidateId, CandidateProfile, CandidateStatus, JobCriteria, MatchTier, SessionId, StudentId,
};
use super::repository::{
    CandidateRepository, CandidateView, RepositoryError, SessionEventPublisher, SessionRepository,
};
use super::service::{CandidateWorkflowError, CandidateWorkflowService, StatusUpdateRequest};

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub candidate: CandidateProfile,
    pub criteria: JobCriteria,
}

#[derive(Debug, Deserialize)]
pub struct AddCandidateRequest {
    pub student_id: String,
    #[serde(default)]
    pub profile: CandidateProfile,
}

#[derive(Debug, Deserialize)]
pub struct StatusBody {
    pub status: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BulkStatusBody {
    pub updates: Vec<StatusUpdateRequest>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PipelineQuery {
    #[serde(default)]
    pub status: Option<String>,
}

/// HTTP status for a workflow failure.
pub fn error_status(error: &CandidateWorkflowError) -> StatusCode {
    match error {
        CandidateWorkflowError::InvalidStatus(_) | CandidateWorkflowError::Transition(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        CandidateWorkflowError::CandidateNotFound(_)
        | CandidateWorkflowError::SessionNotFound(_)
        | CandidateWorkflowError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        CandidateWorkflowError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        CandidateWorkflowError::Repository(RepositoryError::Unavailable(_))
        | CandidateWorkflowError::Event(_)
        | CandidateWorkflowError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(error: CandidateWorkflowError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (error_status(&error), axum::Json(payload)).into_response()
}

/// Router exposing scoring, pipeline, analytics, and status endpoints.
pub fn candidate_router<C, S, E>(service: Arc<CandidateWorkflowService<C, S, E>>) -> Router
where
    C: CandidateRepository + 'static,
    S: SessionRepository + 'static,
    E: SessionEventPublisher + 'static,
{
    Router::new()
        .route("/api/v1/match/score", post(score_handler::<C, S, E>))
        .route("/api/v1/match/analysis", post(analysis_handler::<C, S, E>))
        .route(
            "/api/v1/sessions/:session_id/candidates",
            post(add_candidate_handler::<C, S, E>).get(pipeline_handler::<C, S, E>),
        )
        .route(
            "/api/v1/sessions/:session_id/refresh",
            post(refresh_handler::<C, S, E>),
        )
        .route(
            "/api/v1/sessions/:session_id/analytics",
            get(analytics_handler::<C, S, E>),
        )
        .route(
            "/api/v1/sessions/:session_id/analytics/export",
            get(export_handler::<C, S, E>),
        )
        .route(
            "/api/v1/sessions/:session_id/candidates/:candidate_id/analysis",
            get(candidate_analysis_handler::<C, S, E>),
        )
        .route(
            "/api/v1/candidates/:candidate_id/status",
            patch(status_handler::<C, S, E>),
        )
        .route(
            "/api/v1/candidates/bulk-status",
            post(bulk_status_handler::<C, S, E>),
        )
        .with_state(service)
}

pub(crate) async fn score_handler<C, S, E>(
    State(service): State<Arc<CandidateWorkflowService<C, S, E>>>,
    axum::Json(request): axum::Json<MatchRequest>,
) -> Response
where
    C: CandidateRepository + 'static,
    S: SessionRepository + 'static,
    E: SessionEventPublisher + 'static,
{
    let engine = service.engine();
    let breakdown = engine.breakdown(&request.candidate, &request.criteria);
    let match_score = breakdown.overall_score();
    let payload = json!({
        "match_score": match_score,
        "tier": MatchTier::for_score(match_score).label(),
        "breakdown": breakdown,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn analysis_handler<C, S, E>(
    State(service): State<Arc<CandidateWorkflowService<C, S, E>>>,
    axum::Json(request): axum::Json<MatchRequest>,
) -> Response
where
    C: CandidateRepository + 'static,
    S: SessionRepository + 'static,
    E: SessionEventPublisher + 'static,
{
    let result = service
        .engine()
        .analyze(&request.candidate, &request.criteria);
    (StatusCode::OK, axum::Json(result)).into_response()
}

pub(crate) async fn add_candidate_handler<C, S, E>(
    State(service): State<Arc<CandidateWorkflowService<C, S, E>>>,
    Path(session_id): Path<String>,
    axum::Json(request): axum::Json<AddCandidateRequest>,
) -> Response
where
    C: CandidateRepository + 'static,
    S: SessionRepository + 'static,
    E: SessionEventPublisher + 'static,
{
    let session_id = SessionId(session_id);
    match service.add_candidate(&session_id, StudentId(request.student_id), request.profile) {
        Ok(record) => (StatusCode::CREATED, axum::Json(CandidateView::from(&record))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn pipeline_handler<C, S, E>(
    State(service): State<Arc<CandidateWorkflowService<C, S, E>>>,
    Path(session_id): Path<String>,
    Query(query): Query<PipelineQuery>,
) -> Response
where
    C: CandidateRepository + 'static,
    S: SessionRepository + 'static,
    E: SessionEventPublisher + 'static,
{
    let filter = match query.status.as_deref() {
        Some(value) => match value.parse::<CandidateStatus>() {
            Ok(status) => Some(status),
            Err(error) => return error_response(error.into()),
        },
        None => None,
    };

    match service.pipeline(&SessionId(session_id), filter) {
        Ok(records) => {
            let views: Vec<CandidateView> = records.iter().map(CandidateView::from).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn refresh_handler<C, S, E>(
    State(service): State<Arc<CandidateWorkflowService<C, S, E>>>,
    Path(session_id): Path<String>,
) -> Response
where
    C: CandidateRepository + 'static,
    S: SessionRepository + 'static,
    E: SessionEventPublisher + 'static,
{
    match service.refresh_match_scores(&SessionId(session_id)) {
        Ok(refreshed) => {
            (StatusCode::OK, axum::Json(json!({ "refreshed": refreshed }))).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn analytics_handler<C, S, E>(
    State(service): State<Arc<CandidateWorkflowService<C, S, E>>>,
    Path(session_id): Path<String>,
) -> Response
where
    C: CandidateRepository + 'static,
    S: SessionRepository + 'static,
    E: SessionEventPublisher + 'static,
{
    match service.session_analytics(&SessionId(session_id)) {
        Ok(analytics) => (StatusCode::OK, axum::Json(analytics)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn export_handler<C, S, E>(
    State(service): State<Arc<CandidateWorkflowService<C, S, E>>>,
    Path(session_id): Path<String>,
) -> Response
where
    C: CandidateRepository + 'static,
    S: SessionRepository + 'static,
    E: SessionEventPublisher + 'static,
{
    match service.export_ranking(&SessionId(session_id)) {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn candidate_analysis_handler<C, S, E>(
    State(service): State<Arc<CandidateWorkflowService<C, S, E>>>,
    Path((session_id, candidate_id)): Path<(String, String)>,
) -> Response
where
    C: CandidateRepository + 'static,
    S: SessionRepository + 'static,
    E: SessionEventPublisher + 'static,
{
    match service.detailed_analysis(&SessionId(session_id), &CandidateId(candidate_id)) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn status_handler<C, S, E>(
    State(service): State<Arc<CandidateWorkflowService<C, S, E>>>,
    Path(candidate_id): Path<String>,
    axum::Json(body): axum::Json<StatusBody>,
) -> Response
where
    C: CandidateRepository + 'static,
    S: SessionRepository + 'static,
    E: SessionEventPublisher + 'static,
{
    let id = CandidateId(candidate_id);
    match service.update_status(&id, &body.status, body.notes) {
        Ok(transition) => {
            let payload = json!({
                "previous_status": transition.previous.as_str(),
                "candidate": CandidateView::from(&transition.record),
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn bulk_status_handler<C, S, E>(
    State(service): State<Arc<CandidateWorkflowService<C, S, E>>>,
    axum::Json(body): axum::Json<BulkStatusBody>,
) -> Response
where
    C: CandidateRepository + 'static,
    S: SessionRepository + 'static,
    E: SessionEventPublisher + 'static,
{
    let report = service.bulk_update_status(&body.updates);
    (StatusCode::OK, axum::Json(report)).into_response()
}
