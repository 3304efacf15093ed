use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;

use super::domain::{ActingUser, CandidateId, JobId, ScheduleDetails, SmarsEvaluation, Stage};
use super::repository::{CandidateStatusView, JobRepository, JobStatusView, RepositoryError};
use super::service::{HiringPipelineService, PipelineServiceError};

/// Router builder exposing HTTP endpoints for the hiring pipeline.
pub fn pipeline_router<R>(service: Arc<HiringPipelineService<R>>) -> Router
where
    R: JobRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/jobs",
            post(create_job_handler::<R>).get(list_jobs_handler::<R>),
        )
        .route("/api/v1/jobs/:job_id", get(job_handler::<R>))
        .route("/api/v1/jobs/:job_id/board", get(board_handler::<R>))
        .route(
            "/api/v1/jobs/:job_id/candidates",
            post(add_candidate_handler::<R>),
        )
        .route(
            "/api/v1/jobs/:job_id/candidates/:candidate_id/marks",
            post(record_mark_handler::<R>),
        )
        .route(
            "/api/v1/jobs/:job_id/candidates/:candidate_id/schedule",
            post(schedule_handler::<R>),
        )
        .route(
            "/api/v1/jobs/:job_id/candidates/:candidate_id/reject",
            post(reject_handler::<R>),
        )
        .route(
            "/api/v1/jobs/:job_id/candidates/:candidate_id/notes",
            post(note_handler::<R>),
        )
        .route(
            "/api/v1/jobs/:job_id/admissions",
            post(admission_handler::<R>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub struct CreateJobRequest {
    pub title: String,
    pub department: String,
    pub created_at: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct AddCandidateRequest {
    pub name: String,
    pub role: String,
    pub applied_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct RecordMarkRequest {
    pub stage: Stage,
    pub evaluator: String,
    pub mark: Option<i64>,
    pub feedback: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ScheduleRequest {
    pub date: Option<String>,
    pub time: Option<String>,
    pub platform: String,
    pub scheduled_by: ActingUser,
}

#[derive(Debug, Deserialize)]
pub struct NoteRequest {
    pub content: String,
    pub author: ActingUser,
}

#[derive(Debug, Deserialize)]
pub struct AdmissionRequest {
    pub evaluations: Vec<SmarsEvaluation>,
    pub admitted_on: Option<NaiveDate>,
}

pub(crate) async fn create_job_handler<R>(
    State(service): State<Arc<HiringPipelineService<R>>>,
    axum::Json(request): axum::Json<CreateJobRequest>,
) -> Response
where
    R: JobRepository + 'static,
{
    let created_at = request
        .created_at
        .unwrap_or_else(|| Local::now().date_naive());
    match service.create_job(&request.title, &request.department, created_at) {
        Ok(job) => {
            let view = JobStatusView::from_job(&job);
            (StatusCode::CREATED, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_jobs_handler<R>(
    State(service): State<Arc<HiringPipelineService<R>>>,
) -> Response
where
    R: JobRepository + 'static,
{
    match service.list_jobs() {
        Ok(jobs) => {
            let views: Vec<JobStatusView> = jobs.iter().map(JobStatusView::from_job).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn job_handler<R>(
    State(service): State<Arc<HiringPipelineService<R>>>,
    Path(job_id): Path<String>,
) -> Response
where
    R: JobRepository + 'static,
{
    match service.get_job(&JobId(job_id)) {
        Ok(job) => {
            let view = JobStatusView::from_job(&job);
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn board_handler<R>(
    State(service): State<Arc<HiringPipelineService<R>>>,
    Path(job_id): Path<String>,
) -> Response
where
    R: JobRepository + 'static,
{
    match service.board(&JobId(job_id)) {
        Ok(board) => (StatusCode::OK, axum::Json(board)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn add_candidate_handler<R>(
    State(service): State<Arc<HiringPipelineService<R>>>,
    Path(job_id): Path<String>,
    axum::Json(request): axum::Json<AddCandidateRequest>,
) -> Response
where
    R: JobRepository + 'static,
{
    let applied_date = request
        .applied_date
        .unwrap_or_else(|| Local::now().date_naive());
    match service.add_applicant(&JobId(job_id), &request.name, &request.role, applied_date) {
        Ok(candidate) => {
            let view = CandidateStatusView::from_candidate(&candidate);
            (StatusCode::CREATED, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn record_mark_handler<R>(
    State(service): State<Arc<HiringPipelineService<R>>>,
    Path((job_id, candidate_id)): Path<(String, String)>,
    axum::Json(request): axum::Json<RecordMarkRequest>,
) -> Response
where
    R: JobRepository + 'static,
{
    match service.record_mark(
        &JobId(job_id),
        &CandidateId(candidate_id),
        request.stage,
        &request.evaluator,
        request.mark,
        request.feedback,
    ) {
        Ok(candidate) => {
            let view = CandidateStatusView::from_candidate(&candidate);
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn schedule_handler<R>(
    State(service): State<Arc<HiringPipelineService<R>>>,
    Path((job_id, candidate_id)): Path<(String, String)>,
    axum::Json(request): axum::Json<ScheduleRequest>,
) -> Response
where
    R: JobRepository + 'static,
{
    let details = match ScheduleDetails::parse(
        request.date.as_deref(),
        request.time.as_deref(),
        &request.platform,
    ) {
        Ok(details) => details,
        Err(error) => return error_response(error.into()),
    };

    match service.schedule_interview(
        &JobId(job_id),
        &CandidateId(candidate_id),
        &details,
        &request.scheduled_by,
    ) {
        Ok(candidate) => {
            let view = CandidateStatusView::from_candidate(&candidate);
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn reject_handler<R>(
    State(service): State<Arc<HiringPipelineService<R>>>,
    Path((job_id, candidate_id)): Path<(String, String)>,
) -> Response
where
    R: JobRepository + 'static,
{
    match service.reject_candidate(&JobId(job_id), &CandidateId(candidate_id)) {
        Ok(candidate) => {
            let view = CandidateStatusView::from_candidate(&candidate);
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn note_handler<R>(
    State(service): State<Arc<HiringPipelineService<R>>>,
    Path((job_id, candidate_id)): Path<(String, String)>,
    axum::Json(request): axum::Json<NoteRequest>,
) -> Response
where
    R: JobRepository + 'static,
{
    let noted_at = Local::now().naive_local();
    match service.add_note(
        &JobId(job_id),
        &CandidateId(candidate_id),
        &request.content,
        &request.author,
        noted_at,
    ) {
        Ok(candidate) => {
            let view = CandidateStatusView::from_candidate(&candidate);
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn admission_handler<R>(
    State(service): State<Arc<HiringPipelineService<R>>>,
    Path(job_id): Path<String>,
    axum::Json(request): axum::Json<AdmissionRequest>,
) -> Response
where
    R: JobRepository + 'static,
{
    let admitted_on = request
        .admitted_on
        .unwrap_or_else(|| Local::now().date_naive());
    match service.admit_batch(&JobId(job_id), request.evaluations, admitted_on) {
        Ok(admission) => (StatusCode::CREATED, axum::Json(admission)).into_response(),
        Err(error) => error_response(error),
    }
}

/// Shared status mapping for pipeline failures. Stage transition refusals
/// are surfaced as warnings so an out-of-date board does not read like an
/// outage.
fn error_response(error: PipelineServiceError) -> Response {
    match error {
        PipelineServiceError::Validation(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        PipelineServiceError::Transition(error) => {
            tracing::warn!(%error, "stage transition refused");
            let payload = json!({
                "warning": error.to_string(),
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        PipelineServiceError::UnknownCandidate(id) => {
            let payload = json!({
                "error": format!("candidate '{}' not found on this job", id.0),
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        PipelineServiceError::Repository(RepositoryError::NotFound) => {
            let payload = json!({
                "error": "job not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        PipelineServiceError::Repository(RepositoryError::Conflict) => {
            let payload = json!({
                "error": "job already exists",
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
