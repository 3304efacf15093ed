use crate::infra::{deserialize_optional_date, AppState};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Extension;
use axum::Json;
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use hireboard::pipeline::{pipeline_router, HiringPipelineService, JobRepository};

#[derive(Debug, Deserialize)]
pub(crate) struct DashboardReportRequest {
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn with_pipeline_routes<R>(service: Arc<HiringPipelineService<R>>) -> axum::Router
where
    R: JobRepository + 'static,
{
    let reports = axum::Router::new()
        .route(
            "/api/v1/reports/dashboard",
            axum::routing::post(dashboard_endpoint::<R>),
        )
        .route(
            "/api/v1/reports/calendar",
            axum::routing::get(calendar_endpoint::<R>),
        )
        .with_state(service.clone());

    pipeline_router(service)
        .merge(reports)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
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

pub(crate) async fn dashboard_endpoint<R>(
    State(service): State<Arc<HiringPipelineService<R>>>,
    Json(payload): Json<DashboardReportRequest>,
) -> Response
where
    R: JobRepository + 'static,
{
    let today = payload.today.unwrap_or_else(|| Local::now().date_naive());
    match service.dashboard(today) {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn calendar_endpoint<R>(
    State(service): State<Arc<HiringPipelineService<R>>>,
) -> Response
where
    R: JobRepository + 'static,
{
    match service.calendar() {
        Ok(calendar) => (StatusCode::OK, Json(calendar)).into_response(),
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
