use crate::errors::ServiceError;
use crate::handlers::AppState;
use crate::services::jobs::{CreateJobRequest, JobStatusFilter, UpdateJobRequest};
use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

#[derive(Debug, Deserialize, IntoParams)]
pub struct JobListQuery {
    /// "All", "Active", or a single status like "In Progress".
    pub status: Option<String>,
    /// Case-insensitive match on customer name or job type.
    pub search: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/v1/jobs",
    request_body = CreateJobRequest,
    responses(
        (status = 201, description = "Job created with computed quote totals"),
        (status = 400, description = "Invalid quote inputs"),
        (status = 404, description = "Customer not found")
    ),
    tag = "jobs"
)]
pub async fn create_job(
    State(state): State<AppState>,
    Json(request): Json<CreateJobRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let job = state.services.jobs.create_job(request).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

#[utoipa::path(
    get,
    path = "/api/v1/jobs",
    params(JobListQuery),
    responses(
        (status = 200, description = "Jobs matching the filter, newest first"),
        (status = 400, description = "Unknown status filter")
    ),
    tag = "jobs"
)]
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobListQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let filter = JobStatusFilter::parse(query.status.as_deref())?;
    let jobs = state
        .services
        .jobs
        .list_jobs(filter, query.search.as_deref())
        .await?;
    Ok(Json(jobs))
}

#[utoipa::path(
    get,
    path = "/api/v1/jobs/{id}",
    params(("id" = Uuid, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Job found"),
        (status = 404, description = "Job not found")
    ),
    tag = "jobs"
)]
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let job = state.services.jobs.get_job(&id).await?;
    Ok(Json(job))
}

#[utoipa::path(
    put,
    path = "/api/v1/jobs/{id}",
    params(("id" = Uuid, Path, description = "Job ID")),
    request_body = UpdateJobRequest,
    responses(
        (status = 200, description = "Job updated, totals recomputed"),
        (status = 400, description = "Invalid quote inputs"),
        (status = 404, description = "Job not found")
    ),
    tag = "jobs"
)]
pub async fn update_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateJobRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let job = state.services.jobs.update_job(&id, request).await?;
    Ok(Json(job))
}

#[utoipa::path(
    delete,
    path = "/api/v1/jobs/{id}",
    params(("id" = Uuid, Path, description = "Job ID")),
    responses(
        (status = 204, description = "Job deleted"),
        (status = 404, description = "Job not found")
    ),
    tag = "jobs"
)]
pub async fn delete_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.jobs.delete_job(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn job_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_job))
        .route("/", get(list_jobs))
        .route("/:id", get(get_job))
        .route("/:id", put(update_job))
        .route("/:id", delete(delete_job))
}
