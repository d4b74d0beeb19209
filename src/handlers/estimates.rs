use crate::errors::ServiceError;
use crate::handlers::AppState;
use crate::services::estimator::EstimateRequest;
use axum::{
    extract::{Json, State},
    response::IntoResponse,
    routing::post,
    Router,
};

#[utoipa::path(
    post,
    path = "/api/v1/estimate",
    request_body = EstimateRequest,
    responses(
        (status = 200, description = "Suggested materials and labor hours for the job type")
    ),
    tag = "estimates"
)]
pub async fn generate_estimate(
    State(state): State<AppState>,
    Json(request): Json<EstimateRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let estimate = state.services.estimator.estimate(request).await?;
    Ok(Json(estimate))
}

pub fn estimate_routes() -> Router<AppState> {
    Router::new().route("/", post(generate_estimate))
}
