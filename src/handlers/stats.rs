use crate::errors::ServiceError;
use crate::handlers::AppState;
use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};

#[utoipa::path(
    get,
    path = "/api/v1/stats",
    responses(
        (status = 200, description = "Dashboard statistics", body = crate::services::stats::DashboardStats)
    ),
    tag = "stats"
)]
pub async fn get_stats(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let stats = state.services.stats.get_stats().await?;
    Ok(Json(stats))
}

pub fn stats_routes() -> Router<AppState> {
    Router::new().route("/", get(get_stats))
}
