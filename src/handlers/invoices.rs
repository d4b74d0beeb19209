use crate::entities::invoice::InvoiceStatus;
use crate::errors::ServiceError;
use crate::handlers::AppState;
use crate::services::invoices::{CreateInvoiceRequest, UpdateInvoiceRequest};
use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use std::str::FromStr;
use utoipa::IntoParams;
use uuid::Uuid;

#[derive(Debug, Deserialize, IntoParams)]
pub struct InvoiceListQuery {
    /// "All" or one of Pending / Paid / Overdue. The filter is applied to
    /// the effective status, after overdue detection.
    pub status: Option<String>,
}

fn parse_status_filter(raw: Option<&str>) -> Result<Option<InvoiceStatus>, ServiceError> {
    match raw {
        None => Ok(None),
        Some(s) if s.eq_ignore_ascii_case("all") => Ok(None),
        Some(s) => InvoiceStatus::from_str(s).map(Some).map_err(|_| {
            ServiceError::InvalidStatus(format!("Unknown invoice status filter: {}", s))
        }),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/invoices",
    request_body = CreateInvoiceRequest,
    responses(
        (status = 201, description = "Invoice created with amount frozen from the job"),
        (status = 404, description = "Job not found")
    ),
    tag = "invoices"
)]
pub async fn create_invoice(
    State(state): State<AppState>,
    Json(request): Json<CreateInvoiceRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let invoice = state.services.invoices.create_invoice(request).await?;
    Ok((StatusCode::CREATED, Json(invoice)))
}

#[utoipa::path(
    get,
    path = "/api/v1/invoices",
    params(InvoiceListQuery),
    responses(
        (status = 200, description = "Invoices with effective status, newest first"),
        (status = 400, description = "Unknown status filter")
    ),
    tag = "invoices"
)]
pub async fn list_invoices(
    State(state): State<AppState>,
    Query(query): Query<InvoiceListQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let filter = parse_status_filter(query.status.as_deref())?;
    let invoices = state.services.invoices.list_invoices(filter).await?;
    Ok(Json(invoices))
}

#[utoipa::path(
    get,
    path = "/api/v1/invoices/{id}",
    params(("id" = Uuid, Path, description = "Invoice ID")),
    responses(
        (status = 200, description = "Invoice found"),
        (status = 404, description = "Invoice not found")
    ),
    tag = "invoices"
)]
pub async fn get_invoice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let invoice = state.services.invoices.get_invoice(&id).await?;
    Ok(Json(invoice))
}

#[utoipa::path(
    put,
    path = "/api/v1/invoices/{id}",
    params(("id" = Uuid, Path, description = "Invoice ID")),
    request_body = UpdateInvoiceRequest,
    responses(
        (status = 200, description = "Invoice updated"),
        (status = 404, description = "Invoice not found")
    ),
    tag = "invoices"
)]
pub async fn update_invoice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateInvoiceRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let invoice = state
        .services
        .invoices
        .update_invoice(&id, request)
        .await?;
    Ok(Json(invoice))
}

pub fn invoice_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_invoice))
        .route("/", get(list_invoices))
        .route("/:id", get(get_invoice))
        .route("/:id", put(update_invoice))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_filter_parsing() {
        assert_eq!(parse_status_filter(None).unwrap(), None);
        assert_eq!(parse_status_filter(Some("All")).unwrap(), None);
        assert_eq!(
            parse_status_filter(Some("Overdue")).unwrap(),
            Some(InvoiceStatus::Overdue)
        );
        assert!(parse_status_filter(Some("Void")).is_err());
    }
}
