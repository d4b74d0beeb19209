use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "VoltMaster Pro API",
        version = "1.0.0",
        description = r#"
# VoltMaster Pro

Field service management API for electrical contractors: customers, quoted
jobs with material and labor breakdowns, invoicing, and dashboard stats.

## Quote math

`quote_total = (materials_total + labor_hours * labor_rate) * (1 + markup_percent / 100)`

All monetary amounts round to cents once, at the end of the calculation.

## Error Handling

Errors use a consistent JSON shape with appropriate HTTP status codes:

```json
{
  "error": "Not Found",
  "message": "Job not found",
  "timestamp": "2025-01-01T00:00:00Z"
}
```
        "#
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    tags(
        (name = "customers", description = "Customer management"),
        (name = "jobs", description = "Job and quote management"),
        (name = "invoices", description = "Invoice management"),
        (name = "estimates", description = "AI-assisted estimation"),
        (name = "stats", description = "Dashboard statistics")
    ),
    paths(
        crate::handlers::customers::create_customer,
        crate::handlers::customers::list_customers,
        crate::handlers::customers::get_customer,
        crate::handlers::customers::delete_customer,
        crate::handlers::jobs::create_job,
        crate::handlers::jobs::list_jobs,
        crate::handlers::jobs::get_job,
        crate::handlers::jobs::update_job,
        crate::handlers::jobs::delete_job,
        crate::handlers::invoices::create_invoice,
        crate::handlers::invoices::list_invoices,
        crate::handlers::invoices::get_invoice,
        crate::handlers::invoices::update_invoice,
        crate::handlers::estimates::generate_estimate,
        crate::handlers::stats::get_stats,
    ),
    components(
        schemas(
            crate::entities::customer::Model,
            crate::entities::job::Model,
            crate::entities::job::JobStatus,
            crate::entities::job::JobType,
            crate::entities::job::MaterialLineItem,
            crate::entities::job::MaterialList,
            crate::entities::invoice::Model,
            crate::entities::invoice::InvoiceStatus,
            crate::services::customers::CreateCustomerRequest,
            crate::services::jobs::MaterialInput,
            crate::services::jobs::CreateJobRequest,
            crate::services::jobs::UpdateJobRequest,
            crate::services::invoices::CreateInvoiceRequest,
            crate::services::invoices::UpdateInvoiceRequest,
            crate::services::invoices::InvoiceResponse,
            crate::services::estimator::EstimateRequest,
            crate::services::estimator::EstimateResponse,
            crate::services::stats::DashboardStats,
            crate::errors::ErrorResponse
        )
    )
)]
pub struct ApiDocV1;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/docs")
        .url("/api-docs/openapi.json", ApiDocV1::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_document_generates() {
        let openapi = ApiDocV1::openapi();
        let json = serde_json::to_string_pretty(&openapi).unwrap();
        assert!(json.contains("VoltMaster Pro API"));
        assert!(json.contains("/api/v1/customers"));
        assert!(json.contains("/api/v1/jobs"));
        assert!(json.contains("/api/v1/estimate"));
    }
}
