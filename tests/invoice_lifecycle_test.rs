mod common;

use axum::http::{Method, StatusCode};
use common::TestApp;
use serde_json::json;

async fn seed_job(app: &TestApp) -> String {
    let customer = app
        .request_json(
            Method::POST,
            "/api/v1/customers",
            Some(json!({"name": "Ivan Petrov", "phone": "555-0111"})),
            StatusCode::CREATED,
        )
        .await;

    let job = app
        .request_json(
            Method::POST,
            "/api/v1/jobs",
            Some(json!({
                "customer_id": customer["id"],
                "job_type": "Residential Service",
                "materials": [
                    {"name": "Outlet Receptacle", "quantity": 3, "unit_cost": "10.50"}
                ],
                "labor_hours": "2"
            })),
            StatusCode::CREATED,
        )
        .await;

    job["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn invoice_amount_is_frozen_at_creation() {
    let app = TestApp::new().await;
    let job_id = seed_job(&app).await;

    let invoice = app
        .request_json(
            Method::POST,
            "/api/v1/invoices",
            Some(json!({"job_id": job_id})),
            StatusCode::CREATED,
        )
        .await;
    assert_eq!(invoice["amount"], "241.80");
    assert_eq!(invoice["status"], "Pending");
    assert_eq!(invoice["customer_name"], "Ivan Petrov");
    let invoice_id = invoice["id"].as_str().unwrap().to_string();

    // Editing the job's quote afterwards must not touch the billed amount.
    app.request_json(
        Method::PUT,
        &format!("/api/v1/jobs/{}", job_id),
        Some(json!({"markup_percent": "0"})),
        StatusCode::OK,
    )
    .await;

    let fetched = app
        .request_json(
            Method::GET,
            &format!("/api/v1/invoices/{}", invoice_id),
            None,
            StatusCode::OK,
        )
        .await;
    assert_eq!(fetched["amount"], "241.80");
}

#[tokio::test]
async fn past_due_pending_invoices_read_as_overdue() {
    let app = TestApp::new().await;
    let job_id = seed_job(&app).await;

    let invoice = app
        .request_json(
            Method::POST,
            "/api/v1/invoices",
            Some(json!({"job_id": job_id, "due_date": "2020-01-15"})),
            StatusCode::CREATED,
        )
        .await;
    let invoice_id = invoice["id"].as_str().unwrap().to_string();
    assert_eq!(invoice["status"], "Overdue");

    // The overdue filter works on the effective status.
    let overdue = app
        .request_json(
            Method::GET,
            "/api/v1/invoices?status=Overdue",
            None,
            StatusCode::OK,
        )
        .await;
    assert_eq!(overdue.as_array().unwrap().len(), 1);
    assert_eq!(overdue[0]["id"], invoice_id.as_str());

    let pending = app
        .request_json(
            Method::GET,
            "/api/v1/invoices?status=Pending",
            None,
            StatusCode::OK,
        )
        .await;
    assert!(pending.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn paying_an_invoice_stamps_payment_time() {
    let app = TestApp::new().await;
    let job_id = seed_job(&app).await;

    let invoice = app
        .request_json(
            Method::POST,
            "/api/v1/invoices",
            Some(json!({"job_id": job_id, "due_date": "2020-01-15"})),
            StatusCode::CREATED,
        )
        .await;
    let invoice_id = invoice["id"].as_str().unwrap().to_string();

    let paid = app
        .request_json(
            Method::PUT,
            &format!("/api/v1/invoices/{}", invoice_id),
            Some(json!({"status": "Paid"})),
            StatusCode::OK,
        )
        .await;
    assert_eq!(paid["status"], "Paid");
    assert!(paid["paid_date"].is_string());

    // Paid invoices never flip back to Overdue, even past their due date.
    let fetched = app
        .request_json(
            Method::GET,
            &format!("/api/v1/invoices/{}", invoice_id),
            None,
            StatusCode::OK,
        )
        .await;
    assert_eq!(fetched["status"], "Paid");
}

#[tokio::test]
async fn invoice_for_unknown_job_is_rejected() {
    let app = TestApp::new().await;

    app.request_json(
        Method::POST,
        "/api/v1/invoices",
        Some(json!({"job_id": "00000000-0000-0000-0000-000000000000"})),
        StatusCode::NOT_FOUND,
    )
    .await;
}

#[tokio::test]
async fn unknown_status_filter_is_rejected() {
    let app = TestApp::new().await;

    app.request_json(
        Method::GET,
        "/api/v1/invoices?status=Void",
        None,
        StatusCode::BAD_REQUEST,
    )
    .await;
}
