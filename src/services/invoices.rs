use crate::{
    db::DbPool,
    entities::{
        invoice::{self, InvoiceStatus},
        job,
    },
    errors::ServiceError,
    events::{Event, EventSender},
};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Payment terms applied when no due date is given.
const DEFAULT_TERMS_DAYS: i64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateInvoiceRequest {
    pub job_id: Uuid,
    /// Defaults to the job's current quote total. Frozen afterwards.
    pub amount: Option<Decimal>,
    /// Defaults to 30 days from today.
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateInvoiceRequest {
    pub status: Option<InvoiceStatus>,
    pub due_date: Option<NaiveDate>,
    pub paid_date: Option<DateTime<Utc>>,
}

/// Invoice as returned to clients: the status field already reflects
/// overdue detection, which never touches the stored row.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InvoiceResponse {
    pub id: Uuid,
    pub job_id: Uuid,
    pub customer_id: Uuid,
    pub customer_name: String,
    #[serde(serialize_with = "crate::quoting::serialize_cents")]
    pub amount: Decimal,
    pub status: InvoiceStatus,
    pub due_date: NaiveDate,
    pub paid_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl InvoiceResponse {
    pub fn from_model(model: invoice::Model, today: NaiveDate) -> Self {
        let status = model.effective_status(today);
        Self {
            id: model.id,
            job_id: model.job_id,
            customer_id: model.customer_id,
            customer_name: model.customer_name,
            amount: model.amount,
            status,
            due_date: model.due_date,
            paid_date: model.paid_date,
            created_at: model.created_at,
        }
    }
}

/// Service for managing invoices
#[derive(Clone)]
pub struct InvoiceService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl InvoiceService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Creates an invoice for a job. The amount is frozen at creation, so
    /// later quote edits on the job never change what was billed.
    #[instrument(skip(self))]
    pub async fn create_invoice(
        &self,
        request: CreateInvoiceRequest,
    ) -> Result<InvoiceResponse, ServiceError> {
        request.validate()?;

        let job = job::Entity::find_by_id(request.job_id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Job not found".to_string()))?;

        let amount = request.amount.unwrap_or(job.quote_total);
        if amount < Decimal::ZERO {
            return Err(ServiceError::InvalidInput(
                "Invoice amount cannot be negative".to_string(),
            ));
        }

        let now = Utc::now();
        let today = now.date_naive();
        let due_date = request
            .due_date
            .unwrap_or_else(|| today + Duration::days(DEFAULT_TERMS_DAYS));

        let model = invoice::ActiveModel {
            id: Set(Uuid::new_v4()),
            job_id: Set(job.id),
            customer_id: Set(job.customer_id),
            customer_name: Set(job.customer_name),
            amount: Set(amount),
            status: Set(InvoiceStatus::Pending),
            due_date: Set(due_date),
            paid_date: Set(None),
            created_at: Set(now),
        };

        let saved = model.insert(&*self.db_pool).await?;

        info!(invoice_id = %saved.id, job_id = %saved.job_id, amount = %saved.amount, "Invoice created");
        self.event_sender
            .send(Event::InvoiceCreated(saved.id))
            .await;

        Ok(InvoiceResponse::from_model(saved, today))
    }

    /// Lists invoices, newest first. The optional status filter is applied
    /// to the effective status, so "Overdue" finds pending invoices past
    /// their due date even though the stored rows still say Pending.
    #[instrument(skip(self))]
    pub async fn list_invoices(
        &self,
        status: Option<InvoiceStatus>,
    ) -> Result<Vec<InvoiceResponse>, ServiceError> {
        let today = Utc::now().date_naive();

        let invoices = invoice::Entity::find()
            .order_by_desc(invoice::Column::CreatedAt)
            .all(&*self.db_pool)
            .await?;

        let mut responses: Vec<InvoiceResponse> = invoices
            .into_iter()
            .map(|m| InvoiceResponse::from_model(m, today))
            .collect();

        if let Some(wanted) = status {
            responses.retain(|r| r.status == wanted);
        }

        Ok(responses)
    }

    /// Gets an invoice by ID
    #[instrument(skip(self))]
    pub async fn get_invoice(&self, invoice_id: &Uuid) -> Result<InvoiceResponse, ServiceError> {
        let model = invoice::Entity::find_by_id(*invoice_id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Invoice not found".to_string()))?;

        Ok(InvoiceResponse::from_model(model, Utc::now().date_naive()))
    }

    /// Updates invoice status or terms. Marking an invoice Paid stamps
    /// the payment time once; moving it back to Pending clears it.
    #[instrument(skip(self))]
    pub async fn update_invoice(
        &self,
        invoice_id: &Uuid,
        request: UpdateInvoiceRequest,
    ) -> Result<InvoiceResponse, ServiceError> {
        request.validate()?;

        let existing = invoice::Entity::find_by_id(*invoice_id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Invoice not found".to_string()))?;

        let old_status = existing.status;
        let was_paid = existing.paid_date.is_some();
        let new_status = request.status.unwrap_or(old_status);

        let paid_date = match new_status {
            InvoiceStatus::Paid => request
                .paid_date
                .or(existing.paid_date)
                .or_else(|| Some(Utc::now())),
            _ => None,
        };

        let mut active: invoice::ActiveModel = existing.into();
        active.status = Set(new_status);
        active.paid_date = Set(paid_date);
        if let Some(due) = request.due_date {
            active.due_date = Set(due);
        }

        let updated = active.update(&*self.db_pool).await?;

        if new_status == InvoiceStatus::Paid && !was_paid {
            info!(invoice_id = %invoice_id, "Invoice paid");
            self.event_sender
                .send(Event::InvoicePaid(*invoice_id))
                .await;
        }

        Ok(InvoiceResponse::from_model(
            updated,
            Utc::now().date_naive(),
        ))
    }
}
