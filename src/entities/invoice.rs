use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
    strum::Display,
    strum::EnumString,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum InvoiceStatus {
    #[sea_orm(string_value = "Pending")]
    Pending,
    #[sea_orm(string_value = "Paid")]
    Paid,
    #[sea_orm(string_value = "Overdue")]
    Overdue,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "invoices")]
#[schema(as = Invoice)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub job_id: Uuid,
    pub customer_id: Uuid,
    pub customer_name: String,
    // Frozen at creation; later quote edits on the job do not change it.
    #[serde(serialize_with = "crate::quoting::serialize_cents")]
    pub amount: Decimal,
    pub status: InvoiceStatus,
    pub due_date: NaiveDate,
    pub paid_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Status as callers should see it: a pending, unpaid invoice past its
    /// due date reads as overdue without any stored-state change.
    pub fn effective_status(&self, today: NaiveDate) -> InvoiceStatus {
        effective_status(self.status, self.due_date, self.paid_date.is_some(), today)
    }
}

pub fn effective_status(
    stored: InvoiceStatus,
    due_date: NaiveDate,
    paid: bool,
    today: NaiveDate,
) -> InvoiceStatus {
    if stored == InvoiceStatus::Pending && !paid && due_date < today {
        InvoiceStatus::Overdue
    } else {
        stored
    }
}
