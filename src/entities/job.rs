use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Lifecycle status of a job.
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
pub enum JobStatus {
    #[sea_orm(string_value = "Quoted")]
    Quoted,
    #[sea_orm(string_value = "Scheduled")]
    Scheduled,
    #[sea_orm(string_value = "In Progress")]
    #[serde(rename = "In Progress")]
    #[strum(serialize = "In Progress")]
    InProgress,
    #[sea_orm(string_value = "Complete")]
    Complete,
}

impl JobStatus {
    /// Scheduled and in-progress jobs count as active work.
    pub fn is_active(&self) -> bool {
        matches!(self, JobStatus::Scheduled | JobStatus::InProgress)
    }
}

/// Category of electrical work being quoted.
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
pub enum JobType {
    #[sea_orm(string_value = "Residential Service")]
    #[serde(rename = "Residential Service")]
    #[strum(serialize = "Residential Service")]
    ResidentialService,
    #[sea_orm(string_value = "Panel Upgrade")]
    #[serde(rename = "Panel Upgrade")]
    #[strum(serialize = "Panel Upgrade")]
    PanelUpgrade,
    #[sea_orm(string_value = "EV Charger")]
    #[serde(rename = "EV Charger")]
    #[strum(serialize = "EV Charger")]
    EvCharger,
    #[sea_orm(string_value = "Commercial")]
    Commercial,
}

/// One material line on a job quote. `line_total` is always
/// `quantity * unit_cost`, recomputed whenever the line is written.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MaterialLineItem {
    pub id: Uuid,
    pub name: String,
    pub quantity: i32,
    #[serde(serialize_with = "crate::quoting::serialize_cents")]
    pub unit_cost: Decimal,
    #[serde(serialize_with = "crate::quoting::serialize_cents")]
    pub line_total: Decimal,
}

/// Materials are stored as a single JSON column rather than a child table;
/// lines are always read and written as a unit with their job.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult, ToSchema)]
pub struct MaterialList(pub Vec<MaterialLineItem>);

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "jobs")]
#[schema(as = Job)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub customer_id: Uuid,
    // Customer contact details are denormalized onto the job at creation
    // time so the quote record stays stable if the customer is deleted.
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub job_type: JobType,
    pub status: JobStatus,
    #[sea_orm(column_type = "Json")]
    pub materials: MaterialList,
    pub labor_hours: Decimal,
    #[serde(serialize_with = "crate::quoting::serialize_cents")]
    pub labor_rate: Decimal,
    pub markup_percent: Decimal,
    #[serde(serialize_with = "crate::quoting::serialize_cents")]
    pub materials_total: Decimal,
    #[serde(serialize_with = "crate::quoting::serialize_cents")]
    pub labor_total: Decimal,
    #[serde(serialize_with = "crate::quoting::serialize_cents")]
    pub quote_total: Decimal,
    pub notes: String,
    pub scheduled_date: Option<NaiveDate>,
    pub completed_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
