use crate::{
    config::AppConfig,
    db::DbPool,
    entities::{
        customer,
        job::{self, JobStatus, JobType, MaterialLineItem, MaterialList},
    },
    errors::ServiceError,
    events::{Event, EventSender},
    quoting,
};
use chrono::{NaiveDate, Utc};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Fallbacks applied when a job is created without explicit rates.
#[derive(Debug, Clone, Copy)]
pub struct QuoteDefaults {
    pub labor_rate: Decimal,
    pub markup_percent: Decimal,
}

impl Default for QuoteDefaults {
    fn default() -> Self {
        Self {
            labor_rate: dec!(85.0),
            markup_percent: dec!(20.0),
        }
    }
}

impl From<&AppConfig> for QuoteDefaults {
    fn from(cfg: &AppConfig) -> Self {
        let fallback = Self::default();
        Self {
            labor_rate: Decimal::from_f64(cfg.default_labor_rate).unwrap_or(fallback.labor_rate),
            markup_percent: Decimal::from_f64(cfg.default_markup_percent)
                .unwrap_or(fallback.markup_percent),
        }
    }
}

/// Status filter accepted by the job list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatusFilter {
    All,
    /// Scheduled and In Progress jobs.
    Active,
    Only(JobStatus),
}

impl JobStatusFilter {
    pub fn parse(raw: Option<&str>) -> Result<Self, ServiceError> {
        match raw {
            None => Ok(JobStatusFilter::All),
            Some(s) if s.eq_ignore_ascii_case("all") => Ok(JobStatusFilter::All),
            Some(s) if s.eq_ignore_ascii_case("active") => Ok(JobStatusFilter::Active),
            Some(s) => JobStatus::from_str(s)
                .map(JobStatusFilter::Only)
                .map_err(|_| {
                    ServiceError::InvalidStatus(format!("Unknown job status filter: {}", s))
                }),
        }
    }
}

/// Material line as submitted by clients; line totals are recomputed
/// server-side and never trusted from input.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct MaterialInput {
    #[validate(length(min = 1, message = "Material name cannot be empty"))]
    pub name: String,
    pub quantity: i32,
    pub unit_cost: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateJobRequest {
    pub customer_id: Uuid,
    pub job_type: JobType,
    #[serde(default)]
    #[validate]
    pub materials: Vec<MaterialInput>,
    pub labor_hours: Option<Decimal>,
    pub labor_rate: Option<Decimal>,
    pub markup_percent: Option<Decimal>,
    pub status: Option<JobStatus>,
    pub notes: Option<String>,
    pub scheduled_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateJobRequest {
    pub job_type: Option<JobType>,
    #[validate]
    pub materials: Option<Vec<MaterialInput>>,
    pub labor_hours: Option<Decimal>,
    pub labor_rate: Option<Decimal>,
    pub markup_percent: Option<Decimal>,
    pub status: Option<JobStatus>,
    pub notes: Option<String>,
    pub scheduled_date: Option<NaiveDate>,
}

fn build_materials(inputs: Vec<MaterialInput>) -> MaterialList {
    MaterialList(
        inputs
            .into_iter()
            .map(|m| {
                quoting::normalize_line(MaterialLineItem {
                    id: Uuid::new_v4(),
                    name: m.name,
                    quantity: m.quantity,
                    unit_cost: m.unit_cost,
                    line_total: Decimal::ZERO,
                })
            })
            .collect(),
    )
}

/// Case-insensitive substring match against the customer name or the job
/// type. Other fields (notes, address) are deliberately not searched.
pub fn matches_search(job: &job::Model, term: &str) -> bool {
    let needle = term.to_lowercase();
    if needle.is_empty() {
        return true;
    }
    job.customer_name.to_lowercase().contains(&needle)
        || job.job_type.to_string().to_lowercase().contains(&needle)
}

/// Service for managing jobs and their quotes
#[derive(Clone)]
pub struct JobService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
    defaults: QuoteDefaults,
}

impl JobService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>, defaults: QuoteDefaults) -> Self {
        Self {
            db_pool,
            event_sender,
            defaults,
        }
    }

    /// Creates a job for an existing customer. Contact details are copied
    /// onto the job so the quote survives customer deletion.
    #[instrument(skip(self, request))]
    pub async fn create_job(&self, request: CreateJobRequest) -> Result<job::Model, ServiceError> {
        request.validate()?;

        let customer = customer::Entity::find_by_id(request.customer_id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Customer not found".to_string()))?;

        let materials = build_materials(request.materials);
        let labor_hours = request.labor_hours.unwrap_or(Decimal::ZERO);
        let labor_rate = request.labor_rate.unwrap_or(self.defaults.labor_rate);
        let markup_percent = request
            .markup_percent
            .unwrap_or(self.defaults.markup_percent);

        validate_quote_inputs(labor_hours, labor_rate, markup_percent)?;

        let breakdown = quoting::compute(&materials, labor_hours, labor_rate, markup_percent);
        let status = request.status.unwrap_or(JobStatus::Quoted);
        let now = Utc::now();

        let model = job::ActiveModel {
            id: Set(Uuid::new_v4()),
            customer_id: Set(customer.id),
            customer_name: Set(customer.name),
            customer_phone: Set(customer.phone),
            customer_address: Set(customer.address.unwrap_or_default()),
            job_type: Set(request.job_type),
            status: Set(status),
            materials: Set(materials),
            labor_hours: Set(labor_hours),
            labor_rate: Set(labor_rate),
            markup_percent: Set(markup_percent),
            materials_total: Set(breakdown.materials_total),
            labor_total: Set(breakdown.labor_total),
            quote_total: Set(breakdown.quote_total),
            notes: Set(request.notes.unwrap_or_default()),
            scheduled_date: Set(request.scheduled_date),
            completed_date: Set((status == JobStatus::Complete).then_some(now)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let saved = model.insert(&*self.db_pool).await?;

        info!(job_id = %saved.id, quote_total = %saved.quote_total, "Job created");
        self.event_sender.send(Event::JobCreated(saved.id)).await;

        Ok(saved)
    }

    /// Lists jobs, newest first, optionally narrowed by status and a
    /// free-text search term.
    #[instrument(skip(self))]
    pub async fn list_jobs(
        &self,
        filter: JobStatusFilter,
        search: Option<&str>,
    ) -> Result<Vec<job::Model>, ServiceError> {
        let mut query = job::Entity::find().order_by_desc(job::Column::CreatedAt);

        query = match filter {
            JobStatusFilter::All => query,
            JobStatusFilter::Active => query.filter(
                job::Column::Status.is_in([JobStatus::Scheduled, JobStatus::InProgress]),
            ),
            JobStatusFilter::Only(status) => query.filter(job::Column::Status.eq(status)),
        };

        let mut jobs = query.all(&*self.db_pool).await?;

        if let Some(term) = search {
            let term = term.trim();
            if !term.is_empty() {
                jobs.retain(|j| matches_search(j, term));
            }
        }

        Ok(jobs)
    }

    /// Gets a job by ID
    #[instrument(skip(self))]
    pub async fn get_job(&self, job_id: &Uuid) -> Result<job::Model, ServiceError> {
        job::Entity::find_by_id(*job_id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Job not found".to_string()))
    }

    /// Applies a partial update. Any change to materials, hours, rate or
    /// markup recomputes the stored totals.
    #[instrument(skip(self, request))]
    pub async fn update_job(
        &self,
        job_id: &Uuid,
        request: UpdateJobRequest,
    ) -> Result<job::Model, ServiceError> {
        request.validate()?;

        let existing = self.get_job(job_id).await?;
        let old_status = existing.status;

        let materials = match request.materials {
            Some(inputs) => build_materials(inputs),
            None => existing.materials.clone(),
        };
        let labor_hours = request.labor_hours.unwrap_or(existing.labor_hours);
        let labor_rate = request.labor_rate.unwrap_or(existing.labor_rate);
        let markup_percent = request.markup_percent.unwrap_or(existing.markup_percent);

        validate_quote_inputs(labor_hours, labor_rate, markup_percent)?;

        let breakdown = quoting::compute(&materials, labor_hours, labor_rate, markup_percent);
        let new_status = request.status.unwrap_or(old_status);
        let now = Utc::now();

        // The completion timestamp records the first time the job reached
        // Complete and is never cleared afterwards.
        let completed_date = match (existing.completed_date, new_status) {
            (Some(stamp), _) => Some(stamp),
            (None, JobStatus::Complete) => Some(now),
            (None, _) => None,
        };

        let mut active: job::ActiveModel = existing.into();
        if let Some(job_type) = request.job_type {
            active.job_type = Set(job_type);
        }
        active.materials = Set(materials);
        active.labor_hours = Set(labor_hours);
        active.labor_rate = Set(labor_rate);
        active.markup_percent = Set(markup_percent);
        active.materials_total = Set(breakdown.materials_total);
        active.labor_total = Set(breakdown.labor_total);
        active.quote_total = Set(breakdown.quote_total);
        active.status = Set(new_status);
        active.completed_date = Set(completed_date);
        if let Some(notes) = request.notes {
            active.notes = Set(notes);
        }
        if let Some(date) = request.scheduled_date {
            active.scheduled_date = Set(Some(date));
        }
        active.updated_at = Set(now);

        let updated = active.update(&*self.db_pool).await?;

        if new_status != old_status {
            info!(
                job_id = %job_id,
                old_status = %old_status,
                new_status = %new_status,
                "Job status changed"
            );
            self.event_sender
                .send(Event::JobStatusChanged {
                    job_id: *job_id,
                    old_status,
                    new_status,
                })
                .await;
        }
        self.event_sender.send(Event::JobUpdated(*job_id)).await;

        Ok(updated)
    }

    /// Deletes a job
    #[instrument(skip(self))]
    pub async fn delete_job(&self, job_id: &Uuid) -> Result<(), ServiceError> {
        let result = job::Entity::delete_by_id(*job_id)
            .exec(&*self.db_pool)
            .await?;

        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound("Job not found".to_string()));
        }

        info!(job_id = %job_id, "Job deleted");
        self.event_sender.send(Event::JobDeleted(*job_id)).await;

        Ok(())
    }
}

fn validate_quote_inputs(
    labor_hours: Decimal,
    labor_rate: Decimal,
    markup_percent: Decimal,
) -> Result<(), ServiceError> {
    if labor_hours < Decimal::ZERO {
        return Err(ServiceError::InvalidInput(
            "labor_hours cannot be negative".to_string(),
        ));
    }
    if labor_rate < Decimal::ZERO {
        return Err(ServiceError::InvalidInput(
            "labor_rate cannot be negative".to_string(),
        ));
    }
    if markup_percent < Decimal::ZERO || markup_percent > Decimal::ONE_HUNDRED {
        return Err(ServiceError::InvalidInput(
            "markup_percent must be between 0 and 100".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_job() -> job::Model {
        job::Model {
            id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            customer_name: "Marta Kowalski".into(),
            customer_phone: "555-0142".into(),
            customer_address: "17 Birch Lane".into(),
            job_type: JobType::PanelUpgrade,
            status: JobStatus::Quoted,
            materials: MaterialList::default(),
            labor_hours: dec!(8),
            labor_rate: dec!(85),
            markup_percent: dec!(20),
            materials_total: Decimal::ZERO,
            labor_total: dec!(680),
            quote_total: dec!(816),
            notes: "Replace federal pacific panel".into(),
            scheduled_date: None,
            completed_date: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn filter_parsing() {
        assert_eq!(JobStatusFilter::parse(None).unwrap(), JobStatusFilter::All);
        assert_eq!(
            JobStatusFilter::parse(Some("All")).unwrap(),
            JobStatusFilter::All
        );
        assert_eq!(
            JobStatusFilter::parse(Some("Active")).unwrap(),
            JobStatusFilter::Active
        );
        assert_eq!(
            JobStatusFilter::parse(Some("In Progress")).unwrap(),
            JobStatusFilter::Only(JobStatus::InProgress)
        );
        assert!(JobStatusFilter::parse(Some("Cancelled")).is_err());
    }

    #[test]
    fn search_matches_name_or_type_only() {
        let job = sample_job();
        assert!(matches_search(&job, "marta"));
        assert!(matches_search(&job, "PANEL"));
        assert!(!matches_search(&job, "ev charger"));
        // Notes and address are not part of the search surface.
        assert!(!matches_search(&job, "federal pacific"));
        assert!(!matches_search(&job, "birch"));
    }

    #[test]
    fn search_ignores_names_buried_in_notes() {
        let mut job = sample_job();
        job.customer_name = "Alice Wong".into();
        job.job_type = JobType::Commercial;
        job.notes = "call john before arrival".into();
        assert!(!matches_search(&job, "john"));
        assert!(matches_search(&job, "alice"));
    }

    #[test]
    fn blank_search_matches_everything() {
        let job = sample_job();
        assert!(matches_search(&job, ""));
    }

    #[test]
    fn quote_input_bounds() {
        assert!(validate_quote_inputs(dec!(1), dec!(85), dec!(20)).is_ok());
        assert!(validate_quote_inputs(dec!(-1), dec!(85), dec!(20)).is_err());
        assert!(validate_quote_inputs(dec!(1), dec!(-85), dec!(20)).is_err());
        assert!(validate_quote_inputs(dec!(1), dec!(85), dec!(120)).is_err());
    }

    #[test]
    fn untrusted_line_totals_are_recomputed() {
        let materials = build_materials(vec![MaterialInput {
            name: "Breaker".into(),
            quantity: 3,
            unit_cost: dec!(10.50),
        }]);
        assert_eq!(materials.0[0].line_total, dec!(31.50));
    }
}
