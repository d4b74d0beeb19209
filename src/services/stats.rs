use crate::{
    db::DbPool,
    entities::job::{self, JobStatus},
    errors::ServiceError,
};
use chrono::{DateTime, Duration, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use sea_orm::EntityTrait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DashboardStats {
    /// Quote totals of jobs completed in the last seven days.
    pub week_revenue: Decimal,
    pub active_jobs: u64,
    pub pending_quotes: u64,
    pub total_jobs: u64,
}

/// Pure aggregation over a job snapshot; the week window is
/// `[now - 7d, now]` measured against each job's completion time.
pub fn compute_stats(jobs: &[job::Model], now: DateTime<Utc>) -> DashboardStats {
    let week_ago = now - Duration::days(7);

    let active_jobs = jobs.iter().filter(|j| j.status.is_active()).count() as u64;
    let pending_quotes = jobs
        .iter()
        .filter(|j| j.status == JobStatus::Quoted)
        .count() as u64;

    let week_revenue: Decimal = jobs
        .iter()
        .filter(|j| {
            j.status == JobStatus::Complete
                && j.completed_date.is_some_and(|done| done >= week_ago)
        })
        .map(|j| j.quote_total)
        .sum();

    let mut week_revenue =
        week_revenue.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    week_revenue.rescale(2);

    DashboardStats {
        week_revenue,
        active_jobs,
        pending_quotes,
        total_jobs: jobs.len() as u64,
    }
}

/// Service for dashboard statistics
#[derive(Clone)]
pub struct StatsService {
    db_pool: Arc<DbPool>,
}

impl StatsService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self))]
    pub async fn get_stats(&self) -> Result<DashboardStats, ServiceError> {
        let jobs = job::Entity::find().all(&*self.db_pool).await?;
        Ok(compute_stats(&jobs, Utc::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::job::{JobType, MaterialList};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn job(status: JobStatus, quote_total: Decimal, updated_at: DateTime<Utc>) -> job::Model {
        job::Model {
            id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            customer_name: "Customer".into(),
            customer_phone: "555-0100".into(),
            customer_address: "".into(),
            job_type: JobType::ResidentialService,
            status,
            materials: MaterialList::default(),
            labor_hours: dec!(0),
            labor_rate: dec!(85),
            markup_percent: dec!(20),
            materials_total: dec!(0),
            labor_total: dec!(0),
            quote_total,
            notes: "".into(),
            scheduled_date: None,
            completed_date: (status == JobStatus::Complete).then_some(updated_at),
            created_at: updated_at,
            updated_at,
        }
    }

    #[test]
    fn counts_by_status_group() {
        let now = Utc::now();
        let jobs = vec![
            job(JobStatus::Quoted, dec!(100), now),
            job(JobStatus::Quoted, dec!(200), now),
            job(JobStatus::Scheduled, dec!(300), now),
            job(JobStatus::InProgress, dec!(400), now),
            job(JobStatus::Complete, dec!(500), now),
        ];

        let stats = compute_stats(&jobs, now);
        assert_eq!(stats.total_jobs, 5);
        assert_eq!(stats.active_jobs, 2);
        assert_eq!(stats.pending_quotes, 2);
        assert_eq!(stats.week_revenue, dec!(500.00));
    }

    #[test]
    fn week_revenue_ignores_old_completions() {
        let now = Utc::now();
        let jobs = vec![
            job(JobStatus::Complete, dec!(500), now - Duration::days(2)),
            job(JobStatus::Complete, dec!(900), now - Duration::days(10)),
        ];

        let stats = compute_stats(&jobs, now);
        assert_eq!(stats.week_revenue, dec!(500.00));
    }

    #[test]
    fn week_revenue_ignores_incomplete_jobs() {
        let now = Utc::now();
        let jobs = vec![
            job(JobStatus::InProgress, dec!(500), now),
            job(JobStatus::Quoted, dec!(300), now),
        ];

        let stats = compute_stats(&jobs, now);
        assert_eq!(stats.week_revenue, dec!(0.00));
        assert_eq!(stats.active_jobs, 1);
    }

    #[test]
    fn empty_snapshot_is_all_zero() {
        let stats = compute_stats(&[], Utc::now());
        assert_eq!(stats.total_jobs, 0);
        assert_eq!(stats.active_jobs, 0);
        assert_eq!(stats.pending_quotes, 0);
        assert_eq!(stats.week_revenue, dec!(0));
    }
}
