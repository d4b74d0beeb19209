pub mod customers;
pub mod estimates;
pub mod invoices;
pub mod jobs;
pub mod stats;

use crate::config::AppConfig;
use crate::db::DbPool;
use crate::events::EventSender;
use crate::services::{
    jobs::QuoteDefaults, CustomerService, Estimator, InvoiceService, JobService, MockEstimator,
    StatsService,
};
use std::sync::Arc;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub customers: Arc<CustomerService>,
    pub jobs: Arc<JobService>,
    pub invoices: Arc<InvoiceService>,
    pub estimator: Arc<dyn Estimator>,
    pub stats: Arc<StatsService>,
}

impl AppServices {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>, config: &AppConfig) -> Self {
        let defaults = QuoteDefaults::from(config);

        Self {
            customers: Arc::new(CustomerService::new(db_pool.clone(), event_sender.clone())),
            jobs: Arc::new(JobService::new(
                db_pool.clone(),
                event_sender.clone(),
                defaults,
            )),
            invoices: Arc::new(InvoiceService::new(db_pool.clone(), event_sender)),
            estimator: Arc::new(MockEstimator),
            stats: Arc::new(StatsService::new(db_pool)),
        }
    }
}
