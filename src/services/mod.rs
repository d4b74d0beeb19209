pub mod customers;
pub mod estimator;
pub mod invoices;
pub mod jobs;
pub mod stats;

pub use customers::CustomerService;
pub use estimator::{Estimator, MockEstimator};
pub use invoices::InvoiceService;
pub use jobs::JobService;
pub use stats::StatsService;
