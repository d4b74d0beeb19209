use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{error, info};
use uuid::Uuid;

use crate::entities::job::JobStatus;

/// Domain events emitted by the service layer after successful writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    CustomerCreated(Uuid),
    CustomerDeleted(Uuid),
    JobCreated(Uuid),
    JobUpdated(Uuid),
    JobStatusChanged {
        job_id: Uuid,
        old_status: JobStatus,
        new_status: JobStatus,
    },
    JobDeleted(Uuid),
    InvoiceCreated(Uuid),
    InvoicePaid(Uuid),
}

/// Sender handle shared by all services. Sends never block the request
/// path; a full channel drops the event with a log line instead.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(tx: mpsc::Sender<Event>) -> Self {
        Self { tx }
    }

    pub async fn send(&self, event: Event) {
        if let Err(e) = self.tx.try_send(event) {
            error!("Failed to enqueue event: {}", e);
        }
    }
}

/// Creates the event channel with the given capacity.
pub fn event_channel(capacity: usize) -> (EventSender, mpsc::Receiver<Event>) {
    let (tx, rx) = mpsc::channel(capacity);
    (EventSender::new(tx), rx)
}

/// Consumes events until every sender is dropped. Runs as a background
/// task spawned at startup.
pub async fn process_events(mut rx: mpsc::Receiver<Event>) {
    while let Some(event) = rx.recv().await {
        match &event {
            Event::JobStatusChanged {
                job_id,
                old_status,
                new_status,
            } => {
                info!(
                    %job_id,
                    old_status = %old_status,
                    new_status = %new_status,
                    "Job status changed"
                );
            }
            other => info!(event = ?other, "Processing event"),
        }
    }
    info!("Event channel closed, stopping event processor");
}
