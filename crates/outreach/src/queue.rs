//! Delivery queue trait and implementations.

use async_trait::async_trait;
use database::{outbox, Database, NewOutboxItem, Stage};

use crate::error::OutreachError;

/// One reminder handed to delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryItem {
    pub lead_id: String,
    pub campaign_id: String,
    pub run_id: String,
    /// Outbound message the reminder follows up on.
    pub message_id: String,
    /// Stage the reminder is sent from.
    pub stage: Stage,
    pub recipient_email: String,
    pub sender_email: String,
    pub subject: String,
    pub body: String,
}

/// Acknowledgment of a successful enqueue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub queue_id: String,
}

/// Trait for handing reminders to a delivery pipeline.
///
/// Only a synchronous acknowledgment is required; delivery itself happens
/// later, outside the sweep.
#[async_trait]
pub trait DeliveryQueue: Send + Sync {
    /// Enqueue one reminder.
    async fn enqueue(&self, item: &DeliveryItem) -> Result<DeliveryReceipt, OutreachError>;
}

/// Appends reminders to the database outbox.
#[derive(Debug, Clone)]
pub struct OutboxQueue {
    db: Database,
}

impl OutboxQueue {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DeliveryQueue for OutboxQueue {
    async fn enqueue(&self, item: &DeliveryItem) -> Result<DeliveryReceipt, OutreachError> {
        let row = NewOutboxItem {
            lead_id: item.lead_id.clone(),
            campaign_id: item.campaign_id.clone(),
            run_id: item.run_id.clone(),
            message_id: item.message_id.clone(),
            stage: item.stage,
            recipient_email: item.recipient_email.clone(),
            sender_email: item.sender_email.clone(),
            subject: item.subject.clone(),
            body: item.body.clone(),
        };

        let id = outbox::enqueue(self.db.pool(), &row)
            .await
            .map_err(|e| OutreachError::EnqueueFailed(e.to_string()))?;

        Ok(DeliveryReceipt {
            queue_id: format!("outbox-{}", id),
        })
    }
}

/// A queue that discards all items.
#[derive(Debug, Clone, Default)]
pub struct NoOpQueue;

#[async_trait]
impl DeliveryQueue for NoOpQueue {
    async fn enqueue(&self, _item: &DeliveryItem) -> Result<DeliveryReceipt, OutreachError> {
        Ok(DeliveryReceipt {
            queue_id: "noop".to_string(),
        })
    }
}

/// A queue that logs items instead of delivering them.
#[derive(Debug, Clone, Default)]
pub struct LoggingQueue;

#[async_trait]
impl DeliveryQueue for LoggingQueue {
    async fn enqueue(&self, item: &DeliveryItem) -> Result<DeliveryReceipt, OutreachError> {
        tracing::info!(
            "[{}] Reminder for {} <{}> from {}: {}",
            item.stage,
            item.lead_id,
            item.recipient_email,
            item.sender_email,
            item.subject
        );
        Ok(DeliveryReceipt {
            queue_id: format!("log-{}-{}", item.message_id, item.stage),
        })
    }
}
