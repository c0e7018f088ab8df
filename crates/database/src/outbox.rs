//! Delivery outbox persistence.

use sqlx::SqlitePool;

use crate::models::{NewOutboxItem, OutboxItem};
use crate::Result;

/// Append an item to the outbox. Returns the new row ID.
pub async fn enqueue(pool: &SqlitePool, item: &NewOutboxItem) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO outbox (lead_id, campaign_id, run_id, message_id, stage,
                            recipient_email, sender_email, subject, body)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&item.lead_id)
    .bind(&item.campaign_id)
    .bind(&item.run_id)
    .bind(&item.message_id)
    .bind(item.stage)
    .bind(&item.recipient_email)
    .bind(&item.sender_email)
    .bind(&item.subject)
    .bind(&item.body)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// List outbox items for an outbound message, oldest first.
pub async fn list_for_message(pool: &SqlitePool, message_id: &str) -> Result<Vec<OutboxItem>> {
    let rows = sqlx::query_as::<_, OutboxItem>(
        r#"
        SELECT id, lead_id, campaign_id, run_id, message_id, stage,
               recipient_email, sender_email, subject, body, created_at
        FROM outbox
        WHERE message_id = ?
        ORDER BY id
        "#,
    )
    .bind(message_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// List all outbox items for a campaign, oldest first.
pub async fn list_for_campaign(pool: &SqlitePool, campaign_id: &str) -> Result<Vec<OutboxItem>> {
    let rows = sqlx::query_as::<_, OutboxItem>(
        r#"
        SELECT id, lead_id, campaign_id, run_id, message_id, stage,
               recipient_email, sender_email, subject, body, created_at
        FROM outbox
        WHERE campaign_id = ?
        ORDER BY id
        "#,
    )
    .bind(campaign_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Count all outbox items.
pub async fn count(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM outbox
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(count)
}
