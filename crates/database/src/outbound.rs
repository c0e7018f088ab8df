//! Initial outbound message registry.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::OutboundMessage;
use crate::time::format_timestamp;

/// Normalize an RFC 3339 send time to the stored UTC layout.
fn normalize_sent_at(sent_at: &str) -> Result<String> {
    DateTime::parse_from_rfc3339(sent_at.trim())
        .map(|at| format_timestamp(at.with_timezone(&Utc)))
        .map_err(|e| DatabaseError::InvalidValue {
            field: "sent_at",
            reason: format!("{}: {}", sent_at, e),
        })
}

/// Record an initial outbound message and open its reminder sequence.
///
/// The message row and its `initial` reminder state are written in one
/// transaction. `sent_at` may carry any RFC 3339 offset and is stored as
/// UTC. Recording the same message ID twice is a no-op; returns `true` only
/// when the message was new.
pub async fn record_outbound_message(pool: &SqlitePool, message: &OutboundMessage) -> Result<bool> {
    let sent_at = normalize_sent_at(&message.sent_at)?;
    let mut tx = pool.begin().await?;

    let inserted = sqlx::query(
        r#"
        INSERT INTO outbound_messages (id, campaign_id, run_id, lead_id, subject, body, sent_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(id) DO NOTHING
        "#,
    )
    .bind(&message.id)
    .bind(&message.campaign_id)
    .bind(&message.run_id)
    .bind(&message.lead_id)
    .bind(&message.subject)
    .bind(&message.body)
    .bind(&sent_at)
    .execute(&mut *tx)
    .await?
    .rows_affected()
        == 1;

    if inserted {
        sqlx::query(
            r#"
            INSERT INTO reminder_states (message_id, campaign_id, lead_id, stage, last_sent_at)
            VALUES (?, ?, ?, 0, ?)
            ON CONFLICT(message_id) DO NOTHING
            "#,
        )
        .bind(&message.id)
        .bind(&message.campaign_id)
        .bind(&message.lead_id)
        .bind(&sent_at)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    if inserted {
        tracing::debug!(message_id = %message.id, lead_id = %message.lead_id, "Recorded outbound message");
    }

    Ok(inserted)
}

/// Get an outbound message by ID.
pub async fn get_outbound_message(pool: &SqlitePool, id: &str) -> Result<OutboundMessage> {
    sqlx::query_as::<_, OutboundMessage>(
        r#"
        SELECT id, campaign_id, run_id, lead_id, subject, body, sent_at
        FROM outbound_messages
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "OutboundMessage",
        id: id.to_string(),
    })
}
