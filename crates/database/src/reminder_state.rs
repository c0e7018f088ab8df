//! Reminder state tracking.
//!
//! Stage changes go through [`advance_stage`], a single conditional update
//! guarded by the stage the caller expects the row to be at. That one
//! statement is the only write that moves a lead forward.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{EngagementFlag, ReminderState};
use crate::stage::Stage;

/// Selection of leads due for a reminder from one stage of one campaign.
#[derive(Debug, Clone)]
pub struct DueQuery<'a> {
    pub campaign_id: &'a str,
    pub stage: Stage,
    /// Leads whose last touch is at or before this instant are due.
    pub due_before: &'a str,
    /// Keyset cursor: only rows with `id > after_id` are returned.
    pub after_id: i64,
    pub limit: i64,
}

/// Outcome of a conditional stage advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// The row was at the expected stage and moved one step forward.
    Advanced(Stage),
    /// The row was no longer at the expected stage (or disappeared).
    Stale,
}

/// Get a reminder state by row ID.
pub async fn get_state(pool: &SqlitePool, id: i64) -> Result<ReminderState> {
    sqlx::query_as::<_, ReminderState>(
        r#"
        SELECT id, message_id, campaign_id, lead_id, stage, last_sent_at,
               opened, replied, meeting_booked
        FROM reminder_states
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "ReminderState",
        id: id.to_string(),
    })
}

/// Get the reminder state for an outbound message.
pub async fn get_by_message(pool: &SqlitePool, message_id: &str) -> Result<ReminderState> {
    sqlx::query_as::<_, ReminderState>(
        r#"
        SELECT id, message_id, campaign_id, lead_id, stage, last_sent_at,
               opened, replied, meeting_booked
        FROM reminder_states
        WHERE message_id = ?
        "#,
    )
    .bind(message_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "ReminderState",
        id: message_id.to_string(),
    })
}

/// Fetch one keyset page of leads due for a reminder.
///
/// Leads that replied or booked a meeting are never returned.
pub async fn list_due(pool: &SqlitePool, query: &DueQuery<'_>) -> Result<Vec<ReminderState>> {
    let rows = sqlx::query_as::<_, ReminderState>(
        r#"
        SELECT id, message_id, campaign_id, lead_id, stage, last_sent_at,
               opened, replied, meeting_booked
        FROM reminder_states
        WHERE campaign_id = ?
          AND stage = ?
          AND last_sent_at <= ?
          AND replied = 0
          AND meeting_booked = 0
          AND id > ?
        ORDER BY id
        LIMIT ?
        "#,
    )
    .bind(query.campaign_id)
    .bind(query.stage)
    .bind(query.due_before)
    .bind(query.after_id)
    .bind(query.limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Move a row from `expected` to the next stage and stamp its last touch.
///
/// Returns [`AdvanceOutcome::Stale`] when another writer already moved the
/// row. Fails with `InvalidValue` when `expected` is terminal.
pub async fn advance_stage(
    pool: &SqlitePool,
    id: i64,
    expected: Stage,
    sent_at: &str,
) -> Result<AdvanceOutcome> {
    let next = expected.next().ok_or_else(|| DatabaseError::InvalidValue {
        field: "stage",
        reason: format!("cannot advance past {}", expected),
    })?;

    let result = sqlx::query(
        r#"
        UPDATE reminder_states
        SET stage = ?, last_sent_at = ?, updated_at = datetime('now')
        WHERE id = ? AND stage = ?
        "#,
    )
    .bind(next)
    .bind(sent_at)
    .bind(id)
    .bind(expected)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(AdvanceOutcome::Stale);
    }

    Ok(AdvanceOutcome::Advanced(next))
}

/// Raise an engagement flag on a message's reminder state. Flags never clear.
pub async fn set_flag(pool: &SqlitePool, message_id: &str, flag: EngagementFlag) -> Result<()> {
    let sql = format!(
        "UPDATE reminder_states SET {} = 1, updated_at = datetime('now') WHERE message_id = ?",
        flag.column()
    );

    let result = sqlx::query(&sql).bind(message_id).execute(pool).await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "ReminderState",
            id: message_id.to_string(),
        });
    }

    Ok(())
}

/// Count a campaign's reminder states grouped by stage.
pub async fn count_by_stage(pool: &SqlitePool, campaign_id: &str) -> Result<Vec<(Stage, i64)>> {
    let rows = sqlx::query_as::<_, (Stage, i64)>(
        r#"
        SELECT stage, COUNT(*) as count
        FROM reminder_states
        WHERE campaign_id = ?
        GROUP BY stage
        ORDER BY stage
        "#,
    )
    .bind(campaign_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
