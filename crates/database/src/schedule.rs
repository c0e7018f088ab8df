//! Schedule entry persistence.

use sqlx::SqlitePool;

use crate::models::ScheduleEntry;
use crate::Result;

/// Insert a schedule entry unless one already exists for the run and day.
///
/// Returns `true` when a row was created, `false` when it already existed.
pub async fn insert_if_absent(
    pool: &SqlitePool,
    run_id: &str,
    scheduled_for: &str,
    data_fetch_date: &str,
) -> Result<bool> {
    let result = sqlx::query(
        r#"
        INSERT INTO schedule_entries (run_id, scheduled_for, data_fetch_date)
        VALUES (?, ?, ?)
        ON CONFLICT(run_id, scheduled_for) DO NOTHING
        "#,
    )
    .bind(run_id)
    .bind(scheduled_for)
    .bind(data_fetch_date)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// Get the entry for a run on a given day.
pub async fn get_entry(
    pool: &SqlitePool,
    run_id: &str,
    scheduled_for: &str,
) -> Result<Option<ScheduleEntry>> {
    let entry = sqlx::query_as::<_, ScheduleEntry>(
        r#"
        SELECT id, run_id, scheduled_for, data_fetch_date, created_at
        FROM schedule_entries
        WHERE run_id = ? AND scheduled_for = ?
        "#,
    )
    .bind(run_id)
    .bind(scheduled_for)
    .fetch_optional(pool)
    .await?;

    Ok(entry)
}

/// List all entries for a run, most recent day first.
pub async fn list_for_run(pool: &SqlitePool, run_id: &str) -> Result<Vec<ScheduleEntry>> {
    let entries = sqlx::query_as::<_, ScheduleEntry>(
        r#"
        SELECT id, run_id, scheduled_for, data_fetch_date, created_at
        FROM schedule_entries
        WHERE run_id = ?
        ORDER BY scheduled_for DESC
        "#,
    )
    .bind(run_id)
    .fetch_all(pool)
    .await?;

    Ok(entries)
}
