//! Campaign run lifecycle operations.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{CampaignRun, RunStatus};

/// Create a run in `pending` status.
pub async fn create_run(pool: &SqlitePool, id: &str, campaign_id: &str) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO campaign_runs (id, campaign_id, status)
        VALUES (?, ?, 'pending')
        "#,
    )
    .bind(id)
    .bind(campaign_id)
    .execute(pool)
    .await
    .map_err(|e| DatabaseError::from_insert(e, "CampaignRun", id))?;

    Ok(())
}

/// Get a run by ID.
pub async fn get_run(pool: &SqlitePool, id: &str) -> Result<CampaignRun> {
    sqlx::query_as::<_, CampaignRun>(
        r#"
        SELECT id, campaign_id, status, started_at
        FROM campaign_runs
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "CampaignRun",
        id: id.to_string(),
    })
}

/// Move a run to `running`, stamping its start time.
pub async fn mark_running(pool: &SqlitePool, id: &str, started_at: &str) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE campaign_runs
        SET status = 'running', started_at = ?
        WHERE id = ?
        "#,
    )
    .bind(started_at)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "CampaignRun",
            id: id.to_string(),
        });
    }

    Ok(())
}

/// Set a run's status without touching its start time.
pub async fn set_status(pool: &SqlitePool, id: &str, status: RunStatus) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE campaign_runs
        SET status = ?
        WHERE id = ?
        "#,
    )
    .bind(status)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "CampaignRun",
            id: id.to_string(),
        });
    }

    Ok(())
}

/// List one page of runs with the given status, ordered by ID.
pub async fn list_by_status(
    pool: &SqlitePool,
    status: RunStatus,
    limit: i64,
    offset: i64,
) -> Result<Vec<CampaignRun>> {
    let runs = sqlx::query_as::<_, CampaignRun>(
        r#"
        SELECT id, campaign_id, status, started_at
        FROM campaign_runs
        WHERE status = ?
        ORDER BY id
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(status)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(runs)
}
