//! Campaign CRUD operations.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::Campaign;

/// Create a new campaign.
pub async fn create_campaign(pool: &SqlitePool, campaign: &Campaign) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO campaigns (id, account_id, product_id, name, reminder_count, cadence_days, channel, is_active)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&campaign.id)
    .bind(&campaign.account_id)
    .bind(&campaign.product_id)
    .bind(&campaign.name)
    .bind(campaign.reminder_count)
    .bind(campaign.cadence_days)
    .bind(campaign.channel)
    .bind(campaign.is_active)
    .execute(pool)
    .await
    .map_err(|e| DatabaseError::from_insert(e, "Campaign", &campaign.id))?;

    Ok(())
}

/// Get a campaign by ID.
pub async fn get_campaign(pool: &SqlitePool, id: &str) -> Result<Campaign> {
    sqlx::query_as::<_, Campaign>(
        r#"
        SELECT id, account_id, product_id, name, reminder_count, cadence_days, channel, is_active
        FROM campaigns
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Campaign",
        id: id.to_string(),
    })
}

/// Activate or deactivate a campaign. Deactivation ends every lead's sequence.
pub async fn set_active(pool: &SqlitePool, id: &str, active: bool) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE campaigns
        SET is_active = ?
        WHERE id = ?
        "#,
    )
    .bind(active)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Campaign",
            id: id.to_string(),
        });
    }

    Ok(())
}

/// List one page of campaigns eligible for a reminder sweep.
///
/// Eligible means active, on the email channel, and with at least one run in
/// `running` status. Ordered by ID for stable offset paging.
pub async fn list_sweepable(pool: &SqlitePool, limit: i64, offset: i64) -> Result<Vec<Campaign>> {
    let campaigns = sqlx::query_as::<_, Campaign>(
        r#"
        SELECT c.id, c.account_id, c.product_id, c.name, c.reminder_count,
               c.cadence_days, c.channel, c.is_active
        FROM campaigns c
        WHERE c.is_active = 1
          AND c.channel = 'email'
          AND EXISTS (
              SELECT 1 FROM campaign_runs r
              WHERE r.campaign_id = c.id AND r.status = 'running'
          )
        ORDER BY c.id
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(campaigns)
}
