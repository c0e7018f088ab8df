//! Lead CRUD operations.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::Lead;

/// Create a new lead.
pub async fn create_lead(pool: &SqlitePool, lead: &Lead) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO leads (id, account_id, company_id, first_name, last_name, email, title, department)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&lead.id)
    .bind(&lead.account_id)
    .bind(&lead.company_id)
    .bind(&lead.first_name)
    .bind(&lead.last_name)
    .bind(&lead.email)
    .bind(&lead.title)
    .bind(&lead.department)
    .execute(pool)
    .await
    .map_err(|e| DatabaseError::from_insert(e, "Lead", &lead.id))?;

    Ok(())
}

/// Get a lead by ID.
pub async fn get_lead(pool: &SqlitePool, id: &str) -> Result<Lead> {
    sqlx::query_as::<_, Lead>(
        r#"
        SELECT id, account_id, company_id, first_name, last_name, email, title, department
        FROM leads
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Lead",
        id: id.to_string(),
    })
}
