//! Company CRUD operations.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::Company;

/// Create a new company.
pub async fn create_company(pool: &SqlitePool, company: &Company) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO companies (id, name, industry, size_bucket)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&company.id)
    .bind(&company.name)
    .bind(&company.industry)
    .bind(&company.size_bucket)
    .execute(pool)
    .await
    .map_err(|e| DatabaseError::from_insert(e, "Company", &company.id))?;

    Ok(())
}

/// Get a company by ID.
pub async fn get_company(pool: &SqlitePool, id: &str) -> Result<Company> {
    sqlx::query_as::<_, Company>(
        r#"
        SELECT id, name, industry, size_bucket
        FROM companies
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Company",
        id: id.to_string(),
    })
}
