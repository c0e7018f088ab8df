//! Account CRUD operations.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::Account;

/// Create a new account.
pub async fn create_account(pool: &SqlitePool, account: &Account) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO accounts (id, name, sender_name, sender_email)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&account.id)
    .bind(&account.name)
    .bind(&account.sender_name)
    .bind(&account.sender_email)
    .execute(pool)
    .await
    .map_err(|e| DatabaseError::from_insert(e, "Account", &account.id))?;

    Ok(())
}

/// Get an account by ID.
pub async fn get_account(pool: &SqlitePool, id: &str) -> Result<Account> {
    sqlx::query_as::<_, Account>(
        r#"
        SELECT id, name, sender_name, sender_email
        FROM accounts
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Account",
        id: id.to_string(),
    })
}
