//! Product and benefit operations.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{Product, ProductBenefit};

/// Create a new product.
pub async fn create_product(pool: &SqlitePool, product: &Product) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO products (id, name, description)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(&product.id)
    .bind(&product.name)
    .bind(&product.description)
    .execute(pool)
    .await
    .map_err(|e| DatabaseError::from_insert(e, "Product", &product.id))?;

    Ok(())
}

/// Get a product by ID.
pub async fn get_product(pool: &SqlitePool, id: &str) -> Result<Product> {
    sqlx::query_as::<_, Product>(
        r#"
        SELECT id, name, description
        FROM products
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Product",
        id: id.to_string(),
    })
}

/// Attach a benefit to a product. Returns the new row ID.
pub async fn add_benefit(
    pool: &SqlitePool,
    product_id: &str,
    benefit: &str,
    icp_industry: Option<&str>,
    icp_company_size: Option<&str>,
) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO product_benefits (product_id, benefit, icp_industry, icp_company_size, position)
        VALUES (
            ?, ?, ?, ?,
            (SELECT COALESCE(MAX(position) + 1, 0) FROM product_benefits WHERE product_id = ?)
        )
        "#,
    )
    .bind(product_id)
    .bind(benefit)
    .bind(icp_industry)
    .bind(icp_company_size)
    .bind(product_id)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// List a product's benefits in insertion order.
pub async fn list_benefits(pool: &SqlitePool, product_id: &str) -> Result<Vec<ProductBenefit>> {
    let rows = sqlx::query_as::<_, ProductBenefit>(
        r#"
        SELECT id, product_id, benefit, icp_industry, icp_company_size, position
        FROM product_benefits
        WHERE product_id = ?
        ORDER BY position, id
        "#,
    )
    .bind(product_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
