//! # Product Repository
//!
//! Database operations for catalog templates (services and packages).
//!
//! ## Template Role
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Catalog Templates                                  │
//! │                                                                         │
//! │  products table                      quote editor                       │
//! │  ┌───────────────────────┐                                              │
//! │  │ "Limpieza"  simple 75 │──copy──►  Item::simple_from_template(..)    │
//! │  │ "Puesta a punto"      │──copy──►  Item::bundle_from_template(..)    │
//! │  │   bundle [Filtro,..]  │                                              │
//! │  └───────────────────────┘                                              │
//! │                                                                         │
//! │  The quote keeps its own copy of every field. Editing or deleting a    │
//! │  template never rewrites an existing quote.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use azul_core::{Product, ProductKind, SubItem};

/// Fields accepted when creating or updating a catalog template.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ProductKind,
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub sub_items: Vec<SubItem>,
}

/// Repository for catalog template operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Gets a template by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let row = sqlx::query("SELECT * FROM products WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| product_from_row(&r)).transpose()
    }

    /// Lists an owner's templates, alphabetically (the catalog view order).
    pub async fn list_by_owner(&self, owner_id: &str) -> DbResult<Vec<Product>> {
        let rows = sqlx::query("SELECT * FROM products WHERE owner_id = ?1 ORDER BY name")
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(product_from_row).collect()
    }

    /// Inserts a new template.
    pub async fn insert(&self, owner_id: &str, input: ProductInput) -> DbResult<Product> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        let sub_items_json = serde_json::to_string(&input.sub_items)?;

        debug!(owner_id = %owner_id, name = %input.name, "Inserting product template");

        sqlx::query(
            r#"
            INSERT INTO products (
                id, owner_id, name, kind, value, description, sub_items,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&id)
        .bind(owner_id)
        .bind(&input.name)
        .bind(input.kind.as_str())
        .bind(input.value)
        .bind(input.description.as_deref())
        .bind(&sub_items_json)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        info!(product_id = %id, "Product template created");

        Ok(Product {
            id,
            owner_id: owner_id.to_string(),
            name: input.name,
            kind: input.kind,
            value: input.value,
            description: input.description,
            sub_items: input.sub_items,
            created_at: now,
            updated_at: now,
        })
    }

    /// Updates an existing template.
    pub async fn update(&self, id: &str, input: ProductInput) -> DbResult<Product> {
        let now = Utc::now();
        let sub_items_json = serde_json::to_string(&input.sub_items)?;

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                kind = ?3,
                value = ?4,
                description = ?5,
                sub_items = ?6,
                updated_at = ?7
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(input.kind.as_str())
        .bind(input.value)
        .bind(input.description.as_deref())
        .bind(&sub_items_json)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Deletes a template. Quotes built from it are untouched (they hold
    /// copies, not references).
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        info!(product_id = %id, "Product template deleted");

        Ok(())
    }
}

/// Maps a database row to a Product, decoding the embedded sub-items.
fn product_from_row(row: &SqliteRow) -> DbResult<Product> {
    let sub_items_json: String = row.try_get("sub_items")?;
    let sub_items: Vec<SubItem> = serde_json::from_str(&sub_items_json)?;

    let kind_code: String = row.try_get("kind")?;
    let kind = ProductKind::parse(&kind_code)
        .ok_or_else(|| DbError::Serialization(format!("unknown product kind '{kind_code}'")))?;

    Ok(Product {
        id: row.try_get("id")?,
        owner_id: row.try_get("owner_id")?,
        name: row.try_get("name")?,
        kind,
        value: row.try_get("value")?,
        description: row.try_get("description")?,
        sub_items,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
