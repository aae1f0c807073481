//! # Quote Repository
//!
//! Quote persistence and the save orchestration.
//!
//! ## Save Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Quote Save Lifecycle                              │
//! │                                                                         │
//! │  1. VALIDATE                                                           │
//! │     └── client name present → otherwise ValidationError, no write      │
//! │                                                                         │
//! │  2. RECOMPUTE                                                          │
//! │     └── total = Σ item subtotals (drafts carry no total of their own)  │
//! │                                                                         │
//! │  3a. CREATE (draft has no id)                                          │
//! │      └── BEGIN ── allocate number ── INSERT quote ── COMMIT            │
//! │      └── write conflict? retry the whole cycle (bounded)               │
//! │                                                                         │
//! │  3b. UPDATE (draft has an id)                                          │
//! │      └── plain UPDATE by id; quote_number and created_at untouched     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only the create path needs the transactional dance: the quote number is
//! the one field with a cross-session uniqueness invariant. Concurrent edits
//! of the *same* existing quote are not detected (single writer per quote is
//! assumed within an editing session).

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::repository::sequence::{SequenceAllocator, MAX_ALLOCATION_ATTEMPTS};
use azul_core::{pricing, validation, Currency, Item, Quote, QuoteDraft};

/// Pause between numbering attempts, enough to let the competing
/// transaction commit.
const RETRY_BACKOFF: Duration = Duration::from_millis(25);

/// Repository for quote database operations.
#[derive(Debug, Clone)]
pub struct QuoteRepository {
    pool: SqlitePool,
}

impl QuoteRepository {
    /// Creates a new QuoteRepository.
    pub fn new(pool: SqlitePool) -> Self {
        QuoteRepository { pool }
    }

    /// Saves a draft: creates it (allocating a quote number) when it has no
    /// id, updates the existing record otherwise.
    ///
    /// The draft's `total` does not exist to be trusted - it is recomputed
    /// here from the items, so display flags or a stale editor can never
    /// change what is billed.
    ///
    /// ## Errors
    /// - `DbError::Validation` - empty client name / owner; nothing written
    /// - `DbError::AllocationFailed` - numbering retries exhausted; quote
    ///   not created
    /// - `DbError::NotFound` - update of an id that no longer exists
    pub async fn save(&self, draft: QuoteDraft) -> DbResult<Quote> {
        validation::validate_owner_id(&draft.owner_id)?;
        validation::validate_client_name(&draft.client_name)?;

        let total = pricing::quote_total(&draft.items);

        match draft.id.clone() {
            None => self.create(draft, total).await,
            Some(id) => self.update(&id, draft, total).await,
        }
    }

    /// Create path: number allocation and quote insert in one transaction.
    async fn create(&self, draft: QuoteDraft, total: f64) -> DbResult<Quote> {
        let items_json = serde_json::to_string(&draft.items)?;

        for attempt in 1..=MAX_ALLOCATION_ATTEMPTS {
            match self.try_create(&draft, &items_json, total).await {
                Ok(quote) => {
                    info!(
                        quote_id = %quote.id,
                        owner_id = %quote.owner_id,
                        quote_number = quote.quote_number,
                        total = quote.total,
                        "Quote created"
                    );
                    return Ok(quote);
                }
                Err(err) if err.is_write_conflict() => {
                    debug!(
                        owner_id = %draft.owner_id,
                        attempt,
                        error = %err,
                        "Write conflict during quote numbering, retrying"
                    );
                    tokio::time::sleep(RETRY_BACKOFF).await;
                }
                Err(err) => return Err(err),
            }
        }

        warn!(
            owner_id = %draft.owner_id,
            attempts = MAX_ALLOCATION_ATTEMPTS,
            "Quote number allocation exhausted its retry budget"
        );

        Err(DbError::AllocationFailed {
            owner_id: draft.owner_id,
            attempts: MAX_ALLOCATION_ATTEMPTS,
        })
    }

    /// One numbering attempt. Everything inside a single transaction so a
    /// conflict rolls back both the counter bump and the insert.
    async fn try_create(
        &self,
        draft: &QuoteDraft,
        items_json: &str,
        total: f64,
    ) -> DbResult<Quote> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let mut tx = self.pool.begin().await?;

        let quote_number = SequenceAllocator::next_in(&mut tx, &draft.owner_id).await?;

        sqlx::query(
            r#"
            INSERT INTO quotes (
                id, owner_id, quote_number,
                client_name, client_address, client_contact,
                items, currency, total,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(&id)
        .bind(&draft.owner_id)
        .bind(quote_number)
        .bind(&draft.client_name)
        .bind(draft.client_address.as_deref())
        .bind(draft.client_contact.as_deref())
        .bind(items_json)
        .bind(draft.currency.as_str())
        .bind(total)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Quote {
            id,
            owner_id: draft.owner_id.clone(),
            quote_number,
            client_name: draft.client_name.clone(),
            client_address: draft.client_address.clone(),
            client_contact: draft.client_contact.clone(),
            items: draft.items.clone(),
            currency: draft.currency,
            total,
            created_at: now,
            updated_at: now,
        })
    }

    /// Update path: overwrites the editable fields of an existing record.
    ///
    /// `quote_number` and `created_at` are deliberately absent from the SET
    /// list - they are assigned once at creation and never change.
    async fn update(&self, id: &str, draft: QuoteDraft, total: f64) -> DbResult<Quote> {
        let items_json = serde_json::to_string(&draft.items)?;
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE quotes SET
                client_name = ?2,
                client_address = ?3,
                client_contact = ?4,
                items = ?5,
                currency = ?6,
                total = ?7,
                updated_at = ?8
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&draft.client_name)
        .bind(draft.client_address.as_deref())
        .bind(draft.client_contact.as_deref())
        .bind(&items_json)
        .bind(draft.currency.as_str())
        .bind(total)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Quote", id));
        }

        info!(quote_id = %id, total, "Quote updated");

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Quote", id))
    }

    /// Gets a quote by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Quote>> {
        let row = sqlx::query("SELECT * FROM quotes WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| quote_from_row(&r)).transpose()
    }

    /// Lists an owner's quotes, newest number first (the dashboard order).
    pub async fn list_by_owner(&self, owner_id: &str) -> DbResult<Vec<Quote>> {
        let rows =
            sqlx::query("SELECT * FROM quotes WHERE owner_id = ?1 ORDER BY quote_number DESC")
                .bind(owner_id)
                .fetch_all(&self.pool)
                .await?;

        rows.iter().map(quote_from_row).collect()
    }

    /// Deletes a quote record outright.
    ///
    /// Removal is an explicit, operator-triggered action; there is no soft
    /// delete. The owner's counter is not decremented - numbers are never
    /// reused.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM quotes WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Quote", id));
        }

        info!(quote_id = %id, "Quote deleted");

        Ok(())
    }
}

/// Maps a database row to a Quote, decoding the embedded item tree.
fn quote_from_row(row: &SqliteRow) -> DbResult<Quote> {
    let items_json: String = row.try_get("items")?;
    let items: Vec<Item> = serde_json::from_str(&items_json)?;

    let currency_code: String = row.try_get("currency")?;
    let currency = Currency::parse(&currency_code)
        .ok_or_else(|| DbError::Serialization(format!("unknown currency '{currency_code}'")))?;

    Ok(Quote {
        id: row.try_get("id")?,
        owner_id: row.try_get("owner_id")?,
        quote_number: row.try_get("quote_number")?,
        client_name: row.try_get("client_name")?,
        client_address: row.try_get("client_address")?,
        client_contact: row.try_get("client_contact")?,
        items,
        currency,
        total: row.try_get("total")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
