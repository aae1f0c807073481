//! # Sequence Allocator
//!
//! Per-owner quote numbering: unique, gapless, starting at 1.
//!
//! ## Why This Exists
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Quote Numbering Under Concurrency                      │
//! │                                                                         │
//! │  Session A (laptop)                Session B (phone)                    │
//! │       │                                 │                               │
//! │       │  save new quote                 │  save new quote               │
//! │       ▼                                 ▼                               │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 quote_counters (one row per owner)              │   │
//! │  │                                                                 │   │
//! │  │  BEGIN ── bump counter ── insert quote ── COMMIT                │   │
//! │  │              │                                                  │   │
//! │  │              └── concurrent writer? → retry the whole cycle     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                 │                               │
//! │       ▼                                 ▼                               │
//! │  quote_number = 7                  quote_number = 8                     │
//! │                                                                         │
//! │  Never the same number, never a gap.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The counter bump is a single upsert, so within the transaction the
//! read-increment-write cannot interleave with another writer's. The retry
//! loop around the whole create transaction lives in the quote repository,
//! because SQLite surfaces write conflicts at the statement/commit boundary.

use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::debug;

use crate::error::DbResult;

/// Maximum attempts for the create-with-number transaction before the save
/// fails with `AllocationFailed`.
pub const MAX_ALLOCATION_ATTEMPTS: u32 = 8;

/// Issues unique, gapless-from-1 quote numbers per owner.
#[derive(Debug, Clone)]
pub struct SequenceAllocator {
    pool: SqlitePool,
}

impl SequenceAllocator {
    /// Creates a new SequenceAllocator.
    pub fn new(pool: SqlitePool) -> Self {
        SequenceAllocator { pool }
    }

    /// Bumps the owner's counter inside the caller's transaction and returns
    /// the freshly allocated number.
    ///
    /// A missing counter row reads as 0, so the first quote of an owner gets
    /// number 1. The caller MUST commit the quote insert in the same
    /// transaction - that is what makes the number gapless: either both the
    /// counter bump and the quote land, or neither does.
    pub async fn next_in(tx: &mut Transaction<'_, Sqlite>, owner_id: &str) -> DbResult<i64> {
        let number: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO quote_counters (owner_id, count)
            VALUES (?1, 1)
            ON CONFLICT(owner_id) DO UPDATE SET count = quote_counters.count + 1
            RETURNING count
            "#,
        )
        .bind(owner_id)
        .fetch_one(&mut **tx)
        .await?;

        debug!(owner_id = %owner_id, number, "Allocated quote number");

        Ok(number)
    }

    /// Reads the owner's current counter value without allocating.
    ///
    /// Returns `None` when the owner has never been numbered - distinct
    /// from `Some(0)`, which cannot occur after the first allocation.
    pub async fn current(&self, owner_id: &str) -> DbResult<Option<i64>> {
        let count: Option<i64> =
            sqlx::query_scalar("SELECT count FROM quote_counters WHERE owner_id = ?1")
                .bind(owner_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_absent_counter_reads_as_none() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let sequences = db.sequences();

        assert_eq!(sequences.current("nobody").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_numbers_are_consecutive_from_one() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        for expected in 1..=3 {
            let mut tx = db.pool().begin().await.unwrap();
            let number = SequenceAllocator::next_in(&mut tx, "owner-1").await.unwrap();
            tx.commit().await.unwrap();
            assert_eq!(number, expected);
        }

        assert_eq!(db.sequences().current("owner-1").await.unwrap(), Some(3));
        // A different owner starts from scratch.
        assert_eq!(db.sequences().current("owner-2").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_rolled_back_allocation_leaves_no_gap() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        {
            let mut tx = db.pool().begin().await.unwrap();
            let number = SequenceAllocator::next_in(&mut tx, "owner-1").await.unwrap();
            assert_eq!(number, 1);
            tx.rollback().await.unwrap();
        }

        // The abandoned transaction never advanced the committed counter.
        assert_eq!(db.sequences().current("owner-1").await.unwrap(), None);

        let mut tx = db.pool().begin().await.unwrap();
        let number = SequenceAllocator::next_in(&mut tx, "owner-1").await.unwrap();
        tx.commit().await.unwrap();
        assert_eq!(number, 1);
    }
}
