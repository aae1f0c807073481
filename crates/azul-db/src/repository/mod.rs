//! # Repository Module
//!
//! Database repository implementations for Azul Quotes.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  Host application                                                      │
//! │       │                                                                 │
//! │       │  db.quotes().save(draft)                                        │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  QuoteRepository                                                       │
//! │  ├── save(&self, draft)          ← create or update                    │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── list_by_owner(&self, owner)                                       │
//! │  └── delete(&self, id)                                                 │
//! │       │                                                                 │
//! │       │  SQL Query (create path shares a transaction with the          │
//! │       ▼   sequence allocator)                                           │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`QuoteRepository`](quote::QuoteRepository) - Quote save orchestration and reads
//! - [`ProductRepository`](product::ProductRepository) - Catalog template CRUD
//! - [`SequenceAllocator`](sequence::SequenceAllocator) - Per-owner quote numbering

pub mod product;
pub mod quote;
pub mod sequence;
