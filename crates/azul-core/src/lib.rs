//! # azul-core: Pure Business Logic for Azul Quotes
//!
//! This crate is the **heart** of the quoting engine. It contains all business
//! logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Azul Quotes Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Host Application (editor / preview)            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ azul-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  pricing  │  │    fx     │  │ validation│  │   │
//! │  │   │   Quote   │  │ subtotal  │  │  convert  │  │   rules   │  │   │
//! │  │   │   Item    │  │   total   │  │   quote   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    azul-db (Database Layer)                     │   │
//! │  │           SQLite queries, migrations, quote numbering           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Quote, Item, SubItem, Product, Currency)
//! - [`pricing`] - Subtotal/total aggregation
//! - [`fx`] - Bulk currency conversion over a quote
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Fail-Soft Values**: Malformed numeric input coerces to 0, it never errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use azul_core::types::{Item, SubItem};
//! use azul_core::pricing;
//!
//! let bundle = Item::bundle(
//!     "Hidráulica",
//!     vec![
//!         SubItem::new("Cañería", "Reemplazo completo", 30.0),
//!         SubItem::new("Bomba", "Instalación", 20.0),
//!     ],
//! );
//!
//! assert_eq!(pricing::item_subtotal(&bundle), 50.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod fx;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use azul_core::Quote` instead of
// `use azul_core::types::Quote`

pub use error::{CoreError, ValidationError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Labor-type label for work quoted with materials included.
///
/// ## Why a constant?
/// The labor type is a free-form label on the printed document, but the
/// editor only ever offers these two values. Keeping them here avoids
/// scattering the literal through the codebase.
pub const LABOR_WITH_MATERIALS: &str = "Mano de Obra: Con Material";

/// Labor-type label for work quoted without materials.
pub const LABOR_WITHOUT_MATERIALS: &str = "Mano de Obra: Sin Material";

/// Maximum accepted length for a client name.
pub const MAX_CLIENT_NAME_LEN: usize = 200;
