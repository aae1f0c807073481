//! # Validation Module
//!
//! Input validation for quote saves and catalog edits.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Editor UI                                                    │
//! │  ├── Basic format checks (empty name)                                  │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (save path)                                      │
//! │  └── Business rule validation before any write                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── UNIQUE (owner_id, quote_number)                                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Note the asymmetry with numeric values: those are never *validated*, they
//! are *coerced* (fail-soft). Only identity-ish fields reject bad input.

use crate::error::ValidationError;
use crate::MAX_CLIENT_NAME_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates the client name on a quote.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 200 characters
///
/// ## Example
/// ```rust
/// use azul_core::validation::validate_client_name;
///
/// assert!(validate_client_name("María Pérez").is_ok());
/// assert!(validate_client_name("   ").is_err());
/// ```
pub fn validate_client_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "clientName".to_string(),
        });
    }

    if name.len() > MAX_CLIENT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "clientName".to_string(),
            max: MAX_CLIENT_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates an owner (account) id.
///
/// Numbering and listing are scoped by owner, so an empty owner would
/// silently merge accounts.
pub fn validate_owner_id(owner_id: &str) -> ValidationResult<()> {
    if owner_id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "ownerId".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Coercion
// =============================================================================

/// Coerces an already-decoded numeric value to the fail-soft domain: any
/// non-finite number becomes 0. Negative values pass through unclamped.
///
/// String-typed input is handled earlier, at the schema boundary
/// (see [`crate::types`]).
#[inline]
pub fn coerce_value(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Validates a quote number.
///
/// Numbers are allocator-assigned and start at 1; anything else reaching a
/// write is a bug upstream.
pub fn validate_quote_number(number: i64) -> ValidationResult<()> {
    if number <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quoteNumber".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_client_name() {
        assert!(validate_client_name("María Pérez").is_ok());
        assert!(validate_client_name("X").is_ok());

        assert!(validate_client_name("").is_err());
        assert!(validate_client_name("   ").is_err());
        assert!(validate_client_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_owner_id() {
        assert!(validate_owner_id("user-1").is_ok());
        assert!(validate_owner_id("").is_err());
        assert!(validate_owner_id("  ").is_err());
    }

    #[test]
    fn test_coerce_value() {
        assert_eq!(coerce_value(10.5), 10.5);
        assert_eq!(coerce_value(-3.0), -3.0);
        assert_eq!(coerce_value(f64::NAN), 0.0);
        assert_eq!(coerce_value(f64::INFINITY), 0.0);
    }

    #[test]
    fn test_validate_quote_number() {
        assert!(validate_quote_number(1).is_ok());
        assert!(validate_quote_number(99999).is_ok());
        assert!(validate_quote_number(0).is_err());
        assert!(validate_quote_number(-1).is_err());
    }
}
