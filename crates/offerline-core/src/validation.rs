//! # Validation Module
//!
//! Input validation utilities for offer lines.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Caller (form, import job, API handler)                       │
//! │  └── THIS MODULE: opt-in business rule checks                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Construction (OfferItem::with_discount)                      │
//! │  └── Only what valuation cannot survive: bad divisors, overflow        │
//! │                                                                         │
//! │  Construction deliberately accepts e.g. negative quantities.           │
//! │  Callers that want them rejected run these validators first, as the    │
//! │  reconcile crate does for every recorded line it restores.             │
//! │                                                                         │
//! │  The divisor rule lives once, in is_valid_divisor, and backs both      │
//! │  layers.                                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use offerline_core::validation::{validate_product_name, validate_quantity};
//!
//! validate_product_name("Widget").unwrap();
//! validate_quantity(5).unwrap();
//! assert!(validate_quantity(-1).is_err());
//! ```

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::MAX_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a product identifier string (UUID).
///
/// ## Example
/// ```rust
/// use offerline_core::validation::validate_product_id;
///
/// assert!(validate_product_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_product_id("not-a-uuid").is_err());
/// ```
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "product_id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id.trim()).map_err(|_| ValidationError::InvalidFormat {
        field: "product_id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line quantity.
///
/// ## Rules
/// - Must not be negative (zero is a valid, empty line)
/// - Must not exceed MAX_ITEM_QUANTITY
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if !(0..=MAX_ITEM_QUANTITY).contains(&qty) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// The one divisor rule: strictly positive.
///
/// Shared by [`validate_divisor`], `Discount::divisor` and `Money::divide_by`.
#[inline]
pub(crate) fn is_valid_divisor(divisor: Decimal) -> bool {
    !divisor.is_zero() && divisor.is_sign_positive()
}

/// Validates a discount divisor.
///
/// ## Rules
/// - Must be strictly positive
pub fn validate_divisor(divisor: Decimal) -> ValidationResult<()> {
    if !is_valid_divisor(divisor) {
        return Err(ValidationError::MustBePositive {
            field: "divisor".to_string(),
        });
    }

    Ok(())
}

/// Validates a `same_as` tolerance percentage.
///
/// ## Rules
/// - Must be a finite number
/// - Must be between 0 and 100 (inclusive)
pub fn validate_tolerance_pct(pct: f64) -> ValidationResult<()> {
    if !pct.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "tolerance".to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    if !(0.0..=100.0).contains(&pct) {
        return Err(ValidationError::OutOfRange {
            field: "tolerance".to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
