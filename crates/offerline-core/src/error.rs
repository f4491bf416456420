//! # Error Types
//!
//! Domain-specific error types for offerline-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  offerline-core errors (this file)                                     │
//! │  ├── CoreError        - Valuation and parsing failures                 │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  offerline-reconcile errors (separate crate)                           │
//! │  └── ReconcileError   - Config, serialization, wrapped CoreError       │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ReconcileError → caller           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (divisor, operation, field)
//! 3. Errors are enum variants, never String
//! 4. Valuation never panics: every failure is one of these variants

use rust_decimal::Decimal;
use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// All of these are raised synchronously by the constructor or parser that
/// hit them. None are transient.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The discount divisor cannot be applied.
    ///
    /// ## When This Occurs
    /// - Divisor is zero
    /// - Divisor is negative
    ///
    /// Raised at construction time. The cost is never silently truncated.
    #[error("Invalid discount divisor: {divisor}")]
    InvalidDivisor { divisor: Decimal },

    /// A decimal operation left the representable range (about ±7.9e28).
    #[error("Arithmetic overflow while computing {operation}")]
    ArithmeticOverflow { operation: &'static str },

    /// Currency code is not one we price in.
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet requirements.
/// Used for early validation before an offer line is built.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid UUID, NaN tolerance).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
