//! # Domain Types
//!
//! The collaborators an offer line is built from.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   ProductType   │   │    Discount     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  Standard       │   │  None           │       │
//! │  │  name           │   │  Drug           │   │  Divisor(dec)   │       │
//! │  │  product_type   │   │  Food           │   │                 │       │
//! │  │  price (Money)  │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Products are read-only here. The core never mutates them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::validation::is_valid_divisor;

// =============================================================================
// Product Id
// =============================================================================

/// Product identifier: a UUID kept in its canonical string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductId(String);

impl ProductId {
    /// Generates a fresh UUID v4 identifier.
    pub fn generate() -> Self {
        ProductId(uuid::Uuid::new_v4().to_string())
    }

    /// Parses and normalizes an identifier.
    ///
    /// ## Example
    /// ```rust
    /// use offerline_core::types::ProductId;
    ///
    /// let id = ProductId::parse("550E8400-E29B-41D4-A716-446655440000").unwrap();
    /// assert_eq!(id.as_str(), "550e8400-e29b-41d4-a716-446655440000");
    /// assert!(ProductId::parse("not-a-uuid").is_err());
    /// ```
    pub fn parse(id: &str) -> CoreResult<Self> {
        let parsed = uuid::Uuid::parse_str(id.trim()).map_err(|_| ValidationError::InvalidFormat {
            field: "product_id".to_string(),
            reason: "must be a valid UUID".to_string(),
        })?;
        Ok(ProductId(parsed.to_string()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Product Type
// =============================================================================

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    #[default]
    Standard,
    Drug,
    Food,
}

// =============================================================================
// Product
// =============================================================================

/// A product as the offer sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    id: ProductId,
    name: String,
    product_type: ProductType,
    /// Unit price.
    price: Money,
}

impl Product {
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        product_type: ProductType,
        price: Money,
    ) -> Self {
        Product {
            id,
            name: name.into(),
            product_type,
            price,
        }
    }

    #[inline]
    pub fn id(&self) -> &ProductId {
        &self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn product_type(&self) -> ProductType {
        self.product_type
    }

    #[inline]
    pub fn price(&self) -> &Money {
        &self.price
    }
}

// =============================================================================
// Discount
// =============================================================================

/// A divisor-style discount.
///
/// The raw line cost is *divided* by the divisor: `Divisor(2)` halves it.
///
/// ## None vs Divisor(1)
/// ```text
/// None          → no discount on this line; division is skipped entirely
/// Divisor(1)    → a discount exists but leaves the cost unchanged
///
/// Same cost, different lines: the two compare unequal.
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Discount {
    #[default]
    None,
    Divisor(#[ts(type = "string")] Decimal),
}

impl Discount {
    /// Creates a divisor discount, rejecting zero and negative divisors.
    ///
    /// ## Example
    /// ```rust
    /// use offerline_core::types::Discount;
    /// use rust_decimal::Decimal;
    ///
    /// assert!(Discount::divisor(Decimal::TWO).is_ok());
    /// assert!(Discount::divisor(Decimal::ZERO).is_err());
    /// ```
    pub fn divisor(value: Decimal) -> CoreResult<Self> {
        if !is_valid_divisor(value) {
            return Err(CoreError::InvalidDivisor { divisor: value });
        }
        Ok(Discount::Divisor(value))
    }

    /// Returns the divisor, if a discount is present.
    #[inline]
    pub fn divisor_value(&self) -> Option<Decimal> {
        match self {
            Discount::None => None,
            Discount::Divisor(value) => Some(*value),
        }
    }

    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Discount::None)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
