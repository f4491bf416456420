//! # offerline-core: Pure Offer Line Logic
//!
//! This crate values a single line of a sales offer and compares lines with
//! each other. It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Offerline Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               offerline-reconcile                               │   │
//! │  │    config (TOML/env) ──► Reconciler ──► ReconciliationReport    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ offerline-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ offer_item │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │ OfferItem  │  │   rules   │  │   │
//! │  │   │ Discount  │  │ Currency  │  │ same_as    │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └────────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product, ProductType, Discount
//! - [`money`] - Money and Currency with exact decimal amounts
//! - [`offer_item`] - OfferItem valuation, equality and tolerance comparison
//! - [`error`] - Domain error types
//! - [`validation`] - Opt-in business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use offerline_core::{Currency, Discount, Money, OfferItem, Product, ProductId, ProductType};
//! use rust_decimal::Decimal;
//!
//! let widget = Arc::new(Product::new(
//!     ProductId::generate(),
//!     "Widget",
//!     ProductType::Standard,
//!     Money::new(Currency::USD, Decimal::new(1000, 2)), // 10.00 USD
//! ));
//!
//! let half_price = OfferItem::with_discount(widget, 3, Discount::Divisor(Decimal::TWO)).unwrap();
//! assert_eq!(half_price.total_cost().amount(), Decimal::new(1500, 2)); // 15.00
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod offer_item;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Currency, Money};
pub use offer_item::{IdentityKey, OfferItem};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity on a single offer line.
///
/// Enforced by [`validation::validate_quantity`] only, never by construction.
pub const MAX_ITEM_QUANTITY: i64 = 9_999;
