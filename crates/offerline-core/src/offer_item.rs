//! # Offer Item
//!
//! One line of a sales offer: a product, a quantity, an optional discount,
//! and the total cost derived from them.
//!
//! ## Valuation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  OfferItem::with_discount(product, quantity, discount)                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  raw = product.price × quantity          (exact, no rounding)           │
//! │       │                                                                 │
//! │       ├── Discount::None        → total = raw                           │
//! │       │                                                                 │
//! │       └── Discount::Divisor(d)  → total = round(raw ÷ d)                │
//! │                                    (currency minor units, half-even)    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  total_cost: Money { product.price.currency, total }                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Two Kinds of Equivalence
//! - `==` : every field matches exactly (discount and total included)
//! - `same_as` : identity matches exactly, total cost within a percentage
//!
//! Both read identity through [`IdentityKey`].

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tracing::{debug, trace};
use ts_rs::TS;

use crate::error::CoreResult;
use crate::money::Money;
use crate::types::{Discount, Product, ProductId, ProductType};

// =============================================================================
// Identity Key
// =============================================================================

/// The fields that say *which* line this is, independent of its price.
///
/// Product name, unit price, id and type, plus the quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdentityKey<'a> {
    pub product_name: &'a str,
    pub product_price: &'a Money,
    pub product_id: &'a ProductId,
    pub product_type: ProductType,
    pub quantity: i64,
}

// =============================================================================
// Offer Item
// =============================================================================

/// A single, immutable offer line.
///
/// Fields are private and there are no setters. A different quantity or
/// discount means building a new `OfferItem`.
///
/// ## Serialization
/// Deserializing keeps `total_cost` exactly as stored. That is how a recorded
/// offer is restored for comparison against a freshly computed one.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OfferItem {
    product: Arc<Product>,
    quantity: i64,
    #[serde(default)]
    discount: Discount,
    total_cost: Money,
}

impl OfferItem {
    /// Creates a line without a discount.
    ///
    /// ## Example
    /// ```rust
    /// use std::sync::Arc;
    /// use offerline_core::{Currency, Money, OfferItem, Product, ProductId, ProductType};
    /// use rust_decimal::Decimal;
    ///
    /// let widget = Arc::new(Product::new(
    ///     ProductId::generate(),
    ///     "Widget",
    ///     ProductType::Standard,
    ///     Money::new(Currency::USD, Decimal::new(1000, 2)),
    /// ));
    ///
    /// let item = OfferItem::new(widget, 3).unwrap();
    /// assert_eq!(item.total_cost().amount(), Decimal::new(3000, 2));
    /// ```
    pub fn new(product: Arc<Product>, quantity: i64) -> CoreResult<Self> {
        Self::with_discount(product, quantity, Discount::None)
    }

    /// Creates a line, applying `discount` to the raw cost.
    ///
    /// ## Errors
    /// - `InvalidDivisor` for a zero or negative divisor
    /// - `ArithmeticOverflow` if the cost leaves the decimal range
    pub fn with_discount(
        product: Arc<Product>,
        quantity: i64,
        discount: Discount,
    ) -> CoreResult<Self> {
        let total_cost = valuate(&product, quantity, discount)?;
        trace!(
            product_id = %product.id(),
            quantity,
            total = %total_cost,
            "Offer line valuated"
        );

        Ok(OfferItem {
            product,
            quantity,
            discount,
            total_cost,
        })
    }

    /// Creates a line from all four parts.
    ///
    /// `total_cost` is accepted for call-site symmetry with storage rows but
    /// is never stored: the total is always recomputed from the product,
    /// quantity and discount.
    pub fn from_parts(
        product: Arc<Product>,
        quantity: i64,
        discount: Discount,
        total_cost: Money,
    ) -> CoreResult<Self> {
        let item = Self::with_discount(product, quantity, discount)?;
        if item.total_cost != total_cost {
            debug!(
                product_id = %item.product.id(),
                given = %total_cost,
                computed = %item.total_cost,
                "Discarding supplied total cost"
            );
        }
        Ok(item)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn product(&self) -> &Arc<Product> {
        &self.product
    }

    #[inline]
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    #[inline]
    pub fn discount(&self) -> Discount {
        self.discount
    }

    #[inline]
    pub fn total_cost(&self) -> &Money {
        &self.total_cost
    }

    /// Borrows the identity fields shared by `==` and `same_as`.
    pub fn identity_key(&self) -> IdentityKey<'_> {
        IdentityKey {
            product_name: self.product.name(),
            product_price: self.product.price(),
            product_id: self.product.id(),
            product_type: self.product.product_type(),
            quantity: self.quantity,
        }
    }

    // =========================================================================
    // Tolerance Comparison
    // =========================================================================

    /// Checks whether two lines are practically the same.
    ///
    /// `delta_pct` is the acceptable difference as a percentage of the larger
    /// total (`5.0` = 5%).
    ///
    /// ## Algorithm
    /// ```text
    /// identity keys differ?        → false
    /// total currencies differ?     → false   (no conversion)
    ///
    /// max        = larger total,  min = smaller total
    /// difference = max - min
    /// acceptable = max × (delta_pct / 100)
    ///
    /// acceptable > difference      → true    (strict: equal is NOT enough)
    /// ```
    ///
    /// The float is converted to the shortest decimal that represents it, so
    /// `5.0` is exactly `5`. NaN and infinities never compare as the same.
    /// Finite deltas and totals outside the decimal range do not flip the
    /// answer: an overflowing `acceptable` saturates, and a difference too
    /// large to represent is compared at reduced scale. Swapping `self` and
    /// `other` gives the same max/min, so the check is symmetric.
    ///
    /// ## Example
    /// 15.00 vs 15.30 at 5%: acceptable 0.765 > 0.30 → same.
    /// At 1%: acceptable 0.153 < 0.30 → not the same.
    pub fn same_as(&self, other: &OfferItem, delta_pct: f64) -> bool {
        if self.identity_key() != other.identity_key() {
            return false;
        }
        if self.total_cost.currency() != other.total_cost.currency() {
            return false;
        }

        if !delta_pct.is_finite() {
            return false;
        }

        let (max, min) = if self.total_cost.amount() > other.total_cost.amount() {
            (self.total_cost.amount(), other.total_cost.amount())
        } else {
            (other.total_cost.amount(), self.total_cost.amount())
        };

        let ratio = match Decimal::from_f64(delta_pct) {
            Some(delta) => delta / Decimal::ONE_HUNDRED,
            // Beyond the decimal range: the tolerance is unbounded in the
            // direction of its sign.
            None if delta_pct.abs() >= 1.0 => {
                return positive_product(delta_pct > 0.0, max);
            }
            None => Decimal::ZERO,
        };

        match max.checked_sub(min) {
            Some(difference) => match ratio.checked_mul(max) {
                Some(acceptable) => acceptable > difference,
                None => positive_product(ratio.is_sign_positive(), max),
            },
            // max > 0 > min here. Compare both sides at a quarter scale,
            // where the difference always fits.
            None => {
                let quarter = Decimal::from(4);
                let difference = max / quarter - min / quarter;
                match (ratio / quarter).checked_mul(max) {
                    Some(acceptable) => acceptable > difference,
                    None => positive_product(ratio.is_sign_positive(), max),
                }
            }
        }
    }
}

/// Whether a saturated `ratio × max` lies above every representable
/// difference (true) or below zero (false).
fn positive_product(ratio_positive: bool, max: Decimal) -> bool {
    !max.is_zero() && ratio_positive == max.is_sign_positive()
}

/// Computes the total cost of a line.
fn valuate(product: &Product, quantity: i64, discount: Discount) -> CoreResult<Money> {
    let raw = product.price().multiply_quantity(quantity)?;
    match discount {
        Discount::None => Ok(raw),
        Discount::Divisor(divisor) => raw.divide_by(divisor),
    }
}

// =============================================================================
// Structural Equality
// =============================================================================

impl PartialEq for OfferItem {
    fn eq(&self, other: &Self) -> bool {
        self.discount == other.discount
            && self.identity_key() == other.identity_key()
            && self.total_cost == other.total_cost
    }
}

impl Eq for OfferItem {}

impl Hash for OfferItem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.discount.hash(state);
        self.identity_key().hash(state);
        self.total_cost.hash(state);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::money::Currency;
    use rust_decimal_macros::dec;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;

    const WIDGET_ID: &str = "00000000-0000-0000-0000-000000000001";

    fn widget() -> Arc<Product> {
        Arc::new(Product::new(
            ProductId::parse(WIDGET_ID).unwrap(),
            "Widget",
            ProductType::Standard,
            Money::new(Currency::USD, dec!(10.00)),
        ))
    }

    fn hash_of(item: &OfferItem) -> u64 {
        let mut hasher = DefaultHasher::new();
        item.hash(&mut hasher);
        hasher.finish()
    }

    /// Restores a recorded line with a verbatim total, the way storage does.
    fn recorded(item: &OfferItem, total: Money) -> OfferItem {
        let mut value = serde_json::to_value(item).unwrap();
        value["total_cost"] = serde_json::to_value(total).unwrap();
        serde_json::from_value(value).unwrap()
    }

    // -------------------------------------------------------------------------
    // Valuation
    // -------------------------------------------------------------------------

    #[test]
    fn test_no_discount() {
        let item = OfferItem::new(widget(), 3).unwrap();
        assert_eq!(item.total_cost(), &Money::new(Currency::USD, dec!(30.00)));
        assert!(item.discount().is_none());
    }

    #[test]
    fn test_divisor_two_halves_cost() {
        let item = OfferItem::with_discount(widget(), 3, Discount::Divisor(dec!(2))).unwrap();
        assert_eq!(item.total_cost(), &Money::new(Currency::USD, dec!(15.00)));
    }

    #[test]
    fn test_divisor_one_keeps_cost() {
        let item = OfferItem::with_discount(widget(), 3, Discount::Divisor(dec!(1))).unwrap();
        assert_eq!(item.total_cost().amount(), dec!(30.00));
    }

    #[test]
    fn test_total_currency_follows_product_price() {
        let product = Arc::new(Product::new(
            ProductId::generate(),
            "Tea",
            ProductType::Food,
            Money::new(Currency::PLN, dec!(4.99)),
        ));
        let item = OfferItem::with_discount(product, 7, Discount::Divisor(dec!(1.5))).unwrap();
        assert_eq!(item.total_cost().currency(), Currency::PLN);
        // 34.93 / 1.5 = 23.2866... → 23.29
        assert_eq!(item.total_cost().amount(), dec!(23.29));
    }

    #[test]
    fn test_non_terminating_division_is_rounded() {
        let item = OfferItem::with_discount(widget(), 1, Discount::Divisor(dec!(3))).unwrap();
        assert_eq!(item.total_cost().amount(), dec!(3.33));
    }

    #[test]
    fn test_zero_divisor_fails_at_construction() {
        let result = OfferItem::with_discount(widget(), 3, Discount::Divisor(dec!(0)));
        assert!(matches!(result, Err(CoreError::InvalidDivisor { .. })));
    }

    #[test]
    fn test_negative_quantity_gives_negative_cost() {
        let item = OfferItem::new(widget(), -2).unwrap();
        assert_eq!(item.total_cost().amount(), dec!(-20.00));
    }

    #[test]
    fn test_zero_quantity() {
        let item = OfferItem::new(widget(), 0).unwrap();
        assert!(item.total_cost().is_zero());
    }

    #[test]
    fn test_from_parts_recomputes_total() {
        let bogus = Money::new(Currency::EUR, dec!(999.99));
        let item = OfferItem::from_parts(widget(), 3, Discount::Divisor(dec!(2)), bogus).unwrap();
        assert_eq!(item.total_cost(), &Money::new(Currency::USD, dec!(15.00)));
    }

    #[test]
    fn test_product_is_shared_not_copied() {
        let product = widget();
        let a = OfferItem::new(Arc::clone(&product), 1).unwrap();
        let b = OfferItem::new(Arc::clone(&product), 2).unwrap();
        assert!(Arc::ptr_eq(a.product(), b.product()));
    }

    // -------------------------------------------------------------------------
    // Structural equality
    // -------------------------------------------------------------------------

    #[test]
    fn test_equality_is_reflexive_symmetric_transitive() {
        let a = OfferItem::new(widget(), 3).unwrap();
        let b = OfferItem::new(widget(), 3).unwrap();
        let c = OfferItem::from_parts(widget(), 3, Discount::None, Money::zero(Currency::USD))
            .unwrap();

        assert_eq!(a, a);
        assert_eq!(a == b, b == a);
        assert!(a == b && b == c);
        assert_eq!(a, c);
    }

    #[test]
    fn test_equal_items_hash_equal() {
        let a = OfferItem::with_discount(widget(), 3, Discount::Divisor(dec!(2))).unwrap();
        let b = OfferItem::with_discount(widget(), 3, Discount::Divisor(dec!(2.0))).unwrap();
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));

        let set: HashSet<OfferItem> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_no_discount_differs_from_divisor_one() {
        let plain = OfferItem::new(widget(), 3).unwrap();
        let one = OfferItem::with_discount(widget(), 3, Discount::Divisor(dec!(1))).unwrap();
        assert_eq!(plain.total_cost(), one.total_cost());
        assert_ne!(plain, one);
    }

    #[test]
    fn test_each_identity_field_matters() {
        let base = OfferItem::new(widget(), 3).unwrap();

        let renamed = Arc::new(Product::new(
            ProductId::parse(WIDGET_ID).unwrap(),
            "Gadget",
            ProductType::Standard,
            Money::new(Currency::USD, dec!(10.00)),
        ));
        let retyped = Arc::new(Product::new(
            ProductId::parse(WIDGET_ID).unwrap(),
            "Widget",
            ProductType::Drug,
            Money::new(Currency::USD, dec!(10.00)),
        ));
        let other_id = Arc::new(Product::new(
            ProductId::generate(),
            "Widget",
            ProductType::Standard,
            Money::new(Currency::USD, dec!(10.00)),
        ));

        assert_ne!(base, OfferItem::new(renamed, 3).unwrap());
        assert_ne!(base, OfferItem::new(retyped, 3).unwrap());
        assert_ne!(base, OfferItem::new(other_id, 3).unwrap());
        assert_ne!(base, OfferItem::new(widget(), 4).unwrap());
    }

    #[test]
    fn test_total_cost_participates_in_equality() {
        let item = OfferItem::new(widget(), 3).unwrap();
        let drifted = recorded(&item, Money::new(Currency::USD, dec!(30.01)));
        assert_ne!(item, drifted);
        assert_eq!(item.identity_key(), drifted.identity_key());
    }

    #[test]
    fn test_serde_round_trip_is_lossless() {
        let item = OfferItem::with_discount(widget(), 3, Discount::Divisor(dec!(2))).unwrap();
        let json = serde_json::to_string(&item).unwrap();
        let back: OfferItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
        assert_eq!(back.discount(), item.discount());
        assert_eq!(back.total_cost(), item.total_cost());
    }

    // -------------------------------------------------------------------------
    // Tolerance comparison
    // -------------------------------------------------------------------------

    #[test]
    fn test_same_as_concrete_scenario() {
        let a = OfferItem::with_discount(widget(), 3, Discount::Divisor(dec!(2))).unwrap();
        // 30 / 1.9608 = 15.29987... → 15.30
        let b = OfferItem::with_discount(widget(), 3, Discount::Divisor(dec!(1.9608))).unwrap();
        assert_eq!(a.total_cost().amount(), dec!(15.00));
        assert_eq!(b.total_cost().amount(), dec!(15.30));

        assert!(a.same_as(&b, 5.0));
        assert!(!a.same_as(&b, 1.0));
    }

    #[test]
    fn test_same_as_is_symmetric() {
        let a = OfferItem::with_discount(widget(), 3, Discount::Divisor(dec!(2))).unwrap();
        let b = OfferItem::with_discount(widget(), 3, Discount::Divisor(dec!(1.9608))).unwrap();

        for delta in [0.0, 0.5, 1.0, 1.96, 1.97, 2.0, 5.0, 50.0, 100.0] {
            assert_eq!(a.same_as(&b, delta), b.same_as(&a, delta), "delta {delta}");
        }
    }

    #[test]
    fn test_same_as_threshold_is_strict() {
        // 100.00 vs 80.00: difference 20.00, 20% of 100.00 is exactly 20.00
        let product = Arc::new(Product::new(
            ProductId::parse(WIDGET_ID).unwrap(),
            "Widget",
            ProductType::Standard,
            Money::new(Currency::USD, dec!(10.00)),
        ));
        let full = OfferItem::new(Arc::clone(&product), 10).unwrap();
        let reduced = OfferItem::with_discount(product, 10, Discount::Divisor(dec!(1.25))).unwrap();
        assert_eq!(reduced.total_cost().amount(), dec!(80.00));

        assert!(!full.same_as(&reduced, 20.0));
        assert!(!reduced.same_as(&full, 20.0));
        assert!(full.same_as(&reduced, 20.5));
    }

    #[test]
    fn test_same_as_identical_totals_need_positive_delta() {
        let a = OfferItem::new(widget(), 3).unwrap();
        assert!(a.same_as(&a, 0.1));
        // 0 > 0 is false
        assert!(!a.same_as(&a, 0.0));
    }

    #[test]
    fn test_same_as_ignores_discount() {
        let plain = OfferItem::new(widget(), 3).unwrap();
        let one = OfferItem::with_discount(widget(), 3, Discount::Divisor(dec!(1))).unwrap();
        assert_ne!(plain, one);
        assert!(plain.same_as(&one, 1.0));
    }

    #[test]
    fn test_same_as_currency_mismatch() {
        let item = OfferItem::new(widget(), 3).unwrap();
        let in_euro = recorded(&item, Money::new(Currency::EUR, dec!(30.00)));

        for delta in [0.0, 1.0, 100.0, 1000.0] {
            assert!(!item.same_as(&in_euro, delta));
            assert!(!in_euro.same_as(&item, delta));
        }
    }

    #[test]
    fn test_same_as_identity_mismatch() {
        let a = OfferItem::new(widget(), 3).unwrap();
        let b = OfferItem::new(widget(), 4).unwrap();
        assert!(!a.same_as(&b, 1000.0));
    }

    #[test]
    fn test_same_as_rejects_non_finite_delta() {
        let a = OfferItem::new(widget(), 3).unwrap();
        assert!(!a.same_as(&a, f64::NAN));
        assert!(!a.same_as(&a, f64::INFINITY));
    }

    #[test]
    fn test_same_as_negative_delta_never_matches() {
        let a = OfferItem::new(widget(), 3).unwrap();
        assert!(!a.same_as(&a, -5.0));
    }

    #[test]
    fn test_same_as_huge_delta_is_unbounded() {
        let a = OfferItem::new(widget(), 3).unwrap();
        let b = recorded(&a, Money::new(Currency::USD, dec!(30.01)));

        for delta in [1e20, 1e28, 1e29, 1e30, f64::MAX] {
            assert!(a.same_as(&b, delta), "delta {delta}");
            assert!(b.same_as(&a, delta), "delta {delta}");
        }
    }

    #[test]
    fn test_same_as_difference_beyond_decimal_range() {
        // MAX - MIN is about 2 × MAX: delta must exceed 200%
        let item = OfferItem::new(widget(), 3).unwrap();
        let high = recorded(&item, Money::new(Currency::USD, Decimal::MAX));
        let low = recorded(&item, Money::new(Currency::USD, Decimal::MIN));

        let cases = [
            (150.0, false),
            (190.0, false),
            (250.0, true),
            (300.0, true),
        ];
        for (delta, expected) in cases {
            assert_eq!(high.same_as(&low, delta), expected, "delta {delta}");
            assert_eq!(low.same_as(&high, delta), expected, "delta {delta}");
        }
    }

    #[test]
    fn test_same_as_saturates_overflowing_tolerance() {
        let item = OfferItem::new(widget(), 3).unwrap();

        let top = recorded(&item, Money::new(Currency::USD, Decimal::MAX));
        let near_top = recorded(&item, Money::new(Currency::USD, Decimal::MAX - Decimal::ONE));
        assert!(top.same_as(&near_top, 200.0));
        assert!(near_top.same_as(&top, 200.0));

        // Negative totals: the tolerance saturates below zero
        let bottom = recorded(&item, Money::new(Currency::USD, Decimal::MIN));
        let near_bottom = recorded(&item, Money::new(Currency::USD, Decimal::MIN + Decimal::ONE));
        assert!(!bottom.same_as(&near_bottom, 200.0));
        assert!(!near_bottom.same_as(&bottom, 200.0));
    }
}
