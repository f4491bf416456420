//! # Money Module
//!
//! Provides the `Money` type: a currency paired with an exact decimal amount.
//!
//! ## Why Exact Decimals?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Unit prices here are arbitrary decimals (0.125 PLN per gram),         │
//! │  so integer cents are not enough either.                               │
//! │                                                                         │
//! │  OUR SOLUTION: rust_decimal::Decimal                                    │
//! │    10.00 × 3 = 30.00 exactly                                           │
//! │    Rounding happens in ONE place (divide_by), to the currency's        │
//! │    minor units, with Bankers Rounding                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use offerline_core::money::{Currency, Money};
//! use rust_decimal::Decimal;
//!
//! let price = Money::new(Currency::USD, Decimal::new(1000, 2)); // 10.00 USD
//! let line = price.multiply_quantity(3).unwrap();
//! assert_eq!(line.amount(), Decimal::new(3000, 2));
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::validation::is_valid_divisor;

// =============================================================================
// Currency
// =============================================================================

/// ISO 4217 currencies an offer can be priced in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Currency {
    USD,
    EUR,
    GBP,
    PLN,
    CHF,
    JPY,
}

impl Currency {
    /// Returns the three-letter ISO code.
    pub const fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::PLN => "PLN",
            Currency::CHF => "CHF",
            Currency::JPY => "JPY",
        }
    }

    /// Number of decimal places in the currency's minor unit.
    ///
    /// This is the scale divided totals are rounded to.
    pub const fn minor_units(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "USD" => Ok(Currency::USD),
            "EUR" => Ok(Currency::EUR),
            "GBP" => Ok(Currency::GBP),
            "PLN" => Ok(Currency::PLN),
            "CHF" => Ok(Currency::CHF),
            "JPY" => Ok(Currency::JPY),
            other => Err(CoreError::UnknownCurrency(other.to_string())),
        }
    }
}

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value: currency plus exact decimal amount.
///
/// ## Equality
/// Two values are equal when the currency matches and the amounts are
/// numerically equal. Scale does not matter: `10.0 USD == 10.00 USD`, and
/// both hash the same.
///
/// ## Where Money is Used
/// ```text
/// Product.price ──► × quantity ──► ÷ discount divisor ──► OfferItem.total_cost
///                                                                │
///                                    same_as / == ◄──────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money {
    currency: Currency,
    #[ts(type = "string")]
    amount: Decimal,
}

impl Money {
    /// Creates a Money value.
    #[inline]
    pub const fn new(currency: Currency, amount: Decimal) -> Self {
        Money { currency, amount }
    }

    /// Returns zero in the given currency.
    #[inline]
    pub const fn zero(currency: Currency) -> Self {
        Money::new(currency, Decimal::ZERO)
    }

    #[inline]
    pub const fn currency(&self) -> Currency {
        self.currency
    }

    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// Checks if the amount is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Checks if the amount is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Multiplies money by a quantity. Exact, no rounding.
    ///
    /// ## Example
    /// ```rust
    /// use offerline_core::money::{Currency, Money};
    /// use rust_decimal::Decimal;
    ///
    /// let unit_price = Money::new(Currency::EUR, Decimal::new(299, 2)); // 2.99
    /// let line_total = unit_price.multiply_quantity(3).unwrap();
    /// assert_eq!(line_total.amount(), Decimal::new(897, 2)); // 8.97
    /// ```
    pub fn multiply_quantity(&self, qty: i64) -> CoreResult<Money> {
        let amount = self
            .amount
            .checked_mul(Decimal::from(qty))
            .ok_or(CoreError::ArithmeticOverflow {
                operation: "price × quantity",
            })?;
        Ok(Money::new(self.currency, amount))
    }

    /// Divides money by a divisor and rounds to the currency's minor units.
    ///
    /// ## Rounding Policy
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  BANKERS ROUNDING (Round Half to Even) at currency scale            │
    /// │                                                                     │
    /// │  30.00 ÷ 2      = 15.00        → 15.00                              │
    /// │  10.00 ÷ 3      = 3.3333...    → 3.33                               │
    /// │  0.125 ÷ 1      = 0.125        → 0.12  (half to even)               │
    /// │  0.135 ÷ 1      = 0.135        → 0.14  (half to even)               │
    /// │                                                                     │
    /// │  Non-terminating quotients never fail: they are rounded here.      │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// ## Errors
    /// - `InvalidDivisor` when the divisor is zero or negative
    /// - `ArithmeticOverflow` when the quotient is out of range
    pub fn divide_by(&self, divisor: Decimal) -> CoreResult<Money> {
        if !is_valid_divisor(divisor) {
            return Err(CoreError::InvalidDivisor { divisor });
        }

        let quotient = self
            .amount
            .checked_div(divisor)
            .ok_or(CoreError::ArithmeticOverflow {
                operation: "cost ÷ discount divisor",
            })?;

        Ok(Money::new(self.currency, quotient).round_to_minor_units())
    }

    /// Rounds the amount to the currency's minor units (Bankers Rounding).
    pub fn round_to_minor_units(&self) -> Money {
        let amount = self.amount.round_dp_with_strategy(
            self.currency.minor_units(),
            RoundingStrategy::MidpointNearestEven,
        );
        Money::new(self.currency, amount)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation for logs and debugging, e.g. `30.00 USD`.
///
/// ## Note
/// Not localized. UI formatting belongs to the frontend.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
