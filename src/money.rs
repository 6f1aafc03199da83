//! Monetary amounts.
//!
//! Amounts keep the full precision they were parsed with and are only
//! rounded when rendered, which always uses two decimal places. Arithmetic
//! is checked: results outside the `Decimal` range come back as `None`.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A currency amount backed by `rust_decimal::Decimal`.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use txlog_ledger::Money;
///
/// let amount = Money::from_str("1770").unwrap();
/// assert_eq!(amount.to_string(), "1770.00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(Decimal);

impl Money {
    /// Number of decimal places used for display.
    pub const DISPLAY_SCALE: u32 = 2;

    /// Zero value.
    pub const ZERO: Self = Money(Decimal::ZERO);

    /// Adds two amounts, `None` if the result is out of range.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Subtracts two amounts, `None` if the result is out of range.
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Money)
    }

    /// Rounds half away from zero to the display scale, folding `-0.00` into `0.00`.
    fn rounded(&self) -> Decimal {
        let rounded = self
            .0
            .round_dp_with_strategy(Self::DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero);
        if rounded.is_zero() {
            Decimal::ZERO
        } else {
            rounded
        }
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Decimal::from_str(s.trim()).map(Money)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.rounded())
    }
}

impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
