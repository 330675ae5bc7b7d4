use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};
use std::str::FromStr;

/// Magnitudes below half a cent collapse to zero instead of rounding.
const NOISE_FLOOR: Decimal = Decimal::from_parts(5, 0, 0, false, 3);

/// Largest price a single item may carry: 1,000,000,000,000.
const MAX_PRICE: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// Rounds half away from zero to two places; anything under half a cent is zero.
pub fn round_cents(value: Decimal) -> Decimal {
    if value.abs() < NOISE_FLOOR {
        return Decimal::ZERO;
    }
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Money(Decimal);

impl Money {
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
    }

    pub fn from_decimal(decimal: Decimal) -> Self {
        Money(round_cents(decimal))
    }

    /// Parses a raw price field.
    ///
    /// `None` when the field is blank, not a number, negative, or above one
    /// trillion. Values outside `Decimal`'s range (about ±7.9e28, e.g. `1e30`)
    /// are not representable and are rejected the same way.
    pub fn parse(raw: &str) -> Option<Self> {
        let s = raw.trim();
        if s.is_empty() {
            return None;
        }
        Decimal::from_str(s)
            .or_else(|_| Decimal::from_scientific(s))
            .ok()
            .filter(|d| *d >= Decimal::ZERO && *d <= MAX_PRICE)
            .map(Money::from_decimal)
    }

    /// Clamps into the range one item may contribute to a total, `0..=MAX_PRICE`.
    pub fn clamp_price(self) -> Self {
        Money(self.0.clamp(Decimal::ZERO, MAX_PRICE))
    }

    pub fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn amount(self) -> Decimal {
        self.0
    }

    /// Re-applies the two-decimal rounding policy.
    pub fn round(self) -> Self {
        Money::from_decimal(self.0)
    }

    /// Subtraction floored at zero.
    pub fn saturating_sub(self, rhs: Self) -> Self {
        Money((self.0 - rhs.0).max(Decimal::ZERO))
    }

    /// The bare amount with exactly two decimals, e.g. `0.00`.
    pub fn format_amount(self) -> String {
        format!("{:.2}", self.0)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Money(self.0 - rhs.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |a, b| a + b)
    }
}
