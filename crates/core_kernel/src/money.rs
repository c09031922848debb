//! Money types with precise decimal arithmetic
//!
//! This module provides a representation of monetary values using
//! rust_decimal so that tariff arithmetic never accumulates floating-point
//! error. All bills are issued in a single currency, so `Money` carries only
//! the amount.
//!
//! Amounts keep full precision through every calculation. Rounding happens
//! only when a value is reported, using an explicit [`RoundingConvention`].

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Sub};

/// Number of decimal places used when reporting monetary amounts
pub const REPORTING_DECIMAL_PLACES: u32 = 2;

/// How a midpoint value is resolved when an amount is rounded for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingConvention {
    /// Round half to even ("banker's rounding"): 0.125 -> 0.12, 0.135 -> 0.14
    #[default]
    HalfEven,
    /// Round half away from zero: 0.125 -> 0.13, -0.125 -> -0.13
    HalfAwayFromZero,
}

impl RoundingConvention {
    /// Returns the rust_decimal strategy implementing this convention
    pub fn strategy(&self) -> RoundingStrategy {
        match self {
            RoundingConvention::HalfEven => RoundingStrategy::MidpointNearestEven,
            RoundingConvention::HalfAwayFromZero => RoundingStrategy::MidpointAwayFromZero,
        }
    }

    /// Rounds a decimal to `dp` places using this convention
    pub fn round(&self, value: Decimal, dp: u32) -> Decimal {
        value.round_dp_with_strategy(dp, self.strategy())
    }
}

impl std::str::FromStr for RoundingConvention {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "half_even" | "bankers" => Ok(RoundingConvention::HalfEven),
            "half_away_from_zero" | "half_up" => Ok(RoundingConvention::HalfAwayFromZero),
            other => Err(format!("Unknown rounding convention: {}", other)),
        }
    }
}

/// A monetary amount
///
/// Unlike a ledger posting, a `Money` value is never rounded on construction:
/// water charges, surcharges and fees are derived from each other and must
/// not drift before the total is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Zero amount
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Creates a new Money value
    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Creates a zero amount
    pub fn zero() -> Self {
        Self::ZERO
    }

    /// Returns the amount
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Adds two amounts, returning `None` on overflow
    pub fn checked_add(&self, other: Money) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Multiplies by a scalar (e.g., a volume in cubic meters)
    pub fn multiply(&self, factor: Decimal) -> Self {
        Self(self.0 * factor)
    }

    /// Rounds to reporting precision using the given convention
    pub fn round_for_reporting(&self, convention: RoundingConvention) -> Self {
        Self(convention.round(self.0, REPORTING_DECIMAL_PLACES))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "R$ {:.dp$}",
            self.0,
            dp = REPORTING_DECIMAL_PLACES as usize
        )
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl Mul<Decimal> for Money {
    type Output = Self;

    fn mul(self, factor: Decimal) -> Self {
        self.multiply(factor)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, m| acc + *m)
    }
}

/// Represents a percentage rate (e.g., a surcharge or fee rate)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rate {
    /// The rate as a decimal (e.g., 0.10 for 10%)
    value: Decimal,
}

impl Rate {
    /// Zero rate
    pub const ZERO: Rate = Rate { value: Decimal::ZERO };

    /// Creates a rate from a decimal value (e.g., 0.10 for 10%)
    pub const fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// Creates a rate from a percentage (e.g., 10 for 10%)
    pub fn from_percentage(percentage: Decimal) -> Self {
        Self {
            value: percentage / Decimal::ONE_HUNDRED,
        }
    }

    /// Returns the rate as a decimal
    pub fn as_decimal(&self) -> Decimal {
        self.value
    }

    /// Returns the rate as a percentage
    pub fn as_percentage(&self) -> Decimal {
        self.value * Decimal::ONE_HUNDRED
    }

    /// Applies this rate to a money amount
    pub fn apply(&self, money: Money) -> Money {
        money.multiply(self.value)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percentage().normalize())
    }
}
