//! Fixed-point money amounts.
//!
//! All monetary values are signed counts of minor currency units, so
//! `total = subtotal - discount` holds exactly.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A signed amount of money in minor currency units.
///
/// # Examples
///
/// ```
/// use innkeep::Money;
///
/// let subtotal = Money::new(1_200_000);
/// let discount = Money::new(200_000);
/// assert_eq!(subtotal - discount, Money::new(1_000_000));
/// assert_eq!("450000".parse::<Money>().unwrap(), Money::new(450_000));
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// The zero amount.
    pub const ZERO: Self = Self(0);

    /// Largest magnitude accepted for a stored amount or a running total.
    ///
    /// Sums and differences of a few bounded amounts stay far inside `i64`.
    pub const LIMIT: Self = Self(1_000_000_000_000_000);

    /// Creates an amount from minor units.
    #[must_use]
    pub const fn new(minor_units: i64) -> Self {
        Self(minor_units)
    }

    /// Returns the amount in minor units.
    #[must_use]
    pub const fn minor_units(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is strictly positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Returns `true` if the amount is strictly negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Returns `true` if the amount is zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns the larger of `self` and zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use innkeep::Money;
    ///
    /// assert_eq!(Money::new(-50).clamp_to_zero(), Money::ZERO);
    /// assert_eq!(Money::new(75).clamp_to_zero(), Money::new(75));
    /// ```
    #[must_use]
    pub const fn clamp_to_zero(self) -> Self {
        if self.0 < 0 {
            Self::ZERO
        } else {
            self
        }
    }

    /// Adds two amounts, returning `None` on overflow.
    #[must_use]
    pub const fn checked_add(self, rhs: Self) -> Option<Self> {
        match self.0.checked_add(rhs.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Subtracts `rhs`, returning `None` on overflow.
    #[must_use]
    pub const fn checked_sub(self, rhs: Self) -> Option<Self> {
        match self.0.checked_sub(rhs.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Fails with a validation error if the magnitude exceeds [`Money::LIMIT`].
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` naming `field`.
    ///
    /// # Examples
    ///
    /// ```
    /// use innkeep::Money;
    ///
    /// assert!(Money::LIMIT.ensure_within_limit("amount").is_ok());
    /// assert!(Money::new(i64::MIN).ensure_within_limit("amount").is_err());
    /// ```
    pub fn ensure_within_limit(self, field: &str) -> Result<Self, ValidationError> {
        if self.0.unsigned_abs() > Self::LIMIT.0.unsigned_abs() {
            Err(ValidationError::new(
                field,
                format!("amount {self} is beyond the supported limit of {}", Self::LIMIT),
            ))
        } else {
            Ok(self)
        }
    }

    /// Fails with a validation error if the amount is negative.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` naming `field` when the amount is below zero.
    pub fn ensure_non_negative(self, field: &str) -> Result<Self, ValidationError> {
        if self.is_negative() {
            Err(ValidationError::new(field, "amount must not be negative"))
        } else {
            Ok(self)
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cleaned: String = s.trim().chars().filter(|c| *c != '_' && *c != ',').collect();
        cleaned.parse::<i64>().map(Self).map_err(|_| {
            ValidationError::new(
                "amount",
                format!("'{s}' is not a whole number of minor units"),
            )
        })
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl ToSql for Money {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.0))
    }
}

impl FromSql for Money {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        i64::column_result(value).map(Self)
    }
}
