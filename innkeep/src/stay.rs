//! Half-open stay intervals.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The nights a guest occupies a room: `[check_in, check_out)`.
///
/// The check-out day itself is not occupied, so a stay ending on day X and
/// another starting on day X do not overlap.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use innkeep::StayDates;
///
/// let d = |day| NaiveDate::from_ymd_opt(2030, 5, day).unwrap();
/// let a = StayDates::new(d(10), d(13)).unwrap();
/// let b = StayDates::new(d(13), d(15)).unwrap();
/// assert_eq!(a.nights(), 3);
/// assert!(!a.overlaps(&b));
/// assert!(StayDates::new(d(13), d(13)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StayDates {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl StayDates {
    /// Creates a stay, requiring `check_out` to be strictly after `check_in`.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` on field `check_out` otherwise.
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, ValidationError> {
        if check_out <= check_in {
            return Err(ValidationError::new(
                "check_out",
                format!("check-out date {check_out} must be after check-in date {check_in}"),
            ));
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    /// First night of the stay.
    #[must_use]
    pub const fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    /// Departure day, not occupied.
    #[must_use]
    pub const fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    /// Number of nights, always at least one.
    #[must_use]
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// Returns `true` if the two half-open intervals share at least one night.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.check_in < other.check_out && other.check_in < self.check_out
    }

    /// Fails if the stay starts before `today`.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` on field `check_in`.
    pub fn ensure_not_past(&self, today: NaiveDate) -> Result<(), ValidationError> {
        if self.check_in < today {
            return Err(ValidationError::new(
                "check_in",
                format!("check-in date {} is in the past", self.check_in),
            ));
        }
        Ok(())
    }

    /// Fails if the stay is longer than `max_nights`.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` on field `check_out`.
    pub fn ensure_max_nights(&self, max_nights: u32) -> Result<(), ValidationError> {
        if self.nights() > i64::from(max_nights) {
            return Err(ValidationError::new(
                "check_out",
                format!(
                    "stay of {} nights exceeds the maximum of {max_nights}",
                    self.nights()
                ),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for StayDates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.check_in, self.check_out)
    }
}

#[cfg(test)]
mod proptests;
