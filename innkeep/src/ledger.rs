//! Payment ledger collaborator.
//!
//! The lifecycle engine asks the ledger for one number: the sum of payments
//! on a reservation that are neither voided nor refunds.

use std::collections::HashMap;

use crate::database::Database;
use crate::error::Result;
use crate::ids::ReservationId;
use crate::money::Money;

/// Source of the amount paid on a reservation.
pub trait PaymentLedger {
    /// Sums non-voided, non-refund payments for the reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be queried.
    fn total_paid(&self, reservation_id: ReservationId) -> Result<Money>;
}

impl PaymentLedger for Database {
    fn total_paid(&self, reservation_id: ReservationId) -> Result<Money> {
        Self::sum_paid(self.connection(), reservation_id)
    }
}

/// In-memory ledger with fixed totals. Unknown reservations have paid nothing.
///
/// # Examples
///
/// ```
/// use innkeep::{Money, PaymentLedger, ReservationId, StaticPaymentLedger};
///
/// let ledger = StaticPaymentLedger::new().with_paid(ReservationId::new(1), Money::new(500));
/// assert_eq!(ledger.total_paid(ReservationId::new(1)).unwrap(), Money::new(500));
/// assert_eq!(ledger.total_paid(ReservationId::new(2)).unwrap(), Money::ZERO);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticPaymentLedger {
    paid: HashMap<ReservationId, Money>,
}

impl StaticPaymentLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the amount paid on a reservation.
    #[must_use]
    pub fn with_paid(mut self, reservation_id: ReservationId, amount: Money) -> Self {
        self.paid.insert(reservation_id, amount);
        self
    }
}

impl PaymentLedger for StaticPaymentLedger {
    fn total_paid(&self, reservation_id: ReservationId) -> Result<Money> {
        Ok(self.paid.get(&reservation_id).copied().unwrap_or_default())
    }
}
