//! Payment persistence.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::actor::Actor;
use crate::error::{Error, Result};
use crate::ids::{PaymentId, ReservationId, UserId};
use crate::money::Money;
use crate::payment::{NewPayment, Payment};
use crate::reservation::ReservationStatus;

use super::connection::Database;
use super::schema::SUM_PAID;

const PAYMENT_COLUMNS: &str =
    "id, reservation_id, amount, payment_type, method, reference, voided, created_at, created_by";

fn row_to_payment(row: &rusqlite::Row<'_>) -> rusqlite::Result<Payment> {
    Ok(Payment {
        id: row.get(0)?,
        reservation_id: row.get(1)?,
        amount: row.get(2)?,
        payment_type: row.get(3)?,
        method: row.get(4)?,
        reference: row.get(5)?,
        voided: row.get(6)?,
        created_at: row.get(7)?,
        created_by: row.get(8)?,
    })
}

impl Database {
    /// Inserts a payment row and returns its id. No business checks.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_payment(
        conn: &Connection,
        new: &NewPayment,
        actor: UserId,
        at: DateTime<Utc>,
    ) -> Result<PaymentId> {
        conn.execute(
            r"INSERT INTO payments
                (reservation_id, amount, payment_type, method, reference, voided, created_at, created_by)
              VALUES (?1, ?2, ?3, ?4, ?5, 0, ?6, ?7)",
            params![
                new.reservation_id,
                new.amount,
                new.payment_type,
                new.method,
                new.reference,
                at,
                actor,
            ],
        )?;
        Ok(PaymentId::new(conn.last_insert_rowid()))
    }

    /// Retrieves a payment by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_payment(conn: &Connection, id: PaymentId) -> Result<Option<Payment>> {
        let sql = format!("SELECT {PAYMENT_COLUMNS} FROM payments WHERE id = ?");
        Ok(conn.query_row(&sql, [id], row_to_payment).optional()?)
    }

    /// Lists a reservation's payments, voided ones included, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_payments(conn: &Connection, reservation_id: ReservationId) -> Result<Vec<Payment>> {
        let sql =
            format!("SELECT {PAYMENT_COLUMNS} FROM payments WHERE reservation_id = ? ORDER BY id");
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([reservation_id], row_to_payment)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Flags a payment as voided. Returns `false` if it already was.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn mark_payment_voided(conn: &Connection, id: PaymentId) -> Result<bool> {
        let changed = conn.execute(
            "UPDATE payments SET voided = 1 WHERE id = ? AND voided = 0",
            [id],
        )?;
        Ok(changed == 1)
    }

    /// Sum of non-voided, non-refund payments of a reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn sum_paid(conn: &Connection, reservation_id: ReservationId) -> Result<Money> {
        Ok(conn.query_row(SUM_PAID, [reservation_id], |row| row.get(0))?)
    }

    /// Checks that the amount paid on a reservation stays within
    /// [`Money::LIMIT`] once `delta` is applied to it.
    fn ensure_paid_within_limit(
        conn: &Connection,
        reservation_id: ReservationId,
        delta: Money,
    ) -> Result<()> {
        let paid = Self::sum_paid(conn, reservation_id)?;
        match paid.checked_add(delta) {
            Some(after) if after.ensure_within_limit("amount").is_ok() => Ok(()),
            _ => Err(Error::validation(
                "amount",
                format!(
                    "payments on reservation {reservation_id} would total beyond the supported limit of {}",
                    Money::LIMIT
                ),
            )),
        }
    }

    /// Records a payment against an existing, non-cancelled reservation.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad amount, `NotFound` for an
    /// unknown reservation, a conflict for a cancelled one, or a database
    /// error.
    pub fn record_payment(&mut self, new: &NewPayment, actor: &Actor) -> Result<Payment> {
        new.validate()?;

        let tx = self.begin_transaction()?;
        let reservation = Self::require_reservation(&tx, new.reservation_id)?;
        if reservation.status == ReservationStatus::Cancelled {
            return Err(Error::conflict(format!(
                "reservation {} was cancelled",
                reservation.id
            )));
        }
        if new.payment_type.counts_as_paid() {
            Self::ensure_paid_within_limit(&tx, reservation.id, new.amount)?;
        }

        let id = Self::insert_payment(&tx, new, actor.id, Utc::now())?;
        let payment =
            Self::get_payment(&tx, id)?.ok_or_else(|| Error::not_found(format!("payment {id}")))?;
        tx.commit()?;

        log::info!(
            "{actor} recorded {} of {} on reservation {}",
            payment.payment_type,
            payment.amount,
            payment.reservation_id
        );
        Ok(payment)
    }

    /// Voids a payment so it no longer counts toward the amount paid.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown payment, a conflict if it was
    /// already voided, a validation error if removing it would push the
    /// amount paid beyond [`Money::LIMIT`], or a database error.
    pub fn void_payment(&mut self, id: PaymentId, actor: &Actor) -> Result<Payment> {
        let tx = self.begin_transaction()?;
        let existing =
            Self::get_payment(&tx, id)?.ok_or_else(|| Error::not_found(format!("payment {id}")))?;
        if existing.counts_as_paid() {
            Self::ensure_paid_within_limit(&tx, existing.reservation_id, -existing.amount)?;
        }
        if !Self::mark_payment_voided(&tx, id)? {
            return Err(Error::conflict(format!("payment {id} is already voided")));
        }
        let payment =
            Self::get_payment(&tx, id)?.ok_or_else(|| Error::not_found(format!("payment {id}")))?;
        tx.commit()?;

        log::info!("{actor} voided payment {id}");
        Ok(payment)
    }
}
