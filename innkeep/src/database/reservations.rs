//! Reservation persistence.
//!
//! All functions take a `&Connection` so they can run inside a transaction
//! opened by the caller; none of them start one of their own.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{Error, Result};
use crate::ids::{GuestId, ReservationId, RoomId, RoomTypeId, UserId};
use crate::money::Money;
use crate::reservation::{ConfirmationCode, Pricing, Reservation, ReservationStatus};
use crate::settlement::Settlement;
use crate::stay::StayDates;

use super::connection::Database;
use super::schema::{COUNT_OVERLAPPING, RESERVATION_COLUMNS};

/// Largest page size accepted by [`ReservationFilter`].
pub const MAX_PAGE_SIZE: u32 = 100;

/// Default page size of [`ReservationFilter`].
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// A reservation about to be inserted.
#[derive(Debug, Clone)]
pub struct ReservationDraft {
    /// Freshly generated code.
    pub confirmation_code: ConfirmationCode,
    /// Guest making the booking.
    pub guest_id: GuestId,
    /// Pool booked.
    pub room_type_id: RoomTypeId,
    /// Nights booked.
    pub stay: StayDates,
    /// Adults in the party.
    pub adults: u32,
    /// Children in the party.
    pub children: u32,
    /// Free-form requests.
    pub special_requests: Option<String>,
    /// Rate applied per night.
    pub rate_per_night: Money,
    /// Validated price breakdown.
    pub pricing: Pricing,
    /// Booking time.
    pub created_at: DateTime<Utc>,
    /// Booking clerk.
    pub created_by: UserId,
}

/// Filter and page for listing reservations.
///
/// # Examples
///
/// ```
/// use innkeep::database::ReservationFilter;
/// use innkeep::ReservationStatus;
///
/// let filter = ReservationFilter::new()
///     .with_status(Some(ReservationStatus::Confirmed))
///     .with_page(20, 50);
/// assert!(filter.validate().is_ok());
/// assert!(ReservationFilter::new().with_page(0, 101).validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationFilter {
    /// Only reservations in this state.
    pub status: Option<ReservationStatus>,
    /// Only reservations of this guest.
    pub guest_id: Option<GuestId>,
    /// Rows to skip.
    pub skip: u32,
    /// Rows to return, 1 to 100.
    pub limit: u32,
}

impl Default for ReservationFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReservationFilter {
    /// Creates an unfiltered first page of the default size.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            status: None,
            guest_id: None,
            skip: 0,
            limit: DEFAULT_PAGE_SIZE,
        }
    }

    /// Filters by status.
    #[must_use]
    pub const fn with_status(mut self, status: Option<ReservationStatus>) -> Self {
        self.status = status;
        self
    }

    /// Filters by guest.
    #[must_use]
    pub const fn with_guest(mut self, guest_id: Option<GuestId>) -> Self {
        self.guest_id = guest_id;
        self
    }

    /// Sets the page window.
    #[must_use]
    pub const fn with_page(mut self, skip: u32, limit: u32) -> Self {
        self.skip = skip;
        self.limit = limit;
        self
    }

    /// Checks the page size bounds.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `limit` is outside 1 to 100.
    pub fn validate(&self) -> Result<()> {
        if self.limit == 0 || self.limit > MAX_PAGE_SIZE {
            return Err(Error::validation(
                "limit",
                format!("limit must be between 1 and {MAX_PAGE_SIZE}"),
            ));
        }
        Ok(())
    }
}

/// Maps a row selected with [`RESERVATION_COLUMNS`] to a reservation.
fn row_to_reservation(row: &rusqlite::Row<'_>) -> rusqlite::Result<Reservation> {
    let check_in = row.get(5)?;
    let check_out = row.get(6)?;
    let stay = StayDates::new(check_in, check_out).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(Reservation {
        id: row.get(0)?,
        confirmation_code: row.get(1)?,
        guest_id: row.get(2)?,
        room_type_id: row.get(3)?,
        room_id: row.get(4)?,
        stay,
        status: row.get(7)?,
        adults: row.get(8)?,
        children: row.get(9)?,
        special_requests: row.get(10)?,
        rate_per_night: row.get(11)?,
        pricing: Pricing::new(row.get(12)?, row.get(13)?, row.get(14)?, row.get(15)?),
        created_at: row.get(16)?,
        created_by: row.get(17)?,
        checked_in_at: row.get(18)?,
        checked_in_by: row.get(19)?,
        checked_out_at: row.get(20)?,
        checked_out_by: row.get(21)?,
        cancelled_at: row.get(22)?,
        cancelled_by: row.get(23)?,
        deposit_refunded: row.get(24)?,
        balance_owed: row.get(25)?,
        deposit_settled_at: row.get(26)?,
    })
}

impl Database {
    /// Inserts a new confirmed reservation and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails, including a UNIQUE violation
    /// on the confirmation code.
    pub fn insert_reservation(conn: &Connection, draft: &ReservationDraft) -> Result<ReservationId> {
        conn.execute(
            r"INSERT INTO reservations (
                confirmation_code, guest_id, room_type_id, room_id,
                check_in_date, check_out_date, status, adults, children, special_requests,
                rate_per_night, subtotal, discount_amount, total_amount, deposit_amount,
                created_at, created_by
              ) VALUES (?1, ?2, ?3, NULL, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
            params![
                draft.confirmation_code,
                draft.guest_id,
                draft.room_type_id,
                draft.stay.check_in(),
                draft.stay.check_out(),
                ReservationStatus::Confirmed,
                draft.adults,
                draft.children,
                draft.special_requests,
                draft.rate_per_night,
                draft.pricing.subtotal,
                draft.pricing.discount_amount,
                draft.pricing.total_amount,
                draft.pricing.deposit_amount,
                draft.created_at,
                draft.created_by,
            ],
        )?;
        Ok(ReservationId::new(conn.last_insert_rowid()))
    }

    /// Retrieves a reservation by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_reservation(conn: &Connection, id: ReservationId) -> Result<Option<Reservation>> {
        let sql = format!("SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = ?");
        Ok(conn
            .query_row(&sql, [id], row_to_reservation)
            .optional()?)
    }

    /// Retrieves a reservation by id, failing with `NotFound` if missing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] or a database error.
    pub fn require_reservation(conn: &Connection, id: ReservationId) -> Result<Reservation> {
        Self::get_reservation(conn, id)?.ok_or_else(|| Error::not_found(format!("reservation {id}")))
    }

    /// Retrieves a reservation by confirmation code.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_reservation_by_code(
        conn: &Connection,
        code: &ConfirmationCode,
    ) -> Result<Option<Reservation>> {
        let sql =
            format!("SELECT {RESERVATION_COLUMNS} FROM reservations WHERE confirmation_code = ?");
        Ok(conn
            .query_row(&sql, [code], row_to_reservation)
            .optional()?)
    }

    /// Returns `true` if a reservation already uses the code.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn confirmation_code_exists(conn: &Connection, code: &ConfirmationCode) -> Result<bool> {
        Ok(conn.query_row(
            "SELECT EXISTS (SELECT 1 FROM reservations WHERE confirmation_code = ?)",
            [code],
            |row| row.get(0),
        )?)
    }

    /// Lists reservations ordered by id.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad page size, or a database error.
    pub fn list_reservations(
        conn: &Connection,
        filter: &ReservationFilter,
    ) -> Result<Vec<Reservation>> {
        filter.validate()?;

        let sql = format!(
            r"SELECT {RESERVATION_COLUMNS} FROM reservations
              WHERE (?1 IS NULL OR status = ?1)
                AND (?2 IS NULL OR guest_id = ?2)
              ORDER BY id
              LIMIT ?3 OFFSET ?4"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(
            params![filter.status, filter.guest_id, filter.limit, filter.skip],
            row_to_reservation,
        )?;

        let mut reservations = Vec::new();
        for row in rows {
            reservations.push(row?);
        }
        Ok(reservations)
    }

    /// Counts active reservations of a room type whose stay overlaps `stay`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_overlapping(
        conn: &Connection,
        room_type_id: RoomTypeId,
        stay: &StayDates,
    ) -> Result<i64> {
        Ok(conn.query_row(
            COUNT_OVERLAPPING,
            params![room_type_id, stay.check_in(), stay.check_out()],
            |row| row.get(0),
        )?)
    }

    /// Moves a confirmed reservation to checked-in on `room_id`.
    ///
    /// Returns `false` if the reservation was no longer confirmed.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn mark_checked_in(
        conn: &Connection,
        id: ReservationId,
        room_id: RoomId,
        actor: UserId,
        at: DateTime<Utc>,
    ) -> Result<bool> {
        let changed = conn.execute(
            r"UPDATE reservations
              SET status = 'checked_in', room_id = ?2, checked_in_at = ?3, checked_in_by = ?4
              WHERE id = ?1 AND status = 'confirmed'",
            params![id, room_id, at, actor],
        )?;
        Ok(changed == 1)
    }

    /// Moves a checked-in reservation to checked-out and records how the
    /// deposit was settled. `room_id` is kept.
    ///
    /// Returns `false` if the reservation was no longer checked in.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn mark_checked_out(
        conn: &Connection,
        id: ReservationId,
        actor: UserId,
        at: DateTime<Utc>,
        settlement: &Settlement,
    ) -> Result<bool> {
        let changed = conn.execute(
            r"UPDATE reservations
              SET status = 'checked_out', checked_out_at = ?2, checked_out_by = ?3,
                  deposit_refunded = ?4, balance_owed = ?5, deposit_settled_at = ?2
              WHERE id = ?1 AND status = 'checked_in'",
            params![id, at, actor, settlement.to_refund, settlement.balance_owed],
        )?;
        Ok(changed == 1)
    }

    /// Moves a confirmed reservation to cancelled.
    ///
    /// Returns `false` if the reservation was no longer confirmed.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn mark_cancelled(
        conn: &Connection,
        id: ReservationId,
        actor: UserId,
        at: DateTime<Utc>,
    ) -> Result<bool> {
        let changed = conn.execute(
            r"UPDATE reservations
              SET status = 'cancelled', cancelled_at = ?2, cancelled_by = ?3
              WHERE id = ?1 AND status = 'confirmed'",
            params![id, at, actor],
        )?;
        Ok(changed == 1)
    }
}
