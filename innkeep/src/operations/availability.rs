//! Availability of a room type over a date range.

use chrono::NaiveDate;
use rusqlite::Connection;
use serde::Serialize;

use crate::database::Database;
use crate::error::Result;
use crate::ids::RoomTypeId;
use crate::stay::StayDates;

/// Answer to "can this room type still be booked for these nights?".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Availability {
    /// Room type asked about.
    pub room_type_id: RoomTypeId,
    /// Its display name.
    pub room_type_name: String,
    /// First night.
    pub check_in: NaiveDate,
    /// Departure day.
    pub check_out: NaiveDate,
    /// Rooms of the type, whatever their status.
    pub total_count: i64,
    /// Active reservations overlapping the range.
    pub overlapping_count: i64,
    /// `total_count - overlapping_count`.
    pub available_count: i64,
    /// `available_count > 0`.
    pub is_available: bool,
    /// Summary for people.
    pub message: String,
}

/// Counts the rooms of a type still free over `[check_in, check_out)`.
///
/// Read-only. The room type is looked up before the dates are validated,
/// so an unknown type is reported as `NotFound` whatever the dates.
///
/// # Errors
///
/// Returns `NotFound` for an unknown room type, a validation error if
/// `check_out` is not after `check_in` or `check_in` is before `today`,
/// or a database error.
pub fn check_availability(
    conn: &Connection,
    room_type_id: RoomTypeId,
    check_in: NaiveDate,
    check_out: NaiveDate,
    today: NaiveDate,
) -> Result<Availability> {
    let room_type = Database::require_room_type(conn, room_type_id)?;

    let stay = StayDates::new(check_in, check_out)?;
    stay.ensure_not_past(today)?;

    let total_count = Database::room_type_capacity(conn, room_type_id)?;
    let overlapping_count = Database::count_overlapping(conn, room_type_id, &stay)?;
    let available_count = total_count - overlapping_count;

    let message = if total_count == 0 {
        "No rooms of this type".to_string()
    } else {
        format!(
            "{} of {total_count} rooms available",
            available_count.max(0)
        )
    };

    log::debug!(
        "availability of {} for {stay}: {available_count} of {total_count}",
        room_type.code
    );

    Ok(Availability {
        room_type_id,
        room_type_name: room_type.name,
        check_in,
        check_out,
        total_count,
        overlapping_count,
        available_count,
        is_available: available_count > 0,
        message,
    })
}
