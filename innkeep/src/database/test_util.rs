//! Shared test utilities for database unit tests.

use chrono::{Days, NaiveDate, Utc};
use tempfile::tempdir;

use crate::database::{Database, DatabaseConfig, ReservationDraft};
use crate::ids::{GuestId, UserId};
use crate::inventory::{NewRoom, NewRoomType, Room, RoomType};
use crate::money::Money;
use crate::reservation::{Pricing, Reservation};
use crate::stay::StayDates;

/// Creates a temporary test database that will be cleaned up automatically.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let db = Database::open(DatabaseConfig::new(path)).unwrap();

    // Prevent the TempDir from being dropped immediately
    std::mem::forget(dir);

    db
}

/// Day `n` counted from a fixed date far in the future.
///
/// # Panics
///
/// Never in practice; the base date is valid.
#[must_use]
pub fn date(n: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 3, 1).unwrap() + Days::new(u64::from(n))
}

/// Registers a room type with `rooms` rooms numbered `{code}-1`, `{code}-2`, ...
///
/// # Panics
///
/// Panics if any insert fails.
pub fn seed_room_type(db: &mut Database, code: &str, rooms: usize) -> (RoomType, Vec<Room>) {
    let room_type = db
        .create_room_type(&NewRoomType::new(code, code, Money::new(100_000)))
        .unwrap();
    let rooms = (1..=rooms)
        .map(|n| {
            db.create_room(&NewRoom::new(format!("{code}-{n}"), room_type.id))
                .unwrap()
        })
        .collect();
    (room_type, rooms)
}

/// Inserts one confirmed reservation on a fresh one-room type.
///
/// # Panics
///
/// Panics if any insert fails.
pub fn seed_reservation(db: &mut Database) -> Reservation {
    let (room_type, _) = seed_room_type(db, "SEED", 1);
    let draft = ReservationDraft {
        confirmation_code: "ABCDEF0123".parse().unwrap(),
        guest_id: GuestId::new(1),
        room_type_id: room_type.id,
        stay: StayDates::new(date(1), date(3)).unwrap(),
        adults: 1,
        children: 0,
        special_requests: None,
        rate_per_night: Money::new(500),
        pricing: Pricing::new(Money::new(1_000), Money::ZERO, Money::new(1_000), Money::new(300)),
        created_at: Utc::now(),
        created_by: UserId::new(1),
    };
    let id = Database::insert_reservation(db.connection(), &draft).unwrap();
    Database::require_reservation(db.connection(), id).unwrap()
}
