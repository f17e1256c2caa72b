//! Database layer for persistent storage of hotel inventory and bookings.
//!
//! This module provides a SQLite-based storage layer: connection management,
//! schema versioning, and row-level operations for room types, rooms,
//! guests, reservations and payments.
//!
//! Functions taking a `&Connection` never open a transaction, so they can
//! be composed inside one started with [`Database::begin_transaction`].
//! Methods taking `&mut self` run in their own transaction.
//!
//! # Examples
//!
//! ```no_run
//! use innkeep::database::{Database, DatabaseConfig};
//! use innkeep::inventory::NewRoomType;
//! use innkeep::Money;
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/innkeep.db")).unwrap();
//! let deluxe = db
//!     .create_room_type(&NewRoomType::new("DLX", "Deluxe", Money::new(250_000)))
//!     .unwrap();
//!
//! for room_type in Database::list_room_types(db.connection()).unwrap() {
//!     println!("{} {}", room_type.code, room_type.name);
//! }
//! # let _ = deluxe;
//! ```

mod config;
mod connection;
mod guests;
mod inventory;
pub mod migrations;
mod payments;
mod reservations;
mod schema;

#[cfg(test)]
pub(crate) mod test_util;

// Re-export public API
pub use config::{
    default_data_dir, resolve_data_dir, resolve_database_path, DatabaseConfig, DATABASE_FILE_NAME,
    DATA_DIR_ENV,
};
pub use connection::Database;
pub use reservations::{ReservationDraft, ReservationFilter, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

// Re-export migration functions for advanced use cases
pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
pub use schema::CURRENT_SCHEMA_VERSION;
