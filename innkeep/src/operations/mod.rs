//! Reservation lifecycle operations.
//!
//! [`ReservationManager`] is the entry point for booking, check-in,
//! check-out and cancellation. [`check_availability`] is the read-only
//! availability query it uses, and [`retry_transient`] wraps any of them
//! in a bounded retry for a busy database.
//!
//! # Examples
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use innkeep::{retry_transient, Config, Database, DatabaseConfig, ReservationManager, RoomTypeId};
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/innkeep.db")).unwrap();
//! let config = Config::default();
//!
//! let availability = retry_transient(config.transient_retries(), config.lock_wait_seconds(), || {
//!     ReservationManager::new(&mut db, &config).check_availability(
//!         RoomTypeId::new(1),
//!         NaiveDate::from_ymd_opt(2030, 5, 1).unwrap(),
//!         NaiveDate::from_ymd_opt(2030, 5, 4).unwrap(),
//!     )
//! })
//! .unwrap();
//! println!("{}", availability.message);
//! ```

pub mod availability;
pub mod init;
pub mod lifecycle;
pub mod retry;

#[cfg(test)]
mod proptests;

pub use availability::{check_availability, Availability};
pub use init::{init_database, InitOptions, InitResult};
pub use lifecycle::{BalanceSummary, CheckInOutcome, CheckOutOutcome, ReservationManager};
pub use retry::retry_transient;
