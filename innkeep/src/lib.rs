#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # innkeep
//!
//! A library for running the reservation lifecycle of a small hotel.
//!
//! Rooms are booked by room type against a date range, assigned to a
//! concrete room at check-in, and settled against the deposit at check-out.
//! Everything is persisted in a local `SQLite` database whose transactions
//! keep two clerks from over-booking a room type or handing out the same
//! room twice.
//!
//! ## Core Types
//!
//! - [`StayDates`]: half-open `[check_in, check_out)` ranges
//! - [`Money`]: integer minor currency units
//! - [`ReservationStatus`] and [`LifecycleEvent`]: the booking state machine
//! - [`Settlement`]: deposit disposition at check-out
//! - [`ReservationManager`]: the lifecycle operations
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use innkeep::{Money, Settlement, SettlementBranch};
//!
//! let settlement = Settlement::compute(
//!     Money::new(1_000_000),
//!     Money::new(900_000),
//!     Money::new(400_000),
//! );
//! assert_eq!(settlement.branch, SettlementBranch::DepositCoversBalance);
//! assert_eq!(settlement.to_refund, Money::new(300_000));
//! assert_eq!(settlement.balance_owed, Money::ZERO);
//! ```

/// Stores a string-backed enum as TEXT using its `as_str` and `FromStr`.
macro_rules! impl_text_column {
    ($ty:ty) => {
        impl rusqlite::types::ToSql for $ty {
            fn to_sql(&self) -> rusqlite::Result<rusqlite::types::ToSqlOutput<'_>> {
                Ok(rusqlite::types::ToSqlOutput::from(self.as_str()))
            }
        }

        impl rusqlite::types::FromSql for $ty {
            fn column_result(
                value: rusqlite::types::ValueRef<'_>,
            ) -> rusqlite::types::FromSqlResult<Self> {
                value
                    .as_str()?
                    .parse()
                    .map_err(|e| rusqlite::types::FromSqlError::Other(Box::new(e)))
            }
        }
    };
}

pub mod actor;
pub mod config;
pub mod database;
pub mod directory;
pub mod error;
pub mod guest;
pub mod ids;
pub mod inventory;
pub mod ledger;
pub mod logging;
pub mod money;
pub mod operations;
pub mod payment;
pub mod reservation;
pub mod settlement;
pub mod stay;

// Re-export key types at crate root for convenience
pub use actor::{Actor, Role};
pub use config::{Config, ConfigBuilder};
pub use database::{Database, DatabaseConfig};
pub use directory::{GuestDirectory, StaticGuestDirectory};
pub use error::{Error, ErrorKind, Result, ValidationError};
pub use guest::{Guest, NewGuest};
pub use ids::{GuestId, PaymentId, ReservationId, RoomId, RoomTypeId, UserId};
pub use inventory::{NewRoom, NewRoomType, Room, RoomStatus, RoomType};
pub use ledger::{PaymentLedger, StaticPaymentLedger};
pub use logging::{init_logger, LogLevel, Logger};
pub use money::Money;
pub use operations::{
    check_availability, retry_transient, Availability, BalanceSummary, CheckInOutcome,
    CheckOutOutcome, ReservationManager,
};
pub use payment::{NewPayment, Payment, PaymentMethod, PaymentStatus, PaymentType};
pub use reservation::{
    BookingRequest, ConfirmationCode, LifecycleEvent, Pricing, Reservation, ReservationStatus,
    TransitionError, TransitionRejection,
};
pub use settlement::{Settlement, SettlementBranch};
pub use stay::StayDates;
