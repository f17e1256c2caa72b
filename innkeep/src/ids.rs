//! Strongly typed row identifiers.

use std::fmt;
use std::str::FromStr;

use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw row id.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw row id.
            #[must_use]
            pub const fn value(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().parse::<i64>() {
                    Ok(value) if value > 0 => Ok(Self(value)),
                    _ => Err(ValidationError::new(
                        $field,
                        format!("'{s}' is not a valid id"),
                    )),
                }
            }
        }

        impl ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                Ok(ToSqlOutput::from(self.0))
            }
        }

        impl FromSql for $name {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                i64::column_result(value).map(Self)
            }
        }
    };
}

define_id!(
    /// Identifier of a reservation.
    ReservationId,
    "reservation_id"
);
define_id!(
    /// Identifier of a concrete room.
    RoomId,
    "room_id"
);
define_id!(
    /// Identifier of a room type.
    RoomTypeId,
    "room_type_id"
);
define_id!(
    /// Identifier of a guest in the guest directory.
    GuestId,
    "guest_id"
);
define_id!(
    /// Identifier of an authenticated staff user.
    UserId,
    "user_id"
);
define_id!(
    /// Identifier of a recorded payment.
    PaymentId,
    "payment_id"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ids() {
        assert_eq!("17".parse::<RoomId>().unwrap(), RoomId::new(17));
        assert_eq!(" 3 ".parse::<GuestId>().unwrap().value(), 3);
        assert_eq!("0".parse::<ReservationId>().unwrap_err().field, "reservation_id");
        assert!("-4".parse::<PaymentId>().is_err());
        assert!("x".parse::<UserId>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(RoomTypeId::new(5).to_string(), "5");
    }
}
