//! Room types and concrete rooms.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::ids::{RoomId, RoomTypeId};
use crate::money::Money;

/// Operational state of a concrete room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    /// Ready to receive a guest.
    Available,
    /// Held by a checked-in reservation.
    Occupied,
    /// Withdrawn from service.
    OutOfOrder,
}

impl RoomStatus {
    /// Returns the stored name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Occupied => "occupied",
            Self::OutOfOrder => "out_of_order",
        }
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "available" => Ok(Self::Available),
            "occupied" => Ok(Self::Occupied),
            "out_of_order" => Ok(Self::OutOfOrder),
            _ => Err(ValidationError::new(
                "status",
                format!("unknown room status '{s}'"),
            )),
        }
    }
}

impl_text_column!(RoomStatus);

/// A class of rooms sharing a nightly rate and a capacity pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomType {
    /// Row id.
    pub id: RoomTypeId,
    /// Unique short code, e.g. `DLX`.
    pub code: String,
    /// Display name, e.g. `Deluxe`.
    pub name: String,
    /// Default nightly rate.
    pub nightly_rate: Money,
    /// When the type was registered.
    pub created_at: DateTime<Utc>,
}

/// A physical room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Row id.
    pub id: RoomId,
    /// Unique room number as shown on the door.
    pub room_number: String,
    /// The pool this room belongs to.
    pub room_type_id: RoomTypeId,
    /// Optional floor number.
    pub floor: Option<i64>,
    /// Current operational state.
    pub status: RoomStatus,
}

/// Parameters for registering a room type.
#[derive(Debug, Clone)]
pub struct NewRoomType {
    /// Unique short code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Default nightly rate.
    pub nightly_rate: Money,
}

impl NewRoomType {
    /// Creates the parameters, trimming the text fields.
    #[must_use]
    pub fn new(code: impl Into<String>, name: impl Into<String>, nightly_rate: Money) -> Self {
        Self {
            code: code.into().trim().to_uppercase(),
            name: name.into().trim().to_string(),
            nightly_rate,
        }
    }

    /// Checks the field rules.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` for an empty code or name, or a negative rate.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.code.is_empty() {
            return Err(ValidationError::new("code", "room type code must be non-empty"));
        }
        if self.code.len() > 16 {
            return Err(ValidationError::new(
                "code",
                "room type code must be at most 16 characters",
            ));
        }
        if self.name.is_empty() {
            return Err(ValidationError::new("name", "room type name must be non-empty"));
        }
        self.nightly_rate
            .ensure_non_negative("nightly_rate")?
            .ensure_within_limit("nightly_rate")?;
        Ok(())
    }
}

/// Parameters for registering a room.
#[derive(Debug, Clone)]
pub struct NewRoom {
    /// Unique room number.
    pub room_number: String,
    /// Pool the room joins.
    pub room_type_id: RoomTypeId,
    /// Optional floor.
    pub floor: Option<i64>,
}

impl NewRoom {
    /// Creates the parameters.
    #[must_use]
    pub fn new(room_number: impl Into<String>, room_type_id: RoomTypeId) -> Self {
        Self {
            room_number: room_number.into().trim().to_string(),
            room_type_id,
            floor: None,
        }
    }

    /// Sets the floor.
    #[must_use]
    pub const fn with_floor(mut self, floor: Option<i64>) -> Self {
        self.floor = floor;
        self
    }

    /// Checks the field rules.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` for an empty room number.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.room_number.is_empty() {
            return Err(ValidationError::new(
                "room_number",
                "room number must be non-empty",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_status_round_trip_names() {
        for status in [RoomStatus::Available, RoomStatus::Occupied, RoomStatus::OutOfOrder] {
            assert_eq!(status.as_str().parse::<RoomStatus>().unwrap(), status);
        }
        assert_eq!("out-of-order".parse::<RoomStatus>().unwrap(), RoomStatus::OutOfOrder);
        assert!("dirty".parse::<RoomStatus>().is_err());
    }

    #[test]
    fn test_new_room_type_normalizes_and_validates() {
        let rt = NewRoomType::new(" dlx ", " Deluxe ", Money::new(250_000));
        assert_eq!(rt.code, "DLX");
        assert_eq!(rt.name, "Deluxe");
        assert!(rt.validate().is_ok());

        let bad = NewRoomType::new("STD", "Standard", Money::new(-1));
        assert_eq!(bad.validate().unwrap_err().field, "nightly_rate");
        assert!(NewRoomType::new("", "x", Money::ZERO).validate().is_err());
    }

    #[test]
    fn test_new_room_requires_number() {
        assert!(NewRoom::new("  ", RoomTypeId::new(1)).validate().is_err());
        let room = NewRoom::new("101", RoomTypeId::new(1)).with_floor(Some(1));
        assert!(room.validate().is_ok());
        assert_eq!(room.floor, Some(1));
    }
}
