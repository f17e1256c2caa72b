//! Room type and room persistence.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{is_unique_violation, Error, Result};
use crate::ids::{RoomId, RoomTypeId};
use crate::inventory::{NewRoom, NewRoomType, Room, RoomStatus, RoomType};

use super::connection::Database;

const ROOM_TYPE_COLUMNS: &str = "id, code, name, nightly_rate, created_at";
const ROOM_COLUMNS: &str = "id, room_number, room_type_id, floor, status";

fn row_to_room_type(row: &rusqlite::Row<'_>) -> rusqlite::Result<RoomType> {
    Ok(RoomType {
        id: row.get(0)?,
        code: row.get(1)?,
        name: row.get(2)?,
        nightly_rate: row.get(3)?,
        created_at: row.get(4)?,
    })
}

fn row_to_room(row: &rusqlite::Row<'_>) -> rusqlite::Result<Room> {
    Ok(Room {
        id: row.get(0)?,
        room_number: row.get(1)?,
        room_type_id: row.get(2)?,
        floor: row.get(3)?,
        status: row.get(4)?,
    })
}

impl Database {
    /// Registers a room type.
    ///
    /// # Errors
    ///
    /// Returns a validation error for bad fields, a conflict if the code is
    /// taken, or a database error.
    pub fn create_room_type(&mut self, new: &NewRoomType) -> Result<RoomType> {
        new.validate()?;

        let tx = self.begin_transaction()?;
        let inserted = tx.execute(
            "INSERT INTO room_types (code, name, nightly_rate, created_at) VALUES (?, ?, ?, ?)",
            params![new.code, new.name, new.nightly_rate, Utc::now()],
        );
        match inserted {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) => {
                return Err(Error::conflict(format!(
                    "room type code '{}' already exists",
                    new.code
                )));
            }
            Err(e) => return Err(e.into()),
        }
        let id = RoomTypeId::new(tx.last_insert_rowid());
        let room_type = Self::require_room_type(&tx, id)?;
        tx.commit()?;

        log::info!("registered room type {} ({})", room_type.code, room_type.id);
        Ok(room_type)
    }

    /// Retrieves a room type by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_room_type(conn: &Connection, id: RoomTypeId) -> Result<Option<RoomType>> {
        let sql = format!("SELECT {ROOM_TYPE_COLUMNS} FROM room_types WHERE id = ?");
        Ok(conn.query_row(&sql, [id], row_to_room_type).optional()?)
    }

    /// Retrieves a room type by id, failing with `NotFound` if missing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] or a database error.
    pub fn require_room_type(conn: &Connection, id: RoomTypeId) -> Result<RoomType> {
        Self::get_room_type(conn, id)?.ok_or_else(|| Error::not_found(format!("room type {id}")))
    }

    /// Retrieves a room type by its code, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_room_type_by_code(conn: &Connection, code: &str) -> Result<Option<RoomType>> {
        let sql = format!("SELECT {ROOM_TYPE_COLUMNS} FROM room_types WHERE code = ?");
        Ok(conn
            .query_row(&sql, [code.trim().to_uppercase()], row_to_room_type)
            .optional()?)
    }

    /// Lists room types ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_room_types(conn: &Connection) -> Result<Vec<RoomType>> {
        let sql = format!("SELECT {ROOM_TYPE_COLUMNS} FROM room_types ORDER BY id");
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([], row_to_room_type)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Number of rooms of a type, whatever their status.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn room_type_capacity(conn: &Connection, id: RoomTypeId) -> Result<i64> {
        Ok(conn.query_row(
            "SELECT COUNT(*) FROM rooms WHERE room_type_id = ?",
            [id],
            |row| row.get(0),
        )?)
    }

    /// Registers a room in an existing room type.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown room type, a conflict if the room
    /// number is taken, or a database error.
    pub fn create_room(&mut self, new: &NewRoom) -> Result<Room> {
        new.validate()?;

        let tx = self.begin_transaction()?;
        Self::require_room_type(&tx, new.room_type_id)?;

        let inserted = tx.execute(
            "INSERT INTO rooms (room_number, room_type_id, floor, status) VALUES (?, ?, ?, ?)",
            params![
                new.room_number,
                new.room_type_id,
                new.floor,
                RoomStatus::Available
            ],
        );
        match inserted {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) => {
                return Err(Error::conflict(format!(
                    "room number '{}' already exists",
                    new.room_number
                )));
            }
            Err(e) => return Err(e.into()),
        }
        let room = Self::require_room(&tx, RoomId::new(tx.last_insert_rowid()))?;
        tx.commit()?;

        log::info!(
            "registered room {} in room type {}",
            room.room_number,
            room.room_type_id
        );
        Ok(room)
    }

    /// Retrieves a room by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_room(conn: &Connection, id: RoomId) -> Result<Option<Room>> {
        let sql = format!("SELECT {ROOM_COLUMNS} FROM rooms WHERE id = ?");
        Ok(conn.query_row(&sql, [id], row_to_room).optional()?)
    }

    /// Retrieves a room by id, failing with `NotFound` if missing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] or a database error.
    pub fn require_room(conn: &Connection, id: RoomId) -> Result<Room> {
        Self::get_room(conn, id)?.ok_or_else(|| Error::not_found(format!("room {id}")))
    }

    /// Retrieves a room by the number on its door.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_room_by_number(conn: &Connection, room_number: &str) -> Result<Option<Room>> {
        let sql = format!("SELECT {ROOM_COLUMNS} FROM rooms WHERE room_number = ?");
        Ok(conn
            .query_row(&sql, [room_number.trim()], row_to_room)
            .optional()?)
    }

    /// Lists rooms ordered by id, optionally limited to one type.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_rooms(conn: &Connection, room_type_id: Option<RoomTypeId>) -> Result<Vec<Room>> {
        let sql = format!(
            "SELECT {ROOM_COLUMNS} FROM rooms WHERE (?1 IS NULL OR room_type_id = ?1) ORDER BY id"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([room_type_id], row_to_room)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Moves a room between `available` and `out_of_order`.
    ///
    /// `occupied` is owned by check-in and check-out and cannot be set or
    /// cleared here.
    ///
    /// # Errors
    ///
    /// Returns a validation error for `occupied`, `NotFound` for an unknown
    /// room, a conflict if the room is occupied, or a database error.
    pub fn set_room_status(&mut self, id: RoomId, status: RoomStatus) -> Result<Room> {
        if status == RoomStatus::Occupied {
            return Err(Error::validation(
                "status",
                "rooms become occupied only through check-in",
            ));
        }

        let tx = self.begin_transaction()?;
        let room = Self::require_room(&tx, id)?;
        if room.status == RoomStatus::Occupied {
            return Err(Error::conflict(format!(
                "room {} is occupied; check the guest out first",
                room.room_number
            )));
        }
        tx.execute(
            "UPDATE rooms SET status = ? WHERE id = ?",
            params![status, id],
        )?;
        let room = Self::require_room(&tx, id)?;
        tx.commit()?;

        log::info!("room {} is now {}", room.room_number, room.status);
        Ok(room)
    }

    /// Marks a room occupied only if it is still available.
    ///
    /// This single conditional update is what arbitrates two clerks racing
    /// for the same room. Returns `false` if the room was not available.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn claim_room(conn: &Connection, id: RoomId) -> Result<bool> {
        let changed = conn.execute(
            "UPDATE rooms SET status = 'occupied' WHERE id = ? AND status = 'available'",
            [id],
        )?;
        Ok(changed == 1)
    }

    /// Returns an occupied room to service.
    ///
    /// Returns `false` if the room was not occupied.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn release_room(conn: &Connection, id: RoomId) -> Result<bool> {
        let changed = conn.execute(
            "UPDATE rooms SET status = 'available' WHERE id = ? AND status = 'occupied'",
            [id],
        )?;
        Ok(changed == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::create_test_database;
    use crate::money::Money;

    #[test]
    fn test_room_type_round_trip() {
        let mut db = create_test_database();
        let created = db
            .create_room_type(&NewRoomType::new("dlx", "Deluxe", Money::new(250_000)))
            .unwrap();
        assert_eq!(created.code, "DLX");

        let by_code = Database::get_room_type_by_code(db.connection(), "dlx")
            .unwrap()
            .unwrap();
        assert_eq!(by_code.id, created.id);
        assert_eq!(by_code.nightly_rate, Money::new(250_000));
        assert_eq!(Database::list_room_types(db.connection()).unwrap().len(), 1);
    }

    #[test]
    fn test_duplicate_room_type_code_conflicts() {
        let mut db = create_test_database();
        db.create_room_type(&NewRoomType::new("STD", "Standard", Money::new(1)))
            .unwrap();
        let err = db
            .create_room_type(&NewRoomType::new("std", "Standard again", Money::new(1)))
            .unwrap_err();
        assert!(matches!(err, Error::Conflict { .. }));
    }

    #[test]
    fn test_room_requires_existing_type() {
        let mut db = create_test_database();
        let err = db
            .create_room(&NewRoom::new("101", RoomTypeId::new(42)))
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn test_capacity_counts_every_room() {
        let mut db = create_test_database();
        let rt = db
            .create_room_type(&NewRoomType::new("STD", "Standard", Money::new(1)))
            .unwrap();
        let a = db.create_room(&NewRoom::new("101", rt.id)).unwrap();
        db.create_room(&NewRoom::new("102", rt.id)).unwrap();
        db.set_room_status(a.id, RoomStatus::OutOfOrder).unwrap();

        assert_eq!(Database::room_type_capacity(db.connection(), rt.id).unwrap(), 2);
        assert_eq!(Database::list_rooms(db.connection(), Some(rt.id)).unwrap().len(), 2);
        assert_eq!(Database::list_rooms(db.connection(), None).unwrap().len(), 2);
    }

    #[test]
    fn test_room_by_number() {
        let mut db = create_test_database();
        let rt = db
            .create_room_type(&NewRoomType::new("STD", "Standard", Money::new(1)))
            .unwrap();
        let room = db.create_room(&NewRoom::new("204", rt.id)).unwrap();

        let found = Database::get_room_by_number(db.connection(), " 204 ").unwrap();
        assert_eq!(found.map(|r| r.id), Some(room.id));
        assert!(Database::get_room_by_number(db.connection(), "999")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_duplicate_room_number_conflicts() {
        let mut db = create_test_database();
        let rt = db
            .create_room_type(&NewRoomType::new("STD", "Standard", Money::new(1)))
            .unwrap();
        db.create_room(&NewRoom::new("101", rt.id)).unwrap();
        let err = db.create_room(&NewRoom::new("101", rt.id)).unwrap_err();
        assert!(matches!(err, Error::Conflict { .. }));
    }

    #[test]
    fn test_claim_and_release() {
        let mut db = create_test_database();
        let rt = db
            .create_room_type(&NewRoomType::new("STD", "Standard", Money::new(1)))
            .unwrap();
        let room = db.create_room(&NewRoom::new("101", rt.id)).unwrap();

        assert!(Database::claim_room(db.connection(), room.id).unwrap());
        assert!(!Database::claim_room(db.connection(), room.id).unwrap());

        let err = db.set_room_status(room.id, RoomStatus::OutOfOrder).unwrap_err();
        assert!(matches!(err, Error::Conflict { .. }));

        assert!(Database::release_room(db.connection(), room.id).unwrap());
        assert!(!Database::release_room(db.connection(), room.id).unwrap());
    }

    #[test]
    fn test_out_of_order_room_cannot_be_claimed() {
        let mut db = create_test_database();
        let rt = db
            .create_room_type(&NewRoomType::new("STD", "Standard", Money::new(1)))
            .unwrap();
        let room = db.create_room(&NewRoom::new("101", rt.id)).unwrap();
        db.set_room_status(room.id, RoomStatus::OutOfOrder).unwrap();
        assert!(!Database::claim_room(db.connection(), room.id).unwrap());
    }

    #[test]
    fn test_occupied_cannot_be_set_manually() {
        let mut db = create_test_database();
        let err = db
            .set_room_status(RoomId::new(1), RoomStatus::Occupied)
            .unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }
}
