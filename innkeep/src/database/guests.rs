//! Guest persistence for the bundled guest directory.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{Error, Result};
use crate::guest::{Guest, NewGuest};
use crate::ids::GuestId;

use super::connection::Database;

const GUEST_COLUMNS: &str = "id, full_name, email, phone, created_at";

fn row_to_guest(row: &rusqlite::Row<'_>) -> rusqlite::Result<Guest> {
    Ok(Guest {
        id: row.get(0)?,
        full_name: row.get(1)?,
        email: row.get(2)?,
        phone: row.get(3)?,
        created_at: row.get(4)?,
    })
}

impl Database {
    /// Registers a guest.
    ///
    /// # Errors
    ///
    /// Returns a validation error for bad fields or a database error.
    pub fn create_guest(&mut self, new: &NewGuest) -> Result<Guest> {
        new.validate()?;

        let tx = self.begin_transaction()?;
        tx.execute(
            "INSERT INTO guests (full_name, email, phone, created_at) VALUES (?, ?, ?, ?)",
            params![new.full_name, new.email, new.phone, Utc::now()],
        )?;
        let id = GuestId::new(tx.last_insert_rowid());
        let guest = Self::get_guest(&tx, id)?
            .ok_or_else(|| Error::not_found(format!("guest {id}")))?;
        tx.commit()?;

        log::info!("registered guest {}", guest.id);
        Ok(guest)
    }

    /// Retrieves a guest by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_guest(conn: &Connection, id: GuestId) -> Result<Option<Guest>> {
        let sql = format!("SELECT {GUEST_COLUMNS} FROM guests WHERE id = ?");
        Ok(conn.query_row(&sql, [id], row_to_guest).optional()?)
    }

    /// Lists guests ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_guests(conn: &Connection) -> Result<Vec<Guest>> {
        let sql = format!("SELECT {GUEST_COLUMNS} FROM guests ORDER BY id");
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([], row_to_guest)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}
