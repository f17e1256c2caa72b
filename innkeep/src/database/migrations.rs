//! Database schema management and migrations.
//!
//! This module handles database schema initialization and version checking.

use rusqlite::Connection;

use crate::error::{Error, Result};

use super::schema::{
    CREATE_AVAILABILITY_INDEX, CREATE_GUESTS_TABLE, CREATE_GUEST_INDEX, CREATE_IN_HOUSE_INDEX,
    CREATE_METADATA_TABLE, CREATE_PAYMENTS_TABLE, CREATE_PAYMENT_RESERVATION_INDEX,
    CREATE_RESERVATIONS_TABLE, CREATE_ROOMS_TABLE, CREATE_ROOM_TYPES_TABLE,
    CURRENT_SCHEMA_VERSION, INSERT_SCHEMA_VERSION, SELECT_SCHEMA_VERSION,
};

/// Initializes the database schema.
///
/// Creates all tables, indices and the version row in one batch.
///
/// # Errors
///
/// Returns an error if any SQL statement fails to execute.
///
/// # Examples
///
/// ```no_run
/// use rusqlite::Connection;
/// use innkeep::database::migrations::initialize_schema;
///
/// let conn = Connection::open_in_memory().unwrap();
/// initialize_schema(&conn).unwrap();
/// ```
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    log::debug!("initializing schema version {CURRENT_SCHEMA_VERSION}");

    conn.execute(CREATE_METADATA_TABLE, [])?;
    conn.execute(CREATE_ROOM_TYPES_TABLE, [])?;
    conn.execute(CREATE_ROOMS_TABLE, [])?;
    conn.execute(CREATE_GUESTS_TABLE, [])?;
    conn.execute(CREATE_RESERVATIONS_TABLE, [])?;
    conn.execute(CREATE_PAYMENTS_TABLE, [])?;

    conn.execute(CREATE_AVAILABILITY_INDEX, [])?;
    conn.execute(CREATE_IN_HOUSE_INDEX, [])?;
    conn.execute(CREATE_GUEST_INDEX, [])?;
    conn.execute(CREATE_PAYMENT_RESERVATION_INDEX, [])?;

    conn.execute(INSERT_SCHEMA_VERSION, [CURRENT_SCHEMA_VERSION])?;

    Ok(())
}

/// Gets the current schema version from the database.
///
/// # Errors
///
/// Returns an error if the query fails for reasons other than a missing
/// metadata table or row (both of which mean version 0).
pub fn get_schema_version(conn: &Connection) -> Result<i32> {
    let has_metadata: bool = conn.query_row(
        "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'metadata')",
        [],
        |row| row.get(0),
    )?;
    if !has_metadata {
        return Ok(0);
    }

    match conn.query_row(SELECT_SCHEMA_VERSION, [], |row| {
        let value: String = row.get(0)?;
        value.parse::<i32>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })
    }) {
        Ok(version) => Ok(version),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
        Err(e) => Err(e.into()),
    }
}

/// Checks schema compatibility and initializes if needed.
///
/// A fresh database is initialized; any version other than the current one
/// is rejected with [`Error::UnsupportedSchemaVersion`].
///
/// # Errors
///
/// Returns an error if the version is incompatible or initialization fails.
pub fn check_schema_compatibility(conn: &Connection) -> Result<()> {
    let version = get_schema_version(conn)?;

    if version == 0 {
        initialize_schema(conn)?;
    } else if version != CURRENT_SCHEMA_VERSION {
        return Err(Error::UnsupportedSchemaVersion {
            expected: CURRENT_SCHEMA_VERSION,
            found: version,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_connection() -> Connection {
        Connection::open_in_memory().unwrap()
    }

    #[test]
    fn test_initialize_schema() {
        let conn = create_test_connection();
        initialize_schema(&conn).unwrap();

        assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_SCHEMA_VERSION);

        for table in ["room_types", "rooms", "guests", "reservations", "payments"] {
            let count: i64 = conn
                .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
                .unwrap();
            assert_eq!(count, 0, "table {table} should start empty");
        }
    }

    #[test]
    fn test_get_schema_version_uninitialized() {
        let conn = create_test_connection();
        assert_eq!(get_schema_version(&conn).unwrap(), 0);
    }

    #[test]
    fn test_check_schema_compatibility_fresh_database() {
        let conn = create_test_connection();
        check_schema_compatibility(&conn).unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_SCHEMA_VERSION);
    }

    #[test]
    fn test_check_schema_compatibility_is_idempotent() {
        let conn = create_test_connection();
        check_schema_compatibility(&conn).unwrap();
        check_schema_compatibility(&conn).unwrap();
    }

    #[test]
    fn test_check_schema_compatibility_newer_version() {
        let conn = create_test_connection();
        initialize_schema(&conn).unwrap();
        conn.execute(INSERT_SCHEMA_VERSION, [CURRENT_SCHEMA_VERSION + 1])
            .unwrap();

        match check_schema_compatibility(&conn) {
            Err(Error::UnsupportedSchemaVersion { expected, found }) => {
                assert_eq!(expected, CURRENT_SCHEMA_VERSION);
                assert_eq!(found, CURRENT_SCHEMA_VERSION + 1);
            }
            other => panic!("expected UnsupportedSchemaVersion, got {other:?}"),
        }
    }

    #[test]
    fn test_reservation_checks_reject_bad_rows() {
        let conn = create_test_connection();
        initialize_schema(&conn).unwrap();
        conn.execute(
            "INSERT INTO room_types (code, name, nightly_rate, created_at) VALUES ('STD', 'Standard', 100, '2030-01-01T00:00:00Z')",
            [],
        )
        .unwrap();

        // total != subtotal - discount
        let result = conn.execute(
            r"INSERT INTO reservations (confirmation_code, guest_id, room_type_id,
                check_in_date, check_out_date, status, rate_per_night, subtotal,
                discount_amount, total_amount, deposit_amount, created_at, created_by)
              VALUES ('AAAAAAAAAA', 1, 1, '2030-01-01', '2030-01-03', 'confirmed',
                100, 200, 10, 200, 0, '2030-01-01T00:00:00Z', 1)",
            [],
        );
        assert!(result.is_err());

        // check-out not after check-in
        let result = conn.execute(
            r"INSERT INTO reservations (confirmation_code, guest_id, room_type_id,
                check_in_date, check_out_date, status, rate_per_night, subtotal,
                discount_amount, total_amount, deposit_amount, created_at, created_by)
              VALUES ('BBBBBBBBBB', 1, 1, '2030-01-03', '2030-01-03', 'confirmed',
                100, 200, 0, 200, 0, '2030-01-01T00:00:00Z', 1)",
            [],
        );
        assert!(result.is_err());
    }
}
