//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including configuration loading, database management, lookups by
//! human-friendly keys, and output helpers.

use crate::error::CliError;
use chrono::{DateTime, Utc};
use innkeep::database::{resolve_data_dir, DATABASE_FILE_NAME};
use innkeep::{
    retry_transient, Actor, Config, ConfigBuilder, ConfirmationCode, Database, DatabaseConfig,
    Reservation, ReservationId, Role, Room, RoomType, RoomTypeId, UserId,
};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
#[allow(dead_code)] // `verbose` is consumed by the logger before dispatch
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the busy timeout (in seconds).
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization.
    pub disable_autoinit: bool,

    /// User recorded on changes.
    pub actor: UserId,

    /// Role of that user.
    pub role: Role,

    /// Print JSON instead of text.
    pub json: bool,
}

impl GlobalOptions {
    /// The acting user.
    pub fn actor(&self) -> Actor {
        Actor::new(self.actor).with_role(self.role)
    }
}

/// Resolve the data directory: `--data-dir`, then `INNKEEP_DATA_DIR`, then `~/.innkeep`.
pub fn data_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    match global.data_dir {
        Some(ref dir) => Ok(dir.clone()),
        None => resolve_data_dir().map_err(|e| CliError::Config(e.to_string())),
    }
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Environment variables
/// 2. Property `innkeep.yaml` above the working directory
/// 3. `config.yaml` in the data directory
/// 4. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let data_dir = data_dir(global)?;

    ConfigBuilder::new()
        .with_data_dir(&data_dir)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Open database with configuration.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the database doesn't exist and auto-init is disabled.
pub fn open_database(global: &GlobalOptions, config: &Config) -> Result<Database, CliError> {
    let db_path = data_dir(global)?.join(DATABASE_FILE_NAME);

    if !db_path.exists() && (global.disable_autoinit || config.disable_autoinit()) {
        return Err(CliError::NoDataDirectory);
    }

    let timeout_seconds = global
        .busy_timeout
        .map_or_else(|| config.lock_wait_seconds(), u64::from);
    let db_config =
        DatabaseConfig::new(db_path).with_busy_timeout(Duration::from_secs(timeout_seconds));

    Database::open(db_config).map_err(CliError::from)
}

/// Run a mutating operation with the configured transient retry.
pub fn with_retry<T, F>(config: &Config, op: F) -> Result<T, CliError>
where
    F: FnMut() -> innkeep::Result<T>,
{
    retry_transient(config.transient_retries(), config.lock_wait_seconds(), op)
        .map_err(CliError::from)
}

/// Find a room type by numeric id or by code.
pub fn find_room_type(db: &Database, key: &str) -> Result<RoomType, CliError> {
    let conn = db.connection();
    if let Ok(id) = key.parse::<RoomTypeId>() {
        return Ok(Database::require_room_type(conn, id)?);
    }
    Database::get_room_type_by_code(conn, key)?.ok_or_else(|| {
        CliError::from(innkeep::Error::NotFound {
            resource: format!("room type {key}"),
        })
    })
}

/// Find a room by the number on its door.
pub fn find_room(db: &Database, number: &str) -> Result<Room, CliError> {
    Database::get_room_by_number(db.connection(), number)?.ok_or_else(|| {
        CliError::from(innkeep::Error::NotFound {
            resource: format!("room {number}"),
        })
    })
}

/// Find a reservation by confirmation code or by numeric id.
pub fn find_reservation(db: &Database, key: &str) -> Result<Reservation, CliError> {
    let conn = db.connection();
    if key.trim().len() == ConfirmationCode::LEN {
        if let Ok(code) = key.parse::<ConfirmationCode>() {
            if let Some(reservation) = Database::get_reservation_by_code(conn, &code)? {
                return Ok(reservation);
            }
        }
    }
    match key.parse::<ReservationId>() {
        Ok(id) => Ok(Database::require_reservation(conn, id)?),
        Err(_) => Err(CliError::from(innkeep::Error::NotFound {
            resource: format!("reservation {key}"),
        })),
    }
}

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer_pretty(&mut handle, value)?;
    writeln!(handle)?;
    Ok(())
}

/// Format a timestamp for display.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_timestamp() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 45).unwrap();
        assert_eq!(format_timestamp(ts), "2024-01-15 10:30:45");
    }

    #[test]
    fn test_explicit_data_dir_wins() {
        let global = GlobalOptions {
            verbose: false,
            quiet: false,
            data_dir: Some(PathBuf::from("/srv/hotel")),
            busy_timeout: None,
            disable_autoinit: false,
            actor: UserId::new(2),
            role: Role::Manager,
            json: false,
        };
        assert_eq!(data_dir(&global).unwrap(), PathBuf::from("/srv/hotel"));
        assert_eq!(global.actor().role, Role::Manager);
    }
}
