//! Common test utilities for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use chrono::{Days, NaiveDate};
use innkeep::{
    Actor, Config, Database, DatabaseConfig, GuestId, Money, NewGuest, NewRoom, NewRoomType,
    Pricing, Role, Room, RoomType, UserId,
};
use tempfile::TempDir;

/// The date the tests treat as today.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 3, 1).unwrap()
}

/// Day `n` after [`today`].
pub fn day(n: u32) -> NaiveDate {
    today() + Days::new(u64::from(n))
}

/// A front desk clerk.
pub fn clerk() -> Actor {
    Actor::new(UserId::new(3))
}

/// A manager.
pub fn manager() -> Actor {
    Actor::new(UserId::new(4)).with_role(Role::Manager)
}

/// Price breakdown with no discount.
pub fn priced(total: i64, deposit: i64) -> Pricing {
    Pricing::new(
        Money::new(total),
        Money::ZERO,
        Money::new(total),
        Money::new(deposit),
    )
}

/// A hotel database in its own temporary directory.
pub struct TestHotel {
    _dir: TempDir,
    path: PathBuf,
    pub config: Config,
}

impl TestHotel {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("innkeep.db");
        Database::open(DatabaseConfig::new(&path)).unwrap();
        Self {
            _dir: dir,
            path,
            config: Config::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens another connection to the same database.
    pub fn open(&self) -> Database {
        Database::open(DatabaseConfig::new(&self.path)).unwrap()
    }

    pub fn seed_type(&self, code: &str, name: &str, rooms: usize) -> (RoomType, Vec<Room>) {
        let mut db = self.open();
        let room_type = db
            .create_room_type(&NewRoomType::new(code, name, Money::new(250_000)))
            .unwrap();
        let rooms = (1..=rooms)
            .map(|n| {
                db.create_room(&NewRoom::new(format!("{code}{n:02}"), room_type.id))
                    .unwrap()
            })
            .collect();
        (room_type, rooms)
    }

    pub fn seed_guest(&self, name: &str) -> GuestId {
        self.open().create_guest(&NewGuest::new(name)).unwrap().id
    }
}
