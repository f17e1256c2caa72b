//! Guest directory collaborator.
//!
//! The lifecycle engine only needs to know whether a guest exists and what
//! to call them. The production directory is the `guests` table; tests can
//! substitute [`StaticGuestDirectory`].

use std::collections::HashMap;

use crate::database::Database;
use crate::error::Result;
use crate::ids::GuestId;

/// Lookup of guests by id.
///
/// # Examples
///
/// ```
/// use innkeep::{GuestDirectory, GuestId, StaticGuestDirectory};
///
/// let directory = StaticGuestDirectory::new().with_guest(GuestId::new(1), "Ada Lovelace");
/// assert!(directory.guest_exists(GuestId::new(1)).unwrap());
/// assert_eq!(directory.guest_name(GuestId::new(2)).unwrap(), None);
/// ```
pub trait GuestDirectory {
    /// Returns `true` if the guest exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be queried.
    fn guest_exists(&self, id: GuestId) -> Result<bool> {
        Ok(self.guest_name(id)?.is_some())
    }

    /// Returns the guest's display name, or `None` if unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be queried.
    fn guest_name(&self, id: GuestId) -> Result<Option<String>>;
}

impl GuestDirectory for Database {
    fn guest_name(&self, id: GuestId) -> Result<Option<String>> {
        Ok(Self::get_guest(self.connection(), id)?.map(|g| g.full_name))
    }
}

/// In-memory directory with a fixed set of guests.
#[derive(Debug, Clone, Default)]
pub struct StaticGuestDirectory {
    guests: HashMap<GuestId, String>,
}

impl StaticGuestDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a guest.
    #[must_use]
    pub fn with_guest(mut self, id: GuestId, name: impl Into<String>) -> Self {
        self.guests.insert(id, name.into());
        self
    }
}

impl GuestDirectory for StaticGuestDirectory {
    fn guest_name(&self, id: GuestId) -> Result<Option<String>> {
        Ok(self.guests.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::create_test_database;
    use crate::guest::NewGuest;

    #[test]
    fn test_database_directory() {
        let mut db = create_test_database();
        let guest = db.create_guest(&NewGuest::new("Grace Hopper")).unwrap();

        assert!(db.guest_exists(guest.id).unwrap());
        assert_eq!(
            db.guest_name(guest.id).unwrap().as_deref(),
            Some("Grace Hopper")
        );
        assert!(!db.guest_exists(GuestId::new(guest.id.value() + 1)).unwrap());
    }

    #[test]
    fn test_static_directory() {
        let directory = StaticGuestDirectory::new()
            .with_guest(GuestId::new(4), "Ada")
            .with_guest(GuestId::new(5), "Grace");
        assert!(directory.guest_exists(GuestId::new(5)).unwrap());
        assert!(!directory.guest_exists(GuestId::new(6)).unwrap());
    }
}
