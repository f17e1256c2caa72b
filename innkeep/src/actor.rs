//! The authenticated staff member performing an operation.
//!
//! Identity is resolved by the caller; the engine trusts the actor it is
//! handed and only records it on the rows it mutates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::ids::UserId;

/// Role of the acting user, recorded in logs only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Front-desk clerk.
    #[default]
    FrontDesk,
    /// Property manager.
    Manager,
    /// Administrator.
    Admin,
}

impl Role {
    /// Returns the canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FrontDesk => "front_desk",
            Self::Manager => "manager",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "front_desk" => Ok(Self::FrontDesk),
            "manager" => Ok(Self::Manager),
            "admin" => Ok(Self::Admin),
            _ => Err(ValidationError::new("role", format!("unknown role '{s}'"))),
        }
    }
}

/// The user on whose behalf an operation runs.
///
/// # Examples
///
/// ```
/// use innkeep::{Actor, Role, UserId};
///
/// let actor = Actor::new(UserId::new(7)).with_role(Role::Manager);
/// assert_eq!(actor.to_string(), "user 7 (manager)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The acting user's id.
    pub id: UserId,
    /// The acting user's role.
    pub role: Role,
}

impl Actor {
    /// Creates an actor with the default front-desk role.
    #[must_use]
    pub const fn new(id: UserId) -> Self {
        Self {
            id,
            role: Role::FrontDesk,
        }
    }

    /// Sets the role.
    #[must_use]
    pub const fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "user {} ({})", self.id, self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!("front-desk".parse::<Role>().unwrap(), Role::FrontDesk);
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert!("janitor".parse::<Role>().is_err());
    }

    #[test]
    fn test_actor_defaults_to_front_desk() {
        let actor = Actor::new(UserId::new(1));
        assert_eq!(actor.role, Role::FrontDesk);
    }
}
