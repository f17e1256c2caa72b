//! Guest records held by the bundled guest directory.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::ids::GuestId;

/// A registered guest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    /// Row id.
    pub id: GuestId,
    /// Name shown on receipts.
    pub full_name: String,
    /// Optional e-mail address.
    pub email: Option<String>,
    /// Optional phone number.
    pub phone: Option<String>,
    /// When the guest was registered.
    pub created_at: DateTime<Utc>,
}

/// Parameters for registering a guest.
#[derive(Debug, Clone, Default)]
pub struct NewGuest {
    /// Full name.
    pub full_name: String,
    /// Optional e-mail address.
    pub email: Option<String>,
    /// Optional phone number.
    pub phone: Option<String>,
}

impl NewGuest {
    /// Creates the parameters with just a name.
    #[must_use]
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into().trim().to_string(),
            email: None,
            phone: None,
        }
    }

    /// Sets the e-mail address. Blank values are dropped.
    #[must_use]
    pub fn with_email(mut self, email: Option<String>) -> Self {
        self.email = email.map(|e| e.trim().to_string()).filter(|e| !e.is_empty());
        self
    }

    /// Sets the phone number. Blank values are dropped.
    #[must_use]
    pub fn with_phone(mut self, phone: Option<String>) -> Self {
        self.phone = phone.map(|p| p.trim().to_string()).filter(|p| !p.is_empty());
        self
    }

    /// Checks the field rules.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` for an empty name or an e-mail without `@`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.full_name.is_empty() {
            return Err(ValidationError::new("full_name", "guest name must be non-empty"));
        }
        if let Some(ref email) = self.email {
            if !email.contains('@') {
                return Err(ValidationError::new(
                    "email",
                    format!("'{email}' is not an e-mail address"),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_guest_validation() {
        assert!(NewGuest::new("Ada Lovelace").validate().is_ok());
        assert!(NewGuest::new("   ").validate().is_err());
        let bad = NewGuest::new("Ada").with_email(Some("nope".into()));
        assert_eq!(bad.validate().unwrap_err().field, "email");
    }

    #[test]
    fn test_blank_contact_fields_are_dropped() {
        let guest = NewGuest::new("Ada")
            .with_email(Some("  ".into()))
            .with_phone(Some(" 555-0100 ".into()));
        assert_eq!(guest.email, None);
        assert_eq!(guest.phone.as_deref(), Some("555-0100"));
    }
}
