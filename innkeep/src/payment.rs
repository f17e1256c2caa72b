//! Payments recorded against reservations.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::ids::{PaymentId, ReservationId, UserId};
use crate::money::Money;

/// Kind of a payment row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    /// Money taken at booking.
    Deposit,
    /// Ordinary payment toward the balance.
    Payment,
    /// Manual correction; the only kind that may be negative.
    Adjustment,
    /// Money returned to the guest. Never counts as paid.
    Refund,
}

impl PaymentType {
    /// Returns the stored name of the type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::Payment => "payment",
            Self::Adjustment => "adjustment",
            Self::Refund => "refund",
        }
    }

    /// Returns `true` if rows of this type count toward the amount paid.
    #[must_use]
    pub const fn counts_as_paid(self) -> bool {
        !matches!(self, Self::Refund)
    }
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "deposit" => Ok(Self::Deposit),
            "payment" => Ok(Self::Payment),
            "adjustment" => Ok(Self::Adjustment),
            "refund" => Ok(Self::Refund),
            _ => Err(ValidationError::new(
                "payment_type",
                format!("unknown payment type '{s}'"),
            )),
        }
    }
}

impl_text_column!(PaymentType);

/// How the money changed hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash.
    Cash,
    /// Credit card.
    CreditCard,
    /// Debit card.
    DebitCard,
    /// Bank transfer.
    BankTransfer,
    /// Electronic wallet.
    EWallet,
    /// Anything else.
    Other,
}

impl PaymentMethod {
    /// Returns the stored name of the method.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::CreditCard => "credit_card",
            Self::DebitCard => "debit_card",
            Self::BankTransfer => "bank_transfer",
            Self::EWallet => "e_wallet",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "cash" => Ok(Self::Cash),
            "credit_card" => Ok(Self::CreditCard),
            "debit_card" => Ok(Self::DebitCard),
            "bank_transfer" => Ok(Self::BankTransfer),
            "e_wallet" | "ewallet" => Ok(Self::EWallet),
            "other" => Ok(Self::Other),
            _ => Err(ValidationError::new(
                "method",
                format!("unknown payment method '{s}'"),
            )),
        }
    }
}

impl_text_column!(PaymentMethod);

/// A recorded payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Row id.
    pub id: PaymentId,
    /// Reservation the payment belongs to.
    pub reservation_id: ReservationId,
    /// Signed amount; negative only for adjustments.
    pub amount: Money,
    /// Kind of payment.
    pub payment_type: PaymentType,
    /// How it was paid.
    pub method: Option<PaymentMethod>,
    /// External reference such as a card slip number.
    pub reference: Option<String>,
    /// Voided payments no longer count.
    pub voided: bool,
    /// When the payment was taken.
    pub created_at: DateTime<Utc>,
    /// Clerk who took it.
    pub created_by: UserId,
}

impl Payment {
    /// Returns `true` if this row contributes to the amount paid.
    #[must_use]
    pub const fn counts_as_paid(&self) -> bool {
        !self.voided && self.payment_type.counts_as_paid()
    }
}

/// Parameters for recording a payment.
#[derive(Debug, Clone)]
pub struct NewPayment {
    /// Reservation being paid.
    pub reservation_id: ReservationId,
    /// Signed amount.
    pub amount: Money,
    /// Kind of payment.
    pub payment_type: PaymentType,
    /// How it was paid.
    pub method: Option<PaymentMethod>,
    /// External reference.
    pub reference: Option<String>,
}

impl NewPayment {
    /// Creates the parameters.
    #[must_use]
    pub const fn new(reservation_id: ReservationId, amount: Money, payment_type: PaymentType) -> Self {
        Self {
            reservation_id,
            amount,
            payment_type,
            method: None,
            reference: None,
        }
    }

    /// Sets the method.
    #[must_use]
    pub const fn with_method(mut self, method: Option<PaymentMethod>) -> Self {
        self.method = method;
        self
    }

    /// Sets the external reference. Blank text is dropped.
    #[must_use]
    pub fn with_reference(mut self, reference: Option<String>) -> Self {
        self.reference = reference
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());
        self
    }

    /// Checks the sign rule: only adjustments may be negative, nothing may be
    /// zero, and no amount may exceed [`Money::LIMIT`] either way.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` on field `amount`.
    ///
    /// # Examples
    ///
    /// ```
    /// use innkeep::{Money, NewPayment, PaymentType, ReservationId};
    ///
    /// let id = ReservationId::new(1);
    /// assert!(NewPayment::new(id, Money::new(-500), PaymentType::Adjustment).validate().is_ok());
    /// assert!(NewPayment::new(id, Money::new(-500), PaymentType::Payment).validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.amount.is_zero() {
            return Err(ValidationError::new("amount", "amount must not be zero"));
        }
        self.amount.ensure_within_limit("amount")?;
        if self.amount.is_negative() && self.payment_type != PaymentType::Adjustment {
            return Err(ValidationError::new(
                "amount",
                format!(
                    "negative amounts are only allowed for adjustments, not {}",
                    self.payment_type
                ),
            ));
        }
        Ok(())
    }
}

/// How much of a reservation has been paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Nothing left to pay.
    FullyPaid,
    /// Something paid, something left.
    PartialPaid,
    /// Nothing paid.
    Unpaid,
}

impl PaymentStatus {
    /// Derives the status from the total due and the amount paid.
    ///
    /// # Examples
    ///
    /// ```
    /// use innkeep::{Money, PaymentStatus};
    ///
    /// let total = Money::new(1_000);
    /// assert_eq!(PaymentStatus::from_amounts(total, Money::new(1_000)), PaymentStatus::FullyPaid);
    /// assert_eq!(PaymentStatus::from_amounts(total, Money::new(1)), PaymentStatus::PartialPaid);
    /// assert_eq!(PaymentStatus::from_amounts(total, Money::ZERO), PaymentStatus::Unpaid);
    /// ```
    #[must_use]
    pub fn from_amounts(total: Money, paid: Money) -> Self {
        if (total - paid) <= Money::ZERO {
            Self::FullyPaid
        } else if paid.is_positive() {
            Self::PartialPaid
        } else {
            Self::Unpaid
        }
    }

    /// Returns the canonical name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FullyPaid => "fully_paid",
            Self::PartialPaid => "partial_paid",
            Self::Unpaid => "unpaid",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
