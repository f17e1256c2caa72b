//! Reservation records and the reservation state machine.
//!
//! A reservation is born [`ReservationStatus::Confirmed`] and can only move
//! along the edges encoded in [`ReservationStatus::apply`]:
//!
//! ```text
//! confirmed ──check-in──▶ checked_in ──check-out──▶ checked_out
//!     │
//!     └──────cancel──────▶ cancelled
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use crate::error::{Error, ValidationError};
use crate::ids::{GuestId, ReservationId, RoomId, RoomTypeId, UserId};
use crate::money::Money;
use crate::stay::StayDates;

/// Lifecycle state of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    /// Booked, guest not yet arrived.
    Confirmed,
    /// Guest is in house and holds a room.
    CheckedIn,
    /// Guest has left. Terminal.
    CheckedOut,
    /// Booking withdrawn before arrival. Terminal.
    Cancelled,
}

/// An attempted lifecycle transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// Assign a room and mark the guest in house.
    CheckIn,
    /// Release the room and settle.
    CheckOut,
    /// Withdraw the booking.
    Cancel,
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CheckIn => write!(f, "check in"),
            Self::CheckOut => write!(f, "check out"),
            Self::Cancel => write!(f, "cancel"),
        }
    }
}

/// How an illegal transition is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionRejection {
    /// The request clashes with the current state.
    Conflict,
    /// The request is premature.
    Validation,
}

/// A rejected lifecycle transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionError {
    /// State the reservation was in.
    pub from: ReservationStatus,
    /// The event that was refused.
    pub event: LifecycleEvent,
    /// Whether the refusal is a conflict or a validation failure.
    pub rejection: TransitionRejection,
    /// Human-readable reason.
    pub message: String,
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot {} ({}): {}", self.event, self.from, self.message)
    }
}

impl std::error::Error for TransitionError {}

impl From<TransitionError> for Error {
    fn from(err: TransitionError) -> Self {
        match err.rejection {
            TransitionRejection::Conflict => Self::Conflict {
                details: err.message,
            },
            TransitionRejection::Validation => Self::Validation {
                field: "status".into(),
                message: err.message,
            },
        }
    }
}

impl ReservationStatus {
    /// Returns the stored name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::CheckedIn => "checked_in",
            Self::CheckedOut => "checked_out",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns `true` if the reservation still consumes inventory.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Confirmed | Self::CheckedIn)
    }

    /// Returns `true` if no further transition is possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::CheckedOut | Self::Cancelled)
    }

    /// Computes the state reached by applying `event`.
    ///
    /// # Errors
    ///
    /// Returns a `TransitionError` for every edge that does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use innkeep::{LifecycleEvent, ReservationStatus};
    ///
    /// let next = ReservationStatus::Confirmed.apply(LifecycleEvent::CheckIn).unwrap();
    /// assert_eq!(next, ReservationStatus::CheckedIn);
    /// assert!(next.apply(LifecycleEvent::Cancel).is_err());
    /// ```
    pub fn apply(self, event: LifecycleEvent) -> Result<Self, TransitionError> {
        use LifecycleEvent::{Cancel, CheckIn, CheckOut};
        use TransitionRejection::{Conflict, Validation};

        let refuse = |rejection, message: &str| {
            Err(TransitionError {
                from: self,
                event,
                rejection,
                message: message.to_string(),
            })
        };

        match (self, event) {
            (Self::Confirmed, CheckIn) => Ok(Self::CheckedIn),
            (Self::Confirmed, Cancel) => Ok(Self::Cancelled),
            (Self::CheckedIn, CheckOut) => Ok(Self::CheckedOut),

            (Self::Confirmed, CheckOut) => refuse(Validation, "reservation is not checked in"),
            (Self::CheckedIn, CheckIn) => refuse(Conflict, "reservation is already checked in"),
            (Self::CheckedIn, Cancel) => refuse(
                Conflict,
                "reservation is already checked in; only confirmed reservations can be cancelled",
            ),
            (Self::CheckedOut, CheckIn | CheckOut) => {
                refuse(Conflict, "reservation is already checked out")
            }
            (Self::CheckedOut, Cancel) => refuse(
                Conflict,
                "reservation is already checked out; only confirmed reservations can be cancelled",
            ),
            (Self::Cancelled, CheckIn | CheckOut) => refuse(Conflict, "reservation was cancelled"),
            (Self::Cancelled, Cancel) => refuse(Conflict, "reservation is already cancelled"),
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "confirmed" => Ok(Self::Confirmed),
            "checked_in" => Ok(Self::CheckedIn),
            "checked_out" => Ok(Self::CheckedOut),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(ValidationError::new(
                "status",
                format!("unknown reservation status '{s}'"),
            )),
        }
    }
}

impl_text_column!(ReservationStatus);

/// Guest-facing reservation identifier: ten uppercase hex digits.
///
/// # Examples
///
/// ```
/// use innkeep::ConfirmationCode;
///
/// let code = ConfirmationCode::generate(&mut rand::rng());
/// assert_eq!(code.as_str().len(), ConfirmationCode::LEN);
/// assert!("3FA9C01B2E".parse::<ConfirmationCode>().is_ok());
/// assert!("xyz".parse::<ConfirmationCode>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfirmationCode(String);

impl ConfirmationCode {
    /// Number of characters in a code.
    pub const LEN: usize = 10;

    /// Draws a fresh code from 40 random bits.
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        let mut bytes = [0u8; Self::LEN / 2];
        rng.fill(&mut bytes);
        Self(bytes.iter().map(|b| format!("{b:02X}")).collect())
    }

    /// Returns the code text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfirmationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ConfirmationCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        if code.len() != Self::LEN || !code.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ValidationError::new(
                "confirmation_code",
                format!("'{s}' is not a {}-character confirmation code", Self::LEN),
            ));
        }
        Ok(Self(code))
    }
}

impl ToSql for ConfirmationCode {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.0.as_str()))
    }
}

impl FromSql for ConfirmationCode {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: ValidationError| FromSqlError::Other(Box::new(e)))
    }
}

/// Caller-supplied price breakdown of a booking.
///
/// The engine never computes prices; it only checks that the numbers agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pricing {
    /// Price before discount.
    pub subtotal: Money,
    /// Discount granted.
    pub discount_amount: Money,
    /// Amount due, equal to `subtotal - discount_amount`.
    pub total_amount: Money,
    /// Deposit taken at booking, at most `total_amount`.
    pub deposit_amount: Money,
}

impl Pricing {
    /// Creates a breakdown. Call [`Pricing::validate`] before use.
    #[must_use]
    pub const fn new(subtotal: Money, discount: Money, total: Money, deposit: Money) -> Self {
        Self {
            subtotal,
            discount_amount: discount,
            total_amount: total,
            deposit_amount: deposit,
        }
    }

    /// Checks the pricing invariants.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if any amount is negative or above
    /// [`Money::LIMIT`], if
    /// `total != subtotal - discount`, or if the deposit exceeds the total.
    ///
    /// # Examples
    ///
    /// ```
    /// use innkeep::{Money, Pricing};
    ///
    /// let ok = Pricing::new(Money::new(1_000), Money::new(100), Money::new(900), Money::new(300));
    /// assert!(ok.validate().is_ok());
    ///
    /// let off_by_one = Pricing::new(Money::new(1_000), Money::new(100), Money::new(901), Money::ZERO);
    /// assert!(off_by_one.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.subtotal.ensure_non_negative("subtotal")?;
        self.discount_amount.ensure_non_negative("discount_amount")?;
        self.deposit_amount.ensure_non_negative("deposit_amount")?;
        self.subtotal.ensure_within_limit("subtotal")?;
        self.total_amount.ensure_within_limit("total_amount")?;

        if self.discount_amount > self.subtotal {
            return Err(ValidationError::new(
                "discount_amount",
                format!(
                    "discount {} exceeds subtotal {}",
                    self.discount_amount, self.subtotal
                ),
            ));
        }
        if self.total_amount != self.subtotal - self.discount_amount {
            return Err(ValidationError::new(
                "total_amount",
                format!(
                    "total {} does not equal subtotal {} minus discount {}",
                    self.total_amount, self.subtotal, self.discount_amount
                ),
            ));
        }
        if self.deposit_amount > self.total_amount {
            return Err(ValidationError::new(
                "deposit_amount",
                format!(
                    "deposit {} exceeds total {}",
                    self.deposit_amount, self.total_amount
                ),
            ));
        }
        Ok(())
    }
}

/// A booking as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    /// Row id.
    pub id: ReservationId,
    /// Guest-facing unique code.
    pub confirmation_code: ConfirmationCode,
    /// Guest in the guest directory.
    pub guest_id: GuestId,
    /// Pool the booking draws from.
    pub room_type_id: RoomTypeId,
    /// Room assigned at check-in, kept after check-out.
    pub room_id: Option<RoomId>,
    /// Nights booked.
    #[serde(flatten)]
    pub stay: StayDates,
    /// Lifecycle state.
    pub status: ReservationStatus,
    /// Number of adults, at least one.
    pub adults: u32,
    /// Number of children.
    pub children: u32,
    /// Free-form requests.
    pub special_requests: Option<String>,
    /// Rate applied per night.
    pub rate_per_night: Money,
    /// Price breakdown.
    #[serde(flatten)]
    pub pricing: Pricing,
    /// Booking time.
    pub created_at: DateTime<Utc>,
    /// Booking clerk.
    pub created_by: UserId,
    /// Arrival time.
    pub checked_in_at: Option<DateTime<Utc>>,
    /// Arrival clerk.
    pub checked_in_by: Option<UserId>,
    /// Departure time.
    pub checked_out_at: Option<DateTime<Utc>>,
    /// Departure clerk.
    pub checked_out_by: Option<UserId>,
    /// Cancellation time.
    pub cancelled_at: Option<DateTime<Utc>>,
    /// Cancelling clerk.
    pub cancelled_by: Option<UserId>,
    /// Deposit handed back at check-out.
    pub deposit_refunded: Option<Money>,
    /// Amount still owed at check-out.
    pub balance_owed: Option<Money>,
    /// When the deposit was settled; set together with check-out.
    pub deposit_settled_at: Option<DateTime<Utc>>,
}

impl Reservation {
    /// Number of nights booked.
    #[must_use]
    pub fn nights(&self) -> i64 {
        self.stay.nights()
    }

    /// Amount still due given what has been paid.
    #[must_use]
    pub fn balance(&self, paid: Money) -> Money {
        self.pricing.total_amount - paid
    }
}

/// A request to book a room type for a date range.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    /// Guest making the booking.
    pub guest_id: GuestId,
    /// Pool to book from.
    pub room_type_id: RoomTypeId,
    /// First night.
    pub check_in: NaiveDate,
    /// Departure day.
    pub check_out: NaiveDate,
    /// Price breakdown.
    pub pricing: Pricing,
    /// Rate per night; defaults to the room type's rate.
    pub rate_per_night: Option<Money>,
    /// Number of adults.
    pub adults: u32,
    /// Number of children.
    pub children: u32,
    /// Free-form requests.
    pub special_requests: Option<String>,
}

impl BookingRequest {
    /// Creates a request for one adult and no children.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use innkeep::{BookingRequest, GuestId, Money, Pricing, RoomTypeId};
    ///
    /// let pricing = Pricing::new(Money::new(900), Money::ZERO, Money::new(900), Money::ZERO);
    /// let request = BookingRequest::new(
    ///     GuestId::new(1),
    ///     RoomTypeId::new(2),
    ///     NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
    ///     NaiveDate::from_ymd_opt(2030, 1, 4).unwrap(),
    ///     pricing,
    /// )
    /// .with_party(2, 1);
    /// assert_eq!(request.adults, 2);
    /// ```
    #[must_use]
    pub fn new(
        guest_id: GuestId,
        room_type_id: RoomTypeId,
        check_in: NaiveDate,
        check_out: NaiveDate,
        pricing: Pricing,
    ) -> Self {
        Self {
            guest_id,
            room_type_id,
            check_in,
            check_out,
            pricing,
            rate_per_night: None,
            adults: 1,
            children: 0,
            special_requests: None,
        }
    }

    /// Overrides the nightly rate.
    #[must_use]
    pub const fn with_rate_per_night(mut self, rate: Option<Money>) -> Self {
        self.rate_per_night = rate;
        self
    }

    /// Sets the party size.
    #[must_use]
    pub const fn with_party(mut self, adults: u32, children: u32) -> Self {
        self.adults = adults;
        self.children = children;
        self
    }

    /// Sets the special requests. Blank text is dropped.
    #[must_use]
    pub fn with_special_requests(mut self, requests: Option<String>) -> Self {
        self.special_requests = requests
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());
        self
    }
}
