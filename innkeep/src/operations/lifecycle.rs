//! Reservation lifecycle: create, check in, check out, cancel.
//!
//! Every mutating operation runs in one `BEGIN IMMEDIATE` transaction that
//! re-reads what it needs, applies the state machine, and writes. Either
//! the whole transition commits or nothing does.

use chrono::{Local, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rusqlite::Connection;
use serde::Serialize;

use crate::actor::Actor;
use crate::config::Config;
use crate::database::{Database, ReservationDraft, ReservationFilter};
use crate::directory::GuestDirectory;
use crate::error::{is_unique_violation, Error, Result};
use crate::ids::{GuestId, ReservationId, RoomId, RoomTypeId};
use crate::ledger::PaymentLedger;
use crate::money::Money;
use crate::payment::PaymentStatus;
use crate::reservation::{
    BookingRequest, ConfirmationCode, LifecycleEvent, Reservation, ReservationStatus,
};
use crate::settlement::Settlement;
use crate::stay::StayDates;

use super::availability::{check_availability, Availability};

/// Result of a successful check-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckInOutcome {
    /// The reservation, now checked in.
    pub reservation: Reservation,
    /// Guest's display name from the directory, if it knows the guest.
    pub guest_name: Option<String>,
    /// Room handed out.
    pub room_number: String,
    /// How much of the stay is paid.
    pub payment_status: PaymentStatus,
    /// Amount paid so far.
    pub total_paid: Money,
}

/// Result of a successful check-out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckOutOutcome {
    /// The reservation, now checked out.
    pub reservation: Reservation,
    /// Guest's display name from the directory, if it knows the guest.
    pub guest_name: Option<String>,
    /// Room the guest stayed in.
    pub room_number: Option<String>,
    /// Deposit disposition.
    pub settlement: Settlement,
}

/// Money position of a reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceSummary {
    /// Reservation asked about.
    pub reservation_id: ReservationId,
    /// Its code.
    pub confirmation_code: ConfirmationCode,
    /// Its state.
    pub status: ReservationStatus,
    /// Amount due for the stay.
    pub total_amount: Money,
    /// Counted payments.
    pub total_paid: Money,
    /// `total_amount - total_paid`.
    pub balance: Money,
    /// Deposit on the booking.
    pub deposit_amount: Money,
    /// Derived paid state.
    pub payment_status: PaymentStatus,
    /// `max(balance - deposit, 0)`.
    pub final_balance_after_deposit: Money,
}

/// Runs lifecycle operations against a database.
///
/// The guest directory and payment ledger default to the tables of the
/// same database, read inside the operation's transaction. Either can be
/// replaced, for example by the in-memory implementations in tests.
///
/// # Examples
///
/// ```no_run
/// use chrono::NaiveDate;
/// use innkeep::{
///     Actor, BookingRequest, Config, Database, DatabaseConfig, GuestId, Money, Pricing,
///     ReservationManager, RoomTypeId, UserId,
/// };
///
/// let mut db = Database::open(DatabaseConfig::new("/tmp/innkeep.db")).unwrap();
/// let config = Config::default();
/// let mut manager = ReservationManager::new(&mut db, &config);
///
/// let pricing = Pricing::new(Money::new(300_000), Money::ZERO, Money::new(300_000), Money::ZERO);
/// let request = BookingRequest::new(
///     GuestId::new(1),
///     RoomTypeId::new(1),
///     NaiveDate::from_ymd_opt(2030, 5, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2030, 5, 4).unwrap(),
///     pricing,
/// );
/// let reservation = manager.create(&request, &Actor::new(UserId::new(1))).unwrap();
/// println!("booked {}", reservation.confirmation_code);
/// ```
pub struct ReservationManager<'a> {
    db: &'a mut Database,
    config: Config,
    guests: Option<&'a dyn GuestDirectory>,
    ledger: Option<&'a dyn PaymentLedger>,
    today: Option<NaiveDate>,
    code_seed: Option<u64>,
}

impl<'a> ReservationManager<'a> {
    /// Creates a manager using the database for guests and payments.
    #[must_use]
    pub fn new(db: &'a mut Database, config: &Config) -> Self {
        Self {
            db,
            config: config.clone(),
            guests: None,
            ledger: None,
            today: None,
            code_seed: None,
        }
    }

    /// Uses another guest directory.
    #[must_use]
    pub fn with_guest_directory(mut self, guests: &'a dyn GuestDirectory) -> Self {
        self.guests = Some(guests);
        self
    }

    /// Uses another payment ledger.
    #[must_use]
    pub fn with_payment_ledger(mut self, ledger: &'a dyn PaymentLedger) -> Self {
        self.ledger = Some(ledger);
        self
    }

    /// Pins the date that counts as today. Defaults to the local date.
    #[must_use]
    pub const fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Draws confirmation codes from a seeded generator.
    #[must_use]
    pub const fn with_code_seed(mut self, seed: u64) -> Self {
        self.code_seed = Some(seed);
        self
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Counts free rooms of a type over a date range.
    ///
    /// # Errors
    ///
    /// See [`check_availability`].
    pub fn check_availability(
        &self,
        room_type_id: RoomTypeId,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<Availability> {
        check_availability(
            self.db.connection(),
            room_type_id,
            check_in,
            check_out,
            self.today(),
        )
    }

    /// Books a room type for a date range.
    ///
    /// Availability is re-checked inside the write transaction, so two
    /// concurrent creates cannot both take the last room.
    ///
    /// # Errors
    ///
    /// - `NotFound` for an unknown guest or room type
    /// - a validation error for bad dates, a stay that is too long, an
    ///   inconsistent price breakdown, or an empty party
    /// - `Conflict` when no room of the type is free, or when no unused
    ///   confirmation code could be drawn
    pub fn create(&mut self, request: &BookingRequest, actor: &Actor) -> Result<Reservation> {
        let today = self.today();
        let max_nights = self.config.max_stay_nights();
        let attempts = self.config.confirmation_code_attempts();
        let mut rng = match self.code_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        let guests = self.guests;

        let tx = self.db.begin_transaction()?;

        if !guest_exists(guests, &tx, request.guest_id)? {
            return Err(Error::not_found(format!("guest {}", request.guest_id)));
        }
        let room_type = Database::require_room_type(&tx, request.room_type_id)?;

        let stay = StayDates::new(request.check_in, request.check_out)?;
        stay.ensure_not_past(today)?;
        stay.ensure_max_nights(max_nights)?;

        request.pricing.validate()?;
        if request.adults == 0 {
            return Err(Error::validation("adults", "at least one adult is required"));
        }
        let rate_per_night = request
            .rate_per_night
            .unwrap_or(room_type.nightly_rate)
            .ensure_non_negative("rate_per_night")?
            .ensure_within_limit("rate_per_night")?;

        let availability = check_availability(
            &tx,
            request.room_type_id,
            request.check_in,
            request.check_out,
            today,
        )?;
        if !availability.is_available {
            log::info!(
                "rejected booking of {} for {stay}: {}",
                room_type.code,
                availability.message
            );
            return Err(Error::conflict("No rooms available for these dates"));
        }

        let mut confirmation_code = None;
        for _ in 0..attempts {
            let candidate = ConfirmationCode::generate(&mut rng);
            if Database::confirmation_code_exists(&tx, &candidate)? {
                log::debug!("confirmation code {candidate} already taken");
            } else {
                confirmation_code = Some(candidate);
                break;
            }
        }
        let confirmation_code = confirmation_code.ok_or_else(|| {
            Error::conflict(format!(
                "could not generate an unused confirmation code in {attempts} attempts"
            ))
        })?;

        let draft = ReservationDraft {
            confirmation_code,
            guest_id: request.guest_id,
            room_type_id: request.room_type_id,
            stay,
            adults: request.adults,
            children: request.children,
            special_requests: request.special_requests.clone(),
            rate_per_night,
            pricing: request.pricing,
            created_at: Utc::now(),
            created_by: actor.id,
        };
        let id = Database::insert_reservation(&tx, &draft)?;
        let reservation = Database::require_reservation(&tx, id)?;
        tx.commit()?;

        log::info!(
            "{actor} booked {} as reservation {} ({})",
            room_type.code,
            reservation.id,
            reservation.confirmation_code
        );
        Ok(reservation)
    }

    /// Assigns a room and marks the guest in house.
    ///
    /// `require_payment` defaults to the configured
    /// `require_payment_at_check_in`. The room is claimed with a single
    /// conditional update, so two clerks cannot hand out the same room.
    ///
    /// # Errors
    ///
    /// - `NotFound` for an unknown reservation or room
    /// - `Conflict` if the reservation is not confirmed or the room is not
    ///   available
    /// - `PaymentRequired` if payment is required and nothing is paid
    /// - a validation error if the room is of another type
    pub fn check_in(
        &mut self,
        id: ReservationId,
        room_id: RoomId,
        actor: &Actor,
        require_payment: Option<bool>,
    ) -> Result<CheckInOutcome> {
        let require_payment =
            require_payment.unwrap_or_else(|| self.config.require_payment_at_check_in());
        let ledger = self.ledger;
        let guests = self.guests;

        let tx = self.db.begin_transaction()?;
        let reservation = Database::require_reservation(&tx, id)?;
        reservation.status.apply(LifecycleEvent::CheckIn)?;

        let total_paid = total_paid(ledger, &tx, id)?;
        if require_payment && !total_paid.is_positive() {
            return Err(Error::PaymentRequired {
                details: format!("reservation {id} has no payment recorded"),
            });
        }

        let room = Database::require_room(&tx, room_id)?;
        if room.room_type_id != reservation.room_type_id {
            return Err(Error::validation(
                "room_id",
                format!(
                    "wrong room type: room {} is type {}, reservation {id} is for type {}",
                    room.room_number, room.room_type_id, reservation.room_type_id
                ),
            ));
        }

        if !Database::claim_room(&tx, room_id)? {
            return Err(Error::conflict(format!(
                "room {} is {}",
                room.room_number, room.status
            )));
        }

        match Database::mark_checked_in(&tx, id, room_id, actor.id, Utc::now()) {
            Ok(true) => {}
            Ok(false) => {
                return Err(Error::conflict(format!(
                    "reservation {id} is no longer confirmed"
                )))
            }
            Err(Error::Database(ref e)) if is_unique_violation(e) => {
                return Err(Error::conflict(format!(
                    "room {} already has a guest checked in",
                    room.room_number
                )))
            }
            Err(e) => return Err(e),
        }
        let reservation = Database::require_reservation(&tx, id)?;
        let guest_name = guest_name(guests, &tx, reservation.guest_id)?;
        tx.commit()?;

        log::info!(
            "{actor} checked in reservation {id} to room {}",
            room.room_number
        );
        Ok(CheckInOutcome {
            payment_status: PaymentStatus::from_amounts(
                reservation.pricing.total_amount,
                total_paid,
            ),
            reservation,
            guest_name,
            room_number: room.room_number,
            total_paid,
        })
    }

    /// Marks the guest departed, frees the room and settles the deposit.
    ///
    /// The reservation keeps its `room_id`.
    ///
    /// # Errors
    ///
    /// - `NotFound` for an unknown reservation
    /// - a validation error if the guest has not checked in yet
    /// - `Conflict` if the reservation is checked out or cancelled
    pub fn check_out(&mut self, id: ReservationId, actor: &Actor) -> Result<CheckOutOutcome> {
        let ledger = self.ledger;
        let guests = self.guests;

        let tx = self.db.begin_transaction()?;
        let reservation = Database::require_reservation(&tx, id)?;
        reservation.status.apply(LifecycleEvent::CheckOut)?;

        let total_paid = total_paid(ledger, &tx, id)?;
        let settlement = Settlement::compute(
            reservation.pricing.total_amount,
            total_paid,
            reservation.pricing.deposit_amount,
        );

        if !Database::mark_checked_out(&tx, id, actor.id, Utc::now(), &settlement)? {
            return Err(Error::conflict(format!(
                "reservation {id} is no longer checked in"
            )));
        }
        let mut room_number = None;
        if let Some(room_id) = reservation.room_id {
            if !Database::release_room(&tx, room_id)? {
                log::warn!("room {room_id} was not occupied at check-out of reservation {id}");
            }
            room_number = Database::get_room(&tx, room_id)?.map(|room| room.room_number);
        }
        let reservation = Database::require_reservation(&tx, id)?;
        let guest_name = guest_name(guests, &tx, reservation.guest_id)?;
        tx.commit()?;

        log::info!("{actor} checked out reservation {id}: {}", settlement.note);
        Ok(CheckOutOutcome {
            reservation,
            guest_name,
            room_number,
            settlement,
        })
    }

    /// Withdraws a booking before arrival.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown reservation, or `Conflict` if it is
    /// not confirmed.
    pub fn cancel(&mut self, id: ReservationId, actor: &Actor) -> Result<Reservation> {
        let tx = self.db.begin_transaction()?;
        let reservation = Database::require_reservation(&tx, id)?;
        reservation.status.apply(LifecycleEvent::Cancel)?;

        if !Database::mark_cancelled(&tx, id, actor.id, Utc::now())? {
            return Err(Error::conflict(format!(
                "reservation {id} is no longer confirmed"
            )));
        }
        let reservation = Database::require_reservation(&tx, id)?;
        tx.commit()?;

        log::info!("{actor} cancelled reservation {id}");
        Ok(reservation)
    }

    /// Reports what has been paid and what is left.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown reservation or a database error.
    pub fn balance(&self, id: ReservationId) -> Result<BalanceSummary> {
        let conn = self.db.connection();
        let reservation = Database::require_reservation(conn, id)?;
        let total_paid = total_paid(self.ledger, conn, id)?;

        let total_amount = reservation.pricing.total_amount;
        let deposit_amount = reservation.pricing.deposit_amount;
        let balance = reservation.balance(total_paid);

        Ok(BalanceSummary {
            reservation_id: id,
            confirmation_code: reservation.confirmation_code,
            status: reservation.status,
            total_amount,
            total_paid,
            balance,
            deposit_amount,
            payment_status: PaymentStatus::from_amounts(total_amount, total_paid),
            final_balance_after_deposit: (balance - deposit_amount).clamp_to_zero(),
        })
    }

    /// Retrieves a reservation.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown reservation or a database error.
    pub fn get(&self, id: ReservationId) -> Result<Reservation> {
        Database::require_reservation(self.db.connection(), id)
    }

    /// Retrieves a reservation by confirmation code.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown code or a database error.
    pub fn get_by_code(&self, code: &ConfirmationCode) -> Result<Reservation> {
        Database::get_reservation_by_code(self.db.connection(), code)?
            .ok_or_else(|| Error::not_found(format!("reservation {code}")))
    }

    /// Lists reservations page by page.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad page size or a database error.
    pub fn list(&self, filter: &ReservationFilter) -> Result<Vec<Reservation>> {
        Database::list_reservations(self.db.connection(), filter)
    }
}

fn guest_exists(
    guests: Option<&dyn GuestDirectory>,
    conn: &Connection,
    id: GuestId,
) -> Result<bool> {
    match guests {
        Some(directory) => directory.guest_exists(id),
        None => Ok(Database::get_guest(conn, id)?.is_some()),
    }
}

fn guest_name(
    guests: Option<&dyn GuestDirectory>,
    conn: &Connection,
    id: GuestId,
) -> Result<Option<String>> {
    match guests {
        Some(directory) => directory.guest_name(id),
        None => Ok(Database::get_guest(conn, id)?.map(|guest| guest.full_name)),
    }
}

fn total_paid(
    ledger: Option<&dyn PaymentLedger>,
    conn: &Connection,
    id: ReservationId,
) -> Result<Money> {
    let paid = match ledger {
        Some(ledger) => ledger.total_paid(id)?,
        None => Database::sum_paid(conn, id)?,
    };
    Ok(paid.ensure_within_limit("total_paid")?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{create_test_database, date, seed_room_type};
    use crate::directory::StaticGuestDirectory;
    use crate::guest::NewGuest;
    use crate::ids::UserId;
    use crate::inventory::RoomStatus;
    use crate::ledger::StaticPaymentLedger;
    use crate::payment::{NewPayment, PaymentType};
    use crate::reservation::Pricing;

    fn clerk() -> Actor {
        Actor::new(UserId::new(7))
    }

    fn pricing(total: i64, deposit: i64) -> Pricing {
        Pricing::new(
            Money::new(total),
            Money::ZERO,
            Money::new(total),
            Money::new(deposit),
        )
    }

    fn request(guest: GuestId, room_type: RoomTypeId, from: u32, to: u32) -> BookingRequest {
        BookingRequest::new(guest, room_type, date(from), date(to), pricing(300_000, 0))
    }

    fn guest(db: &mut Database) -> GuestId {
        db.create_guest(&NewGuest::new("Grace Hopper")).unwrap().id
    }

    #[test]
    fn test_create_defaults_rate_from_room_type() {
        let mut db = create_test_database();
        let (rt, _) = seed_room_type(&mut db, "DLX", 1);
        let guest = guest(&mut db);
        let config = Config::default();
        let mut manager = ReservationManager::new(&mut db, &config).with_today(date(0));

        let reservation = manager.create(&request(guest, rt.id, 1, 4), &clerk()).unwrap();
        assert_eq!(reservation.status, ReservationStatus::Confirmed);
        assert_eq!(reservation.rate_per_night, rt.nightly_rate);
        assert_eq!(reservation.room_id, None);
        assert_eq!(reservation.created_by, UserId::new(7));
        assert_eq!(reservation.confirmation_code.as_str().len(), ConfirmationCode::LEN);
    }

    #[test]
    fn test_create_unknown_guest_and_type() {
        let mut db = create_test_database();
        let (rt, _) = seed_room_type(&mut db, "DLX", 1);
        let guest = guest(&mut db);
        let config = Config::default();
        let mut manager = ReservationManager::new(&mut db, &config).with_today(date(0));

        assert!(matches!(
            manager.create(&request(GuestId::new(404), rt.id, 1, 2), &clerk()),
            Err(Error::NotFound { .. })
        ));
        assert!(matches!(
            manager.create(&request(guest, RoomTypeId::new(404), 1, 2), &clerk()),
            Err(Error::NotFound { .. })
        ));
    }

    #[test]
    fn test_create_validation() {
        let mut db = create_test_database();
        let (rt, _) = seed_room_type(&mut db, "DLX", 1);
        let guest = guest(&mut db);
        let config = Config {
            max_stay_nights: Some(5),
            ..Default::default()
        };
        let mut manager = ReservationManager::new(&mut db, &config).with_today(date(2));

        let cases = [
            request(guest, rt.id, 4, 4),
            request(guest, rt.id, 1, 3),
            request(guest, rt.id, 3, 9),
            request(guest, rt.id, 3, 4).with_party(0, 2),
            BookingRequest::new(
                guest,
                rt.id,
                date(3),
                date(4),
                Pricing::new(Money::new(100), Money::new(10), Money::new(100), Money::ZERO),
            ),
            BookingRequest::new(guest, rt.id, date(3), date(4), pricing(100, 101)),
        ];
        for case in cases {
            let result = manager.create(&case, &clerk());
            assert!(
                matches!(result, Err(Error::Validation { .. })),
                "{case:?} gave {result:?}"
            );
        }
        assert!(manager.list(&ReservationFilter::new()).unwrap().is_empty());
    }

    #[test]
    fn test_create_full_type_conflicts() {
        let mut db = create_test_database();
        let (rt, _) = seed_room_type(&mut db, "DLX", 1);
        let guest = guest(&mut db);
        let config = Config::default();
        let mut manager = ReservationManager::new(&mut db, &config).with_today(date(0));

        manager.create(&request(guest, rt.id, 10, 13), &clerk()).unwrap();
        let err = manager
            .create(&request(guest, rt.id, 12, 14), &clerk())
            .unwrap_err();
        assert!(matches!(err, Error::Conflict { ref details } if details.contains("No rooms available")));

        // Same-day turnover is fine
        manager.create(&request(guest, rt.id, 13, 15), &clerk()).unwrap();
    }

    #[test]
    fn test_code_exhaustion_conflicts() {
        let mut db = create_test_database();
        let (rt, _) = seed_room_type(&mut db, "DLX", 2);
        let guest = guest(&mut db);
        let config = Config {
            confirmation_code_attempts: Some(1),
            ..Default::default()
        };
        let mut manager = ReservationManager::new(&mut db, &config)
            .with_today(date(0))
            .with_code_seed(42);

        manager.create(&request(guest, rt.id, 1, 2), &clerk()).unwrap();
        let err = manager
            .create(&request(guest, rt.id, 1, 2), &clerk())
            .unwrap_err();
        assert!(matches!(err, Error::Conflict { .. }));
    }

    #[test]
    fn test_static_guest_directory_is_consulted() {
        let mut db = create_test_database();
        let (rt, _) = seed_room_type(&mut db, "DLX", 1);
        let directory = StaticGuestDirectory::new().with_guest(GuestId::new(55), "Walk In");
        let config = Config::default();
        let mut manager = ReservationManager::new(&mut db, &config)
            .with_guest_directory(&directory)
            .with_today(date(0));

        let reservation = manager
            .create(&request(GuestId::new(55), rt.id, 1, 2), &clerk())
            .unwrap();
        assert_eq!(reservation.guest_id, GuestId::new(55));
    }

    #[test]
    fn test_outcomes_name_the_guest_from_the_directory() {
        let mut db = create_test_database();
        let (rt, rooms) = seed_room_type(&mut db, "DLX", 1);
        let directory = StaticGuestDirectory::new().with_guest(GuestId::new(55), "Walk In");
        let config = Config::default();
        let mut manager = ReservationManager::new(&mut db, &config)
            .with_guest_directory(&directory)
            .with_today(date(0));

        let reservation = manager
            .create(&request(GuestId::new(55), rt.id, 1, 2), &clerk())
            .unwrap();
        let arrived = manager
            .check_in(reservation.id, rooms[0].id, &clerk(), None)
            .unwrap();
        assert_eq!(arrived.guest_name.as_deref(), Some("Walk In"));
        assert_eq!(arrived.room_number, rooms[0].room_number);

        let departed = manager.check_out(reservation.id, &clerk()).unwrap();
        assert_eq!(departed.guest_name.as_deref(), Some("Walk In"));
        assert_eq!(departed.room_number.as_deref(), Some(rooms[0].room_number.as_str()));
    }

    #[test]
    fn test_check_in_and_out_round() {
        let mut db = create_test_database();
        let (rt, rooms) = seed_room_type(&mut db, "DLX", 1);
        let guest = guest(&mut db);
        let config = Config::default();
        let ledger = StaticPaymentLedger::new();
        let mut manager = ReservationManager::new(&mut db, &config)
            .with_payment_ledger(&ledger)
            .with_today(date(0));

        let booking = BookingRequest::new(guest, rt.id, date(1), date(3), pricing(1_000, 300));
        let reservation = manager.create(&booking, &clerk()).unwrap();

        let outcome = manager
            .check_in(reservation.id, rooms[0].id, &clerk(), None)
            .unwrap();
        assert_eq!(outcome.reservation.status, ReservationStatus::CheckedIn);
        assert_eq!(outcome.reservation.room_id, Some(rooms[0].id));
        assert_eq!(outcome.reservation.checked_in_by, Some(UserId::new(7)));
        assert_eq!(outcome.payment_status, PaymentStatus::Unpaid);
        assert_eq!(outcome.guest_name.as_deref(), Some("Grace Hopper"));
        assert_eq!(outcome.room_number, rooms[0].room_number);
        assert_eq!(outcome.reservation.deposit_settled_at, None);

        let out = manager.check_out(reservation.id, &clerk()).unwrap();
        assert_eq!(out.reservation.status, ReservationStatus::CheckedOut);
        assert_eq!(out.reservation.room_id, Some(rooms[0].id));
        assert_eq!(out.settlement.balance_owed, Money::new(700));
        assert_eq!(out.guest_name.as_deref(), Some("Grace Hopper"));
        assert_eq!(out.room_number.as_deref(), Some(rooms[0].room_number.as_str()));
        assert_eq!(out.reservation.deposit_refunded, Some(Money::ZERO));
        assert_eq!(out.reservation.balance_owed, Some(Money::new(700)));
        assert_eq!(
            out.reservation.deposit_settled_at,
            out.reservation.checked_out_at
        );
        assert!(out.reservation.deposit_settled_at.is_some());
        drop(manager);

        let room = Database::require_room(db.connection(), rooms[0].id).unwrap();
        assert_eq!(room.status, RoomStatus::Available);
    }

    #[test]
    fn test_check_in_payment_gate() {
        let mut db = create_test_database();
        let (rt, rooms) = seed_room_type(&mut db, "DLX", 1);
        let guest = guest(&mut db);
        let config = Config {
            require_payment_at_check_in: Some(true),
            ..Default::default()
        };
        let mut manager = ReservationManager::new(&mut db, &config).with_today(date(0));
        let reservation = manager.create(&request(guest, rt.id, 1, 2), &clerk()).unwrap();

        let err = manager
            .check_in(reservation.id, rooms[0].id, &clerk(), None)
            .unwrap_err();
        assert!(matches!(err, Error::PaymentRequired { .. }));
        drop(manager);

        // Nothing was applied
        let room = Database::require_room(db.connection(), rooms[0].id).unwrap();
        assert_eq!(room.status, RoomStatus::Available);

        let mut manager = ReservationManager::new(&mut db, &config).with_today(date(0));
        manager
            .check_in(reservation.id, rooms[0].id, &clerk(), Some(false))
            .unwrap();
    }

    #[test]
    fn test_check_in_wrong_type_regardless_of_status() {
        let mut db = create_test_database();
        let (deluxe, _) = seed_room_type(&mut db, "DLX", 1);
        let (_, standard_rooms) = seed_room_type(&mut db, "STD", 1);
        db.set_room_status(standard_rooms[0].id, RoomStatus::OutOfOrder)
            .unwrap();
        let guest = guest(&mut db);
        let config = Config::default();
        let mut manager = ReservationManager::new(&mut db, &config).with_today(date(0));
        let reservation = manager
            .create(&request(guest, deluxe.id, 1, 2), &clerk())
            .unwrap();

        let err = manager
            .check_in(reservation.id, standard_rooms[0].id, &clerk(), None)
            .unwrap_err();
        assert!(matches!(err, Error::Validation { ref message, .. } if message.contains("wrong room type")));
    }

    #[test]
    fn test_check_in_unavailable_room_conflicts() {
        let mut db = create_test_database();
        let (rt, rooms) = seed_room_type(&mut db, "DLX", 2);
        db.set_room_status(rooms[1].id, RoomStatus::OutOfOrder)
            .unwrap();
        let guest = guest(&mut db);
        let config = Config::default();
        let mut manager = ReservationManager::new(&mut db, &config).with_today(date(0));
        let first = manager.create(&request(guest, rt.id, 1, 2), &clerk()).unwrap();
        let second = manager.create(&request(guest, rt.id, 1, 2), &clerk()).unwrap();

        manager
            .check_in(first.id, rooms[0].id, &clerk(), None)
            .unwrap();
        assert!(matches!(
            manager.check_in(second.id, rooms[0].id, &clerk(), None),
            Err(Error::Conflict { .. })
        ));
        assert!(matches!(
            manager.check_in(second.id, rooms[1].id, &clerk(), None),
            Err(Error::Conflict { .. })
        ));
        assert!(matches!(
            manager.check_in(second.id, RoomId::new(999), &clerk(), None),
            Err(Error::NotFound { .. })
        ));
        assert_eq!(
            manager.get(second.id).unwrap().status,
            ReservationStatus::Confirmed
        );
    }

    #[test]
    fn test_transition_errors() {
        let mut db = create_test_database();
        let (rt, rooms) = seed_room_type(&mut db, "DLX", 2);
        let guest = guest(&mut db);
        let config = Config::default();
        let mut manager = ReservationManager::new(&mut db, &config).with_today(date(0));
        let reservation = manager.create(&request(guest, rt.id, 1, 2), &clerk()).unwrap();

        assert!(matches!(
            manager.check_out(reservation.id, &clerk()),
            Err(Error::Validation { .. })
        ));

        manager
            .check_in(reservation.id, rooms[0].id, &clerk(), None)
            .unwrap();
        assert!(matches!(
            manager.check_in(reservation.id, rooms[1].id, &clerk(), None),
            Err(Error::Conflict { ref details }) if details.contains("already checked in")
        ));
        assert!(matches!(
            manager.cancel(reservation.id, &clerk()),
            Err(Error::Conflict { .. })
        ));

        manager.check_out(reservation.id, &clerk()).unwrap();
        assert!(matches!(
            manager.check_out(reservation.id, &clerk()),
            Err(Error::Conflict { ref details }) if details.contains("already checked out")
        ));
        assert!(matches!(
            manager.cancel(reservation.id, &clerk()),
            Err(Error::Conflict { .. })
        ));
        assert!(matches!(
            manager.cancel(ReservationId::new(404), &clerk()),
            Err(Error::NotFound { .. })
        ));
    }

    #[test]
    fn test_cancel_frees_inventory() {
        let mut db = create_test_database();
        let (rt, rooms) = seed_room_type(&mut db, "DLX", 1);
        let guest = guest(&mut db);
        let config = Config::default();
        let mut manager = ReservationManager::new(&mut db, &config).with_today(date(0));
        let reservation = manager.create(&request(guest, rt.id, 1, 3), &clerk()).unwrap();

        let cancelled = manager.cancel(reservation.id, &clerk()).unwrap();
        assert_eq!(cancelled.status, ReservationStatus::Cancelled);
        assert_eq!(cancelled.cancelled_by, Some(UserId::new(7)));
        assert!(matches!(
            manager.check_in(reservation.id, rooms[0].id, &clerk(), None),
            Err(Error::Conflict { .. })
        ));
        assert!(matches!(
            manager.check_out(reservation.id, &clerk()),
            Err(Error::Conflict { ref details }) if details.contains("cancelled")
        ));

        assert!(manager
            .check_availability(rt.id, date(1), date(3))
            .unwrap()
            .is_available);
    }

    #[test]
    fn test_out_of_range_payments_are_rejected() {
        let mut db = create_test_database();
        let (rt, rooms) = seed_room_type(&mut db, "DLX", 1);
        let guest = guest(&mut db);
        let config = Config::default();
        let booking = BookingRequest::new(guest, rt.id, date(1), date(3), pricing(300_000, 0));

        let id = {
            let mut manager = ReservationManager::new(&mut db, &config).with_today(date(0));
            let id = manager.create(&booking, &clerk()).unwrap().id;
            manager.check_in(id, rooms[0].id, &clerk(), None).unwrap();
            id
        };

        let huge_adjustment =
            NewPayment::new(id, Money::new(-i64::MAX), PaymentType::Adjustment);
        assert!(matches!(
            db.record_payment(&huge_adjustment, &clerk()),
            Err(Error::Validation { .. })
        ));

        let ledger = StaticPaymentLedger::new().with_paid(id, Money::new(-i64::MAX));
        let mut manager = ReservationManager::new(&mut db, &config).with_payment_ledger(&ledger);
        assert!(matches!(
            manager.balance(id),
            Err(Error::Validation { ref field, .. }) if field == "total_paid"
        ));
        assert!(matches!(
            manager.check_out(id, &clerk()),
            Err(Error::Validation { .. })
        ));
        assert_eq!(manager.get(id).unwrap().status, ReservationStatus::CheckedIn);
    }

    #[test]
    fn test_booking_amounts_are_bounded() {
        let mut db = create_test_database();
        let (rt, _) = seed_room_type(&mut db, "DLX", 1);
        let guest = guest(&mut db);
        let config = Config::default();
        let mut manager = ReservationManager::new(&mut db, &config).with_today(date(0));

        let too_big = Money::new(Money::LIMIT.minor_units() + 1);
        let booking = BookingRequest::new(
            guest,
            rt.id,
            date(1),
            date(2),
            Pricing::new(too_big, Money::ZERO, too_big, Money::ZERO),
        );
        assert!(matches!(
            manager.create(&booking, &clerk()),
            Err(Error::Validation { ref field, .. }) if field == "subtotal"
        ));
    }

    #[test]
    fn test_balance_summary() {
        let mut db = create_test_database();
        let (rt, _) = seed_room_type(&mut db, "DLX", 1);
        let guest = guest(&mut db);
        let config = Config::default();
        let booking = BookingRequest::new(guest, rt.id, date(1), date(3), pricing(1_000, 300));

        let id = {
            let mut manager = ReservationManager::new(&mut db, &config).with_today(date(0));
            manager.create(&booking, &clerk()).unwrap().id
        };
        let ledger = StaticPaymentLedger::new().with_paid(id, Money::new(400));
        let manager = ReservationManager::new(&mut db, &config).with_payment_ledger(&ledger);

        let summary = manager.balance(id).unwrap();
        assert_eq!(summary.total_paid, Money::new(400));
        assert_eq!(summary.balance, Money::new(600));
        assert_eq!(summary.final_balance_after_deposit, Money::new(300));
        assert_eq!(summary.payment_status, PaymentStatus::PartialPaid);
        assert_eq!(summary.status, ReservationStatus::Confirmed);

        let by_code = manager.get_by_code(&summary.confirmation_code).unwrap();
        assert_eq!(by_code.id, id);
    }
}
