//! Property-based tests for the reservation lifecycle.
//!
//! Random sequences of bookings, cancellations, check-ins and check-outs
//! are replayed against a real database; after every step no night may
//! hold more active reservations of a type than the type has rooms.

use std::collections::HashSet;

use proptest::prelude::*;
use proptest::sample::Index;

use crate::actor::Actor;
use crate::config::Config;
use crate::database::test_util::{create_test_database, date, seed_room_type};
use crate::database::{Database, ReservationFilter, MAX_PAGE_SIZE};
use crate::error::{Error, ErrorKind};
use crate::guest::NewGuest;
use crate::ids::{ReservationId, RoomTypeId, UserId};
use crate::inventory::{Room, RoomStatus};
use crate::money::Money;
use crate::reservation::{BookingRequest, Pricing, ReservationStatus};

use super::ReservationManager;

const HORIZON: u32 = 30;

#[derive(Debug, Clone)]
enum Step {
    Book { second_type: bool, from: u32, nights: u32 },
    Cancel(Index),
    CheckIn(Index),
    CheckOut(Index),
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        4 => (any::<bool>(), 1u32..20, 1u32..8).prop_map(|(second_type, from, nights)| {
            Step::Book { second_type, from, nights }
        }),
        1 => any::<Index>().prop_map(Step::Cancel),
        2 => any::<Index>().prop_map(Step::CheckIn),
        1 => any::<Index>().prop_map(Step::CheckOut),
    ]
}

fn is_business_rejection(err: &Error) -> bool {
    !matches!(err.kind(), ErrorKind::Internal)
}

/// Active reservations per night for one type, and the in-house rooms.
fn check_invariants(
    db: &Database,
    room_type: RoomTypeId,
    capacity: usize,
) -> Result<(), TestCaseError> {
    let filter = ReservationFilter::new().with_page(0, MAX_PAGE_SIZE);
    let reservations = Database::list_reservations(db.connection(), &filter).unwrap();

    for night in 0..HORIZON {
        let day = date(night);
        let active = reservations
            .iter()
            .filter(|r| r.room_type_id == room_type)
            .filter(|r| {
                matches!(
                    r.status,
                    ReservationStatus::Confirmed | ReservationStatus::CheckedIn
                )
            })
            .filter(|r| r.stay.check_in() <= day && day < r.stay.check_out())
            .count();
        prop_assert!(
            active <= capacity,
            "night {} holds {} active reservations for {} rooms",
            night,
            active,
            capacity
        );
    }

    let in_house: Vec<_> = reservations
        .iter()
        .filter(|r| r.status == ReservationStatus::CheckedIn)
        .filter_map(|r| r.room_id)
        .collect();
    let distinct: HashSet<_> = in_house.iter().collect();
    prop_assert_eq!(distinct.len(), in_house.len());

    let occupied = Database::list_rooms(db.connection(), None)
        .unwrap()
        .into_iter()
        .filter(|room| room.status == RoomStatus::Occupied)
        .count();
    prop_assert_eq!(occupied, in_house.len());
    Ok(())
}

fn first_available(db: &Database, rooms: &[Room]) -> Option<Room> {
    rooms.iter().find_map(|room| {
        Database::require_room(db.connection(), room.id)
            .ok()
            .filter(|current| current.status == RoomStatus::Available)
    })
}

fn pick(ids: &[ReservationId], index: &Index) -> Option<ReservationId> {
    if ids.is_empty() {
        None
    } else {
        Some(ids[index.index(ids.len())])
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 48,
        .. ProptestConfig::default()
    })]

    #[test]
    fn capacity_never_exceeded(
        capacity in 1usize..=3,
        steps in prop::collection::vec(step_strategy(), 1..40)
    ) {
        let mut db = create_test_database();
        let (main_type, main_rooms) = seed_room_type(&mut db, "DLX", capacity);
        let (other_type, other_rooms) = seed_room_type(&mut db, "STD", 1);
        let guest = db.create_guest(&NewGuest::new("Prop Guest")).unwrap().id;
        let config = Config::default();
        let actor = Actor::new(UserId::new(1));
        let mut booked: Vec<ReservationId> = Vec::new();

        for step in steps {
            let result = match step {
                Step::Book { second_type, from, nights } => {
                    let room_type = if second_type { other_type.id } else { main_type.id };
                    let pricing =
                        Pricing::new(Money::new(1_000), Money::ZERO, Money::new(1_000), Money::ZERO);
                    let request =
                        BookingRequest::new(guest, room_type, date(from), date(from + nights), pricing);
                    ReservationManager::new(&mut db, &config)
                        .with_today(date(0))
                        .create(&request, &actor)
                        .map(|reservation| booked.push(reservation.id))
                }
                Step::Cancel(index) => match pick(&booked, &index) {
                    Some(id) => ReservationManager::new(&mut db, &config)
                        .cancel(id, &actor)
                        .map(drop),
                    None => Ok(()),
                },
                Step::CheckIn(index) => match pick(&booked, &index) {
                    Some(id) => {
                        let reservation = Database::require_reservation(db.connection(), id).unwrap();
                        let rooms = if reservation.room_type_id == main_type.id {
                            &main_rooms
                        } else {
                            &other_rooms
                        };
                        match first_available(&db, rooms) {
                            Some(room) => ReservationManager::new(&mut db, &config)
                                .check_in(id, room.id, &actor, None)
                                .map(drop),
                            None => Ok(()),
                        }
                    }
                    None => Ok(()),
                },
                Step::CheckOut(index) => match pick(&booked, &index) {
                    Some(id) => ReservationManager::new(&mut db, &config)
                        .check_out(id, &actor)
                        .map(drop),
                    None => Ok(()),
                },
            };

            if let Err(err) = &result {
                prop_assert!(is_business_rejection(err), "unexpected failure: {:?}", err);
            }
            check_invariants(&db, main_type.id, capacity)?;
            check_invariants(&db, other_type.id, 1)?;
        }
    }
}
