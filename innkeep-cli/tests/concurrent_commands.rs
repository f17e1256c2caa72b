//! Several `innkeep` processes working on one database at once.

mod common;

use std::thread;

use common::TestEnv;

const PROCESSES: usize = 6;

/// **What this tests:** Six processes book the only suite for the same
/// nights simultaneously.
///
/// **Expected:** one exits 0, the rest exit 1 (conflict); none times out.
#[test]
fn test_processes_race_for_last_room() {
    let env = TestEnv::new();
    env.add_room_type("STE", "Suite", 1);
    let guest = env.add_guest("Race Guest");

    let handles: Vec<_> = (0..PROCESSES)
        .map(|_| {
            let mut cmd = env.command();
            cmd.args([
                "book",
                "--guest",
                &guest,
                "--type",
                "STE",
                "--check-in",
                "2031-12-20",
                "--check-out",
                "2031-12-27",
                "--subtotal",
                "700",
                "--total",
                "700",
            ]);
            thread::spawn(move || cmd.output().expect("Failed to run innkeep"))
        })
        .collect();

    let codes: Vec<i32> = handles
        .into_iter()
        .map(|h| h.join().unwrap().status.code().unwrap_or(-1))
        .collect();

    assert_eq!(codes.iter().filter(|c| **c == 0).count(), 1, "{codes:?}");
    assert_eq!(codes.iter().filter(|c| **c == 1).count(), PROCESSES - 1, "{codes:?}");

    let active = env.run_json(&["list", "--status", "confirmed"]);
    assert_eq!(active.as_array().unwrap().len(), 1);
}

/// **What this tests:** Six confirmed reservations are checked into the
/// same room by six processes at once.
///
/// **Expected:** exactly one check-in succeeds and the room is occupied.
#[test]
fn test_processes_race_for_same_room() {
    let env = TestEnv::new();
    let rooms = env.add_room_type("DLX", "Deluxe", PROCESSES);
    let guest = env.add_guest("Race Guest");
    let codes: Vec<String> = (0..PROCESSES)
        .map(|_| env.book(&guest, "DLX", "2031-12-01", "2031-12-03"))
        .collect();

    let handles: Vec<_> = codes
        .iter()
        .map(|code| {
            let mut cmd = env.command();
            cmd.args(["check-in", "--reservation", code, "--room", &rooms[0]]);
            thread::spawn(move || cmd.output().expect("Failed to run innkeep"))
        })
        .collect();

    let exits: Vec<i32> = handles
        .into_iter()
        .map(|h| h.join().unwrap().status.code().unwrap_or(-1))
        .collect();
    assert_eq!(exits.iter().filter(|c| **c == 0).count(), 1, "{exits:?}");

    let in_house = env.run_json(&["list", "--status", "checked_in"]);
    assert_eq!(in_house.as_array().unwrap().len(), 1);

    let listed = env.run_json(&["room", "list", "--type", "DLX"]);
    assert_eq!(listed[0]["status"], "occupied");
    assert_eq!(listed[1]["status"], "available");
}
