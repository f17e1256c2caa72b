//! Build script for innkeep-cli.
//!
//! Generates the man page at build time using clap_mangen and places it in
//! OUT_DIR for inclusion in release builds.
//!
//! Build scripts cannot depend on the crate being built, so the command
//! tree is declared again here.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// Keep in sync with src/cli.rs.
fn build_cli() -> Command {
    Command::new("innkeep")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Run hotel reservations from the command line")
        .long_about(
            "Front-desk tool for booking room types, checking guests in and out, \
             and settling deposits against a local SQLite database",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Override the data directory location")
                .value_name("PATH")
                .global(true)
                .env("INNKEEP_DATA_DIR"),
        )
        .arg(
            Arg::new("busy-timeout")
                .long("busy-timeout")
                .help("Override the busy timeout (in seconds)")
                .value_name("SECONDS")
                .global(true)
                .env("INNKEEP_BUSY_TIMEOUT"),
        )
        .arg(
            Arg::new("disable-autoinit")
                .long("disable-autoinit")
                .help("Disable automatic database initialization")
                .global(true)
                .action(clap::ArgAction::SetTrue)
                .env("INNKEEP_DISABLE_AUTOINIT"),
        )
        .arg(
            Arg::new("actor")
                .long("actor")
                .help("User id recorded on every change")
                .value_name("USER_ID")
                .global(true)
                .env("INNKEEP_ACTOR"),
        )
        .arg(
            Arg::new("role")
                .long("role")
                .help("Role of the acting user")
                .value_name("ROLE")
                .global(true)
                .env("INNKEEP_ROLE"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print machine-readable JSON")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .subcommands(vec![
            Command::new("init")
                .about("Initialize the data directory and database")
                .long_about("Create the innkeep database and, optionally, a configuration file"),
            Command::new("room-type")
                .about("Manage room types")
                .long_about("Register and list room types (add, list)"),
            Command::new("room")
                .about("Manage rooms")
                .long_about("Register, list and take rooms out of order (add, list, set-status)"),
            Command::new("guest")
                .about("Manage guests")
                .long_about("Register and list guests (add, list)"),
            Command::new("availability")
                .about("Count free rooms of a type for a date range")
                .long_about("Report how many rooms of a type are still free for [check-in, check-out)"),
            Command::new("book")
                .about("Book a room type for a date range")
                .long_about("Create a confirmed reservation and print its confirmation code"),
            Command::new("check-in")
                .about("Check a guest in to a room")
                .long_about("Assign a room of the booked type and mark it occupied"),
            Command::new("check-out")
                .about("Check a guest out and settle the deposit")
                .long_about("Free the room and report the refund or the amount still owed"),
            Command::new("cancel")
                .about("Cancel a confirmed reservation")
                .long_about("Cancel a reservation that has not been checked in"),
            Command::new("show")
                .about("Show one reservation and its payments")
                .long_about("Display a reservation by id or confirmation code"),
            Command::new("list")
                .about("List reservations")
                .long_about("List reservations page by page, filtered by status or guest"),
            Command::new("balance")
                .about("Show what has been paid and what is left")
                .long_about("Report total, paid, balance and deposit of a reservation"),
            Command::new("pay")
                .about("Record a payment")
                .long_about("Record a deposit, payment, adjustment or refund"),
            Command::new("void-payment")
                .about("Void a recorded payment")
                .long_about("Mark a payment voided so it no longer counts as paid"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("innkeep.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
