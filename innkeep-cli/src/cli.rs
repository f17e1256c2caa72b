//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    AvailabilityCommand, BalanceCommand, BookCommand, CancelCommand, CheckInCommand,
    CheckOutCommand, CompletionsCommand, GuestCommand, InitCommand, ListCommand, PayCommand,
    RoomCommand, RoomTypeCommand, ShowCommand, VoidPaymentCommand,
};
use clap::{Parser, Subcommand};
use innkeep::{Role, UserId};
use std::path::PathBuf;

/// Front-desk tool for the innkeep reservation engine.
#[derive(Parser)]
#[command(name = "innkeep")]
#[command(version, about = "Run hotel reservations from the command line", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "INNKEEP_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the busy timeout (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "INNKEEP_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization
    #[arg(long, global = true, env = "INNKEEP_DISABLE_AUTOINIT")]
    pub disable_autoinit: bool,

    /// User id recorded on every change
    #[arg(
        long,
        value_name = "USER_ID",
        global = true,
        env = "INNKEEP_ACTOR",
        default_value = "1"
    )]
    pub actor: UserId,

    /// Role of the acting user
    #[arg(
        long,
        value_name = "ROLE",
        global = true,
        env = "INNKEEP_ROLE",
        default_value = "front-desk"
    )]
    pub role: Role,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Initialize the data directory and database
    Init(InitCommand),

    /// Manage room types
    #[command(subcommand)]
    RoomType(RoomTypeCommand),

    /// Manage rooms
    #[command(subcommand)]
    Room(RoomCommand),

    /// Manage guests
    #[command(subcommand)]
    Guest(GuestCommand),

    /// Count free rooms of a type for a date range
    Availability(AvailabilityCommand),

    /// Book a room type for a date range
    Book(BookCommand),

    /// Check a guest in to a room
    CheckIn(CheckInCommand),

    /// Check a guest out and settle the deposit
    CheckOut(CheckOutCommand),

    /// Cancel a confirmed reservation
    Cancel(CancelCommand),

    /// Show one reservation and its payments
    Show(ShowCommand),

    /// List reservations
    List(ListCommand),

    /// Show what has been paid and what is left
    Balance(BalanceCommand),

    /// Record a payment
    Pay(PayCommand),

    /// Void a recorded payment
    VoidPayment(VoidPaymentCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
