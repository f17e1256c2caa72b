//! CLI command implementations.
//!
//! - `init`: Create the data directory and database
//! - `room_type`, `room`, `guest`: Inventory and guest administration
//! - `availability`: Free rooms of a type for a date range
//! - `book`, `check_in`, `check_out`, `cancel`: The reservation lifecycle
//! - `show`, `list`, `balance`: Reservation queries
//! - `pay`, `void_payment`: Payment recording
//! - `completions`: Shell completion scripts

pub mod availability;
pub mod balance;
pub mod book;
pub mod cancel;
pub mod check_in;
pub mod check_out;
pub mod completions;
pub mod guest;
pub mod init;
pub mod list;
pub mod pay;
pub mod room;
pub mod room_type;
pub mod show;
pub mod void_payment;

pub use availability::AvailabilityCommand;
pub use balance::BalanceCommand;
pub use book::BookCommand;
pub use cancel::CancelCommand;
pub use check_in::CheckInCommand;
pub use check_out::CheckOutCommand;
pub use completions::CompletionsCommand;
pub use guest::GuestCommand;
pub use init::InitCommand;
pub use list::ListCommand;
pub use pay::PayCommand;
pub use room::RoomCommand;
pub use room_type::RoomTypeCommand;
pub use show::ShowCommand;
pub use void_payment::VoidPaymentCommand;
