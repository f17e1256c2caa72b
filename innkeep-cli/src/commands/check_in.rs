//! Check-in command implementation.

use crate::error::CliError;
use crate::utils::{
    find_reservation, find_room, load_configuration, open_database, print_json, with_retry,
    GlobalOptions,
};
use clap::Args;
use innkeep::ReservationManager;

/// Check a guest in to a room.
#[derive(Args)]
pub struct CheckInCommand {
    /// Reservation id or confirmation code
    #[arg(long, value_name = "RESERVATION")]
    pub reservation: String,

    /// Room number
    #[arg(long, value_name = "NUMBER")]
    pub room: String,

    /// Refuse check-in unless something has been paid
    #[arg(long, conflicts_with = "no_require_payment")]
    pub require_payment: bool,

    /// Allow check-in without any payment
    #[arg(long)]
    pub no_require_payment: bool,
}

impl CheckInCommand {
    fn payment_gate(&self) -> Option<bool> {
        if self.require_payment {
            Some(true)
        } else if self.no_require_payment {
            Some(false)
        } else {
            None
        }
    }

    /// Execute the check-in command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let reservation = find_reservation(&db, &self.reservation)?;
        let room = find_room(&db, &self.room)?;
        let require_payment = self.payment_gate();
        let actor = global.actor();

        let outcome = with_retry(&config, || {
            ReservationManager::new(&mut db, &config).check_in(
                reservation.id,
                room.id,
                &actor,
                require_payment,
            )
        })?;

        if global.json {
            return print_json(&outcome);
        }

        if !global.quiet {
            eprintln!(
                "Checked in {} ({}) to room {} ({}, paid {})",
                outcome.reservation.confirmation_code,
                outcome.guest_name.as_deref().unwrap_or("unknown guest"),
                outcome.room_number,
                outcome.payment_status,
                outcome.total_paid
            );
        }
        println!("{}", outcome.room_number);

        Ok(())
    }
}
