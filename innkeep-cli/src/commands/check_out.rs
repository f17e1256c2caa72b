//! Check-out command implementation.
//!
//! Prints the settlement: what the guest gets back and what they still owe.

use crate::error::CliError;
use crate::utils::{
    find_reservation, load_configuration, open_database, print_json, with_retry, GlobalOptions,
};
use clap::Args;
use innkeep::ReservationManager;

/// Check a guest out and settle the deposit.
#[derive(Args)]
pub struct CheckOutCommand {
    /// Reservation id or confirmation code
    #[arg(long, value_name = "RESERVATION")]
    pub reservation: String,
}

impl CheckOutCommand {
    /// Execute the check-out command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let reservation = find_reservation(&db, &self.reservation)?;
        let actor = global.actor();
        let outcome = with_retry(&config, || {
            ReservationManager::new(&mut db, &config).check_out(reservation.id, &actor)
        })?;

        if global.json {
            return print_json(&outcome);
        }

        let settlement = &outcome.settlement;
        if let Some(currency) = config.currency.as_deref() {
            println!("currency\t{currency}");
        }
        println!("total\t{}", settlement.total_amount);
        println!("paid\t{}", settlement.total_paid);
        println!("balance\t{}", settlement.balance);
        println!("refund\t{}", settlement.to_refund);
        println!("owed\t{}", settlement.balance_owed);
        if !global.quiet {
            eprintln!(
                "Checked out {} ({}) from room {}: {}",
                outcome.reservation.confirmation_code,
                outcome.guest_name.as_deref().unwrap_or("unknown guest"),
                outcome.room_number.as_deref().unwrap_or("-"),
                settlement.note
            );
        }

        Ok(())
    }
}
