//! Balance command implementation.

use crate::error::CliError;
use crate::utils::{
    find_reservation, load_configuration, open_database, print_json, GlobalOptions,
};
use clap::Args;
use innkeep::ReservationManager;

/// Show what has been paid and what is left.
#[derive(Args)]
pub struct BalanceCommand {
    /// Reservation id or confirmation code
    #[arg(long, value_name = "RESERVATION")]
    pub reservation: String,
}

impl BalanceCommand {
    /// Execute the balance command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let reservation = find_reservation(&db, &self.reservation)?;
        let summary = ReservationManager::new(&mut db, &config).balance(reservation.id)?;

        if global.json {
            return print_json(&summary);
        }

        println!("status\t{}", summary.status);
        println!("total\t{}", summary.total_amount);
        println!("paid\t{}", summary.total_paid);
        println!("balance\t{}", summary.balance);
        println!("deposit\t{}", summary.deposit_amount);
        println!("payment_status\t{}", summary.payment_status);
        println!("after_deposit\t{}", summary.final_balance_after_deposit);

        Ok(())
    }
}
