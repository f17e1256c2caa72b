//! Cancel command implementation.

use crate::error::CliError;
use crate::utils::{
    find_reservation, load_configuration, open_database, print_json, with_retry, GlobalOptions,
};
use clap::Args;
use innkeep::ReservationManager;

/// Cancel a confirmed reservation.
#[derive(Args)]
pub struct CancelCommand {
    /// Reservation id or confirmation code
    #[arg(long, value_name = "RESERVATION")]
    pub reservation: String,
}

impl CancelCommand {
    /// Execute the cancel command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let reservation = find_reservation(&db, &self.reservation)?;
        let actor = global.actor();
        let cancelled = with_retry(&config, || {
            ReservationManager::new(&mut db, &config).cancel(reservation.id, &actor)
        })?;

        if global.json {
            return print_json(&cancelled);
        }
        if !global.quiet {
            eprintln!("Cancelled {}", cancelled.confirmation_code);
        }

        Ok(())
    }
}
