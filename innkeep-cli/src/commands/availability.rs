//! Availability command implementation.

use crate::error::CliError;
use crate::utils::{find_room_type, load_configuration, open_database, print_json, GlobalOptions};
use chrono::NaiveDate;
use clap::Args;
use innkeep::ReservationManager;

/// Count free rooms of a type for a date range.
#[derive(Args)]
pub struct AvailabilityCommand {
    /// Room type id or code
    #[arg(long = "type", value_name = "TYPE")]
    pub room_type: String,

    /// First night (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub check_in: NaiveDate,

    /// Departure day (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub check_out: NaiveDate,
}

impl AvailabilityCommand {
    /// Execute the availability command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let room_type = find_room_type(&db, &self.room_type)?;
        let availability = ReservationManager::new(&mut db, &config).check_availability(
            room_type.id,
            self.check_in,
            self.check_out,
        )?;

        if global.json {
            return print_json(&availability);
        }

        println!("{}", availability.available_count.max(0));
        if !global.quiet {
            eprintln!(
                "{} {} to {}: {}",
                availability.room_type_name,
                availability.check_in,
                availability.check_out,
                availability.message
            );
        }

        // Nothing free is a normal answer, not an error
        Ok(())
    }
}
