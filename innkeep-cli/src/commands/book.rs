//! Book command implementation.
//!
//! Books a room type for a date range. On success the confirmation code is
//! printed on stdout so scripts can capture it.

use crate::error::CliError;
use crate::utils::{
    find_room_type, load_configuration, open_database, print_json, with_retry, GlobalOptions,
};
use chrono::NaiveDate;
use clap::Args;
use innkeep::{BookingRequest, GuestId, Money, Pricing, ReservationManager};

/// Book a room type for a date range.
#[derive(Args)]
pub struct BookCommand {
    /// Guest id
    #[arg(long, value_name = "GUEST_ID")]
    pub guest: GuestId,

    /// Room type id or code
    #[arg(long = "type", value_name = "TYPE")]
    pub room_type: String,

    /// First night (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub check_in: NaiveDate,

    /// Departure day (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub check_out: NaiveDate,

    /// Price before discount
    #[arg(long, value_name = "AMOUNT")]
    pub subtotal: Money,

    /// Discount granted
    #[arg(long, value_name = "AMOUNT", default_value = "0")]
    pub discount: Money,

    /// Amount due; must equal subtotal minus discount
    #[arg(long, value_name = "AMOUNT")]
    pub total: Money,

    /// Deposit taken at booking
    #[arg(long, value_name = "AMOUNT", default_value = "0")]
    pub deposit: Money,

    /// Nightly rate (default: the room type's rate)
    #[arg(long, value_name = "AMOUNT")]
    pub rate: Option<Money>,

    /// Adults in the party
    #[arg(long, default_value_t = 1)]
    pub adults: u32,

    /// Children in the party
    #[arg(long, default_value_t = 0)]
    pub children: u32,

    /// Free-form requests
    #[arg(long)]
    pub requests: Option<String>,
}

impl BookCommand {
    /// Execute the book command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let room_type = find_room_type(&db, &self.room_type)?;
        let pricing = Pricing::new(self.subtotal, self.discount, self.total, self.deposit);
        let request = BookingRequest::new(
            self.guest,
            room_type.id,
            self.check_in,
            self.check_out,
            pricing,
        )
        .with_rate_per_night(self.rate)
        .with_party(self.adults, self.children)
        .with_special_requests(self.requests);

        let actor = global.actor();
        let reservation = with_retry(&config, || {
            ReservationManager::new(&mut db, &config).create(&request, &actor)
        })?;

        if global.json {
            return print_json(&reservation);
        }

        if !global.quiet {
            eprintln!(
                "Booked {} for {} night(s), {} to {} (reservation {})",
                room_type.name,
                reservation.nights(),
                reservation.stay.check_in(),
                reservation.stay.check_out(),
                reservation.id
            );
        }
        println!("{}", reservation.confirmation_code);

        Ok(())
    }
}
