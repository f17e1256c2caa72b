//! Pay command implementation.

use crate::error::CliError;
use crate::utils::{
    find_reservation, load_configuration, open_database, print_json, with_retry, GlobalOptions,
};
use clap::Args;
use innkeep::{Money, NewPayment, PaymentMethod, PaymentType};

/// Record a payment against a reservation.
#[derive(Args)]
pub struct PayCommand {
    /// Reservation id or confirmation code
    #[arg(long, value_name = "RESERVATION")]
    pub reservation: String,

    /// Amount in minor currency units; negative only for adjustments
    #[arg(long, value_name = "AMOUNT", allow_hyphen_values = true)]
    pub amount: Money,

    /// Kind: deposit, payment, adjustment or refund
    #[arg(long = "type", value_name = "TYPE", default_value = "payment")]
    pub payment_type: PaymentType,

    /// How it was paid
    #[arg(long)]
    pub method: Option<PaymentMethod>,

    /// External reference such as a card slip number
    #[arg(long)]
    pub reference: Option<String>,
}

impl PayCommand {
    /// Execute the pay command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let reservation = find_reservation(&db, &self.reservation)?;
        let new = NewPayment::new(reservation.id, self.amount, self.payment_type)
            .with_method(self.method)
            .with_reference(self.reference);
        let actor = global.actor();
        let payment = with_retry(&config, || db.record_payment(&new, &actor))?;

        if global.json {
            return print_json(&payment);
        }
        if !global.quiet {
            eprintln!(
                "Recorded {} of {} on {}",
                payment.payment_type, payment.amount, reservation.confirmation_code
            );
        }
        println!("{}", payment.id);

        Ok(())
    }
}
