//! Void-payment command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, print_json, with_retry, GlobalOptions};
use clap::Args;
use innkeep::PaymentId;

/// Void a recorded payment so it no longer counts.
#[derive(Args)]
pub struct VoidPaymentCommand {
    /// Payment id
    #[arg(long, value_name = "PAYMENT_ID")]
    pub payment: PaymentId,
}

impl VoidPaymentCommand {
    /// Execute the void-payment command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let actor = global.actor();
        let payment = with_retry(&config, || db.void_payment(self.payment, &actor))?;

        if global.json {
            return print_json(&payment);
        }
        if !global.quiet {
            eprintln!("Voided payment {}", payment.id);
        }

        Ok(())
    }
}
