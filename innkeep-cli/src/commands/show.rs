//! Show command implementation.

use crate::error::CliError;
use crate::utils::{
    find_reservation, format_timestamp, load_configuration, open_database, print_json,
    GlobalOptions,
};
use clap::Args;
use innkeep::{Database, Payment, Reservation};
use serde::Serialize;

/// Show one reservation and its payments.
#[derive(Args)]
pub struct ShowCommand {
    /// Reservation id or confirmation code
    #[arg(long, value_name = "RESERVATION")]
    pub reservation: String,
}

#[derive(Serialize)]
struct ReservationDetail {
    #[serde(flatten)]
    reservation: Reservation,
    payments: Vec<Payment>,
}

impl ShowCommand {
    /// Execute the show command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let reservation = find_reservation(&db, &self.reservation)?;
        let payments = Database::list_payments(db.connection(), reservation.id)?;

        if global.json {
            return print_json(&ReservationDetail {
                reservation,
                payments,
            });
        }

        let r = &reservation;
        println!("id\t{}", r.id);
        println!("code\t{}", r.confirmation_code);
        println!("status\t{}", r.status);
        println!("guest\t{}", r.guest_id);
        println!("room_type\t{}", r.room_type_id);
        println!(
            "room\t{}",
            r.room_id.map_or_else(|| "-".to_string(), |id| id.to_string())
        );
        println!("stay\t{} ({} nights)", r.stay, r.nights());
        println!("party\t{} adult(s), {} child(ren)", r.adults, r.children);
        println!("total\t{}", r.pricing.total_amount);
        println!("deposit\t{}", r.pricing.deposit_amount);
        println!("booked\t{}", format_timestamp(r.created_at));
        if let Some(requests) = r.special_requests.as_deref() {
            println!("requests\t{requests}");
        }
        if let Some(settled_at) = r.deposit_settled_at {
            println!(
                "settled\t{}\trefunded {}\towed {}",
                format_timestamp(settled_at),
                r.deposit_refunded.unwrap_or_default(),
                r.balance_owed.unwrap_or_default()
            );
        }

        for payment in &payments {
            println!(
                "payment\t{}\t{}\t{}\t{}{}",
                payment.id,
                payment.payment_type,
                payment.amount,
                format_timestamp(payment.created_at),
                if payment.voided { "\tvoided" } else { "" }
            );
        }

        Ok(())
    }
}
