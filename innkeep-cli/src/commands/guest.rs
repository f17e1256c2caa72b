//! Guest registration.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, print_json, with_retry, GlobalOptions};
use clap::{Args, Subcommand};
use innkeep::{Database, NewGuest};

/// Guest subcommands.
#[derive(Subcommand)]
pub enum GuestCommand {
    /// Register a guest
    Add(AddGuest),

    /// List guests
    List,
}

/// Arguments of `guest add`.
#[derive(Args)]
pub struct AddGuest {
    /// Full name
    #[arg(long)]
    pub name: String,

    /// E-mail address
    #[arg(long)]
    pub email: Option<String>,

    /// Phone number
    #[arg(long)]
    pub phone: Option<String>,
}

impl GuestCommand {
    /// Execute the guest command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        match self {
            GuestCommand::Add(args) => {
                let new = NewGuest::new(args.name)
                    .with_email(args.email)
                    .with_phone(args.phone);
                let guest = with_retry(&config, || db.create_guest(&new))?;

                if global.json {
                    return print_json(&guest);
                }
                if !global.quiet {
                    eprintln!("Registered guest {}", guest.full_name);
                }
                println!("{}", guest.id);
            }
            GuestCommand::List => {
                let guests = Database::list_guests(db.connection())?;

                if global.json {
                    return print_json(&guests);
                }
                println!("ID\tNAME\tEMAIL\tPHONE");
                for guest in guests {
                    println!(
                        "{}\t{}\t{}\t{}",
                        guest.id,
                        guest.full_name,
                        guest.email.as_deref().unwrap_or("-"),
                        guest.phone.as_deref().unwrap_or("-")
                    );
                }
            }
        }

        Ok(())
    }
}
