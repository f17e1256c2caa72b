//! Room type administration.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, print_json, with_retry, GlobalOptions};
use clap::{Args, Subcommand};
use innkeep::{Database, Money, NewRoomType};

/// Room type subcommands.
#[derive(Subcommand)]
pub enum RoomTypeCommand {
    /// Register a room type
    Add(AddRoomType),

    /// List room types with their room counts
    List,
}

/// Arguments of `room-type add`.
#[derive(Args)]
pub struct AddRoomType {
    /// Unique short code, e.g. DLX
    #[arg(long)]
    pub code: String,

    /// Display name
    #[arg(long)]
    pub name: String,

    /// Nightly rate in minor currency units
    #[arg(long, value_name = "AMOUNT")]
    pub rate: Money,
}

impl RoomTypeCommand {
    /// Execute the room type command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        match self {
            RoomTypeCommand::Add(args) => {
                let new = NewRoomType::new(args.code, args.name, args.rate);
                let room_type = with_retry(&config, || db.create_room_type(&new))?;

                if global.json {
                    return print_json(&room_type);
                }
                if !global.quiet {
                    eprintln!("Added room type {} ({})", room_type.code, room_type.name);
                }
                println!("{}", room_type.id);
            }
            RoomTypeCommand::List => {
                let conn = db.connection();
                let room_types = Database::list_room_types(conn)?;

                if global.json {
                    return print_json(&room_types);
                }
                println!("ID\tCODE\tNAME\tRATE\tROOMS");
                for room_type in room_types {
                    let rooms = Database::room_type_capacity(conn, room_type.id)?;
                    println!(
                        "{}\t{}\t{}\t{}\t{}",
                        room_type.id, room_type.code, room_type.name, room_type.nightly_rate, rooms
                    );
                }
            }
        }

        Ok(())
    }
}
