//! Room administration.

use crate::error::CliError;
use crate::utils::{
    find_room, find_room_type, load_configuration, open_database, print_json, with_retry,
    GlobalOptions,
};
use clap::{Args, Subcommand};
use innkeep::{Database, NewRoom, RoomStatus};

/// Room subcommands.
#[derive(Subcommand)]
pub enum RoomCommand {
    /// Register a room
    Add(AddRoom),

    /// List rooms
    List(ListRooms),

    /// Take a room out of order or put it back
    SetStatus(SetRoomStatus),
}

/// Arguments of `room add`.
#[derive(Args)]
pub struct AddRoom {
    /// Room number as shown on the door
    #[arg(long)]
    pub number: String,

    /// Room type id or code
    #[arg(long = "type", value_name = "TYPE")]
    pub room_type: String,

    /// Floor
    #[arg(long)]
    pub floor: Option<i64>,
}

/// Arguments of `room list`.
#[derive(Args)]
pub struct ListRooms {
    /// Only rooms of this type (id or code)
    #[arg(long = "type", value_name = "TYPE")]
    pub room_type: Option<String>,
}

/// Arguments of `room set-status`.
#[derive(Args)]
pub struct SetRoomStatus {
    /// Room number
    #[arg(long = "room", visible_alias = "id", value_name = "NUMBER")]
    pub number: String,

    /// New status: available or out_of_order
    #[arg(long)]
    pub status: RoomStatus,
}

impl RoomCommand {
    /// Execute the room command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        match self {
            RoomCommand::Add(args) => {
                let room_type = find_room_type(&db, &args.room_type)?;
                let new = NewRoom::new(args.number, room_type.id).with_floor(args.floor);
                let room = with_retry(&config, || db.create_room(&new))?;

                if global.json {
                    return print_json(&room);
                }
                if !global.quiet {
                    eprintln!("Added room {} ({})", room.room_number, room_type.code);
                }
                println!("{}", room.id);
            }
            RoomCommand::List(args) => {
                let room_type_id = match args.room_type {
                    Some(ref key) => Some(find_room_type(&db, key)?.id),
                    None => None,
                };
                let rooms = Database::list_rooms(db.connection(), room_type_id)?;

                if global.json {
                    return print_json(&rooms);
                }
                println!("ID\tNUMBER\tTYPE\tFLOOR\tSTATUS");
                for room in rooms {
                    println!(
                        "{}\t{}\t{}\t{}\t{}",
                        room.id,
                        room.room_number,
                        room.room_type_id,
                        room.floor.map_or_else(|| "-".to_string(), |f| f.to_string()),
                        room.status
                    );
                }
            }
            RoomCommand::SetStatus(args) => {
                let room = find_room(&db, &args.number)?;
                let room = with_retry(&config, || db.set_room_status(room.id, args.status))?;

                if global.json {
                    return print_json(&room);
                }
                if !global.quiet {
                    eprintln!("Room {} is now {}", room.room_number, room.status);
                }
            }
        }

        Ok(())
    }
}
