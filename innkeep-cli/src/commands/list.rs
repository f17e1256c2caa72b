//! List command implementation.
//!
//! This module implements the `list` command, which displays reservations
//! page by page in various formats (table, JSON, CSV, TSV).

use crate::error::CliError;
use crate::utils::{format_timestamp, load_configuration, open_database, GlobalOptions};
use clap::{Args, ValueEnum};
use innkeep::database::{ReservationFilter, DEFAULT_PAGE_SIZE};
use innkeep::{Database, GuestId, Reservation, ReservationStatus};
use std::io::Write;

/// Column headers for CSV/TSV output.
const COLUMN_HEADERS: [&str; 9] = [
    "id",
    "code",
    "status",
    "guest",
    "room_type",
    "room",
    "check_in",
    "check_out",
    "total",
];

/// List reservations.
#[derive(Args)]
pub struct ListCommand {
    /// Output format (--json overrides)
    #[arg(
        long,
        value_enum,
        default_value = "table",
        env = "INNKEEP_OUTPUT_FORMAT",
        ignore_case = true
    )]
    pub format: OutputFormat,

    /// Only reservations in this state
    #[arg(long)]
    pub status: Option<ReservationStatus>,

    /// Only reservations of this guest
    #[arg(long, value_name = "GUEST_ID")]
    pub guest: Option<GuestId>,

    /// Rows to skip
    #[arg(long, default_value_t = 0)]
    pub skip: u32,

    /// Rows to return (1 to 100)
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub limit: u32,
}

/// Output format for list command.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab-separated table format (human-readable)
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// TSV format (tab-separated values)
    Tsv,
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let filter = ReservationFilter::new()
            .with_status(self.status)
            .with_guest(self.guest)
            .with_page(self.skip, self.limit);
        let reservations = Database::list_reservations(db.connection(), &filter)?;

        let format = if global.json {
            OutputFormat::Json
        } else {
            self.format
        };
        match format {
            OutputFormat::Table => format_as_table(&reservations)?,
            OutputFormat::Json => crate::utils::print_json(&reservations)?,
            OutputFormat::Csv => format_as_delimited(&reservations, b',')?,
            OutputFormat::Tsv => format_as_delimited(&reservations, b'\t')?,
        }

        Ok(())
    }
}

fn row(r: &Reservation) -> [String; 9] {
    [
        r.id.to_string(),
        r.confirmation_code.to_string(),
        r.status.to_string(),
        r.guest_id.to_string(),
        r.room_type_id.to_string(),
        r.room_id.map(|id| id.to_string()).unwrap_or_default(),
        r.stay.check_in().to_string(),
        r.stay.check_out().to_string(),
        r.pricing.total_amount.to_string(),
    ]
}

/// Format reservations as a human-readable table.
fn format_as_table(reservations: &[Reservation]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let header_line = COLUMN_HEADERS
        .iter()
        .map(|s| s.to_uppercase())
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(handle, "{header_line}")?;

    for res in reservations {
        let mut fields = row(res);
        if fields[5].is_empty() {
            fields[5] = "-".to_string();
        }
        writeln!(handle, "{}\t{}", fields.join("\t"), format_timestamp(res.created_at))?;
    }

    Ok(())
}

/// Convert csv::Error to CliError.
fn csv_error(e: csv::Error) -> CliError {
    CliError::Io(std::io::Error::other(e))
}

/// Format reservations as delimited output (CSV or TSV).
fn format_as_delimited(reservations: &[Reservation], delimiter: u8) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let handle = stdout.lock();
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(handle);

    writer.write_record(COLUMN_HEADERS).map_err(csv_error)?;
    for res in reservations {
        writer.write_record(row(res)).map_err(csv_error)?;
    }

    writer.flush()?;

    Ok(())
}
