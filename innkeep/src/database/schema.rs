//! Database schema definitions and SQL constants.
//!
//! Money columns hold signed minor units. Date columns hold ISO-8601 text,
//! which sorts chronologically, so interval comparisons can be done in SQL.

/// Current schema version for the database.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// SQL statement to create the metadata table.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to create the room types table.
pub const CREATE_ROOM_TYPES_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS room_types (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        code TEXT NOT NULL UNIQUE,
        name TEXT NOT NULL,
        nightly_rate INTEGER NOT NULL CHECK (nightly_rate >= 0),
        created_at TEXT NOT NULL
    )";

/// SQL statement to create the rooms table.
pub const CREATE_ROOMS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS rooms (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        room_number TEXT NOT NULL UNIQUE,
        room_type_id INTEGER NOT NULL REFERENCES room_types(id),
        floor INTEGER,
        status TEXT NOT NULL DEFAULT 'available'
            CHECK (status IN ('available', 'occupied', 'out_of_order'))
    )";

/// SQL statement to create the guests table.
pub const CREATE_GUESTS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS guests (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        full_name TEXT NOT NULL,
        email TEXT,
        phone TEXT,
        created_at TEXT NOT NULL
    )";

/// SQL statement to create the reservations table.
///
/// `guest_id` carries no foreign key: guests belong to the directory
/// collaborator, which need not live in this database.
pub const CREATE_RESERVATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reservations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        confirmation_code TEXT NOT NULL UNIQUE,
        guest_id INTEGER NOT NULL,
        room_type_id INTEGER NOT NULL REFERENCES room_types(id),
        room_id INTEGER REFERENCES rooms(id),
        check_in_date TEXT NOT NULL,
        check_out_date TEXT NOT NULL,
        status TEXT NOT NULL
            CHECK (status IN ('confirmed', 'checked_in', 'checked_out', 'cancelled')),
        adults INTEGER NOT NULL DEFAULT 1 CHECK (adults >= 1),
        children INTEGER NOT NULL DEFAULT 0 CHECK (children >= 0),
        special_requests TEXT,
        rate_per_night INTEGER NOT NULL CHECK (rate_per_night >= 0),
        subtotal INTEGER NOT NULL CHECK (subtotal >= 0),
        discount_amount INTEGER NOT NULL CHECK (discount_amount >= 0),
        total_amount INTEGER NOT NULL,
        deposit_amount INTEGER NOT NULL CHECK (deposit_amount >= 0),
        created_at TEXT NOT NULL,
        created_by INTEGER NOT NULL,
        checked_in_at TEXT,
        checked_in_by INTEGER,
        checked_out_at TEXT,
        checked_out_by INTEGER,
        cancelled_at TEXT,
        cancelled_by INTEGER,
        deposit_refunded INTEGER,
        balance_owed INTEGER,
        deposit_settled_at TEXT,
        CHECK (check_out_date > check_in_date),
        CHECK (total_amount = subtotal - discount_amount),
        CHECK (deposit_amount <= total_amount),
        CHECK (status = 'confirmed' OR status = 'cancelled' OR room_id IS NOT NULL),
        CHECK (status <> 'checked_out' OR deposit_settled_at IS NOT NULL)
    )";

/// Index backing the overlap count.
pub const CREATE_AVAILABILITY_INDEX: &str = r"
    CREATE INDEX IF NOT EXISTS idx_reservations_availability
    ON reservations(room_type_id, status, check_in_date, check_out_date)";

/// One checked-in reservation per room.
pub const CREATE_IN_HOUSE_INDEX: &str = r"
    CREATE UNIQUE INDEX IF NOT EXISTS idx_reservations_room_in_house
    ON reservations(room_id) WHERE status = 'checked_in'";

/// Index for listing a guest's reservations.
pub const CREATE_GUEST_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_guest ON reservations(guest_id)";

/// SQL statement to create the payments table.
pub const CREATE_PAYMENTS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS payments (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        reservation_id INTEGER NOT NULL REFERENCES reservations(id),
        amount INTEGER NOT NULL,
        payment_type TEXT NOT NULL
            CHECK (payment_type IN ('deposit', 'payment', 'adjustment', 'refund')),
        method TEXT,
        reference TEXT,
        voided INTEGER NOT NULL DEFAULT 0 CHECK (voided IN (0, 1)),
        created_at TEXT NOT NULL,
        created_by INTEGER NOT NULL,
        CHECK (amount > 0 OR (payment_type = 'adjustment' AND amount <> 0))
    )";

/// Index for summing a reservation's payments.
pub const CREATE_PAYMENT_RESERVATION_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_payments_reservation ON payments(reservation_id)";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// Column list shared by every reservation query, in `row_to_reservation` order.
pub const RESERVATION_COLUMNS: &str = r"
    id, confirmation_code, guest_id, room_type_id, room_id,
    check_in_date, check_out_date, status, adults, children, special_requests,
    rate_per_night, subtotal, discount_amount, total_amount, deposit_amount,
    created_at, created_by, checked_in_at, checked_in_by,
    checked_out_at, checked_out_by, cancelled_at, cancelled_by,
    deposit_refunded, balance_owed, deposit_settled_at";

/// Overlap count for one room type: `[a, b)` and `[c, d)` overlap iff `a < d AND c < b`.
///
/// Parameters: room type id, requested check-in, requested check-out.
pub const COUNT_OVERLAPPING: &str = r"
    SELECT COUNT(*) FROM reservations
    WHERE room_type_id = ?1
      AND status IN ('confirmed', 'checked_in')
      AND check_in_date < ?3
      AND ?2 < check_out_date";

/// Sum of payments that count toward the amount paid.
pub const SUM_PAID: &str = r"
    SELECT COALESCE(SUM(amount), 0) FROM payments
    WHERE reservation_id = ? AND voided = 0 AND payment_type <> 'refund'";
