#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use lunchly_core::{
    open_db_in_memory, Customer, CustomerAttrs, CustomerRecord, CustomerRepository, DbOptions,
    Record, RecordId, Reservation, ReservationAttrs, ReservationRepository,
    SqliteCustomerRepository, SqliteReservationRepository,
};
use rusqlite::Connection;

/// Schema the entity layer expects to already exist.
pub const SCHEMA_SQL: &str = "
CREATE TABLE customers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    phone TEXT,
    notes TEXT NOT NULL DEFAULT ''
);

CREATE TABLE reservations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    customer_id INTEGER NOT NULL REFERENCES customers (id),
    start_at TEXT NOT NULL,
    num_guests INTEGER NOT NULL,
    notes TEXT NOT NULL DEFAULT ''
);
";

pub fn provisioned_db() -> Connection {
    let conn = open_db_in_memory(&DbOptions::default()).unwrap();
    conn.execute_batch(SCHEMA_SQL).unwrap();
    conn
}

pub fn attrs(first_name: &str, last_name: &str) -> CustomerAttrs {
    CustomerAttrs {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        phone: None,
        notes: None,
    }
}

pub fn insert_customer(conn: &Connection, first_name: &str, last_name: &str) -> RecordId {
    let repo = SqliteCustomerRepository::try_new(conn).unwrap();
    let mut customer: CustomerRecord =
        Record::new(Customer::new(attrs(first_name, last_name)).unwrap());
    repo.save(&mut customer).unwrap()
}

pub fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

pub fn booking(start_at: NaiveDateTime, num_guests: i64) -> ReservationAttrs {
    ReservationAttrs {
        start_at,
        num_guests,
        notes: None,
    }
}

pub fn insert_reservations(conn: &Connection, customer_id: RecordId, count: u32) -> Vec<RecordId> {
    let repo = SqliteReservationRepository::try_new(conn).unwrap();
    (0..count)
        .map(|offset| {
            let attrs = booking(at(1 + offset, 19), 2);
            let mut reservation = Record::new(Reservation::new(customer_id, attrs).unwrap());
            repo.save(&mut reservation).unwrap()
        })
        .collect()
}
