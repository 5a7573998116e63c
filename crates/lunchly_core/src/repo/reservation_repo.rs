//! Reservation repository contract and SQLite implementation.
//!
//! # Invariants
//! - Per-customer listings are ordered by `start_at ASC, id ASC`.
//! - `save` inserts `Unsaved` records and updates `Saved` ones by id.
//! - Stored guest counts are returned as stored, even when below 1.

use crate::db::ensure_schema;
use crate::model::record::{Record, RecordId};
use crate::model::reservation::Reservation;
use crate::repo::{EntityKind, RepoError, RepoResult};
use chrono::NaiveDateTime;
use log::debug;
use rusqlite::{params, Connection, Row};

const RESERVATION_SELECT_SQL: &str = "SELECT
    id,
    customer_id,
    start_at,
    num_guests,
    notes
FROM reservations";

pub type ReservationRecord = Record<Reservation>;

/// Repository interface for reservation lookups and persistence.
pub trait ReservationRepository {
    /// Lists every reservation of one customer, earliest first.
    fn get_reservations_for_customer(
        &self,
        customer_id: RecordId,
    ) -> RepoResult<Vec<ReservationRecord>>;
    /// Gets one reservation, or `NotFound`.
    fn get_by_id(&self, id: RecordId) -> RepoResult<ReservationRecord>;
    /// Inserts or updates, returning the row id. Inserts mark the record saved.
    fn save(&self, reservation: &mut ReservationRecord) -> RepoResult<RecordId>;
}

/// SQLite-backed reservation repository.
pub struct SqliteReservationRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteReservationRepository<'conn> {
    /// Constructs a repository after checking the required schema is present.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema(conn)?;
        Ok(Self { conn })
    }

    /// For callers that already ran the schema check on `conn`.
    pub(crate) fn with_checked_connection(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ReservationRepository for SqliteReservationRepository<'_> {
    fn get_reservations_for_customer(
        &self,
        customer_id: RecordId,
    ) -> RepoResult<Vec<ReservationRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "{RESERVATION_SELECT_SQL}
             WHERE customer_id = ?1
             ORDER BY start_at ASC, id ASC;"
        ))?;

        let mut rows = stmt.query([customer_id])?;
        let mut reservations = Vec::new();
        while let Some(row) = rows.next()? {
            reservations.push(parse_reservation_row(row)?);
        }

        Ok(reservations)
    }

    fn get_by_id(&self, id: RecordId) -> RepoResult<ReservationRecord> {
        let mut stmt = self
            .conn
            .prepare(&format!("{RESERVATION_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => parse_reservation_row(row),
            None => Err(RepoError::not_found(EntityKind::Reservation, id.to_string())),
        }
    }

    fn save(&self, reservation: &mut ReservationRecord) -> RepoResult<RecordId> {
        match &*reservation {
            Record::Unsaved { fields } => {
                let new_id = self.insert(fields)?;
                reservation.mark_saved(new_id);
                debug!("event=reservation_save module=repo status=ok branch=insert id={new_id}");
                Ok(new_id)
            }
            Record::Saved { id, fields } => {
                let id = *id;
                self.update(id, fields)?;
                debug!("event=reservation_save module=repo status=ok branch=update id={id}");
                Ok(id)
            }
        }
    }
}

impl SqliteReservationRepository<'_> {
    fn insert(&self, reservation: &Reservation) -> RepoResult<RecordId> {
        let id = self.conn.query_row(
            "INSERT INTO reservations (customer_id, start_at, num_guests, notes)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id;",
            params![
                reservation.customer_id(),
                reservation.start_at(),
                reservation.num_guests(),
                reservation.notes(),
            ],
            |row| row.get(0),
        )?;
        Ok(id)
    }

    fn update(&self, id: RecordId, reservation: &Reservation) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE reservations
             SET
                customer_id = ?1,
                start_at = ?2,
                num_guests = ?3,
                notes = ?4
             WHERE id = ?5;",
            params![
                reservation.customer_id(),
                reservation.start_at(),
                reservation.num_guests(),
                reservation.notes(),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::not_found(EntityKind::Reservation, id.to_string()));
        }

        Ok(())
    }
}

fn parse_reservation_row(row: &Row<'_>) -> RepoResult<ReservationRecord> {
    let id: RecordId = row.get("id")?;
    let customer_id: RecordId = row.get("customer_id")?;
    let start_at: NaiveDateTime = row.get("start_at")?;
    let num_guests: i64 = row.get("num_guests")?;
    let notes: Option<String> = row.get("notes")?;

    Ok(Record::saved(
        id,
        Reservation::from_row(customer_id, start_at, num_guests, notes),
    ))
}
