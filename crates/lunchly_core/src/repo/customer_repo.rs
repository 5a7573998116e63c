//! Customer repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Customer listing, ranking, lookup, name search and persistence.
//! - Delegate per-customer reservation lookups to the reservation repository.
//!
//! # Invariants
//! - `list_all` is ordered by `last_name, first_name`.
//! - `search_by_name` matches first name OR last name, and fails with
//!   `NotFound` when nothing matches.
//! - `save` inserts `Unsaved` records and updates `Saved` ones by id; there is
//!   no concurrency check, the last write wins.
//! - Stored rows are hydrated as stored; a legacy row with a blank name never
//!   fails a listing.

use crate::db::ensure_schema;
use crate::model::customer::{Customer, CustomerAttrs};
use crate::model::record::{Record, RecordId};
use crate::repo::reservation_repo::{
    ReservationRecord, ReservationRepository, SqliteReservationRepository,
};
use crate::repo::{EntityKind, RepoError, RepoResult};
use log::debug;
use rusqlite::{params, Connection, Row};
use serde::Serialize;

/// Number of rows `list_top_ranked` returns when the caller has no preference.
pub const DEFAULT_TOP_RANKED_LIMIT: u32 = 10;

const CUSTOMER_SELECT_SQL: &str = "SELECT
    id,
    first_name,
    last_name,
    phone,
    notes
FROM customers";

pub type CustomerRecord = Record<Customer>;

/// One row of the reservation-count leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerRanking {
    pub customer_id: RecordId,
    pub first_name: String,
    pub last_name: String,
    pub reservation_count: u64,
}

impl CustomerRanking {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Repository interface for customer operations.
pub trait CustomerRepository {
    /// Lists all customers by last name, then first name.
    fn list_all(&self) -> RepoResult<Vec<CustomerRecord>>;
    /// Customers with the most reservations, highest count first.
    ///
    /// Customers without reservations never appear. Order among equal
    /// counts is whatever the store returns.
    fn list_top_ranked(&self, limit: u32) -> RepoResult<Vec<CustomerRanking>>;
    /// Gets one customer, or `NotFound`.
    fn get_by_id(&self, id: RecordId) -> RepoResult<CustomerRecord>;
    /// Customers whose first name equals `first_name` or whose last name
    /// equals `last_name`. `NotFound` when empty.
    fn search_by_name(&self, first_name: &str, last_name: &str)
        -> RepoResult<Vec<CustomerRecord>>;
    /// Reservations of `customer`. An unsaved customer has none.
    fn get_reservations(&self, customer: &CustomerRecord) -> RepoResult<Vec<ReservationRecord>>;
    /// Inserts or updates, returning the row id. Inserts mark the record saved.
    fn save(&self, customer: &mut CustomerRecord) -> RepoResult<RecordId>;
}

/// SQLite-backed customer repository.
pub struct SqliteCustomerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCustomerRepository<'conn> {
    /// Constructs a repository after checking the required schema is present.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema(conn)?;
        Ok(Self { conn })
    }

    fn reservations(&self) -> SqliteReservationRepository<'conn> {
        SqliteReservationRepository::with_checked_connection(self.conn)
    }
}

impl CustomerRepository for SqliteCustomerRepository<'_> {
    fn list_all(&self) -> RepoResult<Vec<CustomerRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "{CUSTOMER_SELECT_SQL} ORDER BY last_name, first_name;"
        ))?;

        let mut rows = stmt.query([])?;
        let mut customers = Vec::new();
        while let Some(row) = rows.next()? {
            customers.push(parse_customer_row(row)?);
        }

        Ok(customers)
    }

    fn list_top_ranked(&self, limit: u32) -> RepoResult<Vec<CustomerRanking>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                c.id AS customer_id,
                c.first_name,
                c.last_name,
                COUNT(*) AS reservation_count
             FROM customers AS c
             JOIN reservations AS r ON c.id = r.customer_id
             GROUP BY c.id, c.first_name, c.last_name
             ORDER BY reservation_count DESC
             LIMIT ?1;",
        )?;

        let mut rows = stmt.query([i64::from(limit)])?;
        let mut ranking = Vec::new();
        while let Some(row) = rows.next()? {
            ranking.push(parse_ranking_row(row)?);
        }

        Ok(ranking)
    }

    fn get_by_id(&self, id: RecordId) -> RepoResult<CustomerRecord> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CUSTOMER_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => parse_customer_row(row),
            None => Err(RepoError::not_found(EntityKind::Customer, id.to_string())),
        }
    }

    fn search_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> RepoResult<Vec<CustomerRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "{CUSTOMER_SELECT_SQL}
             WHERE first_name = ?1 OR last_name = ?2
             ORDER BY last_name, first_name;"
        ))?;

        let mut rows = stmt.query(params![first_name, last_name])?;
        let mut customers = Vec::new();
        while let Some(row) = rows.next()? {
            customers.push(parse_customer_row(row)?);
        }
        debug!(
            "event=customer_search module=repo status=ok result_count={}",
            customers.len()
        );

        if customers.is_empty() {
            return Err(RepoError::not_found(
                EntityKind::Customer,
                format!("{first_name} {last_name}"),
            ));
        }

        Ok(customers)
    }

    fn get_reservations(&self, customer: &CustomerRecord) -> RepoResult<Vec<ReservationRecord>> {
        match customer.id() {
            Some(id) => self.reservations().get_reservations_for_customer(id),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, customer: &mut CustomerRecord) -> RepoResult<RecordId> {
        match &*customer {
            Record::Unsaved { fields } => {
                let new_id = self.insert(fields)?;
                customer.mark_saved(new_id);
                debug!("event=customer_save module=repo status=ok branch=insert id={new_id}");
                Ok(new_id)
            }
            Record::Saved { id, fields } => {
                let id = *id;
                self.update(id, fields)?;
                debug!("event=customer_save module=repo status=ok branch=update id={id}");
                Ok(id)
            }
        }
    }
}

impl SqliteCustomerRepository<'_> {
    fn insert(&self, customer: &Customer) -> RepoResult<RecordId> {
        let id = self.conn.query_row(
            "INSERT INTO customers (first_name, last_name, phone, notes)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id;",
            params![
                customer.first_name(),
                customer.last_name(),
                customer.phone(),
                customer.notes(),
            ],
            |row| row.get(0),
        )?;
        Ok(id)
    }

    fn update(&self, id: RecordId, customer: &Customer) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE customers
             SET
                first_name = ?1,
                last_name = ?2,
                phone = ?3,
                notes = ?4
             WHERE id = ?5;",
            params![
                customer.first_name(),
                customer.last_name(),
                customer.phone(),
                customer.notes(),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::not_found(EntityKind::Customer, id.to_string()));
        }

        Ok(())
    }
}

fn parse_customer_row(row: &Row<'_>) -> RepoResult<CustomerRecord> {
    let id: RecordId = row.get("id")?;
    let attrs = CustomerAttrs {
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        phone: row.get("phone")?,
        notes: row.get("notes")?,
    };

    Ok(Record::saved(id, Customer::from_row(attrs)))
}

fn parse_ranking_row(row: &Row<'_>) -> RepoResult<CustomerRanking> {
    let count: i64 = row.get("reservation_count")?;
    let reservation_count = u64::try_from(count).map_err(|_| {
        RepoError::InvalidData(format!("negative reservation count `{count}`"))
    })?;

    Ok(CustomerRanking {
        customer_id: row.get("customer_id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        reservation_count,
    })
}
