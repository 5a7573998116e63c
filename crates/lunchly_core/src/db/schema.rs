//! Presence checks for the tables the entity layer reads and writes.

use super::{DbError, DbResult};
use rusqlite::Connection;

/// Columns the entity layer binds, per table.
pub const REQUIRED_COLUMNS: &[(&str, &[&str])] = &[
    (
        "customers",
        &["id", "first_name", "last_name", "phone", "notes"],
    ),
    (
        "reservations",
        &["id", "customer_id", "start_at", "num_guests", "notes"],
    ),
];

/// Verifies that every required table and column exists.
///
/// # Errors
/// - `MissingRequiredTable` for the first absent table.
/// - `MissingRequiredColumn` for the first absent column of a present table.
pub fn ensure_schema(conn: &Connection) -> DbResult<()> {
    for &(table, columns) in REQUIRED_COLUMNS {
        if !table_exists(conn, table)? {
            return Err(DbError::MissingRequiredTable(table));
        }

        let present = table_columns(conn, table)?;
        if let Some(&column) = columns
            .iter()
            .find(|column| !present.iter().any(|name| name.as_str() == **column))
        {
            return Err(DbError::MissingRequiredColumn { table, column });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> DbResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_columns(conn: &Connection, table: &str) -> DbResult<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>("name"))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(names)
}
