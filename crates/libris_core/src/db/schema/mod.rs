//! Books table bootstrap.
//!
//! # Responsibility
//! - Create the `books` table on first open.
//! - Reject files written with an unknown, newer layout.
//!
//! # Invariants
//! - The DDL uses `IF NOT EXISTS`, so files created before version tracking
//!   are adopted as-is.
//! - `PRAGMA user_version` equals [`SCHEMA_VERSION`] after a successful call.

use crate::db::{DbError, DbResult};
use rusqlite::Connection;

/// Layout version written to `PRAGMA user_version`.
pub const SCHEMA_VERSION: u32 = 1;

const BOOKS_DDL: &str = include_str!("0001_books.sql");

/// Creates the books table if needed and stamps the schema version.
pub fn ensure_schema(conn: &mut Connection) -> DbResult<()> {
    let current_version = user_version(conn)?;

    if current_version > SCHEMA_VERSION {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            supported: SCHEMA_VERSION,
        });
    }

    if current_version == SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    tx.execute_batch(BOOKS_DDL)?;
    tx.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
    tx.commit()?;

    Ok(())
}

/// Reads `PRAGMA user_version` from the connection.
pub fn user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
