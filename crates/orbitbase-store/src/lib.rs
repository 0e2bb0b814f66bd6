//! OrbitBase entity repository.
//!
//! One embedded relational store holds the nine entity tables. Every
//! accessor is a parameterized statement mapped to the typed records in
//! `orbitbase-model`; raw rows never cross this boundary.
//!
//! Semantics:
//! - `list_*` orders by ascending id.
//! - `insert_*` returns the id the store assigned.
//! - `update_*` overwrites every mutable field (full-record updates) and
//!   fails with [`StoreError::UnknownId`] when the row does not exist.
//! - `delete_*` is idempotent.
//!
//! The stored procedures and read-only functions of the upstream schema
//! (`add_mission`, `complete_mission`, `assign_crew_to_mission`,
//! `add_launch`, `get_active_mission_count`, `get_total_payload_mass`)
//! are exposed as transactional methods on the same store.

#![forbid(unsafe_code)]

use std::path::Path;

use rusqlite::Connection;

mod browse;
mod procedures;
mod schema;
mod stats;
mod tables;

#[cfg(test)]
mod tests;

pub use browse::TableData;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("sqlite: {0}")]
    Sql(#[from] rusqlite::Error),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("no {table} row with id {id}")]
    UnknownId { table: &'static str, id: i64 },
}

#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (and bootstrap) a store at `path`, creating parent directories
    /// as needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// In-memory store, used by tests.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.pragma_update(None, "foreign_keys", true)?;
        schema::bootstrap(&conn)?;
        Ok(Self { conn })
    }
}
