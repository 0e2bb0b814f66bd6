//! Generic table browsing for the dashboard's database-info page.
//!
//! Table names are checked against the fixed entity set; SQL is never
//! assembled from caller input beyond that allow-list.

use rusqlite::params;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::{SqliteStore, StoreError};

/// The entity tables, in bootstrap order.
pub const TABLE_NAMES: [&str; 9] = [
    "agencies",
    "manufacturers",
    "rockets",
    "rocket_variants",
    "missions",
    "launches",
    "payloads",
    "crew_members",
    "crew_assignments",
];

#[derive(Debug, Clone, Serialize)]
pub struct TableData {
    pub table: String,
    pub count: i64,
    pub rows: Vec<Value>,
}

impl SqliteStore {
    pub fn table_names(&self) -> Vec<String> {
        TABLE_NAMES.iter().map(|s| s.to_string()).collect()
    }

    /// First `limit` rows of one known table, as JSON objects keyed by
    /// column name, plus the total row count.
    pub fn table_data(&self, name: &str, limit: u32) -> Result<TableData, StoreError> {
        let Some(table) = TABLE_NAMES.iter().find(|t| **t == name) else {
            return Err(StoreError::InvalidInput(format!("unknown table `{name}`")));
        };

        let count: i64 =
            self.conn
                .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                    row.get(0)
                })?;

        let mut stmt = self
            .conn
            .prepare(&format!("SELECT * FROM {table} ORDER BY id LIMIT ?1"))?;
        let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();

        let rows = stmt
            .query_map(params![limit], |row| {
                let mut object = Map::new();
                for (idx, column) in columns.iter().enumerate() {
                    object.insert(column.clone(), value_ref_to_json(row.get_ref(idx)?));
                }
                Ok(Value::Object(object))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TableData {
            table: table.to_string(),
            count,
            rows,
        })
    }
}

fn value_ref_to_json(value: rusqlite::types::ValueRef<'_>) -> Value {
    use rusqlite::types::ValueRef;
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => Value::from(f),
        ValueRef::Text(t) => Value::from(String::from_utf8_lossy(t).into_owned()),
        // No blob columns exist in the schema.
        ValueRef::Blob(_) => Value::Null,
    }
}
