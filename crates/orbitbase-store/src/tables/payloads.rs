use orbitbase_model::{Payload, PayloadFields};
use rusqlite::{params, OptionalExtension};

use crate::{SqliteStore, StoreError};

impl SqliteStore {
    pub fn list_payloads(&self) -> Result<Vec<Payload>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, launch_id, type, mass_kg, description
             FROM payloads ORDER BY id",
        )?;
        let rows = stmt
            .query_map([], payload_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn get_payload(&self, id: i64) -> Result<Option<Payload>, StoreError> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, name, launch_id, type, mass_kg, description
                 FROM payloads WHERE id=?1",
                params![id],
                payload_from_row,
            )
            .optional()?)
    }

    pub fn insert_payload(&mut self, fields: &PayloadFields) -> Result<i64, StoreError> {
        self.conn.execute(
            "INSERT INTO payloads (name, launch_id, type, mass_kg, description)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                fields.name,
                fields.launch_id,
                fields.kind,
                fields.mass_kg,
                fields.description
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn update_payload(&mut self, id: i64, fields: &PayloadFields) -> Result<(), StoreError> {
        let changed = self.conn.execute(
            "UPDATE payloads
             SET name=?1, launch_id=?2, type=?3, mass_kg=?4, description=?5
             WHERE id=?6",
            params![
                fields.name,
                fields.launch_id,
                fields.kind,
                fields.mass_kg,
                fields.description,
                id
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::UnknownId { table: "payloads", id });
        }
        Ok(())
    }

    pub fn delete_payload(&mut self, id: i64) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM payloads WHERE id=?1", params![id])?;
        Ok(())
    }
}

fn payload_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Payload> {
    Ok(Payload {
        id: row.get(0)?,
        name: row.get(1)?,
        launch_id: row.get(2)?,
        kind: row.get(3)?,
        mass_kg: row.get(4)?,
        description: row.get(5)?,
    })
}
