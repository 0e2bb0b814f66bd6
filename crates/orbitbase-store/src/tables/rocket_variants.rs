use orbitbase_model::{RocketVariant, RocketVariantFields};
use rusqlite::{params, OptionalExtension};

use crate::{SqliteStore, StoreError};

impl SqliteStore {
    pub fn list_rocket_variants(&self) -> Result<Vec<RocketVariant>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, rocket_id, max_payload_kg
             FROM rocket_variants ORDER BY id",
        )?;
        let rows = stmt
            .query_map([], variant_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn get_rocket_variant(&self, id: i64) -> Result<Option<RocketVariant>, StoreError> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, name, rocket_id, max_payload_kg
                 FROM rocket_variants WHERE id=?1",
                params![id],
                variant_from_row,
            )
            .optional()?)
    }

    pub fn insert_rocket_variant(
        &mut self,
        fields: &RocketVariantFields,
    ) -> Result<i64, StoreError> {
        self.conn.execute(
            "INSERT INTO rocket_variants (name, rocket_id, max_payload_kg)
             VALUES (?1, ?2, ?3)",
            params![fields.name, fields.rocket_id, fields.max_payload_kg],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn update_rocket_variant(
        &mut self,
        id: i64,
        fields: &RocketVariantFields,
    ) -> Result<(), StoreError> {
        let changed = self.conn.execute(
            "UPDATE rocket_variants SET name=?1, rocket_id=?2, max_payload_kg=?3 WHERE id=?4",
            params![fields.name, fields.rocket_id, fields.max_payload_kg, id],
        )?;
        if changed == 0 {
            return Err(StoreError::UnknownId {
                table: "rocket_variants",
                id,
            });
        }
        Ok(())
    }

    pub fn delete_rocket_variant(&mut self, id: i64) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM rocket_variants WHERE id=?1", params![id])?;
        Ok(())
    }
}

fn variant_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RocketVariant> {
    Ok(RocketVariant {
        id: row.get(0)?,
        name: row.get(1)?,
        rocket_id: row.get(2)?,
        max_payload_kg: row.get(3)?,
    })
}
