use orbitbase_model::{Manufacturer, ManufacturerFields};
use rusqlite::{params, OptionalExtension};

use crate::{SqliteStore, StoreError};

impl SqliteStore {
    pub fn list_manufacturers(&self) -> Result<Vec<Manufacturer>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, country, founded_year, specialization
             FROM manufacturers ORDER BY id",
        )?;
        let rows = stmt
            .query_map([], manufacturer_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn get_manufacturer(&self, id: i64) -> Result<Option<Manufacturer>, StoreError> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, name, country, founded_year, specialization
                 FROM manufacturers WHERE id=?1",
                params![id],
                manufacturer_from_row,
            )
            .optional()?)
    }

    pub fn insert_manufacturer(&mut self, fields: &ManufacturerFields) -> Result<i64, StoreError> {
        self.conn.execute(
            "INSERT INTO manufacturers (name, country, founded_year, specialization)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                fields.name,
                fields.country,
                fields.founded_year,
                fields.specialization
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn update_manufacturer(
        &mut self,
        id: i64,
        fields: &ManufacturerFields,
    ) -> Result<(), StoreError> {
        let changed = self.conn.execute(
            "UPDATE manufacturers
             SET name=?1, country=?2, founded_year=?3, specialization=?4
             WHERE id=?5",
            params![
                fields.name,
                fields.country,
                fields.founded_year,
                fields.specialization,
                id
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::UnknownId {
                table: "manufacturers",
                id,
            });
        }
        Ok(())
    }

    pub fn delete_manufacturer(&mut self, id: i64) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM manufacturers WHERE id=?1", params![id])?;
        Ok(())
    }
}

fn manufacturer_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Manufacturer> {
    Ok(Manufacturer {
        id: row.get(0)?,
        name: row.get(1)?,
        country: row.get(2)?,
        founded_year: row.get(3)?,
        specialization: row.get(4)?,
    })
}
