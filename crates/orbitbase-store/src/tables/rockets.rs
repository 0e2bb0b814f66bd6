use orbitbase_model::{Rocket, RocketFields};
use rusqlite::{params, OptionalExtension};

use crate::{SqliteStore, StoreError};

impl SqliteStore {
    pub fn list_rockets(&self) -> Result<Vec<Rocket>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, manufacturer_id, first_flight, description, height_meters, mass_kg
             FROM rockets ORDER BY id",
        )?;
        let rows = stmt
            .query_map([], rocket_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn get_rocket(&self, id: i64) -> Result<Option<Rocket>, StoreError> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, name, manufacturer_id, first_flight, description, height_meters, mass_kg
                 FROM rockets WHERE id=?1",
                params![id],
                rocket_from_row,
            )
            .optional()?)
    }

    pub fn insert_rocket(&mut self, fields: &RocketFields) -> Result<i64, StoreError> {
        self.conn.execute(
            "INSERT INTO rockets
             (name, manufacturer_id, first_flight, description, height_meters, mass_kg)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                fields.name,
                fields.manufacturer_id,
                fields.first_flight,
                fields.description,
                fields.height_meters,
                fields.mass_kg
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn update_rocket(&mut self, id: i64, fields: &RocketFields) -> Result<(), StoreError> {
        let changed = self.conn.execute(
            "UPDATE rockets
             SET name=?1, manufacturer_id=?2, first_flight=?3, description=?4,
                 height_meters=?5, mass_kg=?6
             WHERE id=?7",
            params![
                fields.name,
                fields.manufacturer_id,
                fields.first_flight,
                fields.description,
                fields.height_meters,
                fields.mass_kg,
                id
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::UnknownId { table: "rockets", id });
        }
        Ok(())
    }

    pub fn delete_rocket(&mut self, id: i64) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM rockets WHERE id=?1", params![id])?;
        Ok(())
    }
}

fn rocket_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Rocket> {
    Ok(Rocket {
        id: row.get(0)?,
        name: row.get(1)?,
        manufacturer_id: row.get(2)?,
        first_flight: row.get(3)?,
        description: row.get(4)?,
        height_meters: row.get(5)?,
        mass_kg: row.get(6)?,
    })
}
