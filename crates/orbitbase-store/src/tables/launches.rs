use orbitbase_model::{Launch, LaunchFields};
use rusqlite::{params, OptionalExtension};

use crate::{SqliteStore, StoreError};

impl SqliteStore {
    pub fn list_launches(&self) -> Result<Vec<Launch>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, mission_id, variant_id, display_name, launch_date, launch_site, outcome
             FROM launches ORDER BY id",
        )?;
        let rows = stmt
            .query_map([], launch_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn get_launch(&self, id: i64) -> Result<Option<Launch>, StoreError> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, mission_id, variant_id, display_name, launch_date, launch_site, outcome
                 FROM launches WHERE id=?1",
                params![id],
                launch_from_row,
            )
            .optional()?)
    }

    pub fn insert_launch(&mut self, fields: &LaunchFields) -> Result<i64, StoreError> {
        self.conn.execute(
            "INSERT INTO launches
             (mission_id, variant_id, display_name, launch_date, launch_site, outcome)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                fields.mission_id,
                fields.variant_id,
                fields.display_name,
                fields.launch_date,
                fields.launch_site,
                fields.outcome
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn update_launch(&mut self, id: i64, fields: &LaunchFields) -> Result<(), StoreError> {
        let changed = self.conn.execute(
            "UPDATE launches
             SET mission_id=?1, variant_id=?2, display_name=?3, launch_date=?4,
                 launch_site=?5, outcome=?6
             WHERE id=?7",
            params![
                fields.mission_id,
                fields.variant_id,
                fields.display_name,
                fields.launch_date,
                fields.launch_site,
                fields.outcome,
                id
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::UnknownId { table: "launches", id });
        }
        Ok(())
    }

    pub fn delete_launch(&mut self, id: i64) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM launches WHERE id=?1", params![id])?;
        Ok(())
    }
}

fn launch_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Launch> {
    Ok(Launch {
        id: row.get(0)?,
        mission_id: row.get(1)?,
        variant_id: row.get(2)?,
        display_name: row.get(3)?,
        launch_date: row.get(4)?,
        launch_site: row.get(5)?,
        outcome: row.get(6)?,
    })
}
