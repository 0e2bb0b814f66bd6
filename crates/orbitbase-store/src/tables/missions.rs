use orbitbase_model::{Mission, MissionFields};
use rusqlite::{params, OptionalExtension};

use crate::{SqliteStore, StoreError};

impl SqliteStore {
    pub fn list_missions(&self) -> Result<Vec<Mission>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, agency_id, mission_type, start_date, end_date, status,
                    description, budget_usd
             FROM missions ORDER BY id",
        )?;
        let rows = stmt
            .query_map([], mission_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn get_mission(&self, id: i64) -> Result<Option<Mission>, StoreError> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, name, agency_id, mission_type, start_date, end_date, status,
                        description, budget_usd
                 FROM missions WHERE id=?1",
                params![id],
                mission_from_row,
            )
            .optional()?)
    }

    pub fn insert_mission(&mut self, fields: &MissionFields) -> Result<i64, StoreError> {
        self.conn.execute(
            "INSERT INTO missions
             (name, agency_id, mission_type, start_date, end_date, status, description, budget_usd)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                fields.name,
                fields.agency_id,
                fields.mission_type,
                fields.start_date,
                fields.end_date,
                fields.status,
                fields.description,
                fields.budget_usd
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn update_mission(&mut self, id: i64, fields: &MissionFields) -> Result<(), StoreError> {
        let changed = self.conn.execute(
            "UPDATE missions
             SET name=?1, agency_id=?2, mission_type=?3, start_date=?4, end_date=?5,
                 status=?6, description=?7, budget_usd=?8
             WHERE id=?9",
            params![
                fields.name,
                fields.agency_id,
                fields.mission_type,
                fields.start_date,
                fields.end_date,
                fields.status,
                fields.description,
                fields.budget_usd,
                id
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::UnknownId { table: "missions", id });
        }
        Ok(())
    }

    pub fn delete_mission(&mut self, id: i64) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM missions WHERE id=?1", params![id])?;
        Ok(())
    }
}

fn mission_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Mission> {
    Ok(Mission {
        id: row.get(0)?,
        name: row.get(1)?,
        agency_id: row.get(2)?,
        mission_type: row.get(3)?,
        start_date: row.get(4)?,
        end_date: row.get(5)?,
        status: row.get(6)?,
        description: row.get(7)?,
        budget_usd: row.get(8)?,
    })
}
