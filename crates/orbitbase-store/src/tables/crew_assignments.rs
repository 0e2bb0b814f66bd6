use orbitbase_model::{CrewAssignment, CrewAssignmentFields};
use rusqlite::{params, OptionalExtension};

use crate::{SqliteStore, StoreError};

impl SqliteStore {
    pub fn list_crew_assignments(&self) -> Result<Vec<CrewAssignment>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, crew_id, mission_id, role, assignment_date
             FROM crew_assignments ORDER BY id",
        )?;
        let rows = stmt
            .query_map([], assignment_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn get_crew_assignment(&self, id: i64) -> Result<Option<CrewAssignment>, StoreError> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, crew_id, mission_id, role, assignment_date
                 FROM crew_assignments WHERE id=?1",
                params![id],
                assignment_from_row,
            )
            .optional()?)
    }

    pub fn insert_crew_assignment(
        &mut self,
        fields: &CrewAssignmentFields,
    ) -> Result<i64, StoreError> {
        self.conn.execute(
            "INSERT INTO crew_assignments (crew_id, mission_id, role, assignment_date)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                fields.crew_id,
                fields.mission_id,
                fields.role,
                fields.assignment_date
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn update_crew_assignment(
        &mut self,
        id: i64,
        fields: &CrewAssignmentFields,
    ) -> Result<(), StoreError> {
        let changed = self.conn.execute(
            "UPDATE crew_assignments
             SET crew_id=?1, mission_id=?2, role=?3, assignment_date=?4
             WHERE id=?5",
            params![
                fields.crew_id,
                fields.mission_id,
                fields.role,
                fields.assignment_date,
                id
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::UnknownId {
                table: "crew_assignments",
                id,
            });
        }
        Ok(())
    }

    pub fn delete_crew_assignment(&mut self, id: i64) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM crew_assignments WHERE id=?1", params![id])?;
        Ok(())
    }
}

fn assignment_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<CrewAssignment> {
    Ok(CrewAssignment {
        id: row.get(0)?,
        crew_id: row.get(1)?,
        mission_id: row.get(2)?,
        role: row.get(3)?,
        assignment_date: row.get(4)?,
    })
}
