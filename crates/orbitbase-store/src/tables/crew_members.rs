use orbitbase_model::{CrewMember, CrewMemberFields};
use rusqlite::{params, OptionalExtension};

use crate::{SqliteStore, StoreError};

impl SqliteStore {
    pub fn list_crew_members(&self) -> Result<Vec<CrewMember>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, nationality, agency_id, role, date_of_birth, bio
             FROM crew_members ORDER BY id",
        )?;
        let rows = stmt
            .query_map([], crew_member_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn get_crew_member(&self, id: i64) -> Result<Option<CrewMember>, StoreError> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, name, nationality, agency_id, role, date_of_birth, bio
                 FROM crew_members WHERE id=?1",
                params![id],
                crew_member_from_row,
            )
            .optional()?)
    }

    pub fn insert_crew_member(&mut self, fields: &CrewMemberFields) -> Result<i64, StoreError> {
        self.conn.execute(
            "INSERT INTO crew_members (name, nationality, agency_id, role, date_of_birth, bio)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                fields.name,
                fields.nationality,
                fields.agency_id,
                fields.role,
                fields.date_of_birth,
                fields.bio
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn update_crew_member(
        &mut self,
        id: i64,
        fields: &CrewMemberFields,
    ) -> Result<(), StoreError> {
        let changed = self.conn.execute(
            "UPDATE crew_members
             SET name=?1, nationality=?2, agency_id=?3, role=?4, date_of_birth=?5, bio=?6
             WHERE id=?7",
            params![
                fields.name,
                fields.nationality,
                fields.agency_id,
                fields.role,
                fields.date_of_birth,
                fields.bio,
                id
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::UnknownId {
                table: "crew_members",
                id,
            });
        }
        Ok(())
    }

    pub fn delete_crew_member(&mut self, id: i64) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM crew_members WHERE id=?1", params![id])?;
        Ok(())
    }
}

fn crew_member_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<CrewMember> {
    Ok(CrewMember {
        id: row.get(0)?,
        name: row.get(1)?,
        nationality: row.get(2)?,
        agency_id: row.get(3)?,
        role: row.get(4)?,
        date_of_birth: row.get(5)?,
        bio: row.get(6)?,
    })
}
