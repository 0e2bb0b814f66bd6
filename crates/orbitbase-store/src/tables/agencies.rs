use orbitbase_model::{Agency, AgencyFields};
use rusqlite::{params, OptionalExtension};

use crate::{SqliteStore, StoreError};

impl SqliteStore {
    pub fn list_agencies(&self) -> Result<Vec<Agency>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, country, founded_year, website, description
             FROM agencies ORDER BY id",
        )?;
        let rows = stmt
            .query_map([], agency_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn get_agency(&self, id: i64) -> Result<Option<Agency>, StoreError> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, name, country, founded_year, website, description
                 FROM agencies WHERE id=?1",
                params![id],
                agency_from_row,
            )
            .optional()?)
    }

    pub fn insert_agency(&mut self, fields: &AgencyFields) -> Result<i64, StoreError> {
        self.conn.execute(
            "INSERT INTO agencies (name, country, founded_year, website, description)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                fields.name,
                fields.country,
                fields.founded_year,
                fields.website,
                fields.description
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn update_agency(&mut self, id: i64, fields: &AgencyFields) -> Result<(), StoreError> {
        let changed = self.conn.execute(
            "UPDATE agencies
             SET name=?1, country=?2, founded_year=?3, website=?4, description=?5
             WHERE id=?6",
            params![
                fields.name,
                fields.country,
                fields.founded_year,
                fields.website,
                fields.description,
                id
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::UnknownId { table: "agencies", id });
        }
        Ok(())
    }

    pub fn delete_agency(&mut self, id: i64) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM agencies WHERE id=?1", params![id])?;
        Ok(())
    }
}

fn agency_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Agency> {
    Ok(Agency {
        id: row.get(0)?,
        name: row.get(1)?,
        country: row.get(2)?,
        founded_year: row.get(3)?,
        website: row.get(4)?,
        description: row.get(5)?,
    })
}
