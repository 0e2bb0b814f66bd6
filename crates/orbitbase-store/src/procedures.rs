//! Transactional equivalents of the upstream stored procedures.
//!
//! The original schema validated these through database-side procedures;
//! here each is one transaction with explicit existence checks, so a
//! dangling reference is rejected before anything is written.

use rusqlite::{params, OptionalExtension, Transaction};

use crate::{SqliteStore, StoreError};

impl SqliteStore {
    /// `add_mission(p_name, p_agency_id, p_status)`
    pub fn add_mission(
        &mut self,
        name: &str,
        agency_id: Option<i64>,
        status: Option<&str>,
    ) -> Result<i64, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::InvalidInput("mission name must not be empty".into()));
        }

        let tx = self.conn.transaction()?;
        if let Some(agency_id) = agency_id {
            require_row(&tx, "agencies", agency_id)?;
        }
        tx.execute(
            "INSERT INTO missions (name, agency_id, status) VALUES (?1, ?2, ?3)",
            params![name, agency_id, status.unwrap_or("planned")],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(id)
    }

    /// `complete_mission(p_mission_id, p_end_date)`
    ///
    /// Marks the mission completed; the end date defaults to today when the
    /// caller does not supply one.
    pub fn complete_mission(&mut self, id: i64, end_date: Option<&str>) -> Result<(), StoreError> {
        let changed = self.conn.execute(
            "UPDATE missions
             SET status='completed', end_date=COALESCE(?2, date('now'))
             WHERE id=?1",
            params![id, end_date],
        )?;
        if changed == 0 {
            return Err(StoreError::UnknownId { table: "missions", id });
        }
        Ok(())
    }

    /// `assign_crew_to_mission(p_mission_id, p_crew_id, p_role, p_date)`
    pub fn assign_crew_to_mission(
        &mut self,
        mission_id: i64,
        crew_id: i64,
        role: Option<&str>,
        assignment_date: Option<&str>,
    ) -> Result<i64, StoreError> {
        let tx = self.conn.transaction()?;
        require_row(&tx, "missions", mission_id)?;
        require_row(&tx, "crew_members", crew_id)?;
        tx.execute(
            "INSERT INTO crew_assignments (crew_id, mission_id, role, assignment_date)
             VALUES (?1, ?2, ?3, ?4)",
            params![crew_id, mission_id, role, assignment_date],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(id)
    }

    /// `add_launch(p_mission_id, p_variant_id, p_display_name, p_launch_date,
    /// p_launch_site, p_outcome)` — mission and variant are both required.
    #[allow(clippy::too_many_arguments)]
    pub fn add_launch(
        &mut self,
        mission_id: i64,
        variant_id: i64,
        display_name: Option<&str>,
        launch_date: Option<&str>,
        launch_site: Option<&str>,
        outcome: Option<&str>,
    ) -> Result<i64, StoreError> {
        let tx = self.conn.transaction()?;
        require_row(&tx, "missions", mission_id)?;
        require_row(&tx, "rocket_variants", variant_id)?;
        tx.execute(
            "INSERT INTO launches
             (mission_id, variant_id, display_name, launch_date, launch_site, outcome)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                mission_id,
                variant_id,
                display_name,
                launch_date,
                launch_site,
                outcome.unwrap_or("success")
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(id)
    }
}

fn require_row(tx: &Transaction<'_>, table: &'static str, id: i64) -> Result<(), StoreError> {
    // `table` is a compile-time constant, never caller input.
    let found: Option<i64> = tx
        .query_row(
            &format!("SELECT 1 FROM {table} WHERE id=?1"),
            params![id],
            |row| row.get(0),
        )
        .optional()?;
    if found.is_none() {
        return Err(StoreError::UnknownId { table, id });
    }
    Ok(())
}
