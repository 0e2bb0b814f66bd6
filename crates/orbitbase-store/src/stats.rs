//! Read-only aggregates mirroring the upstream SQL functions.

use rusqlite::params;

use crate::{SqliteStore, StoreError};

impl SqliteStore {
    /// `get_active_mission_count()`
    pub fn active_mission_count(&self) -> Result<i64, StoreError> {
        Ok(self.conn.query_row(
            "SELECT COUNT(*) FROM missions WHERE status='active'",
            [],
            |row| row.get(0),
        )?)
    }

    /// `get_total_payload_mass(p_launch_id)` — 0.0 when the launch carries
    /// no payloads (or does not exist).
    pub fn total_payload_mass(&self, launch_id: i64) -> Result<f64, StoreError> {
        Ok(self.conn.query_row(
            "SELECT COALESCE(SUM(mass_kg), 0.0) FROM payloads WHERE launch_id=?1",
            params![launch_id],
            |row| row.get(0),
        )?)
    }
}
