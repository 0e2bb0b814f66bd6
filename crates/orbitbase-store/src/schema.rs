//! Table definitions.
//!
//! Idempotent bootstrap; every entity keeps an `INTEGER PRIMARY KEY` id
//! assigned by the store. Nullable foreign keys clear on delete so a
//! missing relationship stays a valid terminal state instead of a
//! constraint error.

use rusqlite::Connection;

use crate::StoreError;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS agencies (
    id           INTEGER PRIMARY KEY,
    name         TEXT NOT NULL,
    country      TEXT,
    founded_year INTEGER,
    website      TEXT,
    description  TEXT
);

CREATE TABLE IF NOT EXISTS manufacturers (
    id             INTEGER PRIMARY KEY,
    name           TEXT NOT NULL,
    country        TEXT,
    founded_year   INTEGER,
    specialization TEXT
);

CREATE TABLE IF NOT EXISTS rockets (
    id              INTEGER PRIMARY KEY,
    name            TEXT NOT NULL,
    manufacturer_id INTEGER REFERENCES manufacturers(id) ON DELETE SET NULL,
    first_flight    TEXT,
    description     TEXT,
    height_meters   REAL,
    mass_kg         REAL
);

CREATE TABLE IF NOT EXISTS rocket_variants (
    id             INTEGER PRIMARY KEY,
    name           TEXT NOT NULL,
    rocket_id      INTEGER REFERENCES rockets(id) ON DELETE SET NULL,
    max_payload_kg REAL
);

CREATE TABLE IF NOT EXISTS missions (
    id           INTEGER PRIMARY KEY,
    name         TEXT NOT NULL,
    agency_id    INTEGER REFERENCES agencies(id) ON DELETE SET NULL,
    mission_type TEXT,
    start_date   TEXT,
    end_date     TEXT,
    status       TEXT NOT NULL DEFAULT 'planned',
    description  TEXT,
    budget_usd   REAL
);

CREATE TABLE IF NOT EXISTS launches (
    id           INTEGER PRIMARY KEY,
    mission_id   INTEGER REFERENCES missions(id) ON DELETE SET NULL,
    variant_id   INTEGER REFERENCES rocket_variants(id) ON DELETE SET NULL,
    display_name TEXT,
    launch_date  TEXT,
    launch_site  TEXT,
    outcome      TEXT NOT NULL DEFAULT 'success'
);

CREATE TABLE IF NOT EXISTS payloads (
    id          INTEGER PRIMARY KEY,
    name        TEXT NOT NULL,
    launch_id   INTEGER REFERENCES launches(id) ON DELETE SET NULL,
    type        TEXT NOT NULL DEFAULT 'satellite',
    mass_kg     REAL,
    description TEXT
);

CREATE TABLE IF NOT EXISTS crew_members (
    id            INTEGER PRIMARY KEY,
    name          TEXT NOT NULL,
    nationality   TEXT,
    agency_id     INTEGER REFERENCES agencies(id) ON DELETE SET NULL,
    role          TEXT,
    date_of_birth TEXT,
    bio           TEXT
);

CREATE TABLE IF NOT EXISTS crew_assignments (
    id              INTEGER PRIMARY KEY,
    crew_id         INTEGER REFERENCES crew_members(id) ON DELETE SET NULL,
    mission_id      INTEGER REFERENCES missions(id) ON DELETE SET NULL,
    role            TEXT,
    assignment_date TEXT
);
"#;

pub(crate) fn bootstrap(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}
