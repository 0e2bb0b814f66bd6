//! Per-entity accessors, one file per table.

mod agencies;
mod crew_assignments;
mod crew_members;
mod launches;
mod manufacturers;
mod missions;
mod payloads;
mod rocket_variants;
mod rockets;
