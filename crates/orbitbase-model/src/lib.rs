//! OrbitBase entity records.
//!
//! Typed rows for the nine entity tables, plus the `*Fields` payloads used
//! for inserts and full-record updates. These are the only shapes that cross
//! the repository boundary: raw database rows never leak past the store, and
//! the graph builder consumes these records, not rows.
//!
//! Naming is normalized to one contract (`crew_id`, `name`, `display_name`);
//! the upstream schema had drifted aliases for the same columns.

pub mod entities;

pub use entities::{
    Agency, AgencyFields, CrewAssignment, CrewAssignmentFields, CrewMember, CrewMemberFields,
    Launch, LaunchFields, Manufacturer, ManufacturerFields, Mission, MissionFields, Payload,
    PayloadFields, Rocket, RocketFields, RocketVariant, RocketVariantFields,
};
