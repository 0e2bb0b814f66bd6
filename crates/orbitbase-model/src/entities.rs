//! Row and payload types for every entity table.
//!
//! Each entity has two shapes:
//! - the row (`Mission`, `Launch`, ...): a stored record with its id,
//! - the fields payload (`MissionFields`, ...): what a client sends on
//!   insert/update. Updates are full-record — every mutable field is
//!   overwritten, so the payload carries all of them.
//!
//! Optional relationship fields are `Option<i64>`: `None` is a valid
//! terminal state (no relationship), never an error.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agency {
    pub id: i64,
    pub name: String,
    pub country: Option<String>,
    pub founded_year: Option<i64>,
    pub website: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgencyFields {
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub founded_year: Option<i64>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manufacturer {
    pub id: i64,
    pub name: String,
    pub country: Option<String>,
    pub founded_year: Option<i64>,
    pub specialization: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManufacturerFields {
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub founded_year: Option<i64>,
    #[serde(default)]
    pub specialization: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rocket {
    pub id: i64,
    pub name: String,
    pub manufacturer_id: Option<i64>,
    pub first_flight: Option<String>,
    pub description: Option<String>,
    pub height_meters: Option<f64>,
    pub mass_kg: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RocketFields {
    pub name: String,
    #[serde(default)]
    pub manufacturer_id: Option<i64>,
    #[serde(default)]
    pub first_flight: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub height_meters: Option<f64>,
    #[serde(default)]
    pub mass_kg: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RocketVariant {
    pub id: i64,
    pub name: String,
    pub rocket_id: Option<i64>,
    pub max_payload_kg: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RocketVariantFields {
    pub name: String,
    #[serde(default)]
    pub rocket_id: Option<i64>,
    #[serde(default)]
    pub max_payload_kg: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    pub id: i64,
    pub name: String,
    pub agency_id: Option<i64>,
    pub mission_type: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: String,
    pub description: Option<String>,
    pub budget_usd: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionFields {
    pub name: String,
    #[serde(default)]
    pub agency_id: Option<i64>,
    #[serde(default)]
    pub mission_type: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default = "default_mission_status")]
    pub status: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub budget_usd: Option<f64>,
}

pub(crate) fn default_mission_status() -> String {
    "planned".to_string()
}

/// A launch may be entirely anonymous: no mission, no variant, no display
/// name. The graph layer synthesizes a label in that case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Launch {
    pub id: i64,
    pub mission_id: Option<i64>,
    pub variant_id: Option<i64>,
    pub display_name: Option<String>,
    pub launch_date: Option<String>,
    pub launch_site: Option<String>,
    pub outcome: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchFields {
    #[serde(default)]
    pub mission_id: Option<i64>,
    #[serde(default)]
    pub variant_id: Option<i64>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub launch_date: Option<String>,
    #[serde(default)]
    pub launch_site: Option<String>,
    #[serde(default = "default_launch_outcome")]
    pub outcome: String,
}

pub(crate) fn default_launch_outcome() -> String {
    "success".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    pub id: i64,
    pub name: String,
    pub launch_id: Option<i64>,
    #[serde(rename = "type")]
    pub kind: String,
    pub mass_kg: Option<f64>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayloadFields {
    pub name: String,
    #[serde(default)]
    pub launch_id: Option<i64>,
    #[serde(rename = "type", default = "default_payload_kind")]
    pub kind: String,
    #[serde(default)]
    pub mass_kg: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
}

pub(crate) fn default_payload_kind() -> String {
    "satellite".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewMember {
    pub id: i64,
    pub name: String,
    pub nationality: Option<String>,
    pub agency_id: Option<i64>,
    pub role: Option<String>,
    pub date_of_birth: Option<String>,
    pub bio: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewMemberFields {
    pub name: String,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub agency_id: Option<i64>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewAssignment {
    pub id: i64,
    pub crew_id: Option<i64>,
    pub mission_id: Option<i64>,
    pub role: Option<String>,
    pub assignment_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewAssignmentFields {
    #[serde(default)]
    pub crew_id: Option<i64>,
    #[serde(default)]
    pub mission_id: Option<i64>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub assignment_date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mission_fields_defaults_apply_on_sparse_payloads() {
        let m: MissionFields = serde_json::from_str(r#"{"name":"Apollo"}"#).unwrap();
        assert_eq!(m.name, "Apollo");
        assert_eq!(m.status, "planned");
        assert_eq!(m.agency_id, None);
        assert_eq!(m.budget_usd, None);
    }

    #[test]
    fn launch_fields_accepts_fully_null_relationships() {
        let l: LaunchFields = serde_json::from_str("{}").unwrap();
        assert_eq!(l.mission_id, None);
        assert_eq!(l.variant_id, None);
        assert_eq!(l.display_name, None);
        assert_eq!(l.outcome, "success");
    }

    #[test]
    fn payload_kind_round_trips_through_the_wire_name() {
        let p: PayloadFields =
            serde_json::from_str(r#"{"name":"Hubble","type":"telescope"}"#).unwrap();
        assert_eq!(p.kind, "telescope");
        let back = serde_json::to_value(&p).unwrap();
        assert_eq!(back["type"], "telescope");

        let defaulted: PayloadFields = serde_json::from_str(r#"{"name":"Cube"}"#).unwrap();
        assert_eq!(defaulted.kind, "satellite");
    }

    #[test]
    fn explicit_null_foreign_keys_deserialize_as_none() {
        let m: MissionFields =
            serde_json::from_str(r#"{"name":"Mir","agency_id":null}"#).unwrap();
        assert_eq!(m.agency_id, None);
    }
}
