use super::*;
use orbitbase_model::{
    AgencyFields, CrewMemberFields, LaunchFields, MissionFields, PayloadFields,
    RocketFields, RocketVariantFields,
};

fn store() -> SqliteStore {
    SqliteStore::open_in_memory().unwrap()
}

fn agency_fields(name: &str) -> AgencyFields {
    AgencyFields {
        name: name.to_string(),
        country: None,
        founded_year: None,
        website: None,
        description: None,
    }
}

fn mission_fields(name: &str, agency_id: Option<i64>) -> MissionFields {
    MissionFields {
        name: name.to_string(),
        agency_id,
        mission_type: None,
        start_date: None,
        end_date: None,
        status: "planned".to_string(),
        description: None,
        budget_usd: None,
    }
}

fn launch_fields(mission_id: Option<i64>, variant_id: Option<i64>) -> LaunchFields {
    LaunchFields {
        mission_id,
        variant_id,
        display_name: None,
        launch_date: None,
        launch_site: None,
        outcome: "success".to_string(),
    }
}

fn payload_fields(name: &str, launch_id: Option<i64>, mass_kg: Option<f64>) -> PayloadFields {
    PayloadFields {
        name: name.to_string(),
        launch_id,
        kind: "satellite".to_string(),
        mass_kg,
        description: None,
    }
}

#[test]
fn insert_then_list_round_trips() {
    let mut store = store();
    let id = store.insert_agency(&agency_fields("NASA")).unwrap();
    let other = store.insert_agency(&agency_fields("ESA")).unwrap();
    assert_ne!(id, other);

    let all = store.list_agencies().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].name, "NASA");
    assert_eq!(all[1].name, "ESA");
    // Ascending id order.
    assert!(all[0].id < all[1].id);
}

#[test]
fn get_returns_none_for_missing_rows() {
    let store = store();
    assert!(store.get_mission(42).unwrap().is_none());
}

#[test]
fn update_overwrites_every_field() {
    let mut store = store();
    let agency = store.insert_agency(&agency_fields("NASA")).unwrap();
    let id = store
        .insert_mission(&mission_fields("Apollo", Some(agency)))
        .unwrap();

    let mut fields = mission_fields("Apollo 11", None);
    fields.status = "active".to_string();
    store.update_mission(id, &fields).unwrap();

    let m = store.get_mission(id).unwrap().unwrap();
    assert_eq!(m.name, "Apollo 11");
    assert_eq!(m.status, "active");
    // Full-record semantics: the omitted agency link is cleared, not kept.
    assert_eq!(m.agency_id, None);
}

#[test]
fn update_of_a_missing_row_is_an_unknown_id_error() {
    let mut store = store();
    let err = store
        .update_mission(99, &mission_fields("Ghost", None))
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::UnknownId { table: "missions", id: 99 }
    ));
}

#[test]
fn delete_is_idempotent() {
    let mut store = store();
    let id = store.insert_agency(&agency_fields("NASA")).unwrap();
    store.delete_agency(id).unwrap();
    store.delete_agency(id).unwrap();
    assert!(store.get_agency(id).unwrap().is_none());
}

#[test]
fn deleting_an_agency_clears_the_mission_reference() {
    let mut store = store();
    let agency = store.insert_agency(&agency_fields("NASA")).unwrap();
    let mission = store
        .insert_mission(&mission_fields("Apollo", Some(agency)))
        .unwrap();

    store.delete_agency(agency).unwrap();

    let m = store.get_mission(mission).unwrap().unwrap();
    assert_eq!(m.agency_id, None, "FK should clear, not cascade or fail");
}

#[test]
fn add_mission_procedure_defaults_and_validates() {
    let mut store = store();
    let id = store.add_mission("Artemis", None, None).unwrap();
    let m = store.get_mission(id).unwrap().unwrap();
    assert_eq!(m.status, "planned");

    assert!(matches!(
        store.add_mission("Orphan", Some(404), None),
        Err(StoreError::UnknownId { table: "agencies", id: 404 })
    ));
    assert!(matches!(
        store.add_mission("   ", None, None),
        Err(StoreError::InvalidInput(_))
    ));
}

#[test]
fn complete_mission_sets_status_and_fills_end_date() {
    let mut store = store();
    let id = store.add_mission("Skylab", None, Some("active")).unwrap();

    store.complete_mission(id, Some("1979-07-11")).unwrap();
    let m = store.get_mission(id).unwrap().unwrap();
    assert_eq!(m.status, "completed");
    assert_eq!(m.end_date.as_deref(), Some("1979-07-11"));

    let other = store.add_mission("Mir", None, Some("active")).unwrap();
    store.complete_mission(other, None).unwrap();
    let m = store.get_mission(other).unwrap().unwrap();
    assert_eq!(m.status, "completed");
    assert!(m.end_date.is_some(), "end date defaults to today");

    assert!(store.complete_mission(999, None).is_err());
}

#[test]
fn assign_crew_requires_both_endpoints() {
    let mut store = store();
    let mission = store.add_mission("Apollo", None, None).unwrap();
    let crew = store
        .insert_crew_member(&CrewMemberFields {
            name: "Neil".to_string(),
            nationality: None,
            agency_id: None,
            role: None,
            date_of_birth: None,
            bio: None,
        })
        .unwrap();

    let id = store
        .assign_crew_to_mission(mission, crew, Some("commander"), None)
        .unwrap();
    let a = store.get_crew_assignment(id).unwrap().unwrap();
    assert_eq!(a.crew_id, Some(crew));
    assert_eq!(a.mission_id, Some(mission));
    assert_eq!(a.role.as_deref(), Some("commander"));

    assert!(matches!(
        store.assign_crew_to_mission(mission, 404, None, None),
        Err(StoreError::UnknownId { table: "crew_members", .. })
    ));
    assert!(matches!(
        store.assign_crew_to_mission(404, crew, None, None),
        Err(StoreError::UnknownId { table: "missions", .. })
    ));
}

#[test]
fn add_launch_requires_mission_and_variant() {
    let mut store = store();
    let mission = store.add_mission("Artemis", None, None).unwrap();
    let rocket = store
        .insert_rocket(&RocketFields {
            name: "SLS".to_string(),
            manufacturer_id: None,
            first_flight: None,
            description: None,
            height_meters: None,
            mass_kg: None,
        })
        .unwrap();
    let variant = store
        .insert_rocket_variant(&RocketVariantFields {
            name: "Block 1".to_string(),
            rocket_id: Some(rocket),
            max_payload_kg: None,
        })
        .unwrap();

    let id = store
        .add_launch(mission, variant, Some("Artemis I"), None, None, None)
        .unwrap();
    let l = store.get_launch(id).unwrap().unwrap();
    assert_eq!(l.display_name.as_deref(), Some("Artemis I"));
    assert_eq!(l.outcome, "success");

    assert!(store.add_launch(404, variant, None, None, None, None).is_err());
    assert!(store.add_launch(mission, 404, None, None, None, None).is_err());
}

#[test]
fn active_mission_count_counts_only_active() {
    let mut store = store();
    store.add_mission("A", None, Some("active")).unwrap();
    store.add_mission("B", None, Some("active")).unwrap();
    store.add_mission("C", None, Some("planned")).unwrap();
    store.add_mission("D", None, Some("completed")).unwrap();

    assert_eq!(store.active_mission_count().unwrap(), 2);
}

#[test]
fn total_payload_mass_sums_one_launch() {
    let mut store = store();
    let launch = store.insert_launch(&launch_fields(None, None)).unwrap();
    let other = store.insert_launch(&launch_fields(None, None)).unwrap();
    store
        .insert_payload(&payload_fields("A", Some(launch), Some(1200.0)))
        .unwrap();
    store
        .insert_payload(&payload_fields("B", Some(launch), Some(300.5)))
        .unwrap();
    store
        .insert_payload(&payload_fields("C", Some(other), Some(50.0)))
        .unwrap();
    store
        .insert_payload(&payload_fields("unattached", None, Some(999.0)))
        .unwrap();

    let total = store.total_payload_mass(launch).unwrap();
    assert!((total - 1500.5).abs() < f64::EPSILON);
    assert_eq!(store.total_payload_mass(12345).unwrap(), 0.0);
}

#[test]
fn table_data_browses_known_tables_only() {
    let mut store = store();
    store.insert_agency(&agency_fields("NASA")).unwrap();

    let data = store.table_data("agencies", 50).unwrap();
    assert_eq!(data.table, "agencies");
    assert_eq!(data.count, 1);
    assert_eq!(data.rows.len(), 1);
    assert_eq!(data.rows[0]["name"], "NASA");

    assert!(matches!(
        store.table_data("agencies; DROP TABLE missions", 50),
        Err(StoreError::InvalidInput(_))
    ));
    assert_eq!(store.table_names().len(), 9);
}

#[test]
fn store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("orbitbase.db");

    {
        let mut store = SqliteStore::open(&path).unwrap();
        store.insert_agency(&agency_fields("NASA")).unwrap();
    }

    let store = SqliteStore::open(&path).unwrap();
    assert_eq!(store.list_agencies().unwrap().len(), 1);
}
