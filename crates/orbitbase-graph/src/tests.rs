use super::*;
use orbitbase_model::{Agency, Launch, Mission, Payload, Rocket, RocketVariant};

fn agency(id: i64, name: &str) -> Agency {
    Agency {
        id,
        name: name.to_string(),
        country: None,
        founded_year: None,
        website: None,
        description: None,
    }
}

fn mission(id: i64, name: &str, agency_id: Option<i64>) -> Mission {
    Mission {
        id,
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

fn rocket(id: i64, name: &str) -> Rocket {
    Rocket {
        id,
        name: name.to_string(),
        manufacturer_id: None,
        first_flight: None,
        description: None,
        height_meters: None,
        mass_kg: None,
    }
}

fn variant(id: i64, name: &str, rocket_id: Option<i64>) -> RocketVariant {
    RocketVariant {
        id,
        name: name.to_string(),
        rocket_id,
        max_payload_kg: None,
    }
}

fn launch(
    id: i64,
    mission_id: Option<i64>,
    variant_id: Option<i64>,
    display_name: Option<&str>,
) -> Launch {
    Launch {
        id,
        mission_id,
        variant_id,
        display_name: display_name.map(str::to_string),
        launch_date: None,
        launch_site: None,
        outcome: "success".to_string(),
    }
}

fn payload(id: i64, name: &str, launch_id: Option<i64>) -> Payload {
    Payload {
        id,
        name: name.to_string(),
        launch_id,
        kind: "satellite".to_string(),
        mass_kg: None,
        description: None,
    }
}

fn node_ids(view: &GraphView) -> Vec<&str> {
    view.nodes.iter().map(|n| n.id.as_str()).collect()
}

#[test]
fn agency_mission_pair_yields_two_nodes_and_one_edge() {
    let input = GraphInput {
        agencies: vec![agency(1, "NASA")],
        missions: vec![mission(1, "Apollo", Some(1))],
        ..GraphInput::default()
    };
    let view = GraphBuilder::default().build(&input);

    assert_eq!(node_ids(&view), vec!["agency:1", "mission:1"]);
    assert_eq!(view.nodes[0].label, "NASA");
    assert_eq!(view.nodes[0].kind, NodeKind::Agency);
    assert_eq!(view.nodes[1].label, "Apollo");
    assert_eq!(view.nodes[1].kind, NodeKind::Mission);
    assert_eq!(
        view.links,
        vec![GraphEdge {
            source: "agency:1".to_string(),
            target: "mission:1".to_string(),
        }]
    );
}

#[test]
fn null_agency_reference_emits_no_edge() {
    let input = GraphInput {
        missions: vec![mission(5, "Voyager", None)],
        ..GraphInput::default()
    };
    let view = GraphBuilder::default().build(&input);

    assert_eq!(node_ids(&view), vec!["mission:5"]);
    assert!(view.links.is_empty());
}

#[test]
fn unnamed_launch_gets_a_synthesized_label() {
    let input = GraphInput {
        launches: vec![launch(9, None, None, None)],
        ..GraphInput::default()
    };
    let view = GraphBuilder::default().build(&input);

    assert_eq!(view.nodes.len(), 1);
    assert_eq!(view.nodes[0].id, "launch:9");
    assert_eq!(view.nodes[0].label, "Launch 9");
    assert_eq!(view.nodes[0].kind, NodeKind::Launch);
    assert!(view.links.is_empty());
}

#[test]
fn blank_launch_name_also_falls_back() {
    let input = GraphInput {
        launches: vec![launch(4, None, None, Some("   "))],
        ..GraphInput::default()
    };
    let view = GraphBuilder::default().build(&input);
    assert_eq!(view.nodes[0].label, "Launch 4");
}

#[test]
fn raw_id_collision_across_tables_stays_two_nodes() {
    let input = GraphInput {
        agencies: vec![agency(3, "ESA")],
        missions: vec![mission(3, "Rosetta", None)],
        ..GraphInput::default()
    };
    let view = GraphBuilder::default().build(&input);

    assert_eq!(node_ids(&view), vec!["agency:3", "mission:3"]);
}

#[test]
fn dangling_payload_edge_is_dropped_by_default() {
    let input = GraphInput {
        payloads: vec![payload(2, "Sputnik", Some(7))],
        ..GraphInput::default()
    };
    let view = GraphBuilder::default().build(&input);

    assert_eq!(node_ids(&view), vec!["payload:2"]);
    assert!(view.links.is_empty(), "edge to missing launch:7 must be dropped");
}

#[test]
fn dangling_payload_edge_survives_under_pass_through() {
    let input = GraphInput {
        payloads: vec![payload(2, "Sputnik", Some(7))],
        ..GraphInput::default()
    };
    let view = GraphBuilder::new(DanglingEdgePolicy::PassThrough).build(&input);

    assert_eq!(
        view.links,
        vec![GraphEdge {
            source: "launch:7".to_string(),
            target: "payload:2".to_string(),
        }]
    );
}

#[test]
fn empty_collections_build_an_empty_graph() {
    let view = GraphBuilder::default().build(&GraphInput::default());
    assert!(view.nodes.is_empty());
    assert!(view.links.is_empty());
}

#[test]
fn full_chain_emits_all_five_edge_kinds_in_rule_order() {
    let input = GraphInput {
        agencies: vec![agency(1, "NASA")],
        missions: vec![mission(2, "Artemis", Some(1))],
        rockets: vec![rocket(3, "SLS")],
        variants: vec![variant(4, "Block 1", Some(3))],
        launches: vec![launch(5, Some(2), Some(4), Some("Artemis I"))],
        payloads: vec![payload(6, "Orion", Some(5))],
    };
    let view = GraphBuilder::default().build(&input);

    assert_eq!(view.nodes.len(), 6);
    let pairs: Vec<(&str, &str)> = view
        .links
        .iter()
        .map(|e| (e.source.as_str(), e.target.as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("agency:1", "mission:2"),
            ("mission:2", "launch:5"),
            ("variant:4", "launch:5"),
            ("rocket:3", "variant:4"),
            ("launch:5", "payload:6"),
        ]
    );
}

#[test]
fn wire_shape_matches_the_client_contract() {
    let input = GraphInput {
        agencies: vec![agency(1, "NASA")],
        ..GraphInput::default()
    };
    let view = GraphBuilder::default().build(&input);
    let json = serde_json::to_value(&view).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "nodes": [{ "id": "agency:1", "label": "NASA", "type": "agency" }],
            "links": [],
        })
    );
}

#[test]
fn builder_is_deterministic_over_repeated_invocations() {
    let input = GraphInput {
        agencies: vec![agency(1, "NASA"), agency(2, "ESA")],
        missions: vec![mission(1, "Apollo", Some(1)), mission(2, "Ariane", Some(2))],
        launches: vec![launch(1, Some(2), None, None)],
        ..GraphInput::default()
    };
    let builder = GraphBuilder::default();
    assert_eq!(builder.build(&input), builder.build(&input));
}

#[test]
fn dangling_edge_policy_parses_both_spellings() {
    assert_eq!(
        DanglingEdgePolicy::parse("drop").unwrap(),
        DanglingEdgePolicy::Drop
    );
    assert_eq!(
        DanglingEdgePolicy::parse("Pass").unwrap(),
        DanglingEdgePolicy::PassThrough
    );
    assert_eq!(
        DanglingEdgePolicy::parse("pass-through").unwrap(),
        DanglingEdgePolicy::PassThrough
    );
    assert!(DanglingEdgePolicy::parse("keep").is_err());
}
