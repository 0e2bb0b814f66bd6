//! Graph read view over the OrbitBase records.
//!
//! Six independently-keyed entity collections (agencies, missions, rockets,
//! rocket variants, launches, payloads) are projected into one node/edge
//! graph suitable for force-directed rendering. The projection is pure:
//! same input collections, same graph, no state between invocations.
//!
//! Per-table numeric ids are not unique across tables — Mission #3 and
//! Agency #3 are different records — so every node id is the type tag
//! joined with the raw id (`mission:3`, `agency:3`). Edge endpoints are
//! derived with the same rule, which is what keeps every emitted edge
//! resolvable against the node set.

use std::collections::HashSet;
use std::fmt;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use orbitbase_model::{Agency, Launch, Mission, Payload, Rocket, RocketVariant};

#[cfg(test)]
mod tests;

/// Separator between the type tag and the raw id in a node id.
const ID_DELIMITER: char = ':';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Agency,
    Mission,
    Rocket,
    Variant,
    Launch,
    Payload,
}

impl NodeKind {
    pub fn tag(self) -> &'static str {
        match self {
            Self::Agency => "agency",
            Self::Mission => "mission",
            Self::Rocket => "rocket",
            Self::Variant => "variant",
            Self::Launch => "launch",
            Self::Payload => "payload",
        }
    }

    /// Graph-wide unique node id for a raw per-table id.
    pub fn node_id(self, raw_id: i64) -> String {
        format!("{}{}{}", self.tag(), ID_DELIMITER, raw_id)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// What to do with an edge whose foreign key does not resolve to a row in
/// the referenced collection.
///
/// `Drop` removes the edge and logs the anomaly; `PassThrough` emits it
/// anyway, leaving the dangling reference for the client to deal with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DanglingEdgePolicy {
    #[default]
    Drop,
    PassThrough,
}

impl DanglingEdgePolicy {
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "drop" => Ok(Self::Drop),
            "pass" | "passthrough" | "pass-through" => Ok(Self::PassThrough),
            other => Err(anyhow!(
                "unknown dangling-edge policy `{other}` (expected drop|pass)"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
}

/// The wire shape of `GET /api/graph`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphView {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphEdge>,
}

/// One consistent snapshot of the six collections, fetched fresh per
/// request. The builder never reads anything else.
#[derive(Debug, Clone, Default)]
pub struct GraphInput {
    pub agencies: Vec<Agency>,
    pub missions: Vec<Mission>,
    pub rockets: Vec<Rocket>,
    pub variants: Vec<RocketVariant>,
    pub launches: Vec<Launch>,
    pub payloads: Vec<Payload>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GraphBuilder {
    policy: DanglingEdgePolicy,
}

impl GraphBuilder {
    pub fn new(policy: DanglingEdgePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> DanglingEdgePolicy {
        self.policy
    }

    /// Build the graph view.
    ///
    /// Node order follows collection order (agencies, missions, rockets,
    /// variants, launches, payloads); edge order follows the five
    /// relationship rules in sequence. A null foreign key produces no
    /// edge. Callers should rely on membership only, not on order.
    pub fn build(&self, input: &GraphInput) -> GraphView {
        let mut nodes = Vec::with_capacity(
            input.agencies.len()
                + input.missions.len()
                + input.rockets.len()
                + input.variants.len()
                + input.launches.len()
                + input.payloads.len(),
        );

        for a in &input.agencies {
            nodes.push(GraphNode {
                id: NodeKind::Agency.node_id(a.id),
                label: a.name.clone(),
                kind: NodeKind::Agency,
            });
        }
        for m in &input.missions {
            nodes.push(GraphNode {
                id: NodeKind::Mission.node_id(m.id),
                label: m.name.clone(),
                kind: NodeKind::Mission,
            });
        }
        for r in &input.rockets {
            nodes.push(GraphNode {
                id: NodeKind::Rocket.node_id(r.id),
                label: r.name.clone(),
                kind: NodeKind::Rocket,
            });
        }
        for v in &input.variants {
            nodes.push(GraphNode {
                id: NodeKind::Variant.node_id(v.id),
                label: v.name.clone(),
                kind: NodeKind::Variant,
            });
        }
        for l in &input.launches {
            nodes.push(GraphNode {
                id: NodeKind::Launch.node_id(l.id),
                label: launch_label(l),
                kind: NodeKind::Launch,
            });
        }
        for p in &input.payloads {
            nodes.push(GraphNode {
                id: NodeKind::Payload.node_id(p.id),
                label: p.name.clone(),
                kind: NodeKind::Payload,
            });
        }

        let mut links = Vec::new();
        for m in &input.missions {
            if let Some(agency_id) = m.agency_id {
                links.push(edge(NodeKind::Agency, agency_id, NodeKind::Mission, m.id));
            }
        }
        for l in &input.launches {
            if let Some(mission_id) = l.mission_id {
                links.push(edge(NodeKind::Mission, mission_id, NodeKind::Launch, l.id));
            }
        }
        for l in &input.launches {
            if let Some(variant_id) = l.variant_id {
                links.push(edge(NodeKind::Variant, variant_id, NodeKind::Launch, l.id));
            }
        }
        for v in &input.variants {
            if let Some(rocket_id) = v.rocket_id {
                links.push(edge(NodeKind::Rocket, rocket_id, NodeKind::Variant, v.id));
            }
        }
        for p in &input.payloads {
            if let Some(launch_id) = p.launch_id {
                links.push(edge(NodeKind::Launch, launch_id, NodeKind::Payload, p.id));
            }
        }

        if self.policy == DanglingEdgePolicy::Drop {
            let known: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
            links.retain(|e| {
                let resolved = known.contains(e.source.as_str()) && known.contains(e.target.as_str());
                if !resolved {
                    tracing::warn!(
                        source = %e.source,
                        target = %e.target,
                        "dropping dangling graph edge"
                    );
                }
                resolved
            });
        }

        GraphView { nodes, links }
    }
}

fn edge(source_kind: NodeKind, source_id: i64, target_kind: NodeKind, target_id: i64) -> GraphEdge {
    GraphEdge {
        source: source_kind.node_id(source_id),
        target: target_kind.node_id(target_id),
    }
}

fn launch_label(l: &Launch) -> String {
    match l.display_name.as_deref() {
        Some(name) if !name.trim().is_empty() => name.to_string(),
        _ => format!("Launch {}", l.id),
    }
}
