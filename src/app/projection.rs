use std::collections::HashSet;

use crate::stemma::{ARCHETYPE_ID, StemmaData, family_node_id};

use super::view_state::{ViewMode, ViewState};

/// View-layer projection of a dataset record. The payload discriminates
/// archetype, family cluster and witness explicitly; positions live on the
/// render layer, owned by the simulation.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ProjectedNode {
    pub id: String,
    pub label: String,
    pub payload: NodePayload,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum NodePayload {
    Archetype,
    Family {
        family_index: usize,
        is_expanded: bool,
    },
    Witness {
        witness_index: usize,
    },
}

impl ProjectedNode {
    pub(crate) fn family_id<'a>(&self, data: &'a StemmaData) -> Option<&'a str> {
        match self.payload {
            NodePayload::Archetype => None,
            NodePayload::Family { family_index, .. } => {
                data.families.get(family_index).map(|family| family.id.as_str())
            }
            NodePayload::Witness { witness_index } => data
                .witnesses
                .get(witness_index)
                .map(|witness| witness.family_id.as_str()),
        }
    }

    pub(crate) fn citation_count(&self, data: &StemmaData) -> usize {
        match self.payload {
            NodePayload::Archetype => 0,
            NodePayload::Family { family_index, .. } => data
                .families
                .get(family_index)
                .map_or(0, |family| family.evidence.len()),
            NodePayload::Witness { witness_index } => data
                .witnesses
                .get(witness_index)
                .map_or(0, |witness| witness.citations.len()),
        }
    }
}

/// Derive the ordered node list for the current view state. Pure: equal
/// inputs yield structurally equal output, and ordering follows dataset
/// order so repeated projections do not shuffle the simulation.
pub(crate) fn project_nodes(data: &StemmaData, view: &ViewState) -> Vec<ProjectedNode> {
    let mut nodes = Vec::with_capacity(1 + data.families.len() + data.witnesses.len());

    nodes.push(ProjectedNode {
        id: ARCHETYPE_ID.to_owned(),
        label: "Archetype".to_owned(),
        payload: NodePayload::Archetype,
    });

    match view.view_mode {
        ViewMode::Family => {
            for (family_index, family) in data.families.iter().enumerate() {
                let is_expanded = view.expanded_families.contains(&family.id);
                nodes.push(ProjectedNode {
                    id: family_node_id(&family.id),
                    label: family.label.clone(),
                    payload: NodePayload::Family {
                        family_index,
                        is_expanded,
                    },
                });

                if !is_expanded {
                    continue;
                }

                for (witness_index, witness) in data.witnesses.iter().enumerate() {
                    if witness.family_id == family.id {
                        nodes.push(ProjectedNode {
                            id: witness.id.clone(),
                            label: witness.siglum.clone(),
                            payload: NodePayload::Witness { witness_index },
                        });
                    }
                }
            }
        }
        ViewMode::All => {
            for (witness_index, witness) in data.witnesses.iter().enumerate() {
                nodes.push(ProjectedNode {
                    id: witness.id.clone(),
                    label: witness.siglum.clone(),
                    payload: NodePayload::Witness { witness_index },
                });
            }
        }
    }

    nodes
}

/// Indices into `data.edges` of edges whose endpoints are both in the node
/// list. Edges referencing collapsed or absent nodes are dropped silently.
pub(crate) fn visible_edge_indices(data: &StemmaData, nodes: &[ProjectedNode]) -> Vec<usize> {
    let node_ids: HashSet<&str> = nodes.iter().map(|node| node.id.as_str()).collect();

    data.edges
        .iter()
        .enumerate()
        .filter(|(_, edge)| {
            node_ids.contains(edge.from.as_str()) && node_ids.contains(edge.to.as_str())
        })
        .map(|(index, _)| index)
        .collect()
}
