use std::collections::HashMap;

use eframe::egui::{Vec2, vec2};

use crate::util::stable_pair;

use super::super::physics::Simulation;
use super::super::projection::{self, NodePayload, ProjectedNode};
use super::super::render_utils::node_radius;
use super::super::{RenderEdge, RenderGraph, RenderNode, RenderNodeKind, ViewModel};

impl ViewModel {
    /// Re-derive the node list and render graph if any projection input
    /// changed since the last frame. Runs before the renderer reads the
    /// node list, so a frame never sees a stale projection.
    pub(in crate::app) fn ensure_projection(&mut self) {
        if !self.projection_dirty {
            return;
        }

        self.nodes = projection::project_nodes(&self.data, &self.view);
        self.projection_revision = self.projection_revision.wrapping_add(1);
        self.search_match_cache = None;
        self.rebuild_render_graph();
        self.projection_dirty = false;
    }

    fn rebuild_render_graph(&mut self) {
        let edge_indices = projection::visible_edge_indices(&self.data, &self.nodes);

        let mut index_by_id = HashMap::with_capacity(self.nodes.len());
        for (index, node) in self.nodes.iter().enumerate() {
            index_by_id.insert(node.id.clone(), index);
        }

        let edges = edge_indices
            .into_iter()
            .filter_map(|edge_index| {
                let edge = &self.data.edges[edge_index];
                match (index_by_id.get(&edge.from), index_by_id.get(&edge.to)) {
                    (Some(&source), Some(&target)) if source != target => Some(RenderEdge {
                        source,
                        target,
                        kind: edge.kind,
                        confidence: edge.confidence,
                    }),
                    _ => None,
                }
            })
            .collect::<Vec<_>>();

        // Surviving nodes keep their positions so a toggle only moves the
        // nodes it actually added or removed. The prior simulation is
        // stopped here; kicking restarts convergence for the new layout.
        let mut sim = Simulation::new();
        let mut prior_motion: HashMap<String, (Vec2, Vec2)> = HashMap::new();
        if let Some(cache) = self.graph_cache.take() {
            sim = cache.sim;
            for node in cache.nodes {
                prior_motion.insert(node.id, (node.world_pos, node.velocity));
            }
        }
        sim.kick();

        let nodes = self
            .nodes
            .iter()
            .map(|projected| self.make_render_node(projected, &prior_motion))
            .collect::<Vec<_>>();

        self.visible_node_count = nodes.len();
        self.visible_edge_count = edges.len();

        self.graph_cache = Some(RenderGraph {
            nodes,
            edges,
            sim,
            screen_positions: Vec::new(),
            screen_radii: Vec::new(),
        });
    }

    fn make_render_node(
        &self,
        projected: &ProjectedNode,
        prior_motion: &HashMap<String, (Vec2, Vec2)>,
    ) -> RenderNode {
        let kind = match projected.payload {
            NodePayload::Archetype => RenderNodeKind::Archetype,
            NodePayload::Family { is_expanded, .. } => {
                if is_expanded {
                    RenderNodeKind::FamilyExpanded
                } else {
                    RenderNodeKind::FamilyCollapsed
                }
            }
            NodePayload::Witness { .. } => RenderNodeKind::Witness,
        };

        let search_text = match projected.payload {
            NodePayload::Archetype => projected.label.clone(),
            NodePayload::Family { family_index, .. } => self
                .data
                .families
                .get(family_index)
                .map(|family| format!("{} {}", family.label, family.id))
                .unwrap_or_else(|| projected.label.clone()),
            NodePayload::Witness { witness_index } => self
                .data
                .witnesses
                .get(witness_index)
                .map(|witness| {
                    format!(
                        "{} {} {} {} {}",
                        witness.siglum, witness.shelfmark, witness.repo, witness.century,
                        witness.script
                    )
                })
                .unwrap_or_else(|| projected.label.clone()),
        };

        let base_radius = node_radius(kind);
        let (world_pos, velocity) = prior_motion
            .get(&projected.id)
            .copied()
            .unwrap_or_else(|| (Vec2::ZERO, spawn_velocity(&projected.id, base_radius)));

        RenderNode {
            id: projected.id.clone(),
            label: projected.label.clone(),
            kind,
            family_id: projected.family_id(&self.data).map(ToOwned::to_owned),
            citation_count: projected.citation_count(&self.data),
            search_text,
            world_pos,
            velocity,
            base_radius,
        }
    }
}

fn spawn_velocity(id: &str, base_radius: f32) -> Vec2 {
    let (jx, jy) = stable_pair(id);
    let mut direction = vec2(jx, jy);
    if direction.length_sq() <= 0.0001 {
        direction = vec2(1.0, 0.0);
    } else {
        direction = direction.normalized();
    }

    direction * (1.15 + base_radius * 0.04)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stemma::builtin_corpus;

    #[test]
    fn render_graph_mirrors_the_projection() {
        let mut model = ViewModel::new(builtin_corpus());
        model.ensure_projection();

        let cache = model.graph_cache.as_ref().unwrap();
        assert_eq!(cache.nodes.len(), model.nodes.len());
        assert_eq!(cache.nodes[0].kind, RenderNodeKind::Archetype);
        assert_eq!(model.visible_node_count, cache.nodes.len());
        assert_eq!(model.visible_edge_count, cache.edges.len());

        for edge in &cache.edges {
            assert!(edge.source < cache.nodes.len());
            assert!(edge.target < cache.nodes.len());
        }
    }

    fn node_index(model: &ViewModel, id: &str) -> Option<usize> {
        model
            .graph_cache
            .as_ref()
            .unwrap()
            .nodes
            .iter()
            .position(|node| node.id == id)
    }

    #[test]
    fn surviving_nodes_keep_their_positions_across_rebuilds() {
        let mut model = ViewModel::new(builtin_corpus());
        model.ensure_projection();

        let index = node_index(&model, "B1").unwrap();
        model.graph_cache.as_mut().unwrap().nodes[index].world_pos = vec2(37.0, -82.0);

        model.toggle_family("C");
        model.ensure_projection();

        let index = node_index(&model, "B1").unwrap();
        assert_eq!(
            model.graph_cache.as_ref().unwrap().nodes[index].world_pos,
            vec2(37.0, -82.0)
        );
    }

    #[test]
    fn collapsing_a_family_drops_its_witnesses_from_the_render_graph() {
        let mut model = ViewModel::new(builtin_corpus());
        model.ensure_projection();
        assert!(node_index(&model, "B3").is_some());

        model.toggle_family("B");
        model.ensure_projection();
        assert!(node_index(&model, "B3").is_none());
    }

    #[test]
    fn rebuild_restarts_the_simulation() {
        let mut model = ViewModel::new(builtin_corpus());
        model.ensure_projection();

        // Run the old simulation to rest, then force a structural change.
        {
            let cache = model.graph_cache.as_mut().unwrap();
            let RenderGraph { nodes, edges, sim, .. } = cache;
            while sim.step(nodes, edges, 1.0 / 60.0) {}
            assert!(sim.is_idle());
        }

        model.toggle_family("D");
        model.ensure_projection();
        assert!(!model.graph_cache.as_ref().unwrap().sim.is_idle());
    }
}
