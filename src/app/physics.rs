use eframe::egui::{Vec2, vec2};

use super::{RenderEdge, RenderNode};

const ALPHA_MIN: f32 = 0.001;
const ALPHA_DECAY: f32 = 0.0228;
const VELOCITY_DAMPING: f32 = 0.88;
const MAX_FORCE: f32 = 220.0;
const MAX_SPEED: f32 = 26.0;

/// One named force of the layout. The integrator applies every force each
/// tick; the composition, not any single force, is the layout model.
enum Force {
    ManyBody { strength: f32, softening: f32 },
    Link { spring: f32, rest_base: f32, damping: f32 },
    Center { pull: f32 },
    Collide { radius: f32, strength: f32 },
}

pub(super) struct Simulation {
    alpha: f32,
    forces: Vec<Force>,
    scratch: Vec<Vec2>,
}

impl Simulation {
    pub(super) fn new() -> Self {
        Self {
            alpha: 1.0,
            forces: vec![
                Force::ManyBody {
                    strength: 26_000.0,
                    softening: 600.0,
                },
                Force::Link {
                    spring: 0.06,
                    rest_base: 100.0,
                    damping: 0.22,
                },
                Force::Center { pull: 0.004 },
                Force::Collide {
                    radius: 30.0,
                    strength: 0.8,
                },
            ],
            scratch: Vec::new(),
        }
    }

    /// Restart convergence after a structural change.
    pub(super) fn kick(&mut self) {
        self.alpha = 1.0;
    }

    pub(super) fn is_idle(&self) -> bool {
        self.alpha < ALPHA_MIN
    }

    /// Advance one tick. Returns whether the layout is still in motion;
    /// once alpha decays past its floor the simulation idles until the
    /// next `kick`.
    pub(super) fn step(
        &mut self,
        nodes: &mut [RenderNode],
        edges: &[RenderEdge],
        delta_seconds: f32,
    ) -> bool {
        let node_count = nodes.len();
        if node_count < 2 || self.is_idle() {
            return false;
        }

        self.scratch.resize(node_count, Vec2::ZERO);
        self.scratch.fill(Vec2::ZERO);

        for force in &self.forces {
            match *force {
                Force::ManyBody {
                    strength,
                    softening,
                } => accumulate_repulsion(nodes, strength, softening, &mut self.scratch),
                Force::Link {
                    spring,
                    rest_base,
                    damping,
                } => accumulate_springs(nodes, edges, spring, rest_base, damping, &mut self.scratch),
                Force::Center { pull } => {
                    for (index, node) in nodes.iter().enumerate() {
                        self.scratch[index] -= node.world_pos * pull;
                    }
                }
                Force::Collide { radius, strength } => {
                    accumulate_collisions(nodes, radius, strength, &mut self.scratch)
                }
            }
        }

        let time_step_scale = (delta_seconds * 60.0).clamp(0.25, 3.0);
        let damping_factor = VELOCITY_DAMPING.powf(time_step_scale);
        let alpha = self.alpha;

        for (index, node) in nodes.iter_mut().enumerate() {
            let mut force = self.scratch[index] * alpha;
            let force_sq = force.length_sq();
            if force_sq > MAX_FORCE * MAX_FORCE {
                force *= MAX_FORCE / force_sq.sqrt();
            }

            let mut velocity = (node.velocity + force * (0.055 * time_step_scale)) * damping_factor;
            let speed_sq = velocity.length_sq();
            if speed_sq > MAX_SPEED * MAX_SPEED {
                velocity *= MAX_SPEED / speed_sq.sqrt();
            }

            node.velocity = velocity;
            node.world_pos += velocity * time_step_scale;
        }

        self.alpha *= (1.0 - ALPHA_DECAY).powf(time_step_scale);
        true
    }
}

fn separation_direction(delta: Vec2, a: usize, b: usize) -> Vec2 {
    let distance = delta.length();
    if distance > 0.0001 {
        delta / distance
    } else {
        // Coincident points get a stable synthetic direction.
        let angle = ((a as f32) * 0.618_034 + (b as f32) * 0.414_214) * std::f32::consts::TAU;
        vec2(angle.cos(), angle.sin())
    }
}

fn accumulate_repulsion(nodes: &[RenderNode], strength: f32, softening: f32, forces: &mut [Vec2]) {
    for a in 0..nodes.len() {
        for b in (a + 1)..nodes.len() {
            let delta = nodes[a].world_pos - nodes[b].world_pos;
            let direction = separation_direction(delta, a, b);
            let push = direction * (strength / (delta.length_sq() + softening));
            forces[a] += push;
            forces[b] -= push;
        }
    }
}

fn accumulate_springs(
    nodes: &[RenderNode],
    edges: &[RenderEdge],
    spring: f32,
    rest_base: f32,
    damping: f32,
    forces: &mut [Vec2],
) {
    for edge in edges {
        let (from, to) = (edge.source, edge.target);
        if from >= nodes.len() || to >= nodes.len() || from == to {
            continue;
        }

        let delta = nodes[from].world_pos - nodes[to].world_pos;
        let distance_sq = delta.length_sq();
        if distance_sq <= 0.0001 * 0.0001 {
            continue;
        }
        let distance = distance_sq.sqrt();
        let direction = delta / distance;

        let rest = rest_base + nodes[from].base_radius + nodes[to].base_radius;
        let stretch = (distance - rest) * spring;
        let relative_velocity = nodes[from].velocity - nodes[to].velocity;
        let damping_force = relative_velocity.dot(direction) * damping;
        let correction = direction * (stretch + damping_force);

        forces[from] -= correction;
        forces[to] += correction;
    }
}

fn accumulate_collisions(nodes: &[RenderNode], radius: f32, strength: f32, forces: &mut [Vec2]) {
    let min_distance = radius * 2.0;
    for a in 0..nodes.len() {
        for b in (a + 1)..nodes.len() {
            let delta = nodes[a].world_pos - nodes[b].world_pos;
            let distance = delta.length();
            if distance >= min_distance {
                continue;
            }

            let direction = separation_direction(delta, a, b);
            let push = direction * ((min_distance - distance) * strength);
            forces[a] += push;
            forces[b] -= push;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stemma::RelationKind;
    use crate::util::stable_pair;

    use super::super::RenderNodeKind;

    fn node(id: &str) -> RenderNode {
        let (x, y) = stable_pair(id);
        RenderNode {
            id: id.to_owned(),
            label: id.to_owned(),
            kind: RenderNodeKind::Witness,
            family_id: None,
            citation_count: 0,
            search_text: id.to_owned(),
            world_pos: Vec2::ZERO,
            velocity: vec2(x, y),
            base_radius: 12.0,
        }
    }

    fn edge(source: usize, target: usize) -> RenderEdge {
        RenderEdge {
            source,
            target,
            kind: RelationKind::Copy,
            confidence: 0.8,
        }
    }

    #[test]
    fn simulation_converges_to_idle() {
        let mut nodes = vec![node("a"), node("b"), node("c"), node("d")];
        let edges = vec![edge(0, 1), edge(0, 2), edge(2, 3)];
        let mut sim = Simulation::new();

        let mut steps = 0;
        while sim.step(&mut nodes, &edges, 1.0 / 60.0) {
            steps += 1;
            assert!(steps < 10_000, "simulation never converged");
        }

        assert!(sim.is_idle());
        for node in &nodes {
            assert!(node.world_pos.x.is_finite() && node.world_pos.y.is_finite());
        }
    }

    #[test]
    fn repulsion_separates_coincident_nodes() {
        let mut nodes = vec![node("a"), node("b")];
        nodes[0].velocity = Vec2::ZERO;
        nodes[1].velocity = Vec2::ZERO;
        let mut sim = Simulation::new();

        for _ in 0..50 {
            sim.step(&mut nodes, &[], 1.0 / 60.0);
        }

        let distance = (nodes[0].world_pos - nodes[1].world_pos).length();
        assert!(distance > 1.0, "nodes stayed coincident ({distance})");
    }

    #[test]
    fn kick_restarts_a_settled_simulation() {
        let mut nodes = vec![node("a"), node("b")];
        let mut sim = Simulation::new();
        while sim.step(&mut nodes, &[], 1.0 / 60.0) {}
        assert!(sim.is_idle());

        sim.kick();
        assert!(!sim.is_idle());
        assert!(sim.step(&mut nodes, &[], 1.0 / 60.0));
    }

    #[test]
    fn idle_simulation_leaves_positions_untouched() {
        let mut nodes = vec![node("a"), node("b")];
        let mut sim = Simulation::new();
        while sim.step(&mut nodes, &[], 1.0 / 60.0) {}

        let before: Vec<Vec2> = nodes.iter().map(|n| n.world_pos).collect();
        assert!(!sim.step(&mut nodes, &[], 1.0 / 60.0));
        let after: Vec<Vec2> = nodes.iter().map(|n| n.world_pos).collect();
        assert_eq!(before, after);
    }
}
