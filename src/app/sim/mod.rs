mod forces;

use eframe::egui::Vec2;

use super::graph::{FlavorNode, ResolvedLink};

pub const ALPHA_DECAY: f32 = 0.05;
pub const ALPHA_MIN: f32 = 0.001;
const VELOCITY_RETENTION: f32 = 0.6;
const CHARGE_PER_NODE: f32 = -30.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
}

/// Force constants derived once at simulation start from the viewport and the
/// graph size: larger graphs spread proportionally to the available area and
/// repel harder so dense charts do not collapse.
#[derive(Clone, Copy, Debug)]
pub struct SimParams {
    pub optimal_distance: f32,
    pub charge_strength: f32,
}

impl SimParams {
    pub fn for_graph(node_count: usize, viewport: Vec2) -> Self {
        let count = node_count.max(1) as f32;
        let area = (viewport.x * viewport.y).max(1.0);
        Self {
            optimal_distance: (area / count).sqrt(),
            charge_strength: CHARGE_PER_NODE * count,
        }
    }
}

/// Discrete-time relaxation of the flavor layout. Owns the cooling state
/// (alpha) exclusively; node positions live in the snapshot and are only
/// touched inside `step`.
pub struct Simulation {
    params: SimParams,
    alpha: f32,
    alpha_target: f32,
    phase: Phase,
}

impl Simulation {
    pub fn new(node_count: usize, viewport: Vec2) -> Self {
        Self {
            params: SimParams::for_graph(node_count, viewport),
            alpha: 1.0,
            alpha_target: 0.0,
            phase: Phase::Running,
        }
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn alpha_target(&self) -> f32 {
        self.alpha_target
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn params(&self) -> SimParams {
        self.params
    }

    /// One relaxation tick. Returns whether the layout is still in motion;
    /// `false` means the engine is idle and stays that way until re-heated.
    ///
    /// Order per tick: cool alpha, accumulate velocity forces, recenter, then
    /// integrate. Integration runs last so a pinned position always wins over
    /// whatever the forces computed.
    pub fn step(&mut self, nodes: &mut [FlavorNode], links: &[ResolvedLink]) -> bool {
        if self.phase == Phase::Idle || nodes.is_empty() {
            return false;
        }

        self.alpha += (self.alpha_target - self.alpha) * ALPHA_DECAY;
        if self.alpha < ALPHA_MIN && self.alpha_target < ALPHA_MIN {
            self.phase = Phase::Idle;
            return false;
        }

        forces::apply_link_force(nodes, links, self.params.optimal_distance, self.alpha);
        forces::apply_charge(nodes, self.params.charge_strength, self.alpha);
        forces::apply_axis_pull(nodes, self.alpha);
        forces::recenter(nodes);

        for node in nodes.iter_mut() {
            if let Some(pinned) = node.pinned {
                node.pos = pinned;
                node.vel = Vec2::ZERO;
            } else {
                node.vel *= VELOCITY_RETENTION;
                node.pos += node.vel;
            }
        }

        true
    }

    /// Raises alpha (never lowers it) and keeps the field live at `target`.
    /// Restarts ticking if the engine had gone idle.
    pub fn reheat(&mut self, alpha_floor: f32, target: f32) {
        self.alpha = self.alpha.max(alpha_floor);
        self.alpha_target = target;
        self.phase = Phase::Running;
    }

    /// Lets alpha decay back toward zero so the layout settles.
    pub fn settle(&mut self) {
        self.alpha_target = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;

    use super::*;

    fn node(key: &str, x: f32, y: f32) -> FlavorNode {
        FlavorNode {
            key: key.to_string(),
            pos: vec2(x, y),
            vel: Vec2::ZERO,
            pinned: None,
        }
    }

    fn link(source: usize, target: usize) -> ResolvedLink {
        ResolvedLink {
            source,
            target,
            strength: 1.0,
            bias: 0.5,
        }
    }

    #[test]
    fn single_node_params_are_finite() {
        let params = SimParams::for_graph(1, vec2(1280.0, 800.0));
        assert!(params.optimal_distance.is_finite());
        assert!(params.optimal_distance > 0.0);
        assert!(params.charge_strength.is_finite());
    }

    #[test]
    fn single_node_steps_without_nan() {
        let mut sim = Simulation::new(1, vec2(800.0, 600.0));
        let mut nodes = vec![node("vanilla", 10.0, -4.0)];
        for _ in 0..50 {
            sim.step(&mut nodes, &[]);
            assert!(nodes[0].pos.x.is_finite());
            assert!(nodes[0].pos.y.is_finite());
        }
    }

    #[test]
    fn alpha_decreases_monotonically_and_goes_idle() {
        let mut sim = Simulation::new(2, vec2(800.0, 600.0));
        let mut nodes = vec![node("a", -50.0, 0.0), node("b", 50.0, 0.0)];
        let links = [link(0, 1)];

        let mut previous = sim.alpha();
        let mut ticks = 0;
        while sim.step(&mut nodes, &links) {
            assert!(sim.alpha() <= previous);
            previous = sim.alpha();
            ticks += 1;
            assert!(ticks < 1_000, "simulation never settled");
        }

        assert_eq!(sim.phase(), Phase::Idle);
        // geometric decay of 0.05 from 1.0 crosses 0.001 in about 135 ticks
        assert!(ticks > 50);
    }

    #[test]
    fn idle_engine_does_not_move_nodes() {
        let mut sim = Simulation::new(2, vec2(800.0, 600.0));
        let mut nodes = vec![node("a", -50.0, 0.0), node("b", 50.0, 0.0)];
        let links = [link(0, 1)];
        while sim.step(&mut nodes, &links) {}

        let frozen: Vec<Vec2> = nodes.iter().map(|n| n.pos).collect();
        assert!(!sim.step(&mut nodes, &links));
        for (node, before) in nodes.iter().zip(&frozen) {
            assert_eq!(node.pos, *before);
        }
    }

    #[test]
    fn reheat_restarts_an_idle_engine() {
        let mut sim = Simulation::new(2, vec2(800.0, 600.0));
        let mut nodes = vec![node("a", -50.0, 0.0), node("b", 50.0, 0.0)];
        let links = [link(0, 1)];
        while sim.step(&mut nodes, &links) {}
        assert_eq!(sim.phase(), Phase::Idle);

        sim.reheat(0.3, 0.3);
        assert_eq!(sim.phase(), Phase::Running);
        assert!(sim.step(&mut nodes, &links));
        // alpha decays toward the raised target, so it stays live
        assert!(sim.alpha() >= 0.29);
    }

    #[test]
    fn pinned_node_holds_its_position_under_forces() {
        let mut sim = Simulation::new(3, vec2(800.0, 600.0));
        let mut nodes = vec![
            node("vanilla", 0.0, 0.0),
            node("chocolate", 80.0, 0.0),
            node("caramel", -80.0, 20.0),
        ];
        nodes[0].pinned = Some(vec2(100.0, 200.0));
        let links = [link(0, 1), link(0, 2)];

        for _ in 0..20 {
            sim.step(&mut nodes, &links);
            assert_eq!(nodes[0].pos, vec2(100.0, 200.0));
            assert_eq!(nodes[0].vel, Vec2::ZERO);
        }
    }

    #[test]
    fn coincident_nodes_separate_without_nan() {
        let mut sim = Simulation::new(2, vec2(800.0, 600.0));
        let mut nodes = vec![node("a", 0.0, 0.0), node("b", 0.0, 0.0)];
        let links = [link(0, 1)];

        for _ in 0..10 {
            sim.step(&mut nodes, &links);
        }
        assert!(nodes[0].pos.x.is_finite() && nodes[1].pos.x.is_finite());
        assert!((nodes[0].pos - nodes[1].pos).length() > 0.0);
    }
}
