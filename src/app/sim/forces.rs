use std::f32::consts::TAU;

use eframe::egui::{Vec2, vec2};

use crate::app::graph::{FlavorNode, ResolvedLink};

const AXIS_STRENGTH: f32 = 0.1;
const MIN_DISTANCE_SQ: f32 = 1.0;

// Deterministic stand-in for a random jiggle: coincident points get pushed
// apart along a golden-angle direction derived from their indices.
fn separation_direction(a: usize, b: usize) -> Vec2 {
    let angle = ((a as f32) * 0.618_034 + (b as f32) * 0.414_214) * TAU;
    vec2(angle.cos(), angle.sin())
}

/// Pulls each link's endpoints toward the uniform rest length, split between
/// the endpoints by their degree bias so hubs move less than leaves.
pub(super) fn apply_link_force(
    nodes: &mut [FlavorNode],
    links: &[ResolvedLink],
    optimal_distance: f32,
    alpha: f32,
) {
    for link in links {
        if link.source >= nodes.len() || link.target >= nodes.len() {
            continue;
        }

        let source = &nodes[link.source];
        let target = &nodes[link.target];
        let mut delta = (target.pos + target.vel) - (source.pos + source.vel);
        if delta.length_sq() <= f32::EPSILON {
            delta = separation_direction(link.source, link.target) * 0.1;
        }

        let distance = delta.length();
        let pull = (distance - optimal_distance) / distance * link.strength * alpha;
        let correction = delta * pull;

        nodes[link.target].vel -= correction * link.bias;
        nodes[link.source].vel += correction * (1.0 - link.bias);
    }
}

/// Pairwise inverse-square repulsion. O(n²), which is fine at interactive
/// graph sizes; the squared distance is floored to keep the force bounded.
pub(super) fn apply_charge(nodes: &mut [FlavorNode], charge_strength: f32, alpha: f32) {
    for i in 0..nodes.len() {
        for j in (i + 1)..nodes.len() {
            let mut delta = nodes[j].pos - nodes[i].pos;
            if delta.length_sq() <= f32::EPSILON {
                delta = separation_direction(i, j) * 0.5;
            }

            let distance_sq = delta.length_sq().max(MIN_DISTANCE_SQ);
            let direction = delta / distance_sq.sqrt();
            // negative charge moves the pair apart
            let push = direction * (charge_strength * alpha / distance_sq);

            nodes[i].vel += push;
            nodes[j].vel -= push;
        }
    }
}

/// Independent pulls toward the horizontal and vertical center lines, which
/// keeps a sparse layout from drifting off-screen.
pub(super) fn apply_axis_pull(nodes: &mut [FlavorNode], alpha: f32) {
    for node in nodes.iter_mut() {
        node.vel += -node.pos * (AXIS_STRENGTH * alpha);
    }
}

/// Translates the whole layout so its centroid sits at the origin. Runs in
/// the force phase; integration afterwards snaps pinned nodes back.
pub(super) fn recenter(nodes: &mut [FlavorNode]) {
    if nodes.is_empty() {
        return;
    }

    let mut centroid = Vec2::ZERO;
    for node in nodes.iter() {
        centroid += node.pos;
    }
    centroid /= nodes.len() as f32;

    for node in nodes.iter_mut() {
        node.pos -= centroid;
    }
}
