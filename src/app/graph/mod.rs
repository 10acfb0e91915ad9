mod build;
mod drag;
mod interaction;
mod view;

use std::collections::HashMap;

use eframe::egui::Vec2;

pub use build::build_snapshot;
pub use drag::{DRAG_SETTLE_SECS, DragController};

/// A flavor in the active chart, with its live simulation state. A pinned node
/// holds its pin position every tick regardless of the force field.
#[derive(Clone, Debug)]
pub struct FlavorNode {
    pub key: String,
    pub pos: Vec2,
    pub vel: Vec2,
    pub pinned: Option<Vec2>,
}

impl FlavorNode {
    pub fn is_pinned(&self) -> bool {
        self.pinned.is_some()
    }
}

/// A term-to-recommendation pairing. The weight only affects stroke width;
/// every link relaxes toward the same rest length.
#[derive(Clone, Debug)]
pub struct FlavorLink {
    pub source: String,
    pub target: String,
    pub weight: f32,
}

/// Link endpoints resolved against the snapshot's node vec, with the
/// degree-derived spring strength and bias precomputed at build time. The
/// snapshot's node set is immutable for its lifetime, so the indices stay
/// valid; positions are always read live.
#[derive(Clone, Copy, Debug)]
pub struct ResolvedLink {
    pub source: usize,
    pub target: usize,
    pub strength: f32,
    pub bias: f32,
}

/// The node/link pair driving one simulation run. Replaced wholesale whenever
/// the term set or any fetched recommendation list changes.
pub struct GraphSnapshot {
    pub nodes: Vec<FlavorNode>,
    pub links: Vec<FlavorLink>,
    pub resolved: Vec<ResolvedLink>,
    index_by_key: HashMap<String, usize>,
}

impl GraphSnapshot {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.index_by_key.get(key).copied()
    }

    pub fn node_mut(&mut self, key: &str) -> Option<&mut FlavorNode> {
        let index = self.index_of(key)?;
        self.nodes.get_mut(index)
    }
}
