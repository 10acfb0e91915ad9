use eframe::egui::Vec2;
use tracing::debug;

use crate::app::sim::Simulation;

use super::GraphSnapshot;

const DRAG_ALPHA: f32 = 0.3;
pub const DRAG_SETTLE_SECS: f64 = 3.0;

/// Translates pointer gestures into the per-node Free/Pinned state machine.
///
/// Only one node is dragged at a time; it is tracked by key rather than index
/// so a rebuild mid-drag orphans the gesture instead of retargeting it. Every
/// drag-move cancels and replaces the single pending settle deadline, so at
/// most one cooldown is ever outstanding.
#[derive(Default)]
pub struct DragController {
    active: Option<String>,
    settle_deadline: Option<f64>,
}

impl DragController {
    /// Free → Pinned: capture the node's current simulated position as its pin
    /// and keep the field live while the drag lasts. Re-pins without error if
    /// the node was already pinned.
    pub fn begin(&mut self, snapshot: &mut GraphSnapshot, sim: &mut Simulation, key: &str) {
        let Some(node) = snapshot.node_mut(key) else {
            // the node vanished in a rebuild; ignore the gesture
            return;
        };

        node.pinned = Some(node.pos);
        self.active = Some(key.to_owned());
        sim.reheat(DRAG_ALPHA, DRAG_ALPHA);
    }

    /// Moves the active pin to the pointer's position in simulation space and
    /// re-arms the settle cooldown.
    pub fn drag_to(
        &mut self,
        snapshot: &mut GraphSnapshot,
        sim: &mut Simulation,
        world_pos: Vec2,
        now: f64,
    ) {
        let Some(key) = self.active.as_deref() else {
            return;
        };
        let Some(node) = snapshot.node_mut(key) else {
            return;
        };

        node.pinned = Some(world_pos);
        sim.reheat(DRAG_ALPHA, DRAG_ALPHA);
        self.settle_deadline = Some(now + DRAG_SETTLE_SECS);
    }

    /// Pointer released: the node stays pinned where it was dropped; only the
    /// cooldown (or a double-click) lets the simulation settle.
    pub fn end(&mut self) {
        self.active = None;
    }

    /// Pinned → Free on double-click. A no-op on a node that is already free,
    /// and silently ignored for nodes missing from the snapshot.
    pub fn release(&mut self, snapshot: &mut GraphSnapshot, sim: &mut Simulation, key: &str) {
        if self.active.as_deref() == Some(key) {
            self.active = None;
        }

        let Some(node) = snapshot.node_mut(key) else {
            return;
        };

        if node.pinned.take().is_some() {
            debug!(key, "released pinned flavor");
        }
        sim.settle();
    }

    /// Called every frame: once the deadline passes with no further drag-move,
    /// the field is allowed to cool while the node stays pinned.
    pub fn poll_settle(&mut self, sim: &mut Simulation, now: f64) {
        if let Some(deadline) = self.settle_deadline
            && now >= deadline
        {
            self.settle_deadline = None;
            sim.settle();
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// Dropped on every rebuild: the new snapshot starts with no active
    /// gesture and no pending cooldown.
    pub fn invalidate(&mut self) {
        self.active = None;
        self.settle_deadline = None;
    }
}
