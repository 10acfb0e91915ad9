use eframe::egui::{self, Rect, Ui};

use super::super::ViewModel;
use super::super::render_utils::{screen_to_world, world_to_screen};
use super::GraphSnapshot;
use super::view::NODE_RADIUS;

pub(in crate::app) const MIN_ZOOM: f32 = 0.1;
pub(in crate::app) const MAX_ZOOM: f32 = 10.0;

impl ViewModel {
    /// Scroll zooms around the pointer; the transform only changes the view,
    /// never the simulated positions.
    pub(in crate::app) fn handle_graph_zoom(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
    ) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let world_before = screen_to_world(rect, self.pan, self.zoom, pointer);

        let zoom_factor = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
        self.zoom = (self.zoom * zoom_factor).clamp(MIN_ZOOM, MAX_ZOOM);
        self.pan = pointer - rect.center() - (world_before * self.zoom);
    }

    /// Background drags pan; a primary drag that started on a node belongs to
    /// the drag controller instead.
    pub(in crate::app) fn handle_graph_pan(&mut self, response: &egui::Response) {
        let background_drag =
            response.dragged_by(egui::PointerButton::Primary) && !self.drag.is_dragging();
        if background_drag
            || response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            self.pan += response.drag_delta();
        }
    }

    pub(in crate::app) fn hovered_node(
        ui: &Ui,
        rect: Rect,
        pan: eframe::egui::Vec2,
        zoom: f32,
        snapshot: &GraphSnapshot,
    ) -> Option<usize> {
        let pointer = ui.input(|input| input.pointer.hover_pos())?;
        if !rect.contains(pointer) {
            return None;
        }

        let hit_radius = (NODE_RADIUS * zoom).max(8.0);
        snapshot
            .nodes
            .iter()
            .enumerate()
            .filter_map(|(index, node)| {
                let distance = world_to_screen(rect, pan, zoom, node.pos).distance(pointer);
                (distance <= hit_radius).then_some((index, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    }
}
