use eframe::egui::{self, Align2, Color32, FontId, Sense, Stroke, Ui};

use super::super::ViewModel;
use super::super::render_utils::{
    circle_visible, draw_background, edge_visible, screen_to_world, world_to_screen,
};

pub(in crate::app) const NODE_RADIUS: f32 = 15.0;

const NODE_FILL: Color32 = Color32::from_rgb(102, 153, 204);
const PINNED_FILL: Color32 = Color32::from_rgb(204, 153, 102);
const LINK_COLOR: Color32 = Color32::from_rgba_premultiplied(120, 120, 120, 150);

impl ViewModel {
    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        draw_background(&painter, rect, self.pan, self.zoom);
        // read each frame; only consulted when the next rebuild derives forces
        self.viewport = rect.size();

        self.handle_graph_zoom(ui, rect, &response);
        self.handle_graph_pan(&response);

        let pan = self.pan;
        let zoom = self.zoom;
        let now = ui.input(|input| input.time);

        let Some(snapshot) = self.snapshot.as_mut() else {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "Search for a flavor to chart its pairings",
                FontId::proportional(14.0),
                Color32::from_gray(140),
            );
            return;
        };

        let hovered = Self::hovered_node(ui, rect, pan, zoom, snapshot);

        if response.drag_started_by(egui::PointerButton::Primary)
            && let Some(index) = hovered
        {
            let key = snapshot.nodes[index].key.clone();
            if let Some(sim) = self.sim.as_mut() {
                self.drag.begin(snapshot, sim, &key);
            }
        }

        if response.dragged_by(egui::PointerButton::Primary)
            && self.drag.is_dragging()
            && let Some(pointer) = response.interact_pointer_pos()
        {
            let world = screen_to_world(rect, pan, zoom, pointer);
            if let Some(sim) = self.sim.as_mut() {
                self.drag.drag_to(snapshot, sim, world, now);
            }
        }

        if response.drag_stopped_by(egui::PointerButton::Primary) {
            self.drag.end();
        }

        if response.double_clicked()
            && let Some(index) = hovered
        {
            let key = snapshot.nodes[index].key.clone();
            if let Some(sim) = self.sim.as_mut() {
                self.drag.release(snapshot, sim, &key);
            }
        }

        let mut moving = false;
        if let Some(sim) = self.sim.as_mut() {
            self.drag.poll_settle(sim, now);
            moving = sim.step(&mut snapshot.nodes, &snapshot.resolved);
        }
        if moving || response.dragged() {
            ui.ctx().request_repaint();
        }

        // endpoints are resolved by identity into the live node vec, so both
        // ends of a line always reflect this tick's positions
        for (link, resolved) in snapshot.links.iter().zip(&snapshot.resolved) {
            let start = world_to_screen(rect, pan, zoom, snapshot.nodes[resolved.source].pos);
            let end = world_to_screen(rect, pan, zoom, snapshot.nodes[resolved.target].pos);
            if !edge_visible(rect, start, end, 4.0) {
                continue;
            }

            let width = (link.weight.sqrt() * zoom.sqrt()).clamp(0.5, 6.0);
            painter.line_segment([start, end], Stroke::new(width, LINK_COLOR));
        }

        for (index, node) in snapshot.nodes.iter().enumerate() {
            let position = world_to_screen(rect, pan, zoom, node.pos);
            let radius = NODE_RADIUS * zoom;
            if !circle_visible(rect, position, radius + 2.0) {
                continue;
            }

            let is_hovered = hovered == Some(index);
            let fill = if node.is_pinned() { PINNED_FILL } else { NODE_FILL };

            painter.circle_filled(position, radius, fill);
            painter.circle_stroke(
                position,
                radius,
                Stroke::new(if is_hovered { 2.5 } else { 1.5 }, Color32::WHITE),
            );

            let font_size = if is_hovered { 14.0 } else { 12.0 };
            painter.text(
                position,
                Align2::CENTER_CENTER,
                &node.key,
                FontId::proportional(font_size),
                Color32::from_gray(240),
            );
        }

        if hovered.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }
    }
}
