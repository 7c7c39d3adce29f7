use eframe::egui::{self, Rect, Ui};

use super::super::ViewModel;
use super::super::render_utils::screen_to_world;

impl ViewModel {
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
        let zoom_factor = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
        self.controller
            .zoom_at(zoom_factor, pointer - rect.min, rect.size());
    }

    pub(in crate::app) fn handle_graph_drag(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
    ) {
        if response.drag_started_by(egui::PointerButton::Primary) {
            let origin = ui.input(|input| input.pointer.press_origin());
            if let Some(pointer) = origin
                && let Some(index) =
                    self.controller
                        .node_at(&self.simulation, &self.network, rect, pointer)
            {
                self.controller.drag_start(&mut self.simulation, index);
            }
        }

        if response.dragged() {
            if self.controller.dragging().is_some() {
                if let Some(pointer) = response.interact_pointer_pos() {
                    let world = screen_to_world(rect, self.controller.transform(), pointer);
                    self.controller.drag_move(&mut self.simulation, world);
                }
            } else {
                self.controller.pan_by(response.drag_delta(), rect.size());
            }
        }

        if response.drag_stopped() {
            self.controller.drag_end(&mut self.simulation);
        }
    }

    pub(in crate::app) fn handle_graph_hover(
        &mut self,
        rect: Rect,
        response: &egui::Response,
        now: f64,
    ) {
        let pointer = response.hover_pos();
        let node = pointer.and_then(|pointer| {
            self.controller
                .node_at(&self.simulation, &self.network, rect, pointer)
        });

        match node {
            Some(index) => self.controller.hover_node(&self.network, index, now),
            None => self.controller.leave_node(now),
        }

        let link = pointer.filter(|_| node.is_none()).and_then(|pointer| {
            self.controller
                .link_at(&self.simulation, &self.network, rect, pointer)
                .map(|link| (link, pointer))
        });

        match link {
            Some((link, pointer)) => self.controller.hover_link(link, pointer),
            None => self.controller.leave_link(),
        }
    }
}
