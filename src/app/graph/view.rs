use eframe::egui::{Color32, FontId, Painter, Pos2, Rect, Sense, StrokeKind, Ui, Vec2};

use super::super::ViewModel;
use super::super::render_utils::{
    draw_background, paint_link, paint_node, project_link, project_node,
};

const TOOLTIP_PADDING: f32 = 4.0;

impl ViewModel {
    fn sync_surface(&mut self, size: Vec2) {
        if !self.mounted {
            self.simulation.mount(size);
            self.mounted = true;
            return;
        }

        if self.simulation.viewport() != size {
            self.controller.resize(&mut self.simulation, size);
        }
    }

    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);
        let now = ui.input(|input| input.time);

        draw_background(&painter, rect);
        self.sync_surface(rect.size());

        self.handle_graph_zoom(ui, rect, &response);
        self.handle_graph_drag(ui, rect, &response);
        self.handle_graph_hover(rect, &response, now);

        let hot = self.simulation.tick();
        self.paint_graph(&painter, rect, now);

        if let Some((anchor, text)) = self.controller.link_tooltip(&self.network) {
            paint_tooltip(&painter, anchor, text);
        }

        self.legend.show(ui, rect.min, &self.palette, now);

        if hot
            || response.dragged()
            || self.controller.is_animating(now)
            || self.legend.is_animating(now)
        {
            ui.ctx().request_repaint();
        }
    }

    fn paint_graph(&self, painter: &Painter, rect: Rect, now: f64) {
        let transform = self.controller.transform();
        let hovered_link = self.controller.hovered_link();

        for (index, link) in self.network.links.iter().enumerate() {
            let (Some(source), Some(target)) = (
                self.simulation.position(link.source),
                self.simulation.position(link.target),
            ) else {
                continue;
            };

            let glyph = project_link(
                rect,
                transform,
                source,
                target,
                link.weight(),
                self.controller.link_opacity(index, now),
                hovered_link == Some(index),
            );
            paint_link(painter, &glyph);
        }

        for (index, author) in self.network.authors.iter().enumerate() {
            let Some(position) = self.simulation.position(index) else {
                continue;
            };

            let (opacity, stroke_opacity) = self.controller.node_opacity(index, now);
            let glyph = project_node(
                rect,
                transform,
                position,
                author,
                &self.palette,
                opacity,
                stroke_opacity,
            );
            paint_node(painter, &glyph);
        }
    }
}

fn paint_tooltip(painter: &Painter, anchor: Pos2, text: String) {
    let galley = painter.layout_no_wrap(text, FontId::proportional(12.0), Color32::from_gray(30));
    let background = Rect::from_min_size(anchor, galley.size()).expand(TOOLTIP_PADDING);
    painter.rect_filled(background, 3.0, Color32::from_white_alpha(235));
    painter.rect_stroke(
        background,
        3.0,
        (1.0, Color32::from_gray(180)),
        StrokeKind::Inside,
    );
    painter.galley(anchor, galley, Color32::from_gray(30));
}
