use eframe::egui::{self, Align2, Color32, FontId, Pos2, Sense, Ui, vec2};
use log::debug;

use crate::palette::Palette;

use super::transition::Fade;

const ROW_STAGGER_SECS: f64 = 0.1;
const ROW_FADE_SECS: f64 = 0.5;
const SWATCH_SIZE: f32 = 20.0;
const ROW_PITCH: f32 = 25.0;
const LEGEND_OFFSET: f32 = 15.0;
const HEADER_TEXT: &str = "Áreas de atuação";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum LegendIcon {
    Expand,
    Collapse,
}

impl LegendIcon {
    fn glyph(self) -> &'static str {
        match self {
            Self::Expand => "⏷",
            Self::Collapse => "⏶",
        }
    }
}

pub(super) struct Legend {
    open: bool,
    rows: Vec<Fade>,
}

impl Legend {
    pub(super) fn new(row_count: usize) -> Self {
        Self {
            open: true,
            rows: vec![Fade::settled(1.0); row_count],
        }
    }

    pub(super) fn toggle(&mut self, now: f64) {
        self.open = !self.open;
        let row_count = self.rows.len();
        let target = if self.open { 1.0 } else { 0.0 };

        for (index, fade) in self.rows.iter_mut().enumerate() {
            let rank = if self.open {
                index
            } else {
                row_count - 1 - index
            };
            fade.retarget(target, now, rank as f64 * ROW_STAGGER_SECS, ROW_FADE_SECS);
        }

        debug!("legend {}", if self.open { "opened" } else { "closed" });
    }

    #[cfg(test)]
    pub(super) fn is_open(&self) -> bool {
        self.open
    }

    pub(super) fn icon(&self) -> LegendIcon {
        if self.open {
            LegendIcon::Collapse
        } else {
            LegendIcon::Expand
        }
    }

    pub(super) fn row_opacity(&self, index: usize, now: f64) -> f32 {
        self.rows.get(index).map_or(0.0, |fade| fade.value_at(now))
    }

    pub(super) fn is_animating(&self, now: f64) -> bool {
        self.rows.iter().any(|fade| fade.is_animating(now))
    }

    pub(super) fn show(&mut self, ui: &Ui, origin: Pos2, palette: &Palette, now: f64) {
        let mut toggled = false;

        egui::Area::new(egui::Id::new("research_area_legend"))
            .fixed_pos(origin + vec2(LEGEND_OFFSET, LEGEND_OFFSET))
            .order(egui::Order::Foreground)
            .show(ui.ctx(), |ui| {
                ui.horizontal(|ui| {
                    let icon = ui.add(
                        egui::Label::new(egui::RichText::new(self.icon().glyph()).strong())
                            .sense(Sense::click()),
                    );
                    let header = ui.add(
                        egui::Label::new(egui::RichText::new(HEADER_TEXT).strong())
                            .sense(Sense::click()),
                    );
                    toggled = icon.clicked() || header.clicked();
                });

                for (index, (label, color)) in palette.entries().iter().enumerate() {
                    let opacity = self.row_opacity(index, now);
                    let (rect, _) = ui.allocate_exact_size(vec2(260.0, ROW_PITCH), Sense::hover());
                    if opacity <= 0.0 {
                        continue;
                    }

                    let painter = ui.painter();
                    let swatch = egui::Rect::from_min_size(rect.min, vec2(SWATCH_SIZE, SWATCH_SIZE));
                    painter.rect_filled(swatch, 0.0, color.gamma_multiply(opacity));
                    painter.text(
                        rect.min + vec2(SWATCH_SIZE + 5.0, SWATCH_SIZE * 0.5),
                        Align2::LEFT_CENTER,
                        label,
                        FontId::proportional(13.0),
                        Color32::from_gray(40).gamma_multiply(opacity),
                    );
                }
            });

        if toggled {
            self.toggle(now);
        }
    }
}
