use eframe::egui::{self, Align, Context, Layout};

use super::super::ViewModel;
use super::info::show_about;

impl ViewModel {
    pub(in crate::app) fn show(&mut self, ctx: &Context) {
        self.info.drain();

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Rede de colaboração");
                    ui.separator();
                    ui.label(format!("docentes: {}", self.network.authors.len()));
                    ui.label(format!("colaborações: {}", self.network.links.len()));
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui.selectable_label(self.show_about, "ⓘ sobre").clicked() {
                            self.show_about = !self.show_about;
                        }
                    });
                });
            });

        egui::TopBottomPanel::bottom("author_info")
            .resizable(false)
            .show(ctx, |ui| {
                ui.add_space(4.0);
                self.info.show(ui);
                ui.add_space(4.0);
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.draw_graph(ui));

        show_about(ctx, &mut self.show_about);
    }
}
