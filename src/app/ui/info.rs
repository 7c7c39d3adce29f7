use std::sync::mpsc::Receiver;

use eframe::egui::{self, RichText, Ui};

use crate::dataset::Author;
use crate::util::or_dash;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(in crate::app) struct AuthorCard {
    pub(in crate::app) name: String,
    pub(in crate::app) field: Option<String>,
    pub(in crate::app) degree: Option<u32>,
}

impl AuthorCard {
    pub(in crate::app) fn from_author(author: &Author) -> Self {
        Self {
            name: author.id.clone(),
            field: author.field.clone(),
            degree: author.degree,
        }
    }
}

pub(in crate::app) struct InfoPanel {
    rx: Receiver<Option<AuthorCard>>,
    current: Option<AuthorCard>,
}

impl InfoPanel {
    pub(in crate::app) fn new(rx: Receiver<Option<AuthorCard>>) -> Self {
        Self { rx, current: None }
    }

    pub(in crate::app) fn drain(&mut self) {
        for card in self.rx.try_iter() {
            self.current = card;
        }
    }

    #[cfg(test)]
    pub(in crate::app) fn current(&self) -> Option<&AuthorCard> {
        self.current.as_ref()
    }

    fn rows(&self) -> [(&'static str, String); 3] {
        let card = self.current.as_ref();
        let degree = card
            .and_then(|card| card.degree)
            .filter(|degree| *degree > 0)
            .map(|degree| degree.to_string());

        [
            ("Nome", or_dash(card.map(|card| card.name.as_str())).to_owned()),
            (
                "Área de atuação",
                or_dash(card.and_then(|card| card.field.as_deref())).to_owned(),
            ),
            ("Grau de colaboração", or_dash(degree.as_deref()).to_owned()),
        ]
    }

    pub(in crate::app) fn show(&self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            for (name, value) in self.rows() {
                ui.vertical(|ui| {
                    ui.label(RichText::new(name).small().weak());
                    ui.label(RichText::new(value).strong());
                });
                ui.add_space(48.0);
            }
        });
    }
}

pub(in crate::app) fn show_about(ctx: &egui::Context, open: &mut bool) {
    egui::Window::new("sobre")
        .open(open)
        .collapsible(false)
        .resizable(false)
        .default_width(360.0)
        .show(ctx, |ui| {
            ui.label(
                RichText::new("Lista parcial de docentes que atuaram no PESC nos últimos 50 anos.")
                    .strong(),
            );
            ui.add_space(6.0);
            ui.label("Dados coletados diretamente do CV Lattes de cada docente.");
            ui.add_space(6.0);
            ui.label(
                "Arestas representam colaboração acadêmica entre docentes (artigo científico, \
                 capítulo de livro, e orientação de mestrado ou doutorado).",
            );
            ui.add_space(6.0);
            ui.label("Programação visual: Rafael Damasceno.");
            ui.label("Coleta e processamento dos dados: Pedro Cavaliere e Rodrigo Palmeira.");
            ui.label("Coordenação: Daniel Ratton.");
        });
}
