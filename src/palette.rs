use eframe::egui::Color32;

pub const FALLBACK_COLOR: Color32 = Color32::from_rgb(160, 160, 160);

const CATEGORY10: [Color32; 10] = [
    Color32::from_rgb(0x1f, 0x77, 0xb4),
    Color32::from_rgb(0xff, 0x7f, 0x0e),
    Color32::from_rgb(0x2c, 0xa0, 0x2c),
    Color32::from_rgb(0xd6, 0x27, 0x28),
    Color32::from_rgb(0x94, 0x67, 0xbd),
    Color32::from_rgb(0x8c, 0x56, 0x4b),
    Color32::from_rgb(0xe3, 0x77, 0xc2),
    Color32::from_rgb(0x7f, 0x7f, 0x7f),
    Color32::from_rgb(0xbc, 0xbd, 0x22),
    Color32::from_rgb(0x17, 0xbe, 0xcf),
];

const RESEARCH_AREAS: [&str; 9] = [
    "Redes de Computadores",
    "Otimização",
    "Engenharia de Dados e Conhecimento",
    "Engenharia de Software",
    "Computação Gráfica",
    "Inteligência Artificial",
    "Algoritmos e Combinatória",
    "Arquitetura e Sistemas Operacionais",
    "Informática e Sociedade",
];

#[derive(Clone, Debug)]
pub struct Palette {
    entries: Vec<(String, Color32)>,
}

impl Palette {
    pub fn research_areas() -> Self {
        Self::from_labels(RESEARCH_AREAS)
    }

    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries = labels
            .into_iter()
            .enumerate()
            .map(|(index, label)| (label.into(), CATEGORY10[index % CATEGORY10.len()]))
            .collect();
        Self { entries }
    }

    pub fn color_for(&self, field: Option<&str>) -> Color32 {
        field
            .and_then(|field| {
                self.entries
                    .iter()
                    .find(|(label, _)| label == field)
                    .map(|(_, color)| *color)
            })
            .unwrap_or(FALLBACK_COLOR)
    }

    pub fn entries(&self) -> &[(String, Color32)] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn research_areas_follow_category10_order() {
        let palette = Palette::research_areas();
        assert_eq!(palette.entries().len(), 9);
        assert_eq!(
            palette.color_for(Some("Redes de Computadores")),
            Color32::from_rgb(0x1f, 0x77, 0xb4)
        );
        assert_eq!(
            palette.color_for(Some("Informática e Sociedade")),
            Color32::from_rgb(0xbc, 0xbd, 0x22)
        );
    }

    #[test]
    fn unknown_or_missing_fields_use_fallback() {
        let palette = Palette::research_areas();
        assert_eq!(palette.color_for(None), FALLBACK_COLOR);
        assert_eq!(palette.color_for(Some("Astrologia")), FALLBACK_COLOR);
    }
}
