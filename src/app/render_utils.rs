use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2};

use crate::dataset::Author;
use crate::palette::Palette;

pub(super) const BASE_NODE_RADIUS: f32 = 8.0;
pub(super) const BASE_LINK_WIDTH: f32 = 1.5;
const NODE_OUTLINE: Color32 = Color32::WHITE;
const LINK_COLOR: Color32 = Color32::from_rgb(0x99, 0x99, 0x99);
const LINK_HOVER_COLOR: Color32 = Color32::from_rgb(0xf2, 0x8e, 0x2b);
const LINK_BASE_OPACITY: f32 = 0.6;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct ViewTransform {
    pub(super) translate: Vec2,
    pub(super) scale: f32,
}

impl ViewTransform {
    pub(super) const IDENTITY: Self = Self {
        translate: Vec2::ZERO,
        scale: 1.0,
    };
}

pub(super) struct NodeGlyph {
    pub(super) center: Pos2,
    pub(super) radius: f32,
    pub(super) fill: Color32,
    pub(super) stroke: Stroke,
}

pub(super) struct LinkGlyph {
    pub(super) from: Pos2,
    pub(super) to: Pos2,
    pub(super) stroke: Stroke,
}

pub(super) fn draw_background(painter: &Painter, rect: Rect) {
    painter.rect_filled(rect, 0.0, Color32::WHITE);
}

pub(super) fn world_to_screen(rect: Rect, transform: ViewTransform, world: Vec2) -> Pos2 {
    rect.min + transform.translate + world * transform.scale
}

pub(super) fn screen_to_world(rect: Rect, transform: ViewTransform, screen: Pos2) -> Vec2 {
    (screen - rect.min - transform.translate) / transform.scale
}

pub(super) fn node_radius(degree: Option<u32>) -> f32 {
    match degree {
        Some(degree) if degree > 0 => BASE_NODE_RADIUS + (degree as f32).sqrt(),
        _ => BASE_NODE_RADIUS,
    }
}

pub(super) fn link_width(weight: usize) -> f32 {
    BASE_LINK_WIDTH + (weight.max(1) as f32).ln()
}

pub(super) fn project_node(
    rect: Rect,
    transform: ViewTransform,
    position: Vec2,
    author: &Author,
    palette: &Palette,
    opacity: f32,
    stroke_opacity: f32,
) -> NodeGlyph {
    let opacity = opacity.clamp(0.0, 1.0);
    let fill = palette.color_for(author.field.as_deref());

    NodeGlyph {
        center: world_to_screen(rect, transform, position),
        radius: node_radius(author.degree) * transform.scale,
        fill: fill.gamma_multiply(opacity),
        stroke: Stroke::new(
            BASE_LINK_WIDTH * transform.scale,
            NODE_OUTLINE.gamma_multiply(opacity * stroke_opacity.clamp(0.0, 1.0)),
        ),
    }
}

pub(super) fn project_link(
    rect: Rect,
    transform: ViewTransform,
    source: Vec2,
    target: Vec2,
    weight: usize,
    opacity: f32,
    hovered: bool,
) -> LinkGlyph {
    let color = if hovered { LINK_HOVER_COLOR } else { LINK_COLOR };

    LinkGlyph {
        from: world_to_screen(rect, transform, source),
        to: world_to_screen(rect, transform, target),
        stroke: Stroke::new(
            link_width(weight) * transform.scale,
            color.gamma_multiply(LINK_BASE_OPACITY * opacity.clamp(0.0, 1.0)),
        ),
    }
}

pub(super) fn paint_link(painter: &Painter, glyph: &LinkGlyph) {
    painter.line_segment([glyph.from, glyph.to], glyph.stroke);
}

pub(super) fn paint_node(painter: &Painter, glyph: &NodeGlyph) {
    painter.circle(glyph.center, glyph.radius, glyph.fill, glyph.stroke);
}

pub(super) fn distance_to_segment(point: Pos2, start: Pos2, end: Pos2) -> f32 {
    let segment = end - start;
    let length_sq = segment.length_sq();
    if length_sq <= f32::EPSILON {
        return point.distance(start);
    }

    let t = ((point - start).dot(segment) / length_sq).clamp(0.0, 1.0);
    point.distance(start + segment * t)
}

#[cfg(test)]
mod tests {
    use eframe::egui::{pos2, vec2};

    use super::*;

    fn author(degree: Option<u32>, field: Option<&str>) -> Author {
        Author {
            id: "A".to_owned(),
            field: field.map(str::to_owned),
            degree,
        }
    }

    #[test]
    fn radius_and_width_grow_monotonically() {
        assert_eq!(node_radius(None), BASE_NODE_RADIUS);
        assert_eq!(node_radius(Some(4)), BASE_NODE_RADIUS + 2.0);
        assert!(node_radius(Some(50)) > node_radius(Some(49)));

        assert_eq!(link_width(1), BASE_LINK_WIDTH);
        let mut previous = link_width(1);
        for weight in 2..40 {
            let width = link_width(weight);
            assert!(width > previous);
            previous = width;
        }
    }

    #[test]
    fn screen_mapping_round_trips() {
        let rect = Rect::from_min_size(pos2(20.0, 40.0), vec2(800.0, 600.0));
        let transform = ViewTransform {
            translate: vec2(-120.0, 35.0),
            scale: 1.7,
        };
        let world = vec2(311.0, 95.5);
        let back = screen_to_world(rect, transform, world_to_screen(rect, transform, world));
        assert!((back - world).length() < 1.0e-3);
    }

    #[test]
    fn node_and_link_layers_stay_coincident() {
        let rect = Rect::from_min_size(pos2(0.0, 0.0), vec2(800.0, 600.0));
        let palette = Palette::research_areas();
        let source = vec2(120.0, 300.0);
        let target = vec2(500.0, 180.0);

        for (scale, translate) in [
            (0.25, vec2(300.0, 225.0)),
            (1.0, Vec2::ZERO),
            (2.0, vec2(-400.0, -150.0)),
            (1.37, vec2(-33.3, 12.9)),
        ] {
            let transform = ViewTransform { translate, scale };
            let first = project_node(rect, transform, source, &author(Some(3), None), &palette, 1.0, 1.0);
            let second = project_node(rect, transform, target, &author(None, None), &palette, 1.0, 1.0);
            let link = project_link(rect, transform, source, target, 2, 1.0, false);

            assert_eq!(link.from, first.center);
            assert_eq!(link.to, second.center);
        }
    }

    #[test]
    fn missing_field_renders_with_fallback_color() {
        let rect = Rect::from_min_size(Pos2::ZERO, vec2(100.0, 100.0));
        let palette = Palette::research_areas();
        let glyph = project_node(
            rect,
            ViewTransform::IDENTITY,
            vec2(50.0, 50.0),
            &author(None, None),
            &palette,
            1.0,
            1.0,
        );
        assert_eq!(glyph.fill, crate::palette::FALLBACK_COLOR);
        assert_eq!(glyph.radius, BASE_NODE_RADIUS);
    }

    #[test]
    fn segment_distance_clamps_to_endpoints() {
        let start = pos2(0.0, 0.0);
        let end = pos2(10.0, 0.0);
        assert_eq!(distance_to_segment(pos2(5.0, 3.0), start, end), 3.0);
        assert_eq!(distance_to_segment(pos2(-4.0, 3.0), start, end), 5.0);
        assert_eq!(distance_to_segment(pos2(2.0, 2.0), start, start), 8.0_f32.sqrt());
    }
}
