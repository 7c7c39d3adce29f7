use eframe::egui::{Pos2, Rect, Vec2};
use log::debug;

use crate::dataset::{Author, CollaborationNetwork, ConnectivityIndex};

use super::physics::Simulation;
use super::render_utils::{
    ViewTransform, distance_to_segment, link_width, node_radius, world_to_screen,
};
use super::transition::Fade;

pub(super) const HOVER_FADE_SECS: f64 = 0.2;
pub(super) const DIMMED_NODE_OPACITY: f32 = 0.3;
pub(super) const DIMMED_LINK_OPACITY: f32 = 0.2;
pub(super) const MIN_SCALE: f32 = 0.25;
pub(super) const MAX_SCALE: f32 = 2.0;
const LINK_HIT_SLOP: f32 = 3.0;

pub(super) type HoverListener = Box<dyn FnMut(Option<&Author>)>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct SubscriptionId(u64);

#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct LinkHover {
    pub(super) link: usize,
    pub(super) pointer: Pos2,
}

pub(super) struct InteractionController {
    connectivity: ConnectivityIndex,
    transform: ViewTransform,
    hovered: Option<usize>,
    hovered_link: Option<LinkHover>,
    dragging: Option<usize>,
    node_opacity: Vec<Fade>,
    node_stroke_opacity: Vec<Fade>,
    link_opacity: Vec<Fade>,
    listeners: Vec<(SubscriptionId, HoverListener)>,
    next_subscription: u64,
}

impl InteractionController {
    pub(super) fn new(connectivity: ConnectivityIndex, network: &CollaborationNetwork) -> Self {
        Self {
            connectivity,
            transform: ViewTransform::IDENTITY,
            hovered: None,
            hovered_link: None,
            dragging: None,
            node_opacity: vec![Fade::settled(1.0); network.authors.len()],
            node_stroke_opacity: vec![Fade::settled(1.0); network.authors.len()],
            link_opacity: vec![Fade::settled(1.0); network.links.len()],
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub(super) fn subscribe_hover(&mut self, listener: HoverListener) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, listener));
        id
    }

    pub(super) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(subscription, _)| *subscription != id);
        self.listeners.len() != before
    }

    pub(super) fn teardown(&mut self, simulation: &mut Simulation) {
        if let Some(index) = self.dragging.take() {
            simulation.unpin(index);
        }
        self.listeners.clear();
        self.hovered = None;
        self.hovered_link = None;
        simulation.stop();
        debug!("interaction controller torn down");
    }

    fn emit_hover(&mut self, author: Option<&Author>) {
        for (_, listener) in &mut self.listeners {
            listener(author);
        }
    }

    pub(super) fn is_connected(&self, a: usize, b: usize) -> bool {
        self.connectivity.is_connected(a, b)
    }

    pub(super) fn hover_node(&mut self, network: &CollaborationNetwork, index: usize, now: f64) {
        if self.hovered == Some(index) || index >= network.authors.len() {
            return;
        }
        self.hovered = Some(index);

        for other in 0..self.node_opacity.len() {
            let target = if self.is_connected(index, other) {
                1.0
            } else {
                DIMMED_NODE_OPACITY
            };
            self.node_opacity[other].retarget(target, now, 0.0, HOVER_FADE_SECS);
            self.node_stroke_opacity[other].retarget(target, now, 0.0, HOVER_FADE_SECS);
        }

        for (link, fade) in network.links.iter().zip(self.link_opacity.iter_mut()) {
            let target = if link.touches(index) {
                1.0
            } else {
                DIMMED_LINK_OPACITY
            };
            fade.retarget(target, now, 0.0, HOVER_FADE_SECS);
        }

        self.emit_hover(network.author(index));
    }

    pub(super) fn leave_node(&mut self, now: f64) {
        if self.hovered.take().is_none() {
            return;
        }

        for fade in self
            .node_opacity
            .iter_mut()
            .chain(self.node_stroke_opacity.iter_mut())
            .chain(self.link_opacity.iter_mut())
        {
            fade.retarget(1.0, now, 0.0, HOVER_FADE_SECS);
        }

        self.emit_hover(None);
    }

    pub(super) fn hover_link(&mut self, link: usize, pointer: Pos2) {
        self.hovered_link = Some(LinkHover { link, pointer });
    }

    pub(super) fn leave_link(&mut self) {
        self.hovered_link = None;
    }

    pub(super) fn link_tooltip(&self, network: &CollaborationNetwork) -> Option<(Pos2, String)> {
        let hover = self.hovered_link?;
        let link = network.links.get(hover.link)?;
        Some((
            hover.pointer + Vec2::new(12.0, -12.0),
            format!("Colaborações: {}", link.weight()),
        ))
    }

    pub(super) fn drag_start(&mut self, simulation: &mut Simulation, index: usize) {
        let Some(position) = simulation.position(index) else {
            return;
        };
        self.dragging = Some(index);
        simulation.pin(index, position);
        simulation.hold_warm();
    }

    pub(super) fn drag_move(&mut self, simulation: &mut Simulation, world: Vec2) {
        if let Some(index) = self.dragging {
            simulation.pin(index, world);
        }
    }

    pub(super) fn drag_end(&mut self, simulation: &mut Simulation) {
        if let Some(index) = self.dragging.take() {
            simulation.unpin(index);
            simulation.release_warm();
        }
    }

    pub(super) fn zoom_at(&mut self, factor: f32, anchor: Vec2, viewport: Vec2) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }

        let scale = (self.transform.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
        let world = (anchor - self.transform.translate) / self.transform.scale;
        self.transform = ViewTransform {
            translate: anchor - world * scale,
            scale,
        };
        self.constrain(viewport);
    }

    pub(super) fn pan_by(&mut self, delta: Vec2, viewport: Vec2) {
        self.transform.translate += delta;
        self.constrain(viewport);
    }

    fn constrain(&mut self, viewport: Vec2) {
        let scale = self.transform.scale;
        let translate = self.transform.translate;
        self.transform.translate = Vec2::new(
            constrain_axis(translate.x, scale, viewport.x),
            constrain_axis(translate.y, scale, viewport.y),
        );
    }

    pub(super) fn resize(&mut self, simulation: &mut Simulation, viewport: Vec2) {
        simulation.set_viewport(viewport);
        simulation.kick();
        self.constrain(viewport);
    }

    pub(super) fn node_at(
        &self,
        simulation: &Simulation,
        network: &CollaborationNetwork,
        rect: Rect,
        pointer: Pos2,
    ) -> Option<usize> {
        (0..network.authors.len()).rev().find(|&index| {
            simulation.position(index).is_some_and(|position| {
                let center = world_to_screen(rect, self.transform, position);
                let radius = node_radius(network.authors[index].degree) * self.transform.scale;
                center.distance(pointer) <= radius
            })
        })
    }

    pub(super) fn link_at(
        &self,
        simulation: &Simulation,
        network: &CollaborationNetwork,
        rect: Rect,
        pointer: Pos2,
    ) -> Option<usize> {
        network
            .links
            .iter()
            .enumerate()
            .filter_map(|(index, link)| {
                let source = simulation.position(link.source)?;
                let target = simulation.position(link.target)?;
                let distance = distance_to_segment(
                    pointer,
                    world_to_screen(rect, self.transform, source),
                    world_to_screen(rect, self.transform, target),
                );
                let reach = (link_width(link.weight()) * self.transform.scale * 0.5).max(LINK_HIT_SLOP);
                (distance <= reach).then_some((index, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    }

    pub(super) fn transform(&self) -> ViewTransform {
        self.transform
    }

    #[cfg(test)]
    pub(super) fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub(super) fn hovered_link(&self) -> Option<usize> {
        self.hovered_link.map(|hover| hover.link)
    }

    pub(super) fn dragging(&self) -> Option<usize> {
        self.dragging
    }

    pub(super) fn node_opacity(&self, index: usize, now: f64) -> (f32, f32) {
        let fill = self.node_opacity.get(index).map_or(1.0, |fade| fade.value_at(now));
        let stroke = self
            .node_stroke_opacity
            .get(index)
            .map_or(1.0, |fade| fade.value_at(now));
        (fill, stroke)
    }

    pub(super) fn link_opacity(&self, index: usize, now: f64) -> f32 {
        self.link_opacity.get(index).map_or(1.0, |fade| fade.value_at(now))
    }

    pub(super) fn is_animating(&self, now: f64) -> bool {
        self.node_opacity
            .iter()
            .chain(&self.node_stroke_opacity)
            .chain(&self.link_opacity)
            .any(|fade| fade.is_animating(now))
    }
}

fn constrain_axis(translate: f32, scale: f32, extent: f32) -> f32 {
    let low = -translate / scale;
    let high = (extent - translate) / scale - extent;
    let shift = if high > low {
        (low + high) * 0.5
    } else if low < 0.0 {
        low
    } else {
        high.max(0.0)
    };
    translate + shift * scale
}
