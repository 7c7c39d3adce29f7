mod forces;
mod quadtree;

use eframe::egui::{Vec2, vec2};
use log::debug;

use crate::dataset::CollaborationNetwork;
use crate::util::stable_pair;

use forces::{
    ChargeParams, SpringParams, accumulate_charge_for_body, apply_axial_pull, apply_springs,
    centering_shift,
};
use quadtree::QuadNode;

#[derive(Clone, Copy, Debug)]
pub struct SimulationConfig {
    pub charge_strength: f32,
    pub link_strength: f32,
    pub link_distance: f32,
    pub center_strength: f32,
    pub axial_strength: f32,
    pub boundary_margin: f32,
    pub theta: f32,
    pub distance_min: f32,
    pub alpha_min: f32,
    pub alpha_decay: f32,
    pub velocity_decay: f32,
    pub warm_alpha: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        let alpha_min = 0.001_f32;
        Self {
            charge_strength: -300.0,
            link_strength: 0.25,
            link_distance: 30.0,
            center_strength: 0.1,
            axial_strength: 0.1,
            boundary_margin: 80.0,
            theta: 0.9,
            distance_min: 1.0,
            alpha_min,
            alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
            velocity_decay: 0.4,
            warm_alpha: 0.3,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Body {
    position: Vec2,
    velocity: Vec2,
    pin: Option<Vec2>,
}

#[derive(Default)]
struct PhysicsScratch {
    positions: Vec<Vec2>,
    velocities: Vec<Vec2>,
}

pub(in crate::app) struct Simulation {
    bodies: Vec<Body>,
    links: Vec<(usize, usize)>,
    link_bias: Vec<f32>,
    offsets: Vec<Vec2>,
    config: SimulationConfig,
    viewport: Vec2,
    alpha: f32,
    alpha_target: f32,
    running: bool,
    settled: bool,
    scratch: PhysicsScratch,
}

impl Simulation {
    pub(in crate::app) fn new(network: &CollaborationNetwork, config: SimulationConfig) -> Self {
        let counts = network.link_counts();
        let links = network
            .links
            .iter()
            .map(|link| (link.source, link.target))
            .collect::<Vec<_>>();
        let link_bias = links
            .iter()
            .map(|&(source, target)| {
                let total = (counts[source] + counts[target]).max(1);
                counts[source] as f32 / total as f32
            })
            .collect();
        let offsets = network
            .authors
            .iter()
            .map(|author| {
                let (x, y) = stable_pair(&author.id);
                vec2(x, y) * 1.0e-3
            })
            .collect();

        Self {
            bodies: vec![
                Body {
                    position: Vec2::ZERO,
                    velocity: Vec2::ZERO,
                    pin: None,
                };
                network.authors.len()
            ],
            links,
            link_bias,
            offsets,
            config,
            viewport: Vec2::ZERO,
            alpha: 1.0,
            alpha_target: 0.0,
            running: false,
            settled: false,
            scratch: PhysicsScratch::default(),
        }
    }

    pub(in crate::app) fn mount(&mut self, viewport: Vec2) {
        let golden_angle = std::f32::consts::PI * (3.0 - 5.0_f32.sqrt());
        self.viewport = viewport.max(Vec2::ZERO);
        let center = self.center();

        for (index, body) in self.bodies.iter_mut().enumerate() {
            let radius = 10.0 * (0.5 + index as f32).sqrt();
            let angle = index as f32 * golden_angle;
            body.position = center + vec2(angle.cos(), angle.sin()) * radius;
            body.velocity = Vec2::ZERO;
            body.pin = None;
        }

        self.alpha = 1.0;
        self.alpha_target = 0.0;
        self.running = true;
        self.settled = false;
        debug!(
            "simulation mounted with {} bodies in {:?}",
            self.bodies.len(),
            self.viewport
        );
    }

    // A cold loop keeps stepping at negligible alpha; the return value only says whether the
    // caller needs another frame.
    pub(in crate::app) fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }

        self.step();

        let hot = self.is_hot();
        if !hot && !self.settled {
            self.settled = true;
            debug!("simulation settled at alpha {:.5}", self.alpha);
        }
        hot
    }

    pub(in crate::app) fn is_hot(&self) -> bool {
        self.alpha >= self.config.alpha_min || self.alpha_target >= self.config.alpha_min
    }

    fn step(&mut self) {
        self.alpha += (self.alpha_target - self.alpha) * self.config.alpha_decay;
        let alpha = self.alpha;
        let config = self.config;
        let center = self.center();

        let scratch = &mut self.scratch;
        scratch.positions.clear();
        scratch.velocities.clear();
        for body in &self.bodies {
            scratch.positions.push(body.position);
            scratch.velocities.push(body.velocity);
        }
        let positions = &scratch.positions;
        let velocities = &mut scratch.velocities;

        apply_springs(
            &self.links,
            &self.link_bias,
            positions,
            velocities,
            SpringParams {
                strength: config.link_strength,
                distance: config.link_distance,
                alpha,
                offsets: &self.offsets,
            },
        );

        if let Some(tree) = QuadNode::build(positions) {
            let params = ChargeParams {
                strength: config.charge_strength,
                alpha,
                theta: config.theta,
                distance_min_sq: config.distance_min * config.distance_min,
            };
            for (index, velocity) in velocities.iter_mut().enumerate() {
                accumulate_charge_for_body(&tree, index, positions, &self.offsets, params, velocity);
            }
        }

        apply_axial_pull(positions, velocities, center, config.axial_strength, alpha);

        let shift = centering_shift(positions, center, config.center_strength);
        let keep = 1.0 - config.velocity_decay;
        let viewport = self.viewport;
        for (body, velocity) in self.bodies.iter_mut().zip(velocities.iter()) {
            if let Some(pin) = body.pin {
                body.position = pin;
                body.velocity = Vec2::ZERO;
                continue;
            }

            body.velocity = *velocity * keep;
            let moved = body.position - shift + body.velocity;
            body.position = clamp_to_viewport(moved, config.boundary_margin, viewport);
        }
    }

    pub(in crate::app) fn center(&self) -> Vec2 {
        self.viewport * 0.5
    }

    pub(in crate::app) fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub(in crate::app) fn set_viewport(&mut self, viewport: Vec2) {
        self.viewport = viewport.max(Vec2::ZERO);
    }

    pub(in crate::app) fn hold_warm(&mut self) {
        self.alpha_target = self.config.warm_alpha;
        self.restart();
    }

    pub(in crate::app) fn release_warm(&mut self) {
        self.alpha_target = 0.0;
    }

    pub(in crate::app) fn kick(&mut self) {
        self.alpha = self.alpha.max(self.config.warm_alpha);
        self.restart();
    }

    fn restart(&mut self) {
        if self.settled {
            debug!("simulation reheated to alpha {:.3}", self.alpha);
        }
        self.settled = false;
    }

    pub(in crate::app) fn stop(&mut self) {
        self.running = false;
    }

    #[cfg(test)]
    pub(in crate::app) fn is_running(&self) -> bool {
        self.running
    }

    #[cfg(test)]
    pub(in crate::app) fn alpha(&self) -> f32 {
        self.alpha
    }

    #[cfg(test)]
    pub(in crate::app) fn len(&self) -> usize {
        self.bodies.len()
    }

    pub(in crate::app) fn position(&self, index: usize) -> Option<Vec2> {
        self.bodies.get(index).map(|body| body.pin.unwrap_or(body.position))
    }

    pub(in crate::app) fn pin(&mut self, index: usize, position: Vec2) {
        if let Some(body) = self.bodies.get_mut(index) {
            body.pin = Some(position);
            body.position = position;
            body.velocity = Vec2::ZERO;
        }
    }

    pub(in crate::app) fn unpin(&mut self, index: usize) {
        if let Some(body) = self.bodies.get_mut(index) {
            body.pin = None;
        }
    }

    #[cfg(test)]
    pub(in crate::app) fn is_pinned(&self, index: usize) -> bool {
        self.bodies.get(index).is_some_and(|body| body.pin.is_some())
    }
}

fn clamp_to_viewport(position: Vec2, margin: f32, viewport: Vec2) -> Vec2 {
    vec2(
        clamp_axis(position.x, margin, viewport.x),
        clamp_axis(position.y, margin, viewport.y),
    )
}

/// Keeps a coordinate inside `[margin, extent - margin]`, collapsing to the midline when the
/// surface is too small to honour the margin.
fn clamp_axis(value: f32, margin: f32, extent: f32) -> f32 {
    let low = margin;
    let high = extent - margin;
    if high < low {
        extent * 0.5
    } else {
        value.clamp(low, high)
    }
}
