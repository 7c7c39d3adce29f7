use eframe::egui::{Vec2, vec2};

use super::quadtree::QuadNode;

#[derive(Clone, Copy)]
pub(super) struct ChargeParams {
    pub(super) strength: f32,
    pub(super) alpha: f32,
    pub(super) theta: f32,
    pub(super) distance_min_sq: f32,
}

pub(super) fn jiggle(offsets: &[Vec2], from: usize, to: usize) -> Vec2 {
    let delta = offsets.get(to).copied().unwrap_or(Vec2::ZERO)
        - offsets.get(from).copied().unwrap_or(Vec2::ZERO);
    if delta.length_sq() > 0.0 {
        delta
    } else {
        let angle = ((from as f32) * 0.618_034 + (to as f32) * 0.414_214) * std::f32::consts::TAU;
        vec2(angle.cos(), angle.sin()) * 1.0e-3
    }
}

fn charge_between(delta: Vec2, weight: f32, params: ChargeParams) -> Vec2 {
    let mut distance_sq = delta.length_sq();
    if distance_sq < params.distance_min_sq {
        distance_sq = (params.distance_min_sq * distance_sq).sqrt();
    }
    delta * (params.strength * weight * params.alpha / distance_sq)
}

pub(super) fn accumulate_charge_for_body(
    node: &QuadNode,
    index: usize,
    positions: &[Vec2],
    offsets: &[Vec2],
    params: ChargeParams,
    velocity: &mut Vec2,
) {
    if node.mass <= 0.0 {
        return;
    }

    let point = positions[index];

    if node.is_leaf() {
        for &other_index in &node.indices {
            if other_index == index {
                continue;
            }
            let mut delta = positions[other_index] - point;
            if delta.length_sq() <= 0.0 {
                delta = jiggle(offsets, index, other_index);
            }
            *velocity += charge_between(delta, 1.0, params);
        }
        return;
    }

    let delta = node.center_of_mass - point;
    let distance = delta.length().max(0.0001);
    let can_approximate = !node.bounds.contains(point)
        && (node.bounds.side_length() / distance) < params.theta
        && node.mass > 1.0;

    if can_approximate {
        *velocity += charge_between(delta, node.mass, params);
        return;
    }

    for child in node.children.iter().flatten() {
        accumulate_charge_for_body(child, index, positions, offsets, params, velocity);
    }
}

pub(super) struct SpringParams<'a> {
    pub(super) strength: f32,
    pub(super) distance: f32,
    pub(super) alpha: f32,
    pub(super) offsets: &'a [Vec2],
}

pub(super) fn apply_springs(
    links: &[(usize, usize)],
    bias: &[f32],
    positions: &[Vec2],
    velocities: &mut [Vec2],
    params: SpringParams<'_>,
) {
    for (&(source, target), &source_share) in links.iter().zip(bias) {
        let mut delta =
            (positions[target] + velocities[target]) - (positions[source] + velocities[source]);
        if delta.length_sq() <= 0.0 {
            delta = jiggle(params.offsets, source, target);
        }

        let length = delta.length();
        let scale = (length - params.distance) / length * params.alpha * params.strength;
        let correction = delta * scale;

        velocities[target] -= correction * source_share;
        velocities[source] += correction * (1.0 - source_share);
    }
}

pub(super) fn apply_axial_pull(
    positions: &[Vec2],
    velocities: &mut [Vec2],
    center: Vec2,
    strength: f32,
    alpha: f32,
) {
    for (position, velocity) in positions.iter().zip(velocities.iter_mut()) {
        *velocity += (center - *position) * (strength * alpha);
    }
}

pub(super) fn centering_shift(positions: &[Vec2], center: Vec2, strength: f32) -> Vec2 {
    if positions.is_empty() {
        return Vec2::ZERO;
    }

    let mut sum = Vec2::ZERO;
    for position in positions {
        sum += *position;
    }
    (sum / positions.len() as f32 - center) * strength
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charge_pushes_bodies_apart_with_negative_strength() {
        let positions = vec![vec2(0.0, 0.0), vec2(10.0, 0.0)];
        let offsets = vec![Vec2::ZERO; 2];
        let tree = QuadNode::build(&positions).unwrap();
        let params = ChargeParams {
            strength: -300.0,
            alpha: 1.0,
            theta: 0.9,
            distance_min_sq: 1.0,
        };

        let mut left = Vec2::ZERO;
        accumulate_charge_for_body(&tree, 0, &positions, &offsets, params, &mut left);
        let mut right = Vec2::ZERO;
        accumulate_charge_for_body(&tree, 1, &positions, &offsets, params, &mut right);

        assert!(left.x < 0.0);
        assert!(right.x > 0.0);
        assert!((left.x + right.x).abs() < 1.0e-4);
    }

    #[test]
    fn coincident_bodies_still_separate() {
        let positions = vec![vec2(3.0, 3.0), vec2(3.0, 3.0)];
        let offsets = vec![Vec2::ZERO; 2];
        let tree = QuadNode::build(&positions).unwrap();
        let params = ChargeParams {
            strength: -300.0,
            alpha: 1.0,
            theta: 0.9,
            distance_min_sq: 1.0,
        };

        let mut velocity = Vec2::ZERO;
        accumulate_charge_for_body(&tree, 0, &positions, &offsets, params, &mut velocity);
        assert!(velocity.length() > 0.0);
        assert!(velocity.x.is_finite() && velocity.y.is_finite());
    }

    #[test]
    fn approximation_tracks_exact_sum_for_distant_cluster() {
        let mut positions = vec![vec2(-2000.0, 0.0)];
        for index in 0..30 {
            positions.push(vec2(
                500.0 + (index % 6) as f32 * 4.0,
                (index / 6) as f32 * 4.0,
            ));
        }
        let offsets = vec![Vec2::ZERO; positions.len()];
        let tree = QuadNode::build(&positions).unwrap();
        let params = ChargeParams {
            strength: -300.0,
            alpha: 1.0,
            theta: 0.9,
            distance_min_sq: 1.0,
        };

        let mut approximate = Vec2::ZERO;
        accumulate_charge_for_body(&tree, 0, &positions, &offsets, params, &mut approximate);

        let exact = positions[1..]
            .iter()
            .map(|other| charge_between(*other - positions[0], 1.0, params))
            .fold(Vec2::ZERO, |sum, value| sum + value);

        assert!((approximate - exact).length() / exact.length() < 0.05);
    }

    #[test]
    fn springs_contract_stretched_links() {
        let positions = vec![vec2(0.0, 0.0), vec2(200.0, 0.0)];
        let mut velocities = vec![Vec2::ZERO; 2];
        apply_springs(
            &[(0, 1)],
            &[0.5],
            &positions,
            &mut velocities,
            SpringParams {
                strength: 0.25,
                distance: 30.0,
                alpha: 1.0,
                offsets: &[Vec2::ZERO; 2],
            },
        );

        assert!(velocities[0].x > 0.0);
        assert!(velocities[1].x < 0.0);
    }

    #[test]
    fn centering_shift_targets_barycenter() {
        let positions = [vec2(0.0, 0.0), vec2(100.0, 50.0)];
        let shift = centering_shift(&positions, vec2(100.0, 100.0), 1.0);
        assert_eq!(shift, vec2(-50.0, -75.0));
        assert_eq!(centering_shift(&[], vec2(1.0, 1.0), 1.0), Vec2::ZERO);
    }
}
