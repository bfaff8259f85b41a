use crate::{
    config::{SimulationConfig, SEPARATION_SLOP},
    core::block::Block,
    dynamics::friction::apply_friction,
    utils::math::mean,
};

use super::detection::Contact;

/// What a single resolution call did to a pair.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ContactOutcome {
    pub resolved: bool,
    pub normal_impulse: f32,
    pub friction_delta: f32,
}

/// Separates an overlapping pair along the contact axis and exchanges momentum.
///
/// Static and dragged blocks are immovable: the other side absorbs the whole
/// overlap and impulse. Two movable blocks share the correction by inverse
/// mass, so equal masses split it evenly.
pub fn resolve(
    body_a: &mut Block,
    body_b: &mut Block,
    contact: &Contact,
    config: &SimulationConfig,
) -> ContactOutcome {
    if body_a.is_static && body_b.is_static {
        return ContactOutcome::default();
    }

    let inv_a = body_a.inverse_mass();
    let inv_b = body_b.inverse_mass();
    let inv_sum = inv_a + inv_b;
    if inv_sum <= f32::EPSILON {
        return ContactOutcome::default();
    }

    let normal = contact.normal();
    let depth = contact.depth() + SEPARATION_SLOP;

    body_a.position -= normal * (depth * inv_a / inv_sum);
    body_b.position += normal * (depth * inv_b / inv_sum);

    let approach = (body_b.velocity - body_a.velocity).dot(normal);
    let mut normal_impulse = 0.0;
    if approach < 0.0 {
        let restitution = if -approach <= config.bounce_threshold {
            0.0
        } else {
            mean(body_a.bounciness, body_b.bounciness)
        };
        let j = -(1.0 + restitution) * approach / inv_sum;
        body_a.velocity -= normal * (j * inv_a);
        body_b.velocity += normal * (j * inv_b);
        normal_impulse = j;
    }

    let friction_delta = apply_friction(body_a, body_b, contact, config);

    ContactOutcome {
        resolved: true,
        normal_impulse,
        friction_delta,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::detection::detect;
    use glam::Vec2;

    #[test]
    fn square_landing_bounces_without_sideways_motion() {
        let config = SimulationConfig::default();
        let mut ground = Block::new_static(0.0, 3.0, 0.5, 0.5);
        let mut falling = Block::new(0.0, 2.55, 0.5, 0.5).with_velocity(0.0, 2.0);
        let contact = detect(&ground, &falling).expect("overlap");

        let outcome = resolve(&mut ground, &mut falling, &contact, &config);
        assert!(outcome.resolved);
        assert!(falling.velocity.y < 0.0);
        assert_eq!(falling.position.x, 0.0);
        assert_eq!(ground.position, Vec2::new(0.0, 3.0));
        assert!(detect(&ground, &falling).is_none());
    }

    #[test]
    fn slow_landing_still_reflects() {
        let config = SimulationConfig::default();
        let mut ground = Block::new_static(0.0, 3.0, 0.5, 0.5).with_bounciness(1.0);
        let mut falling = Block::new(0.0, 2.55, 0.5, 0.5)
            .with_bounciness(1.0)
            .with_velocity(0.0, 0.4);
        let contact = detect(&ground, &falling).expect("overlap");

        resolve(&mut ground, &mut falling, &contact, &config);
        assert!((falling.velocity.y + 0.4).abs() < 1e-5, "vy = {}", falling.velocity.y);
    }

    #[test]
    fn resting_approach_does_not_bounce() {
        let dt = 1.0 / 60.0;
        let config = SimulationConfig::default().for_step(dt);
        let mut ground = Block::new_static(0.0, 3.0, 0.5, 0.5).with_bounciness(1.0);
        let mut resting = Block::new(0.0, 2.51, 0.5, 0.5)
            .with_bounciness(1.0)
            .with_velocity(0.0, config.gravity * dt);
        let contact = detect(&ground, &resting).expect("overlap");

        resolve(&mut ground, &mut resting, &contact, &config);
        assert_eq!(resting.velocity.y, 0.0);
    }

    #[test]
    fn heavier_block_moves_less() {
        let config = SimulationConfig::default();
        let mut heavy = Block::new(0.0, 0.0, 1.0, 1.0).with_mass(3.0);
        let mut light = Block::new(0.8, 0.0, 1.0, 1.0).with_mass(1.0);
        let contact = detect(&heavy, &light).expect("overlap");

        resolve(&mut heavy, &mut light, &contact, &config);
        assert!((heavy.position.x + 0.05).abs() < 1e-3);
        assert!((light.position.x - 0.95).abs() < 1e-3);
        assert!(light.position.x - heavy.position.x > 0.99);
    }

    #[test]
    fn separating_pair_gets_no_impulse() {
        let config = SimulationConfig::default();
        let mut a = Block::new(0.0, 0.0, 1.0, 1.0).with_velocity(-1.0, 0.0);
        let mut b = Block::new(0.9, 0.0, 1.0, 1.0).with_velocity(1.0, 0.0);
        let contact = detect(&a, &b).expect("overlap");

        let outcome = resolve(&mut a, &mut b, &contact, &config);
        assert_eq!(outcome.normal_impulse, 0.0);
        assert_eq!(a.velocity.x, -1.0);
        assert_eq!(b.velocity.x, 1.0);
    }

    #[test]
    fn dragged_and_static_pair_is_left_alone() {
        let config = SimulationConfig::default();
        let mut wall = Block::new_static(0.0, 0.0, 1.0, 4.0);
        let mut held = Block::new(0.5, 1.0, 1.0, 1.0).with_velocity(-3.0, 0.0);
        held.is_dragging = true;
        let contact = detect(&wall, &held).expect("overlap");

        let outcome = resolve(&mut wall, &mut held, &contact, &config);
        assert!(!outcome.resolved);
        assert_eq!(held.position, Vec2::new(0.5, 1.0));
    }
}
