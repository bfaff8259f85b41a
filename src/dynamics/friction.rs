use crate::{
    collision::detection::{Axis, Contact},
    config::SimulationConfig,
    core::block::Block,
    utils::math::mean,
};

/// Friction coefficient for a block pair. A slippery material pulls the pair
/// down to a fraction of the smaller coefficient.
pub fn effective_friction(a: &Block, b: &Block, config: &SimulationConfig) -> f32 {
    let lowest = a.friction.min(b.friction);
    if lowest < config.slippery_threshold {
        lowest * config.slippery_factor
    } else {
        mean(a.friction, b.friction)
    }
}

/// Applies tangential friction to a contacting pair and returns the magnitude
/// of the relative velocity removed.
pub fn apply_friction(
    body_a: &mut Block,
    body_b: &mut Block,
    contact: &Contact,
    config: &SimulationConfig,
) -> f32 {
    let movable_a = body_a.is_movable();
    let movable_b = body_b.is_movable();
    if !movable_a && !movable_b {
        return 0.0;
    }

    let mu = effective_friction(body_a, body_b, config);
    let tangent = contact.tangent();
    let relative = (body_b.velocity - body_a.velocity).dot(tangent);
    let delta = relative * mu;

    match (movable_a, movable_b) {
        (true, true) => {
            body_a.velocity += tangent * (delta * 0.5);
            body_b.velocity -= tangent * (delta * 0.5);
        }
        (true, false) => body_a.velocity += tangent * delta,
        (false, true) => body_b.velocity -= tangent * delta,
        (false, false) => {}
    }

    apply_drag_correction(body_a, body_b, contact, mu);

    delta.abs()
}

/// Nudges a block resting on a dragged block by the horizontal distance it
/// lags behind the dragged block this frame. Repeated calls within one frame
/// converge instead of accumulating.
///
/// The nudge is the lag scaled by `mu`, the same factor as the velocity
/// transfer, so a low-friction rider keeps slipping behind the dragged block
/// while a rider with `mu = 1` closes the whole gap.
fn apply_drag_correction(body_a: &mut Block, body_b: &mut Block, contact: &Contact, mu: f32) {
    if contact.axis != Axis::Y {
        return;
    }

    let (driver, rider) = if body_a.is_dragging && body_b.is_movable() {
        (&*body_a, body_b)
    } else if body_b.is_dragging && body_a.is_movable() {
        (&*body_b, body_a)
    } else {
        return;
    };

    if rider.center().y >= driver.center().y {
        return;
    }

    let lag = driver.frame_displacement().x - rider.frame_displacement().x;
    rider.position.x += lag * mu;
}
