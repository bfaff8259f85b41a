use crate::{config::SimulationConfig, core::block::Block};

/// Reflects an outward velocity component scaled by `bounciness`. Components
/// no faster than `threshold` are resting contact and drop to zero.
fn bounce(velocity: f32, bounciness: f32, threshold: f32) -> f32 {
    if velocity.abs() <= threshold {
        0.0
    } else {
        -velocity * bounciness
    }
}

/// Clamps a non-static block into `[0, width] × [0, height]`. Returns whether
/// the block was touching or outside any wall.
pub fn constrain_to_bounds(block: &mut Block, config: &SimulationConfig) -> bool {
    if block.is_static {
        return false;
    }

    let threshold = config.bounce_threshold;
    let max_x = (config.width - block.width()).max(0.0);
    let max_y = (config.height - block.height()).max(0.0);
    let mut clamped = false;

    if block.position.x < 0.0 {
        block.position.x = 0.0;
        if block.velocity.x < 0.0 {
            block.velocity.x = bounce(block.velocity.x, block.bounciness, threshold);
        }
        clamped = true;
    } else if block.position.x > max_x {
        block.position.x = max_x;
        if block.velocity.x > 0.0 {
            block.velocity.x = bounce(block.velocity.x, block.bounciness, threshold);
        }
        clamped = true;
    }

    if block.position.y < 0.0 {
        block.position.y = 0.0;
        if block.velocity.y < 0.0 {
            block.velocity.y = bounce(block.velocity.y, block.bounciness, threshold);
        }
        clamped = true;
    } else if block.position.y >= max_y {
        block.position.y = max_y;
        if block.velocity.y > 0.0 {
            block.velocity.y = bounce(block.velocity.y, block.bounciness, threshold);
        }
        // Resting on the floor counts as contact for floor friction.
        block.velocity.x *= (1.0 - block.friction * config.floor_friction).max(0.0);
        clamped = true;
    }

    clamped
}
