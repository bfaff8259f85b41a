use glam::Vec2;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{config::SimulationConfig, core::block::Block, utils::math::snap_to_zero};

/// Per-block stages of the step: gravity, explicit Euler integration, and the
/// damping/sleep/cap stability pass. Static and dragged blocks are skipped.
#[derive(Debug, Clone, Default)]
pub struct Integrator {
    parallel: bool,
}

impl Integrator {
    pub fn new() -> Self {
        Self { parallel: false }
    }

    /// Only takes effect with the `parallel` feature. Every stage updates
    /// blocks independently, so results match the sequential path.
    pub fn set_parallel(&mut self, enabled: bool) {
        self.parallel = enabled;
    }

    pub fn parallel(&self) -> bool {
        self.parallel
    }

    pub fn apply_gravity(&self, blocks: &mut [Block], gravity: f32, dt: f32) {
        self.for_each(blocks, |block| {
            if block.is_movable() {
                block.velocity.y += gravity * dt;
            }
        });
    }

    /// Blocks the drag controller already carried this frame keep their position.
    pub fn integrate_positions(&self, blocks: &mut [Block], dt: f32) {
        self.for_each(blocks, |block| {
            if block.is_movable() && !block.is_carried {
                block.position += block.velocity * dt;
            }
        });
    }

    pub fn apply_damping(&self, blocks: &mut [Block], config: &SimulationConfig) {
        let damping = config.damping;
        let sleep = config.sleep_threshold;
        let cap = config.max_velocity;
        self.for_each(blocks, |block| {
            if block.is_movable() {
                block.velocity = stabilize(block.velocity * damping, sleep, cap);
            }
        });
    }

    fn for_each<F>(&self, blocks: &mut [Block], op: F)
    where
        F: Fn(&mut Block) + Sync + Send,
    {
        #[cfg(feature = "parallel")]
        {
            if self.parallel {
                blocks.par_iter_mut().for_each(op);
                return;
            }
        }

        blocks.iter_mut().for_each(op);
    }
}

/// Sleep snap plus hard speed cap. Non-finite input is zeroed.
pub fn stabilize(velocity: Vec2, sleep_threshold: f32, max_velocity: f32) -> Vec2 {
    if !velocity.is_finite() {
        debug_assert!(false, "non-finite velocity reached the integrator");
        log::warn!("non-finite velocity {velocity:?} zeroed");
        return Vec2::ZERO;
    }
    snap_to_zero(velocity, sleep_threshold).clamp_length_max(max_velocity)
}
