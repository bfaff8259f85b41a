//! Global configuration constants and the tunable simulation settings.

use serde::{Deserialize, Serialize};

/// Downward gravitational acceleration (length units / s², Y-down).
pub const GRAVITY: f32 = 9.8;

/// Default frame timestep (in seconds).
pub const DEFAULT_TIME_STEP: f32 = 1.0 / 60.0;

/// Number of collision passes over all block pairs per step.
pub const COLLISION_ITERATIONS: u32 = 4;

/// Multiplier applied to every free block's velocity once per step.
pub const VELOCITY_DAMPING: f32 = 0.99;

/// Velocity components with a smaller magnitude snap to zero.
pub const SLEEP_THRESHOLD: f32 = 0.01;

/// Hard cap on block speed.
pub const MAX_VELOCITY: f32 = 50.0;

/// Vertical gap tolerated when deciding that one block rests on another.
pub const REST_TOLERANCE: f32 = 0.05;

/// Extra distance added when separating a pair so the resolved pair no longer overlaps.
pub const SEPARATION_SLOP: f32 = 1e-4;

/// Approach speeds below this never bounce. Zero keeps every approach elastic;
/// [`SimulationConfig::for_step`] raises it to the resting speed of a step.
pub const BOUNCE_THRESHOLD: f32 = 0.0;

/// Headroom over one step of gravity for an approach to count as resting.
pub const RESTING_SPEED_MARGIN: f32 = 1.01;

/// Fraction of a block's friction removed from its horizontal velocity on floor contact.
pub const FLOOR_FRICTION: f32 = 0.1;

/// Friction below which a material counts as slippery.
pub const SLIPPERY_THRESHOLD: f32 = 0.1;

/// Scale applied to the smaller friction when a slippery material is involved.
pub const SLIPPERY_FACTOR: f32 = 0.5;

/// Conversion factor from simulation length units to display pixels.
/// The engine never uses it; renderers must, to stay consistent with the physics.
pub const PIXELS_PER_METER: f32 = 50.0;

/// Steps slower than this are reported through `log::warn!`.
pub const FRAME_BUDGET_MS: f32 = 16.0;

/// Default playable area width.
pub const DEFAULT_WORLD_WIDTH: f32 = 16.0;

/// Default playable area height.
pub const DEFAULT_WORLD_HEIGHT: f32 = 12.0;

/// Converts a length in simulation units to display pixels.
pub fn to_pixels(length: f32) -> f32 {
    length * PIXELS_PER_METER
}

/// Tunable parameters of a [`crate::World`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub width: f32,
    pub height: f32,
    pub gravity: f32,
    pub collision_iterations: u32,
    pub damping: f32,
    pub sleep_threshold: f32,
    pub max_velocity: f32,
    pub rest_tolerance: f32,
    pub bounce_threshold: f32,
    pub floor_friction: f32,
    pub slippery_threshold: f32,
    pub slippery_factor: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WORLD_WIDTH,
            height: DEFAULT_WORLD_HEIGHT,
            gravity: GRAVITY,
            collision_iterations: COLLISION_ITERATIONS,
            damping: VELOCITY_DAMPING,
            sleep_threshold: SLEEP_THRESHOLD,
            max_velocity: MAX_VELOCITY,
            rest_tolerance: REST_TOLERANCE,
            bounce_threshold: BOUNCE_THRESHOLD,
            floor_friction: FLOOR_FRICTION,
            slippery_threshold: SLIPPERY_THRESHOLD,
            slippery_factor: SLIPPERY_FACTOR,
        }
    }
}

impl SimulationConfig {
    /// Default settings for a playable area of the given size.
    pub fn with_bounds(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Settings for a single step of length `dt`. An approach no faster than
    /// the speed gravity adds in one step is a resting contact and does not
    /// bounce, so settled blocks come to rest.
    pub fn for_step(&self, dt: f32) -> Self {
        let resting_speed = self.gravity.abs() * dt * RESTING_SPEED_MARGIN;
        Self {
            bounce_threshold: self.bounce_threshold.max(resting_speed),
            ..*self
        }
    }
}
