//! Block Stacker – deterministic 2D physics for axis-aligned blocks.
//!
//! The engine simulates rectangular, non-rotating bodies under gravity with
//! impulse-based collision response, friction, and pointer dragging that
//! carries whatever is stacked on the dragged block. Coordinates are in
//! length units with y growing downward; the floor sits at `y = height`.

pub mod collision;
pub mod config;
pub mod core;
pub mod dynamics;
pub mod error;
pub mod utils;
pub mod world;

pub use glam::Vec2;

pub use collision::{
    detection::{detect, Axis, Contact},
    response::{resolve, ContactOutcome},
};
pub use config::{SimulationConfig, PIXELS_PER_METER};
pub use self::core::{
    block::Block,
    template::BlockTemplate,
    types::{BlockMaterial, Bounds},
};
pub use error::{EngineError, EngineResult};
pub use utils::allocator::BlockId;
pub use world::{DragState, SharedWorld, StepMetrics, World};

// `SharedWorld` moves the world across threads.
const _: fn() = || {
    fn assert_send<T: Send>() {}
    assert_send::<World>();
};
