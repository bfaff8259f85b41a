use crate::error::{EngineError, EngineResult};
use crate::utils::allocator::BlockId;

use super::types::{BlockMaterial, Bounds};
use glam::Vec2;

/// A rectangular rigid body. Blocks never rotate.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: BlockId,
    /// Top-left corner; y grows downward.
    pub position: Vec2,
    /// Width and height.
    pub size: Vec2,
    pub velocity: Vec2,
    pub mass: f32,
    pub friction: f32,
    pub bounciness: f32,
    pub is_static: bool,
    pub is_dragging: bool,
    /// Position at the end of the previous step.
    pub(crate) frame_start: Vec2,
    /// Moved by the drag controller this frame as part of the dragged stack.
    pub(crate) is_carried: bool,
}

impl Default for Block {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }
}

impl Block {
    /// Dynamic block with default (wood) material and unit mass.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        let material = BlockMaterial::default();
        Self {
            id: BlockId::default(),
            position: Vec2::new(x, y),
            size: Vec2::new(width, height),
            velocity: Vec2::ZERO,
            mass: 1.0,
            friction: material.friction,
            bounciness: material.bounciness,
            is_static: false,
            is_dragging: false,
            frame_start: Vec2::new(x, y),
            is_carried: false,
        }
    }

    /// Static body (ground, walls).
    pub fn new_static(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(x, y, width, height).with_static(true)
    }

    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    pub fn with_bounciness(mut self, bounciness: f32) -> Self {
        self.bounciness = bounciness;
        self
    }

    pub fn with_velocity(mut self, vx: f32, vy: f32) -> Self {
        self.velocity = Vec2::new(vx, vy);
        self
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    /// Applies the material's coefficients and derives mass from its density.
    pub fn with_material(mut self, material: BlockMaterial) -> Self {
        self.friction = material.friction;
        self.bounciness = material.bounciness;
        self.mass = material.mass_for(self.size.x, self.size.y);
        self
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_origin_size(self.position, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.position + self.size * 0.5
    }

    pub fn top(&self) -> f32 {
        self.position.y
    }

    pub fn bottom(&self) -> f32 {
        self.position.y + self.size.y
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        self.bounds().contains(point)
    }

    /// Free to be integrated and pushed around by collisions this frame.
    pub fn is_movable(&self) -> bool {
        !self.is_static && !self.is_dragging
    }

    pub fn inverse_mass(&self) -> f32 {
        if self.is_movable() {
            1.0 / self.mass
        } else {
            0.0
        }
    }

    /// Displacement since the end of the previous step.
    pub fn frame_displacement(&self) -> Vec2 {
        self.position - self.frame_start
    }

    pub fn is_carried(&self) -> bool {
        self.is_carried
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }

    /// Checks geometry and material ranges.
    pub fn validate(&self) -> EngineResult<()> {
        if !(self.size.x.is_finite() && self.size.x > 0.0) {
            return Err(EngineError::invalid_block(format!(
                "width must be positive, got {}",
                self.size.x
            )));
        }
        if !(self.size.y.is_finite() && self.size.y > 0.0) {
            return Err(EngineError::invalid_block(format!(
                "height must be positive, got {}",
                self.size.y
            )));
        }
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(EngineError::invalid_block(format!(
                "mass must be positive, got {}",
                self.mass
            )));
        }
        if !(0.0..=1.0).contains(&self.friction) {
            return Err(EngineError::invalid_block(format!(
                "friction must lie in [0, 1], got {}",
                self.friction
            )));
        }
        if !(0.0..=1.0).contains(&self.bounciness) {
            return Err(EngineError::invalid_block(format!(
                "bounciness must lie in [0, 1], got {}",
                self.bounciness
            )));
        }
        if !self.is_finite() {
            return Err(EngineError::invalid_block("position and velocity must be finite"));
        }
        Ok(())
    }

    /// Marks the current position as the start of the next frame.
    pub(crate) fn begin_frame(&mut self) {
        self.frame_start = self.position;
        self.is_carried = false;
    }
}
