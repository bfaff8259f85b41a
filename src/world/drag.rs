//! Pointer-driven dragging.
//!
//! The dragged block follows the pointer and takes the velocity implied by its
//! motion, so collisions treat it as a fast, immovable body. Blocks stacked on
//! it at drag start are carried along by the same displacement each update for
//! as long as they keep resting on it.

use std::collections::HashSet;

use glam::Vec2;

use crate::{dynamics::contact_graph, utils::allocator::BlockId};

use super::World;

/// Active drag bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    pub block_id: BlockId,
    /// Pointer position minus block origin, fixed for the whole drag.
    pub offset: Vec2,
    /// Blocks carried along with the dragged block.
    pub stack: Vec<BlockId>,
}

/// Velocity that covers `delta` in `dt`, capped at `max_speed`. Tiny `dt`
/// overflows the quotient, so each component is clamped before the length cap.
fn implied_velocity(delta: Vec2, dt: f32, max_speed: f32) -> Vec2 {
    let limit = Vec2::splat(max_speed);
    let velocity = (delta / dt).clamp(-limit, limit).clamp_length_max(max_speed);
    if velocity.is_finite() {
        velocity
    } else {
        Vec2::ZERO
    }
}

impl World {
    /// Starts dragging `id`. Missing and static blocks are ignored.
    pub fn start_drag(&mut self, id: BlockId, pointer_x: f32, pointer_y: f32) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        if self.blocks[index].is_static {
            return false;
        }
        let pointer = Vec2::new(pointer_x, pointer_y);
        if !pointer.is_finite() {
            return false;
        }

        self.end_drag();

        let stack =
            contact_graph::movable_stack_above(&self.blocks, id, self.config.rest_tolerance);

        let block = &mut self.blocks[index];
        block.is_dragging = true;
        block.velocity = Vec2::ZERO;
        let offset = pointer - block.position;

        log::debug!("drag start {id} carrying {} blocks", stack.len());
        self.drag = Some(DragState {
            block_id: id,
            offset,
            stack,
        });
        true
    }

    /// Moves the dragged block under the pointer. `dt` is the time since the
    /// previous update and only affects the implied velocity.
    pub fn update_drag(&mut self, pointer_x: f32, pointer_y: f32, dt: f32) -> bool {
        let Some((block_id, offset)) = self.drag.as_ref().map(|drag| (drag.block_id, drag.offset))
        else {
            return false;
        };
        let Some(index) = self.index_of(block_id) else {
            self.drag = None;
            return false;
        };

        let target = Vec2::new(pointer_x, pointer_y) - offset;
        if !target.is_finite() {
            return false;
        }
        let delta = target - self.blocks[index].position;
        let velocity = if dt.is_finite() && dt > 0.0 {
            implied_velocity(delta, dt, self.config.max_velocity)
        } else {
            self.blocks[index].velocity
        };

        // Members knocked off since the last update stop following.
        let still_resting: HashSet<BlockId> =
            contact_graph::movable_stack_above(&self.blocks, block_id, self.config.rest_tolerance)
                .into_iter()
                .collect();
        let stack = match self.drag.as_mut() {
            Some(drag) => {
                drag.stack.retain(|member| still_resting.contains(member));
                drag.stack.clone()
            }
            None => Vec::new(),
        };

        let dragged = &mut self.blocks[index];
        dragged.position = target;
        dragged.velocity = velocity;

        for member in stack {
            if let Some(block) = self.block_mut(member) {
                block.position += delta;
                block.velocity = velocity;
                block.is_carried = true;
            }
        }
        true
    }

    /// Releases the dragged block. Its last velocity is kept, so it coasts.
    pub fn end_drag(&mut self) -> Option<BlockId> {
        let drag = self.drag.take()?;
        if let Some(block) = self.block_mut(drag.block_id) {
            block.is_dragging = false;
        }
        log::debug!("drag end {}", drag.block_id);
        Some(drag.block_id)
    }

    pub fn dragged_block_id(&self) -> Option<BlockId> {
        self.drag.as_ref().map(|drag| drag.block_id)
    }

    pub fn drag_state(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }
}
