use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::utils::allocator::BlockId;

use super::World;

/// Cloneable handle for driving one [`World`] from several threads. Each call
/// holds the lock for its whole duration, so a step is never observed half done.
#[derive(Clone)]
pub struct SharedWorld {
    inner: Arc<Mutex<World>>,
}

impl SharedWorld {
    pub fn new(world: World) -> Self {
        Self {
            inner: Arc::new(Mutex::new(world)),
        }
    }

    pub fn step(&self, dt: f32) {
        self.inner.lock().step(dt);
    }

    pub fn start_drag(&self, id: BlockId, pointer_x: f32, pointer_y: f32) -> bool {
        self.inner.lock().start_drag(id, pointer_x, pointer_y)
    }

    pub fn update_drag(&self, pointer_x: f32, pointer_y: f32, dt: f32) -> bool {
        self.inner.lock().update_drag(pointer_x, pointer_y, dt)
    }

    pub fn end_drag(&self) -> Option<BlockId> {
        self.inner.lock().end_drag()
    }

    /// Runs `f` with shared access to the world.
    pub fn read<R>(&self, f: impl FnOnce(&World) -> R) -> R {
        f(&self.inner.lock())
    }

    /// Runs `f` with exclusive access to the world.
    pub fn write<R>(&self, f: impl FnOnce(&mut World) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Locks the world until the guard is dropped.
    pub fn lock(&self) -> MutexGuard<'_, World> {
        self.inner.lock()
    }
}
