//! Utility helpers including id allocation, logging, and math extensions.

pub mod allocator;
pub mod logging;
pub mod math;

pub use allocator::{BlockId, BlockIdAllocator};
pub use math::*;
