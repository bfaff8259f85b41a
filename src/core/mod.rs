//! Core types describing blocks, materials, and block templates.

pub mod block;
pub mod template;
pub mod types;

pub use block::Block;
pub use template::BlockTemplate;
pub use types::{BlockMaterial, Bounds};
