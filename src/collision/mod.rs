//! Collision modules: AABB overlap detection and impulse-based response.

pub mod detection;
pub mod response;

pub use detection::{detect, Axis, Contact};
pub use response::{resolve, ContactOutcome};
