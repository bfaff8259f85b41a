//! Simulation dynamics: integration, friction, world bounds, and the contact graph.

pub mod boundary;
pub mod contact_graph;
pub mod friction;
pub mod integrator;

pub use boundary::constrain_to_bounds;
pub use contact_graph::{is_resting_on, movable_stack_above, resting_on, stack_above};
pub use friction::{apply_friction, effective_friction};
pub use integrator::{stabilize, Integrator};
