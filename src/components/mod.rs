//! Engine host components.
//!
//! Each component renders a container element, mounts its engine into it
//! once the element exists, and releases the engine on cleanup. Engines are
//! held in an instance-scoped [`canvas::lifecycle::InitGuard`], so two copies
//! of the same component never share or block each other.

pub mod dotted_globe;
pub mod geometric_mesh;
pub mod particle_canvas;
pub mod static_field;
pub mod woven_light;
