//! Browser helpers shared by the engine host components.

pub mod visibility;
