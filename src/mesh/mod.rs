//! Space/time boundary providers and the uniform mesh derived from them.
pub mod boundaries;
pub mod grid;

pub use boundaries::{LogSpaceBoundaries, MaturityBoundaries, SpaceBoundaries, SpaceWidth, TimeBoundaries};
pub use grid::Mesh;
