//! Physics adapters.

pub mod kinematic;

pub use kinematic::{ContactScene, KinematicPhysics};
