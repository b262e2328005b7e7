//! Adapters for the collaborators behind the domain ports.

pub mod advisor;
pub mod physics;
pub mod policy;
