//! Domain layer for the contact reward engine
//!
//! Core types and the port traits external collaborators implement.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult};
