//! Physics port - interface for the simulation collaborator.

use crate::domain::models::Action;

/// Trait for physics engines that advance the contact scene.
///
/// Implementations own the world state and sensor readout. Both methods
/// return the raw sensor vector (position, velocity, force); shape checks
/// happen in the core.
pub trait Physics: Send {
    /// Get the engine type name.
    fn name(&self) -> &'static str;

    /// Restore the rest configuration with a small bounded perturbation and
    /// return the initial sensor vector.
    fn reset(&mut self) -> Vec<f64>;

    /// Apply one actuator command for a full tick and return the sensor vector.
    ///
    /// Action components are clamped to actuator ranges here, not by the caller.
    fn advance(&mut self, action: &Action) -> Vec<f64>;
}
