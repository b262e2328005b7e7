//! Phase state machine.
//!
//! Evaluated once per tick, after the force filter, in this order:
//!
//! 1. `Searching → Discovered` when the smoothed force reaches the discovery
//!    threshold. The X and Z position of that tick is captured.
//! 2. While discovered, lateral and vertical distances from the captured
//!    point are recomputed from the current position.
//! 3. `Discovered → Withdrawing` the first time the lateral distance exceeds
//!    the milestone distance.
//!
//! Both transitions are one-way within an episode.

use tracing::info;

use crate::domain::models::shaping::{DISCOVERY_FORCE_THRESHOLD, MILESTONE_LATERAL_DISTANCE};
use crate::domain::models::{DiscoveryPoint, EpisodeState, Observation, Phase};

/// Transitions that fired on the current tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Transitions {
    /// The object was found on this tick.
    pub discovered: bool,
    /// The withdrawal milestone latched on this tick.
    pub milestone: bool,
}

/// Apply this tick's transitions to `state`.
///
/// Expects `state.force_ema` to already hold this tick's smoothed force.
pub fn advance(state: &mut EpisodeState, observation: &Observation) -> Transitions {
    let mut fired = Transitions::default();
    let position = observation.position;

    if state.phase == Phase::Searching && state.force_ema >= DISCOVERY_FORCE_THRESHOLD {
        let point = DiscoveryPoint {
            x: position.x,
            z: position.z,
        };
        state.phase = Phase::Discovered;
        state.discovery_point = Some(point);
        fired.discovered = true;
        info!(
            step = state.step_index,
            force_ema = state.force_ema,
            x = point.x,
            z = point.z,
            "object discovered"
        );
    }

    if let Some(point) = state.discovery_point {
        state.lateral_distance = point.x - position.x;
        state.vertical_distance = position.z - point.z;
    }

    if state.phase == Phase::Discovered && state.lateral_distance > MILESTONE_LATERAL_DISTANCE {
        state.phase = Phase::Withdrawing;
        fired.milestone = true;
        info!(
            step = state.step_index,
            lateral_distance = state.lateral_distance,
            vertical_distance = state.vertical_distance,
            vertical_velocity = observation.velocity.z,
            "withdrawal distance reached"
        );
    }

    fired
}
