//! Per-tick reward composition.
//!
//! The reward is the sum of terms gated by phase and by the transitions that
//! fired this tick. Every distance and force term reads the same tick's
//! observation; state carried across ticks enters only through the phase,
//! the force EMA and the discovery point.

use crate::domain::models::shaping::{
    bump, clip, extraction, milestone, pre_milestone, search, ADVISOR_LATERAL_PENALTY,
    DISCOVERY_BONUS, MILESTONE_LATERAL_DISTANCE,
};
use crate::domain::models::{EpisodeState, Observation, Phase, RewardComponents};

use super::phase_machine::Transitions;

/// Compose the reward terms for one tick.
///
/// `state` must already reflect this tick's transitions. The terminal advisor
/// contribution is not included; the advisor bridge adds it.
pub fn compose(
    state: &EpisodeState,
    fired: Transitions,
    observation: &Observation,
    advisor_enabled: bool,
) -> RewardComponents {
    let velocity = observation.velocity;
    let force = observation.force;
    let mut r = RewardComponents::default();

    if advisor_enabled {
        r.advisor_penalty = -ADVISOR_LATERAL_PENALTY * velocity.y.abs();
    }

    if fired.discovered {
        r.discovery_bonus = DISCOVERY_BONUS;
    }

    if state.discovery_made() {
        r.extraction_distance = bump(
            state.lateral_distance,
            extraction::DISTANCE_TARGET,
            extraction::DISTANCE_STD,
            extraction::DISTANCE_MAX,
        );
    } else {
        r.search_step_penalty = search::STEP_PENALTY;
        r.search_descent = clip(
            search::DESCENT_MAX * (-velocity.z / search::DESCENT_SPEED),
            0.0,
            search::DESCENT_MAX,
        );
        r.search_forward = bump(
            velocity.x,
            search::FORWARD_VELOCITY,
            search::FORWARD_STD,
            search::FORWARD_MAX,
        );
        if velocity.x.abs() > search::SPEED_LIMIT {
            r.search_speed_penalty = search::SPEED_PENALTY;
        }
    }

    if state.phase == Phase::Discovered && state.lateral_distance <= MILESTONE_LATERAL_DISTANCE {
        r.pre_milestone_force = bump(
            force.x,
            pre_milestone::FORCE_TARGET,
            pre_milestone::FORCE_STD,
            pre_milestone::FORCE_MAX,
        );
        r.pre_milestone_velocity = clip(
            pre_milestone::VELOCITY_GAIN * -velocity.x,
            0.0,
            pre_milestone::VELOCITY_MAX,
        );
    }

    if fired.milestone {
        r.milestone_bonus = milestone::BONUS;
        r.milestone_lift = clip(
            milestone::LIFT_MAX * (velocity.z / milestone::LIFT_SPEED),
            0.0,
            milestone::LIFT_MAX,
        );
        r.milestone_height = bump(
            state.vertical_distance,
            milestone::HEIGHT_TARGET,
            milestone::HEIGHT_STD,
            milestone::HEIGHT_MAX,
        );
        if state.vertical_distance > milestone::CLEARANCE_FLOOR {
            r.milestone_clearance = milestone::CLEARANCE_BONUS;
        }
    }

    r
}
