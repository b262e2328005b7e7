//! Per-episode state and task-progress phase.
//!
//! ```text
//! Searching ──(force EMA ≥ 1.0)──▶ Discovered ──(lateral > 0.2)──▶ Withdrawing
//! ```
//!
//! There is no way back to `Searching` short of a reset.

use serde::{Deserialize, Serialize};

/// Task-progress phase of an episode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Probing for the embedded object.
    #[default]
    Searching,
    /// Object found; retracting toward the milestone distance.
    Discovered,
    /// Milestone distance passed. Final phase of the episode.
    Withdrawing,
}

impl Phase {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Searching => "searching",
            Self::Discovered => "discovered",
            Self::Withdrawing => "withdrawing",
        }
    }

    /// Whether the object has been found in this phase or an earlier one.
    pub const fn is_discovered(&self) -> bool {
        matches!(self, Self::Discovered | Self::Withdrawing)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position captured on the discovery tick (X and Z axes).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryPoint {
    pub x: f64,
    pub z: f64,
}

/// All mutable state of one running episode.
///
/// Owned by a single environment instance. Only the phase machine, the force
/// filter and [`EpisodeState::reset`] write to it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EpisodeState {
    /// Ticks taken since the last reset.
    pub step_index: u64,
    /// Current phase; carries the discovery and milestone latches.
    pub phase: Phase,
    /// Set once, on the discovery tick.
    pub discovery_point: Option<DiscoveryPoint>,
    /// `discovery.x - position.x`, zero until discovery.
    pub lateral_distance: f64,
    /// `position.z - discovery.z`, zero until discovery.
    pub vertical_distance: f64,
    /// Instantaneous contact force magnitude.
    pub force_magnitude: f64,
    /// Smoothed contact force magnitude.
    pub force_ema: f64,
    /// Advisor transcript, only written while the advisor is enabled.
    pub transcript: String,
}

impl EpisodeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return every field to its episode-start value.
    pub fn reset(&mut self) {
        self.step_index = 0;
        self.phase = Phase::Searching;
        self.discovery_point = None;
        self.lateral_distance = 0.0;
        self.vertical_distance = 0.0;
        self.force_magnitude = 0.0;
        self.force_ema = 0.0;
        self.transcript.clear();
    }

    pub const fn discovery_made(&self) -> bool {
        self.phase.is_discovered()
    }

    pub fn distance_milestone_reached(&self) -> bool {
        self.phase == Phase::Withdrawing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = EpisodeState::new();
        assert_eq!(state.step_index, 0);
        assert_eq!(state.phase, Phase::Searching);
        assert!(!state.discovery_made());
        assert!(!state.distance_milestone_reached());
        assert!(state.discovery_point.is_none());
        assert_eq!(state.force_ema, 0.0);
        assert!(state.transcript.is_empty());
    }

    #[test]
    fn test_reset_clears_terminal_state() {
        let mut state = EpisodeState {
            step_index: 412,
            phase: Phase::Withdrawing,
            discovery_point: Some(DiscoveryPoint { x: 0.1, z: -0.05 }),
            lateral_distance: 0.31,
            vertical_distance: 0.08,
            force_magnitude: 3.2,
            force_ema: 2.7,
            transcript: "Step 1:\n".to_string(),
        };

        state.reset();

        assert_eq!(state, EpisodeState::default());
    }

    #[test]
    fn test_phase_flags() {
        assert!(!Phase::Searching.is_discovered());
        assert!(Phase::Discovered.is_discovered());
        assert!(Phase::Withdrawing.is_discovered());
    }

    #[test]
    fn test_phase_serde() {
        let json = serde_json::to_string(&Phase::Withdrawing).unwrap();
        assert_eq!(json, "\"withdrawing\"");
        let phase: Phase = serde_json::from_str("\"discovered\"").unwrap();
        assert_eq!(phase, Phase::Discovered);
    }
}
