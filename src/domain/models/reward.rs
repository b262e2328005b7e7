//! Additive reward decomposition for a single tick.

use serde::{Deserialize, Serialize};

/// Every additive term of a tick's reward, kept apart for inspection.
///
/// Terms that do not apply on a tick stay at zero. The scalar reward is
/// [`RewardComponents::total`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RewardComponents {
    /// `-1000 |v_y|`, every tick while the advisor is enabled.
    pub advisor_penalty: f64,
    /// +100 on the discovery tick.
    pub discovery_bonus: f64,
    /// Constant searching penalty.
    pub search_step_penalty: f64,
    /// Reward for descending while searching.
    pub search_descent: f64,
    /// Bump around the preferred forward velocity.
    pub search_forward: f64,
    /// Penalty for moving too fast along X.
    pub search_speed_penalty: f64,
    /// Bump on lateral distance once discovered.
    pub extraction_distance: f64,
    /// Bump on horizontal force before the milestone.
    pub pre_milestone_force: f64,
    /// Reward for backing out along −X before the milestone.
    pub pre_milestone_velocity: f64,
    /// Flat bonus on the milestone tick.
    pub milestone_bonus: f64,
    /// Upward velocity ramp on the milestone tick.
    pub milestone_lift: f64,
    /// Bump on vertical distance on the milestone tick.
    pub milestone_height: f64,
    /// Clearance bonus on the milestone tick.
    pub milestone_clearance: f64,
    /// Signed advisor contribution on the terminal tick.
    pub advisor_score: f64,
}

impl RewardComponents {
    /// Sum of all terms.
    pub fn total(&self) -> f64 {
        self.terms().iter().map(|(_, v)| v).sum()
    }

    /// Named view of each term, in a fixed order.
    pub const fn terms(&self) -> [(&'static str, f64); 14] {
        [
            ("advisor_penalty", self.advisor_penalty),
            ("discovery_bonus", self.discovery_bonus),
            ("search_step_penalty", self.search_step_penalty),
            ("search_descent", self.search_descent),
            ("search_forward", self.search_forward),
            ("search_speed_penalty", self.search_speed_penalty),
            ("extraction_distance", self.extraction_distance),
            ("pre_milestone_force", self.pre_milestone_force),
            ("pre_milestone_velocity", self.pre_milestone_velocity),
            ("milestone_bonus", self.milestone_bonus),
            ("milestone_lift", self.milestone_lift),
            ("milestone_height", self.milestone_height),
            ("milestone_clearance", self.milestone_clearance),
            ("advisor_score", self.advisor_score),
        ]
    }

    /// Sum of the searching-phase terms only.
    pub fn search_subtotal(&self) -> f64 {
        self.search_step_penalty
            + self.search_descent
            + self.search_forward
            + self.search_speed_penalty
    }

    /// Copy with every non-finite term replaced by zero.
    ///
    /// Used on ticks whose observation was itself non-finite.
    pub fn sanitized(&self) -> Self {
        self.map_terms(|v| if v.is_finite() { v } else { 0.0 })
    }

    /// Copy with overflowed terms pinned to the largest finite value of the
    /// same sign. NaN terms become zero.
    pub fn saturated(&self) -> Self {
        self.map_terms(|v| {
            if v.is_nan() {
                0.0
            } else {
                v.clamp(f64::MIN, f64::MAX)
            }
        })
    }

    fn map_terms(&self, fix: impl Fn(f64) -> f64) -> Self {
        Self {
            advisor_penalty: fix(self.advisor_penalty),
            discovery_bonus: fix(self.discovery_bonus),
            search_step_penalty: fix(self.search_step_penalty),
            search_descent: fix(self.search_descent),
            search_forward: fix(self.search_forward),
            search_speed_penalty: fix(self.search_speed_penalty),
            extraction_distance: fix(self.extraction_distance),
            pre_milestone_force: fix(self.pre_milestone_force),
            pre_milestone_velocity: fix(self.pre_milestone_velocity),
            milestone_bonus: fix(self.milestone_bonus),
            milestone_lift: fix(self.milestone_lift),
            milestone_height: fix(self.milestone_height),
            milestone_clearance: fix(self.milestone_clearance),
            advisor_score: fix(self.advisor_score),
        }
    }
}
