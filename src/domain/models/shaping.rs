//! Fixed shaping constants and the bump/clip primitives of the reward.
//!
//! The thresholds are tied to the task geometry (force units and metres) and
//! are not part of the configuration.

/// EMA smoothing factor applied to the contact force magnitude.
pub const FORCE_EMA_ALPHA: f64 = 0.2;

/// Smoothed force at or above which the embedded object counts as found.
pub const DISCOVERY_FORCE_THRESHOLD: f64 = 1.0;

/// Lateral retreat beyond which the withdrawal milestone latches.
pub const MILESTONE_LATERAL_DISTANCE: f64 = 0.2;

/// Lateral retreat beyond which the episode ends.
pub const TERMINATION_LATERAL_DISTANCE: f64 = 0.3;

/// Per-tick penalty factor on |lateral velocity| while the advisor is enabled.
pub const ADVISOR_LATERAL_PENALTY: f64 = 1000.0;

/// Scale applied to the advisor's raw score.
pub const ADVISOR_SCORE_SCALE: f64 = 10.0;

/// Scaled advisor scores at or below this are subtracted, above it added.
pub const ADVISOR_PASS_MARK: f64 = 80.0;

/// One-off bonus on the discovery tick.
pub const DISCOVERY_BONUS: f64 = 100.0;

/// Searching phase terms.
pub mod search {
    /// Constant per-tick penalty while nothing has been found.
    pub const STEP_PENALTY: f64 = -10.0;
    /// Downward speed giving the full descent reward.
    pub const DESCENT_SPEED: f64 = 0.1;
    pub const DESCENT_MAX: f64 = 10.0;
    /// Preferred forward (X) velocity.
    pub const FORWARD_VELOCITY: f64 = -0.05;
    pub const FORWARD_STD: f64 = 0.1;
    pub const FORWARD_MAX: f64 = 10.0;
    /// |v_x| above this is penalised.
    pub const SPEED_LIMIT: f64 = 0.05;
    pub const SPEED_PENALTY: f64 = -50.0;
}

/// Terms applied every tick once the object is found.
pub mod extraction {
    pub const DISTANCE_TARGET: f64 = 0.3;
    pub const DISTANCE_STD: f64 = 0.05;
    pub const DISTANCE_MAX: f64 = 50.0;
}

/// Terms applied after discovery while the milestone is still pending.
pub mod pre_milestone {
    /// Preferred horizontal contact force.
    pub const FORCE_TARGET: f64 = -0.4;
    pub const FORCE_STD: f64 = 0.1;
    pub const FORCE_MAX: f64 = 10.0;
    /// Gain on backward (−X) velocity.
    pub const VELOCITY_GAIN: f64 = 100.0;
    pub const VELOCITY_MAX: f64 = 10.0;
}

/// One-off terms on the tick the withdrawal milestone latches.
pub mod milestone {
    pub const BONUS: f64 = 20.0;
    /// Upward speed giving the full lift reward.
    pub const LIFT_SPEED: f64 = 0.1;
    pub const LIFT_MAX: f64 = 50.0;
    pub const HEIGHT_TARGET: f64 = 0.1;
    pub const HEIGHT_STD: f64 = 0.05;
    pub const HEIGHT_MAX: f64 = 50.0;
    /// Vertical offset above which the clearance bonus is granted.
    pub const CLEARANCE_FLOOR: f64 = -0.1;
    pub const CLEARANCE_BONUS: f64 = 100.0;
}

/// Clamp `value` into `[low, high]`, propagating NaN.
pub fn clip(value: f64, low: f64, high: f64) -> f64 {
    if value < low {
        low
    } else if value > high {
        high
    } else {
        value
    }
}

/// `clip(scale * exp(-(x - center)^2 / (2 std^2)), low, high)`.
pub fn clipped_bump(x: f64, center: f64, std: f64, scale: f64, low: f64, high: f64) -> f64 {
    let d = x - center;
    clip(scale * (-(d * d) / (2.0 * std * std)).exp(), low, high)
}

/// Gaussian bump peaking at `max`, clipped to `[0, max]`.
pub fn bump(x: f64, center: f64, std: f64, max: f64) -> f64 {
    clipped_bump(x, center, std, max, 0.0, max)
}
