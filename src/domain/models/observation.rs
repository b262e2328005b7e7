//! Sensor observation and actuator command types.
//!
//! The physics collaborator emits a flat vector of nine floats per tick:
//! end-effector position, velocity and contact force, three axes each.
//! [`Observation::from_raw`] slices that vector into typed feature groups.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::errors::{DomainError, DomainResult};

/// Number of values in a raw sensor vector.
pub const OBSERVATION_DIM: usize = 9;

/// Number of actuated axes driven by an [`Action`].
pub const ACTION_DIM: usize = 3;

/// A three-axis vector (X, Y, Z).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X={:?}, Y={:?}, Z={:?}", self.x, self.y, self.z)
    }
}

/// One tick of sensor feedback split into feature groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// End-effector position.
    pub position: Vec3,
    /// End-effector velocity.
    pub velocity: Vec3,
    /// Contact force at the end effector.
    pub force: Vec3,
}

impl Observation {
    pub const fn new(position: Vec3, velocity: Vec3, force: Vec3) -> Self {
        Self {
            position,
            velocity,
            force,
        }
    }

    /// Slice a raw sensor vector into position, velocity and force.
    ///
    /// Only the shape is checked here; non-finite values pass through and are
    /// handled by the termination policy.
    pub fn from_raw(raw: &[f64]) -> DomainResult<Self> {
        if raw.len() != OBSERVATION_DIM {
            return Err(DomainError::MalformedObservation {
                expected: OBSERVATION_DIM,
                actual: raw.len(),
            });
        }

        Ok(Self {
            position: Vec3::new(raw[0], raw[1], raw[2]),
            velocity: Vec3::new(raw[3], raw[4], raw[5]),
            force: Vec3::new(raw[6], raw[7], raw[8]),
        })
    }

    /// Observation with every channel set to NaN.
    ///
    /// Stands in for a vector that could not be sliced, so the tick still
    /// flows through the reward and termination path.
    pub const fn non_finite() -> Self {
        let nan = Vec3::new(f64::NAN, f64::NAN, f64::NAN);
        Self::new(nan, nan, nan)
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite() && self.force.is_finite()
    }
}

/// Actuator command for one tick, nominally in [-1, 1] per axis.
///
/// The core forwards actions untouched; range enforcement belongs to the
/// physics collaborator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Action(pub [f64; ACTION_DIM]);

impl Action {
    pub const IDLE: Self = Self([0.0; ACTION_DIM]);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self([x, y, z])
    }

    /// Copy with every component clamped to [-1, 1]. NaN maps to 0.
    pub fn clamped(&self) -> Self {
        Self(self.0.map(|v| if v.is_nan() { 0.0 } else { v.clamp(-1.0, 1.0) }))
    }

    pub const fn components(&self) -> &[f64; ACTION_DIM] {
        &self.0
    }
}
