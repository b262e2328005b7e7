//! Kinematic contact model.
//!
//! A lightweight stand-in for the rigid-body simulator: the end effector is a
//! velocity-controlled point above a soft medium (surface at z = 0) holding
//! a stiff embedded object. Good enough to exercise the reward engine end to
//! end without a physics engine.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::domain::models::{Action, PhysicsConfig, Vec3};
use crate::domain::ports::Physics;

/// Geometry and material constants of the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactScene {
    /// End-effector position at rest.
    pub rest_position: Vec3,
    /// Speed commanded by a unit action, in m/s.
    pub max_speed: f64,
    /// Spring constant of the medium against penetration, N/m.
    pub medium_stiffness: f64,
    /// Drag coefficient of the medium along X and Y, N·s/m.
    pub medium_drag: f64,
    /// Top face of the embedded object.
    pub object_top: f64,
    /// X extent of the embedded object.
    pub object_x_range: (f64, f64),
    /// Spring constant of the object surface, N/m.
    pub object_stiffness: f64,
    /// Deepest the tool can press into the object.
    pub object_compliance: f64,
}

impl Default for ContactScene {
    fn default() -> Self {
        Self {
            rest_position: Vec3::new(0.0, 0.0, 0.05),
            max_speed: 0.1,
            medium_stiffness: 10.0,
            medium_drag: 4.0,
            object_top: -0.03,
            object_x_range: (-0.15, 0.05),
            object_stiffness: 500.0,
            object_compliance: 0.005,
        }
    }
}

impl ContactScene {
    fn over_object(&self, x: f64) -> bool {
        x >= self.object_x_range.0 && x <= self.object_x_range.1
    }

    /// Contact force on the tool sensor at `position` moving with `velocity`.
    fn contact_force(&self, position: Vec3, velocity: Vec3) -> Vec3 {
        let depth = (-position.z).max(0.0);
        if depth == 0.0 {
            return Vec3::ZERO;
        }

        let mut fz = -self.medium_stiffness * depth;
        if self.over_object(position.x) && position.z < self.object_top {
            fz -= self.object_stiffness * (self.object_top - position.z);
        }

        Vec3::new(
            self.medium_drag * velocity.x,
            self.medium_drag * velocity.y,
            fz,
        )
    }
}

/// Point-mass physics over a [`ContactScene`].
pub struct KinematicPhysics {
    scene: ContactScene,
    perturbation: f64,
    substeps: u32,
    timestep: f64,
    rng: ChaCha8Rng,
    position: Vec3,
    velocity: Vec3,
    force: Vec3,
}

impl KinematicPhysics {
    pub fn new(config: &PhysicsConfig) -> Self {
        Self::with_scene(config, ContactScene::default())
    }

    pub fn with_scene(config: &PhysicsConfig, scene: ContactScene) -> Self {
        let position = scene.rest_position;
        Self {
            scene,
            perturbation: config.perturbation,
            substeps: config.frame_skip.max(1),
            timestep: config.timestep,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            position,
            velocity: Vec3::ZERO,
            force: Vec3::ZERO,
        }
    }

    pub const fn scene(&self) -> &ContactScene {
        &self.scene
    }

    pub const fn position(&self) -> Vec3 {
        self.position
    }

    fn jitter(&mut self) -> f64 {
        if self.perturbation > 0.0 {
            self.rng.gen_range(-self.perturbation..=self.perturbation)
        } else {
            0.0
        }
    }

    fn sensors(&self) -> Vec<f64> {
        vec![
            self.position.x,
            self.position.y,
            self.position.z,
            self.velocity.x,
            self.velocity.y,
            self.velocity.z,
            self.force.x,
            self.force.y,
            self.force.z,
        ]
    }

    fn substep(&mut self, command: Vec3) {
        let mut next = Vec3::new(
            self.position.x + command.x * self.timestep,
            self.position.y + command.y * self.timestep,
            self.position.z + command.z * self.timestep,
        );

        let floor = self.scene.object_top - self.scene.object_compliance;
        if self.scene.over_object(next.x) && next.z < floor {
            next.z = floor;
        }

        self.velocity = Vec3::new(
            (next.x - self.position.x) / self.timestep,
            (next.y - self.position.y) / self.timestep,
            (next.z - self.position.z) / self.timestep,
        );
        self.position = next;
    }
}

impl Physics for KinematicPhysics {
    fn name(&self) -> &'static str {
        "kinematic"
    }

    fn reset(&mut self) -> Vec<f64> {
        let rest = self.scene.rest_position;
        self.position = Vec3::new(
            rest.x + self.jitter(),
            rest.y + self.jitter(),
            rest.z + self.jitter(),
        );
        self.velocity = Vec3::new(self.jitter(), self.jitter(), self.jitter());
        self.force = self.scene.contact_force(self.position, self.velocity);
        debug!(position = %self.position, "kinematic scene reset");
        self.sensors()
    }

    fn advance(&mut self, action: &Action) -> Vec<f64> {
        let [ax, ay, az] = *action.clamped().components();
        let speed = self.scene.max_speed;
        let command = Vec3::new(ax * speed, ay * speed, az * speed);

        for _ in 0..self.substeps {
            self.substep(command);
        }
        self.force = self.scene.contact_force(self.position, self.velocity);
        self.sensors()
    }
}
