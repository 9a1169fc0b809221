// The slice of a physics body the character code reads and writes

use glam::Vec2;
use rapier2d::prelude::RigidBody;

use crate::engine::physics::{from_vector, to_vector};

/// Velocity-level access to a character's physics body
///
/// Locomotion never moves the character directly: it only reads and assigns
/// velocity and gravity scale, and the physics service integrates position.
pub trait CharacterBody {
    fn velocity(&self) -> Vec2;
    fn set_velocity(&mut self, velocity: Vec2);
    fn gravity_scale(&self) -> f32;
    fn set_gravity_scale(&mut self, scale: f32);
    /// Instantaneous impulse; the velocity change depends on the body's mass
    fn apply_impulse(&mut self, impulse: Vec2);
}

impl CharacterBody for RigidBody {
    fn velocity(&self) -> Vec2 {
        from_vector(self.linvel())
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.set_linvel(to_vector(velocity), true);
    }

    fn gravity_scale(&self) -> f32 {
        RigidBody::gravity_scale(self)
    }

    fn set_gravity_scale(&mut self, scale: f32) {
        RigidBody::set_gravity_scale(self, scale, true);
    }

    fn apply_impulse(&mut self, impulse: Vec2) {
        RigidBody::apply_impulse(self, to_vector(impulse), true);
    }
}
