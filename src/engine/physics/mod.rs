// Physics system using rapier2d

pub mod body;
mod collision;
mod world;

pub use body::{BodyBuilder, ColliderBuilder2D, ColliderHandle, RigidBodyHandle};
pub use collision::CollisionGroups;
pub use world::{PhysicsWorld, RayHit};

// Re-export commonly used rapier types for convenience
pub use rapier2d::prelude::{vector, QueryFilter, Real, RigidBody, Vector};
use rapier2d::prelude::nalgebra;

/// Convert a glam vector into rapier's vector type
pub fn to_vector(v: glam::Vec2) -> Vector<Real> {
    vector![v.x, v.y]
}

/// Convert a rapier vector into glam
pub fn from_vector(v: &Vector<Real>) -> glam::Vec2 {
    glam::Vec2::new(v.x, v.y)
}
