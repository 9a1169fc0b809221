// Environment sensing: ground check and wall rays

use glam::Vec2;

use super::SetupError;
use crate::engine::physics::{
    to_vector, CollisionGroups, PhysicsWorld, QueryFilter, RigidBodyHandle,
};

/// A wall hit by one of the wall rays
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallContact {
    /// x component of the wall's surface normal (points away from the wall)
    pub normal_x: f32,
}

/// Stateless environment queries the locomotion agent consumes each frame
///
/// Queries have no side effects and give the same answer when repeated within
/// a frame. No contact is a normal answer, not an error.
pub trait EnvironmentSensor {
    /// True if the ground check circle overlaps the ground layer
    fn is_grounded(&self) -> bool;

    /// Cast both wall rays along `facing_sign`; the primary ray wins ties
    fn wall_contact(&self, facing_sign: f32) -> Option<WallContact>;
}

/// Where the checks sit relative to the body origin, for a right-facing body
///
/// Wall check offsets are mirrored on x when the character faces left.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorConfig {
    pub ground_check_offset: Vec2,
    pub ground_check_radius: f32,
    pub wall_primary_offset: Vec2,
    pub wall_secondary_offset: Vec2,
    pub wall_check_distance: f32,
}

impl SensorConfig {
    /// Check placement for a collider of the given size
    pub fn for_dimensions(width: f32, height: f32) -> Self {
        let inset = width * 0.4;
        Self {
            ground_check_offset: Vec2::new(0.0, -height / 2.0),
            ground_check_radius: 0.1,
            wall_primary_offset: Vec2::new(inset, height / 4.0),
            wall_secondary_offset: Vec2::new(inset, -height / 4.0),
            wall_check_distance: 0.5,
        }
    }

    pub fn validate(&self) -> Result<(), SetupError> {
        if !self.ground_check_radius.is_finite() || self.ground_check_radius <= 0.0 {
            return Err(SetupError::InvalidStat {
                name: "ground_check_radius",
                value: self.ground_check_radius,
            });
        }
        if !self.wall_check_distance.is_finite() || self.wall_check_distance <= 0.0 {
            return Err(SetupError::InvalidStat {
                name: "wall_check_distance",
                value: self.wall_check_distance,
            });
        }
        Ok(())
    }
}

/// Sensor backed by scene queries against the physics world
pub struct PhysicsSensor<'a> {
    world: &'a PhysicsWorld,
    body: RigidBodyHandle,
    config: &'a SensorConfig,
}

impl<'a> PhysicsSensor<'a> {
    pub fn new(world: &'a PhysicsWorld, body: RigidBodyHandle, config: &'a SensorConfig) -> Self {
        Self {
            world,
            body,
            config,
        }
    }

    fn origin(&self) -> Option<Vec2> {
        self.world
            .get_rigid_body(self.body)
            .map(|body| Vec2::new(body.translation().x, body.translation().y))
    }

    fn filter(&self) -> QueryFilter<'static> {
        QueryFilter::default()
            .groups(CollisionGroups::Terrain.query_only())
            .exclude_rigid_body(self.body)
    }

    fn cast_wall_ray(&self, origin: Vec2, offset: Vec2, facing: f32) -> Option<WallContact> {
        let start = origin + Vec2::new(offset.x * facing, offset.y);
        self.world
            .raycast(
                to_vector(start),
                to_vector(Vec2::new(facing, 0.0)),
                self.config.wall_check_distance,
                self.filter(),
            )
            .map(|hit| WallContact {
                normal_x: hit.normal.x,
            })
    }
}

impl EnvironmentSensor for PhysicsSensor<'_> {
    fn is_grounded(&self) -> bool {
        let Some(origin) = self.origin() else {
            return false;
        };
        let center = origin + self.config.ground_check_offset;
        self.world
            .overlap_circle(to_vector(center), self.config.ground_check_radius, self.filter())
    }

    fn wall_contact(&self, facing_sign: f32) -> Option<WallContact> {
        let origin = self.origin()?;
        let facing = if facing_sign < 0.0 { -1.0 } else { 1.0 };
        self.cast_wall_ray(origin, self.config.wall_primary_offset, facing)
            .or_else(|| self.cast_wall_ray(origin, self.config.wall_secondary_offset, facing))
    }
}

/// Sensor answers frozen for one frame
///
/// Capturing once per frame lets the physics world be borrowed mutably for
/// velocity writes while the agent still reads sensor results.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SensorSnapshot {
    pub grounded: bool,
    pub wall: Option<WallContact>,
}

impl SensorSnapshot {
    pub fn capture(sensor: &dyn EnvironmentSensor, facing_sign: f32) -> Self {
        Self {
            grounded: sensor.is_grounded(),
            wall: sensor.wall_contact(facing_sign),
        }
    }

    pub fn airborne() -> Self {
        Self::default()
    }

    pub fn grounded() -> Self {
        Self {
            grounded: true,
            wall: None,
        }
    }

    /// Airborne against a wall with the given normal
    pub fn on_wall(normal_x: f32) -> Self {
        Self {
            grounded: false,
            wall: Some(WallContact { normal_x }),
        }
    }
}

impl EnvironmentSensor for SensorSnapshot {
    fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn wall_contact(&self, _facing_sign: f32) -> Option<WallContact> {
        self.wall
    }
}
