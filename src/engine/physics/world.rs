use rapier2d::parry::shape::Ball;
use rapier2d::prelude::*;

use crate::engine::game_loop::FIXED_TIMESTEP;

/// Handle to identify rigid bodies
pub type RigidBodyHandle = rapier2d::prelude::RigidBodyHandle;

/// Handle to identify colliders
pub type ColliderHandle = rapier2d::prelude::ColliderHandle;

/// A ray hit with its surface normal
#[derive(Debug, Clone, Copy)]
pub struct RayHit {
    pub collider: ColliderHandle,
    pub distance: Real,
    pub normal: Vector<Real>,
}

/// Physics world that manages all physics simulation
///
/// This is the collision service the game code leans on: overlap and ray
/// queries for sensing, and velocity integration through `step`.
pub struct PhysicsWorld {
    /// Gravity vector (default: -9.81 m/s² in y-axis)
    gravity: Vector<Real>,

    /// Integration parameters for the physics simulation
    integration_parameters: IntegrationParameters,

    /// Physics pipeline handles collision detection and solving
    physics_pipeline: PhysicsPipeline,

    /// Island manager for sleeping bodies
    island_manager: IslandManager,

    /// Broad phase collision detection
    broad_phase: DefaultBroadPhase,

    /// Narrow phase collision detection
    narrow_phase: NarrowPhase,

    /// Impulse joint set
    impulse_joint_set: ImpulseJointSet,

    /// Multibody joint set
    multibody_joint_set: MultibodyJointSet,

    /// CCD solver for fast-moving objects
    ccd_solver: CCDSolver,

    /// Query pipeline for raycasts and overlap tests, refreshed every step
    query_pipeline: QueryPipeline,

    /// Rigid body set
    rigid_body_set: RigidBodySet,

    /// Collider set
    collider_set: ColliderSet,
}

impl PhysicsWorld {
    /// Create a new physics world stepping at the game loop's fixed rate
    pub fn new() -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = FIXED_TIMESTEP;

        Self {
            gravity: vector![0.0, -9.81],
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
        }
    }

    /// Step the physics simulation forward by one timestep
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }

    /// Add a rigid body to the physics world
    pub fn add_rigid_body(&mut self, body: RigidBody) -> RigidBodyHandle {
        self.rigid_body_set.insert(body)
    }

    /// Add a collider attached to a rigid body
    pub fn add_collider(
        &mut self,
        collider: Collider,
        parent_handle: RigidBodyHandle,
    ) -> ColliderHandle {
        self.collider_set
            .insert_with_parent(collider, parent_handle, &mut self.rigid_body_set)
    }

    /// Remove a rigid body and all its attached colliders
    pub fn remove_rigid_body(&mut self, handle: RigidBodyHandle) {
        self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true, // remove attached colliders
        );
    }

    /// Get a reference to a rigid body
    pub fn get_rigid_body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.rigid_body_set.get(handle)
    }

    /// Get a mutable reference to a rigid body
    pub fn get_rigid_body_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut RigidBody> {
        self.rigid_body_set.get_mut(handle)
    }

    /// Cast a ray and return the first hit along with its surface normal
    pub fn raycast(
        &self,
        ray_origin: Vector<Real>,
        ray_dir: Vector<Real>,
        max_toi: Real,
        filter: QueryFilter,
    ) -> Option<RayHit> {
        let ray = Ray::new(point![ray_origin.x, ray_origin.y], ray_dir);
        self.query_pipeline
            .cast_ray_and_get_normal(
                &self.rigid_body_set,
                &self.collider_set,
                &ray,
                max_toi,
                true,
                filter,
            )
            .map(|(collider, hit)| RayHit {
                collider,
                distance: hit.time_of_impact,
                normal: hit.normal,
            })
    }

    /// Test whether a circle at `center` overlaps any collider passing `filter`
    pub fn overlap_circle(&self, center: Vector<Real>, radius: Real, filter: QueryFilter) -> bool {
        let shape = Ball::new(radius);
        let shape_pos = Isometry::translation(center.x, center.y);
        self.query_pipeline
            .intersection_with_shape(
                &self.rigid_body_set,
                &self.collider_set,
                &shape_pos,
                &shape,
                filter,
            )
            .is_some()
    }

    /// Get current gravity
    pub fn gravity(&self) -> Vector<Real> {
        self.gravity
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics::body::presets;
    use crate::engine::physics::CollisionGroups;

    fn world_with_floor() -> PhysicsWorld {
        let mut world = PhysicsWorld::new();
        let floor = world.add_rigid_body(presets::terrain_body(0.0, -0.5));
        world.add_collider(presets::terrain_collider(20.0, 1.0), floor);
        // Refresh the query pipeline
        world.step();
        world
    }

    #[test]
    fn test_steps_at_game_loop_rate() {
        let world = PhysicsWorld::new();
        assert_eq!(world.integration_parameters.dt, FIXED_TIMESTEP);
        assert_eq!(world.gravity, vector![0.0, -9.81]);
    }

    #[test]
    fn test_overlap_circle_hits_floor() {
        let world = world_with_floor();
        let filter = QueryFilter::default().groups(CollisionGroups::Terrain.query_only());

        assert!(world.overlap_circle(vector![0.0, 0.05], 0.1, filter));
        assert!(!world.overlap_circle(vector![0.0, 1.0], 0.1, filter));
    }

    #[test]
    fn test_raycast_reports_normal() {
        let world = world_with_floor();
        let filter = QueryFilter::default().groups(CollisionGroups::Terrain.query_only());

        let hit = world
            .raycast(vector![0.0, 1.0], vector![0.0, -1.0], 5.0, filter)
            .expect("ray should hit the floor");
        assert!((hit.distance - 1.0).abs() < 0.001);
        assert!(hit.normal.y > 0.99);
    }
}
