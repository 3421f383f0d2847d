use rapier2d::prelude::*;

use super::collision::{CollisionEvent as GameCollisionEvent, CollisionEventQueue};

/// Handle to identify rigid bodies
pub type RigidBodyHandle = rapier2d::prelude::RigidBodyHandle;

/// Handle to identify colliders
pub type ColliderHandle = rapier2d::prelude::ColliderHandle;

/// Physics world that manages all physics simulation
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

    /// Query pipeline for raycasts and shape casts
    query_pipeline: QueryPipeline,

    /// Rigid body set
    rigid_body_set: RigidBodySet,

    /// Collider set
    collider_set: ColliderSet,

    /// Collision event handler
    collision_event_queue: CollisionEventQueue,
}

impl PhysicsWorld {
    /// Create a new physics world with default settings
    pub fn new() -> Self {
        Self::with_gravity(vector![0.0, -9.81])
    }

    /// Create a new physics world with custom gravity
    pub fn with_gravity(gravity: Vector<Real>) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        // Fixed timestep of 1/60 seconds (60 FPS)
        integration_parameters.dt = 1.0 / 60.0;

        Self {
            gravity,
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
            collision_event_queue: CollisionEventQueue::new(),
        }
    }

    /// Step the physics simulation forward by one timestep
    pub fn step(&mut self) {
        // Clear previous frame's collision events
        self.collision_event_queue.clear();

        let event_handler = &self.collision_event_queue;

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
            event_handler,
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

    /// Get a reference to a rigid body
    pub fn get_rigid_body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.rigid_body_set.get(handle)
    }

    /// Get a mutable reference to a rigid body
    pub fn get_rigid_body_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut RigidBody> {
        self.rigid_body_set.get_mut(handle)
    }

    /// Get a reference to a collider
    pub fn get_collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.collider_set.get(handle)
    }

    /// Cast a ray and return the first hit
    pub fn raycast(
        &self,
        ray_origin: Vector<Real>,
        ray_dir: Vector<Real>,
        max_toi: Real,
        solid: bool,
        filter: QueryFilter,
    ) -> Option<(ColliderHandle, Real)> {
        let ray = Ray::new(point![ray_origin.x, ray_origin.y], ray_dir);
        self.query_pipeline.cast_ray(
            &self.rigid_body_set,
            &self.collider_set,
            &ray,
            max_toi,
            solid,
            filter,
        )
    }

    /// Get all collision events from this frame
    pub fn get_collision_events(&self) -> Vec<GameCollisionEvent> {
        self.collision_event_queue.events()
    }

    /// Get current gravity
    pub fn gravity(&self) -> Vector<Real> {
        self.gravity
    }

    /// Set the timestep for physics simulation
    pub fn set_timestep(&mut self, dt: Real) {
        self.integration_parameters.dt = dt;
    }

    /// Get the current timestep
    pub fn timestep(&self) -> Real {
        self.integration_parameters.dt
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

    #[test]
    fn test_world_creation() {
        let world = PhysicsWorld::new();
        assert_eq!(world.gravity().y, -9.81);
        assert!((world.timestep() - 1.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_dynamic_body_falls() {
        let mut world = PhysicsWorld::new();
        let handle = world.add_rigid_body(presets::player_body(0.0, 10.0));
        world.add_collider(presets::player_collider(1.0, 2.0), handle);

        for _ in 0..30 {
            world.step();
        }

        let body = world.get_rigid_body(handle).unwrap();
        assert!(
            body.translation().y < 10.0,
            "body should fall under gravity"
        );
    }

    #[test]
    fn test_raycast_hits_platform() {
        let mut world = PhysicsWorld::new();
        let platform = world.add_rigid_body(presets::platform_body(0.0, 0.0));
        world.add_collider(presets::platform_collider(10.0, 1.0), platform);
        world.step();

        let hit = world.raycast(
            vector![0.0, 5.0],
            vector![0.0, -1.0],
            10.0,
            true,
            QueryFilter::default(),
        );
        assert!(hit.is_some(), "ray pointing at the platform should hit");

        let miss = world.raycast(
            vector![0.0, 5.0],
            vector![0.0, 1.0],
            10.0,
            true,
            QueryFilter::default(),
        );
        assert!(miss.is_none(), "ray pointing away should miss");
    }

    #[test]
    fn test_set_timestep() {
        let mut world = PhysicsWorld::new();
        world.set_timestep(1.0 / 120.0);
        assert!((world.timestep() - 1.0 / 120.0).abs() < 1e-6);
    }
}
