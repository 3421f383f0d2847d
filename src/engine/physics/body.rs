use super::collision::CollisionGroups;
use rapier2d::prelude::*;

pub use rapier2d::prelude::{ColliderHandle, RigidBodyHandle};

/// Builder for creating rigid bodies with common configurations
pub struct BodyBuilder {
    body_type: RigidBodyType,
    position: Isometry<Real>,
    linvel: Vector<Real>,
    gravity_scale: Real,
    can_sleep: bool,
    locked_axes: LockedAxes,
}

impl BodyBuilder {
    /// Create a new dynamic body (affected by forces and collisions)
    pub fn new_dynamic() -> Self {
        Self {
            body_type: RigidBodyType::Dynamic,
            position: Isometry::identity(),
            linvel: Vector::zeros(),
            gravity_scale: 1.0,
            can_sleep: true,
            locked_axes: LockedAxes::empty(),
        }
    }

    /// Create a new fixed (static) body (completely immovable)
    pub fn new_fixed() -> Self {
        Self {
            body_type: RigidBodyType::Fixed,
            position: Isometry::identity(),
            linvel: Vector::zeros(),
            gravity_scale: 0.0,
            can_sleep: false,
            locked_axes: LockedAxes::empty(),
        }
    }

    /// Set the initial position of the body
    pub fn position(mut self, x: Real, y: Real) -> Self {
        self.position = Isometry::translation(x, y);
        self
    }

    /// Set the initial linear velocity
    pub fn linvel(mut self, x: Real, y: Real) -> Self {
        self.linvel = vector![x, y];
        self
    }

    /// Set the gravity scale (1.0 = normal gravity, 0.0 = no gravity)
    pub fn gravity_scale(mut self, scale: Real) -> Self {
        self.gravity_scale = scale;
        self
    }

    /// Set whether the body can sleep when inactive
    pub fn can_sleep(mut self, can_sleep: bool) -> Self {
        self.can_sleep = can_sleep;
        self
    }

    /// Lock rotation (useful for player characters)
    pub fn lock_rotation(mut self) -> Self {
        self.locked_axes = LockedAxes::ROTATION_LOCKED;
        self
    }

    /// Build the rigid body
    pub fn build(self) -> RigidBody {
        let mut body = RigidBodyBuilder::new(self.body_type)
            .position(self.position)
            .linvel(self.linvel)
            .gravity_scale(self.gravity_scale)
            .can_sleep(self.can_sleep)
            .locked_axes(self.locked_axes)
            .build();

        if self.body_type == RigidBodyType::Dynamic {
            body.set_linear_damping(0.5);
            body.set_angular_damping(1.0);
        }

        body
    }
}

/// Builder for creating colliders with common configurations
pub struct ColliderBuilder2D {
    shape: SharedShape,
    collision_groups: CollisionGroups,
    is_sensor: bool,
    friction: Real,
    restitution: Real,
    density: Real,
    active_events: ActiveEvents,
}

impl ColliderBuilder2D {
    /// Create a box-shaped collider
    pub fn box_shape(half_width: Real, half_height: Real) -> Self {
        Self {
            shape: SharedShape::cuboid(half_width, half_height),
            collision_groups: CollisionGroups::Default,
            is_sensor: false,
            friction: 0.5,
            restitution: 0.0,
            density: 1.0,
            active_events: ActiveEvents::COLLISION_EVENTS,
        }
    }

    /// Create a capsule-shaped collider (good for characters)
    pub fn capsule(half_height: Real, radius: Real) -> Self {
        let a = point![0.0, -half_height];
        let b = point![0.0, half_height];
        Self {
            shape: SharedShape::capsule(a, b, radius),
            collision_groups: CollisionGroups::Default,
            is_sensor: false,
            friction: 0.5,
            restitution: 0.0,
            density: 1.0,
            active_events: ActiveEvents::COLLISION_EVENTS,
        }
    }

    /// Set the collision groups for filtering
    pub fn collision_groups(mut self, groups: CollisionGroups) -> Self {
        self.collision_groups = groups;
        self
    }

    /// Make this a sensor (detects collisions but doesn't cause physical response)
    pub fn sensor(mut self, is_sensor: bool) -> Self {
        self.is_sensor = is_sensor;
        self
    }

    /// Set friction coefficient (0.0 = no friction, 1.0 = high friction)
    pub fn friction(mut self, friction: Real) -> Self {
        self.friction = friction;
        self
    }

    /// Set restitution/bounciness (0.0 = no bounce, 1.0 = perfect bounce)
    pub fn restitution(mut self, restitution: Real) -> Self {
        self.restitution = restitution;
        self
    }

    /// Set density (mass will be calculated from shape volume)
    pub fn density(mut self, density: Real) -> Self {
        self.density = density;
        self
    }

    /// Build the collider
    pub fn build(self) -> Collider {
        rapier2d::prelude::ColliderBuilder::new(self.shape)
            .collision_groups(self.collision_groups.to_interaction_groups())
            .sensor(self.is_sensor)
            .friction(self.friction)
            .restitution(self.restitution)
            .active_events(self.active_events)
            .density(self.density)
            .build()
    }
}

/// Common rigid body configurations for game objects
pub mod presets {
    use super::*;

    /// Create a player character body (dynamic, rotation locked)
    pub fn player_body(x: Real, y: Real) -> RigidBody {
        BodyBuilder::new_dynamic()
            .position(x, y)
            .lock_rotation()
            .gravity_scale(1.0)
            .can_sleep(false) // The player should never sleep
            .build()
    }

    /// Create a player character collider (capsule shape)
    pub fn player_collider(width: Real, height: Real) -> Collider {
        let radius = width / 2.0;
        let half_height = (height / 2.0) - radius; // Subtract radius to get capsule half-height

        ColliderBuilder2D::capsule(half_height, radius)
            .collision_groups(CollisionGroups::Player)
            .friction(0.0) // No friction for smooth movement
            .restitution(0.0) // No bounce
            .density(1.0)
            .build()
    }

    /// Create a platform body (fixed/static)
    pub fn platform_body(x: Real, y: Real) -> RigidBody {
        BodyBuilder::new_fixed().position(x, y).build()
    }

    /// Create a platform collider (box shape)
    pub fn platform_collider(width: Real, height: Real) -> Collider {
        ColliderBuilder2D::box_shape(width / 2.0, height / 2.0)
            .collision_groups(CollisionGroups::Platform)
            .friction(0.3)
            .restitution(0.0)
            .build()
    }

    /// Create a hazard collider (box shape, reports contacts with the player)
    pub fn hazard_collider(width: Real, height: Real) -> Collider {
        ColliderBuilder2D::box_shape(width / 2.0, height / 2.0)
            .collision_groups(CollisionGroups::Hazard)
            .friction(0.3)
            .restitution(0.0)
            .build()
    }

    /// Create a checkpoint sensor (detects the player, doesn't block)
    pub fn checkpoint_sensor(width: Real, height: Real) -> Collider {
        ColliderBuilder2D::box_shape(width / 2.0, height / 2.0)
            .collision_groups(CollisionGroups::Checkpoint)
            .sensor(true)
            .build()
    }
}
