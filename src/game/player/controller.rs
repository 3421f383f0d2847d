// Player movement controller

use crate::engine::input::{Action, PlayerInput};
use crate::engine::physics::{PhysicsWorld, RigidBodyHandle, Vector};

use super::animation::AnimationPlayer;
use super::stats::PlayerStats;

/// Applies input to the player's physics body.
///
/// The controller is the "control surface" the death cycle switches off:
/// while `set_dead_state(true)` is in effect, no input reaches the body and
/// no movement animation is selected.
#[derive(Debug)]
pub struct PlayerController {
    /// Handle to the player's rigid body in the physics world
    body: RigidBodyHandle,

    /// Movement tuning
    stats: PlayerStats,

    /// Set by the death cycle; gates all control logic
    dead: bool,

    /// Direction the player is facing (1 = right, -1 = left)
    facing: f32,
}

impl PlayerController {
    /// Create a controller for an existing player body
    pub fn new(body: RigidBodyHandle, stats: PlayerStats) -> Self {
        Self {
            body,
            stats,
            dead: false,
            facing: 1.0,
        }
    }

    /// Mark the player as dead or alive; while dead the controller is inert
    pub fn set_dead_state(&mut self, dead: bool) {
        self.dead = dead;
    }

    /// Whether the controller is currently marked dead
    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Direction the player is facing (1 = right, -1 = left)
    pub fn facing(&self) -> f32 {
        self.facing
    }

    /// The body this controller drives
    pub fn body(&self) -> RigidBodyHandle {
        self.body
    }

    /// Apply input to the body and pick a movement animation
    pub fn update(
        &mut self,
        input: &PlayerInput,
        physics: &mut PhysicsWorld,
        animation: &mut AnimationPlayer,
    ) {
        if self.dead {
            return;
        }

        let grounded = self.is_grounded(physics);
        let horizontal = input.horizontal_axis();

        let Some(body) = physics.get_rigid_body(self.body) else {
            return;
        };
        let mut velocity = *body.linvel();

        // Horizontal movement
        if horizontal.abs() > 0.1 {
            velocity.x = if grounded {
                horizontal * self.stats.move_speed
            } else {
                horizontal * self.stats.move_speed * self.stats.air_control
            };

            // Update facing direction
            self.facing = if horizontal > 0.0 { 1.0 } else { -1.0 };
        } else if grounded {
            // Stop on ground when no input
            velocity.x = 0.0;
        }
        // In air: maintain current velocity when no input

        // Jump
        if input.just_pressed(Action::Jump) && grounded {
            velocity.y = self.stats.jump_force;
        }

        if let Some(body) = physics.get_rigid_body_mut(self.body) {
            body.set_linvel(velocity, true);
        }

        self.select_animation(animation, grounded, horizontal, velocity.y);
    }

    /// Check if the player is on the ground using a downward raycast
    pub fn is_grounded(&self, physics: &PhysicsWorld) -> bool {
        use rapier2d::prelude::QueryFilter;

        let Some(body) = physics.get_rigid_body(self.body) else {
            return false;
        };

        let position = body.translation();
        let half_height = self.stats.height / 2.0;

        // Cast a ray downward from the player's feet
        let ray_origin = Vector::new(position.x, position.y - half_height + 0.1);
        let ray_direction = Vector::new(0.0, -1.0);
        let max_distance = 0.2;

        physics
            .raycast(
                ray_origin,
                ray_direction,
                max_distance,
                true,
                QueryFilter::default().exclude_rigid_body(self.body),
            )
            .is_some()
    }

    /// Pick a movement animation from the current motion state
    fn select_animation(
        &self,
        animation: &mut AnimationPlayer,
        grounded: bool,
        horizontal: f32,
        velocity_y: f32,
    ) {
        // Let the respawn cue finish before movement clips take over
        if animation.current_animation() == "respawn" && !animation.is_finished() {
            return;
        }

        let name = if grounded {
            if horizontal.abs() > 0.1 {
                "run"
            } else {
                "idle"
            }
        } else if velocity_y > 0.0 {
            "jump"
        } else {
            "fall"
        };

        animation.play(name);
        animation.set_flip_horizontal(self.facing < 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics::body::presets;

    struct Rig {
        physics: PhysicsWorld,
        controller: PlayerController,
        animation: AnimationPlayer,
        input: PlayerInput,
    }

    /// Player standing on a platform, already settled by a few steps
    fn grounded_rig() -> Rig {
        let mut physics = PhysicsWorld::new();
        let stats = PlayerStats::standard();

        let platform = physics.add_rigid_body(presets::platform_body(0.0, -0.5));
        physics.add_collider(presets::platform_collider(20.0, 1.0), platform);

        let body = physics.add_rigid_body(presets::player_body(0.0, stats.height / 2.0 + 0.05));
        physics.add_collider(presets::player_collider(stats.width, stats.height), body);

        for _ in 0..10 {
            physics.step();
        }

        Rig {
            physics,
            controller: PlayerController::new(body, stats),
            animation: AnimationPlayer::with_standard_animations(),
            input: PlayerInput::new(),
        }
    }

    #[test]
    fn test_grounded_on_platform() {
        let rig = grounded_rig();
        assert!(rig.controller.is_grounded(&rig.physics));
    }

    #[test]
    fn test_moves_with_input() {
        let mut rig = grounded_rig();
        rig.input.press(Action::MoveRight);

        rig.controller
            .update(&rig.input, &mut rig.physics, &mut rig.animation);

        let body = rig.physics.get_rigid_body(rig.controller.body()).unwrap();
        assert!(body.linvel().x > 0.0);
        assert_eq!(rig.controller.facing(), 1.0);
        assert_eq!(rig.animation.current_animation(), "run");
    }

    #[test]
    fn test_idle_without_input() {
        let mut rig = grounded_rig();

        rig.controller
            .update(&rig.input, &mut rig.physics, &mut rig.animation);

        let body = rig.physics.get_rigid_body(rig.controller.body()).unwrap();
        assert_eq!(body.linvel().x, 0.0);
        assert_eq!(rig.animation.current_animation(), "idle");
    }

    #[test]
    fn test_jump_from_ground() {
        let mut rig = grounded_rig();
        rig.input.press(Action::Jump);

        rig.controller
            .update(&rig.input, &mut rig.physics, &mut rig.animation);

        let body = rig.physics.get_rigid_body(rig.controller.body()).unwrap();
        assert!(body.linvel().y > 0.0, "jump should launch upward");
    }

    #[test]
    fn test_dead_controller_is_inert() {
        let mut rig = grounded_rig();
        rig.controller.set_dead_state(true);
        rig.input.press(Action::MoveLeft);
        rig.input.press(Action::Jump);

        rig.controller
            .update(&rig.input, &mut rig.physics, &mut rig.animation);

        let body = rig.physics.get_rigid_body(rig.controller.body()).unwrap();
        assert_eq!(body.linvel().x, 0.0);
        assert_eq!(
            rig.animation.current_animation(),
            "idle",
            "no animation selection while dead"
        );
    }

    #[test]
    fn test_dead_state_roundtrip() {
        let mut rig = grounded_rig();
        assert!(!rig.controller.is_dead());

        rig.controller.set_dead_state(true);
        assert!(rig.controller.is_dead());

        rig.controller.set_dead_state(false);
        assert!(!rig.controller.is_dead());

        rig.input.press(Action::MoveRight);
        rig.controller
            .update(&rig.input, &mut rig.physics, &mut rig.animation);
        let body = rig.physics.get_rigid_body(rig.controller.body()).unwrap();
        assert!(body.linvel().x > 0.0, "control returns after revival");
    }

    #[test]
    fn test_facing_flips_animation() {
        let mut rig = grounded_rig();
        rig.input.press(Action::MoveLeft);

        rig.controller
            .update(&rig.input, &mut rig.physics, &mut rig.animation);

        assert_eq!(rig.controller.facing(), -1.0);
        assert!(rig.animation.is_flipped_horizontal());
    }
}
