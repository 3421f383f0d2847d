// World wiring for a level run
//
// Owns every subsystem, routes collision events into gameplay (hazard
// contact kills, checkpoint sensors advance the registry), and feeds the
// death cycle its collaborators once per frame.

use anyhow::Result;
use glam::Vec2;
use log::debug;
use std::collections::{HashMap, HashSet};

use crate::engine::audio::{AudioManager, ClipHandle};
use crate::engine::events::{EventBus, GameEvent};
use crate::engine::game_loop::FIXED_TIMESTEP;
use crate::engine::input::{Action, InputManager};
use crate::engine::physics::body::presets;
use crate::engine::physics::{ColliderHandle, CollisionEvent, PhysicsWorld, RigidBodyHandle};
use crate::game::checkpoints::{CheckpointId, CheckpointManager};
use crate::game::player::{
    AnimationPlayer, DeathRespawnController, Health, PlayerController, PlayerStats,
    RespawnContext, WeaponHandler,
};
use crate::game::ui::{DeathScreen, GameOverBanner};

/// Seconds between weapon attacks
const WEAPON_COOLDOWN: f32 = 0.35;

/// Footprint of a checkpoint trigger zone in world units
const CHECKPOINT_SENSOR_SIZE: (f32, f32) = (1.0, 2.5);

/// The live game state for one level
pub struct GameWorld {
    physics: PhysicsWorld,
    bus: EventBus,
    input: InputManager,
    audio: AudioManager,
    checkpoints: CheckpointManager,

    // Player
    player_body: RigidBodyHandle,
    player_collider: ColliderHandle,
    health: Health,
    controller: PlayerController,
    weapon: WeaponHandler,
    animation: AnimationPlayer,
    respawn: DeathRespawnController,

    // UI overlays
    death_screen: DeathScreen,
    game_over: GameOverBanner,

    // Level geometry bookkeeping
    hazards: HashSet<ColliderHandle>,
    checkpoint_sensors: HashMap<ColliderHandle, CheckpointId>,

    // Wired clips
    hit_clip: ClipHandle,
    attack_clip: ClipHandle,
}

impl GameWorld {
    /// Create a world with the player standing at the spawn point
    pub fn new(stats: PlayerStats, spawn: Vec2) -> Result<Self> {
        let mut physics = PhysicsWorld::new();
        physics.set_timestep(FIXED_TIMESTEP);

        let player_body = physics.add_rigid_body(presets::player_body(spawn.x, spawn.y));
        let player_collider = physics.add_collider(
            presets::player_collider(stats.width, stats.height),
            player_body,
        );

        let mut bus = EventBus::new();
        let respawn = DeathRespawnController::new(&mut bus, stats.respawn_delay);

        let audio = AudioManager::with_standard_clips();
        let hit_clip = audio.clip("hit")?;
        let attack_clip = audio.clip("attack")?;

        let health = Health::new(stats.max_health);
        let controller = PlayerController::new(player_body, stats);

        Ok(Self {
            physics,
            bus,
            input: InputManager::new(),
            audio,
            checkpoints: CheckpointManager::new(spawn),
            player_body,
            player_collider,
            health,
            controller,
            weapon: WeaponHandler::new(WEAPON_COOLDOWN),
            animation: AnimationPlayer::with_standard_animations(),
            respawn,
            death_screen: DeathScreen::new(),
            game_over: GameOverBanner::new(),
            hazards: HashSet::new(),
            checkpoint_sensors: HashMap::new(),
            hit_clip,
            attack_clip,
        })
    }

    /// Add a static platform centered at `center`
    pub fn add_platform(&mut self, center: Vec2, width: f32, height: f32) {
        let body = self
            .physics
            .add_rigid_body(presets::platform_body(center.x, center.y));
        self.physics
            .add_collider(presets::platform_collider(width, height), body);
    }

    /// Add a hazard centered at `center`; touching it kills the player
    pub fn add_hazard(&mut self, center: Vec2, width: f32, height: f32) {
        let body = self
            .physics
            .add_rigid_body(presets::platform_body(center.x, center.y));
        let collider = self
            .physics
            .add_collider(presets::hazard_collider(width, height), body);
        self.hazards.insert(collider);
    }

    /// Add a checkpoint with a trigger zone at `position`
    pub fn add_checkpoint(&mut self, position: Vec2) -> CheckpointId {
        let id = self.checkpoints.register(position);

        let body = self
            .physics
            .add_rigid_body(presets::platform_body(position.x, position.y));
        let (width, height) = CHECKPOINT_SENSOR_SIZE;
        let sensor = self
            .physics
            .add_collider(presets::checkpoint_sensor(width, height), body);
        self.checkpoint_sensors.insert(sensor, id);

        id
    }

    /// One fixed simulation step: movement, combat, physics, contacts
    pub fn fixed_update(&mut self, dt: f32) {
        let input = self.input.player();
        self.controller
            .update(input, &mut self.physics, &mut self.animation);

        if self.input.player().just_pressed(Action::Attack) && self.weapon.try_attack() {
            debug!("Attack");
            self.audio.play_sfx(self.attack_clip);
        }
        self.weapon.update(dt);

        self.physics.step();
        self.process_collisions();
    }

    /// Per-frame work on the unscaled clock: animation, UI fades, and the
    /// death cycle (its countdown must keep running while paused)
    pub fn frame_update(&mut self, unscaled_dt: f32) {
        self.animation.update(unscaled_dt);
        self.death_screen.update(unscaled_dt);

        let ctx = RespawnContext {
            physics: &mut self.physics,
            body: self.player_body,
            animation: &mut self.animation,
            health: &mut self.health,
            checkpoints: &self.checkpoints,
            audio: Some(&mut self.audio),
            controller: Some(&mut self.controller),
            input: Some(&mut self.input),
            weapon: Some(&mut self.weapon),
            death_screen: Some(&mut self.death_screen),
            game_over: Some(&mut self.game_over),
        };
        self.respawn.update(&mut self.bus, unscaled_dt, ctx);

        // End of frame: clear just-pressed state
        self.input.update();
    }

    /// Turn this frame's contacts into gameplay
    fn process_collisions(&mut self) {
        for event in self.physics.get_collision_events() {
            let CollisionEvent::Started {
                collider1,
                collider2,
            } = event
            else {
                continue;
            };

            let other = if collider1 == self.player_collider {
                collider2
            } else if collider2 == self.player_collider {
                collider1
            } else {
                continue;
            };

            if self.hazards.contains(&other) {
                debug!("Hazard contact");
                self.audio.play_sfx(self.hit_clip);
                let lethal = self.health.max();
                self.health.take_damage(lethal, &mut self.bus);
            } else if let Some(&checkpoint) = self.checkpoint_sensors.get(&other) {
                if self.checkpoints.activate(checkpoint) {
                    self.bus.emit(GameEvent::CheckpointActivated { checkpoint });
                }
            }
        }
    }

    /// Input manager, for routing window events
    pub fn input_mut(&mut self) -> &mut InputManager {
        &mut self.input
    }

    /// Audio service
    pub fn audio(&self) -> &AudioManager {
        &self.audio
    }

    /// Audio service, for draining the SFX queue
    pub fn audio_mut(&mut self) -> &mut AudioManager {
        &mut self.audio
    }

    /// The death cycle state
    pub fn respawn(&self) -> &DeathRespawnController {
        &self.respawn
    }

    /// Current player position
    pub fn player_position(&self) -> Vec2 {
        self.physics
            .get_rigid_body(self.player_body)
            .map(|body| Vec2::new(body.translation().x, body.translation().y))
            .unwrap_or(Vec2::ZERO)
    }
}

impl Drop for GameWorld {
    fn drop(&mut self) {
        // Release the death-notification queue so it doesn't dangle
        self.bus.unsubscribe(self.respawn.subscription());
    }
}
