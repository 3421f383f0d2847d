// Death and respawn sequencing
//
// Listens for the death notification, runs the immediate death side effects
// exactly once per cycle, and brings the player back at the active
// checkpoint after a real-time delay. The delay ticks on the unscaled clock,
// so pausing the simulation does not stall a pending respawn.

use log::info;

use crate::engine::audio::AudioManager;
use crate::engine::events::{EventBus, GameEvent, SubscriptionId};
use crate::engine::input::InputManager;
use crate::engine::physics::{PhysicsWorld, RigidBodyHandle, Vector};
use crate::game::checkpoints::CheckpointProvider;
use crate::game::ui::{DeathScreen, GameOverBanner};

use super::animation::AnimationPlayer;
use super::controller::PlayerController;
use super::health::Health;
use super::weapon::WeaponHandler;

/// Everything the death cycle touches, borrowed for one update.
///
/// The optional collaborators may be missing without breaking the cycle;
/// their steps are simply skipped.
pub struct RespawnContext<'a> {
    /// The player's physics body (moved to the checkpoint on respawn)
    pub physics: &'a mut PhysicsWorld,
    pub body: RigidBodyHandle,

    /// Fire-and-forget animation cues ("death", "respawn")
    pub animation: &'a mut AnimationPlayer,

    /// Restored to full on respawn
    pub health: &'a mut Health,

    /// Where to put the player back
    pub checkpoints: &'a dyn CheckpointProvider,

    // Optional collaborators
    pub audio: Option<&'a mut AudioManager>,
    pub controller: Option<&'a mut PlayerController>,
    pub input: Option<&'a mut InputManager>,
    pub weapon: Option<&'a mut WeaponHandler>,
    pub death_screen: Option<&'a mut DeathScreen>,
    pub game_over: Option<&'a mut GameOverBanner>,
}

/// Drives the two-phase death cycle:
/// `Alive -> (death notification) -> Dead -> (delay elapses) -> Alive`.
#[derive(Debug)]
pub struct DeathRespawnController {
    /// Guard: while true, further death notifications are ignored
    is_dead: bool,

    /// Real-time delay between dying and respawning, in seconds
    respawn_delay: f32,

    /// Remaining delay of the scheduled respawn, if one is in flight
    pending: Option<f32>,

    /// Our queue on the event bus, released by the owner on teardown
    subscription: SubscriptionId,
}

impl DeathRespawnController {
    /// Create the controller and subscribe it to death notifications
    pub fn new(bus: &mut EventBus, respawn_delay: f32) -> Self {
        Self {
            is_dead: false,
            respawn_delay: respawn_delay.max(0.0),
            pending: None,
            subscription: bus.subscribe(),
        }
    }

    /// The bus subscription to release when this controller is torn down
    pub fn subscription(&self) -> SubscriptionId {
        self.subscription
    }

    /// Whether a death cycle is in progress
    pub fn is_dead(&self) -> bool {
        self.is_dead
    }

    /// Whether a respawn is scheduled but has not fired yet
    pub fn respawn_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The configured delay in seconds
    pub fn respawn_delay(&self) -> f32 {
        self.respawn_delay
    }

    /// Drain death notifications and advance a pending respawn.
    ///
    /// `unscaled_dt` must be wall-clock time: the countdown keeps running
    /// while the simulation is paused. A respawn scheduled during this call
    /// starts counting on the next call, so the full delay always elapses.
    pub fn update(&mut self, bus: &mut EventBus, unscaled_dt: f32, mut ctx: RespawnContext<'_>) {
        // Countdown only ticks if it was already scheduled before this call
        let ticking = self.pending.is_some();

        for event in bus.drain(self.subscription) {
            if matches!(event, GameEvent::PlayerDied) {
                self.handle_death(&mut ctx);
            }
        }

        if !ticking {
            return;
        }

        if let Some(remaining) = self.pending.as_mut() {
            *remaining -= unscaled_dt;
            if *remaining <= 0.0 {
                self.pending = None;
                self.respawn(&mut ctx);
                bus.emit(GameEvent::PlayerRespawned);
            }
        }
    }

    /// Immediate phase: death side effects, then schedule the respawn
    fn handle_death(&mut self, ctx: &mut RespawnContext<'_>) {
        if self.is_dead {
            return;
        }

        self.is_dead = true;

        ctx.animation.play_from_start("death");

        if let Some(audio) = ctx.audio.as_deref_mut() {
            if let Some(clip) = audio.death_clip() {
                audio.play_sfx(clip);
            }
        }

        if let Some(controller) = ctx.controller.as_deref_mut() {
            controller.set_dead_state(true);
        }

        if let Some(screen) = ctx.death_screen.as_deref_mut() {
            screen.set_active(true);
        }
        if let Some(banner) = ctx.game_over.as_deref_mut() {
            banner.show();
        }

        if let Some(input) = ctx.input.as_deref_mut() {
            input.disable_player_input();
        }
        if let Some(weapon) = ctx.weapon.as_deref_mut() {
            weapon.set_enabled(false);
        }

        self.pending = Some(self.respawn_delay);
        info!("Player died, respawning in {:.1}s", self.respawn_delay);
    }

    /// Delayed phase: put the player back and undo the death side effects
    fn respawn(&mut self, ctx: &mut RespawnContext<'_>) {
        let spawn = ctx.checkpoints.current_checkpoint();
        if let Some(body) = ctx.physics.get_rigid_body_mut(ctx.body) {
            body.set_translation(Vector::new(spawn.x, spawn.y), true);
            body.set_linvel(Vector::new(0.0, 0.0), true);
        }

        ctx.animation.play_from_start("respawn");
        ctx.health.reset();

        if let Some(controller) = ctx.controller.as_deref_mut() {
            controller.set_dead_state(false);
        }
        if let Some(input) = ctx.input.as_deref_mut() {
            input.enable_player_input();
        }
        if let Some(weapon) = ctx.weapon.as_deref_mut() {
            weapon.set_enabled(true);
        }

        if let Some(screen) = ctx.death_screen.as_deref_mut() {
            screen.set_active(false);
        }
        if let Some(banner) = ctx.game_over.as_deref_mut() {
            banner.hide();
        }

        self.is_dead = false;
        info!("Player respawned at ({:.1}, {:.1})", spawn.x, spawn.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics::body::presets;
    use crate::game::player::stats::PlayerStats;
    use glam::Vec2;

    /// Test stand-in for the checkpoint registry
    struct FixedSpawn(Vec2);

    impl CheckpointProvider for FixedSpawn {
        fn current_checkpoint(&self) -> Vec2 {
            self.0
        }
    }

    /// Full player setup with every collaborator present
    struct Rig {
        bus: EventBus,
        physics: PhysicsWorld,
        body: RigidBodyHandle,
        animation: AnimationPlayer,
        health: Health,
        spawn: FixedSpawn,
        audio: AudioManager,
        controller: PlayerController,
        input: InputManager,
        weapon: WeaponHandler,
        death_screen: DeathScreen,
        game_over: GameOverBanner,
        respawn: DeathRespawnController,
    }

    impl Rig {
        fn new() -> Self {
            let stats = PlayerStats::standard();
            let mut bus = EventBus::new();
            let mut physics = PhysicsWorld::new();
            let body = physics.add_rigid_body(presets::player_body(5.0, 5.0));
            physics.add_collider(presets::player_collider(stats.width, stats.height), body);

            Self {
                respawn: DeathRespawnController::new(&mut bus, stats.respawn_delay),
                bus,
                physics,
                body,
                animation: AnimationPlayer::with_standard_animations(),
                health: Health::new(stats.max_health),
                spawn: FixedSpawn(Vec2::new(0.0, 2.0)),
                audio: AudioManager::with_standard_clips(),
                controller: PlayerController::new(body, stats),
                input: InputManager::new(),
                weapon: WeaponHandler::new(0.5),
                death_screen: DeathScreen::new(),
                game_over: GameOverBanner::new(),
            }
        }

        fn kill(&mut self) {
            let max = self.health.max();
            self.health.take_damage(max, &mut self.bus);
        }

        fn update(&mut self, dt: f32) {
            let ctx = RespawnContext {
                physics: &mut self.physics,
                body: self.body,
                animation: &mut self.animation,
                health: &mut self.health,
                checkpoints: &self.spawn,
                audio: Some(&mut self.audio),
                controller: Some(&mut self.controller),
                input: Some(&mut self.input),
                weapon: Some(&mut self.weapon),
                death_screen: Some(&mut self.death_screen),
                game_over: Some(&mut self.game_over),
            };
            self.respawn.update(&mut self.bus, dt, ctx);
        }

        fn player_position(&self) -> (f32, f32) {
            let body = self.physics.get_rigid_body(self.body).unwrap();
            (body.translation().x, body.translation().y)
        }
    }

    #[test]
    fn test_death_state_entered_on_notification() {
        let mut rig = Rig::new();
        assert!(!rig.respawn.is_dead());

        rig.kill();
        rig.update(0.0);

        assert!(rig.respawn.is_dead());
        assert!(rig.respawn.respawn_pending());
    }

    #[test]
    fn test_death_side_effects() {
        let mut rig = Rig::new();
        rig.kill();
        rig.update(0.0);

        assert_eq!(rig.animation.current_animation(), "death");
        assert!(rig.controller.is_dead());
        assert!(rig.death_screen.is_active());
        assert!(rig.game_over.is_visible());
        assert!(!rig.input.is_player_input_enabled());
        assert!(!rig.weapon.is_enabled());

        let death_clip = rig.audio.death_clip().unwrap();
        let requests = rig.audio.drain_queue();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].clip, death_clip);
    }

    #[test]
    fn test_repeat_notifications_are_absorbed() {
        let mut rig = Rig::new();
        rig.kill();
        rig.update(0.0);

        // Health is already at zero; more damage re-raises the notification
        rig.health.take_damage(10, &mut rig.bus);
        rig.health.take_damage(10, &mut rig.bus);
        rig.update(0.1);

        assert_eq!(rig.game_over.deaths(), 1, "side effects fired once");
        assert_eq!(rig.audio.drain_queue().len(), 1, "one death sound");
    }

    #[test]
    fn test_respawn_after_delay() {
        let mut rig = Rig::new();
        rig.kill();
        rig.update(0.0);

        // Not yet: 1.9s of the 2.0s delay
        rig.update(1.9);
        assert!(rig.respawn.is_dead());

        // Crossing the delay completes the cycle
        rig.update(0.2);
        assert!(!rig.respawn.is_dead());
        assert!(!rig.respawn.respawn_pending());

        let (x, y) = rig.player_position();
        assert_eq!((x, y), (0.0, 2.0), "back at the checkpoint");

        let body = rig.physics.get_rigid_body(rig.body).unwrap();
        assert_eq!(body.linvel().x, 0.0);
        assert_eq!(body.linvel().y, 0.0);

        assert_eq!(rig.health.current(), rig.health.max());
        assert_eq!(rig.animation.current_animation(), "respawn");
        assert!(!rig.controller.is_dead());
        assert!(rig.input.is_player_input_enabled());
        assert!(rig.weapon.is_enabled());
        assert!(!rig.death_screen.is_active());
        assert!(!rig.game_over.is_visible());
    }

    #[test]
    fn test_full_delay_counts_from_scheduling() {
        let mut rig = Rig::new();
        rig.kill();

        // The same update that handles the death must not consume its own
        // delta from the countdown
        rig.update(5.0);
        assert!(rig.respawn.is_dead());

        rig.update(2.0);
        assert!(!rig.respawn.is_dead());
    }

    #[test]
    fn test_respawn_emits_notification() {
        let mut rig = Rig::new();
        let observer = rig.bus.subscribe();

        rig.kill();
        rig.update(0.0);
        rig.update(2.0);

        let events = rig.bus.drain(observer);
        assert!(events.contains(&GameEvent::PlayerRespawned));
    }

    #[test]
    fn test_cycle_repeats_indefinitely() {
        let mut rig = Rig::new();

        for cycle in 1..=3 {
            rig.kill();
            rig.update(0.0);
            assert!(rig.respawn.is_dead());

            rig.update(2.0);
            assert!(!rig.respawn.is_dead(), "cycle {} should complete", cycle);
        }

        assert_eq!(rig.game_over.deaths(), 3);
    }

    #[test]
    fn test_second_death_before_respawn_is_noop() {
        let mut rig = Rig::new();
        rig.kill();
        rig.update(0.0);

        rig.update(0.5);
        rig.health.take_damage(10, &mut rig.bus); // re-raised notification
        rig.update(0.5);

        // The pending countdown was not restarted by the second notification
        rig.update(1.0);
        assert!(!rig.respawn.is_dead(), "first schedule completed");
        assert_eq!(rig.game_over.deaths(), 1);
    }

    #[test]
    fn test_respawn_uses_latest_checkpoint() {
        let mut rig = Rig::new();
        rig.kill();
        rig.update(0.0);

        // Checkpoint registry advances while the player is dead
        rig.spawn = FixedSpawn(Vec2::new(12.0, 4.0));

        rig.update(2.0);
        assert_eq!(rig.player_position(), (12.0, 4.0));
    }

    #[test]
    fn test_missing_collaborators_are_skipped() {
        let stats = PlayerStats::standard();
        let mut bus = EventBus::new();
        let mut physics = PhysicsWorld::new();
        let body = physics.add_rigid_body(presets::player_body(5.0, 5.0));
        physics.add_collider(presets::player_collider(stats.width, stats.height), body);

        let mut respawn = DeathRespawnController::new(&mut bus, stats.respawn_delay);
        let mut animation = AnimationPlayer::with_standard_animations();
        let mut health = Health::new(stats.max_health);
        let spawn = FixedSpawn(Vec2::ZERO);

        health.take_damage(stats.max_health, &mut bus);

        // No audio, controller, input, weapon, or UI surfaces wired up
        for dt in [0.0, 2.5] {
            let ctx = RespawnContext {
                physics: &mut physics,
                body,
                animation: &mut animation,
                health: &mut health,
                checkpoints: &spawn,
                audio: None,
                controller: None,
                input: None,
                weapon: None,
                death_screen: None,
                game_over: None,
            };
            respawn.update(&mut bus, dt, ctx);
        }

        assert!(!respawn.is_dead(), "cycle completed without collaborators");
        assert_eq!(health.current(), health.max());
    }

    #[test]
    fn test_zero_delay_respawns_next_update() {
        let mut rig = Rig::new();
        rig.respawn = DeathRespawnController::new(&mut rig.bus, 0.0);

        rig.kill();
        rig.update(0.0);
        assert!(rig.respawn.is_dead());

        rig.update(0.0);
        assert!(!rig.respawn.is_dead());
    }
}
