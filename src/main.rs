use anyhow::Result;
use glam::Vec2;
use log::{debug, info};
use winit::{
    event::{ElementState, Event, WindowEvent},
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

mod core;
mod engine;
mod game;

use engine::game_loop::GameLoop;
use game::{GameWorld, PlayerStats};

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Emberfall...");

    let mut world = GameWorld::new(PlayerStats::standard(), Vec2::new(0.0, 2.0))?;
    build_level(&mut world);

    let mut game_loop = GameLoop::new();

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Emberfall")
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720))
        .with_resizable(true)
        .build(&event_loop)?;

    info!("Window created successfully");

    // Main event loop
    event_loop
        .run(move |event, elwt| {
            match event {
                Event::WindowEvent {
                    event: WindowEvent::CloseRequested,
                    ..
                } => {
                    info!("Close requested, shutting down...");
                    elwt.exit();
                }
                Event::WindowEvent {
                    event: WindowEvent::KeyboardInput {
                        event: key_event, ..
                    },
                    ..
                } => {
                    // Pause must keep working while player input is disabled,
                    // so it is handled here instead of through the bindings
                    if key_event.state == ElementState::Pressed
                        && !key_event.repeat
                        && key_event.physical_key == PhysicalKey::Code(KeyCode::KeyP)
                    {
                        game_loop.toggle_pause();
                    }
                    world.input_mut().process_keyboard_event(&key_event);
                }
                Event::WindowEvent {
                    event: WindowEvent::MouseInput { state, button, .. },
                    ..
                } => {
                    world.input_mut().process_mouse_button(button, state);
                }
                Event::WindowEvent {
                    event: WindowEvent::RedrawRequested,
                    ..
                } => {
                    window.request_redraw();
                }
                Event::AboutToWait => {
                    let updates = game_loop.begin_frame();
                    for _ in 0..updates {
                        world.fixed_update(game_loop.fixed_timestep());
                    }
                    // The death cycle ticks on the unscaled clock so a
                    // pending respawn completes even while paused
                    world.frame_update(game_loop.unscaled_delta());

                    // Hand queued SFX to the platform layer
                    // (logged until a mixer backend exists)
                    let requests = world.audio_mut().drain_queue();
                    for request in requests {
                        if let Some(name) = world.audio().clip_name(request.clip) {
                            debug!("sfx: {} (volume {:.2})", name, request.volume);
                        }
                    }

                    window.request_redraw();
                }
                _ => {}
            }
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}

/// Lay out the demo level: ground on both sides of a spike pit, a ledge
/// over the spikes, and a checkpoint past the pit.
fn build_level(world: &mut GameWorld) {
    // Ground
    world.add_platform(Vec2::new(-2.0, -0.5), 24.0, 1.0);
    world.add_platform(Vec2::new(18.0, -0.5), 12.0, 1.0);

    // Spike pit between the two ground slabs
    world.add_hazard(Vec2::new(11.5, -0.6), 3.0, 0.8);

    // Ledge over the pit
    world.add_platform(Vec2::new(11.5, 2.5), 3.0, 0.5);

    // Checkpoint on the far side
    world.add_checkpoint(Vec2::new(18.0, 1.5));

    info!("Level built");
}
