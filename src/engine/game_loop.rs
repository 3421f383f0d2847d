/// Game loop timing and control system
///
/// Implements a fixed timestep game loop with variable rendering.
/// Simulation updates run at a consistent rate while frames render as fast
/// as possible. The loop also tracks an unscaled per-frame delta that keeps
/// advancing while the simulation is paused; real-time countdowns (the
/// respawn delay) tick from that clock.
use std::time::{Duration, Instant};

/// Target simulation rate (60 updates per second)
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
const FIXED_TIMESTEP_DURATION: Duration = Duration::from_micros(16_667); // ~1/60 second

/// Maximum number of simulation steps per frame to prevent spiral of death
const MAX_UPDATE_STEPS: u32 = 5;

/// FPS tracking window (average over last N frames)
const FPS_WINDOW_SIZE: usize = 60;

/// Game loop timing state
pub struct GameLoop {
    /// Accumulated time for fixed timestep updates
    accumulator: Duration,

    /// Time of last frame
    last_frame_time: Instant,

    /// Time when game loop started
    start_time: Instant,

    /// Whether the simulation is paused
    paused: bool,

    /// Frame timing history for FPS calculation
    frame_times: Vec<Duration>,

    /// Current frame number
    frame_count: u64,

    /// Total simulation updates executed
    update_count: u64,

    /// Current FPS (updated periodically)
    current_fps: f32,

    /// Wall-clock time since the previous frame, in seconds.
    /// Unlike the accumulator this is never gated by pause.
    unscaled_delta: f32,
}

impl GameLoop {
    /// Create a new game loop
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            accumulator: Duration::ZERO,
            last_frame_time: now,
            start_time: now,
            paused: false,
            frame_times: Vec::with_capacity(FPS_WINDOW_SIZE),
            frame_count: 0,
            update_count: 0,
            current_fps: 0.0,
            unscaled_delta: 0.0,
        }
    }

    /// Begin a new frame, returns the number of fixed updates to run
    pub fn begin_frame(&mut self) -> u32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.frame_count += 1;

        // Store frame time for FPS calculation
        self.frame_times.push(frame_time);
        if self.frame_times.len() > FPS_WINDOW_SIZE {
            self.frame_times.remove(0);
        }

        // Update FPS counter every 10 frames
        if self.frame_count % 10 == 0 {
            self.update_fps();
        }

        // Real time always flows, paused or not
        self.unscaled_delta = frame_time.as_secs_f32();

        // If paused, don't accumulate time for simulation updates
        if self.paused {
            return 0;
        }

        // Accumulate frame time
        self.accumulator += frame_time;

        // Calculate number of fixed updates to run
        let mut updates = 0;
        while self.accumulator >= FIXED_TIMESTEP_DURATION && updates < MAX_UPDATE_STEPS {
            self.accumulator -= FIXED_TIMESTEP_DURATION;
            updates += 1;
        }

        self.update_count += updates as u64;
        updates
    }

    /// Get the fixed timestep for simulation updates (in seconds)
    pub fn fixed_timestep(&self) -> f32 {
        FIXED_TIMESTEP
    }

    /// Get the unscaled wall-clock delta since the last frame (in seconds)
    pub fn unscaled_delta(&self) -> f32 {
        self.unscaled_delta
    }

    /// Get current FPS
    pub fn fps(&self) -> f32 {
        self.current_fps
    }

    /// Get total elapsed time since start
    pub fn elapsed(&self) -> Duration {
        Instant::now().duration_since(self.start_time)
    }

    /// Get total number of frames rendered
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get total number of simulation updates executed
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Check if the simulation is paused
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause the simulation
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Game paused");
        }
    }

    /// Resume the simulation
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // Reset accumulator to prevent update burst
            self.accumulator = Duration::ZERO;
            log::info!("Game resumed");
        }
    }

    /// Toggle pause state
    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Update FPS calculation
    fn update_fps(&mut self) {
        if self.frame_times.is_empty() {
            self.current_fps = 0.0;
            return;
        }

        let total: Duration = self.frame_times.iter().sum();
        let avg_frame_time = total / self.frame_times.len() as u32;

        self.current_fps = if avg_frame_time.as_secs_f32() > 0.0 {
            1.0 / avg_frame_time.as_secs_f32()
        } else {
            0.0
        };
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}
