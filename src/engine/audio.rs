// Sound effect playback service
//
// Gameplay code fires SFX requests at a named clip registry; requests are
// queued as commands and drained by the platform layer once per frame. No
// audio backend is wired up yet, so draining is where one would hand the
// requests to a mixer.

use crate::core::math::clamp;
use std::collections::HashMap;

/// Audio service errors
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("Unknown audio clip: {0}")]
    UnknownClip(String),

    #[error("Clip already registered: {0}")]
    AlreadyRegistered(String),
}

/// Handle to a registered sound clip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClipHandle(u32);

/// A queued playback request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SfxRequest {
    pub clip: ClipHandle,
    pub volume: f32,
}

/// Registry of named clips plus the per-frame playback queue
pub struct AudioManager {
    /// Clip names, indexed by handle
    names: Vec<String>,

    /// Name to handle lookup
    by_name: HashMap<String, ClipHandle>,

    /// The designated death sound, if one was registered
    death_clip: Option<ClipHandle>,

    /// Volume applied to every request (0.0 - 1.0)
    master_volume: f32,

    /// When muted, play requests are dropped instead of queued
    muted: bool,

    /// Requests accumulated since the last drain
    queue: Vec<SfxRequest>,
}

impl AudioManager {
    /// Create an empty audio manager with no registered clips
    pub fn new() -> Self {
        Self {
            names: Vec::new(),
            by_name: HashMap::new(),
            death_clip: None,
            master_volume: 1.0,
            muted: false,
            queue: Vec::new(),
        }
    }

    /// Create an audio manager with the standard gameplay clips registered
    pub fn with_standard_clips() -> Self {
        let mut manager = Self::new();

        // Registration over an empty registry cannot collide
        let death = manager.register_clip("death").unwrap_or(ClipHandle(0));
        let _ = manager.register_clip("respawn");
        let _ = manager.register_clip("jump");
        let _ = manager.register_clip("hit");
        let _ = manager.register_clip("attack");

        manager.death_clip = Some(death);
        manager
    }

    /// Register a clip under a unique name
    pub fn register_clip(&mut self, name: &str) -> Result<ClipHandle, AudioError> {
        if self.by_name.contains_key(name) {
            return Err(AudioError::AlreadyRegistered(name.to_string()));
        }

        let handle = ClipHandle(self.names.len() as u32);
        self.names.push(name.to_string());
        self.by_name.insert(name.to_string(), handle);
        Ok(handle)
    }

    /// Look up a clip handle by name
    pub fn clip(&self, name: &str) -> Result<ClipHandle, AudioError> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| AudioError::UnknownClip(name.to_string()))
    }

    /// Get the name a handle was registered under
    pub fn clip_name(&self, handle: ClipHandle) -> Option<&str> {
        self.names.get(handle.0 as usize).map(String::as_str)
    }

    /// The designated death sound
    pub fn death_clip(&self) -> Option<ClipHandle> {
        self.death_clip
    }

    /// Queue a playback request (fire-and-forget)
    pub fn play_sfx(&mut self, clip: ClipHandle) {
        if self.muted {
            return;
        }
        self.queue.push(SfxRequest {
            clip,
            volume: self.master_volume,
        });
    }

    /// Take all queued requests, oldest first
    pub fn drain_queue(&mut self) -> Vec<SfxRequest> {
        std::mem::take(&mut self.queue)
    }

    /// Number of requests waiting to be drained
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Set the master volume (clamped to 0.0 - 1.0)
    pub fn set_master_volume(&mut self, volume: f32) {
        self.master_volume = clamp(volume, 0.0, 1.0);
    }

    /// Get the master volume
    pub fn master_volume(&self) -> f32 {
        self.master_volume
    }

    /// Mute or unmute playback
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Check if playback is muted
    pub fn is_muted(&self) -> bool {
        self.muted
    }
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}
