// Player animation playback

use std::collections::HashMap;

/// A single animation clip
#[derive(Debug, Clone)]
pub struct AnimationClip {
    /// Name of the animation (e.g., "idle", "run", "death")
    pub name: String,
    /// Number of frames in the animation
    pub frame_count: usize,
    /// Duration of each frame in seconds
    pub frame_duration: f32,
    /// Whether the animation loops
    pub looping: bool,
}

impl AnimationClip {
    /// Create a new animation clip
    pub fn new(name: &str, frame_count: usize, fps: f32, looping: bool) -> Self {
        Self {
            name: name.to_string(),
            frame_count,
            frame_duration: 1.0 / fps,
            looping,
        }
    }

    /// Create a looping animation
    pub fn looping(name: &str, frame_count: usize, fps: f32) -> Self {
        Self::new(name, frame_count, fps, true)
    }

    /// Create a one-shot animation (plays once, holds the last frame)
    pub fn one_shot(name: &str, frame_count: usize, fps: f32) -> Self {
        Self::new(name, frame_count, fps, false)
    }

    /// Get the total duration of one animation cycle
    pub fn total_duration(&self) -> f32 {
        self.frame_count as f32 * self.frame_duration
    }
}

/// Manages animation playback for the player sprite
#[derive(Debug)]
pub struct AnimationPlayer {
    /// All available animations
    animations: HashMap<String, AnimationClip>,
    /// Currently playing animation name
    current_animation: String,
    /// Current frame index
    current_frame: usize,
    /// Time elapsed in current frame
    frame_timer: f32,
    /// Whether the animation is playing
    playing: bool,
    /// Whether the sprite should be flipped horizontally
    flip_horizontal: bool,
}

impl Default for AnimationPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationPlayer {
    pub fn new() -> Self {
        Self {
            animations: HashMap::new(),
            current_animation: String::new(),
            current_frame: 0,
            frame_timer: 0.0,
            playing: true,
            flip_horizontal: false,
        }
    }

    /// Create an animation player with the standard player animations
    pub fn with_standard_animations() -> Self {
        let mut player = Self::new();

        player.add_animation(AnimationClip::looping("idle", 8, 10.0));
        player.add_animation(AnimationClip::looping("run", 8, 12.0));
        player.add_animation(AnimationClip::looping("jump", 4, 10.0));
        player.add_animation(AnimationClip::looping("fall", 4, 10.0));
        // Cues fired by the death cycle hold their last frame
        player.add_animation(AnimationClip::one_shot("death", 6, 12.0));
        player.add_animation(AnimationClip::one_shot("respawn", 6, 12.0));

        // Start with idle
        player.play("idle");

        player
    }

    /// Add an animation clip
    pub fn add_animation(&mut self, clip: AnimationClip) {
        self.animations.insert(clip.name.clone(), clip);
    }

    /// Check whether a clip is registered
    pub fn has_animation(&self, name: &str) -> bool {
        self.animations.contains_key(name)
    }

    /// Play an animation by name (no-op if it is already playing)
    pub fn play(&mut self, name: &str) {
        if self.current_animation != name {
            self.current_animation = name.to_string();
            self.current_frame = 0;
            self.frame_timer = 0.0;
            self.playing = true;
        }
    }

    /// Play an animation from the beginning, even if it's the same.
    /// This is the trigger-style entry point for cues like "death".
    pub fn play_from_start(&mut self, name: &str) {
        self.current_animation = name.to_string();
        self.current_frame = 0;
        self.frame_timer = 0.0;
        self.playing = true;
    }

    /// Set horizontal flip state
    pub fn set_flip_horizontal(&mut self, flip: bool) {
        self.flip_horizontal = flip;
    }

    /// Get horizontal flip state
    pub fn is_flipped_horizontal(&self) -> bool {
        self.flip_horizontal
    }

    /// Update the animation (called every frame)
    pub fn update(&mut self, dt: f32) {
        if !self.playing {
            return;
        }

        let Some(clip) = self.animations.get(&self.current_animation) else {
            return;
        };

        self.frame_timer += dt;

        while self.frame_timer >= clip.frame_duration {
            self.frame_timer -= clip.frame_duration;
            self.current_frame += 1;

            if self.current_frame >= clip.frame_count {
                if clip.looping {
                    self.current_frame = 0;
                } else {
                    // Stay on last frame
                    self.current_frame = clip.frame_count - 1;
                    self.playing = false;
                }
            }
        }
    }

    /// Get the current animation name
    pub fn current_animation(&self) -> &str {
        &self.current_animation
    }

    /// Get the current frame index
    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    /// Check if the animation is playing
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Check if the current animation has finished (for non-looping animations)
    pub fn is_finished(&self) -> bool {
        if let Some(clip) = self.animations.get(&self.current_animation) {
            !clip.looping && self.current_frame >= clip.frame_count - 1 && !self.playing
        } else {
            true
        }
    }

    /// Get the clip info for the current animation
    pub fn current_clip(&self) -> Option<&AnimationClip> {
        self.animations.get(&self.current_animation)
    }
}
