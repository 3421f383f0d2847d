// UI overlay state for the death cycle
//
// These are not widgets; they hold the state a render pass would draw from.

use crate::core::math::move_toward;

/// Opacity change per second for the death screen fade
const FADE_SPEED: f32 = 4.0;

/// Full-screen overlay shown between dying and respawning
#[derive(Debug)]
pub struct DeathScreen {
    active: bool,
    opacity: f32,
}

impl DeathScreen {
    pub fn new() -> Self {
        Self {
            active: false,
            opacity: 0.0,
        }
    }

    /// Show or hide the overlay; the fade catches up over the next frames
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Whether the overlay is logically visible
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Current fade opacity (0.0 - 1.0)
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Advance the fade toward the active state
    pub fn update(&mut self, dt: f32) {
        let target = if self.active { 1.0 } else { 0.0 };
        self.opacity = move_toward(self.opacity, target, FADE_SPEED * dt);
    }
}

impl Default for DeathScreen {
    fn default() -> Self {
        Self::new()
    }
}

/// "You died" banner with a running death count
#[derive(Debug)]
pub struct GameOverBanner {
    visible: bool,
    deaths: u32,
}

impl GameOverBanner {
    pub fn new() -> Self {
        Self {
            visible: false,
            deaths: 0,
        }
    }

    /// Show the banner; each showing counts one death
    pub fn show(&mut self) {
        if !self.visible {
            self.visible = true;
            self.deaths += 1;
        }
    }

    /// Hide the banner
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Whether the banner is visible
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Total deaths shown so far
    pub fn deaths(&self) -> u32 {
        self.deaths
    }
}

impl Default for GameOverBanner {
    fn default() -> Self {
        Self::new()
    }
}
