// Player tuning values

/// Fixed player tuning values
#[derive(Debug, Clone)]
pub struct PlayerStats {
    // Movement
    /// Maximum horizontal movement speed (units/second)
    pub move_speed: f32,
    /// Jump impulse strength
    pub jump_force: f32,
    /// Air control multiplier (0.0 = no air control, 1.0 = full control)
    pub air_control: f32,

    // Combat
    /// Base health points
    pub max_health: i32,

    // Dimensions (for physics collider)
    /// Player width in world units
    pub width: f32,
    /// Player height in world units
    pub height: f32,

    // Death cycle
    /// Real-time delay between dying and respawning, in seconds
    pub respawn_delay: f32,
}

/// The baseline player tuning
pub const BASE_STATS: PlayerStats = PlayerStats {
    // Movement - responsive but not too fast
    move_speed: 9.0,
    jump_force: 24.0,
    air_control: 0.65,

    // Combat
    max_health: 100,

    // Dimensions - fits the sprite nicely
    width: 0.9,
    height: 1.8,

    // Death cycle
    respawn_delay: 2.0,
};

impl Default for PlayerStats {
    fn default() -> Self {
        BASE_STATS
    }
}

impl PlayerStats {
    /// Get the standard player tuning
    pub fn standard() -> Self {
        BASE_STATS
    }
}
