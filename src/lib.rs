//! Sea Defenders - A scrolling naval arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, level generation, collisions, game state)
//! - `platform`: Fixed-step clock and the browser bridge
//! - `settings`: Viewport and seed configuration

pub mod platform;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};
pub use sim::{RenderState, TickInput, World};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (all counters below are in 60 Hz frames)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default viewport
    pub const DEFAULT_SCREEN_WIDTH: f32 = 1280.0;
    pub const DEFAULT_SCREEN_HEIGHT: f32 = 720.0;

    /// Background scroll, also the speed islands and whirlpools drift down
    pub const SCROLL_SPEED: f32 = 2.0;

    /// Player ship
    pub const PLAYER_MAX_HP: i32 = 100;
    pub const PLAYER_SPEED: f32 = 4.0;
    pub const MAX_SHIP_ANGLE: f32 = 45.0;
    pub const ANGLE_STEP: f32 = 15.0;
    pub const ANGLE_RETURN_SPEED: f32 = 2.0;
    /// Minimum |heading| before the ship can fire
    pub const FIRE_ANGLE_THRESHOLD: f32 = 15.0;
    pub const FIRE_COOLDOWN: u32 = 18;
    /// Distance from the bottom edge where the ship spawns
    pub const PLAYER_SPAWN_OFFSET: f32 = 100.0;
    pub const PLAYER_MARGIN_X: f32 = 30.0;
    pub const PLAYER_MARGIN_Y: f32 = 50.0;

    /// Projectiles
    pub const BULLET_SPEED: f32 = 6.0;
    pub const ENEMY_BULLET_SPEED: f32 = 4.0;
    pub const BULLET_MUZZLE_OFFSET: f32 = 20.0;
    pub const BULLET_CULL_MARGIN: f32 = 20.0;

    /// Enemies
    pub const LIGHT_ENEMY_HP: i32 = 20;
    pub const HEAVY_ENEMY_HP: i32 = 40;
    pub const LIGHT_ENEMY_SCORE: u32 = 10;
    pub const HEAVY_ENEMY_SCORE: u32 = 25;
    pub const HEAVY_FIRST_SHOT_DELAY: u32 = 60;
    pub const HEAVY_FIRE_COOLDOWN: u32 = 120;
    pub const ENEMY_CULL_MARGIN: f32 = 50.0;
    pub const LIGHT_ENEMY_CHANCE: f64 = 0.6;
    pub const DOUBLE_SPAWN_CHANCE: f64 = 0.3;
    pub const SPAWN_ROW_SPACING: f32 = 30.0;

    /// Spawn pacing (frames)
    pub const BASE_SPAWN_INTERVAL: u32 = 45;
    pub const MIN_SPAWN_INTERVAL: u32 = 20;
    pub const SPAWN_INTERVAL_STEP: u32 = 3;
    pub const SCORE_PER_SPAWN_STEP: u32 = 50;

    /// Damage
    pub const BULLET_DAMAGE: i32 = 10;
    pub const ENEMY_BULLET_DAMAGE: i32 = 10;
    pub const RAM_DAMAGE: i32 = 20;
    pub const ISLAND_DAMAGE: i32 = 10;

    /// Explosion animation length (frames)
    pub const EXPLOSION_FRAMES: u32 = 10;

    /// Pool capacities
    pub const MAX_BULLETS: usize = 20;
    pub const MAX_ENEMY_BULLETS: usize = 20;
    pub const MAX_ENEMIES: usize = 20;
    pub const MAX_EXPLOSIONS: usize = 10;

    /// Islands and whirlpools leave the bottom at this margin and re-enter above the top
    pub const WRAP_MARGIN: f32 = 100.0;
}

/// Clamp without panicking when the range is inverted (tiny viewports)
#[inline]
pub fn soft_clamp(value: f32, min: f32, max: f32) -> f32 {
    value.min(max).max(min)
}
