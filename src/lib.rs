//! Wizard vs Ogres - a side-scrolling arcade game for the browser
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, waves)
//! - `render`: Canvas drawing behind the `Canvas` capability trait
//! - `platform`: Keyboard and touch input folded into frame flags
//! - `config`: Data-driven game constants
//! - `game`: Frame driver tying input, simulation and rendering together

pub mod config;
pub mod error;
pub mod game;
pub mod platform;
pub mod render;
pub mod sim;

pub use config::GameConfig;
pub use error::{ConfigError, InitError};
pub use game::Game;

/// Game configuration constants that are not tunable at runtime
pub mod consts {
    /// Default viewport (the canvas is resized to the window at startup)
    pub const SCREEN_WIDTH: f32 = 1280.0;
    pub const SCREEN_HEIGHT: f32 = 720.0;

    /// Height of the ground strip at the bottom of the screen
    pub const GROUND_HEIGHT: f32 = 50.0;

    /// Projectile spawn offsets relative to the player's top-left corner
    pub const MUZZLE_OFFSET_RIGHT: f32 = 50.0;
    pub const MUZZLE_OFFSET_LEFT: f32 = -10.0;
    pub const MUZZLE_OFFSET_Y: f32 = 30.0;

    /// Projectile draw radius
    pub const PROJECTILE_RADIUS: f32 = 10.0;
    /// Particle draw radius
    pub const PARTICLE_RADIUS: f32 = 5.0;
    /// Lifetime of the spark left by a projectile hit
    pub const HIT_PARTICLE_LIFE: u32 = 10;
    /// Lifetime and count of the burst left by a defeated ogre
    pub const DEFEAT_PARTICLE_LIFE: u32 = 30;
    pub const DEFEAT_PARTICLE_COUNT: usize = 15;

    /// Spawn positions just off either screen edge
    pub const SPAWN_OFFSET_RIGHT: f32 = 50.0;
    pub const SPAWN_OFFSET_LEFT: f32 = -100.0;

    /// Frames the game-over screen ignores input
    pub const GAME_OVER_HOLD_TICKS: u32 = 60;

    /// Touch joystick travel and dead zone (pixels)
    pub const JOYSTICK_MAX_DIST: f32 = 50.0;
    pub const JOYSTICK_DEAD_ZONE: f32 = 10.0;
}
