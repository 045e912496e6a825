//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay headless:
//! - One `tick` per display refresh
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod state;
pub mod tick;
pub mod upgrades;

pub use collision::Rect;
pub use state::{
    AbilityCooldowns, Biome, Color, Enemy, GamePhase, GameState, LightningBolt, Particle, Player,
    Projectile, WAND_COLORS, ground_y,
};
pub use tick::{FrameInput, is_boss_spawn, tick};
pub use upgrades::{Upgrade, UpgradeLevels};
