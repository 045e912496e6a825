//! Game configuration
//!
//! Every tunable number lives here. Defaults reproduce the stock game; a page
//! can override any subset through a JSON block:
//!
//! ```html
//! <script id="game-config" type="application/json">
//!   { "waves": { "spawn_chance": 0.1 } }
//! </script>
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Movement and gravity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: f32,
    /// Initial vertical velocity of a jump (negative is up)
    pub jump_strength: f32,
    pub player_speed: f32,
    pub projectile_speed: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            jump_strength: -14.0,
            player_speed: 6.0,
            projectile_speed: 12.0,
        }
    }
}

/// The wizard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub width: f32,
    pub height: f32,
    pub max_health: u32,
    /// Frames between shots
    pub attack_cooldown: u32,
    /// Health lost per frame per touching ogre
    pub contact_damage: u32,
    /// Starting x (y is always the ground)
    pub start_x: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: 60.0,
            height: 60.0,
            max_health: 100,
            attack_cooldown: 15,
            contact_damage: 1,
            start_x: 100.0,
        }
    }
}

/// Ogre and boss stats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub ogre_size: f32,
    pub boss_size: f32,
    pub ogre_base_health: i32,
    pub ogre_health_per_wave: i32,
    pub boss_health: i32,
    pub ogre_base_speed: f32,
    pub ogre_speed_per_wave: f32,
    pub boss_speed: f32,
    /// Damage dealt by one projectile
    pub wand_damage: i32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            ogre_size: 70.0,
            boss_size: 150.0,
            ogre_base_health: 2,
            ogre_health_per_wave: 2,
            boss_health: 50,
            ogre_base_speed: 3.0,
            ogre_speed_per_wave: 0.5,
            boss_speed: 2.0,
            wand_damage: 2,
        }
    }
}

impl EnemyConfig {
    /// Health of a regular ogre spawned in `wave` (1-based)
    pub fn ogre_health(&self, wave: u32) -> i32 {
        self.ogre_base_health + (wave.saturating_sub(1) as i32) * self.ogre_health_per_wave
    }

    /// Walking speed of a regular ogre spawned in `wave`
    pub fn ogre_speed(&self, wave: u32) -> f32 {
        self.ogre_base_speed + wave as f32 * self.ogre_speed_per_wave
    }
}

/// Spawner and wave progression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    /// Maximum ogres alive at once
    pub max_alive: usize,
    /// Ogres spawned per wave
    pub spawns_per_wave: u32,
    /// Kills that clear a wave
    pub kills_per_wave: u32,
    /// Per-frame chance of a spawn when below both caps
    pub spawn_chance: f64,
    /// The wave whose final spawn is the boss
    pub boss_wave: u32,
    /// Score per kill, multiplied by the wave number
    pub score_per_kill: u64,
    /// Coins for an ogre and for the boss
    pub coin_value: u64,
    pub boss_coin_value: u64,
    /// Offer upgrade cards after each cleared wave
    pub upgrade_cards: bool,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            max_alive: 5,
            spawns_per_wave: 10,
            kills_per_wave: 10,
            spawn_chance: 0.05,
            boss_wave: 5,
            score_per_kill: 10,
            coin_value: 10,
            boss_coin_value: 200,
            upgrade_cards: true,
        }
    }
}

/// Special abilities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbilityConfig {
    /// Horizontal distance the tornado throws each ogre
    pub tornado_push: f32,
    pub tornado_damage: i32,
    pub tornado_cooldown: u32,
    pub dragon_cooldown: u32,
    /// Frames the dragon flash stays on screen
    pub dragon_flash_ticks: u32,
    /// Frames between automatic lightning strikes once unlocked
    pub lightning_interval: u32,
    pub lightning_damage: i32,
    /// Reach from the wizard to the first target
    pub lightning_range: f32,
    /// Reach from one target to the next
    pub lightning_chain_range: f32,
    /// Most ogres hit by one strike
    pub lightning_chain: usize,
    /// Frames a bolt stays visible
    pub lightning_bolt_ticks: u32,
}

impl Default for AbilityConfig {
    fn default() -> Self {
        Self {
            tornado_push: 300.0,
            tornado_damage: 5,
            tornado_cooldown: 300,
            dragon_cooldown: 1800,
            dragon_flash_ticks: 30,
            lightning_interval: 120,
            lightning_damage: 5,
            lightning_range: 700.0,
            lightning_chain_range: 400.0,
            lightning_chain: 3,
            lightning_bolt_ticks: 15,
        }
    }
}

/// Presentation-only switches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Particle effects (hit sparks, defeat bursts)
    pub particles: bool,
    /// Cap on live particles
    pub max_particles: usize,
    /// Reduced motion (no full-screen flash)
    pub reduced_motion: bool,
    /// Draw the on-screen ability cooldown labels
    pub show_cooldowns: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            particles: true,
            max_particles: 256,
            reduced_motion: false,
            show_cooldowns: true,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub physics: PhysicsConfig,
    pub player: PlayerConfig,
    pub enemies: EnemyConfig,
    pub waves: WaveConfig,
    pub abilities: AbilityConfig,
    pub display: DisplayConfig,
}

impl GameConfig {
    /// Element id of the optional JSON config block
    #[cfg(target_arch = "wasm32")]
    const ELEMENT_ID: &'static str = "game-config";

    /// Parse a (possibly partial) JSON configuration
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would stall a run
    pub fn validate(&self) -> Result<(), ConfigError> {
        let waves = &self.waves;
        if waves.kills_per_wave == 0 || waves.kills_per_wave > waves.spawns_per_wave {
            return Err(ConfigError::Invalid {
                field: "waves.kills_per_wave",
                reason: format!(
                    "must be between 1 and spawns_per_wave ({}), got {}",
                    waves.spawns_per_wave, waves.kills_per_wave
                ),
            });
        }
        if waves.max_alive == 0 {
            return Err(ConfigError::Invalid {
                field: "waves.max_alive",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(waves.spawn_chance > 0.0 && waves.spawn_chance <= 1.0) {
            return Err(ConfigError::Invalid {
                field: "waves.spawn_chance",
                reason: format!("must be in (0, 1], got {}", waves.spawn_chance),
            });
        }
        if self.player.max_health == 0 {
            return Err(ConfigError::Invalid {
                field: "player.max_health",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Effective particle cap
    pub fn max_particles(&self) -> usize {
        if self.display.particles {
            self.display.max_particles
        } else {
            0
        }
    }

    /// Whether the dragon flash overlay is drawn
    pub fn flash_enabled(&self) -> bool {
        !self.display.reduced_motion
    }

    /// Load the config block from the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let text = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        match text {
            Some(json) if !json.trim().is_empty() => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded game config from #{}", Self::ELEMENT_ID);
                    config
                }
                Err(err) => {
                    log::warn!("{err}; using defaults");
                    Self::default()
                }
            },
            _ => {
                log::info!("Using default game config");
                Self::default()
            }
        }
    }

    /// Native builds always start from defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
