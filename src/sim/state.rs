//! Game state and core simulation types
//!
//! Everything the frame step reads or writes lives in `GameState`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::upgrades::{MIN_ATTACK_COOLDOWN, MULTISHOT_SPREAD, SWIFT_STEP, Upgrade, UpgradeLevels};
use crate::config::GameConfig;
use crate::consts::*;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title overlay, waiting for any input
    Menu,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Wave cleared, choosing an upgrade card
    CardSelect,
    /// The wizard ran out of health
    GameOver,
}

/// Background scenery, chosen by wave
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Biome {
    Forest,
    Ice,
    Volcano,
}

impl Biome {
    /// FOREST up to wave 2, ICE up to wave 4, VOLCANO after that
    pub fn for_wave(wave: u32) -> Self {
        if wave > 4 {
            Biome::Volcano
        } else if wave > 2 {
            Biome::Ice
        } else {
            Biome::Forest
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Biome::Forest => "FOREST",
            Biome::Ice => "ICE",
            Biome::Volcano => "VOLCANO",
        }
    }
}

/// Packed RGBA color shared by the simulation (particle/projectile tint) and
/// the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a new alpha
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// CSS color string for the canvas API
    pub fn to_css(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({},{},{},{:.3})",
                self.r,
                self.g,
                self.b,
                self.a as f32 / 255.0
            )
        }
    }
}

/// Crystal colors by wand level; Fire Mastery raises the level
pub const WAND_COLORS: [Color; 4] = [
    Color::rgb(255, 255, 255),
    Color::rgb(0, 191, 255),
    Color::rgb(50, 205, 50),
    Color::rgb(255, 0, 0),
];

/// The wizard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub facing_right: bool,
    pub jumping: bool,
    pub health: u32,
    pub max_health: u32,
    /// Frames until the next shot is allowed
    pub cooldown: u32,
    /// Index into `WAND_COLORS`
    pub wand_level: usize,
    /// Upgrade cards taken this run
    pub upgrades: UpgradeLevels,
}

impl Player {
    /// A fresh wizard standing on the ground
    pub fn new(config: &GameConfig, screen: Vec2) -> Self {
        let size = Vec2::new(config.player.width, config.player.height);
        Self {
            pos: Vec2::new(config.player.start_x, ground_y(screen) - size.y),
            vel: Vec2::ZERO,
            size,
            facing_right: true,
            jumping: false,
            health: config.player.max_health,
            max_health: config.player.max_health,
            cooldown: 0,
            wand_level: 0,
            upgrades: UpgradeLevels::default(),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    /// Casting pose is held for the first few frames after a shot
    pub fn is_casting(&self) -> bool {
        self.cooldown > 10
    }

    pub fn wand_color(&self) -> Color {
        WAND_COLORS[self.wand_level.min(WAND_COLORS.len() - 1)]
    }

    /// Frames between shots after Swift Caster
    pub fn attack_cooldown(&self, config: &GameConfig) -> u32 {
        let base = config.player.attack_cooldown;
        match self.upgrades.swift {
            0 => base,
            level => base
                .saturating_sub(SWIFT_STEP * level as u32)
                .max(MIN_ATTACK_COOLDOWN),
        }
    }

    /// Damage of one bolt after Arcane Power
    pub fn bolt_damage(&self, config: &GameConfig) -> i32 {
        config.enemies.wand_damage + self.upgrades.arcane as i32
    }

    /// Vertical offsets of the bolts in one volley, centred on the muzzle
    pub fn volley_offsets(&self) -> Vec<f32> {
        let count = 1 + self.upgrades.fire as usize;
        let mid = (count - 1) as f32 / 2.0;
        (0..count)
            .map(|i| (i as f32 - mid) * MULTISHOT_SPREAD)
            .collect()
    }

    /// Keep the wizard inside `[0, width - player width]` and on the ground
    pub fn clamp_to_screen(&mut self, screen: Vec2) {
        let floor = ground_y(screen) - self.size.y;
        if self.pos.y > floor {
            self.pos.y = floor;
            self.vel.y = 0.0;
            self.jumping = false;
        }
        let max_x = (screen.x - self.size.x).max(0.0);
        self.pos.x = self.pos.x.clamp(0.0, max_x);
    }
}

/// A magic bolt flying horizontally
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    /// Centre of the bolt
    pub pos: Vec2,
    /// Horizontal speed; the sign never changes after creation
    pub vel_x: f32,
    pub color: Color,
    pub active: bool,
}

impl Projectile {
    pub fn new(pos: Vec2, facing_right: bool, speed: f32, color: Color) -> Self {
        Self {
            pos,
            vel_x: if facing_right { speed } else { -speed },
            color,
            active: true,
        }
    }

    /// Advance one frame; deactivates once x leaves `[0, screen_width]`
    pub fn update(&mut self, screen_width: f32) {
        self.pos.x += self.vel_x;
        if self.pos.x < 0.0 || self.pos.x > screen_width {
            self.active = false;
        }
    }
}

/// An ogre (or the boss)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub health: i32,
    pub speed: f32,
    pub boss: bool,
    pub facing_right: bool,
    pub active: bool,
}

impl Enemy {
    /// Build an ogre for `wave`, standing on the ground at `x`
    pub fn spawn(config: &GameConfig, x: f32, wave: u32, boss: bool, screen: Vec2) -> Self {
        let enemies = &config.enemies;
        let side = if boss {
            enemies.boss_size
        } else {
            enemies.ogre_size
        };
        let size = Vec2::splat(side);
        Self {
            pos: Vec2::new(x, ground_y(screen) - size.y),
            size,
            health: if boss {
                enemies.boss_health
            } else {
                enemies.ogre_health(wave)
            },
            speed: if boss {
                enemies.boss_speed
            } else {
                enemies.ogre_speed(wave)
            },
            boss,
            // Ogres enter from the right walking left, and vice versa
            facing_right: x < screen.x / 2.0,
            active: true,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    /// Walk toward `target_x` and stay on the ground
    pub fn update(&mut self, target_x: f32, screen: Vec2) {
        let dx = target_x - self.center().x;
        self.facing_right = dx > 0.0;
        let dir = if self.facing_right { 1.0 } else { -1.0 };
        self.pos.x += dir * self.speed;

        let floor = ground_y(screen) - self.size.y;
        if self.pos.y > floor {
            self.pos.y = floor;
        }
    }
}

/// A short-lived visual spark (not gameplay-affecting)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Color,
    /// Frames remaining
    pub life: u32,
    pub max_life: u32,
}

impl Particle {
    /// Remaining life as 0-1 (for fading)
    pub fn fade(&self) -> f32 {
        if self.max_life == 0 {
            0.0
        } else {
            self.life as f32 / self.max_life as f32
        }
    }
}

/// A chain-lightning segment, drawn for a few frames
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightningBolt {
    pub from: Vec2,
    pub to: Vec2,
    pub life: u32,
    pub max_life: u32,
}

/// Frames remaining on each ability
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AbilityCooldowns {
    pub tornado: u32,
    pub dragon: u32,
    /// Time to the next automatic strike
    pub lightning: u32,
}

/// Y coordinate of the ground surface
pub fn ground_y(screen: Vec2) -> f32 {
    screen.y - GROUND_HEIGHT
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed of the current run
    pub seed: u64,
    /// Spawn-trigger and cosmetic randomness
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Viewport size in pixels
    pub screen: Vec2,
    /// Current wave (1-based)
    pub wave: u32,
    /// Ogres spawned so far in this wave
    pub spawned_in_wave: u32,
    /// Ogres defeated so far in this wave
    pub killed_in_wave: u32,
    /// Ogres defeated over the whole run
    pub total_kills: u32,
    pub score: u64,
    /// Coins earned this run
    pub coins: u64,
    /// Simulation tick counter (Playing frames only)
    pub time_ticks: u64,
    pub player: Player,
    pub projectiles: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    pub particles: Vec<Particle>,
    pub bolts: Vec<LightningBolt>,
    /// Cards on offer while in `CardSelect`
    pub cards: Vec<Upgrade>,
    pub cooldowns: AbilityCooldowns,
    /// Frames left on the dragon flash
    pub flash_ticks: u32,
    /// Frames spent on the game-over screen
    pub game_over_ticks: u32,
}

impl GameState {
    /// A new session sitting on the menu
    pub fn new(seed: u64, config: &GameConfig, screen: Vec2) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            screen,
            wave: 1,
            spawned_in_wave: 0,
            killed_in_wave: 0,
            total_kills: 0,
            score: 0,
            coins: 0,
            time_ticks: 0,
            player: Player::new(config, screen),
            projectiles: Vec::new(),
            enemies: Vec::new(),
            particles: Vec::new(),
            bolts: Vec::new(),
            cards: Vec::new(),
            cooldowns: AbilityCooldowns::default(),
            flash_ticks: 0,
            game_over_ticks: 0,
        }
    }

    /// Reset everything for a new run, keeping the viewport and the RNG stream
    pub fn reset_run(&mut self, config: &GameConfig) {
        self.wave = 1;
        self.spawned_in_wave = 0;
        self.killed_in_wave = 0;
        self.total_kills = 0;
        self.score = 0;
        self.coins = 0;
        self.time_ticks = 0;
        self.player = Player::new(config, self.screen);
        self.projectiles.clear();
        self.enemies.clear();
        self.particles.clear();
        self.bolts.clear();
        self.cards.clear();
        self.cooldowns = AbilityCooldowns::default();
        self.flash_ticks = 0;
        self.game_over_ticks = 0;
    }

    pub fn biome(&self) -> Biome {
        Biome::for_wave(self.wave)
    }

    /// The viewport changed size
    pub fn resize(&mut self, width: f32, height: f32) {
        self.screen = Vec2::new(width, height);
        self.player.clamp_to_screen(self.screen);
    }

    /// Push a particle unless the cap is reached
    pub fn push_particle(&mut self, particle: Particle, cap: usize) {
        if self.particles.len() < cap {
            self.particles.push(particle);
        }
    }
}
