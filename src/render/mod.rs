//! Canvas rendering
//!
//! The renderer only reads `GameState`; everything it draws goes through the
//! `Canvas` trait so the same code targets the browser's 2D context and the
//! headless `RecordingCanvas`.

pub mod background;
pub mod hud;
pub mod recording;
pub mod sprites;
#[cfg(target_arch = "wasm32")]
pub mod web;

use glam::Vec2;

use crate::config::GameConfig;
use crate::sim::{Color, GamePhase, GameState};

pub use recording::{DrawCommand, RecordingCanvas};
#[cfg(target_arch = "wasm32")]
pub use web::WebCanvas;

/// Horizontal anchor for text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// Font size and weight (the face is always Arial)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub size: f32,
    pub bold: bool,
}

impl Font {
    pub const fn regular(size: f32) -> Self {
        Self { size, bold: false }
    }

    pub const fn bold(size: f32) -> Self {
        Self { size, bold: true }
    }

    /// CSS font shorthand
    pub fn to_css(&self) -> String {
        if self.bold {
            format!("bold {}px Arial", self.size)
        } else {
            format!("{}px Arial", self.size)
        }
    }
}

/// The drawing capability the game needs from a surface
pub trait Canvas {
    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color);
    /// Rectangle filled with a top-to-bottom gradient
    fn fill_gradient_rect(&mut self, pos: Vec2, size: Vec2, top: Color, bottom: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color);
    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color);
    fn fill_polygon(&mut self, points: &[Vec2], color: Color);
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color);
    fn fill_text(&mut self, text: &str, pos: Vec2, font: Font, align: TextAlign, color: Color);
}

/// Colors for screen-wide elements
pub mod colors {
    use crate::sim::Color;

    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 50, 50);
    pub const GREEN: Color = Color::rgb(50, 255, 50);
    pub const CYAN: Color = Color::rgb(0, 255, 255);
    pub const GOLD: Color = Color::rgb(255, 215, 0);
    pub const GRAY: Color = Color::rgb(160, 160, 160);
    pub const SHADE: Color = Color::rgba(0, 0, 0, 178);
    pub const DIM: Color = Color::rgba(0, 0, 0, 128);
    pub const FLASH: Color = Color::rgba(255, 0, 0, 128);
}

/// Draw one complete frame
pub fn render_frame(canvas: &mut impl Canvas, state: &GameState, config: &GameConfig) {
    background::draw(canvas, state.biome(), state.screen);

    if state.phase == GamePhase::Menu {
        hud::draw_menu(canvas, state.screen);
        return;
    }

    for enemy in &state.enemies {
        sprites::draw_enemy(canvas, enemy);
    }
    sprites::draw_player(canvas, &state.player);
    for projectile in &state.projectiles {
        sprites::draw_projectile(canvas, projectile);
    }
    for particle in &state.particles {
        sprites::draw_particle(canvas, particle);
    }
    for bolt in &state.bolts {
        sprites::draw_lightning(canvas, bolt);
    }

    hud::draw_hud(canvas, state, config);

    if state.flash_ticks > 0 {
        hud::draw_dragon_flash(canvas, state.screen, config.flash_enabled());
    }

    match state.phase {
        GamePhase::Paused => hud::draw_paused(canvas, state.screen),
        GamePhase::CardSelect => hud::draw_card_select(canvas, state),
        GamePhase::GameOver => hud::draw_game_over(canvas, state),
        _ => {}
    }
}
