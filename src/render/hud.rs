//! Score, wave, health and ability readouts plus the phase overlays
//! (menu, paused, card choice, game over)

use glam::Vec2;

use super::colors::*;
use super::{Canvas, Font, TextAlign};
use crate::config::GameConfig;
use crate::consts::GAME_OVER_HOLD_TICKS;
use crate::sim::upgrades::{MAX_LEVEL, card_rect};
use crate::sim::{Color, GameState, Upgrade};

const HEALTH_BAR_POS: Vec2 = Vec2::new(20.0, 90.0);
const HEALTH_BAR_SIZE: Vec2 = Vec2::new(200.0, 16.0);
const HEALTH_BACK: Color = Color::rgb(120, 0, 0);
const CARD_FACE: Color = Color::rgb(40, 40, 40);
const CARD_BORDER: f32 = 4.0;

/// In-game readouts
pub fn draw_hud(canvas: &mut impl Canvas, state: &GameState, config: &GameConfig) {
    let font = Font::bold(24.0);
    canvas.fill_text(
        &format!("Score: {}", state.score),
        Vec2::new(20.0, 40.0),
        font,
        TextAlign::Left,
        GOLD,
    );
    canvas.fill_text(
        &format!("Wave: {}", state.wave),
        Vec2::new(20.0, 70.0),
        font,
        TextAlign::Left,
        WHITE,
    );
    canvas.fill_text(
        &format!(
            "Ogres: {}/{}",
            state.killed_in_wave, config.waves.kills_per_wave
        ),
        Vec2::new(state.screen.x - 20.0, 40.0),
        font,
        TextAlign::Right,
        WHITE,
    );
    canvas.fill_text(
        &format!("Coins: {}", state.coins),
        Vec2::new(state.screen.x - 20.0, 70.0),
        font,
        TextAlign::Right,
        GOLD,
    );

    let player = &state.player;
    let fraction = if player.max_health == 0 {
        0.0
    } else {
        player.health as f32 / player.max_health as f32
    };
    canvas.fill_rect(HEALTH_BAR_POS, HEALTH_BAR_SIZE, HEALTH_BACK);
    if fraction > 0.0 {
        canvas.fill_rect(
            HEALTH_BAR_POS,
            Vec2::new(HEALTH_BAR_SIZE.x * fraction.min(1.0), HEALTH_BAR_SIZE.y),
            GREEN,
        );
    }

    if config.display.show_cooldowns {
        let h = state.screen.y;
        ability_label(canvas, "Tornado [T]", state.cooldowns.tornado, Vec2::new(20.0, h - 70.0));
        ability_label(canvas, "Dragon [R]", state.cooldowns.dragon, Vec2::new(20.0, h - 100.0));
        if player.upgrades.lightning {
            let pos = Vec2::new(20.0, h - 130.0);
            ability_label(canvas, "Lightning", state.cooldowns.lightning, pos);
        }
    }
}

/// Green when ready, red with seconds remaining otherwise
fn ability_label(canvas: &mut impl Canvas, name: &str, cooldown: u32, pos: Vec2) {
    let font = Font::bold(18.0);
    if cooldown == 0 {
        canvas.fill_text(name, pos, font, TextAlign::Left, GREEN);
    } else {
        let secs = cooldown.div_ceil(60);
        canvas.fill_text(
            &format!("{name} {secs}s"),
            pos,
            font,
            TextAlign::Left,
            RED,
        );
    }
}

fn shade(canvas: &mut impl Canvas, screen: Vec2, color: Color) {
    canvas.fill_rect(Vec2::ZERO, screen, color);
}

/// Title overlay
pub fn draw_menu(canvas: &mut impl Canvas, screen: Vec2) {
    shade(canvas, screen, SHADE);
    let mid = screen / 2.0;
    canvas.fill_text(
        "WIZARD vs OGRES",
        Vec2::new(mid.x, mid.y - 50.0),
        Font::bold(60.0),
        TextAlign::Center,
        CYAN,
    );
    canvas.fill_text(
        "Tap or press any key to start",
        Vec2::new(mid.x, mid.y + 50.0),
        Font::regular(30.0),
        TextAlign::Center,
        WHITE,
    );
}

pub fn draw_paused(canvas: &mut impl Canvas, screen: Vec2) {
    shade(canvas, screen, DIM);
    let mid = screen / 2.0;
    canvas.fill_text("PAUSED", mid, Font::bold(60.0), TextAlign::Center, WHITE);
    canvas.fill_text(
        "Press Esc to resume",
        Vec2::new(mid.x, mid.y + 50.0),
        Font::regular(24.0),
        TextAlign::Center,
        GRAY,
    );
}

pub fn draw_game_over(canvas: &mut impl Canvas, state: &GameState) {
    shade(canvas, state.screen, SHADE);
    let mid = state.screen / 2.0;
    canvas.fill_text(
        "GAME OVER",
        Vec2::new(mid.x, mid.y - 50.0),
        Font::bold(60.0),
        TextAlign::Center,
        RED,
    );
    canvas.fill_text(
        &format!(
            "Score: {}  Wave: {}  Coins: {}",
            state.score, state.wave, state.coins
        ),
        Vec2::new(mid.x, mid.y + 10.0),
        Font::regular(30.0),
        TextAlign::Center,
        WHITE,
    );
    if state.game_over_ticks > GAME_OVER_HOLD_TICKS {
        canvas.fill_text(
            "Tap or press any key",
            Vec2::new(mid.x, mid.y + 60.0),
            Font::regular(24.0),
            TextAlign::Center,
            GRAY,
        );
    }
}

fn card_color(card: Upgrade) -> Color {
    match card {
        Upgrade::Vitality => GREEN,
        Upgrade::SwiftCaster => Color::rgb(255, 255, 0),
        Upgrade::ArcanePower => Color::rgb(255, 0, 255),
        Upgrade::FireMastery => Color::rgb(255, 120, 0),
        Upgrade::LightningStrike => CYAN,
        Upgrade::TreasureHunter | Upgrade::BonusCoins => GOLD,
    }
}

/// Level tag for stat cards, e.g. "(2/3)" or "(MAX)"
fn level_tag(state: &GameState, card: Upgrade) -> Option<String> {
    let level = state.player.upgrades.next_level(card)?;
    Some(if level >= MAX_LEVEL {
        "(MAX)".to_string()
    } else {
        format!("({level}/{MAX_LEVEL})")
    })
}

/// Between-wave card choice
pub fn draw_card_select(canvas: &mut impl Canvas, state: &GameState) {
    let screen = state.screen;
    shade(canvas, screen, SHADE);
    canvas.fill_text(
        &format!("WAVE {} CLEARED!", state.wave.saturating_sub(1)),
        Vec2::new(screen.x / 2.0, 80.0),
        Font::bold(48.0),
        TextAlign::Center,
        GOLD,
    );

    let count = state.cards.len();
    for (i, &card) in state.cards.iter().enumerate() {
        let rect = card_rect(i, count, screen);
        let color = card_color(card);
        canvas.fill_rect(rect.min, rect.size, color);
        canvas.fill_rect(
            rect.min + Vec2::splat(CARD_BORDER),
            rect.size - Vec2::splat(CARD_BORDER * 2.0),
            CARD_FACE,
        );

        let mid_x = rect.min.x + rect.size.x / 2.0;
        canvas.fill_text(
            card.name(),
            Vec2::new(mid_x, rect.min.y + 60.0),
            Font::bold(24.0),
            TextAlign::Center,
            color,
        );
        if let Some(tag) = level_tag(state, card) {
            canvas.fill_text(
                &tag,
                Vec2::new(mid_x, rect.min.y + 90.0),
                Font::regular(18.0),
                TextAlign::Center,
                GRAY,
            );
        }
        canvas.fill_text(
            card.blurb(),
            Vec2::new(mid_x, rect.min.y + rect.size.y / 2.0 + 20.0),
            Font::regular(18.0),
            TextAlign::Center,
            WHITE,
        );
        canvas.fill_text(
            &format!("[{}]", i + 1),
            Vec2::new(mid_x, rect.min.y + rect.size.y - 30.0),
            Font::bold(24.0),
            TextAlign::Center,
            GRAY,
        );
    }

    let bottom = if count > 0 {
        card_rect(0, count, screen).max().y
    } else {
        screen.y / 2.0
    };
    canvas.fill_text(
        "Tap a card or press 1-3",
        Vec2::new(screen.x / 2.0, bottom + 40.0),
        Font::regular(24.0),
        TextAlign::Center,
        WHITE,
    );
}

/// Dragon strike feedback; the red wash is skipped for reduced motion
pub fn draw_dragon_flash(canvas: &mut impl Canvas, screen: Vec2, wash: bool) {
    if wash {
        shade(canvas, screen, FLASH);
    }
    canvas.fill_text(
        "DRAGON!",
        screen / 2.0,
        Font::bold(50.0),
        TextAlign::Center,
        RED,
    );
}
