//! Frame driver
//!
//! Owns the simulation, the latched input and the config. Each display
//! refresh is one `frame`: snapshot input, tick, render, clear one-shots.

use glam::Vec2;
use serde::Serialize;

use crate::config::GameConfig;
use crate::platform::InputState;
use crate::render::{Canvas, render_frame};
use crate::sim::upgrades::card_at;
use crate::sim::{GamePhase, GameState, tick};

/// Game instance holding all state
pub struct Game {
    pub state: GameState,
    pub input: InputState,
    pub config: GameConfig,
    last_phase: GamePhase,
}

/// Snapshot of a run for logs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub seed: u64,
    pub phase: GamePhase,
    pub wave: u32,
    pub score: u64,
    pub kills: u32,
    pub coins: u64,
    pub health: u32,
    pub ticks: u64,
}

impl Game {
    pub fn new(config: GameConfig, seed: u64, width: f32, height: f32) -> Self {
        let state = GameState::new(seed, &config, Vec2::new(width, height));
        Self {
            last_phase: state.phase,
            state,
            input: InputState::default(),
            config,
        }
    }

    /// Run one frame and draw it
    pub fn frame(&mut self, canvas: &mut impl Canvas) {
        let mut input = self.input.frame_input();
        if self.state.phase == GamePhase::CardSelect && input.pick.is_none() {
            input.pick = self
                .input
                .tap_position()
                .and_then(|pos| card_at(pos, self.state.cards.len(), self.state.screen));
        }
        tick(&mut self.state, &input, &self.config);
        render_frame(canvas, &self.state, &self.config);
        self.input.clear_one_shots();

        let phase = self.state.phase;
        if phase != self.last_phase {
            log::debug!("Phase {:?} -> {:?}", self.last_phase, phase);
            self.last_phase = phase;
        }
    }

    /// Viewport changed size
    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.resize(width, height);
        log::info!("Resized to {width}x{height}");
    }

    /// Window lost focus or the tab was hidden
    pub fn suspend(&mut self) {
        self.input.release_all();
        if self.state.phase == GamePhase::Playing {
            self.input.request_pause();
            log::info!("Auto-paused");
        }
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            seed: self.state.seed,
            phase: self.state.phase,
            wave: self.state.wave,
            score: self.state.score,
            kills: self.state.total_kills,
            coins: self.state.coins,
            health: self.state.player.health,
            ticks: self.state.time_ticks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
    use crate::render::RecordingCanvas;
    use crate::sim::Upgrade;
    use crate::sim::upgrades::card_rect;

    fn new_game() -> Game {
        Game::new(GameConfig::default(), 11, SCREEN_WIDTH, SCREEN_HEIGHT)
    }

    #[test]
    fn test_any_key_starts_and_one_shots_clear() {
        let mut game = new_game();
        let mut canvas = RecordingCanvas::new();

        game.frame(&mut canvas);
        assert_eq!(game.state.phase, GamePhase::Menu);
        assert!(canvas.contains_text("WIZARD vs OGRES"));

        game.input.key_down("KeyQ", false);
        canvas.clear();
        game.frame(&mut canvas);
        assert_eq!(game.state.phase, GamePhase::Playing);
        assert!(!game.input.frame_input().start);
        assert!(canvas.contains_text("Wave: 1"));
    }

    #[test]
    fn test_suspend_pauses_and_releases() {
        let mut game = new_game();
        let mut canvas = RecordingCanvas::new();
        game.input.any_input();
        game.frame(&mut canvas);
        game.input.key_down("ArrowRight", false);
        game.frame(&mut canvas);

        game.suspend();
        assert!(!game.input.frame_input().right);
        game.frame(&mut canvas);
        assert_eq!(game.state.phase, GamePhase::Paused);

        // Paused stays paused until the toggle
        game.frame(&mut canvas);
        assert_eq!(game.state.phase, GamePhase::Paused);
        game.input.key_down("Escape", false);
        game.frame(&mut canvas);
        assert_eq!(game.state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_suspend_on_menu_does_not_pause() {
        let mut game = new_game();
        game.suspend();
        assert!(!game.input.frame_input().pause);
    }

    #[test]
    fn test_tap_on_card_picks_it() {
        let mut game = new_game();
        let mut canvas = RecordingCanvas::new();
        game.input.any_input();
        game.frame(&mut canvas);

        game.state.phase = GamePhase::CardSelect;
        game.state.cards = vec![Upgrade::Vitality, Upgrade::ArcanePower, Upgrade::SwiftCaster];
        game.input.tap(Vec2::new(5.0, 5.0));
        game.frame(&mut canvas);
        assert_eq!(game.state.phase, GamePhase::CardSelect, "missed every card");

        let centre = card_rect(1, 3, game.state.screen).center();
        game.input.tap(centre);
        game.frame(&mut canvas);
        assert_eq!(game.state.phase, GamePhase::Playing);
        assert_eq!(game.state.player.upgrades.arcane, 1);
    }

    #[test]
    fn test_same_seed_same_run() {
        let run = || {
            let mut game = new_game();
            game.input.autopilot = true;
            let mut canvas = RecordingCanvas::new();
            for _ in 0..1500 {
                canvas.clear();
                game.frame(&mut canvas);
            }
            game.summary()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_summary_serializes() {
        let game = new_game();
        let json = serde_json::to_string(&game.summary()).expect("serializable");
        assert!(json.contains("\"phase\":\"Menu\""));
        assert!(json.contains("\"seed\":11"));
    }
}
