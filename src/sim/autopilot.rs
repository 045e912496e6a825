//! Idle/demo mode
//!
//! Turns the current state into the input a reasonable player would give.
//! Only input flags are produced; the state is never touched here.

use super::state::{Enemy, GamePhase, GameState};
use super::tick::FrameInput;
use super::upgrades::Upgrade;

/// Closer than this and the wizard jumps away
const PANIC_DISTANCE: f32 = 100.0;
/// Ogres within this range count toward a crowd
const CROWD_DISTANCE: f32 = 250.0;
/// A crowd this large is worth a tornado
const CROWD_SIZE: usize = 3;

/// Card preference, best first
const CARD_ORDER: [Upgrade; 7] = [
    Upgrade::FireMastery,
    Upgrade::LightningStrike,
    Upgrade::ArcanePower,
    Upgrade::SwiftCaster,
    Upgrade::Vitality,
    Upgrade::TreasureHunter,
    Upgrade::BonusCoins,
];

/// Synthesize this frame's input from the state
pub fn drive(state: &GameState, input: &FrameInput) -> FrameInput {
    let mut out = FrameInput {
        pause: input.pause,
        autopilot: true,
        ..Default::default()
    };

    match state.phase {
        GamePhase::Menu | GamePhase::GameOver => {
            out.start = true;
        }
        GamePhase::Paused => {}
        GamePhase::CardSelect => out.pick = Some(choose_card(&state.cards)),
        GamePhase::Playing => play(state, &mut out),
    }
    out
}

fn play(state: &GameState, out: &mut FrameInput) {
    let player = &state.player;
    let px = player.center_x();

    let Some(target) = nearest_enemy(state, px) else {
        // Nothing to fight: wander back toward the middle
        let mid = state.screen.x / 2.0;
        if px < mid - 40.0 {
            out.right = true;
        } else if px > mid + 40.0 {
            out.left = true;
        }
        return;
    };

    let dx = target.center().x - px;
    let gap = dx.abs() - target.size.x / 2.0 - player.size.x / 2.0;

    if gap < PANIC_DISTANCE {
        // Jump over or away from the ogre
        out.jump = true;
        if dx > 0.0 {
            out.left = true;
        } else {
            out.right = true;
        }
    } else if (dx > 0.0) != player.facing_right {
        // Turn around to face the target
        if dx > 0.0 {
            out.right = true;
        } else {
            out.left = true;
        }
    }
    out.attack = true;

    let crowd = state
        .enemies
        .iter()
        .filter(|e| e.active && (e.center().x - px).abs() < CROWD_DISTANCE)
        .count();
    if crowd >= CROWD_SIZE && state.cooldowns.tornado == 0 {
        out.tornado = true;
    }
    if state.enemies.iter().any(|e| e.active && e.boss) && state.cooldowns.dragon == 0 {
        out.dragon = true;
    }
}

fn choose_card(cards: &[Upgrade]) -> usize {
    CARD_ORDER
        .iter()
        .find_map(|want| cards.iter().position(|c| c == want))
        .unwrap_or(0)
}

fn nearest_enemy(state: &GameState, x: f32) -> Option<&Enemy> {
    state.enemies.iter().filter(|e| e.active).min_by(|a, b| {
        let da = (a.center().x - x).abs();
        let db = (b.center().x - x).abs();
        da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
    })
}
