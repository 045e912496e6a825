//! Between-wave upgrade cards
//!
//! Clearing a wave offers three cards; the pick changes the wizard for the
//! rest of the run. Stat cards cap at `MAX_LEVEL`.

use glam::Vec2;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::state::{GameState, WAND_COLORS};

/// Highest level of a stat card
pub const MAX_LEVEL: u8 = 3;
pub const CARDS_OFFERED: usize = 3;

/// Max health gained (and healed) by Vitality Boost
pub const VITALITY_HEALTH: u32 = 50;
/// Attack cooldown frames removed per Swift Caster level
pub const SWIFT_STEP: u32 = 3;
pub const MIN_ATTACK_COOLDOWN: u32 = 5;
/// Vertical gap between bolts of one volley
pub const MULTISHOT_SPREAD: f32 = 15.0;
pub const TREASURE_COINS: u64 = 500;
pub const BONUS_COINS: u64 = 200;

pub const CARD_SIZE: Vec2 = Vec2::new(250.0, 350.0);
const CARD_GAP: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Upgrade {
    /// +50 max health and a full heal
    Vitality,
    /// Shorter attack cooldown
    SwiftCaster,
    /// +1 bolt damage
    ArcanePower,
    /// One more bolt per volley and a stronger wand
    FireMastery,
    /// Automatic chain lightning
    LightningStrike,
    TreasureHunter,
    /// Filler when too few cards remain
    BonusCoins,
}

impl Upgrade {
    pub fn name(&self) -> &'static str {
        match self {
            Upgrade::Vitality => "Vitality Boost",
            Upgrade::SwiftCaster => "Swift Caster",
            Upgrade::ArcanePower => "Arcane Power",
            Upgrade::FireMastery => "Fire Mastery",
            Upgrade::LightningStrike => "Lightning Strike",
            Upgrade::TreasureHunter => "Treasure Hunter",
            Upgrade::BonusCoins => "Bonus Coins",
        }
    }

    pub fn blurb(&self) -> &'static str {
        match self {
            Upgrade::Vitality => "+50 Max HP, full heal",
            Upgrade::SwiftCaster => "Faster attacks",
            Upgrade::ArcanePower => "+1 bolt damage",
            Upgrade::FireMastery => "+1 bolt per cast",
            Upgrade::LightningStrike => "Auto chain lightning",
            Upgrade::TreasureHunter => "+500 coins",
            Upgrade::BonusCoins => "+200 coins",
        }
    }

    const POOL: [Upgrade; 6] = [
        Upgrade::Vitality,
        Upgrade::SwiftCaster,
        Upgrade::ArcanePower,
        Upgrade::FireMastery,
        Upgrade::LightningStrike,
        Upgrade::TreasureHunter,
    ];
}

/// Stat card levels taken this run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeLevels {
    pub swift: u8,
    pub arcane: u8,
    pub fire: u8,
    pub lightning: bool,
}

impl UpgradeLevels {
    /// Level the card would reach, for stat cards only
    pub fn next_level(&self, upgrade: Upgrade) -> Option<u8> {
        match upgrade {
            Upgrade::SwiftCaster => Some(self.swift + 1),
            Upgrade::ArcanePower => Some(self.arcane + 1),
            Upgrade::FireMastery => Some(self.fire + 1),
            _ => None,
        }
    }

    pub fn can_take(&self, upgrade: Upgrade) -> bool {
        match upgrade {
            Upgrade::LightningStrike => !self.lightning,
            other => self.next_level(other).is_none_or(|level| level <= MAX_LEVEL),
        }
    }
}

/// Draw distinct cards from what the wizard can still take
pub fn draw_offer(state: &mut GameState) -> Vec<Upgrade> {
    let levels = state.player.upgrades;
    let mut options: Vec<Upgrade> = Upgrade::POOL
        .into_iter()
        .filter(|u| levels.can_take(*u))
        .collect();
    while options.len() < CARDS_OFFERED {
        options.push(Upgrade::BonusCoins);
    }
    options
        .choose_multiple(&mut state.rng, CARDS_OFFERED)
        .copied()
        .collect()
}

pub fn apply(state: &mut GameState, upgrade: Upgrade) {
    let player = &mut state.player;
    match upgrade {
        Upgrade::Vitality => {
            player.max_health = player.max_health.saturating_add(VITALITY_HEALTH);
            player.health = player.max_health;
        }
        Upgrade::SwiftCaster => player.upgrades.swift = (player.upgrades.swift + 1).min(MAX_LEVEL),
        Upgrade::ArcanePower => {
            player.upgrades.arcane = (player.upgrades.arcane + 1).min(MAX_LEVEL)
        }
        Upgrade::FireMastery => {
            player.upgrades.fire = (player.upgrades.fire + 1).min(MAX_LEVEL);
            player.wand_level = (player.upgrades.fire as usize).min(WAND_COLORS.len() - 1);
        }
        Upgrade::LightningStrike => player.upgrades.lightning = true,
        Upgrade::TreasureHunter => state.coins += TREASURE_COINS,
        Upgrade::BonusCoins => state.coins += BONUS_COINS,
    }
}

/// Screen box of card `index` out of `count`, centred as a row
pub fn card_rect(index: usize, count: usize, screen: Vec2) -> Rect {
    let total = count as f32 * CARD_SIZE.x + count.saturating_sub(1) as f32 * CARD_GAP;
    let x = (screen.x - total) / 2.0 + index as f32 * (CARD_SIZE.x + CARD_GAP);
    let y = ((screen.y - CARD_SIZE.y) / 2.0 + 30.0).max(110.0);
    Rect::new(Vec2::new(x, y), CARD_SIZE)
}

/// Which card, if any, a tap at `point` lands on
pub fn card_at(point: Vec2, count: usize, screen: Vec2) -> Option<usize> {
    (0..count).find(|&i| card_rect(i, count, screen).contains_point(point))
}
