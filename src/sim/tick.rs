//! Per-frame simulation step
//!
//! One call to `tick` is one display refresh. The order inside a Playing
//! frame is fixed: player, attack, abilities, entity steps, collisions,
//! contact damage, pruning, spawner, wave advance, particles, timers.
//! Clearing a wave moves to `CardSelect` until a card is picked.

use glam::Vec2;
use rand::Rng;

use super::autopilot;
use super::collision::{Rect, point_hits};
use super::state::{Color, Enemy, GamePhase, GameState, LightningBolt, Particle, Projectile};
use super::upgrades;
use crate::config::GameConfig;
use crate::consts::*;

/// Input flags for a single frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub attack: bool,
    /// Push every ogre away (one-shot)
    pub tornado: bool,
    /// Burn every ogre (one-shot)
    pub dragon: bool,
    /// Pause toggle (one-shot)
    pub pause: bool,
    /// Any key or touch happened this frame
    pub start: bool,
    /// Upgrade card chosen (one-shot)
    pub pick: Option<usize>,
    /// Idle/demo mode - the autopilot plays the game
    pub autopilot: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &FrameInput, config: &GameConfig) {
    let synthesized;
    let input = if input.autopilot {
        synthesized = autopilot::drive(state, input);
        &synthesized
    } else {
        input
    };

    match state.phase {
        GamePhase::Menu => {
            if input.start {
                state.reset_run(config);
                state.phase = GamePhase::Playing;
                log::info!("Run started (seed {})", state.seed);
            }
        }
        GamePhase::Paused => {
            if input.pause {
                state.phase = GamePhase::Playing;
                log::info!("Resumed");
            }
        }
        GamePhase::CardSelect => {
            age_particles(state);
            let picked = input.pick.and_then(|i| state.cards.get(i).copied());
            if let Some(card) = picked {
                upgrades::apply(state, card);
                state.cards.clear();
                state.phase = GamePhase::Playing;
                log::info!("Took {:?} before wave {}", card, state.wave);
            }
        }
        GamePhase::GameOver => {
            state.game_over_ticks = state.game_over_ticks.saturating_add(1);
            age_particles(state);
            if state.game_over_ticks > GAME_OVER_HOLD_TICKS && input.start {
                state.phase = GamePhase::Menu;
            }
        }
        GamePhase::Playing => {
            if input.pause {
                state.phase = GamePhase::Paused;
                log::info!("Paused at wave {}", state.wave);
                return;
            }
            step_playing(state, input, config);
        }
    }
}

fn step_playing(state: &mut GameState, input: &FrameInput, config: &GameConfig) {
    state.time_ticks += 1;

    update_player(state, input, config);
    try_attack(state, input, config);
    cast_abilities(state, input, config);

    let screen = state.screen;
    for projectile in &mut state.projectiles {
        projectile.update(screen.x);
    }
    let target_x = state.player.center_x();
    for enemy in &mut state.enemies {
        enemy.update(target_x, screen);
    }

    resolve_projectile_hits(state, config);
    apply_contact_damage(state, config);

    state.projectiles.retain(|p| p.active);
    state.enemies.retain(|e| e.active);

    try_spawn(state, config);
    advance_wave(state, config);

    age_particles(state);
    state.cooldowns.tornado = state.cooldowns.tornado.saturating_sub(1);
    state.cooldowns.dragon = state.cooldowns.dragon.saturating_sub(1);
    state.cooldowns.lightning = state.cooldowns.lightning.saturating_sub(1);
    state.flash_ticks = state.flash_ticks.saturating_sub(1);
}

/// Horizontal movement, jumping, gravity and screen clamping
fn update_player(state: &mut GameState, input: &FrameInput, config: &GameConfig) {
    let physics = &config.physics;
    let player = &mut state.player;

    player.vel.x = 0.0;
    if input.left {
        player.vel.x = -physics.player_speed;
        player.facing_right = false;
    }
    if input.right {
        player.vel.x = physics.player_speed;
        player.facing_right = true;
    }

    if input.jump && !player.jumping {
        player.vel.y = physics.jump_strength;
        player.jumping = true;
    }

    player.vel.y += physics.gravity;
    player.pos += player.vel;
    player.clamp_to_screen(state.screen);

    player.cooldown = player.cooldown.saturating_sub(1);
}

/// Fire a volley from the staff if the wand is ready
fn try_attack(state: &mut GameState, input: &FrameInput, config: &GameConfig) {
    let player = &mut state.player;
    if !input.attack || player.cooldown > 0 {
        return;
    }

    let offset_x = if player.facing_right {
        MUZZLE_OFFSET_RIGHT
    } else {
        MUZZLE_OFFSET_LEFT
    };
    let muzzle = player.pos + Vec2::new(offset_x, MUZZLE_OFFSET_Y);
    for dy in player.volley_offsets() {
        state.projectiles.push(Projectile::new(
            muzzle + Vec2::new(0.0, dy),
            player.facing_right,
            config.physics.projectile_speed,
            player.wand_color(),
        ));
    }
    player.cooldown = player.attack_cooldown(config);
}

fn cast_abilities(state: &mut GameState, input: &FrameInput, config: &GameConfig) {
    let abilities = &config.abilities;

    if input.tornado && state.cooldowns.tornado == 0 {
        let player_x = state.player.pos.x;
        for enemy in &mut state.enemies {
            let away = if enemy.pos.x > player_x { 1.0 } else { -1.0 };
            enemy.pos.x += abilities.tornado_push * away;
            enemy.health -= abilities.tornado_damage;
        }
        state.cooldowns.tornado = abilities.tornado_cooldown;
        log::debug!("Tornado hit {} ogres", state.enemies.len());
    }

    if input.dragon && state.cooldowns.dragon == 0 {
        for enemy in &mut state.enemies {
            enemy.health = 0;
        }
        state.cooldowns.dragon = abilities.dragon_cooldown;
        state.flash_ticks = abilities.dragon_flash_ticks;
        log::debug!("Dragon burned {} ogres", state.enemies.len());
    }

    if state.player.upgrades.lightning && state.cooldowns.lightning == 0 {
        cast_lightning(state, config);
        state.cooldowns.lightning = abilities.lightning_interval;
    }

    for i in 0..state.enemies.len() {
        if state.enemies[i].active && state.enemies[i].health <= 0 {
            defeat_enemy(state, i, config);
        }
    }
}

/// Chain lightning: the nearest ogre in reach, then the nearest to it, and so on
fn cast_lightning(state: &mut GameState, config: &GameConfig) {
    let abilities = &config.abilities;
    let mut from = state.player.rect().center();
    let mut reach = abilities.lightning_range;
    let mut struck: Vec<usize> = Vec::new();

    while struck.len() < abilities.lightning_chain {
        let next = state
            .enemies
            .iter()
            .enumerate()
            .filter(|&(i, e)| e.active && !struck.contains(&i))
            .map(|(i, e)| (i, e.center().distance(from)))
            .min_by(|a, b| a.1.total_cmp(&b.1));
        let Some((index, dist)) = next else {
            break;
        };
        if dist >= reach {
            break;
        }

        let to = state.enemies[index].center();
        state.enemies[index].health -= abilities.lightning_damage;
        state.bolts.push(LightningBolt {
            from,
            to,
            life: abilities.lightning_bolt_ticks,
            max_life: abilities.lightning_bolt_ticks,
        });
        struck.push(index);
        from = to;
        reach = abilities.lightning_chain_range;
    }

    if !struck.is_empty() {
        log::debug!("Lightning struck {} ogres", struck.len());
    }
}

/// Bolt centre inside an ogre's box: bolt spent, ogre damaged
fn resolve_projectile_hits(state: &mut GameState, config: &GameConfig) {
    let points: Vec<Vec2> = state.projectiles.iter().map(|p| p.pos).collect();
    let boxes: Vec<Rect> = state.enemies.iter().map(Enemy::rect).collect();
    let cap = config.max_particles();
    let damage = state.player.bolt_damage(config);

    for (pi, ei) in point_hits(&points, &boxes) {
        if !state.projectiles[pi].active || !state.enemies[ei].active {
            continue;
        }

        state.projectiles[pi].active = false;
        state.enemies[ei].health -= damage;

        let spark = Particle {
            pos: state.enemies[ei].center(),
            vel: Vec2::ZERO,
            color: state.projectiles[pi].color,
            life: HIT_PARTICLE_LIFE,
            max_life: HIT_PARTICLE_LIFE,
        };
        state.push_particle(spark, cap);

        if state.enemies[ei].health <= 0 {
            defeat_enemy(state, ei, config);
        }
    }
}

/// The single alive-to-dead transition of an ogre
fn defeat_enemy(state: &mut GameState, index: usize, config: &GameConfig) {
    if !state.enemies[index].active {
        return;
    }
    state.enemies[index].active = false;
    state.killed_in_wave += 1;
    state.total_kills += 1;
    state.score += config.waves.score_per_kill * state.wave as u64;
    state.coins += if state.enemies[index].boss {
        config.waves.boss_coin_value
    } else {
        config.waves.coin_value
    };

    let center = state.enemies[index].center();
    let cap = config.max_particles();
    for _ in 0..DEFEAT_PARTICLE_COUNT {
        if state.particles.len() >= cap {
            break;
        }
        let jitter = Vec2::new(
            state.rng.random_range(-15.0..=15.0),
            state.rng.random_range(-15.0..=15.0),
        );
        let vel = Vec2::new(
            state.rng.random_range(-1.0..=1.0),
            state.rng.random_range(-1.0..=1.0),
        );
        state.particles.push(Particle {
            pos: center + jitter,
            vel,
            color: Color::rgb(0, 255, 0),
            life: DEFEAT_PARTICLE_LIFE,
            max_life: DEFEAT_PARTICLE_LIFE,
        });
    }
}

/// Ogres touching the wizard wear down his health
fn apply_contact_damage(state: &mut GameState, config: &GameConfig) {
    let player_rect = state.player.rect();
    let touching = state
        .enemies
        .iter()
        .filter(|e| e.active && e.rect().overlaps(&player_rect))
        .count() as u32;
    if touching == 0 {
        return;
    }

    let damage = touching.saturating_mul(config.player.contact_damage);
    state.player.health = state.player.health.saturating_sub(damage);
    if state.player.health == 0 {
        state.phase = GamePhase::GameOver;
        state.game_over_ticks = 0;
        state.flash_ticks = 0;
        log::info!(
            "Game over at wave {} with score {} ({} kills, {} coins)",
            state.wave,
            state.score,
            state.total_kills,
            state.coins
        );
    }
}

/// Spawn an ogre with a small per-frame chance while under both caps
fn try_spawn(state: &mut GameState, config: &GameConfig) {
    let waves = &config.waves;
    if state.enemies.len() >= waves.max_alive || state.spawned_in_wave >= waves.spawns_per_wave {
        return;
    }
    if !state.rng.random_bool(waves.spawn_chance.clamp(0.0, 1.0)) {
        return;
    }

    let from_right = state.rng.random_bool(0.5);
    let x = if from_right {
        state.screen.x + SPAWN_OFFSET_RIGHT
    } else {
        SPAWN_OFFSET_LEFT
    };
    let boss = is_boss_spawn(state.wave, state.spawned_in_wave, config);
    state
        .enemies
        .push(Enemy::spawn(config, x, state.wave, boss, state.screen));
    state.spawned_in_wave += 1;

    if boss {
        log::info!("Boss spawned in wave {}", state.wave);
    } else {
        log::debug!(
            "Ogre {}/{} spawned in wave {}",
            state.spawned_in_wave,
            waves.spawns_per_wave,
            state.wave
        );
    }
}

/// The boss is the last spawn of the boss wave
pub fn is_boss_spawn(wave: u32, spawned_so_far: u32, config: &GameConfig) -> bool {
    wave == config.waves.boss_wave && spawned_so_far + 1 == config.waves.spawns_per_wave
}

/// Clear the wave once its kill quota is met
fn advance_wave(state: &mut GameState, config: &GameConfig) {
    if state.killed_in_wave < config.waves.kills_per_wave {
        return;
    }
    let previous = state.biome();
    state.wave += 1;
    state.spawned_in_wave = 0;
    state.killed_in_wave = 0;

    let biome = state.biome();
    if biome != previous {
        log::info!("Wave {} begins in the {}", state.wave, biome.as_str());
    } else {
        log::info!("Wave {} begins", state.wave);
    }

    if config.waves.upgrade_cards && state.phase == GamePhase::Playing {
        state.cards = upgrades::draw_offer(state);
        state.phase = GamePhase::CardSelect;
    }
}

/// Age sparks and lightning segments
fn age_particles(state: &mut GameState) {
    for particle in &mut state.particles {
        particle.life = particle.life.saturating_sub(1);
        particle.pos += particle.vel;
    }
    state.particles.retain(|p| p.life > 0);

    for bolt in &mut state.bolts {
        bolt.life = bolt.life.saturating_sub(1);
    }
    state.bolts.retain(|b| b.life > 0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::WAND_COLORS;
    use crate::sim::upgrades::Upgrade;
    use proptest::prelude::*;

    fn screen() -> Vec2 {
        Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }

    /// Config with no random spawns so tests control the field
    fn quiet_config() -> GameConfig {
        let mut config = GameConfig::default();
        config.waves.spawn_chance = 0.0;
        config
    }

    fn playing_state(config: &GameConfig) -> GameState {
        let mut state = GameState::new(12345, config, screen());
        let start = FrameInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &start, config);
        assert_eq!(state.phase, GamePhase::Playing);
        state
    }

    /// A stationary ogre parked at `x` on the ground
    fn parked_ogre(config: &GameConfig, x: f32, health: i32) -> Enemy {
        let mut e = Enemy::spawn(config, x, 1, false, screen());
        e.health = health;
        e.speed = 0.0;
        e
    }

    #[test]
    fn test_menu_waits_for_input() {
        let config = quiet_config();
        let mut state = GameState::new(1, &config, screen());
        tick(&mut state, &FrameInput::default(), &config);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.time_ticks, 0);

        let attack = FrameInput {
            attack: true,
            start: true,
            ..Default::default()
        };
        tick(&mut state, &attack, &config);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.projectiles.is_empty(), "the start frame does not simulate");
    }

    #[test]
    fn test_pause_toggle() {
        let config = quiet_config();
        let mut state = playing_state(&config);
        let pause = FrameInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, &config);
        assert_eq!(state.phase, GamePhase::Paused);

        let ticks = state.time_ticks;
        let walk = FrameInput {
            right: true,
            ..Default::default()
        };
        let x = state.player.pos.x;
        tick(&mut state, &walk, &config);
        assert_eq!(state.player.pos.x, x);
        assert_eq!(state.time_ticks, ticks);

        tick(&mut state, &pause, &config);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_player_clamped_at_left_edge() {
        let config = quiet_config();
        let mut state = playing_state(&config);
        let left = FrameInput {
            left: true,
            ..Default::default()
        };
        for _ in 0..100 {
            tick(&mut state, &left, &config);
        }
        assert_eq!(state.player.pos.x, 0.0);
        assert!(!state.player.facing_right);
    }

    #[test]
    fn test_jump_lands_back_on_ground() {
        let config = quiet_config();
        let mut state = playing_state(&config);
        let floor = state.player.pos.y;
        let jump = FrameInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &jump, &config);
        assert!(state.player.jumping);
        assert!(state.player.pos.y < floor);

        for _ in 0..120 {
            tick(&mut state, &FrameInput::default(), &config);
        }
        assert!(!state.player.jumping);
        assert_eq!(state.player.pos.y, floor);
    }

    #[test]
    fn test_attack_respects_cooldown() {
        let config = quiet_config();
        let mut state = playing_state(&config);
        let attack = FrameInput {
            attack: true,
            ..Default::default()
        };
        tick(&mut state, &attack, &config);
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.player.cooldown, 15);

        let p = &state.projectiles[0];
        assert_eq!(p.vel_x, 12.0);
        // Spawned at the muzzle, then stepped once in the same frame
        assert_eq!(p.pos.x, state.player.pos.x + MUZZLE_OFFSET_RIGHT + 12.0);
        assert_eq!(p.pos.y, state.player.pos.y + MUZZLE_OFFSET_Y);

        for _ in 0..14 {
            tick(&mut state, &attack, &config);
        }
        assert_eq!(state.projectiles.len(), 1);
        tick(&mut state, &attack, &config);
        assert_eq!(state.projectiles.len(), 2);
    }

    #[test]
    fn test_projectiles_leave_screen_and_are_pruned() {
        let config = quiet_config();
        let mut state = playing_state(&config);
        state
            .projectiles
            .push(Projectile::new(Vec2::new(5.0, 300.0), false, 12.0, Color::rgb(9, 9, 9)));
        tick(&mut state, &FrameInput::default(), &config);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_hit_damages_and_spends_projectile() {
        let config = quiet_config();
        let mut state = playing_state(&config);
        let ogre = parked_ogre(&config, 600.0, 4);
        let inside = ogre.center() - Vec2::new(12.0, 0.0);
        state.enemies.push(ogre);
        state
            .projectiles
            .push(Projectile::new(inside, true, 12.0, Color::rgb(255, 0, 0)));

        tick(&mut state, &FrameInput::default(), &config);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].health, 2);
        assert_eq!(state.killed_in_wave, 0);
        assert_eq!(state.particles.len(), 1);
        assert_eq!(state.particles[0].color, Color::rgb(255, 0, 0));
    }

    #[test]
    fn test_enemy_defeated_exactly_once_by_many_bolts() {
        let config = quiet_config();
        let mut state = playing_state(&config);
        let ogre = parked_ogre(&config, 600.0, 2);
        let inside = ogre.center() - Vec2::new(12.0, 0.0);
        state.enemies.push(ogre);
        for _ in 0..3 {
            state
                .projectiles
                .push(Projectile::new(inside, true, 12.0, Color::rgb(255, 0, 0)));
        }

        tick(&mut state, &FrameInput::default(), &config);
        assert!(state.enemies.is_empty());
        assert_eq!(state.killed_in_wave, 1);
        assert_eq!(state.total_kills, 1);
        assert_eq!(state.score, 10);
        assert_eq!(state.coins, config.waves.coin_value);
        // Only the first bolt was spent; the others fly on
        assert_eq!(state.projectiles.len(), 2);
    }

    #[test]
    fn test_tornado_pushes_away_and_damages() {
        let config = quiet_config();
        let mut state = playing_state(&config);
        let player_x = state.player.pos.x;
        state.enemies.push(parked_ogre(&config, player_x + 200.0, 10));
        state.enemies.push(parked_ogre(&config, player_x - 150.0, 10));

        let tornado = FrameInput {
            tornado: true,
            ..Default::default()
        };
        tick(&mut state, &tornado, &config);
        assert_eq!(state.enemies[0].pos.x, player_x + 500.0);
        assert_eq!(state.enemies[1].pos.x, player_x - 450.0);
        assert_eq!(state.enemies[0].health, 5);
        assert_eq!(state.enemies[1].health, 5);
        assert_eq!(state.cooldowns.tornado, config.abilities.tornado_cooldown - 1);

        // On cooldown: a second cast does nothing
        tick(&mut state, &tornado, &config);
        assert_eq!(state.enemies[0].health, 5);
    }

    #[test]
    fn test_tornado_kill_counts() {
        let config = quiet_config();
        let mut state = playing_state(&config);
        state.enemies.push(parked_ogre(&config, 900.0, 5));
        let tornado = FrameInput {
            tornado: true,
            ..Default::default()
        };
        tick(&mut state, &tornado, &config);
        assert!(state.enemies.is_empty());
        assert_eq!(state.killed_in_wave, 1);
    }

    #[test]
    fn test_dragon_clears_field_and_flashes() {
        let config = quiet_config();
        let mut state = playing_state(&config);
        for i in 0..4 {
            state
                .enemies
                .push(parked_ogre(&config, 400.0 + i as f32 * 100.0, 50));
        }
        let dragon = FrameInput {
            dragon: true,
            ..Default::default()
        };
        tick(&mut state, &dragon, &config);
        assert!(state.enemies.is_empty());
        assert_eq!(state.killed_in_wave, 4);
        assert_eq!(state.flash_ticks, config.abilities.dragon_flash_ticks - 1);
        assert!(state.cooldowns.dragon > 0);
    }

    #[test]
    fn test_wave_advances_after_quota() {
        let config = quiet_config();
        let mut state = playing_state(&config);
        state.killed_in_wave = 9;
        state.spawned_in_wave = 10;
        state.enemies.push(parked_ogre(&config, 900.0, 1));
        let dragon = FrameInput {
            dragon: true,
            ..Default::default()
        };
        tick(&mut state, &dragon, &config);
        assert_eq!(state.wave, 2);
        assert_eq!(state.killed_in_wave, 0);
        assert_eq!(state.spawned_in_wave, 0);
        assert_eq!(state.phase, GamePhase::CardSelect);
        assert_eq!(state.cards.len(), upgrades::CARDS_OFFERED);
    }

    #[test]
    fn test_card_pick_resumes_wave() {
        let config = quiet_config();
        let mut state = playing_state(&config);
        state.killed_in_wave = 9;
        state.enemies.push(parked_ogre(&config, 900.0, 1));
        let dragon = FrameInput {
            dragon: true,
            ..Default::default()
        };
        tick(&mut state, &dragon, &config);
        assert_eq!(state.phase, GamePhase::CardSelect);
        state.cards = vec![Upgrade::ArcanePower, Upgrade::FireMastery, Upgrade::Vitality];

        // Nothing moves while the cards are up
        let ticks = state.time_ticks;
        let walk = FrameInput {
            right: true,
            attack: true,
            ..Default::default()
        };
        tick(&mut state, &walk, &config);
        assert_eq!(state.time_ticks, ticks);
        assert!(state.projectiles.is_empty());

        // A pick outside the offer is ignored
        let stray = FrameInput {
            pick: Some(7),
            ..Default::default()
        };
        tick(&mut state, &stray, &config);
        assert_eq!(state.phase, GamePhase::CardSelect);

        let pick = FrameInput {
            pick: Some(1),
            ..Default::default()
        };
        tick(&mut state, &pick, &config);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.cards.is_empty());
        assert_eq!(state.player.upgrades.fire, 1);
        assert_eq!(state.player.wand_level, 1);
        assert_eq!(state.wave, 2);
    }

    #[test]
    fn test_cards_can_be_switched_off() {
        let mut config = quiet_config();
        config.waves.upgrade_cards = false;
        let mut state = playing_state(&config);
        state.killed_in_wave = 9;
        state.enemies.push(parked_ogre(&config, 900.0, 1));
        let dragon = FrameInput {
            dragon: true,
            ..Default::default()
        };
        tick(&mut state, &dragon, &config);
        assert_eq!(state.wave, 2);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.cards.is_empty());
    }

    #[test]
    fn test_fire_mastery_volley() {
        let config = quiet_config();
        let mut state = playing_state(&config);
        upgrades::apply(&mut state, Upgrade::FireMastery);
        upgrades::apply(&mut state, Upgrade::SwiftCaster);
        let attack = FrameInput {
            attack: true,
            ..Default::default()
        };
        tick(&mut state, &attack, &config);
        assert_eq!(state.projectiles.len(), 2);
        let muzzle_y = state.player.pos.y + MUZZLE_OFFSET_Y;
        assert_eq!(state.projectiles[0].pos.y, muzzle_y - 7.5);
        assert_eq!(state.projectiles[1].pos.y, muzzle_y + 7.5);
        assert!(state.projectiles.iter().all(|p| p.color == WAND_COLORS[1]));
        assert_eq!(state.player.cooldown, 12);
    }

    #[test]
    fn test_arcane_power_adds_bolt_damage() {
        let config = quiet_config();
        let mut state = playing_state(&config);
        upgrades::apply(&mut state, Upgrade::ArcanePower);
        let ogre = parked_ogre(&config, 600.0, 10);
        let inside = ogre.center() - Vec2::new(12.0, 0.0);
        state.enemies.push(ogre);
        state
            .projectiles
            .push(Projectile::new(inside, true, 12.0, Color::rgb(255, 0, 0)));
        tick(&mut state, &FrameInput::default(), &config);
        assert_eq!(state.enemies[0].health, 7);
    }

    #[test]
    fn test_lightning_locked_until_taken() {
        let config = quiet_config();
        let mut state = playing_state(&config);
        state.enemies.push(parked_ogre(&config, 400.0, 20));
        tick(&mut state, &FrameInput::default(), &config);
        assert_eq!(state.enemies[0].health, 20);
        assert!(state.bolts.is_empty());
    }

    #[test]
    fn test_lightning_chains_to_nearest() {
        let config = quiet_config();
        let mut state = playing_state(&config);
        upgrades::apply(&mut state, Upgrade::LightningStrike);
        for x in [700.0, 400.0, 1000.0, 1200.0] {
            state.enemies.push(parked_ogre(&config, x, 20));
        }

        tick(&mut state, &FrameInput::default(), &config);
        let health: Vec<i32> = state.enemies.iter().map(|e| e.health).collect();
        assert_eq!(health, vec![15, 15, 15, 20]);
        assert_eq!(state.bolts.len(), 3);
        assert_eq!(state.bolts[0].from, state.player.rect().center());
        assert_eq!(state.bolts[0].to, state.enemies[1].center());
        assert_eq!(state.bolts[1].from, state.enemies[1].center());
        assert_eq!(state.bolts[1].to, state.enemies[0].center());
        assert_eq!(state.bolts[2].life, config.abilities.lightning_bolt_ticks - 1);
        assert_eq!(
            state.cooldowns.lightning,
            config.abilities.lightning_interval - 1
        );

        // Waits for the timer
        tick(&mut state, &FrameInput::default(), &config);
        assert_eq!(state.enemies[1].health, 15);

        for _ in 0..config.abilities.lightning_bolt_ticks {
            tick(&mut state, &FrameInput::default(), &config);
        }
        assert!(state.bolts.is_empty());
    }

    #[test]
    fn test_lightning_range_and_kills() {
        let config = quiet_config();
        let mut state = playing_state(&config);
        upgrades::apply(&mut state, Upgrade::LightningStrike);
        state.enemies.push(parked_ogre(&config, 1150.0, 20));
        tick(&mut state, &FrameInput::default(), &config);
        assert_eq!(state.enemies[0].health, 20, "out of reach");
        assert!(state.bolts.is_empty());

        state.cooldowns.lightning = 0;
        state.enemies.push(parked_ogre(&config, 300.0, 5));
        tick(&mut state, &FrameInput::default(), &config);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.killed_in_wave, 1);
        assert_eq!(state.coins, config.waves.coin_value);
    }

    #[test]
    fn test_boss_pays_boss_coins() {
        let config = quiet_config();
        let mut state = playing_state(&config);
        let mut boss = Enemy::spawn(&config, 800.0, 5, true, screen());
        boss.speed = 0.0;
        boss.health = 1;
        let inside = boss.center() - Vec2::new(12.0, 0.0);
        state.enemies.push(boss);
        state.enemies.push(parked_ogre(&config, 500.0, 1));
        state
            .projectiles
            .push(Projectile::new(inside, true, 12.0, Color::rgb(255, 0, 0)));
        let ogre_hit = state.enemies[1].center() - Vec2::new(12.0, 0.0);
        state
            .projectiles
            .push(Projectile::new(ogre_hit, true, 12.0, Color::rgb(255, 0, 0)));

        tick(&mut state, &FrameInput::default(), &config);
        assert!(state.enemies.is_empty());
        assert_eq!(
            state.coins,
            config.waves.boss_coin_value + config.waves.coin_value
        );
    }

    #[test]
    fn test_spawner_respects_caps() {
        let mut config = GameConfig::default();
        config.waves.spawn_chance = 1.0;
        let mut state = playing_state(&config);
        state.player.health = u32::MAX;

        tick(&mut state, &FrameInput::default(), &config);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.spawned_in_wave, 1);

        for _ in 0..10 {
            tick(&mut state, &FrameInput::default(), &config);
        }
        assert_eq!(state.enemies.len(), config.waves.max_alive);
        assert_eq!(state.spawned_in_wave, config.waves.max_alive as u32);
    }

    #[test]
    fn test_spawn_budget_per_wave() {
        let mut config = GameConfig::default();
        config.waves.spawn_chance = 1.0;
        config.waves.max_alive = 100;
        let mut state = playing_state(&config);
        state.player.health = u32::MAX;
        for _ in 0..30 {
            tick(&mut state, &FrameInput::default(), &config);
        }
        assert_eq!(state.spawned_in_wave, 10);
        assert_eq!(state.enemies.len(), 10);
    }

    #[test]
    fn test_spawned_ogre_enters_from_offscreen() {
        let mut config = GameConfig::default();
        config.waves.spawn_chance = 1.0;
        let mut state = playing_state(&config);
        tick(&mut state, &FrameInput::default(), &config);
        let e = &state.enemies[0];
        assert!(e.pos.x < 0.0 || e.pos.x > state.screen.x - 10.0);
        assert_eq!(e.pos.y + e.size.y, state.screen.y - GROUND_HEIGHT);
        assert!(!e.boss);
    }

    #[test]
    fn test_boss_rule() {
        let config = GameConfig::default();
        assert!(is_boss_spawn(5, 9, &config));
        assert!(!is_boss_spawn(5, 8, &config));
        assert!(!is_boss_spawn(4, 9, &config));
        assert!(!is_boss_spawn(6, 9, &config));
        assert!(!is_boss_spawn(1, 0, &config));
    }

    #[test]
    fn test_boss_spawns_as_tenth_of_wave_five() {
        let mut config = GameConfig::default();
        config.waves.spawn_chance = 1.0;
        config.waves.max_alive = 100;
        let mut state = playing_state(&config);
        state.player.health = u32::MAX;
        state.wave = 5;

        for _ in 0..10 {
            tick(&mut state, &FrameInput::default(), &config);
        }
        assert_eq!(state.spawned_in_wave, 10);
        let bosses: Vec<_> = state.enemies.iter().filter(|e| e.boss).collect();
        assert_eq!(bosses.len(), 1);
        assert!(state.enemies[9].boss);
        assert_eq!(state.enemies[9].health, 50);
    }

    #[test]
    fn test_contact_damage_ends_run() {
        let mut config = quiet_config();
        config.player.max_health = 3;
        let mut state = playing_state(&config);
        let on_top = state.player.pos.x;
        state.enemies.push(parked_ogre(&config, on_top, 100));

        for _ in 0..2 {
            tick(&mut state, &FrameInput::default(), &config);
        }
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.health, 1);
        tick(&mut state, &FrameInput::default(), &config);
        assert_eq!(state.phase, GamePhase::GameOver);

        // Input is ignored for a moment, then any input returns to the menu
        let start = FrameInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &start, &config);
        assert_eq!(state.phase, GamePhase::GameOver);
        for _ in 0..GAME_OVER_HOLD_TICKS {
            tick(&mut state, &FrameInput::default(), &config);
        }
        tick(&mut state, &start, &config);
        assert_eq!(state.phase, GamePhase::Menu);

        // And the next start is a fresh run
        tick(&mut state, &start, &config);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.health, 3);
        assert!(state.enemies.is_empty());
        assert_eq!(state.wave, 1);
    }

    #[test]
    fn test_game_over_clears_dragon_flash() {
        let mut config = quiet_config();
        config.player.max_health = 1;
        let mut state = playing_state(&config);
        let on_top = state.player.pos.x;
        state.enemies.push(parked_ogre(&config, on_top, 100));
        state.flash_ticks = config.abilities.dragon_flash_ticks;

        tick(&mut state, &FrameInput::default(), &config);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.flash_ticks, 0);
        tick(&mut state, &FrameInput::default(), &config);
        assert_eq!(state.flash_ticks, 0);
    }

    #[test]
    fn test_particles_expire() {
        let config = quiet_config();
        let mut state = playing_state(&config);
        state.particles.push(Particle {
            pos: Vec2::new(10.0, 10.0),
            vel: Vec2::new(1.0, 0.0),
            color: Color::rgb(0, 255, 0),
            life: 2,
            max_life: 2,
        });
        tick(&mut state, &FrameInput::default(), &config);
        assert_eq!(state.particles.len(), 1);
        assert_eq!(state.particles[0].pos.x, 11.0);
        tick(&mut state, &FrameInput::default(), &config);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_determinism() {
        let mut config = GameConfig::default();
        config.waves.spawn_chance = 0.2;
        let mut state1 = GameState::new(99999, &config, screen());
        let mut state2 = GameState::new(99999, &config, screen());

        let inputs = [
            FrameInput {
                start: true,
                ..Default::default()
            },
            FrameInput {
                right: true,
                attack: true,
                ..Default::default()
            },
            FrameInput {
                jump: true,
                ..Default::default()
            },
            FrameInput::default(),
        ];

        for _ in 0..50 {
            for input in &inputs {
                tick(&mut state1, input, &config);
                tick(&mut state2, input, &config);
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.enemies.len(), state2.enemies.len());
        assert_eq!(state1.spawned_in_wave, state2.spawned_in_wave);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.player.pos, state2.player.pos);
    }

    fn frame_input() -> impl Strategy<Value = FrameInput> {
        (
            any::<bool>(),
            any::<bool>(),
            any::<bool>(),
            any::<bool>(),
            any::<bool>(),
            any::<bool>(),
            proptest::option::of(0usize..3),
        )
            .prop_map(|(left, right, jump, attack, tornado, dragon, pick)| FrameInput {
                left,
                right,
                jump,
                attack,
                tornado,
                dragon,
                pick,
                ..Default::default()
            })
    }

    proptest! {
        #[test]
        fn prop_player_stays_on_screen(
            seed in any::<u64>(),
            inputs in proptest::collection::vec(frame_input(), 1..400),
        ) {
            let mut config = GameConfig::default();
            config.waves.spawn_chance = 0.3;
            config.player.max_health = u32::MAX;
            let mut state = GameState::new(seed, &config, screen());
            tick(&mut state, &FrameInput { start: true, ..Default::default() }, &config);

            for input in &inputs {
                tick(&mut state, input, &config);
                let max_x = state.screen.x - state.player.size.x;
                prop_assert!(state.player.pos.x >= 0.0);
                prop_assert!(state.player.pos.x <= max_x);
                prop_assert!(state.player.pos.y + state.player.size.y <= state.screen.y - GROUND_HEIGHT);
            }
        }

        #[test]
        fn prop_counters_stay_within_wave_limits(
            seed in any::<u64>(),
            inputs in proptest::collection::vec(frame_input(), 1..400),
        ) {
            let mut config = GameConfig::default();
            config.waves.spawn_chance = 0.5;
            config.player.max_health = u32::MAX;
            let mut state = GameState::new(seed, &config, screen());
            tick(&mut state, &FrameInput { start: true, ..Default::default() }, &config);

            for input in &inputs {
                let kills_before = state.total_kills;
                let wave_before = state.wave;
                tick(&mut state, input, &config);
                prop_assert!(state.enemies.iter().all(|e| e.active));
                prop_assert!(state.projectiles.iter().all(|p| p.active));
                prop_assert!(state.enemies.len() <= config.waves.max_alive);
                prop_assert!(state.spawned_in_wave <= config.waves.spawns_per_wave);
                prop_assert!(state.killed_in_wave < config.waves.kills_per_wave);
                prop_assert!(state.wave - wave_before <= 1);
                prop_assert!(state.total_kills >= kills_before);
            }
        }
    }
}
