//! Vector art for the wizard, the ogres and the bolts
//!
//! Each sprite is drawn relative to the bottom-centre of its box. `Pose`
//! mirrors the x offsets for the facing direction and scales the art (the
//! boss reuses the ogre drawing at twice the size).

use glam::Vec2;

use super::Canvas;
use crate::sim::{Color, Enemy, LightningBolt, Particle, Player, Projectile};

pub const ROBE: Color = Color::rgb(0, 0, 180);
const ROBE_LIGHT: Color = Color::rgb(50, 50, 220);
const SKIN: Color = Color::rgb(255, 220, 180);
const BEARD: Color = Color::rgb(240, 240, 255);
const HAT: Color = Color::rgb(40, 40, 160);
const STAFF: Color = Color::rgb(101, 67, 33);
const CAST_RING: Color = Color::rgb(224, 255, 255);
const BLACK: Color = Color::rgb(0, 0, 0);
const WHITE: Color = Color::rgb(255, 255, 255);

pub const OGRE_SKIN: Color = Color::rgb(85, 107, 47);
const OGRE_SHADOW: Color = Color::rgb(50, 70, 30);
const PANTS: Color = Color::rgb(139, 69, 19);
const EYE: Color = Color::rgb(255, 0, 0);
const CLUB: Color = Color::rgb(100, 80, 60);

const LIGHTNING: Color = Color::rgb(255, 255, 120);
/// Kinks along one lightning segment
const LIGHTNING_KINKS: usize = 5;
const LIGHTNING_JAG: f32 = 12.0;

/// Anchor, mirroring and scale for one sprite
#[derive(Debug, Clone, Copy)]
struct Pose {
    origin: Vec2,
    dir: f32,
    scale: f32,
}

impl Pose {
    fn new(origin: Vec2, facing_right: bool, scale: f32) -> Self {
        Self {
            origin,
            dir: if facing_right { 1.0 } else { -1.0 },
            scale,
        }
    }

    /// Art-space offset to screen position
    fn at(&self, x: f32, y: f32) -> Vec2 {
        self.origin + Vec2::new(x * self.dir, y) * self.scale
    }

    fn len(&self, v: f32) -> f32 {
        v * self.scale
    }

    /// Mirror-safe rectangle: `x`/`w` describe the unmirrored art
    fn rect(&self, canvas: &mut impl Canvas, x: f32, y: f32, w: f32, h: f32, color: Color) {
        let a = self.at(x, y);
        let b = self.at(x + w, y + h);
        canvas.fill_rect(a.min(b), (b - a).abs(), color);
    }
}

fn bottom_center(pos: Vec2, size: Vec2) -> Vec2 {
    Vec2::new(pos.x + size.x / 2.0, pos.y + size.y)
}

/// Robed wizard with hat, beard and staff
pub fn draw_player(canvas: &mut impl Canvas, player: &Player) {
    let pose = Pose::new(
        bottom_center(player.pos, player.size),
        player.facing_right,
        player.size.y / 60.0,
    );

    pose.rect(canvas, -30.0, -60.0, 60.0, 60.0, ROBE);
    pose.rect(canvas, -25.0, -60.0, 50.0, 55.0, ROBE_LIGHT);

    let head_y = -62.0;
    canvas.fill_circle(pose.at(0.0, head_y), pose.len(20.0), SKIN);

    canvas.fill_polygon(
        &[
            pose.at(-18.0, head_y + 5.0),
            pose.at(18.0, head_y + 5.0),
            pose.at(10.0, head_y + 25.0),
            pose.at(0.0, head_y + 20.0),
        ],
        BEARD,
    );

    let brim_y = head_y - 15.0;
    canvas.fill_ellipse(
        pose.at(0.0, brim_y),
        Vec2::new(pose.len(28.0), pose.len(5.0)),
        HAT,
    );
    canvas.fill_polygon(
        &[
            pose.at(-20.0, brim_y),
            pose.at(20.0, brim_y),
            pose.at(-10.0, brim_y - 45.0),
        ],
        HAT,
    );

    canvas.fill_circle(pose.at(8.0, head_y - 2.0), pose.len(3.0), BLACK);
    canvas.fill_circle(pose.at(9.0, head_y - 3.0), pose.len(1.0), WHITE);

    let staff_top = pose.at(30.0, -60.0);
    canvas.stroke_line(pose.at(25.0, 10.0), staff_top, pose.len(5.0), STAFF);
    canvas.fill_circle(staff_top, pose.len(8.0), player.wand_color());
    if player.is_casting() {
        canvas.stroke_circle(staff_top, pose.len(12.0), 2.0, CAST_RING);
    }
}

/// Club-carrying ogre; bosses are drawn at double size
pub fn draw_enemy(canvas: &mut impl Canvas, enemy: &Enemy) {
    if !enemy.active {
        return;
    }
    let scale = if enemy.boss { 2.0 } else { 1.0 };
    let pose = Pose::new(
        bottom_center(enemy.pos, enemy.size),
        enemy.facing_right,
        scale,
    );

    pose.rect(canvas, -20.0, -25.0, 15.0, 25.0, PANTS);
    pose.rect(canvas, 5.0, -25.0, 15.0, 25.0, PANTS);
    pose.rect(canvas, -25.0, -65.0, 50.0, 45.0, OGRE_SKIN);

    let abs_width = pose.len(2.0);
    canvas.stroke_line(pose.at(0.0, -60.0), pose.at(0.0, -30.0), abs_width, OGRE_SHADOW);
    canvas.stroke_line(pose.at(-15.0, -45.0), pose.at(15.0, -45.0), abs_width, OGRE_SHADOW);

    canvas.fill_circle(pose.at(0.0, -75.0), pose.len(18.0), OGRE_SKIN);

    canvas.fill_circle(pose.at(8.0, -80.0), pose.len(4.0), EYE);
    canvas.stroke_line(pose.at(3.0, -85.0), pose.at(13.0, -83.0), abs_width, BLACK);

    canvas.stroke_line(pose.at(0.0, -67.0), pose.at(10.0, -67.0), abs_width, BLACK);
    canvas.fill_polygon(
        &[pose.at(5.0, -67.0), pose.at(8.0, -72.0), pose.at(11.0, -67.0)],
        WHITE,
    );

    canvas.stroke_line(pose.at(15.0, -55.0), pose.at(25.0, -45.0), pose.len(10.0), OGRE_SKIN);
    canvas.stroke_line(pose.at(25.0, -45.0), pose.at(35.0, -75.0), pose.len(12.0), CLUB);
    canvas.fill_circle(pose.at(35.0, -75.0), pose.len(15.0), CLUB);
}

/// Glowing bolt with a white core
pub fn draw_projectile(canvas: &mut impl Canvas, projectile: &Projectile) {
    if !projectile.active {
        return;
    }
    let r = crate::consts::PROJECTILE_RADIUS;
    canvas.fill_circle(projectile.pos, r * 1.4, projectile.color.with_alpha(80));
    canvas.fill_circle(projectile.pos, r, projectile.color);
    canvas.fill_circle(projectile.pos, r * 0.6, WHITE);
}

/// Spark that fades out over its life
pub fn draw_particle(canvas: &mut impl Canvas, particle: &Particle) {
    let alpha = (particle.fade() * 255.0).round().clamp(0.0, 255.0) as u8;
    if alpha == 0 {
        return;
    }
    canvas.fill_circle(
        particle.pos,
        crate::consts::PARTICLE_RADIUS,
        particle.color.with_alpha(alpha),
    );
}

/// Jagged bolt between two points, fading with its life
pub fn draw_lightning(canvas: &mut impl Canvas, bolt: &LightningBolt) {
    if bolt.life == 0 || bolt.max_life == 0 {
        return;
    }
    let fade = bolt.life as f32 / bolt.max_life as f32;
    let alpha = (fade * 255.0).round().clamp(0.0, 255.0) as u8;
    let along = bolt.to - bolt.from;
    let normal = along.perp().normalize_or_zero();

    let mut prev = bolt.from;
    for i in 1..=LIGHTNING_KINKS {
        let t = i as f32 / LIGHTNING_KINKS as f32;
        let next = if i == LIGHTNING_KINKS {
            bolt.to
        } else {
            // Alternate sides; the jag flips every frame so the bolt flickers
            let side = if (i + bolt.life as usize) % 2 == 0 { 1.0 } else { -1.0 };
            bolt.from + along * t + normal * LIGHTNING_JAG * side
        };
        canvas.stroke_line(prev, next, 3.0, LIGHTNING.with_alpha(alpha));
        prev = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
    use crate::render::{DrawCommand, RecordingCanvas};

    fn screen() -> Vec2 {
        Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }

    fn first_circle(canvas: &RecordingCanvas, color: Color) -> Option<(Vec2, f32)> {
        canvas.commands().iter().find_map(|c| match c {
            DrawCommand::FillCircle {
                center,
                radius,
                color: c,
            } if *c == color => Some((*center, *radius)),
            _ => None,
        })
    }

    #[test]
    fn test_wizard_mirrors_with_facing() {
        let config = GameConfig::default();
        let mut player = Player::new(&config, screen());
        let mid = player.center_x();

        let mut canvas = RecordingCanvas::new();
        draw_player(&mut canvas, &player);
        let (eye_right, _) = first_circle(&canvas, BLACK).expect("eye drawn");
        assert!(eye_right.x > mid);

        player.facing_right = false;
        let mut canvas = RecordingCanvas::new();
        draw_player(&mut canvas, &player);
        let (eye_left, _) = first_circle(&canvas, BLACK).expect("eye drawn");
        assert!(eye_left.x < mid);
    }

    #[test]
    fn test_cast_ring_only_while_casting() {
        let config = GameConfig::default();
        let mut player = Player::new(&config, screen());
        let mut canvas = RecordingCanvas::new();
        draw_player(&mut canvas, &player);
        assert_eq!(canvas.stroke_circle_count(), 0);

        player.cooldown = 14;
        let mut canvas = RecordingCanvas::new();
        draw_player(&mut canvas, &player);
        assert_eq!(canvas.stroke_circle_count(), 1);
    }

    #[test]
    fn test_boss_drawn_twice_as_large() {
        let config = GameConfig::default();
        let ogre = Enemy::spawn(&config, 500.0, 1, false, screen());
        let boss = Enemy::spawn(&config, 500.0, 5, true, screen());

        let mut canvas = RecordingCanvas::new();
        draw_enemy(&mut canvas, &ogre);
        let (_, ogre_eye) = first_circle(&canvas, EYE).expect("eye drawn");

        let mut canvas = RecordingCanvas::new();
        draw_enemy(&mut canvas, &boss);
        let (_, boss_eye) = first_circle(&canvas, EYE).expect("eye drawn");
        assert_eq!(boss_eye, ogre_eye * 2.0);
    }

    #[test]
    fn test_inactive_entities_not_drawn() {
        let config = GameConfig::default();
        let mut ogre = Enemy::spawn(&config, 500.0, 1, false, screen());
        ogre.active = false;
        let mut bolt = Projectile::new(Vec2::new(10.0, 10.0), true, 12.0, WHITE);
        bolt.active = false;

        let mut canvas = RecordingCanvas::new();
        draw_enemy(&mut canvas, &ogre);
        draw_projectile(&mut canvas, &bolt);
        assert!(canvas.commands().is_empty());
    }

    #[test]
    fn test_lightning_joins_its_ends() {
        let bolt = LightningBolt {
            from: Vec2::new(100.0, 300.0),
            to: Vec2::new(400.0, 300.0),
            life: 15,
            max_life: 15,
        };
        let mut canvas = RecordingCanvas::new();
        draw_lightning(&mut canvas, &bolt);
        let lines: Vec<(Vec2, Vec2)> = canvas
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::StrokeLine { from, to, .. } => Some((*from, *to)),
                _ => None,
            })
            .collect();
        assert_eq!(lines.len(), LIGHTNING_KINKS);
        assert_eq!(lines[0].0, bolt.from);
        assert_eq!(lines[LIGHTNING_KINKS - 1].1, bolt.to);
        assert!(lines.windows(2).all(|w| w[0].1 == w[1].0));

        let spent = LightningBolt { life: 0, ..bolt };
        let mut canvas = RecordingCanvas::new();
        draw_lightning(&mut canvas, &spent);
        assert!(canvas.commands().is_empty());
    }

    #[test]
    fn test_particle_fades() {
        let mut spark = Particle {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            color: Color::rgb(0, 255, 0),
            life: 15,
            max_life: 30,
        };
        let mut canvas = RecordingCanvas::new();
        draw_particle(&mut canvas, &spark);
        match canvas.commands() {
            [DrawCommand::FillCircle { color, .. }] => assert_eq!(color.a, 128),
            other => panic!("unexpected commands {other:?}"),
        }

        spark.life = 0;
        let mut canvas = RecordingCanvas::new();
        draw_particle(&mut canvas, &spark);
        assert!(canvas.commands().is_empty());
    }
}
