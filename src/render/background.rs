//! Biome scenery: sky, mountains and ground strip

use glam::Vec2;

use super::Canvas;
use crate::consts::GROUND_HEIGHT;
use crate::sim::{Biome, Color};

const FOREST_SKY_TOP: Color = Color::rgb(135, 206, 235);
const FOREST_SKY_BOTTOM: Color = Color::rgb(224, 247, 250);
const FOREST_FAR: Color = Color::rgb(100, 149, 237);
const FOREST_NEAR: Color = Color::rgb(70, 130, 180);
pub const FOREST_GROUND: Color = Color::rgb(34, 139, 34);

const ICE_SKY: Color = Color::rgb(200, 230, 255);
const ICE_PEAK: Color = Color::rgb(230, 240, 255);
pub const ICE_GROUND: Color = Color::rgb(240, 248, 255);

const VOLCANO_SKY: Color = Color::rgb(40, 0, 0);
const VOLCANO_CONE: Color = Color::rgb(20, 0, 0);
const LAVA: Color = Color::rgb(255, 69, 0);
pub const VOLCANO_GROUND: Color = Color::rgb(70, 20, 20);

/// Paint the full-screen backdrop for `biome`
pub fn draw(canvas: &mut impl Canvas, biome: Biome, screen: Vec2) {
    let (w, h) = (screen.x, screen.y);
    let ground_pos = Vec2::new(0.0, h - GROUND_HEIGHT);
    let ground_size = Vec2::new(w, GROUND_HEIGHT);

    match biome {
        Biome::Forest => {
            canvas.fill_gradient_rect(Vec2::ZERO, screen, FOREST_SKY_TOP, FOREST_SKY_BOTTOM);
            mountain(canvas, h, 0.0, 200.0, 400.0, 200.0, FOREST_FAR);
            mountain(canvas, h, 300.0, 600.0, 900.0, 250.0, FOREST_NEAR);
            canvas.fill_rect(ground_pos, ground_size, FOREST_GROUND);
        }
        Biome::Ice => {
            canvas.fill_rect(Vec2::ZERO, screen, ICE_SKY);
            mountain(canvas, h, 100.0, 400.0, 700.0, 300.0, ICE_PEAK);
            canvas.fill_rect(ground_pos, ground_size, ICE_GROUND);
        }
        Biome::Volcano => {
            canvas.fill_rect(Vec2::ZERO, screen, VOLCANO_SKY);
            mountain(canvas, h, 200.0, 500.0, 800.0, 300.0, VOLCANO_CONE);
            // Lava running down from the crater
            canvas.fill_polygon(
                &[
                    Vec2::new(480.0, h - 300.0),
                    Vec2::new(500.0, h - GROUND_HEIGHT),
                    Vec2::new(520.0, h - 300.0),
                ],
                LAVA,
            );
            canvas.fill_rect(ground_pos, ground_size, VOLCANO_GROUND);
            canvas.fill_rect(Vec2::new(0.0, h - 15.0), Vec2::new(w, 15.0), LAVA);
        }
    }
}

fn mountain(
    canvas: &mut impl Canvas,
    h: f32,
    left: f32,
    peak: f32,
    right: f32,
    height: f32,
    color: Color,
) {
    canvas.fill_polygon(
        &[
            Vec2::new(left, h),
            Vec2::new(peak, h - height),
            Vec2::new(right, h),
        ],
        color,
    );
}
