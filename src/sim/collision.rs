//! Axis-aligned box tests
//!
//! Everything in the arena is a box: the wizard, the ogres, and (for hit
//! tests) the centre point of each bolt.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size / 2.0
    }

    /// Point strictly inside the box (edges do not count)
    pub fn contains_point(&self, p: Vec2) -> bool {
        let max = self.max();
        p.x > self.min.x && p.x < max.x && p.y > self.min.y && p.y < max.y
    }

    /// Boxes share some interior area (touching edges do not count)
    pub fn overlaps(&self, other: &Rect) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x && other.min.x < a_max.x && self.min.y < b_max.y && other.min.y < a_max.y
    }
}

/// Index pairs `(projectile, enemy)` of every point-in-box hit, in scan order
///
/// Brute force O(n·m); both lists stay tiny.
pub fn point_hits(points: &[Vec2], boxes: &[Rect]) -> Vec<(usize, usize)> {
    let mut hits = Vec::new();
    for (pi, p) in points.iter().enumerate() {
        for (bi, b) in boxes.iter().enumerate() {
            if b.contains_point(*p) {
                hits.push((pi, bi));
            }
        }
    }
    hits
}
