//! Headless canvas that records draw calls
//!
//! Used by the tests and by the native build's demo run.

use glam::Vec2;
use serde::Serialize;

use super::{Canvas, Font, TextAlign};
use crate::sim::Color;

/// One recorded draw call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawCommand {
    FillRect {
        pos: Vec2,
        size: Vec2,
        color: Color,
    },
    GradientRect {
        pos: Vec2,
        size: Vec2,
        top: Color,
        bottom: Color,
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    StrokeCircle {
        center: Vec2,
        radius: f32,
        width: f32,
        color: Color,
    },
    FillEllipse {
        center: Vec2,
        radii: Vec2,
        color: Color,
    },
    FillPolygon {
        points: Vec<Vec2>,
        color: Color,
    },
    StrokeLine {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
    },
    Text {
        text: String,
        pos: Vec2,
        size: f32,
        align: &'static str,
        color: Color,
    },
}

impl DrawCommand {
    /// Fill color for filled shapes and text
    fn fill_color(&self) -> Option<Color> {
        match self {
            DrawCommand::FillRect { color, .. }
            | DrawCommand::FillCircle { color, .. }
            | DrawCommand::FillEllipse { color, .. }
            | DrawCommand::FillPolygon { color, .. } => Some(*color),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drop the recorded frame
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn contains_text(&self, text: &str) -> bool {
        self.texts().contains(&text)
    }

    /// Number of filled shapes painted exactly `color`
    pub fn fill_count(&self, color: Color) -> usize {
        self.commands
            .iter()
            .filter(|c| c.fill_color() == Some(color))
            .count()
    }

    pub fn stroke_circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::StrokeCircle { .. }))
            .count()
    }
}

impl Canvas for RecordingCanvas {
    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color) {
        self.commands.push(DrawCommand::FillRect { pos, size, color });
    }

    fn fill_gradient_rect(&mut self, pos: Vec2, size: Vec2, top: Color, bottom: Color) {
        self.commands.push(DrawCommand::GradientRect {
            pos,
            size,
            top,
            bottom,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            width,
            color,
        });
    }

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color) {
        self.commands.push(DrawCommand::FillEllipse {
            center,
            radii,
            color,
        });
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        self.commands.push(DrawCommand::FillPolygon {
            points: points.to_vec(),
            color,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.commands.push(DrawCommand::StrokeLine {
            from,
            to,
            width,
            color,
        });
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, font: Font, align: TextAlign, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            size: font.size,
            align: align.as_str(),
            color,
        });
    }
}
