//! On-screen touch controls

use crate::consts::{JOYSTICK_DEAD_ZONE, JOYSTICK_MAX_DIST};

pub const JOYSTICK_AREA_ID: &str = "joystick-area";
/// Optional; the stick works without a visible knob
pub const JOYSTICK_KNOB_ID: &str = "joystick-knob";

/// Controls the page must provide for touch play
pub fn required_element_ids() -> impl Iterator<Item = &'static str> {
    std::iter::once(JOYSTICK_AREA_ID).chain(TouchButton::ALL.into_iter().map(|b| b.element_id()))
}

/// The touch buttons beside the joystick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchButton {
    Jump,
    Shoot,
    Tornado,
    Dragon,
}

impl TouchButton {
    pub const ALL: [TouchButton; 4] = [
        TouchButton::Jump,
        TouchButton::Shoot,
        TouchButton::Tornado,
        TouchButton::Dragon,
    ];

    /// DOM id of the button element
    pub fn element_id(&self) -> &'static str {
        match self {
            TouchButton::Jump => "btn-jump",
            TouchButton::Shoot => "btn-shoot",
            TouchButton::Tornado => "btn-skill-tornado",
            TouchButton::Dragon => "btn-skill-dragon",
        }
    }

    /// Held buttons stay down until touchend; the rest fire once
    pub fn is_held(&self) -> bool {
        matches!(self, TouchButton::Jump | TouchButton::Shoot)
    }
}

/// Horizontal-only virtual stick anchored where the touch began
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Joystick {
    origin_x: Option<f32>,
    offset: f32,
}

impl Joystick {
    pub fn begin(&mut self, x: f32) {
        self.origin_x = Some(x);
        self.offset = 0.0;
    }

    /// Track the finger; returns the knob offset clamped to the stick travel
    pub fn move_to(&mut self, x: f32) -> f32 {
        let Some(origin) = self.origin_x else {
            return 0.0;
        };
        self.offset = (x - origin).clamp(-JOYSTICK_MAX_DIST, JOYSTICK_MAX_DIST);
        self.offset
    }

    pub fn end(&mut self) {
        self.origin_x = None;
        self.offset = 0.0;
    }

    pub fn left(&self) -> bool {
        self.offset < -JOYSTICK_DEAD_ZONE
    }

    pub fn right(&self) -> bool {
        self.offset > JOYSTICK_DEAD_ZONE
    }
}
