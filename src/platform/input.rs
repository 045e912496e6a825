//! Latched input state
//!
//! Browser callbacks write here between frames; the frame driver reads a
//! `FrameInput` snapshot and then clears the one-shot flags.

use glam::Vec2;

use super::touch::{Joystick, TouchButton};
use crate::sim::FrameInput;

/// What a key does in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Left,
    Right,
    Jump,
    Attack,
    Tornado,
    Dragon,
    Pause,
    Autopilot,
    /// Upgrade card by position
    Pick(usize),
}

impl Action {
    /// Map a `KeyboardEvent.code`
    pub fn from_code(code: &str) -> Option<Self> {
        Some(match code {
            "ArrowLeft" | "KeyA" => Action::Left,
            "ArrowRight" | "KeyD" => Action::Right,
            "Space" | "ArrowUp" | "KeyW" => Action::Jump,
            "KeyZ" | "KeyJ" => Action::Attack,
            "KeyT" => Action::Tornado,
            "KeyR" => Action::Dragon,
            "Escape" => Action::Pause,
            "KeyI" => Action::Autopilot,
            "Digit1" | "Numpad1" => Action::Pick(0),
            "Digit2" | "Numpad2" => Action::Pick(1),
            "Digit3" | "Numpad3" => Action::Pick(2),
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Held {
    left: bool,
    right: bool,
    jump: bool,
    attack: bool,
}

#[derive(Debug, Clone, Default)]
pub struct InputState {
    keys: Held,
    touch: Held,
    pub joystick: Joystick,
    // One-shots
    tornado: bool,
    dragon: bool,
    pause: bool,
    start: bool,
    pick: Option<usize>,
    /// Canvas tap or click, in canvas pixels
    tap: Option<Vec2>,
    /// Demo mode toggle (persists across frames)
    pub autopilot: bool,
}

impl InputState {
    /// A key went down; returns the mapped action, if any
    ///
    /// Auto-repeat only refreshes held keys so toggles fire once per press.
    pub fn key_down(&mut self, code: &str, repeat: bool) -> Option<Action> {
        let action = Action::from_code(code);
        if repeat {
            if let Some(a) = action {
                self.set_held_key(a, true);
            }
            return action;
        }

        self.start = true;
        match action {
            Some(Action::Tornado) => self.tornado = true,
            Some(Action::Dragon) => self.dragon = true,
            Some(Action::Pause) => self.pause = true,
            Some(Action::Pick(i)) => self.pick = Some(i),
            Some(Action::Autopilot) => {
                self.autopilot = !self.autopilot;
                log::info!("Autopilot: {}", if self.autopilot { "on" } else { "off" });
            }
            Some(a) => self.set_held_key(a, true),
            None => {}
        }
        action
    }

    pub fn key_up(&mut self, code: &str) {
        if let Some(a) = Action::from_code(code) {
            self.set_held_key(a, false);
        }
    }

    fn set_held_key(&mut self, action: Action, down: bool) {
        match action {
            Action::Left => self.keys.left = down,
            Action::Right => self.keys.right = down,
            Action::Jump => self.keys.jump = down,
            Action::Attack => self.keys.attack = down,
            _ => {}
        }
    }

    pub fn button_down(&mut self, button: TouchButton) {
        self.start = true;
        match button {
            TouchButton::Jump => self.touch.jump = true,
            TouchButton::Shoot => self.touch.attack = true,
            TouchButton::Tornado => self.tornado = true,
            TouchButton::Dragon => self.dragon = true,
        }
    }

    pub fn button_up(&mut self, button: TouchButton) {
        match button {
            TouchButton::Jump => self.touch.jump = false,
            TouchButton::Shoot => self.touch.attack = false,
            TouchButton::Tornado | TouchButton::Dragon => {}
        }
    }

    pub fn joystick_begin(&mut self, x: f32) {
        self.start = true;
        self.joystick.begin(x);
        self.sync_joystick();
    }

    /// Returns the knob offset for the on-screen knob
    pub fn joystick_move(&mut self, x: f32) -> f32 {
        let offset = self.joystick.move_to(x);
        self.sync_joystick();
        offset
    }

    pub fn joystick_end(&mut self) {
        self.joystick.end();
        self.sync_joystick();
    }

    fn sync_joystick(&mut self) {
        self.touch.left = self.joystick.left();
        self.touch.right = self.joystick.right();
    }

    /// Any tap or key press, used to leave the menu and game-over screens
    pub fn any_input(&mut self) {
        self.start = true;
    }

    /// Tap or click on the canvas; also counts as any input
    pub fn tap(&mut self, pos: Vec2) {
        self.start = true;
        self.tap = Some(pos);
    }

    pub fn tap_position(&self) -> Option<Vec2> {
        self.tap
    }

    /// Choose an upgrade card for the next frame
    pub fn pick(&mut self, index: usize) {
        self.pick = Some(index);
    }

    /// Ask for the pause toggle on the next frame
    pub fn request_pause(&mut self) {
        self.pause = true;
    }

    /// Snapshot for this frame's tick
    pub fn frame_input(&self) -> FrameInput {
        FrameInput {
            left: self.keys.left || self.touch.left,
            right: self.keys.right || self.touch.right,
            jump: self.keys.jump || self.touch.jump,
            attack: self.keys.attack || self.touch.attack,
            tornado: self.tornado,
            dragon: self.dragon,
            pause: self.pause,
            start: self.start,
            pick: self.pick,
            autopilot: self.autopilot,
        }
    }

    pub fn clear_one_shots(&mut self) {
        self.tornado = false;
        self.dragon = false;
        self.pause = false;
        self.start = false;
        self.pick = None;
        self.tap = None;
    }

    /// Focus was lost: nothing stays held down
    pub fn release_all(&mut self) {
        self.keys = Held::default();
        self.touch = Held::default();
        self.joystick.end();
    }
}
