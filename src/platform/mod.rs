//! Platform abstraction layer
//!
//! Handles browser input without touching the simulation:
//! - Keyboard codes mapped to game actions
//! - Touch joystick and buttons
//! - Focus/visibility release of held inputs

pub mod input;
pub mod touch;

pub use input::{Action, InputState};
pub use touch::{Joystick, TouchButton, required_element_ids};
