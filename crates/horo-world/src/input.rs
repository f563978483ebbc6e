//! Per-step user input.
//!
//! A windowing layer feeds raw events into an [`InputCollector`]. Once per
//! simulation step the collector hands out an immutable [`UserInput`]
//! snapshot, and [`InputCollector::end_step`] forgets the edge-triggered
//! state before the next batch of events arrives.

use horo::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A bindable button. Codes follow GLFW's numbering (see [`keys`]).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    /// Unbound. Never held, never pressed.
    #[default]
    None,
    Mouse(u16),
    Key(u16),
}

/// GLFW key and mouse button codes used by the default bindings.
pub mod keys {
    pub const MOUSE_LEFT: u16 = 0;
    pub const MOUSE_RIGHT: u16 = 1;

    pub const NUM_1: u16 = 49;
    pub const NUM_2: u16 = 50;
    pub const NUM_3: u16 = 51;
    pub const NUM_4: u16 = 52;
    pub const NUM_5: u16 = 53;

    pub const A: u16 = 65;
    pub const D: u16 = 68;
    pub const E: u16 = 69;
    pub const O: u16 = 79;
    pub const P: u16 = 80;
    pub const Q: u16 = 81;
    pub const S: u16 = 83;
    pub const W: u16 = 87;

    pub const HOME: u16 = 268;
    pub const LEFT_SHIFT: u16 = 340;
    pub const LEFT_CONTROL: u16 = 341;
}

/// Read access to one step's worth of input.
pub trait InputSource {
    fn is_held(&self, button: Button) -> bool;

    /// Went down at least once since the previous step.
    fn pressed_this_step(&self, button: Button) -> bool;

    /// Cursor movement since the previous step, in pixels.
    fn mouse_delta(&self) -> Vec2<f64>;
}

/// Immutable input snapshot for a single step.
#[derive(Clone, Debug, Default)]
pub struct UserInput {
    held: HashSet<Button>,
    pressed: HashSet<Button>,
    mouse_delta: Vec2<f64>,
}

impl UserInput {
    pub fn new() -> Self { Self::default() }

    pub fn with_held(mut self, button: Button) -> Self {
        if button != Button::None {
            self.held.insert(button);
        }
        self
    }

    /// Marks `button` as pressed during this step; it is also held.
    pub fn with_pressed(mut self, button: Button) -> Self {
        if button != Button::None {
            self.held.insert(button);
            self.pressed.insert(button);
        }
        self
    }

    pub fn with_mouse_delta(mut self, dx: f64, dy: f64) -> Self {
        self.mouse_delta = Vec2::new(dx, dy);
        self
    }
}

impl InputSource for UserInput {
    fn is_held(&self, button: Button) -> bool { self.held.contains(&button) }

    fn pressed_this_step(&self, button: Button) -> bool { self.pressed.contains(&button) }

    fn mouse_delta(&self) -> Vec2<f64> { self.mouse_delta }
}

/// Accumulates window events between simulation steps.
#[derive(Clone, Debug, Default)]
pub struct InputCollector {
    held: HashSet<Button>,
    pressed: HashSet<Button>,
    mouse_delta: Vec2<f64>,
    cursor: Option<Vec2<f64>>,
}

impl InputCollector {
    pub fn new() -> Self { Self::default() }

    pub fn key_event(&mut self, code: u16, down: bool) {
        self.button_event(Button::Key(code), down);
    }

    pub fn mouse_button_event(&mut self, code: u16, down: bool) {
        self.button_event(Button::Mouse(code), down);
    }

    /// Absolute cursor position. The first report only anchors the cursor.
    pub fn mouse_moved(&mut self, x: f64, y: f64) {
        let at = Vec2::new(x, y);
        if let Some(last) = self.cursor {
            self.mouse_delta += at - last;
        }
        self.cursor = Some(at);
    }

    /// Drops the cursor anchor, e.g. after the window regains focus.
    pub fn reset_cursor(&mut self) {
        self.cursor = None;
    }

    pub fn snapshot(&self) -> UserInput {
        UserInput {
            held: self.held.clone(),
            pressed: self.pressed.clone(),
            mouse_delta: self.mouse_delta,
        }
    }

    /// Clears edge-triggered presses and the accumulated mouse motion.
    /// Held buttons stay held until their release event.
    pub fn end_step(&mut self) {
        self.pressed.clear();
        self.mouse_delta = Vec2::zero();
    }

    fn button_event(&mut self, button: Button, down: bool) {
        if down {
            // Key repeat reports the button again while it is already held.
            if self.held.insert(button) {
                self.pressed.insert(button);
            }
        } else {
            self.held.remove(&button);
        }
    }
}
