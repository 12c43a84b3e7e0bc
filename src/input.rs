//! Press/hold latch
//!
//! Device handlers (keyboard, mouse, touch) call [`InputLatch::press`] and
//! [`InputLatch::release`] whenever they fire. The frame loop calls
//! [`InputLatch::sample`] once per frame, which consumes the press edge.

use crate::sim::TickInput;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputLatch {
    pressed: bool,
    held: bool,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Button went down. Repeats while already held do not raise a new edge.
    pub fn press(&mut self) {
        if !self.held {
            self.pressed = true;
        }
        self.held = true;
    }

    pub fn release(&mut self) {
        self.held = false;
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Read the input for this frame and clear the press edge
    pub fn sample(&mut self) -> TickInput {
        let input = self.peek();
        self.pressed = false;
        input
    }

    /// Read the input without consuming the press edge
    pub fn peek(&self) -> TickInput {
        TickInput {
            pressed: self.pressed,
            held: self.held,
        }
    }

    /// Forget everything, e.g. when focus is lost
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
