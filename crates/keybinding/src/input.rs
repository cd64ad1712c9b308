//! Abstraction over the host's raw per-frame input polling.

use crate::binding::InputButton;
use std::collections::HashSet;

/// Raw boolean input state as exposed by the host's input library.
///
/// Implementations answer "is this key or button down right now". Edge
/// detection is layered on top by [`KeyHandler`](crate::KeyHandler); the
/// query itself is non-failing.
pub trait InputSource {
    /// Returns `true` while the given button is held down.
    fn is_pressed(&self, button: InputButton) -> bool;
}

/// In-memory input source, useful for tests and headless hosts.
///
/// The owner flips button state explicitly between polls.
#[derive(Default, Debug, Clone)]
pub struct ManualInput {
    pressed: HashSet<InputButton>,
}

impl ManualInput {
    /// Create an input source with nothing pressed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a button as held down.
    pub fn press(&mut self, button: impl Into<InputButton>) {
        self.pressed.insert(button.into());
    }

    /// Mark a button as released.
    pub fn release(&mut self, button: impl Into<InputButton>) {
        self.pressed.remove(&button.into());
    }

    /// Release every button.
    pub fn release_all(&mut self) {
        self.pressed.clear();
    }
}

impl InputSource for ManualInput {
    fn is_pressed(&self, button: InputButton) -> bool {
        self.pressed.contains(&button)
    }
}
