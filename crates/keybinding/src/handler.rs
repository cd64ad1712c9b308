//! Per-key polling adapter turning raw input state into edge-triggered
//! callbacks.
//!
//! A [`KeyHandler`] couples a [`KeyBinding`] with a mod-supplied
//! [`KeyListener`]. On every polled tick it samples the input source once and
//! compares against the last observed state: a down edge fires
//! [`KeyListener::key_down`] with `is_repeat = false`, an up edge fires
//! [`KeyListener::key_up`], and a held key fires repeat down callbacks only
//! when the handler was registered as repeating.

use crate::binding::KeyBinding;
use crate::input::InputSource;
use crate::tick::{TickPhase, TickSet};
use std::fmt;

/// Callbacks a mod implements to react to key state transitions.
///
/// Listener state is owned by the handler, so the callbacks take `&mut self`.
pub trait KeyListener: Send + Sync {
    /// Called when the key is first observed in the down position on any
    /// tick from the [`ticks`](KeyListener::ticks) set. Called again with
    /// `is_repeat = true` on every subsequent polled tick while the key stays
    /// down, if the handler repeats.
    fn key_down(&mut self, ticks: TickSet, phase: TickPhase, is_repeat: bool);

    /// Called once when the key changes state from down to up.
    fn key_up(&mut self, ticks: TickSet, phase: TickPhase);

    /// The tick kinds on which this listener wants to be polled.
    fn ticks(&self) -> TickSet;
}

/// A registered key handler: binding, repeat flag, and last observed state.
pub struct KeyHandler {
    binding: KeyBinding,
    repeating: bool,
    key_down: bool,
    listener: Box<dyn KeyListener>,
}

impl KeyHandler {
    /// Create a handler for `binding`.
    ///
    /// With `repeating` set, the listener receives a `key_down` callback on
    /// every polled tick while the key is held; otherwise only on the down
    /// edge.
    pub fn new(
        binding: KeyBinding,
        repeating: bool,
        listener: impl KeyListener + 'static,
    ) -> Self {
        Self {
            binding,
            repeating,
            key_down: false,
            listener: Box::new(listener),
        }
    }

    /// The binding this handler observes.
    pub fn binding(&self) -> &KeyBinding {
        &self.binding
    }

    /// Returns `true` if this handler fires repeat callbacks while held.
    pub fn is_repeating(&self) -> bool {
        self.repeating
    }

    /// Tick kinds this handler is polled on, as declared by its listener.
    pub fn ticks(&self) -> TickSet {
        self.listener.ticks()
    }

    /// Poll the input source once and fire callbacks on state transitions.
    ///
    /// `ticks` names the tick kinds that fired (already intersected with the
    /// listener's declared set by the registry), `phase` whether this is the
    /// start or end of the host tick.
    pub fn key_tick(&mut self, input: &dyn InputSource, ticks: TickSet, phase: TickPhase) {
        let pressed = input.is_pressed(self.binding.button);
        if pressed != self.key_down || (pressed && self.repeating) {
            if pressed {
                // A non-edge down callback is a repeat.
                let is_repeat = pressed == self.key_down;
                self.listener.key_down(ticks, phase, is_repeat);
            } else {
                self.listener.key_up(ticks, phase);
            }
            self.key_down = pressed;
        }
    }
}

impl fmt::Debug for KeyHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyHandler")
            .field("binding", &self.binding)
            .field("repeating", &self.repeating)
            .field("key_down", &self.key_down)
            .finish()
    }
}
