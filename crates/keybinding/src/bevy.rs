//! Bevy integration: polls the registry at tick boundaries.
//!
//! [`KeyBindingPlugin`] inserts the registry as a resource and samples
//! `ButtonInput` state in `PreUpdate` (tick start) and `PostUpdate` (tick
//! end). The host must provide the `ButtonInput` resources, i.e. have
//! `InputPlugin` (part of `DefaultPlugins`) installed.

use crate::binding::InputButton;
use crate::input::InputSource;
use crate::registry::KeyBindingRegistry;
use crate::tick::{TickPhase, TickSet};
use bevy::input::keyboard::KeyCode;
use bevy::input::mouse::MouseButton;
use bevy::input::ButtonInput;
use bevy::prelude::*;

/// [`InputSource`] over Bevy's `ButtonInput` resources.
pub struct ButtonInputSource<'a> {
    pub keyboard: &'a ButtonInput<KeyCode>,
    pub mouse: &'a ButtonInput<MouseButton>,
}

impl InputSource for ButtonInputSource<'_> {
    fn is_pressed(&self, button: InputButton) -> bool {
        match button {
            InputButton::Key(key) => self.keyboard.pressed(key),
            InputButton::Mouse(mouse) => self.mouse.pressed(mouse),
        }
    }
}

/// Resource wrapper for [`KeyBindingRegistry`].
#[derive(Resource, Default)]
pub struct KeyBindingRegistryResource(pub KeyBindingRegistry);

impl std::ops::Deref for KeyBindingRegistryResource {
    type Target = KeyBindingRegistry;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::ops::DerefMut for KeyBindingRegistryResource {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// Tick kinds the Bevy schedule represents when polling.
#[derive(Resource, Clone, Copy)]
struct PolledTicks(TickSet);

/// Bevy plugin wiring the registry into the host's update loop.
pub struct KeyBindingPlugin {
    /// Tick kinds each frame counts as. Defaults to the client tick.
    pub ticks: TickSet,
}

impl Default for KeyBindingPlugin {
    fn default() -> Self {
        Self {
            ticks: TickSet::CLIENT,
        }
    }
}

impl Plugin for KeyBindingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<KeyBindingRegistryResource>()
            .insert_resource(PolledTicks(self.ticks))
            .add_systems(PreUpdate, poll_tick_start)
            .add_systems(PostUpdate, poll_tick_end);
    }

    fn name(&self) -> &str {
        "KeyBindingPlugin"
    }
}

fn poll_tick_start(
    mut registry: ResMut<KeyBindingRegistryResource>,
    ticks: Res<PolledTicks>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
) {
    let source = ButtonInputSource {
        keyboard: &keyboard,
        mouse: &mouse,
    };
    registry.tick(ticks.0, TickPhase::Start, &source);
}

fn poll_tick_end(
    mut registry: ResMut<KeyBindingRegistryResource>,
    ticks: Res<PolledTicks>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
) {
    let source = ButtonInputSource {
        keyboard: &keyboard,
        mouse: &mouse,
    };
    registry.tick(ticks.0, TickPhase::End, &source);
}
