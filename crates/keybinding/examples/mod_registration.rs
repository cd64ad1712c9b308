//! Example showing how a mod registers key handlers and how the host drives
//! the registry.
//!
//! The workflow:
//! 1. The mod defines its key bindings and a listener for each
//! 2. During mod initialization it registers handlers with the registry
//! 3. The host merges the mod bindings into its settings array once
//! 4. The host polls the registry at the start and end of every tick
//!
//! This demo runs headless with a [`ManualInput`] standing in for the host
//! input library. In a Bevy host you would add
//! `keybinding::bevy::KeyBindingPlugin` instead and the polling happens in
//! `PreUpdate`/`PostUpdate`.

use bevy::input::keyboard::KeyCode;
use keybinding::{
    InMemorySettings, KeyBinding, KeyBindingRegistry, KeyHandler, KeyListener, ManualInput,
    SettingsHost, TickPhase, TickSet,
};

// ============================================================================
// EXAMPLE MOD - a spell-casting mod contributing one keybinding
// ============================================================================

#[derive(Default)]
struct CastListener {
    casts: usize,
}

impl KeyListener for CastListener {
    fn key_down(&mut self, _ticks: TickSet, phase: TickPhase, is_repeat: bool) {
        if is_repeat || phase.is_end() {
            return;
        }
        self.casts += 1;
        println!("cast spell #{}", self.casts);
    }

    fn key_up(&mut self, _ticks: TickSet, _phase: TickPhase) {
        println!("cast key released");
    }

    fn ticks(&self) -> TickSet {
        TickSet::CLIENT
    }
}

fn register_mod_keys(registry: &mut KeyBindingRegistry) {
    registry.register(KeyHandler::new(
        KeyBinding::new("key.spells.cast", KeyCode::KeyR).with_category("spells"),
        false,
        CastListener::default(),
    ));
}

// ============================================================================
// HOST SIDE - merge bindings, then poll once per tick
// ============================================================================

fn main() {
    let mut registry = KeyBindingRegistry::new();
    register_mod_keys(&mut registry);

    // One-time merge into the host's settings array.
    let mut settings = InMemorySettings::new(vec![KeyBinding::new(
        "key.host.jump",
        KeyCode::Space,
    )]);
    registry
        .upload_to_settings(&mut settings)
        .expect("settings merge failed");

    println!("host now knows {} key bindings:", settings.key_bindings().len());
    for binding in settings.key_bindings() {
        println!("  {} -> {}", binding.name, binding.button);
    }

    // Simulated session: press R for two ticks, then release.
    let mut input = ManualInput::new();
    for tick in 0..4 {
        if tick == 1 {
            input.press(KeyCode::KeyR);
        }
        if tick == 3 {
            input.release(KeyCode::KeyR);
        }

        registry.tick(TickSet::CLIENT, TickPhase::Start, &input);
        // ... host runs its per-tick update here ...
        registry.tick(TickSet::CLIENT, TickPhase::End, &input);
    }
}
