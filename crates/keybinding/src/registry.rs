//! Registry owning mod key handlers.
//!
//! Handlers are registered once during mod initialization and polled in
//! registration order on every host tick. The registry also performs the
//! one-time merge of mod key bindings into the host's settings array.

use crate::binding::{BindingName, KeyBinding};
use crate::handler::KeyHandler;
use crate::input::InputSource;
use crate::settings::SettingsHost;
use crate::tick::{TickPhase, TickSet};
use anyhow::{Context as _, Result};
use indexmap::IndexMap;

/// Registry of mod key handlers, polled once per host tick.
///
/// The list is append-only and lives for the process lifetime; there is no
/// unregistration. One instance exists per host — in Bevy hosts it is the
/// [`KeyBindingRegistryResource`](crate::bevy::KeyBindingRegistryResource).
#[derive(Default)]
pub struct KeyBindingRegistry {
    handlers: Vec<KeyHandler>,
}

impl KeyBindingRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a key handler. Handlers are polled in registration order.
    pub fn register(&mut self, handler: KeyHandler) {
        log::debug!(
            "registered key handler for {} (repeating: {})",
            handler.binding().name,
            handler.is_repeating()
        );
        self.handlers.push(handler);
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns `true` if no handlers are registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Iterate over the registered handlers, in registration order.
    pub fn handlers(&self) -> impl Iterator<Item = &KeyHandler> {
        self.handlers.iter()
    }

    /// Poll every handler whose declared tick set intersects `ticks`.
    ///
    /// The host invokes this twice per tick, once with [`TickPhase::Start`]
    /// and once with [`TickPhase::End`]. Each polled handler receives the
    /// intersection of `ticks` with its own declared set.
    pub fn tick(&mut self, ticks: TickSet, phase: TickPhase, input: &dyn InputSource) {
        for handler in &mut self.handlers {
            let fired = handler.ticks().intersection(ticks);
            if fired.is_empty() {
                continue;
            }
            handler.key_tick(input, fired, phase);
        }
    }

    /// Merge the registered key bindings into the host's settings array.
    ///
    /// Host entries keep their positions; mod bindings not yet present (by
    /// name) are appended in registration order. The host's settings reload
    /// runs afterwards so persisted user key codes apply to the merged
    /// array. Calling this again is a no-op for bindings already merged.
    pub fn upload_to_settings(&self, settings: &mut dyn SettingsHost) -> Result<()> {
        let mut merged: IndexMap<BindingName, KeyBinding> = IndexMap::new();
        for binding in settings.key_bindings() {
            merged.insert(binding.name.clone(), binding.clone());
        }

        let mut appended = 0usize;
        for handler in &self.handlers {
            let binding = handler.binding();
            if !merged.contains_key(&binding.name) {
                merged.insert(binding.name.clone(), binding.clone());
                appended += 1;
            }
        }

        settings.set_key_bindings(merged.into_values().collect());
        settings
            .reload()
            .context("host settings reload after key binding merge failed")?;

        log::info!("merged {appended} mod key bindings into host settings");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::KeyListener;
    use crate::input::ManualInput;
    use crate::settings::InMemorySettings;
    use crate::tick::TickKind;
    use bevy::input::keyboard::KeyCode;
    use std::sync::{Arc, Mutex};

    #[derive(Clone)]
    struct Recorder {
        downs: Arc<Mutex<Vec<String>>>,
        label: String,
        ticks: TickSet,
    }

    impl Recorder {
        fn new(label: &str, ticks: TickSet) -> Self {
            Self {
                downs: Arc::new(Mutex::new(Vec::new())),
                label: label.to_string(),
                ticks,
            }
        }

        fn downs(&self) -> Vec<String> {
            self.downs.lock().unwrap().clone()
        }
    }

    impl KeyListener for Recorder {
        fn key_down(&mut self, _ticks: TickSet, _phase: TickPhase, _is_repeat: bool) {
            self.downs.lock().unwrap().push(self.label.clone());
        }

        fn key_up(&mut self, _ticks: TickSet, _phase: TickPhase) {}

        fn ticks(&self) -> TickSet {
            self.ticks
        }
    }

    fn registry_with(handlers: Vec<KeyHandler>) -> KeyBindingRegistry {
        let mut registry = KeyBindingRegistry::new();
        for handler in handlers {
            registry.register(handler);
        }
        registry
    }

    #[test]
    fn handlers_fire_in_registration_order() {
        let first = Recorder::new("first", TickSet::CLIENT);
        let second = Recorder::new("second", TickSet::CLIENT);
        let mut registry = registry_with(vec![
            KeyHandler::new(
                KeyBinding::new("key.mod.a", KeyCode::KeyA),
                false,
                first.clone(),
            ),
            KeyHandler::new(
                KeyBinding::new("key.mod.b", KeyCode::KeyA),
                false,
                second.clone(),
            ),
        ]);

        let mut input = ManualInput::new();
        input.press(KeyCode::KeyA);
        registry.tick(TickSet::CLIENT, TickPhase::Start, &input);

        assert_eq!(first.downs(), vec!["first"]);
        assert_eq!(second.downs(), vec!["second"]);
    }

    #[test]
    fn handlers_only_polled_on_declared_ticks() {
        let client = Recorder::new("client", TickSet::CLIENT);
        let render = Recorder::new("render", TickSet::RENDER);
        let mut registry = registry_with(vec![
            KeyHandler::new(
                KeyBinding::new("key.mod.client", KeyCode::KeyA),
                false,
                client.clone(),
            ),
            KeyHandler::new(
                KeyBinding::new("key.mod.render", KeyCode::KeyA),
                false,
                render.clone(),
            ),
        ]);

        let mut input = ManualInput::new();
        input.press(KeyCode::KeyA);
        registry.tick(TickSet::CLIENT, TickPhase::Start, &input);

        assert_eq!(client.downs(), vec!["client"]);
        assert!(render.downs().is_empty());

        registry.tick(
            TickSet::from(TickKind::Render),
            TickPhase::Start,
            &input,
        );
        assert_eq!(render.downs(), vec!["render"]);
        // The client handler is not polled on render ticks.
        assert_eq!(client.downs(), vec!["client"]);
    }

    #[test]
    fn upload_appends_mod_bindings_after_host_bindings() {
        let registry = registry_with(vec![
            KeyHandler::new(
                KeyBinding::new("key.mod.cast", KeyCode::KeyR),
                false,
                Recorder::new("cast", TickSet::CLIENT),
            ),
            KeyHandler::new(
                KeyBinding::new("key.mod.menu", KeyCode::KeyM),
                false,
                Recorder::new("menu", TickSet::CLIENT),
            ),
        ]);

        let host = KeyBinding::new("key.host.jump", KeyCode::Space);
        let mut settings = InMemorySettings::new(vec![host.clone()]);
        registry.upload_to_settings(&mut settings).unwrap();

        let names: Vec<_> = settings
            .key_bindings()
            .iter()
            .map(|b| b.name.as_str().to_string())
            .collect();
        assert_eq!(names, vec!["key.host.jump", "key.mod.cast", "key.mod.menu"]);
        assert_eq!(settings.reload_count(), 1);
    }

    #[test]
    fn upload_is_idempotent() {
        let registry = registry_with(vec![KeyHandler::new(
            KeyBinding::new("key.mod.cast", KeyCode::KeyR),
            false,
            Recorder::new("cast", TickSet::CLIENT),
        )]);

        let mut settings = InMemorySettings::new(Vec::new());
        registry.upload_to_settings(&mut settings).unwrap();
        registry.upload_to_settings(&mut settings).unwrap();

        assert_eq!(settings.key_bindings().len(), 1);
        assert_eq!(settings.reload_count(), 2);
    }

    #[test]
    fn upload_keeps_host_entry_for_duplicate_name() {
        // A mod re-registering a name the host already has must not clobber
        // the host's (possibly user-remapped) entry.
        let registry = registry_with(vec![KeyHandler::new(
            KeyBinding::new("key.host.jump", KeyCode::KeyJ),
            false,
            Recorder::new("jump", TickSet::CLIENT),
        )]);

        let host = KeyBinding::new("key.host.jump", KeyCode::Space);
        let mut settings = InMemorySettings::new(vec![host.clone()]);
        registry.upload_to_settings(&mut settings).unwrap();

        assert_eq!(settings.key_bindings(), &[host]);
    }
}
