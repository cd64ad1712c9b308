//! Host settings surface the registry merges key bindings into.
//!
//! The key-binding array and whatever persistence backs it belong to the
//! host game. This module only defines the seam the registry writes through,
//! plus an in-memory implementation for tests and headless hosts.

use crate::binding::KeyBinding;
use anyhow::Result;

/// The host-owned settings object holding the game's key-binding array.
pub trait SettingsHost {
    /// Key bindings currently known to the host, including previously
    /// merged mod bindings.
    fn key_bindings(&self) -> &[KeyBinding];

    /// Replace the host's key-binding array.
    fn set_key_bindings(&mut self, bindings: Vec<KeyBinding>);

    /// Re-apply persisted user key codes after the array changed.
    ///
    /// The host owns the persistence format; this is only the hook the
    /// registry invokes after a merge.
    fn reload(&mut self) -> Result<()>;
}

/// In-memory host settings, useful for tests and headless hosts.
#[derive(Default, Debug)]
pub struct InMemorySettings {
    bindings: Vec<KeyBinding>,
    reload_count: usize,
}

impl InMemorySettings {
    /// Create settings pre-populated with the host's own bindings.
    pub fn new(bindings: Vec<KeyBinding>) -> Self {
        Self {
            bindings,
            reload_count: 0,
        }
    }

    /// How many times [`SettingsHost::reload`] has been invoked.
    pub fn reload_count(&self) -> usize {
        self.reload_count
    }
}

impl SettingsHost for InMemorySettings {
    fn key_bindings(&self) -> &[KeyBinding] {
        &self.bindings
    }

    fn set_key_bindings(&mut self, bindings: Vec<KeyBinding>) {
        self.bindings = bindings;
    }

    fn reload(&mut self) -> Result<()> {
        // Nothing persisted to re-apply.
        self.reload_count += 1;
        Ok(())
    }
}
