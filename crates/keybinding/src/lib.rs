//! Keybinding registration for game mods.
//!
//! Mods register [`KeyHandler`]s with the [`KeyBindingRegistry`]; the host
//! polls the registry once per tick, and raw boolean key state is translated
//! into edge-triggered [`KeyListener`] callbacks. The registry also merges
//! the mod-defined [`KeyBinding`]s into the host game's settings array so
//! they show up on the controls screen and pick up user remappings.
//!
//! # Example
//!
//! ```ignore
//! use keybinding::{KeyBinding, KeyBindingRegistry, KeyHandler};
//! use bevy::input::keyboard::KeyCode;
//!
//! let mut registry = KeyBindingRegistry::new();
//! registry.register(KeyHandler::new(
//!     KeyBinding::new("key.examplemod.cast", KeyCode::KeyR),
//!     false, // fire once per press
//!     CastListener::default(),
//! ));
//! ```
//!
//! In a Bevy host, add [`KeyBindingPlugin`](crate::bevy::KeyBindingPlugin)
//! instead and register through
//! [`KeyBindingRegistryResource`](crate::bevy::KeyBindingRegistryResource).

pub mod bevy;
pub mod binding;
pub mod handler;
pub mod input;
pub mod registry;
pub mod settings;
pub mod tick;

// Re-export main types
pub use binding::{BindingName, InputButton, KeyBinding};
pub use handler::{KeyHandler, KeyListener};
pub use input::{InputSource, ManualInput};
pub use registry::KeyBindingRegistry;
pub use settings::{InMemorySettings, SettingsHost};
pub use tick::{TickKind, TickPhase, TickSet};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
