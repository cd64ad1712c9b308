//! Key binding data model shared between mods and the host game.
//!
//! A [`KeyBinding`] is what a mod contributes: a stable name (shown in the
//! host's controls screen), the default physical input, and an optional
//! category for grouping.

use bevy::input::keyboard::KeyCode;
use bevy::input::mouse::MouseButton;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// Stable name of a key binding, e.g. `"key.examplemod.cast"`.
///
/// The name is what the host shows on its controls screen and what the
/// settings merge dedupes on. Clones share the backing string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindingName(Arc<str>);

impl BindingName {
    /// Create a binding name from anything string-shaped.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into().into())
    }

    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BindingName {
    fn from(value: &str) -> Self {
        Self(value.into())
    }
}

impl From<String> for BindingName {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for BindingName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Serialized as a bare string, not as a newtype wrapper.
impl Serialize for BindingName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BindingName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self::new)
    }
}

/// Physical input that backs a key binding.
///
/// The host input library polls keyboard keys and mouse buttons through
/// separate queries, so the two are kept as distinct variants rather than
/// folded into one code space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputButton {
    /// A keyboard key.
    Key(KeyCode),
    /// A mouse button.
    Mouse(MouseButton),
}

impl InputButton {
    /// Returns `true` if this button is a mouse button.
    pub fn is_mouse(&self) -> bool {
        matches!(self, InputButton::Mouse(_))
    }
}

impl From<KeyCode> for InputButton {
    fn from(value: KeyCode) -> Self {
        InputButton::Key(value)
    }
}

impl From<MouseButton> for InputButton {
    fn from(value: MouseButton) -> Self {
        InputButton::Mouse(value)
    }
}

impl fmt::Display for InputButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputButton::Key(key) => write!(f, "key:{key:?}"),
            InputButton::Mouse(button) => write!(f, "mouse:{button:?}"),
        }
    }
}

/// A key binding contributed by a mod.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBinding {
    /// Name of the binding, unique across the merged settings array.
    pub name: BindingName,
    /// Default physical input. The host may remap it after the merge.
    pub button: InputButton,
    /// Optional category under which the host's controls screen groups
    /// this binding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl KeyBinding {
    /// Create a new key binding with no category.
    pub fn new(name: impl Into<BindingName>, button: impl Into<InputButton>) -> Self {
        Self {
            name: name.into(),
            button: button.into(),
            category: None,
        }
    }

    /// Set the controls-screen category for this binding.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}
