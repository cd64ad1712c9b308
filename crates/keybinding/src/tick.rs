//! Tick phases and tick-kind sets used to scope handler polling.
//!
//! The host fires every registered handler twice per tick, once at the start
//! and once at the end of its update loop. Handlers additionally declare a
//! [`TickSet`] naming the kinds of client tick they want to be polled on.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use strum::{EnumIter, IntoEnumIterator};

/// Which half of the host's update loop fired a callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TickPhase {
    /// Before the host runs its per-tick update.
    Start,
    /// After the host ran its per-tick update.
    End,
}

impl TickPhase {
    /// Returns `true` for the end-of-tick phase.
    pub fn is_end(&self) -> bool {
        matches!(self, TickPhase::End)
    }
}

/// A kind of client-side tick the host scheduler can fire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
#[repr(u8)]
pub enum TickKind {
    /// The main client update tick.
    Client = 0,
    /// The client-side world simulation tick.
    World = 1,
    /// The render frame tick.
    Render = 2,
    /// The GUI/screen tick.
    Gui = 3,
}

impl TickKind {
    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// A set of [`TickKind`]s, stored as a bitmask.
///
/// `TickSet` is a plain value: copying it is free and set operations never
/// allocate.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TickSet(u8);

impl TickSet {
    /// The empty set. Handlers declaring it are never polled.
    pub const EMPTY: Self = Self(0);
    /// Just the main client tick.
    pub const CLIENT: Self = Self(TickKind::Client.bit());
    /// Just the render tick.
    pub const RENDER: Self = Self(TickKind::Render.bit());

    /// Build a set from a list of kinds.
    pub fn of(kinds: &[TickKind]) -> Self {
        let mut set = Self::EMPTY;
        for kind in kinds {
            set.insert(*kind);
        }
        set
    }

    /// Add a kind to the set.
    pub fn insert(&mut self, kind: TickKind) {
        self.0 |= kind.bit();
    }

    /// Returns a copy of the set with `kind` added.
    pub const fn with(self, kind: TickKind) -> Self {
        Self(self.0 | kind.bit())
    }

    /// Returns `true` if the set contains `kind`.
    pub const fn contains(self, kind: TickKind) -> bool {
        self.0 & kind.bit() != 0
    }

    /// Returns `true` if the set contains no kinds.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the two sets share at least one kind.
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Kinds present in both sets.
    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Kinds present in either set.
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// The kinds in this set, in declaration order.
    pub fn kinds(self) -> SmallVec<[TickKind; 4]> {
        TickKind::iter().filter(|kind| self.contains(*kind)).collect()
    }
}

impl From<TickKind> for TickSet {
    fn from(kind: TickKind) -> Self {
        Self(kind.bit())
    }
}

impl fmt::Debug for TickSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.kinds()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set() {
        let set = TickSet::EMPTY;
        assert!(set.is_empty());
        assert!(!set.contains(TickKind::Client));
        assert!(set.kinds().is_empty());
    }

    #[test]
    fn insert_and_contains() {
        let mut set = TickSet::EMPTY;
        set.insert(TickKind::Client);
        set.insert(TickKind::Render);

        assert!(set.contains(TickKind::Client));
        assert!(set.contains(TickKind::Render));
        assert!(!set.contains(TickKind::Gui));
        assert_eq!(set.kinds().as_slice(), &[TickKind::Client, TickKind::Render]);
    }

    #[test]
    fn intersection_and_union() {
        let client_render = TickSet::of(&[TickKind::Client, TickKind::Render]);
        let render_gui = TickSet::of(&[TickKind::Render, TickKind::Gui]);

        assert!(client_render.intersects(render_gui));
        assert_eq!(
            client_render.intersection(render_gui),
            TickSet::from(TickKind::Render)
        );
        assert_eq!(
            client_render.union(render_gui),
            TickSet::of(&[TickKind::Client, TickKind::Render, TickKind::Gui])
        );

        let world = TickSet::from(TickKind::World);
        assert!(!client_render.intersects(world));
        assert!(client_render.intersection(world).is_empty());
    }

    #[test]
    fn tick_set_serializes_as_bitmask() {
        let set = TickSet::of(&[TickKind::Client, TickKind::Render]);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, "5");

        let parsed: TickSet = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, set);
    }

    #[test]
    fn with_is_const_friendly() {
        const SET: TickSet = TickSet::CLIENT.with(TickKind::Gui);
        assert!(SET.contains(TickKind::Client));
        assert!(SET.contains(TickKind::Gui));
    }

    #[test]
    fn phase_is_end() {
        assert!(!TickPhase::Start.is_end());
        assert!(TickPhase::End.is_end());
    }
}
