#![forbid(unsafe_code)]

//! Array elements and their visual state flags.
//!
//! An [`ArrayElement`] is a value tagged with a stable identity and a set of
//! independent [`VisualFlags`]. The flags are deliberately *not* mutually
//! exclusive: an element can be `SORTED` and `HIGHLIGHTED` at the same time.
//! Renderers that need a single state use [`ArrayElement::visual_state`],
//! which resolves the bits by priority.

use std::fmt;

use bitflags::bitflags;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Numeric payload of an element.
pub type Value = i64;

/// Opaque element identity, stable across reorderings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ElementId(u64);

impl ElementId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

bitflags! {
    /// Per-element visual state bits.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct VisualFlags: u8 {
        /// Marked by the algorithm (pivot, current minimum, heap root).
        const HIGHLIGHTED = 0b0001;
        /// Currently being compared.
        const COMPARING   = 0b0010;
        /// Currently being swapped or relocated.
        const SWAPPING    = 0b0100;
        /// In its final position.
        const SORTED      = 0b1000;
    }
}

impl VisualFlags {
    /// Bits that only last for the step in which they were set.
    pub const TRANSIENT: Self = Self::HIGHLIGHTED
        .union(Self::COMPARING)
        .union(Self::SWAPPING);
}

/// Single resolved state for renderers that draw one color per bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum VisualState {
    Default,
    Sorted,
    Highlighted,
    Comparing,
    Swapping,
}

/// A partial flag update: bits in `set` are turned on, then bits in
/// `clear` are turned off.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FlagPatch {
    set: VisualFlags,
    clear: VisualFlags,
}

impl FlagPatch {
    /// An empty patch.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            set: VisualFlags::empty(),
            clear: VisualFlags::empty(),
        }
    }

    /// Turn `flags` on.
    #[must_use]
    pub const fn set(mut self, flags: VisualFlags) -> Self {
        self.set = self.set.union(flags);
        self.clear = self.clear.difference(flags);
        self
    }

    /// Turn `flags` off.
    #[must_use]
    pub const fn clear(mut self, flags: VisualFlags) -> Self {
        self.clear = self.clear.union(flags);
        self.set = self.set.difference(flags);
        self
    }

    /// Apply the patch to a flag set.
    #[must_use]
    pub const fn apply(self, flags: VisualFlags) -> VisualFlags {
        flags.union(self.set).difference(self.clear)
    }
}

/// One bar of the visualized array.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ArrayElement {
    pub id: ElementId,
    pub value: Value,
    /// Position in the owning sequence; kept in sync by [`crate::ArrayModel`].
    pub index: usize,
    pub flags: VisualFlags,
}

impl ArrayElement {
    /// A fresh element with no flags set.
    #[must_use]
    pub fn new(id: ElementId, value: Value, index: usize) -> Self {
        Self {
            id,
            value,
            index,
            flags: VisualFlags::empty(),
        }
    }

    #[must_use]
    pub fn is_highlighted(&self) -> bool {
        self.flags.contains(VisualFlags::HIGHLIGHTED)
    }

    #[must_use]
    pub fn is_comparing(&self) -> bool {
        self.flags.contains(VisualFlags::COMPARING)
    }

    #[must_use]
    pub fn is_swapping(&self) -> bool {
        self.flags.contains(VisualFlags::SWAPPING)
    }

    #[must_use]
    pub fn is_sorted(&self) -> bool {
        self.flags.contains(VisualFlags::SORTED)
    }

    /// Resolve the flag bits to one state.
    ///
    /// Priority: swapping, comparing, highlighted, sorted, default.
    #[must_use]
    pub fn visual_state(&self) -> VisualState {
        if self.is_swapping() {
            VisualState::Swapping
        } else if self.is_comparing() {
            VisualState::Comparing
        } else if self.is_highlighted() {
            VisualState::Highlighted
        } else if self.is_sorted() {
            VisualState::Sorted
        } else {
            VisualState::Default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element() -> ArrayElement {
        ArrayElement::new(ElementId::new(1), 42, 0)
    }

    #[test]
    fn new_element_has_no_flags() {
        let e = element();
        assert!(e.flags.is_empty());
        assert_eq!(e.visual_state(), VisualState::Default);
    }

    #[test]
    fn patch_sets_then_clears() {
        let patch = FlagPatch::new()
            .set(VisualFlags::COMPARING | VisualFlags::SWAPPING)
            .clear(VisualFlags::SWAPPING);
        let flags = patch.apply(VisualFlags::SORTED);
        assert_eq!(flags, VisualFlags::COMPARING | VisualFlags::SORTED);
    }

    #[test]
    fn later_set_overrides_earlier_clear() {
        let patch = FlagPatch::new()
            .clear(VisualFlags::HIGHLIGHTED)
            .set(VisualFlags::HIGHLIGHTED);
        assert_eq!(patch.apply(VisualFlags::empty()), VisualFlags::HIGHLIGHTED);
    }

    #[test]
    fn flags_coexist_and_resolve_by_priority() {
        let mut e = element();
        e.flags = VisualFlags::SORTED | VisualFlags::HIGHLIGHTED;
        assert!(e.is_sorted());
        assert!(e.is_highlighted());
        assert_eq!(e.visual_state(), VisualState::Highlighted);

        e.flags |= VisualFlags::COMPARING | VisualFlags::SWAPPING;
        assert_eq!(e.visual_state(), VisualState::Swapping);
    }

    #[test]
    fn transient_excludes_sorted() {
        assert!(!VisualFlags::TRANSIENT.contains(VisualFlags::SORTED));
        assert!(VisualFlags::TRANSIENT.contains(VisualFlags::COMPARING));
    }

    #[test]
    fn element_id_display() {
        assert_eq!(ElementId::new(9).to_string(), "#9");
    }
}
