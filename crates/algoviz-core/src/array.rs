#![forbid(unsafe_code)]

//! The canonical element sequence and its mutation primitives.
//!
//! # Invariants
//!
//! 1. `elements[i].index == i` for every position after every operation.
//! 2. Ids are unique within the model and never reused, even across
//!    [`ArrayModel::initialize`] calls.
//! 3. A mutation that returns `Err` has not modified anything.

use crate::element::{ArrayElement, ElementId, FlagPatch, Value, VisualFlags};
use crate::error::{ModelError, Result};

/// Owned sequence of [`ArrayElement`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArrayModel {
    elements: Vec<ArrayElement>,
    next_id: u64,
}

impl ArrayModel {
    /// An empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A model initialized from `values`.
    #[must_use]
    pub fn from_values(values: &[Value]) -> Self {
        let mut model = Self::new();
        model.initialize(values);
        model
    }

    /// Replace the contents with fresh elements built from `values`.
    ///
    /// Every element gets a new id, its position as index, and no flags.
    pub fn initialize(&mut self, values: &[Value]) {
        let first = self.next_id;
        self.elements = values
            .iter()
            .enumerate()
            .map(|(index, &value)| {
                ArrayElement::new(ElementId::new(first + index as u64), value, index)
            })
            .collect();
        self.next_id = first + values.len() as u64;
        tracing::trace!(len = self.elements.len(), "array initialized");
    }

    /// Replace the contents with a previously captured element sequence.
    ///
    /// Indices are rewritten to match positions. The id counter is advanced
    /// past every restored id so new elements never collide with them.
    pub fn restore(&mut self, elements: Vec<ArrayElement>) {
        self.elements = elements;
        for (index, element) in self.elements.iter_mut().enumerate() {
            element.index = index;
            self.next_id = self.next_id.max(element.id.get().saturating_add(1));
        }
    }

    /// Merge a partial flag update into the element at `index`.
    pub fn update_element(&mut self, index: usize, patch: FlagPatch) -> Result<()> {
        let len = self.elements.len();
        let element = self
            .elements
            .get_mut(index)
            .ok_or(ModelError::out_of_range(index, len))?;
        element.flags = patch.apply(element.flags);
        Ok(())
    }

    /// Exchange the elements at `i` and `j`, keeping `index` fields in sync.
    pub fn swap(&mut self, i: usize, j: usize) -> Result<()> {
        self.check(i)?;
        self.check(j)?;
        if i == j {
            return Ok(());
        }
        self.elements.swap(i, j);
        self.elements[i].index = i;
        self.elements[j].index = j;
        Ok(())
    }

    /// Move the element at `from` to position `to`, shifting the elements
    /// in between by one place.
    pub fn shift(&mut self, from: usize, to: usize) -> Result<()> {
        self.check(from)?;
        self.check(to)?;
        if from == to {
            return Ok(());
        }
        let (lo, hi) = (from.min(to), from.max(to));
        if from > to {
            self.elements[lo..=hi].rotate_right(1);
        } else {
            self.elements[lo..=hi].rotate_left(1);
        }
        for (offset, element) in self.elements[lo..=hi].iter_mut().enumerate() {
            element.index = lo + offset;
        }
        Ok(())
    }

    /// Clear highlighted, comparing and swapping bits on every element.
    /// `SORTED` bits and values are left alone.
    pub fn clear_transient_flags(&mut self) {
        for element in &mut self.elements {
            element.flags.remove(VisualFlags::TRANSIENT);
        }
    }

    /// Clear every flag, `SORTED` included.
    pub fn reset_flags(&mut self) {
        for element in &mut self.elements {
            element.flags = VisualFlags::empty();
        }
    }

    /// Clear every transient bit and set `SORTED` everywhere.
    pub fn mark_all_sorted(&mut self) {
        for element in &mut self.elements {
            element.flags = VisualFlags::SORTED;
        }
    }

    /// Owned copy of the sequence.
    #[must_use]
    pub fn snapshot(&self) -> Vec<ArrayElement> {
        self.elements.clone()
    }

    #[must_use]
    pub fn elements(&self) -> &[ArrayElement] {
        &self.elements
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ArrayElement> {
        self.elements.get(index)
    }

    /// Values in position order.
    #[must_use]
    pub fn values(&self) -> Vec<Value> {
        self.elements.iter().map(|e| e.value).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn check(&self, index: usize) -> Result<()> {
        if index < self.elements.len() {
            Ok(())
        } else {
            Err(ModelError::out_of_range(index, self.elements.len()))
        }
    }
}
