#![forbid(unsafe_code)]

//! Snapshot undo/redo for array states.
//!
//! [`HistoryStack`] keeps whole-state snapshots behind [`Arc`], so handing a
//! snapshot back on undo or redo never copies more than the caller asks for.
//!
//! ```text
//! save(a) save(b) save(c)
//!   undo:  [a, b, c]   redo: []        current: c   (index 2)
//! undo() x2
//!   undo:  [a]         redo: [c, b]    current: a   (index 0)
//! save(d)  (new branch, redo cleared)
//!   undo:  [a, d]      redo: []        current: d   (index 1)
//! ```
//!
//! # Invariants
//!
//! 1. `len() <= config.max_depth` after every operation.
//! 2. Saving clears the redo stack.
//! 3. `index()` is `None` exactly when the stack is empty.
//! 4. Undo never moves past the oldest retained snapshot.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Depth policy for a [`HistoryStack`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Snapshots retained; the oldest are evicted beyond this.
    pub max_depth: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { max_depth: 100 }
    }
}

impl HistoryConfig {
    #[must_use]
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    #[must_use]
    pub fn unlimited() -> Self {
        Self {
            max_depth: usize::MAX,
        }
    }
}

/// Bounded undo/redo over snapshots of `T`.
pub struct HistoryStack<T> {
    /// Saved states; the current one is at the back.
    undo_stack: VecDeque<Arc<T>>,
    /// Undone states; the most recently undone is at the back.
    redo_stack: Vec<Arc<T>>,
    config: HistoryConfig,
}

impl<T: fmt::Debug> fmt::Debug for HistoryStack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryStack")
            .field("index", &self.index())
            .field("undo_depth", &self.undo_stack.len())
            .field("redo_depth", &self.redo_stack.len())
            .field("config", &self.config)
            .finish()
    }
}

impl<T> Default for HistoryStack<T> {
    fn default() -> Self {
        Self::new(HistoryConfig::default())
    }
}

impl<T> HistoryStack<T> {
    #[must_use]
    pub fn new(config: HistoryConfig) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            config,
        }
    }

    /// Record `state` as the newest snapshot, discarding any redo branch.
    pub fn save(&mut self, state: T) {
        self.save_arc(Arc::new(state));
    }

    pub fn save_arc(&mut self, state: Arc<T>) {
        self.redo_stack.clear();
        self.undo_stack.push_back(state);
        self.enforce_depth();
        tracing::trace!(index = ?self.index(), "history saved");
    }

    /// Step back one snapshot.
    ///
    /// If `live` differs from the current snapshot it is saved first, so the
    /// returned state is the one that was current before `live` diverged and
    /// a following [`redo`](Self::redo) brings `live` back.
    pub fn undo(&mut self, live: &T) -> Option<Arc<T>>
    where
        T: Clone + PartialEq,
    {
        let current = self.undo_stack.back()?;
        if current.as_ref() != live {
            self.save(live.clone());
        }
        if self.undo_stack.len() < 2 {
            return None;
        }
        let undone = self.undo_stack.pop_back()?;
        self.redo_stack.push(undone);
        tracing::trace!(index = ?self.index(), "history undo");
        self.undo_stack.back().cloned()
    }

    /// Step forward to the most recently undone snapshot.
    pub fn redo(&mut self) -> Option<Arc<T>> {
        let state = self.redo_stack.pop()?;
        self.undo_stack.push_back(state);
        tracing::trace!(index = ?self.index(), "history redo");
        self.undo_stack.back().cloned()
    }

    #[must_use]
    pub fn current(&self) -> Option<&Arc<T>> {
        self.undo_stack.back()
    }

    /// Position of the current snapshot among all retained ones.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.undo_stack.len().checked_sub(1)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.undo_stack.len() >= 2
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Snapshots retained, including undone ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.undo_stack.len() + self.redo_stack.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.undo_stack.is_empty() && self.redo_stack.is_empty()
    }

    #[must_use]
    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// Change the depth limit, evicting the oldest snapshots if needed.
    pub fn set_config(&mut self, config: HistoryConfig) {
        self.config = config;
        self.enforce_depth();
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Evict the oldest saved snapshots, then the furthest redo ones. The
    /// current snapshot goes last.
    fn enforce_depth(&mut self) {
        while self.len() > self.config.max_depth {
            if self.undo_stack.len() > 1 || self.redo_stack.is_empty() {
                self.undo_stack.pop_front();
            } else {
                self.redo_stack.remove(0);
            }
        }
    }
}
