//! Bounded undo history of full chart snapshots
//!
//! A snapshot is taken right before each user operation that changes the
//! chart. Undo pops the newest one; there is no redo.

use crate::grid::DenseGrid;
use crate::layer::LayerId;
use crate::layer_stack::LayerStack;
use std::collections::VecDeque;
use tracing::debug;

/// Default number of snapshots kept
pub const DEFAULT_MAX_DEPTH: usize = 50;

/// An independent deep copy of the editable chart state.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// What the user was about to do, e.g. "Fill area"
    pub label: String,
    pub grid: DenseGrid,
    pub layers: LayerStack,
}

impl Snapshot {
    pub fn new(label: impl Into<String>, grid: &DenseGrid, layers: &LayerStack) -> Self {
        Self { label: label.into(), grid: grid.clone(), layers: layers.clone() }
    }

    pub fn active_layer(&self) -> Option<LayerId> {
        self.layers.active_id()
    }
}

#[derive(Debug, Clone)]
pub struct UndoStore {
    history: VecDeque<Snapshot>,
    max_depth: usize,
}

impl Default for UndoStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl UndoStore {
    /// Create a store keeping at most `max_depth` snapshots (at least one).
    pub fn new(max_depth: usize) -> Self {
        let max_depth = max_depth.max(1);
        Self { history: VecDeque::with_capacity(max_depth), max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Label of the snapshot the next undo would restore
    pub fn peek_label(&self) -> Option<&str> {
        self.history.back().map(|s| s.label.as_str())
    }

    /// Record the current state. The oldest snapshot is dropped when full.
    pub fn capture(&mut self, label: impl Into<String>, grid: &DenseGrid, layers: &LayerStack) {
        self.push(Snapshot::new(label, grid, layers));
    }

    /// Record a snapshot taken earlier, once the operation it guards succeeded.
    pub fn push(&mut self, snapshot: Snapshot) {
        if self.history.len() == self.max_depth {
            self.history.pop_front();
        }
        debug!(label = %snapshot.label, depth = self.history.len() + 1, "captured undo snapshot");
        self.history.push_back(snapshot);
    }

    /// Remove and return the newest snapshot.
    pub fn undo(&mut self) -> Option<Snapshot> {
        self.history.pop_back()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    #[test]
    fn test_undo_empty_is_none() {
        let mut store = UndoStore::default();
        assert!(store.undo().is_none());
        assert_eq!(store.max_depth(), DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut grid = DenseGrid::new(3, 3);
        let mut layers = LayerStack::with_layer("Background");
        let mut store = UndoStore::new(5);

        store.capture("Change cell color", &grid, &layers);
        grid.set(0, 0, Some(Color::new("red")));
        layers.active_mut().unwrap().set_cell(1, 1, Some(Color::new("blue")));

        let snapshot = store.undo().unwrap();
        assert_eq!(snapshot.label, "Change cell color");
        assert_eq!(snapshot.grid.get(0, 0), None);
        assert!(snapshot.layers.active().unwrap().is_empty());
        assert_eq!(snapshot.active_layer(), layers.active_id());
    }

    #[test]
    fn test_lifo_order() {
        let grid = DenseGrid::new(1, 1);
        let layers = LayerStack::new();
        let mut store = UndoStore::new(5);
        store.capture("first", &grid, &layers);
        store.capture("second", &grid, &layers);
        assert_eq!(store.peek_label(), Some("second"));
        assert_eq!(store.undo().unwrap().label, "second");
        assert_eq!(store.undo().unwrap().label, "first");
        assert!(store.is_empty());
    }

    #[test]
    fn test_bound_evicts_oldest() {
        let grid = DenseGrid::new(1, 1);
        let layers = LayerStack::new();
        let mut store = UndoStore::new(3);
        for i in 0..4 {
            store.capture(format!("op {}", i), &grid, &layers);
        }
        assert_eq!(store.len(), 3);
        let labels: Vec<String> = std::iter::from_fn(|| store.undo()).map(|s| s.label).collect();
        assert_eq!(labels, vec!["op 3", "op 2", "op 1"]);
    }

    #[test]
    fn test_zero_depth_keeps_one() {
        let mut store = UndoStore::new(0);
        store.capture("a", &DenseGrid::new(1, 1), &LayerStack::new());
        store.capture("b", &DenseGrid::new(1, 1), &LayerStack::new());
        assert_eq!(store.len(), 1);
        assert_eq!(store.undo().unwrap().label, "b");
    }
}
