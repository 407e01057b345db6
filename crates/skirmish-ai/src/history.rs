//! Shared ring of recent opponent positions.
//!
//! Positions of every opponent land in the same ring, so the repulsion field
//! blends all of them. Once full, each push overwrites the oldest entry.

use std::collections::VecDeque;

use glam::DVec2;

#[derive(Debug, Clone)]
pub struct PositionHistory {
    positions: VecDeque<DVec2>,
    capacity: usize,
}

impl PositionHistory {
    /// Create an empty ring. A zero capacity is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            positions: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, position: DVec2) {
        if self.positions.len() == self.capacity {
            self.positions.pop_front();
        }
        self.positions.push_back(position);
    }

    /// Retained positions, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &DVec2> + '_ {
        self.positions.iter()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.positions.clear();
    }
}
