use std::collections::{HashSet, VecDeque};

use super::config::TabuMemoryKind;

/// A swap of two positions `(i, j)` with `i < j` in the visiting order.
pub type SwapMove = (usize, usize);

/// Record of swaps that may not be selected again.
#[derive(Debug, Clone)]
pub enum TabuMemory {
    Unbounded(HashSet<SwapMove>),
    Fifo { moves: VecDeque<SwapMove>, capacity: usize },
}

impl TabuMemory {
    pub fn new(kind: TabuMemoryKind, num_stops: usize) -> Self {
        match kind {
            TabuMemoryKind::Unbounded => TabuMemory::Unbounded(HashSet::new()),
            TabuMemoryKind::BoundedFifo => {
                let capacity = 2 * num_stops;
                TabuMemory::Fifo { moves: VecDeque::with_capacity(capacity), capacity }
            }
        }
    }

    pub fn contains(&self, mv: &SwapMove) -> bool {
        match self {
            TabuMemory::Unbounded(moves) => moves.contains(mv),
            TabuMemory::Fifo { moves, .. } => moves.contains(mv),
        }
    }

    pub fn record(&mut self, mv: SwapMove) {
        match self {
            TabuMemory::Unbounded(moves) => {
                moves.insert(mv);
            }
            TabuMemory::Fifo { moves, capacity } => {
                if *capacity == 0 {
                    return;
                }
                if moves.len() == *capacity {
                    moves.pop_front();
                }
                moves.push_back(mv);
            }
        }
    }

    pub fn len(&self) -> usize {
        match self {
            TabuMemory::Unbounded(moves) => moves.len(),
            TabuMemory::Fifo { moves, .. } => moves.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
