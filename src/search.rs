//! Machinery shared by the path searches: the open set, edge legality and algorithm dispatch.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use crate::astar::{astar_changes_beam_query, astar_changes_query, astar_time_query};
use crate::config::{CostConfig, Criterion};
use crate::dijkstra::dijkstra_query;
use crate::heuristic::DEFAULT_MAX_SPEED;
use crate::journey::{Journey, JourneyError, JourneyResult};
use crate::network::{Connection, LineIndex, Network, PathfindingCost, StopIndex, Timestamp};

// Total order over open-set entries. The payload of an entry lives in the node arena under `seq`,
// so ties are broken by insertion order and paths are never compared.
#[derive(Debug, Clone, Copy)]
pub(crate) struct QueueKey {
    pub(crate) priority: PathfindingCost,
    pub(crate) secondary: PathfindingCost,
    pub(crate) seq: usize,
}

impl Ord for QueueKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .total_cmp(&other.priority)
            .then_with(|| self.secondary.total_cmp(&other.secondary))
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for QueueKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for QueueKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueKey {}

#[derive(Debug, Clone, Copy)]
pub(crate) struct SearchNode<'a> {
    pub(crate) stop: StopIndex,
    pub(crate) time: Timestamp,
    // Line of the connection that reached this node, none at the origin.
    pub(crate) line: Option<LineIndex>,
    pub(crate) cost: PathfindingCost,
    parent: Option<usize>,
    connection: Option<&'a Connection>,
}

/// Priority queue of search states backed by an arena of nodes with parent pointers.
pub(crate) struct OpenSet<'a> {
    heap: BinaryHeap<Reverse<QueueKey>>,
    nodes: Vec<SearchNode<'a>>,
}

impl<'a> OpenSet<'a> {
    pub(crate) fn new(start: StopIndex, start_time: Timestamp, priority: PathfindingCost, secondary: PathfindingCost) -> Self {
        let mut open = Self { heap: BinaryHeap::new(), nodes: Vec::new() };
        open.insert(
            SearchNode { stop: start, time: start_time, line: None, cost: 0., parent: None, connection: None },
            priority,
            secondary,
        );
        open
    }

    fn insert(&mut self, node: SearchNode<'a>, priority: PathfindingCost, secondary: PathfindingCost) {
        let seq = self.nodes.len();
        self.nodes.push(node);
        self.heap.push(Reverse(QueueKey { priority, secondary, seq }));
    }

    // Queues the state reached by taking `connection` from node `parent`.
    pub(crate) fn push(
        &mut self,
        parent: usize,
        connection: &'a Connection,
        cost: PathfindingCost,
        priority: PathfindingCost,
        secondary: PathfindingCost,
    ) {
        let node = SearchNode {
            stop: connection.arrival_stop,
            time: connection.arrival_time,
            line: Some(connection.line),
            cost,
            parent: Some(parent),
            connection: Some(connection),
        };
        self.insert(node, priority, secondary);
    }

    pub(crate) fn pop(&mut self) -> Option<usize> {
        self.heap.pop().map(|Reverse(key)| key.seq)
    }

    pub(crate) fn node(&self, idx: usize) -> &SearchNode<'a> {
        &self.nodes[idx]
    }

    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }

    pub(crate) fn num_generated(&self) -> usize {
        self.nodes.len()
    }

    // Keeps only the `width` best entries. Dropped nodes stay in the arena but are never expanded.
    pub(crate) fn truncate(&mut self, width: usize) {
        if self.heap.len() <= width {
            return;
        }
        let mut keys = std::mem::take(&mut self.heap).into_vec();
        keys.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        keys.truncate(width);
        self.heap = BinaryHeap::from(keys);
    }

    // Reconstruct the path from parent pointers.
    pub(crate) fn path(&self, idx: usize) -> Vec<&'a Connection> {
        let mut path = Vec::new();
        let mut current = Some(idx);
        while let Some(node_idx) = current {
            let node = &self.nodes[node_idx];
            if let Some(connection) = node.connection {
                path.push(connection);
            }
            current = node.parent;
        }
        path.reverse();
        path
    }
}

pub(crate) fn is_line_change(current_line: Option<LineIndex>, connection: &Connection) -> bool {
    current_line.is_some_and(|line| line != connection.line)
}

// A connection can be taken if it has not yet departed, and a line change leaves at least the minimum change time.
pub(crate) fn can_board(
    connection: &Connection,
    current_time: Timestamp,
    current_line: Option<LineIndex>,
    min_change_secs: Timestamp,
) -> bool {
    if connection.departure_time < current_time {
        return false;
    }
    !is_line_change(current_line, connection) || connection.departure_time - current_time >= min_change_secs
}

/// Result of a single-source single-target search.
///
/// An unreachable target is an ordinary outcome: `journey` holds a [`JourneyError`] and the elapsed time is
/// still reported.
#[derive(Debug)]
pub struct SearchOutcome<'a> {
    pub journey: JourneyResult<'a>,
    pub elapsed: Duration,
}

impl<'a> SearchOutcome<'a> {
    pub(crate) fn found(started: Instant, journey: Journey<'a>) -> Self {
        Self { journey: Ok(journey), elapsed: started.elapsed() }
    }

    pub(crate) fn not_found(started: Instant, error: JourneyError) -> Self {
        Self { journey: Err(error), elapsed: started.elapsed() }
    }

    pub fn cost(&self) -> Option<PathfindingCost> {
        self.journey.as_ref().ok().map(|journey| journey.cost)
    }

    pub fn path(&self) -> Option<&[&'a Connection]> {
        self.journey.as_ref().ok().map(|journey| journey.connections.as_slice())
    }

    pub fn is_found(&self) -> bool {
        self.journey.is_ok()
    }
}

/// Anything that can answer point-to-point queries. The route cost oracle and the tabu search are generic over it.
pub trait PathFinder {
    fn find_path<'a>(
        &self,
        network: &'a Network,
        start: StopIndex,
        end: StopIndex,
        start_time: Timestamp,
        config: &CostConfig,
    ) -> SearchOutcome<'a>;
}

/// The available search algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchAlgorithm {
    /// Earliest arrival by Dijkstra over arrival times.
    Dijkstra,
    /// Earliest arrival by A* with a straight-line distance heuristic.
    AStarTime { max_speed: f64 },
    /// Fewest line changes.
    AStarChanges,
    /// Fewest line changes with the open set capped at `beam_width`. Approximate: may miss the optimum or any path.
    AStarChangesBeam { beam_width: usize },
}

impl SearchAlgorithm {
    /// The exact algorithm for a criterion.
    pub fn for_criterion(criterion: Criterion) -> Self {
        match criterion {
            Criterion::Time => SearchAlgorithm::AStarTime { max_speed: DEFAULT_MAX_SPEED },
            Criterion::Changes => SearchAlgorithm::AStarChanges,
        }
    }

    pub fn criterion(&self) -> Criterion {
        match self {
            SearchAlgorithm::Dijkstra | SearchAlgorithm::AStarTime { .. } => Criterion::Time,
            SearchAlgorithm::AStarChanges | SearchAlgorithm::AStarChangesBeam { .. } => Criterion::Changes,
        }
    }

    pub fn search<'a>(
        &self,
        network: &'a Network,
        start: StopIndex,
        end: StopIndex,
        start_time: Timestamp,
        config: &CostConfig,
    ) -> SearchOutcome<'a> {
        match *self {
            SearchAlgorithm::Dijkstra => dijkstra_query(network, start, end, start_time, config),
            SearchAlgorithm::AStarTime { max_speed } => astar_time_query(network, start, end, start_time, max_speed, config),
            SearchAlgorithm::AStarChanges => astar_changes_query(network, start, end, start_time, config),
            SearchAlgorithm::AStarChangesBeam { beam_width } => {
                astar_changes_beam_query(network, start, end, start_time, beam_width, config)
            }
        }
    }
}

impl PathFinder for SearchAlgorithm {
    fn find_path<'a>(
        &self,
        network: &'a Network,
        start: StopIndex,
        end: StopIndex,
        start_time: Timestamp,
        config: &CostConfig,
    ) -> SearchOutcome<'a> {
        self.search(network, start, end, start_time, config)
    }
}
