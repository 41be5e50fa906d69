//! A* searches over the timetable.
//!
//! [`astar_time_query`] minimises travel time using a straight-line distance heuristic.
//! [`astar_changes_query`] minimises line changes over (stop, line) states. Its heuristic is zero, so it
//! expands states in the same order as Dijkstra would over that state space.
//! [`astar_changes_beam_query`] is the same search with a bounded open set. It is approximate.

use std::collections::HashMap;
use std::time::Instant;

use log::trace;

use crate::config::CostConfig;
use crate::heuristic::GeoHeuristic;
use crate::journey::{Journey, JourneyError};
use crate::network::{LineIndex, Network, PathfindingCost, StopIndex, Timestamp};
use crate::search::{can_board, is_line_change, OpenSet, SearchOutcome};

/// Earliest-arrival query guided by [`GeoHeuristic`].
///
/// Both endpoints must have coordinates, otherwise the outcome is [`JourneyError::MissingCoordinates`].
/// The result is optimal as long as `max_speed` is at least the speed of every vehicle in the network.
pub fn astar_time_query<'a>(
    network: &'a Network,
    start: StopIndex,
    end: StopIndex,
    start_time: Timestamp,
    max_speed: f64,
    config: &CostConfig,
) -> SearchOutcome<'a> {
    let query_start = Instant::now();
    if !network.contains_stop(start) || !network.contains_stop(end) {
        return SearchOutcome::not_found(query_start, JourneyError::NoJourneyFound);
    }

    let destination = match (network.get_coordinates(start), network.get_coordinates(end)) {
        (Some(_), Some(destination)) => destination,
        (None, _) => return missing_coordinates(query_start, network, start),
        (Some(_), None) => return missing_coordinates(query_start, network, end),
    };
    let heuristic = GeoHeuristic::new(network, destination, max_speed, config.time_cost_per_sec);
    let min_change_secs = config.min_change_secs();

    // Lowest known cost to reach each stop.
    let mut best_g = vec![PathfindingCost::INFINITY; network.num_stops()];
    best_g[start as usize] = 0.;

    let mut open = OpenSet::new(start, start_time, heuristic.estimate(start), 0.);
    let mut num_expanded = 0;

    while let Some(node_idx) = open.pop() {
        let node = *open.node(node_idx);

        if node.stop == end {
            trace!("A* (time) expanded {num_expanded} of {} generated states.", open.num_generated());
            return SearchOutcome::found(query_start, Journey::from(open.path(node_idx), node.cost, network));
        }
        num_expanded += 1;

        for connection in network.get_connections(node.stop) {
            if !can_board(connection, node.time, node.line, min_change_secs) {
                continue;
            }

            // Waiting plus riding, i.e. the time from now until arrival.
            let elapsed = (connection.arrival_time - node.time) as PathfindingCost;
            let new_g = node.cost + elapsed * config.time_cost_per_sec;

            let arrival_stop = connection.arrival_stop as usize;
            if new_g >= best_g[arrival_stop] {
                continue;
            }
            best_g[arrival_stop] = new_g;

            let new_f = new_g + heuristic.estimate(connection.arrival_stop);
            open.push(node_idx, connection, new_g, new_f, new_g);
        }
    }

    trace!("A* (time) exhausted {} states without reaching the target.", open.num_generated());
    SearchOutcome::not_found(query_start, JourneyError::NoJourneyFound)
}

fn missing_coordinates<'a>(query_start: Instant, network: &Network, stop: StopIndex) -> SearchOutcome<'a> {
    SearchOutcome::not_found(
        query_start,
        JourneyError::MissingCoordinates { stop: network.get_stop_name(stop).to_owned() },
    )
}

/// Fewest-changes query. The cost is the number of line changes scaled by the change cost.
pub fn astar_changes_query<'a>(
    network: &'a Network,
    start: StopIndex,
    end: StopIndex,
    start_time: Timestamp,
    config: &CostConfig,
) -> SearchOutcome<'a> {
    changes_query(network, start, end, start_time, None, config)
}

/// Fewest-changes query keeping at most `beam_width` states open.
///
/// The open set is cut down to its `beam_width` best entries before every pop. This bounds the work done
/// but gives up optimality and completeness: the returned cost is never lower than that of
/// [`astar_changes_query`], and a path may not be found at all even when one exists.
pub fn astar_changes_beam_query<'a>(
    network: &'a Network,
    start: StopIndex,
    end: StopIndex,
    start_time: Timestamp,
    beam_width: usize,
    config: &CostConfig,
) -> SearchOutcome<'a> {
    changes_query(network, start, end, start_time, Some(beam_width.max(1)), config)
}

fn changes_query<'a>(
    network: &'a Network,
    start: StopIndex,
    end: StopIndex,
    start_time: Timestamp,
    beam_width: Option<usize>,
    config: &CostConfig,
) -> SearchOutcome<'a> {
    let query_start = Instant::now();
    if !network.contains_stop(start) || !network.contains_stop(end) {
        return SearchOutcome::not_found(query_start, JourneyError::NoJourneyFound);
    }
    let min_change_secs = config.min_change_secs();

    // Fewest changes (then earliest arrival) known for arriving at a stop on a line.
    let mut best: HashMap<(StopIndex, LineIndex), (PathfindingCost, Timestamp)> = HashMap::new();

    // f = g, ties broken by earlier arrival.
    let mut open = OpenSet::new(start, start_time, 0., start_time as PathfindingCost);
    let mut num_expanded = 0;

    loop {
        if let Some(beam_width) = beam_width {
            open.truncate(beam_width);
        }
        let Some(node_idx) = open.pop() else {
            break;
        };
        let node = *open.node(node_idx);

        if node.stop == end {
            trace!(
                "A* (changes) expanded {num_expanded} of {} generated states, {} still open.",
                open.num_generated(),
                open.len()
            );
            return SearchOutcome::found(query_start, Journey::from(open.path(node_idx), node.cost, network));
        }
        num_expanded += 1;

        for connection in network.get_connections(node.stop) {
            if !can_board(connection, node.time, node.line, min_change_secs) {
                continue;
            }

            let mut changes = node.cost;
            if is_line_change(node.line, connection) {
                changes += config.change_cost_per_change;
            }

            let state = (connection.arrival_stop, connection.line);
            if let Some(&(best_changes, best_time)) = best.get(&state) {
                if changes > best_changes || (changes == best_changes && connection.arrival_time >= best_time) {
                    continue;
                }
            }
            best.insert(state, (changes, connection.arrival_time));

            open.push(node_idx, connection, changes, changes, connection.arrival_time as PathfindingCost);
        }
    }

    trace!("A* (changes) exhausted {} states without reaching the target.", open.num_generated());
    SearchOutcome::not_found(query_start, JourneyError::NoJourneyFound)
}
