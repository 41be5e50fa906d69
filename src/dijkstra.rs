use std::time::Instant;

use log::trace;

use crate::config::CostConfig;
use crate::journey::{Journey, JourneyError};
use crate::network::{Network, PathfindingCost, StopIndex, Timestamp};
use crate::search::{can_board, OpenSet, SearchOutcome};

// Earliest-arrival query ordered by arrival time. The returned cost is the elapsed time since `start_time`
// scaled by the time cost.
pub fn dijkstra_query<'a>(
    network: &'a Network,
    start: StopIndex,
    end: StopIndex,
    start_time: Timestamp,
    config: &CostConfig,
) -> SearchOutcome<'a> {
    let query_start = Instant::now();
    if !network.contains_stop(start) || !network.contains_stop(end) {
        return SearchOutcome::not_found(query_start, JourneyError::NoJourneyFound);
    }
    let min_change_secs = config.min_change_secs();

    // Earliest known arrival time at each stop.
    let mut best_arrival = vec![Timestamp::MAX; network.num_stops()];
    best_arrival[start as usize] = start_time;

    let mut open = OpenSet::new(start, start_time, start_time as PathfindingCost, 0.);
    let mut num_expanded = 0;

    while let Some(node_idx) = open.pop() {
        let node = *open.node(node_idx);

        if node.stop == end {
            trace!("Dijkstra expanded {num_expanded} of {} generated states.", open.num_generated());
            let cost = (node.time - start_time) as PathfindingCost * config.time_cost_per_sec;
            return SearchOutcome::found(query_start, Journey::from(open.path(node_idx), cost, network));
        }
        num_expanded += 1;

        for connection in network.get_connections(node.stop) {
            if !can_board(connection, node.time, node.line, min_change_secs) {
                continue;
            }

            let arrival_stop = connection.arrival_stop as usize;
            if connection.arrival_time >= best_arrival[arrival_stop] {
                continue;
            }
            best_arrival[arrival_stop] = connection.arrival_time;

            let arrival_time = connection.arrival_time as PathfindingCost;
            open.push(node_idx, connection, arrival_time, arrival_time, 0.);
        }
    }

    trace!("Dijkstra exhausted {} states without reaching the target.", open.num_generated());
    SearchOutcome::not_found(query_start, JourneyError::NoJourneyFound)
}
