//! Route cost oracle: chains point-to-point searches into a circuit through a list of stops.

use std::iter::once;

use log::debug;

use crate::config::{CostConfig, Criterion};
use crate::network::{Connection, LineIndex, Network, PathfindingCost, StopIndex, Timestamp};
use crate::search::PathFinder;

/// One leg of a route, between two consecutive stops of the visiting order.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment<'a> {
    pub from: StopIndex,
    pub to: StopIndex,
    pub connections: Vec<&'a Connection>,
}

/// Cost of a candidate visiting order. Infeasible routes cost infinity and carry no segments.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteEvaluation<'a> {
    pub cost: PathfindingCost,
    pub segments: Option<Vec<Segment<'a>>>,
}

impl<'a> RouteEvaluation<'a> {
    pub fn infeasible() -> Self {
        Self { cost: PathfindingCost::INFINITY, segments: None }
    }

    pub fn is_feasible(&self) -> bool {
        self.segments.is_some()
    }

    // All connections of the route, in travel order.
    pub fn connections(&self) -> impl Iterator<Item = &'a Connection> + '_ {
        self.segments
            .iter()
            .flatten()
            .flat_map(|segment| segment.connections.iter().copied())
    }
}

/// Costs the circuit `start_stop -> ordering... -> start_stop`, departing at `initial_time`.
///
/// Each leg is searched with `finder`, starting when the previous leg arrived. The route is infeasible if a leg
/// has no path, or if a leg boards a different line than the previous leg arrived on without leaving the
/// minimum change time (the leg searches cannot see the line they were entered from, so this check lives here).
/// A leg between identical stops is free and leaves the current time and line untouched.
///
/// Under [`Criterion::Time`] the cost is the sum of the legs' costs. Under [`Criterion::Changes`] each change
/// between legs also adds the change cost.
pub fn calculate_route_cost<'a, F: PathFinder + ?Sized>(
    network: &'a Network,
    initial_time: Timestamp,
    start_stop: StopIndex,
    ordering: &[StopIndex],
    finder: &F,
    criterion: Criterion,
    config: &CostConfig,
) -> RouteEvaluation<'a> {
    let min_change_secs = config.min_change_secs();

    let mut total_cost = 0.;
    let mut segments = Vec::with_capacity(ordering.len() + 1);
    let mut current_stop = start_stop;
    let mut current_time = initial_time;
    let mut previous_line: Option<LineIndex> = None;

    for &next_stop in ordering.iter().chain(once(&start_stop)) {
        if next_stop == current_stop {
            segments.push(Segment { from: current_stop, to: next_stop, connections: Vec::new() });
            continue;
        }

        let outcome = finder.find_path(network, current_stop, next_stop, current_time, config);
        let journey = match outcome.journey {
            Ok(journey) => journey,
            Err(error) => {
                debug!(
                    "Route leg {} -> {} is infeasible: {error}",
                    network.stop_label(current_stop),
                    network.stop_label(next_stop)
                );
                return RouteEvaluation::infeasible();
            }
        };
        let (Some(&first), Some(&last)) = (journey.connections.first(), journey.connections.last()) else {
            return RouteEvaluation::infeasible();
        };

        let change_cost = match previous_line {
            Some(line) if line != first.line => {
                if first.departure_time < current_time || first.departure_time - current_time < min_change_secs {
                    debug!("Route change at {} is too tight.", network.stop_label(current_stop));
                    return RouteEvaluation::infeasible();
                }
                config.change_cost_per_change
            }
            _ => 0.,
        };

        total_cost += match criterion {
            Criterion::Time => journey.cost,
            Criterion::Changes => journey.cost + change_cost,
        };

        current_time = last.arrival_time;
        previous_line = Some(last.line);
        segments.push(Segment { from: current_stop, to: next_stop, connections: journey.connections });
        current_stop = next_stop;
    }

    RouteEvaluation { cost: total_cost, segments: Some(segments) }
}
