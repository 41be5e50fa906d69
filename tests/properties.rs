use proptest::prelude::*;

use transit_router::heuristic::DEFAULT_MAX_SPEED;
use transit_router::network::{StopIndex, Timestamp};
use transit_router::{
    astar_changes_beam_query, astar_changes_query, astar_time_query, calculate_route_cost, dijkstra_query,
    tabu_search, Coordinates, CostConfig, Criterion, Network, NetworkBuilder, SearchAlgorithm, TabuConfig,
};

const NUM_STOPS: usize = 8;
const NUM_LINES: usize = 3;

// (line, departure stop, arrival stop, departure time, extra travel time)
type ConnectionSpec = (usize, usize, usize, Timestamp, Timestamp);

fn coordinates_strategy() -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((51.0..51.05f64, 17.0..17.05f64), NUM_STOPS)
}

fn connections_strategy() -> impl Strategy<Value = Vec<ConnectionSpec>> {
    prop::collection::vec(
        (0..NUM_LINES, 0..NUM_STOPS, 0..NUM_STOPS, 0..7200u32, 0..600u32),
        1..60,
    )
}

// Every connection is at most 10 m/s fast, so the default A* heuristic is admissible.
fn build_network(coordinates: &[(f64, f64)], connections: &[ConnectionSpec]) -> Network {
    let mut builder = NetworkBuilder::new();
    for (stop, &(latitude, longitude)) in coordinates.iter().enumerate() {
        builder.set_stop_coordinates(&format!("S{stop}"), Coordinates::new(latitude, longitude));
    }
    for &(line, from, to, departure_time, extra) in connections {
        if from == to {
            continue;
        }
        let (a, b) = (coordinates[from], coordinates[to]);
        let distance = Coordinates::new(a.0, a.1).distance_to(&Coordinates::new(b.0, b.1));
        let travel_time = (distance / 10.0).ceil() as Timestamp + extra;
        builder
            .add_connection(&format!("L{line}"), &format!("S{from}"), departure_time, &format!("S{to}"), departure_time + travel_time)
            .unwrap();
    }
    builder.build()
}

// (stops visited in order, first departure, dwell-free extra time per hop)
type TripSpec = (Vec<usize>, Timestamp, Vec<Timestamp>);

// Every line is a single vehicle trip visiting each stop at most once.
fn trips_strategy() -> impl Strategy<Value = Vec<TripSpec>> {
    let trip = (
        Just((0..NUM_STOPS).collect::<Vec<usize>>()).prop_shuffle(),
        2..=NUM_STOPS,
        0..3600u32,
        prop::collection::vec(0..300u32, NUM_STOPS),
    )
        .prop_map(|(stops, len, departure_time, extras)| (stops[..len].to_vec(), departure_time, extras));
    prop::collection::vec(trip, 1..12)
}

fn build_trip_network(coordinates: &[(f64, f64)], trips: &[TripSpec]) -> Network {
    let mut connections = Vec::new();
    for (line, (stops, departure_time, extras)) in trips.iter().enumerate() {
        let mut time = *departure_time;
        for (pair, &extra) in stops.windows(2).zip(extras) {
            let (a, b) = (coordinates[pair[0]], coordinates[pair[1]]);
            let distance = Coordinates::new(a.0, a.1).distance_to(&Coordinates::new(b.0, b.1));
            let travel_time = (distance / 10.0).ceil() as Timestamp + extra;
            connections.push((line, pair[0], pair[1], time, travel_time));
            time += travel_time;
        }
    }

    let mut builder = NetworkBuilder::new();
    for (stop, &(latitude, longitude)) in coordinates.iter().enumerate() {
        builder.set_stop_coordinates(&format!("S{stop}"), Coordinates::new(latitude, longitude));
    }
    for (line, from, to, departure_time, travel_time) in connections {
        builder
            .add_connection(&format!("T{line}"), &format!("S{from}"), departure_time, &format!("S{to}"), departure_time + travel_time)
            .unwrap();
    }
    builder.build()
}

fn stop(network: &Network, idx: usize) -> StopIndex {
    network.get_stop_idx_from_name(&format!("S{idx}")).unwrap()
}

proptest! {
    #[test]
    fn dijkstra_and_astar_agree_on_time(
        coordinates in coordinates_strategy(),
        connections in connections_strategy(),
        start in 0..NUM_STOPS,
        end in 0..NUM_STOPS,
    ) {
        let network = build_network(&coordinates, &connections);
        let (start, end) = (stop(&network, start), stop(&network, end));
        let config = CostConfig::default();

        let dijkstra = dijkstra_query(&network, start, end, 0, &config);
        let astar = astar_time_query(&network, start, end, 0, DEFAULT_MAX_SPEED, &config);
        prop_assert_eq!(dijkstra.cost(), astar.cost());
    }

    #[test]
    fn found_paths_are_continuous(
        coordinates in coordinates_strategy(),
        connections in connections_strategy(),
        start in 0..NUM_STOPS,
        end in 0..NUM_STOPS,
        start_time in 0..3600u32,
    ) {
        let network = build_network(&coordinates, &connections);
        let (start, end) = (stop(&network, start), stop(&network, end));
        let config = CostConfig::default();

        for algorithm in [SearchAlgorithm::Dijkstra, SearchAlgorithm::AStarChanges] {
            let outcome = algorithm.search(&network, start, end, start_time, &config);
            let Some(path) = outcome.path() else {
                continue;
            };
            if let (Some(first), Some(last)) = (path.first(), path.last()) {
                prop_assert_eq!(first.departure_stop, start);
                prop_assert!(first.departure_time >= start_time);
                prop_assert_eq!(last.arrival_stop, end);
            } else {
                prop_assert_eq!(start, end);
            }
            for pair in path.windows(2) {
                prop_assert_eq!(pair[0].arrival_stop, pair[1].departure_stop);
                prop_assert!(pair[1].departure_time >= pair[0].arrival_time);
            }
        }
    }

    #[test]
    fn beam_search_is_never_better_than_exact(
        coordinates in coordinates_strategy(),
        trips in trips_strategy(),
        start in 0..NUM_STOPS,
        end in 0..NUM_STOPS,
        beam_width in 1..6usize,
        min_change_minutes in 0..5i64,
    ) {
        let network = build_trip_network(&coordinates, &trips);
        let (start, end) = (stop(&network, start), stop(&network, end));
        let config = CostConfig::default().with_min_change_time(chrono::TimeDelta::minutes(min_change_minutes));

        let exact = astar_changes_query(&network, start, end, 0, &config);
        let beam = astar_changes_beam_query(&network, start, end, 0, beam_width, &config);
        if let Some(beam_cost) = beam.cost() {
            let exact_cost = exact.cost();
            prop_assert!(exact_cost.is_some());
            prop_assert!(exact_cost.unwrap_or(f64::INFINITY) <= beam_cost);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn tabu_best_cost_never_increases_and_matches_its_ordering(
        coordinates in coordinates_strategy(),
        connections in connections_strategy(),
        num_required in 0..5usize,
        seed in any::<u64>(),
        policy in 0..4usize,
    ) {
        let network = build_network(&coordinates, &connections);
        let start = stop(&network, 0);
        let stops: Vec<StopIndex> = (1..=num_required).map(|idx| stop(&network, idx)).collect();
        let config = match policy {
            0 => TabuConfig::unbounded(),
            1 => TabuConfig::bounded_fifo(),
            2 => TabuConfig::aspiration(),
            _ => TabuConfig::sampled(0.5),
        }
        .with_iterations(8);
        let cost_config = CostConfig::default();
        let mut rng = fastrand::Rng::with_seed(seed);

        let result = tabu_search(
            &network,
            start,
            &stops,
            0,
            &SearchAlgorithm::Dijkstra,
            Criterion::Time,
            &cost_config,
            &config,
            &mut rng,
        );

        for pair in result.cost_history.windows(2) {
            prop_assert!(pair[1] <= pair[0]);
        }
        if let Some(&last) = result.cost_history.last() {
            prop_assert_eq!(last, result.best_cost);
        }

        let evaluation = calculate_route_cost(
            &network,
            0,
            start,
            &result.best_ordering,
            &SearchAlgorithm::Dijkstra,
            Criterion::Time,
            &cost_config,
        );
        prop_assert_eq!(evaluation.cost, result.best_cost);
        prop_assert_eq!(evaluation.is_feasible(), result.best_segments.is_some());
    }
}
