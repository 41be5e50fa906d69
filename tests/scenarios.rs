use chrono::TimeDelta;

use dev_utils::{
    get_example_cost_config, get_example_required_stops, get_example_scenario, grid_stop_name, GRID_COLUMNS,
    GRID_ROWS,
};
use transit_router::heuristic::DEFAULT_MAX_SPEED;
use transit_router::network::{StopIndex, Timestamp};
use transit_router::utils::parse_time;
use transit_router::{
    astar_changes_beam_query, astar_changes_query, astar_time_query, calculate_route_cost, dijkstra_query,
    tabu_search, Criterion, CostConfig, JourneyError, Network, NetworkBuilder, Schedule, SearchAlgorithm,
    TabuConfig,
};

fn t(time: &str) -> Timestamp {
    parse_time(time).unwrap()
}

fn idx(network: &Network, name: &str) -> StopIndex {
    network.get_stop_idx_from_name(name).unwrap()
}

fn two_hop_network(second_line: &str, second_departure: &str, second_arrival: &str) -> Network {
    let mut builder = NetworkBuilder::new();
    builder.add_connection("1", "A", t("08:00:00"), "B", t("08:10:00")).unwrap();
    builder.add_connection(second_line, "B", t(second_departure), "C", t(second_arrival)).unwrap();
    builder.build()
}

#[test]
fn dijkstra_rides_one_line() {
    let network = two_hop_network("1", "08:15:00", "08:25:00");
    let (a, c) = (idx(&network, "A"), idx(&network, "C"));

    let outcome = dijkstra_query(&network, a, c, t("08:00:00"), &CostConfig::default());
    assert_eq!(outcome.cost(), Some(1500.));

    let path = outcome.path().unwrap();
    let stops: Vec<(&str, &str)> = path
        .iter()
        .map(|connection| {
            (network.get_stop_name(connection.departure_stop), network.get_stop_name(connection.arrival_stop))
        })
        .collect();
    assert_eq!(stops, vec![("A", "B"), ("B", "C")]);
}

#[test]
fn changes_search_rejects_a_tight_change() {
    let network = two_hop_network("2", "08:10:00", "08:20:00");
    let (a, c) = (idx(&network, "A"), idx(&network, "C"));
    let config = CostConfig::default().with_min_change_time(TimeDelta::minutes(5));

    let outcome = astar_changes_query(&network, a, c, t("08:00:00"), &config);
    assert_eq!(outcome.journey.as_ref().unwrap_err(), &JourneyError::NoJourneyFound);
    assert_eq!(outcome.cost(), None);

    // Without a minimum change time the change is allowed.
    let outcome = astar_changes_query(&network, a, c, t("08:00:00"), &CostConfig::default());
    assert_eq!(outcome.cost(), Some(1.));
}

#[test]
fn searching_from_a_stop_to_itself_is_free() {
    let network = two_hop_network("1", "08:15:00", "08:25:00");
    let a = idx(&network, "A");
    for algorithm in [
        SearchAlgorithm::Dijkstra,
        SearchAlgorithm::AStarChanges,
        SearchAlgorithm::AStarChangesBeam { beam_width: 1 },
    ] {
        let outcome = algorithm.search(&network, a, a, t("08:00:00"), &CostConfig::default());
        assert_eq!(outcome.cost(), Some(0.), "{algorithm:?}");
        assert!(outcome.path().unwrap().is_empty());
    }
}

#[test]
fn empty_ordering_costs_nothing() {
    let network = two_hop_network("1", "08:15:00", "08:25:00");
    let a = idx(&network, "A");
    let evaluation = calculate_route_cost(
        &network,
        t("08:00:00"),
        a,
        &[],
        &SearchAlgorithm::Dijkstra,
        Criterion::Time,
        &CostConfig::default(),
    );
    assert_eq!(evaluation.cost, 0.);
    assert!(evaluation.is_feasible());
}

#[test]
fn time_searches_agree_on_the_grid() {
    let (network, start, start_time, end) = get_example_scenario();
    let config = CostConfig::default();

    let dijkstra = dijkstra_query(&network, start, end, start_time, &config);
    let astar = astar_time_query(&network, start, end, start_time, DEFAULT_MAX_SPEED, &config);
    assert!(dijkstra.is_found());
    assert_eq!(dijkstra.cost(), astar.cost());

    let journey = astar.journey.unwrap();
    assert!(journey.is_continuous());
    assert_eq!(journey.connections.first().unwrap().departure_stop, start);
    assert_eq!(journey.connections.last().unwrap().arrival_stop, end);
}

#[test]
fn the_grid_corner_to_corner_needs_one_change() {
    let (network, start, start_time, end) = get_example_scenario();
    let config = get_example_cost_config();

    let exact = astar_changes_query(&network, start, end, start_time, &config);
    assert_eq!(exact.cost(), Some(1.));
    assert_eq!(exact.journey.as_ref().unwrap().num_changes(), 1);

    let beam = astar_changes_beam_query(&network, start, end, start_time, 8, &config);
    if let Some(cost) = beam.cost() {
        assert!(cost >= 1.);
    }
}

#[test]
fn missing_coordinates_are_reported() {
    let network = two_hop_network("1", "08:15:00", "08:25:00");
    let (a, c) = (idx(&network, "A"), idx(&network, "C"));
    let outcome = astar_time_query(&network, a, c, t("08:00:00"), DEFAULT_MAX_SPEED, &CostConfig::default());
    assert_eq!(outcome.journey.unwrap_err(), JourneyError::MissingCoordinates { stop: String::from("A") });
}

#[test]
fn tabu_route_on_the_grid_is_consistent() {
    let (network, start, start_time, _) = get_example_scenario();
    let stops = get_example_required_stops(&network);
    let cost_config = get_example_cost_config();
    let algorithm = SearchAlgorithm::Dijkstra;
    let mut rng = fastrand::Rng::with_seed(3);

    let result = tabu_search(
        &network,
        start,
        &stops,
        start_time,
        &algorithm,
        Criterion::Time,
        &cost_config,
        &TabuConfig::aspiration().with_iterations(10),
        &mut rng,
    );
    assert!(result.best_cost.is_finite());

    let mut ordering = result.best_ordering.clone();
    ordering.sort_unstable();
    let mut expected = stops.clone();
    expected.sort_unstable();
    assert_eq!(ordering, expected);

    let segments = result.best_segments.as_ref().unwrap();
    assert_eq!(segments.len(), stops.len() + 1);
    assert_eq!(segments.first().unwrap().from, start);
    assert_eq!(segments.last().unwrap().to, start);

    let schedule =
        Schedule::from_segments(segments, &network, Criterion::Time, Some(start_time), &cost_config).unwrap();
    assert_eq!(schedule.total_cost(), result.best_cost);
}

#[test]
fn grid_names_resolve() {
    let network = dev_utils::build_example_network();
    assert_eq!(network.num_stops(), GRID_ROWS * GRID_COLUMNS);
    assert_eq!(network.num_lines(), GRID_ROWS + GRID_COLUMNS);
    assert!(network.get_stop_idx_from_name(&grid_stop_name(3, 4)).is_some());
}
