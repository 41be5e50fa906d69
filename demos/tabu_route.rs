use transit_router::{tabu_search, Schedule, SearchAlgorithm, TabuConfig};

use dev_utils::{get_example_cost_config, get_example_required_stops, get_example_scenario};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (network, start, start_time, _) = get_example_scenario();
    let stops = get_example_required_stops(&network);
    let cost_config = get_example_cost_config();
    network.print_stats();

    let algorithm = SearchAlgorithm::Dijkstra;
    let config = TabuConfig::aspiration().with_iterations(50);
    let mut rng = fastrand::Rng::with_seed(42);

    let result = tabu_search(
        &network,
        start,
        &stops,
        start_time,
        &algorithm,
        algorithm.criterion(),
        &cost_config,
        &config,
        &mut rng,
    );

    let ordering: Vec<&str> = result.best_ordering.iter().map(|&stop| network.get_stop_name(stop)).collect();
    println!("Best order: {} -> {} -> {}", network.get_stop_name(start), ordering.join(" -> "), network.get_stop_name(start));
    println!("Best cost: {} after {} iterations in {:?}", result.best_cost, result.iterations, result.elapsed);

    if let Some(segments) = &result.best_segments {
        let schedule = Schedule::from_segments(segments, &network, algorithm.criterion(), Some(start_time), &cost_config)?;
        println!();
        print!("{schedule}");
    } else {
        println!("No feasible route found.");
    }

    Ok(())
}
