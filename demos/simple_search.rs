use transit_router::{Criterion, SearchAlgorithm};
use transit_router::heuristic::DEFAULT_MAX_SPEED;

use dev_utils::{get_example_cost_config, get_example_scenario};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (network, start, start_time, end) = get_example_scenario();
    let config = get_example_cost_config();
    network.print_stats();

    for algorithm in [
        SearchAlgorithm::Dijkstra,
        SearchAlgorithm::AStarTime { max_speed: DEFAULT_MAX_SPEED },
        SearchAlgorithm::for_criterion(Criterion::Changes),
        SearchAlgorithm::AStarChangesBeam { beam_width: 16 },
    ] {
        let outcome = algorithm.search(&network, start, end, start_time, &config);
        println!("{algorithm:?} took {:?}", outcome.elapsed);
        match outcome.journey {
            Ok(journey) => println!("{journey}"),
            Err(e) => println!("{e}"),
        }
    }

    Ok(())
}
