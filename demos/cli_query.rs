use std::io::{stdout, Write};

use transit_router::{load_network_from_path, tabu_search, utils, Criterion, Network, Schedule, SearchAlgorithm, TabuConfig};
use transit_router::network::StopIndex;

use dev_utils::get_example_cost_config;

fn prompt(message: &str) -> Result<String, std::io::Error> {
    print!("{message}");
    stdout().flush()?;
    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_owned())
}

pub fn get_stop_from_user(network: &Network, prompt_str: &str) -> Result<StopIndex, std::io::Error> {
    loop {
        let stop_name = prompt(&format!("Where are you {prompt_str}? "))?;
        if let Some(stop) = network.get_stop_idx_from_name(&stop_name) {
            return Ok(stop);
        }
        println!("Stop not found. Please try again.");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args().nth(1).unwrap_or_else(|| String::from("connection_graph.csv"));
    let network = load_network_from_path(&path)?;
    network.print_stats();
    println!();

    let criterion = loop {
        match prompt("Optimise for time or changes? (t/c): ")?.parse::<Criterion>() {
            Ok(criterion) => break criterion,
            Err(e) => println!("{e} Please try again."),
        }
    };

    let start = get_stop_from_user(&network, "starting")?;
    let start_time = loop {
        // Append seconds so it can be parsed.
        let time_str = prompt("What time are you starting? (HH:MM): ")? + ":00";
        match utils::parse_time(&time_str) {
            Ok(time) => break time,
            Err(e) => println!("{e} Please try again."),
        }
    };

    let stops_str = prompt("Which stops do you want to visit? (separated by ';', leave empty for a single trip): ")?;
    let config = get_example_cost_config();
    let algorithm = SearchAlgorithm::for_criterion(criterion);
    println!();

    if stops_str.is_empty() {
        let end = get_stop_from_user(&network, "going")?;
        let outcome = algorithm.search(&network, start, end, start_time, &config);
        println!("Query took {:?}", outcome.elapsed);
        match outcome.journey {
            Ok(journey) => {
                println!("{journey}");
                let schedule = Schedule::new(&journey.connections, &network, criterion, Some(start_time), &config)?;
                print!("{schedule}");
            }
            Err(e) => println!("{e}"),
        }
        return Ok(());
    }

    let stops = stops_str
        .split(';')
        .map(|name| network.require_stop(name.trim()))
        .collect::<Result<Vec<_>, _>>()?;
    let mut rng = fastrand::Rng::new();
    let result = tabu_search(
        &network,
        start,
        &stops,
        start_time,
        &algorithm,
        criterion,
        &config,
        &TabuConfig::aspiration().with_iterations(100),
        &mut rng,
    );
    println!("Search took {:?}", result.elapsed);
    match &result.best_segments {
        Some(segments) => {
            let schedule = Schedule::from_segments(segments, &network, criterion, Some(start_time), &config)?;
            print!("{schedule}");
        }
        None => println!("No feasible route found."),
    }

    Ok(())
}
