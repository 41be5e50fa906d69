use chrono::TimeDelta;
use fastrand::Rng;
use transit_router::network::{StopIndex, Timestamp};
use transit_router::{utils, Coordinates, CostConfig, Network, NetworkBuilder};

// Common example data for the demos, benchmarks and integration tests: a synthetic grid city.
// Each row and each column of the grid is served by one line running in both directions.

pub const GRID_ROWS: usize = 8;
pub const GRID_COLUMNS: usize = 8;

const ORIGIN: Coordinates = Coordinates::new(51.10, 17.00);
const LATITUDE_STEP: f64 = 0.005;
const LONGITUDE_STEP: f64 = 0.008;
const SERVICE_START: Timestamp = 6 * 3600;
const SERVICE_END: Timestamp = 14 * 3600;
const HEADWAY: Timestamp = 10 * 60;
const SEED: u64 = 2024;

pub fn grid_stop_name(row: usize, column: usize) -> String {
    format!("R{row}C{column}")
}

fn grid_coordinates(row: usize, column: usize) -> Coordinates {
    Coordinates::new(
        ORIGIN.latitude + row as f64 * LATITUDE_STEP,
        ORIGIN.longitude + column as f64 * LONGITUDE_STEP,
    )
}

// Adds trips every `HEADWAY` seconds along `stops` in both directions.
// Vehicles run at 5 to 10 m/s, so no trip is faster than 10 m/s.
fn add_line(builder: &mut NetworkBuilder, rng: &mut Rng, line: &str, stops: &[(usize, usize)]) {
    for direction in [stops.to_vec(), stops.iter().rev().copied().collect()] {
        let travel_times: Vec<Timestamp> = direction
            .windows(2)
            .map(|pair| {
                let (from, to) = (grid_coordinates(pair[0].0, pair[0].1), grid_coordinates(pair[1].0, pair[1].1));
                let distance = from.distance_to(&to);
                let speed = 5.0 + 5.0 * rng.f64();
                (distance / speed).ceil() as Timestamp
            })
            .collect();

        let offset = rng.u32(0..HEADWAY);
        let mut trip_start = SERVICE_START + offset;
        while trip_start < SERVICE_END {
            let mut time = trip_start;
            for (pair, travel_time) in direction.windows(2).zip(&travel_times) {
                let from = grid_stop_name(pair[0].0, pair[0].1);
                let to = grid_stop_name(pair[1].0, pair[1].1);
                builder.add_connection(line, &from, time, &to, time + travel_time).unwrap();
                time += travel_time;
            }
            trip_start += HEADWAY;
        }
    }
}

pub fn build_example_network() -> Network {
    let mut rng = Rng::with_seed(SEED);
    let mut builder = NetworkBuilder::new();

    for row in 0..GRID_ROWS {
        for column in 0..GRID_COLUMNS {
            builder.set_stop_coordinates(&grid_stop_name(row, column), grid_coordinates(row, column));
        }
    }

    for row in 0..GRID_ROWS {
        let stops: Vec<(usize, usize)> = (0..GRID_COLUMNS).map(|column| (row, column)).collect();
        add_line(&mut builder, &mut rng, &format!("Row {row}"), &stops);
    }
    for column in 0..GRID_COLUMNS {
        let stops: Vec<(usize, usize)> = (0..GRID_ROWS).map(|row| (row, column)).collect();
        add_line(&mut builder, &mut rng, &format!("Column {column}"), &stops);
    }

    builder.build()
}

pub fn get_example_cost_config() -> CostConfig {
    CostConfig::default().with_min_change_time(TimeDelta::minutes(2))
}

pub fn get_example_start_time() -> Timestamp {
    utils::parse_time("07:00:00").unwrap()
}

pub fn get_example_start_stop_idx(network: &Network) -> StopIndex {
    network.get_stop_idx_from_name(&grid_stop_name(0, 0)).unwrap()
}

pub fn get_example_end_stop_idx(network: &Network) -> StopIndex {
    network.get_stop_idx_from_name(&grid_stop_name(GRID_ROWS - 1, GRID_COLUMNS - 1)).unwrap()
}

pub fn get_example_required_stops(network: &Network) -> Vec<StopIndex> {
    [(2, 5), (7, 1), (4, 4), (6, 7), (1, 3)]
        .iter()
        .map(|&(row, column)| network.get_stop_idx_from_name(&grid_stop_name(row, column)).unwrap())
        .collect()
}

pub fn get_example_scenario() -> (Network, StopIndex, Timestamp, StopIndex) {
    let network = build_example_network();
    let start = get_example_start_stop_idx(&network);
    let start_time = get_example_start_time();
    let end = get_example_end_stop_idx(&network);
    (network, start, start_time, end)
}
