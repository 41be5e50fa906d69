//! Builds a [`Network`] from a CSV file of timetable connections.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::{debug, info};
use serde::Deserialize;

use crate::network::{Coordinates, Network, NetworkBuilder};
use crate::utils::parse_time;

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("Failed to read the timetable: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse the timetable: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Deserialize)]
struct ConnectionRecord {
    line: String,
    departure_time: String,
    arrival_time: String,
    start_stop: String,
    end_stop: String,
    start_stop_lat: f64,
    start_stop_lon: f64,
    end_stop_lat: f64,
    end_stop_lon: f64,
}

pub fn load_network_from_path<P: AsRef<Path>>(path: P) -> Result<Network, LoadError> {
    let file = File::open(path.as_ref())?;
    info!("Loading timetable from {}", path.as_ref().display());
    load_network(file)
}

/// Reads connections from CSV with a header row. Rows that cannot be read are skipped.
pub fn load_network<R: Read>(reader: R) -> Result<Network, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut builder = NetworkBuilder::new();
    let mut num_skipped = 0;

    for (row, result) in reader.deserialize::<ConnectionRecord>().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(err) if err.is_io_error() => return Err(err.into()),
            Err(err) => {
                debug!("Skipping row {row}: {err}");
                num_skipped += 1;
                continue;
            }
        };

        let (departure_time, arrival_time) =
            match (parse_time(&record.departure_time), parse_time(&record.arrival_time)) {
                (Ok(departure_time), Ok(arrival_time)) => (departure_time, arrival_time),
                (Err(err), _) | (_, Err(err)) => {
                    debug!("Skipping row {row}: {err}");
                    num_skipped += 1;
                    continue;
                }
            };

        if let Err(err) = builder.add_connection(
            &record.line,
            &record.start_stop,
            departure_time,
            &record.end_stop,
            arrival_time,
        ) {
            debug!("Skipping row {row}: {err}");
            num_skipped += 1;
            continue;
        }

        builder.insert_stop_coordinates(
            &record.start_stop,
            Coordinates::new(record.start_stop_lat, record.start_stop_lon),
        );
        builder.insert_stop_coordinates(
            &record.end_stop,
            Coordinates::new(record.end_stop_lat, record.end_stop_lon),
        );
    }

    let network = builder.build();
    info!(
        "Loaded {} connections between {} stops on {} lines ({} rows skipped)",
        network.num_connections(),
        network.num_stops(),
        network.num_lines(),
        num_skipped
    );
    Ok(network)
}
