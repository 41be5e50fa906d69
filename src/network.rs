use std::borrow::Cow;
use std::collections::HashMap;

pub type Timestamp = u32;
pub type StopIndex = u32;
pub type LineIndex = u32;
pub type PathfindingCost = f64;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

// One scheduled vehicle trip segment between two stops on one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Connection {
    pub line: LineIndex,
    pub departure_stop: StopIndex,
    pub departure_time: Timestamp,
    pub arrival_stop: StopIndex,
    pub arrival_time: Timestamp,
}

impl Connection {
    pub fn travel_time(&self) -> Timestamp {
        self.arrival_time - self.departure_time
    }
}

#[derive(Debug)]
pub struct Stop {
    pub name: Box<str>,
    pub coordinates: Option<Coordinates>,
    pub connections_idx: usize,
    pub num_connections: usize,
}

impl Stop {
    pub fn new(name: Box<str>, coordinates: Option<Coordinates>) -> Self {
        Self {
            name,
            coordinates,
            connections_idx: 0,
            num_connections: 0,
        }
    }

    pub fn get_connections<'a>(&self, connections: &'a [Connection]) -> &'a [Connection] {
        &connections[self.connections_idx..(self.connections_idx + self.num_connections)]
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    #[error("Connection from {departure_stop} to {arrival_stop} arrives ({arrival_time}) before it departs ({departure_time}).")]
    ArrivalBeforeDeparture {
        departure_stop: String,
        arrival_stop: String,
        departure_time: Timestamp,
        arrival_time: Timestamp,
    },
    #[error("Stop \"{0}\" is not in the network.")]
    UnknownStop(String),
}

/// A time-expanded timetable graph.
///
/// Connections are stored in a single flat array grouped by departure stop, and each [`Stop`] points at
/// its slice of outgoing connections. Within a slice connections keep the order they were added in, so
/// searches must filter by departure time themselves rather than relying on the order.
#[derive(Debug)]
pub struct Network {
    pub stops: Vec<Stop>,
    pub stop_index: HashMap<Box<str>, StopIndex>,
    pub lines: Vec<Box<str>>,
    pub connections: Vec<Connection>,
}

impl Network {
    pub fn get_stop(&self, stop: StopIndex) -> &Stop {
        &self.stops[stop as usize]
    }

    pub fn get_stop_idx_from_name(&self, name: &str) -> Option<StopIndex> {
        self.stop_index.get(name).copied()
    }

    pub fn require_stop(&self, name: &str) -> Result<StopIndex, NetworkError> {
        self.get_stop_idx_from_name(name)
            .ok_or_else(|| NetworkError::UnknownStop(name.to_owned()))
    }

    pub fn contains_stop(&self, stop: StopIndex) -> bool {
        (stop as usize) < self.stops.len()
    }

    pub fn get_stop_name(&self, stop: StopIndex) -> &str {
        &self.stops[stop as usize].name
    }

    // Name for log messages. Unknown stops print as their index.
    pub fn stop_label(&self, stop: StopIndex) -> Cow<'_, str> {
        match self.stops.get(stop as usize) {
            Some(stop) => Cow::Borrowed(&*stop.name),
            None => Cow::Owned(format!("#{stop}")),
        }
    }

    pub fn get_line_name(&self, line: LineIndex) -> &str {
        &self.lines[line as usize]
    }

    pub fn get_coordinates(&self, stop: StopIndex) -> Option<Coordinates> {
        self.stops.get(stop as usize).and_then(|stop| stop.coordinates)
    }

    pub fn get_connections(&self, stop: StopIndex) -> &[Connection] {
        self.stops[stop as usize].get_connections(&self.connections)
    }

    pub fn num_stops(&self) -> usize { self.stops.len() }

    pub fn num_lines(&self) -> usize { self.lines.len() }

    pub fn num_connections(&self) -> usize { self.connections.len() }

    pub fn print_stats(&self) {
        let num_with_coordinates = self.stops.iter().filter(|stop| stop.coordinates.is_some()).count();
        println!(
            "Network has {} stops ({} with coordinates), {} lines, and {} connections.",
            self.num_stops(),
            num_with_coordinates,
            self.num_lines(),
            self.num_connections()
        );
    }
}

/// Incrementally interns stops and lines, then lays connections out by departure stop.
#[derive(Default)]
pub struct NetworkBuilder {
    stops: Vec<(Box<str>, Option<Coordinates>)>,
    stop_index: HashMap<Box<str>, StopIndex>,
    lines: Vec<Box<str>>,
    line_index: HashMap<Box<str>, LineIndex>,
    connections: Vec<Connection>,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_stop(&mut self, name: &str) -> StopIndex {
        if let Some(&stop) = self.stop_index.get(name) {
            return stop;
        }
        let stop = self.stops.len() as StopIndex;
        self.stops.push((Box::from(name), None));
        self.stop_index.insert(Box::from(name), stop);
        stop
    }

    pub fn add_line(&mut self, name: &str) -> LineIndex {
        if let Some(&line) = self.line_index.get(name) {
            return line;
        }
        let line = self.lines.len() as LineIndex;
        self.lines.push(Box::from(name));
        self.line_index.insert(Box::from(name), line);
        line
    }

    // Overwrites any coordinates already recorded for the stop.
    pub fn set_stop_coordinates(&mut self, name: &str, coordinates: Coordinates) -> StopIndex {
        let stop = self.add_stop(name);
        self.stops[stop as usize].1 = Some(coordinates);
        stop
    }

    // Records coordinates only if the stop has none yet. Returns true if they were recorded.
    pub fn insert_stop_coordinates(&mut self, name: &str, coordinates: Coordinates) -> bool {
        let stop = self.add_stop(name);
        let slot = &mut self.stops[stop as usize].1;
        if slot.is_some() {
            return false;
        }
        *slot = Some(coordinates);
        true
    }

    pub fn add_connection(
        &mut self,
        line: &str,
        departure_stop: &str,
        departure_time: Timestamp,
        arrival_stop: &str,
        arrival_time: Timestamp,
    ) -> Result<Connection, NetworkError> {
        if arrival_time < departure_time {
            return Err(NetworkError::ArrivalBeforeDeparture {
                departure_stop: departure_stop.to_owned(),
                arrival_stop: arrival_stop.to_owned(),
                departure_time,
                arrival_time,
            });
        }

        let connection = Connection {
            line: self.add_line(line),
            departure_stop: self.add_stop(departure_stop),
            departure_time,
            arrival_stop: self.add_stop(arrival_stop),
            arrival_time,
        };
        self.connections.push(connection);
        Ok(connection)
    }

    pub fn build(self) -> Network {
        let mut connections = self.connections;
        // Stable, so connections from one stop keep their insertion order.
        connections.sort_by_key(|connection| connection.departure_stop);

        let mut stops: Vec<Stop> = self
            .stops
            .into_iter()
            .map(|(name, coordinates)| Stop::new(name, coordinates))
            .collect();

        // Index the connections for a given stop.
        let mut connections_idx = 0;
        for (stop_idx, stop) in stops.iter_mut().enumerate() {
            stop.connections_idx = connections_idx;
            while connections_idx < connections.len()
                && connections[connections_idx].departure_stop as usize == stop_idx
            {
                connections_idx += 1;
            }
            stop.num_connections = connections_idx - stop.connections_idx;
        }
        debug_assert_eq!(connections_idx, connections.len());

        Network {
            stops,
            stop_index: self.stop_index,
            lines: self.lines,
            connections,
        }
    }
}
