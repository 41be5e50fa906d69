use std::fmt::Display;

use crate::network::{Connection, LineIndex, PathfindingCost, StopIndex, Timestamp};
use crate::{utils, Network};

// A run of consecutive connections on one line, from boarding to alighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leg {
    pub boarded_stop: StopIndex,
    pub boarded_time: Timestamp,
    pub arrival_stop: StopIndex,
    pub arrival_time: Timestamp,
    pub line: LineIndex,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum JourneyError {
    #[error("No journey found.")]
    NoJourneyFound,
    #[error("No coordinates for stop \"{stop}\".")]
    MissingCoordinates { stop: String },
}

pub type JourneyResult<'a> = Result<Journey<'a>, JourneyError>;

#[derive(Debug, Clone)]
pub struct Journey<'a> {
    pub connections: Vec<&'a Connection>,
    pub cost: PathfindingCost,
    pub network: &'a Network,
}

impl<'a> Journey<'a> {
    pub fn empty(network: &'a Network) -> Self {
        Self { connections: Vec::new(), cost: 0., network }
    }

    pub(crate) fn from(connections: Vec<&'a Connection>, cost: PathfindingCost, network: &'a Network) -> Self {
        Self { connections, cost, network }
    }

    pub fn departure_time(&self) -> Option<Timestamp> {
        self.connections.first().map(|connection| connection.departure_time)
    }

    pub fn arrival_time(&self) -> Option<Timestamp> {
        self.connections.last().map(|connection| connection.arrival_time)
    }

    // Time on board from first departure to last arrival (initial wait excluded).
    pub fn duration(&self) -> Timestamp {
        match (self.departure_time(), self.arrival_time()) {
            (Some(departure), Some(arrival)) => arrival - departure,
            _ => 0,
        }
    }

    pub fn num_changes(&self) -> usize {
        self.connections.windows(2).filter(|pair| pair[0].line != pair[1].line).count()
    }

    pub fn legs(&self) -> Vec<Leg> {
        let mut legs: Vec<Leg> = Vec::new();
        for connection in &self.connections {
            match legs.last_mut() {
                Some(leg) if leg.line == connection.line && leg.arrival_stop == connection.departure_stop => {
                    leg.arrival_stop = connection.arrival_stop;
                    leg.arrival_time = connection.arrival_time;
                }
                _ => legs.push(Leg {
                    boarded_stop: connection.departure_stop,
                    boarded_time: connection.departure_time,
                    arrival_stop: connection.arrival_stop,
                    arrival_time: connection.arrival_time,
                    line: connection.line,
                }),
            }
        }
        legs
    }

    // Each connection departs where and after the previous one arrived.
    pub fn is_continuous(&self) -> bool {
        self.connections.windows(2).all(|pair| {
            pair[0].arrival_stop == pair[1].departure_stop && pair[1].departure_time >= pair[0].arrival_time
        })
    }
}

impl Display for Journey<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "-----------------------------------------------")?;
        if !self.connections.is_empty() {
            for leg in self.legs() {
                writeln!(f)?;
                writeln!(f,
                         "Board at {} at {} ({} line).",
                         self.network.get_stop_name(leg.boarded_stop),
                         utils::get_time_str(leg.boarded_time),
                         self.network.get_line_name(leg.line),
                )?;
                writeln!(f,
                         "Arrive at {} at {}.",
                         self.network.get_stop_name(leg.arrival_stop),
                         utils::get_time_str(leg.arrival_time)
                )?;
            }
            writeln!(f)?;
            writeln!(f, "Total journey time: {} minutes.", self.duration() / 60)?;
            writeln!(f, "Cost: {}.", self.cost)?;
        } else {
            writeln!(f)?;
            writeln!(f, "Empty journey.")?;
        }
        writeln!(f, "-----------------------------------------------")?;
        Ok(())
    }
}
