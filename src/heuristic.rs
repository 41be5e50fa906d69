use crate::network::{Coordinates, Network, PathfindingCost, StopIndex};

pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

// Assumed upper bound on vehicle speed, in metres per second.
pub const DEFAULT_MAX_SPEED: f64 = 15.0;

/// Great-circle distance in metres between two points given in degrees.
pub fn haversine(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_phi = (lat2 - lat1).to_radians();
    let delta_lambda = (lon2 - lon1).to_radians();

    let a = (delta_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_M * c
}

impl Coordinates {
    pub fn distance_to(&self, other: &Coordinates) -> f64 {
        haversine(self.latitude, self.longitude, other.latitude, other.longitude)
    }
}

/// Lower bound on the remaining travel cost to a fixed destination.
///
/// The estimate is the straight-line distance covered at `max_speed`, so it is admissible only while no
/// vehicle in the network is faster than `max_speed`. Stops without coordinates estimate zero.
pub struct GeoHeuristic<'a> {
    network: &'a Network,
    destination: Coordinates,
    max_speed: f64,
    time_cost_per_sec: PathfindingCost,
}

impl<'a> GeoHeuristic<'a> {
    pub fn new(network: &'a Network, destination: Coordinates, max_speed: f64, time_cost_per_sec: PathfindingCost) -> Self {
        Self { network, destination, max_speed, time_cost_per_sec }
    }

    pub fn estimate(&self, stop: StopIndex) -> PathfindingCost {
        match self.network.get_coordinates(stop) {
            Some(coordinates) => coordinates.distance_to(&self.destination) / self.max_speed * self.time_cost_per_sec,
            None => 0.0,
        }
    }
}
