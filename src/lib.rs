pub mod network;

pub use network::{Connection, Coordinates, Network, NetworkBuilder, NetworkError};

pub mod config;

pub use config::{CostConfig, Criterion};

pub mod heuristic;

pub mod search;

pub use search::{PathFinder, SearchAlgorithm, SearchOutcome};

pub mod dijkstra;

pub use dijkstra::dijkstra_query;

pub mod astar;

pub use astar::{astar_changes_beam_query, astar_changes_query, astar_time_query};

pub mod journey;

pub use journey::{Journey, JourneyError, Leg};

pub mod route;

pub use route::{calculate_route_cost, RouteEvaluation, Segment};

pub mod tabu;

pub use tabu::{tabu_search, TabuConfig, TabuResult};

pub mod schedule;

pub use schedule::Schedule;

pub mod loader;

pub use loader::{load_network, load_network_from_path};

pub mod utils;
