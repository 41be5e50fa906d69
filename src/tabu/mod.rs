//! Tabu search over the order in which a set of stops is visited.
//!
//! A solution is a permutation of the required stops. The route starts and ends at a fixed stop and is costed by
//! [`calculate_route_cost`](crate::route::calculate_route_cost). The neighbourhood of a permutation is every swap
//! of two positions, or a random sample of those swaps. Each iteration moves to the cheapest admissible neighbour,
//! even when it is worse than the current solution, and records the swap in the tabu memory. Recorded swaps
//! cannot be selected again unless aspiration is enabled and they beat the best cost found so far.
//!
//! # Reference
//!
//! Glover, F. (1989). "Tabu Search - Part I", *ORSA Journal on Computing* 1(3), 190-206.

mod config;
mod memory;
mod runner;

pub use config::{TabuConfig, TabuMemoryKind};
pub use memory::{SwapMove, TabuMemory};
pub use runner::{tabu_search, RoutePathFinder, TabuResult};
