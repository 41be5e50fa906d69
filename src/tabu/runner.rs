//! Tabu search execution.
//!
//! # Algorithm
//!
//! 1. Shuffle the required stops into an initial visiting order
//! 2. At each iteration:
//!    a. Build the neighbourhood: all swaps, or a random sample of them
//!    b. Cost every candidate with the route cost oracle
//!    c. Drop tabu swaps, unless aspiration admits them
//!    d. Move to the cheapest survivor (the first one generated on ties) and make its swap tabu
//!    e. Update the best solution if it improved
//! 3. Stop after the iteration budget, or as soon as no admissible swap is left

use std::time::{Duration, Instant};

use fastrand::Rng;
use log::{debug, info};

use super::config::TabuConfig;
use super::memory::{SwapMove, TabuMemory};
use crate::config::{CostConfig, Criterion};
use crate::network::{Network, PathfindingCost, StopIndex, Timestamp};
use crate::route::{calculate_route_cost, RouteEvaluation, Segment};
use crate::search::PathFinder;

/// Result of a tabu search run.
#[derive(Debug, Clone)]
pub struct TabuResult<'a> {
    /// Cost of the best visiting order, infinite if no feasible order was found.
    pub best_cost: PathfindingCost,
    /// Best visiting order found (start stop excluded).
    pub best_ordering: Vec<StopIndex>,
    /// Route of the best visiting order, if it is feasible.
    pub best_segments: Option<Vec<Segment<'a>>>,
    /// Iterations completed.
    pub iterations: usize,
    /// Best cost after each completed iteration.
    pub cost_history: Vec<PathfindingCost>,
    pub elapsed: Duration,
}

/// Path finders the tabu search can drive. With the `parallel` feature candidates are costed on several
/// threads, so the finder must also be `Sync`.
#[cfg(feature = "parallel")]
pub trait RoutePathFinder: PathFinder + Sync {}

#[cfg(feature = "parallel")]
impl<T: PathFinder + Sync + ?Sized> RoutePathFinder for T {}

/// Path finders the tabu search can drive.
#[cfg(not(feature = "parallel"))]
pub trait RoutePathFinder: PathFinder {}

#[cfg(not(feature = "parallel"))]
impl<T: PathFinder + ?Sized> RoutePathFinder for T {}

struct Candidate<'a> {
    mv: SwapMove,
    ordering: Vec<StopIndex>,
    evaluation: RouteEvaluation<'a>,
}

/// Searches for the cheapest order in which to visit `stops`, starting and ending at `start_stop`.
///
/// All randomness (the initial shuffle and neighbourhood sampling) is drawn from `rng`, so a seeded generator
/// gives a reproducible run.
#[allow(clippy::too_many_arguments)]
pub fn tabu_search<'a, F: RoutePathFinder + ?Sized>(
    network: &'a Network,
    start_stop: StopIndex,
    stops: &[StopIndex],
    initial_time: Timestamp,
    finder: &F,
    criterion: Criterion,
    cost_config: &CostConfig,
    config: &TabuConfig,
    rng: &mut Rng,
) -> TabuResult<'a> {
    let run_start = Instant::now();
    let evaluate = |ordering: &[StopIndex]| {
        calculate_route_cost(network, initial_time, start_stop, ordering, finder, criterion, cost_config)
    };

    let mut current = stops.to_vec();
    rng.shuffle(&mut current);

    let initial = evaluate(&current);
    let mut best_cost = initial.cost;
    let mut best_segments = initial.segments;
    let mut best_ordering = current.clone();
    debug!("Initial visiting order costs {best_cost}.");

    let mut memory = TabuMemory::new(config.memory, stops.len());
    let all_moves = swap_moves(current.len());
    let sample_size = config.sample_size(all_moves.len());
    let mut cost_history = Vec::with_capacity(config.iterations);

    for iteration in 0..config.iterations {
        let mut moves = if sample_size < all_moves.len() {
            sample_moves(&all_moves, sample_size, rng)
        } else {
            all_moves.clone()
        };
        // Without aspiration a tabu swap can never be chosen, so don't bother costing it.
        if !config.aspiration {
            moves.retain(|mv| !memory.contains(mv));
        }

        let candidates = evaluate_moves(&current, &moves, &evaluate);
        let selected = select_candidate(candidates, &memory, config.aspiration, best_cost);

        let Some(Candidate { mv, ordering, evaluation }) = selected else {
            debug!("No admissible swap left after {iteration} iterations.");
            break;
        };

        current = ordering;
        memory.record(mv);

        if evaluation.cost < best_cost {
            debug!("Iteration {iteration}: best cost {best_cost} -> {}.", evaluation.cost);
            best_cost = evaluation.cost;
            best_ordering = current.clone();
            best_segments = evaluation.segments;
        }
        cost_history.push(best_cost);
    }

    let elapsed = run_start.elapsed();
    info!(
        "Tabu search over {} stops finished after {} iterations in {:?} with best cost {}.",
        stops.len(),
        cost_history.len(),
        elapsed,
        best_cost
    );

    TabuResult {
        best_cost,
        best_ordering,
        best_segments,
        iterations: cost_history.len(),
        cost_history,
        elapsed,
    }
}

// Cheapest admissible candidate, the first generated on ties. A tabu swap is admissible only through
// aspiration, and only if it beats `best_cost`.
fn select_candidate<'a>(
    candidates: Vec<Candidate<'a>>,
    memory: &TabuMemory,
    aspiration: bool,
    best_cost: PathfindingCost,
) -> Option<Candidate<'a>> {
    candidates
        .into_iter()
        .filter(|candidate| {
            !memory.contains(&candidate.mv) || (aspiration && candidate.evaluation.cost < best_cost)
        })
        .min_by(|a, b| a.evaluation.cost.total_cmp(&b.evaluation.cost))
}

// Every pair of positions, in generation order.
fn swap_moves(n: usize) -> Vec<SwapMove> {
    (0..n).flat_map(|i| ((i + 1)..n).map(move |j| (i, j))).collect()
}

fn sample_moves(all_moves: &[SwapMove], sample_size: usize, rng: &mut Rng) -> Vec<SwapMove> {
    let mut moves = all_moves.to_vec();
    rng.shuffle(&mut moves);
    moves.truncate(sample_size);
    moves
}

fn apply_move(current: &[StopIndex], (i, j): SwapMove) -> Vec<StopIndex> {
    let mut ordering = current.to_vec();
    ordering.swap(i, j);
    ordering
}

#[cfg(not(feature = "parallel"))]
fn evaluate_moves<'a, E>(current: &[StopIndex], moves: &[SwapMove], evaluate: &E) -> Vec<Candidate<'a>>
where
    E: Fn(&[StopIndex]) -> RouteEvaluation<'a>,
{
    moves
        .iter()
        .map(|&mv| {
            let ordering = apply_move(current, mv);
            let evaluation = evaluate(&ordering);
            Candidate { mv, ordering, evaluation }
        })
        .collect()
}

// Candidates are independent. Collecting keeps generation order, so selection is unchanged.
#[cfg(feature = "parallel")]
fn evaluate_moves<'a, E>(current: &[StopIndex], moves: &[SwapMove], evaluate: &E) -> Vec<Candidate<'a>>
where
    E: Fn(&[StopIndex]) -> RouteEvaluation<'a> + Sync,
{
    use rayon::prelude::*;

    moves
        .par_iter()
        .map(|&mv| {
            let ordering = apply_move(current, mv);
            let evaluation = evaluate(&ordering);
            Candidate { mv, ordering, evaluation }
        })
        .collect()
}
