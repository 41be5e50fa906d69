//! Tabu search configuration.

/// How long a swap stays tabu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabuMemoryKind {
    /// Swaps never expire.
    Unbounded,
    /// The most recent `2 * required stops` swaps are tabu; older ones expire first-in first-out.
    BoundedFifo,
}

/// Configuration parameters for the tabu search.
///
/// # Examples
///
/// ```
/// use transit_router::tabu::{TabuConfig, TabuMemoryKind};
///
/// let config = TabuConfig::default()
///     .with_iterations(50)
///     .with_memory(TabuMemoryKind::BoundedFifo)
///     .with_aspiration(true);
/// assert_eq!(config.iterations, 50);
/// assert!(config.sample_ratio.is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TabuConfig {
    /// Maximum number of iterations.
    pub iterations: usize,
    /// Tabu memory policy.
    pub memory: TabuMemoryKind,
    /// Admit a tabu swap when it beats the best cost found so far.
    pub aspiration: bool,
    /// Evaluate only this fraction of all swaps per iteration (at least one). `None` evaluates them all.
    pub sample_ratio: Option<f64>,
}

impl Default for TabuConfig {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl TabuConfig {
    /// Full neighbourhood, swaps stay tabu forever.
    pub fn unbounded() -> Self {
        Self {
            iterations: 1000,
            memory: TabuMemoryKind::Unbounded,
            aspiration: false,
            sample_ratio: None,
        }
    }

    /// Full neighbourhood, the most recent swaps are tabu.
    pub fn bounded_fifo() -> Self {
        Self { memory: TabuMemoryKind::BoundedFifo, ..Self::unbounded() }
    }

    /// Full neighbourhood, swaps stay tabu forever unless they yield a new best.
    pub fn aspiration() -> Self {
        Self { aspiration: true, ..Self::unbounded() }
    }

    /// A random fraction of the neighbourhood per iteration, with aspiration.
    pub fn sampled(sample_ratio: f64) -> Self {
        Self { aspiration: true, sample_ratio: Some(sample_ratio), ..Self::unbounded() }
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_memory(mut self, memory: TabuMemoryKind) -> Self {
        self.memory = memory;
        self
    }

    pub fn with_aspiration(mut self, aspiration: bool) -> Self {
        self.aspiration = aspiration;
        self
    }

    pub fn with_sample_ratio(mut self, sample_ratio: Option<f64>) -> Self {
        self.sample_ratio = sample_ratio;
        self
    }

    // Number of swaps drawn per iteration out of `num_moves`.
    pub(crate) fn sample_size(&self, num_moves: usize) -> usize {
        match self.sample_ratio {
            _ if num_moves == 0 => 0,
            Some(ratio) => ((num_moves as f64 * ratio) as usize).clamp(1, num_moves),
            None => num_moves,
        }
    }
}
