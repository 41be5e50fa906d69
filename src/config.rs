//! Cost weights and optimisation criteria shared by every search.

use std::fmt::Display;
use std::str::FromStr;

use chrono::TimeDelta;

use crate::network::{PathfindingCost, Timestamp};

/// The optimisation objective of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Criterion {
    /// Minimise total travel time (waiting included).
    Time,
    /// Minimise the number of line changes.
    Changes,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CriterionError {
    #[error("Unknown criterion \"{0}\" (expected \"time\"/\"t\" or \"change\"/\"c\").")]
    Invalid(String),
}

impl FromStr for Criterion {
    type Err = CriterionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "time" | "t" => Ok(Criterion::Time),
            "change" | "changes" | "c" => Ok(Criterion::Changes),
            _ => Err(CriterionError::Invalid(s.to_owned())),
        }
    }
}

impl Display for Criterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Criterion::Time => write!(f, "time"),
            Criterion::Changes => write!(f, "change"),
        }
    }
}

/// Cost weights and transfer constraints.
///
/// # Examples
///
/// ```
/// use chrono::TimeDelta;
/// use transit_router::CostConfig;
///
/// let config = CostConfig::default().with_min_change_time(TimeDelta::minutes(5));
/// assert_eq!(config.min_change_secs(), 300);
/// assert_eq!(config.time_cost_per_sec, 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CostConfig {
    /// Cost of one second of travel or waiting.
    pub time_cost_per_sec: PathfindingCost,
    /// Cost of one line change.
    pub change_cost_per_change: PathfindingCost,
    /// Minimum wait required when switching lines at a stop.
    pub min_change_time: TimeDelta,
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            time_cost_per_sec: 1.0,
            change_cost_per_change: 1.0,
            min_change_time: TimeDelta::zero(),
        }
    }
}

impl CostConfig {
    pub fn with_time_cost_per_sec(mut self, cost: PathfindingCost) -> Self {
        self.time_cost_per_sec = cost;
        self
    }

    pub fn with_change_cost_per_change(mut self, cost: PathfindingCost) -> Self {
        self.change_cost_per_change = cost;
        self
    }

    pub fn with_min_change_time(mut self, min_change_time: TimeDelta) -> Self {
        self.min_change_time = min_change_time;
        self
    }

    /// The minimum change time in whole seconds. Negative durations count as zero.
    pub fn min_change_secs(&self) -> Timestamp {
        self.min_change_time
            .num_seconds()
            .clamp(0, Timestamp::MAX as i64) as Timestamp
    }
}
