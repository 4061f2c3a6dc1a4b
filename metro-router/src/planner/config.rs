//! Route search configuration.

use chrono::Duration;

use crate::feed::minutes_to_duration;

/// Configuration parameters for route search.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteConfig {
    /// Cost of changing to a line of a different colour (minutes).
    /// Only applied when optimizing for time.
    pub interchange_penalty_mins: f64,
}

impl RouteConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(interchange_penalty_mins: f64) -> Self {
        Self {
            interchange_penalty_mins,
        }
    }

    /// Returns the interchange penalty as a Duration.
    pub fn interchange_penalty(&self) -> Duration {
        minutes_to_duration(self.interchange_penalty_mins)
    }
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            interchange_penalty_mins: 8.0,
        }
    }
}
