//! Directed edges between stations.

use serde::{Deserialize, Serialize};

use super::{LineId, StationId};

/// A directed arc from one station to another on a given line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: StationId,
    pub target: StationId,
    pub line: LineId,
    /// Distance in kilometres.
    pub distance_km: f64,
    /// Travel time in minutes.
    pub time_mins: f64,
}

impl Edge {
    /// Create a new edge.
    pub fn new(
        source: impl Into<StationId>,
        target: impl Into<StationId>,
        line: impl Into<LineId>,
        distance_km: f64,
        time_mins: f64,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            line: line.into(),
            distance_km,
            time_mins,
        }
    }

    /// The same edge travelled in the opposite direction.
    pub fn reversed(&self) -> Self {
        Self {
            source: self.target,
            target: self.source,
            ..*self
        }
    }
}
