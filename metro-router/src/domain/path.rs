//! Route query results.

use serde::{Deserialize, Serialize};

use super::{LineId, StationId};

/// An annotated route through the network.
///
/// `line_ids[i]` is the line used between `station_ids[i]` and
/// `station_ids[i + 1]`, so a non-empty path always has exactly one fewer
/// line than stations.
///
/// A path with no stations is the sentinel for "no route": unknown
/// stations, unreachable targets and queries against an uninitialized
/// network all produce it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub station_ids: Vec<StationId>,
    pub line_ids: Vec<LineId>,
    pub total_distance_km: f64,
    pub total_time_mins: f64,
    pub interchange_count: usize,
}

impl Path {
    /// The "no route" sentinel.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A zero-length route that starts and ends at `station`.
    pub fn at(station: StationId) -> Self {
        Self {
            station_ids: vec![station],
            ..Self::default()
        }
    }

    /// Returns true for the "no route" sentinel.
    pub fn is_empty(&self) -> bool {
        self.station_ids.is_empty()
    }

    /// First station of the route.
    pub fn origin(&self) -> Option<StationId> {
        self.station_ids.first().copied()
    }

    /// Last station of the route.
    pub fn destination(&self) -> Option<StationId> {
        self.station_ids.last().copied()
    }

    /// Number of station-to-station hops.
    pub fn hop_count(&self) -> usize {
        self.line_ids.len()
    }

    /// Iterate over `(from, to, line)` for each hop.
    pub fn hops(&self) -> impl Iterator<Item = (StationId, StationId, LineId)> + '_ {
        self.station_ids
            .windows(2)
            .zip(&self.line_ids)
            .map(|(pair, &line)| (pair[0], pair[1], line))
    }
}
