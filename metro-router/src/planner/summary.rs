//! Human-readable route descriptions.

use serde::Serialize;

use crate::domain::{LineId, Path, StationId};
use crate::graph::GraphStore;

use super::interchange::interchange_positions;

/// A [`Path`] with ids resolved to names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSummary {
    /// Station names along the route, origin first.
    pub stations: Vec<String>,

    /// Line name for each hop.
    pub lines: Vec<String>,

    /// Stations at which the route changes to a line of another colour.
    pub interchanges: Vec<String>,

    pub distance_km: f64,
    pub time_mins: f64,
    pub interchange_count: usize,
}

impl RouteSummary {
    /// Describe `path` using the names in `graph`.
    ///
    /// Unknown stations and lines are shown by id.
    pub fn describe(graph: &GraphStore, path: &Path) -> Self {
        let stations = path
            .station_ids
            .iter()
            .map(|&id| station_name(graph, id))
            .collect();
        let lines = path
            .line_ids
            .iter()
            .map(|&id| line_name(graph, id))
            .collect();
        let interchanges = interchange_positions(graph, &path.line_ids)
            .into_iter()
            .filter_map(|i| path.station_ids.get(i))
            .map(|&id| station_name(graph, id))
            .collect();

        Self {
            stations,
            lines,
            interchanges,
            distance_km: path.total_distance_km,
            time_mins: path.total_time_mins,
            interchange_count: path.interchange_count,
        }
    }
}

fn station_name(graph: &GraphStore, id: StationId) -> String {
    graph
        .station(id)
        .map(|s| s.name.clone())
        .unwrap_or_else(|| id.to_string())
}

fn line_name(graph: &GraphStore, id: LineId) -> String {
    graph
        .line(id)
        .map(|l| l.name.clone())
        .unwrap_or_else(|| id.to_string())
}
