//! In-memory transit graph.
//!
//! A directed multigraph of stations connected by edges on lines. The store
//! is a plain container: it is populated once by the feed ingester and then
//! only read. Lookups never fail; a missing station or line is simply
//! absent from the result.

use std::collections::{BTreeMap, HashMap};

use crate::domain::{Edge, Line, LineId, Station, StationId};

/// Stations, lines and the adjacency list that connects them.
///
/// Stations and lines are keyed by id, so iteration follows id order.
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    stations: BTreeMap<StationId, Station>,
    lines: BTreeMap<LineId, Line>,
    /// Outgoing edges keyed by source station.
    adjacency: HashMap<StationId, Vec<Edge>>,
}

impl GraphStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a station, replacing any station with the same id.
    pub fn add_station(&mut self, station: Station) {
        self.stations.insert(station.id, station);
    }

    /// Insert a line, replacing any line with the same id.
    pub fn add_line(&mut self, line: Line) {
        self.lines.insert(line.id, line);
    }

    /// Append a directed edge to its source's adjacency list.
    pub fn add_edge(&mut self, edge: Edge) {
        self.adjacency.entry(edge.source).or_default().push(edge);
    }

    /// Append an edge and its reverse.
    ///
    /// Both directions carry the same line, distance and time.
    pub fn add_bidirectional(&mut self, edge: Edge) {
        self.add_edge(edge);
        self.add_edge(edge.reversed());
    }

    /// Look up a station by id.
    pub fn station(&self, id: StationId) -> Option<&Station> {
        self.stations.get(&id)
    }

    /// Look up a line by id.
    pub fn line(&self, id: LineId) -> Option<&Line> {
        self.lines.get(&id)
    }

    /// Stations whose name contains `query`, ignoring case.
    ///
    /// Matches are returned in store order, not ranked by relevance. An
    /// empty query matches every station.
    ///
    /// # Examples
    ///
    /// ```
    /// use metro_router::domain::Station;
    /// use metro_router::graph::GraphStore;
    ///
    /// let mut store = GraphStore::new();
    /// store.add_station(Station::new(1, "RCK", "Rajiv Chowk", 28.6328, 77.2197));
    ///
    /// assert_eq!(store.stations_by_name("raj").len(), 1);
    /// assert!(store.stations_by_name("kashmere").is_empty());
    /// ```
    pub fn stations_by_name(&self, query: &str) -> Vec<&Station> {
        let needle = query.to_lowercase();
        self.stations
            .values()
            .filter(|s| s.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Outgoing edges of a station, empty if it has none.
    pub fn neighbors(&self, id: StationId) -> &[Edge] {
        self.adjacency.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Ids of every station in the store.
    pub fn station_ids(&self) -> Vec<StationId> {
        self.stations.keys().copied().collect()
    }

    /// Iterate over all stations.
    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.stations.values()
    }

    /// Iterate over all lines.
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.values()
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Number of stations with at least one outgoing edge.
    pub fn connected_station_count(&self) -> usize {
        self.stations
            .keys()
            .filter(|id| !self.neighbors(**id).is_empty())
            .count()
    }

    /// Returns true if any station has an outgoing edge.
    pub fn has_connections(&self) -> bool {
        self.stations
            .keys()
            .any(|id| !self.neighbors(*id).is_empty())
    }

    /// Returns true if the store holds no stations.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Remove every station, line and edge.
    pub fn clear(&mut self) {
        self.stations.clear();
        self.lines.clear();
        self.adjacency.clear();
    }
}
