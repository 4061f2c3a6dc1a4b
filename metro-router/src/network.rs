//! Owned network context.
//!
//! [`TransitNetwork`] holds at most one ingested graph together with the
//! configuration used to build and query it. Every query is answered against
//! whatever graph is currently loaded; before the first successful
//! initialization, and after [`release`](TransitNetwork::release), queries
//! return [`Path::empty`].

use tracing::{info, warn};

use crate::domain::{Path, StationId};
use crate::feed::{FeedIngester, FeedTables, IngestConfig, IngestError, IngestReport};
use crate::graph::GraphStore;
use crate::planner::{NameMatch, PathFinder, RouteConfig, RouteSummary};

/// A metro network that can be loaded from a feed and queried for routes.
#[derive(Debug, Clone, Default)]
pub struct TransitNetwork {
    graph: Option<GraphStore>,
    ingest: IngestConfig,
    route: RouteConfig,
}

impl TransitNetwork {
    /// Create an uninitialized network with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an uninitialized network with the given configuration.
    pub fn with_config(ingest: IngestConfig, route: RouteConfig) -> Self {
        Self {
            graph: None,
            ingest,
            route,
        }
    }

    /// Load the network described by `tables`.
    ///
    /// On success the previous graph, if any, is replaced. On error it is
    /// kept as it was.
    pub fn try_initialize(&mut self, tables: &FeedTables) -> Result<IngestReport, IngestError> {
        let (graph, report) = FeedIngester::new(self.ingest.clone()).build(tables)?;

        if report.connected_stations == 0 {
            warn!(
                stations = report.stations,
                "network has no connected stations, every route query will fail"
            );
        }
        info!(
            stations = report.stations,
            lines = report.lines,
            connected = report.connected_stations,
            fallback = report.used_fallback,
            "network initialized"
        );

        self.graph = Some(graph);
        Ok(report)
    }

    /// Like [`try_initialize`](Self::try_initialize), reporting only whether
    /// it worked. The error is logged.
    pub fn initialize(&mut self, tables: &FeedTables) -> bool {
        match self.try_initialize(tables) {
            Ok(_) => true,
            Err(err) => {
                warn!(%err, "failed to initialize network");
                false
            }
        }
    }

    /// Returns true once a graph has been loaded.
    pub fn is_initialized(&self) -> bool {
        self.graph.is_some()
    }

    /// The loaded graph, if any.
    pub fn graph(&self) -> Option<&GraphStore> {
        self.graph.as_ref()
    }

    /// Drop the loaded graph. Does nothing if none is loaded.
    pub fn release(&mut self) {
        if self.graph.take().is_some() {
            info!("network released");
        }
    }

    /// Shortest route by distance between two station ids.
    pub fn find_shortest_path(&self, source: StationId, target: StationId) -> Path {
        self.query(|finder| finder.shortest_path(source, target))
    }

    /// Fastest route by travel time, interchange penalties included.
    pub fn find_fastest_path(&self, source: StationId, target: StationId) -> Path {
        self.query(|finder| finder.fastest_path(source, target))
    }

    /// Like [`find_shortest_path`](Self::find_shortest_path), taking the first station matching each name.
    pub fn find_shortest_path_by_name(&self, source: &str, target: &str) -> Path {
        self.query(|finder| finder.shortest_path_by_name(source, target))
    }

    /// Like [`find_fastest_path`](Self::find_fastest_path), taking the first station matching each name.
    pub fn find_fastest_path_by_name(&self, source: &str, target: &str) -> Path {
        self.query(|finder| finder.fastest_path_by_name(source, target))
    }

    /// Stations whose name contains `query`. See [`PathFinder::resolve_name`].
    pub fn resolve_name(&self, query: &str) -> NameMatch {
        match &self.graph {
            Some(graph) => PathFinder::new(graph).resolve_name(query),
            None => NameMatch::None,
        }
    }

    /// Names of every station, in id order. Empty when uninitialized.
    pub fn station_names(&self) -> Vec<String> {
        self.graph
            .iter()
            .flat_map(|graph| graph.stations())
            .map(|s| s.name.clone())
            .collect()
    }

    /// Describe a path using the loaded graph's names.
    pub fn describe(&self, path: &Path) -> Option<RouteSummary> {
        self.graph
            .as_ref()
            .map(|graph| RouteSummary::describe(graph, path))
    }

    fn query(&self, run: impl FnOnce(&PathFinder<'_>) -> Path) -> Path {
        match &self.graph {
            Some(graph) => run(&PathFinder::with_config(graph, self.route.clone())),
            None => {
                warn!("route query on uninitialized network");
                Path::empty()
            }
        }
    }
}
