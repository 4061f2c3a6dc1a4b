//! Dijkstra route search.
//!
//! One search serves both objectives: edges are weighted either by distance
//! or by travel time, and in the time case each change to a line of another
//! colour costs an extra interchange penalty. Nodes are settled once, keyed
//! by station alone, so the line a station was first settled on decides the
//! penalty for every edge leaving it.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use tracing::debug;

use crate::domain::{Edge, LineId, Path, StationId};
use crate::graph::GraphStore;

use super::config::RouteConfig;
use super::interchange::{count_interchanges, is_real_interchange};

/// The metric a search minimizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostMode {
    /// Total distance in kilometres. Interchanges are free.
    Distance,
    /// Total travel time in minutes, plus the interchange penalty.
    Time,
}

impl CostMode {
    /// Base cost of traversing an edge.
    pub fn edge_cost(self, edge: &Edge) -> f64 {
        match self {
            CostMode::Distance => edge.distance_km,
            CostMode::Time => edge.time_mins,
        }
    }
}

/// Outcome of resolving a station name fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameMatch {
    /// No station name contains the fragment.
    None,
    /// Exactly one station matches.
    Unique(StationId),
    /// Several stations match, in store order.
    Ambiguous(Vec<StationId>),
}

impl NameMatch {
    /// The first matching station, if any.
    pub fn first(&self) -> Option<StationId> {
        match self {
            NameMatch::None => None,
            NameMatch::Unique(id) => Some(*id),
            NameMatch::Ambiguous(ids) => ids.first().copied(),
        }
    }
}

/// Queue entry during search.
#[derive(Debug, Clone, Copy)]
struct State {
    cost: f64,
    station: StationId,
    /// Line used to reach `station`; `None` at the source.
    arrived_by: Option<LineId>,
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for State {}

// Reversed on cost so that `BinaryHeap` pops the cheapest entry first.
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| self.station.cmp(&other.station))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Route finder over a populated [`GraphStore`].
///
/// Queries never fail: unknown stations and unreachable targets give
/// [`Path::empty`].
#[derive(Debug, Clone)]
pub struct PathFinder<'a> {
    graph: &'a GraphStore,
    config: RouteConfig,
}

impl<'a> PathFinder<'a> {
    /// Create a finder with the default configuration.
    pub fn new(graph: &'a GraphStore) -> Self {
        Self::with_config(graph, RouteConfig::default())
    }

    /// Create a finder with the given configuration.
    pub fn with_config(graph: &'a GraphStore, config: RouteConfig) -> Self {
        Self { graph, config }
    }

    /// Route minimizing total distance.
    pub fn shortest_path(&self, source: StationId, target: StationId) -> Path {
        self.find_path(source, target, CostMode::Distance)
    }

    /// Route minimizing total travel time including interchange penalties.
    pub fn fastest_path(&self, source: StationId, target: StationId) -> Path {
        self.find_path(source, target, CostMode::Time)
    }

    /// [`shortest_path`](Self::shortest_path) between the first stations
    /// matching each name fragment.
    pub fn shortest_path_by_name(&self, source: &str, target: &str) -> Path {
        self.find_path_by_name(source, target, CostMode::Distance)
    }

    /// [`fastest_path`](Self::fastest_path) between the first stations
    /// matching each name fragment.
    pub fn fastest_path_by_name(&self, source: &str, target: &str) -> Path {
        self.find_path_by_name(source, target, CostMode::Time)
    }

    /// Resolve a name fragment to the stations it matches.
    pub fn resolve_name(&self, query: &str) -> NameMatch {
        let mut ids: Vec<StationId> = self
            .graph
            .stations_by_name(query)
            .into_iter()
            .map(|s| s.id)
            .collect();
        match ids.len() {
            0 => NameMatch::None,
            1 => NameMatch::Unique(ids.remove(0)),
            _ => NameMatch::Ambiguous(ids),
        }
    }

    fn find_path_by_name(&self, source: &str, target: &str, mode: CostMode) -> Path {
        let from = self.resolve_name(source);
        let to = self.resolve_name(target);

        match (from.first(), to.first()) {
            (Some(from), Some(to)) => self.find_path(from, to, mode),
            _ => {
                debug!(from = source, to = target, "no station matches name");
                Path::empty()
            }
        }
    }

    /// Run the search between two station ids.
    pub fn find_path(&self, source: StationId, target: StationId, mode: CostMode) -> Path {
        if self.graph.station(source).is_none() {
            debug!(from = %source, "unknown source station");
            return Path::empty();
        }
        if source == target {
            return Path::at(source);
        }

        let mut dist: HashMap<StationId, f64> = HashMap::new();
        let mut prev: HashMap<StationId, (StationId, LineId)> = HashMap::new();
        let mut visited: HashSet<StationId> = HashSet::new();
        let mut heap = BinaryHeap::new();

        dist.insert(source, 0.0);
        heap.push(State {
            cost: 0.0,
            station: source,
            arrived_by: None,
        });

        while let Some(State {
            cost,
            station,
            arrived_by,
        }) = heap.pop()
        {
            if station == target {
                break;
            }
            if !visited.insert(station) {
                continue;
            }

            for edge in self.graph.neighbors(station) {
                let next = cost + mode.edge_cost(edge) + self.penalty(mode, arrived_by, edge.line);
                let best = dist.get(&edge.target).copied().unwrap_or(f64::INFINITY);
                if next < best {
                    dist.insert(edge.target, next);
                    prev.insert(edge.target, (station, edge.line));
                    heap.push(State {
                        cost: next,
                        station: edge.target,
                        arrived_by: Some(edge.line),
                    });
                }
            }
        }

        let Some(&total) = dist.get(&target) else {
            debug!(from = %source, to = %target, ?mode, "target unreachable");
            return Path::empty();
        };

        let path = self.reconstruct(source, target, &prev, total, mode);
        debug!(
            from = %source,
            to = %target,
            ?mode,
            hops = path.hop_count(),
            interchanges = path.interchange_count,
            "found route"
        );
        path
    }

    /// Interchange penalty for leaving on `line` having arrived on `arrived_by`.
    fn penalty(&self, mode: CostMode, arrived_by: Option<LineId>, line: LineId) -> f64 {
        match (mode, arrived_by) {
            (CostMode::Time, Some(from)) if is_real_interchange(self.graph, from, line) => {
                self.config.interchange_penalty_mins
            }
            _ => 0.0,
        }
    }

    /// Walk predecessors back from `target` and annotate the route.
    ///
    /// The optimized metric is the search cost itself; the other one is
    /// summed from the first edge matching each hop.
    fn reconstruct(
        &self,
        source: StationId,
        target: StationId,
        prev: &HashMap<StationId, (StationId, LineId)>,
        total: f64,
        mode: CostMode,
    ) -> Path {
        let mut station_ids = vec![target];
        let mut line_ids = Vec::new();
        let mut current = target;
        while current != source {
            let Some(&(from, line)) = prev.get(&current) else {
                return Path::empty();
            };
            station_ids.push(from);
            line_ids.push(line);
            current = from;
        }
        station_ids.reverse();
        line_ids.reverse();

        let interchange_count = count_interchanges(self.graph, &line_ids);
        let mut path = Path {
            station_ids,
            line_ids,
            total_distance_km: 0.0,
            total_time_mins: 0.0,
            interchange_count,
        };

        let other = match mode {
            CostMode::Distance => CostMode::Time,
            CostMode::Time => CostMode::Distance,
        };
        let other_total: f64 = path
            .hops()
            .filter_map(|(from, to, line)| self.hop_edge(from, to, line))
            .map(|edge| other.edge_cost(edge))
            .sum();

        match mode {
            CostMode::Distance => {
                path.total_distance_km = total;
                path.total_time_mins = other_total
                    + interchange_count as f64 * self.config.interchange_penalty_mins;
            }
            CostMode::Time => {
                path.total_time_mins = total;
                path.total_distance_km = other_total;
            }
        }
        path
    }

    fn hop_edge(&self, from: StationId, to: StationId, line: LineId) -> Option<&'a Edge> {
        self.graph
            .neighbors(from)
            .iter()
            .find(|e| e.target == to && e.line == line)
    }
}
