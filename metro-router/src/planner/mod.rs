//! Route planner using Dijkstra search.
//!
//! This module answers "what is the best way from station A to station B"
//! over a [`GraphStore`](crate::graph::GraphStore), either by distance or by
//! travel time with a penalty for each change between differently coloured
//! lines.

mod config;
mod interchange;
mod search;
mod summary;


pub use config::RouteConfig;
pub use interchange::{count_interchanges, interchange_positions, is_real_interchange};
pub use search::{CostMode, NameMatch, PathFinder};
pub use summary::RouteSummary;
