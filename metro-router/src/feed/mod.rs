//! GTFS-style feed ingestion.
//!
//! Turns the four schedule tables (stops, routes, trips, stop times) into a
//! populated [`GraphStore`](crate::graph::GraphStore):
//!
//! - every stop becomes a station and every route a line;
//! - consecutive stops of each trip are joined by an edge in both directions;
//! - if the feed yields no connectivity at all, a fallback topology is
//!   synthesized so the network is still navigable.
//!
//! Ingestion is all-or-nothing: the target store is only replaced once every
//! table has parsed.

mod config;
mod error;
mod fallback;
mod ingest;
mod parse;
mod tables;
mod time;

pub use config::{IngestConfig, TravelTime};
pub use error::IngestError;
pub use fallback::{FALLBACK_LINES, synthesize_fallback};
pub use ingest::{FeedIngester, IngestReport, SkippedRows};
pub use tables::{FeedTables, Table};
pub use time::{minutes_to_duration, parse_gtfs_time};
