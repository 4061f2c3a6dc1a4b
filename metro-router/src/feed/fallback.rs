//! Fallback topology for feeds without usable trips.
//!
//! When a feed describes stations but none of its trips produce an edge,
//! stations are chained together in store order and a sparse set of cross
//! connections is added, so that every query still has something to route
//! over. The result is synthetic and bears no relation to the real network.

use tracing::{debug, info};

use crate::domain::{Edge, Line, LineId, StationId};
use crate::graph::GraphStore;

use super::config::IngestConfig;

/// Lines guaranteed to exist after fallback synthesis: id, name, colour.
pub const FALLBACK_LINES: [(i32, &str, &str); 3] = [
    (1, "Red Line", "#FF0000"),
    (2, "Blue Line", "#0000FF"),
    (3, "Yellow Line", "#FFFF00"),
];

/// Synthesize connectivity over every station in `store`.
///
/// - lines from [`FALLBACK_LINES`] are added when their id is free;
/// - each station is joined to the next one in store order, moving to a new
///   line id every `fallback_line_span` pairs, up to `fallback_last_pair`;
/// - every `cross_stride`-th station is joined to the station
///   `cross_offset` positions ahead on `cross_line`.
///
/// All edges are added in both directions. Returns the number of directed
/// edges added; an empty store is left untouched.
pub fn synthesize_fallback(store: &mut GraphStore, config: &IngestConfig) -> usize {
    let ids = store.station_ids();
    if ids.is_empty() {
        debug!("no stations, nothing to connect");
        return 0;
    }

    for (id, name, color) in FALLBACK_LINES {
        if store.line(LineId(id)).is_none() {
            store.add_line(Line::new(id, name, color));
            info!(line = name, "added fallback line");
        }
    }

    let mut added = 0;
    let span = config.fallback_line_span.max(1);

    for (i, pair) in ids.windows(2).enumerate() {
        let line = LineId((i / span) as i32 + 1);
        if connect(store, config, pair[0], pair[1], line, config.fallback_min_hop_mins) {
            added += 2;
        }
        if i >= config.fallback_last_pair {
            break;
        }
    }

    let stride = config.cross_stride.max(1);
    for k in 0..ids.len() / stride {
        let from = k * stride;
        let to = from + config.cross_offset;
        if to >= ids.len() {
            continue;
        }
        if connect(
            store,
            config,
            ids[from],
            ids[to],
            config.cross_line,
            config.cross_min_hop_mins,
        ) {
            added += 2;
        }
    }

    info!(
        stations = ids.len(),
        edges = added,
        "synthesized fallback connections"
    );
    added
}

/// Join two stations in both directions. False if either station is unknown.
fn connect(
    store: &mut GraphStore,
    config: &IngestConfig,
    from: StationId,
    to: StationId,
    line: LineId,
    floor_mins: f64,
) -> bool {
    let distance = match (store.station(from), store.station(to)) {
        (Some(a), Some(b)) => a.distance_km(b),
        _ => return false,
    };
    let time = config.fallback_time_mins(distance, floor_mins);

    debug!(%from, %to, %line, distance, time, "fallback connection");
    store.add_bidirectional(Edge::new(from, to, line, distance, time));
    true
}
