//! Feed ingester.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use tracing::{debug, info};

use crate::domain::{Edge, Line, LineId, Station, StationId};
use crate::graph::GraphStore;

use super::config::{IngestConfig, TravelTime};
use super::error::IngestError;
use super::fallback::synthesize_fallback;
use super::parse::{Row, rows};
use super::tables::{FeedTables, Table};
use super::time::minutes_between;

/// Rows ignored because they lacked required columns, per table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SkippedRows {
    pub stops: usize,
    pub routes: usize,
    pub trips: usize,
    pub stop_times: usize,
}

impl SkippedRows {
    /// Total skipped rows across all tables.
    pub fn total(&self) -> usize {
        self.stops + self.routes + self.trips + self.stop_times
    }
}

/// Summary of a successful ingestion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    /// Stations in the resulting graph.
    pub stations: usize,

    /// Lines in the resulting graph, synthesized ones included.
    pub lines: usize,

    /// Trips that had both a route and stop times.
    pub trips: usize,

    /// Trips with stop times but no entry in the trips table.
    pub unrouted_trips: usize,

    /// Directed edges built from trips.
    pub feed_edges: usize,

    /// Directed edges added by fallback synthesis.
    pub fallback_edges: usize,

    /// Stations with at least one outgoing edge.
    pub connected_stations: usize,

    /// Whether fallback synthesis ran.
    pub used_fallback: bool,

    /// Rows skipped for being too short.
    pub skipped: SkippedRows,
}

/// One row of the stop-times table.
#[derive(Debug, Clone)]
struct StopTime {
    stop: StationId,
    sequence: i32,
    arrival: String,
    departure: String,
}

/// Builds a [`GraphStore`] from raw feed tables.
#[derive(Debug, Clone, Default)]
pub struct FeedIngester {
    config: IngestConfig,
}

impl FeedIngester {
    /// Create an ingester with the given configuration.
    pub fn new(config: IngestConfig) -> Self {
        Self { config }
    }

    /// Replace the contents of `store` with the network described by `tables`.
    ///
    /// The graph is built into a fresh store first; `store` is only
    /// overwritten once every table has parsed, so on error it keeps its
    /// previous contents.
    pub fn ingest(
        &self,
        store: &mut GraphStore,
        tables: &FeedTables,
    ) -> Result<IngestReport, IngestError> {
        let (staged, report) = self.build(tables)?;
        *store = staged;
        Ok(report)
    }

    /// Build a new store from `tables`.
    pub fn build(&self, tables: &FeedTables) -> Result<(GraphStore, IngestReport), IngestError> {
        let mut store = GraphStore::new();
        let mut report = IngestReport::default();

        report.skipped.stops = parse_stops(&mut store, &tables.stops)?;
        report.skipped.routes = parse_routes(&mut store, &tables.routes)?;

        let (trip_routes, skipped) = parse_trips(&tables.trips)?;
        report.skipped.trips = skipped;

        let (trip_stops, skipped) = parse_stop_times(&tables.stop_times)?;
        report.skipped.stop_times = skipped;

        for (trip_id, mut stops) in trip_stops {
            let Some(&line) = trip_routes.get(trip_id.as_str()) else {
                report.unrouted_trips += 1;
                continue;
            };

            stops.sort_by_key(|s| s.sequence);
            report.trips += 1;
            report.feed_edges += self.connect_trip(&mut store, line, &stops);
        }

        info!(
            stations = store.station_count(),
            lines = store.line_count(),
            trips = report.trips,
            edges = report.feed_edges,
            skipped_rows = report.skipped.total(),
            "parsed feed"
        );

        if !store.is_empty() && !store.has_connections() {
            info!("feed has no connections, synthesizing fallback network");
            report.fallback_edges = synthesize_fallback(&mut store, &self.config);
            report.used_fallback = true;
        }

        report.stations = store.station_count();
        report.lines = store.line_count();
        report.connected_stations = store.connected_station_count();

        Ok((store, report))
    }

    /// Join consecutive stops of one trip. Returns the number of directed
    /// edges added.
    fn connect_trip(&self, store: &mut GraphStore, line: LineId, stops: &[StopTime]) -> usize {
        let mut added = 0;
        for pair in stops.windows(2) {
            let (from, to) = (&pair[0], &pair[1]);
            let distance = match (store.station(from.stop), store.station(to.stop)) {
                (Some(a), Some(b)) => a.distance_km(b),
                _ => continue,
            };

            let time = match self.config.travel_time {
                TravelTime::Constant => self.config.hop_time_mins,
                TravelTime::Timetable => minutes_between(&from.departure, &to.arrival)
                    .unwrap_or(self.config.hop_time_mins),
            };

            store.add_bidirectional(Edge::new(from.stop, to.stop, line, distance, time));
            added += 2;
        }
        added
    }
}

/// Parse the stops table into stations. Returns the number of skipped rows.
fn parse_stops(store: &mut GraphStore, text: &str) -> Result<usize, IngestError> {
    let mut skipped = 0;
    for row in rows(Table::Stops, text) {
        let row = row?;
        // id, code, name, (unused), lat, lon
        if !row.has_columns(6) {
            skip(&row, &mut skipped);
            continue;
        }
        let id: i32 = row.number(0)?;
        let lat: f64 = row.number(4)?;
        let lon: f64 = row.number(5)?;
        store.add_station(Station::new(id, row.text(1), row.text(2), lat, lon));
    }
    Ok(skipped)
}

/// Parse the routes table into lines. Returns the number of skipped rows.
fn parse_routes(store: &mut GraphStore, text: &str) -> Result<usize, IngestError> {
    let mut skipped = 0;
    for row in rows(Table::Routes, text) {
        let row = row?;
        // id, (agency), (short name), long name, ..., color at 7
        if !row.has_columns(4) {
            skip(&row, &mut skipped);
            continue;
        }
        let id: i32 = row.number(0)?;
        store.add_line(Line::new(id, row.text(3), row.text(7)));
    }
    Ok(skipped)
}

/// Map trip ids to their route.
fn parse_trips(text: &str) -> Result<(HashMap<String, LineId>, usize), IngestError> {
    let mut trips = HashMap::new();
    let mut skipped = 0;
    for row in rows(Table::Trips, text) {
        let row = row?;
        // route id, (service), trip id
        if !row.has_columns(3) {
            skip(&row, &mut skipped);
            continue;
        }
        let route: i32 = row.number(0)?;
        trips.insert(row.text(2).to_string(), LineId(route));
    }
    Ok((trips, skipped))
}

/// Group stop times by trip, in file order.
fn parse_stop_times(text: &str) -> Result<(BTreeMap<String, Vec<StopTime>>, usize), IngestError> {
    let mut trips: BTreeMap<String, Vec<StopTime>> = BTreeMap::new();
    let mut skipped = 0;
    for row in rows(Table::StopTimes, text) {
        let row = row?;
        // trip id, arrival, departure, stop id, sequence
        if !row.has_columns(5) {
            skip(&row, &mut skipped);
            continue;
        }
        let stop: i32 = row.number(3)?;
        let sequence: i32 = row.number(4)?;
        trips
            .entry(row.text(0).to_string())
            .or_default()
            .push(StopTime {
                stop: StationId(stop),
                sequence,
                arrival: row.text(1).to_string(),
                departure: row.text(2).to_string(),
            });
    }
    Ok((trips, skipped))
}

fn skip(row: &Row, skipped: &mut usize) {
    debug!(?row, "skipping short row");
    *skipped += 1;
}

#[cfg(test)]
mod tests {
    use super::*;

    const STOPS: &str = "\
stop_id,stop_code,stop_name,stop_desc,stop_lat,stop_lon
1,RCK,Rajiv Chowk,,28.6328,77.2197
2,BKR,Barakhamba Road,,28.6297,77.2302
3,MDH,Mandi House,,28.6259,77.2341
4,KG,Kashmere Gate,,28.6675,77.2282
";

    const ROUTES: &str = "\
route_id,agency_id,route_short_name,route_long_name,route_desc,route_type,route_url,route_color
1,DMRC,BL,Blue Line,,1,,0000FF
2,DMRC,YL,Yellow Line,,1,,FFFF00
";

    const TRIPS: &str = "\
route_id,service_id,trip_id
1,weekday,BL_1
2,weekday,YL_1
";

    const STOP_TIMES: &str = "\
trip_id,arrival_time,departure_time,stop_id,stop_sequence
BL_1,08:04:00,08:04:30,3,3
BL_1,08:00:00,08:00:30,1,1
BL_1,08:02:00,08:02:30,2,2
YL_1,09:00:00,09:00:00,4,1
YL_1,09:05:00,09:05:00,1,2
";

    fn feed() -> FeedTables {
        FeedTables::new(STOPS, ROUTES, TRIPS, STOP_TIMES)
    }

    fn edges_between(store: &GraphStore, from: i32, to: i32) -> Vec<Edge> {
        store
            .neighbors(StationId(from))
            .iter()
            .filter(|e| e.target == StationId(to))
            .copied()
            .collect()
    }

    #[test]
    fn builds_stations_lines_and_edges() {
        let mut store = GraphStore::new();
        let report = FeedIngester::default().ingest(&mut store, &feed()).unwrap();

        assert_eq!(report.stations, 4);
        assert_eq!(report.lines, 2);
        assert_eq!(report.trips, 2);
        // BL: 1-2, 2-3; YL: 4-1; each in both directions
        assert_eq!(report.feed_edges, 6);
        assert_eq!(report.fallback_edges, 0);
        assert!(!report.used_fallback);
        assert_eq!(report.connected_stations, 4);
        assert_eq!(store.edge_count(), 6);

        let station = store.station(StationId(1)).unwrap();
        assert_eq!(station.code, "RCK");
        assert_eq!(station.name, "Rajiv Chowk");
        assert_eq!(station.latitude, 28.6328);

        let line = store.line(LineId(2)).unwrap();
        assert_eq!(line.name, "Yellow Line");
        assert_eq!(line.color, "FFFF00");
    }

    #[test]
    fn stops_are_joined_in_sequence_order() {
        let mut store = GraphStore::new();
        FeedIngester::default().ingest(&mut store, &feed()).unwrap();

        assert_eq!(edges_between(&store, 1, 2).len(), 1);
        assert_eq!(edges_between(&store, 2, 3).len(), 1);
        // 3 is listed first in the file but has the highest sequence
        assert!(edges_between(&store, 3, 1).is_empty());
        assert!(edges_between(&store, 1, 3).is_empty());
    }

    #[test]
    fn edges_use_haversine_distance_and_constant_time() {
        let mut store = GraphStore::new();
        FeedIngester::default().ingest(&mut store, &feed()).unwrap();

        let a = store.station(StationId(1)).unwrap();
        let b = store.station(StationId(2)).unwrap();
        let edge = edges_between(&store, 1, 2)[0];

        assert_eq!(edge.line, LineId(1));
        assert_eq!(edge.distance_km, a.distance_km(b));
        assert_eq!(edge.time_mins, 3.0);
        // Yellow line hop is five minutes in the timetable, still three here
        assert_eq!(edges_between(&store, 4, 1)[0].time_mins, 3.0);
    }

    #[test]
    fn every_edge_has_a_matching_reverse() {
        let mut store = GraphStore::new();
        FeedIngester::default().ingest(&mut store, &feed()).unwrap();

        for id in store.station_ids() {
            for edge in store.neighbors(id) {
                let reverse = store
                    .neighbors(edge.target)
                    .iter()
                    .any(|r| *r == edge.reversed());
                assert!(reverse, "no reverse for {edge:?}");
            }
        }
    }

    #[test]
    fn timetable_travel_times() {
        let mut store = GraphStore::new();
        FeedIngester::new(IngestConfig::timetable())
            .ingest(&mut store, &feed())
            .unwrap();

        // Departs 08:00:30, arrives 08:02:00
        assert_eq!(edges_between(&store, 1, 2)[0].time_mins, 1.5);
        assert_eq!(edges_between(&store, 2, 1)[0].time_mins, 1.5);
        // Departs 09:00:00, arrives 09:05:00
        assert_eq!(edges_between(&store, 4, 1)[0].time_mins, 5.0);
    }

    #[test]
    fn timetable_falls_back_to_constant_on_bad_times() {
        let stop_times = "\
trip_id,arrival_time,departure_time,stop_id,stop_sequence
BL_1,,,1,1
BL_1,,,2,2
";
        let tables = FeedTables::new(STOPS, ROUTES, TRIPS, stop_times);
        let mut store = GraphStore::new();
        FeedIngester::new(IngestConfig::timetable())
            .ingest(&mut store, &tables)
            .unwrap();

        assert_eq!(edges_between(&store, 1, 2)[0].time_mins, 3.0);
    }

    #[test]
    fn short_rows_are_skipped_and_counted() {
        let stops = "\
stop_id,stop_code,stop_name,stop_desc,stop_lat,stop_lon
1,RCK,Rajiv Chowk,,28.6328,77.2197
2,BKR,Barakhamba Road,,28.6297
3,MDH
";
        let routes = "h\n1,DMRC,BL\n2,DMRC,YL,Yellow Line\n";
        let trips = "h\n1,weekday\n2,weekday,YL_1\n";
        let stop_times = "h\nYL_1,09:00:00\nYL_1,09:00:00,09:00:00,1,1\n";

        let tables = FeedTables::new(stops, routes, trips, stop_times);
        let mut store = GraphStore::new();
        let report = FeedIngester::default().ingest(&mut store, &tables).unwrap();

        assert_eq!(report.stations, 1);
        assert_eq!(
            report.skipped,
            SkippedRows {
                stops: 2,
                routes: 1,
                trips: 1,
                stop_times: 1,
            }
        );
        assert_eq!(report.skipped.total(), 5);
        // Only line 2 came from the feed; fallback adds lines 1 and 3
        assert!(store.line(LineId(2)).is_some());
        assert_eq!(store.line(LineId(2)).unwrap().color, "");
    }

    #[test]
    fn missing_color_column_gives_empty_color() {
        let routes = "h\n5,DMRC,MG,Magenta Line\n";
        let tables = FeedTables::new(STOPS, routes, TRIPS, STOP_TIMES);
        let mut store = GraphStore::new();
        FeedIngester::default().ingest(&mut store, &tables).unwrap();

        let line = store.line(LineId(5)).unwrap();
        assert_eq!(line.name, "Magenta Line");
        assert_eq!(line.color, "");
    }

    #[test]
    fn trips_without_route_are_ignored() {
        let trips = "route_id,service_id,trip_id\n1,weekday,BL_1\n";
        let tables = FeedTables::new(STOPS, ROUTES, trips, STOP_TIMES);
        let mut store = GraphStore::new();
        let report = FeedIngester::default().ingest(&mut store, &tables).unwrap();

        assert_eq!(report.trips, 1);
        assert_eq!(report.unrouted_trips, 1);
        assert!(edges_between(&store, 4, 1).is_empty());
    }

    #[test]
    fn stops_missing_from_stop_table_are_not_joined() {
        let stop_times = "\
trip_id,arrival_time,departure_time,stop_id,stop_sequence
BL_1,08:00:00,08:00:00,1,1
BL_1,08:02:00,08:02:00,99,2
BL_1,08:04:00,08:04:00,2,3
YL_1,09:00:00,09:00:00,4,1
YL_1,09:05:00,09:05:00,1,2
";
        let tables = FeedTables::new(STOPS, ROUTES, TRIPS, stop_times);
        let mut store = GraphStore::new();
        let report = FeedIngester::default().ingest(&mut store, &tables).unwrap();

        // Only the yellow line hop survives
        assert_eq!(report.feed_edges, 2);
        assert!(!report.used_fallback);
        assert!(edges_between(&store, 1, 2).is_empty());
        assert_eq!(edges_between(&store, 4, 1).len(), 1);
    }

    #[test]
    fn invalid_number_aborts_without_touching_store() {
        let mut store = GraphStore::new();
        FeedIngester::default().ingest(&mut store, &feed()).unwrap();
        let edges_before = store.edge_count();

        let stops = "h\n1,RCK,Rajiv Chowk,,north,77.2197\n";
        let tables = FeedTables::new(stops, ROUTES, TRIPS, STOP_TIMES);
        let err = FeedIngester::default()
            .ingest(&mut store, &tables)
            .unwrap_err();

        assert!(matches!(
            err,
            IngestError::InvalidNumber {
                table: Table::Stops,
                line: 2,
                column: 4,
                ..
            }
        ));
        assert_eq!(store.station_count(), 4);
        assert_eq!(store.edge_count(), edges_before);
    }

    #[test]
    fn quoted_stop_name_with_comma_is_ingested() {
        let stops = "\
stop_id,stop_code,stop_name,stop_desc,stop_lat,stop_lon
1,RCK,\"Rajiv Chowk\",,28.6328,77.2197
2,CP,\"Connaught Place, Block A\",,28.6315,77.2167
3,MDH,Mandi House,,28.6259,77.2341
";
        let tables = FeedTables::new(stops, ROUTES, TRIPS, STOP_TIMES);
        let mut store = GraphStore::new();
        let report = FeedIngester::default().ingest(&mut store, &tables).unwrap();

        assert_eq!(report.stations, 3);
        assert_eq!(report.skipped.stops, 0);
        let station = store.station(StationId(2)).unwrap();
        assert_eq!(station.code, "CP");
        assert_eq!(station.name, "Connaught Place, Block A");
        assert_eq!(station.latitude, 28.6315);
        assert_eq!(station.longitude, 77.2167);
        assert_eq!(store.station(StationId(1)).unwrap().name, "Rajiv Chowk");
        assert_eq!(edges_between(&store, 1, 2).len(), 1);
    }

    #[test]
    fn invalid_stop_sequence_is_fatal() {
        let stop_times = "h\nBL_1,08:00:00,08:00:00,1,first\n";
        let tables = FeedTables::new(STOPS, ROUTES, TRIPS, stop_times);

        let err = FeedIngester::default().build(&tables).unwrap_err();
        assert_eq!(err.table(), Table::StopTimes);
    }

    #[test]
    fn ingest_replaces_previous_contents() {
        let mut store = GraphStore::new();
        store.add_station(Station::new(500, "OLD", "Old Station", 0.0, 0.0));

        FeedIngester::default().ingest(&mut store, &feed()).unwrap();

        assert!(store.station(StationId(500)).is_none());
        assert_eq!(store.station_count(), 4);
    }

    #[test]
    fn unconnected_feed_triggers_fallback() {
        let tables = FeedTables::new(STOPS, ROUTES, TRIPS, "h\n");
        let mut store = GraphStore::new();
        let report = FeedIngester::default().ingest(&mut store, &tables).unwrap();

        assert!(report.used_fallback);
        assert_eq!(report.feed_edges, 0);
        // Three sequential pairs, both directions
        assert_eq!(report.fallback_edges, 6);
        assert_eq!(report.connected_stations, 4);
        // Feed lines 1 and 2 stay; the fallback only adds line 3
        assert_eq!(store.line(LineId(1)).unwrap().name, "Blue Line");
        assert_eq!(store.line(LineId(3)).unwrap().name, "Yellow Line");
        assert_eq!(report.lines, 3);
    }

    #[test]
    fn empty_feed_builds_empty_store() {
        let tables = FeedTables::new("h\n", "h\n", "h\n", "h\n");
        let mut store = GraphStore::new();
        let report = FeedIngester::default().ingest(&mut store, &tables).unwrap();

        assert!(store.is_empty());
        assert!(!report.used_fallback);
        assert_eq!(report, IngestReport::default());
    }
}
