//! Raw feed tables.

use std::fmt;
use std::path::Path;

use tracing::debug;

use super::error::IngestError;

/// The four tables a feed is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Stops,
    Routes,
    Trips,
    StopTimes,
}

impl Table {
    /// All tables, in ingestion order.
    pub const ALL: [Table; 4] = [Table::Stops, Table::Routes, Table::Trips, Table::StopTimes];

    /// Table name as used in messages.
    pub fn name(&self) -> &'static str {
        match self {
            Table::Stops => "stops",
            Table::Routes => "routes",
            Table::Trips => "trips",
            Table::StopTimes => "stop_times",
        }
    }

    /// File name of the table inside a feed directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            Table::Stops => "stops.txt",
            Table::Routes => "routes.txt",
            Table::Trips => "trips.txt",
            Table::StopTimes => "stop_times.txt",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw text of each feed table, header row included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedTables {
    pub stops: String,
    pub routes: String,
    pub trips: String,
    pub stop_times: String,
}

impl FeedTables {
    /// Create a feed from the text of its four tables.
    pub fn new(
        stops: impl Into<String>,
        routes: impl Into<String>,
        trips: impl Into<String>,
        stop_times: impl Into<String>,
    ) -> Self {
        Self {
            stops: stops.into(),
            routes: routes.into(),
            trips: trips.into(),
            stop_times: stop_times.into(),
        }
    }

    /// Read `stops.txt`, `routes.txt`, `trips.txt` and `stop_times.txt`
    /// from a feed directory.
    ///
    /// A missing or unreadable file fails the whole read.
    pub fn read_dir(dir: impl AsRef<Path>) -> Result<Self, IngestError> {
        let dir = dir.as_ref();
        let read = |table: Table| {
            let path = dir.join(table.file_name());
            debug!(table = %table, path = %path.display(), "reading feed table");
            std::fs::read_to_string(&path).map_err(|source| IngestError::Unreadable {
                table,
                path,
                source,
            })
        };

        Ok(Self {
            stops: read(Table::Stops)?,
            routes: read(Table::Routes)?,
            trips: read(Table::Trips)?,
            stop_times: read(Table::StopTimes)?,
        })
    }

    /// Text of a single table.
    pub fn get(&self, table: Table) -> &str {
        match table {
            Table::Stops => &self.stops,
            Table::Routes => &self.routes,
            Table::Trips => &self.trips,
            Table::StopTimes => &self.stop_times,
        }
    }
}
